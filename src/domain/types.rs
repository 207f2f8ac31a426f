//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - deserialized from calibration requests handed over by the host application
//! - used in-memory by the engine
//! - exported to JSON/CSV for the certificate layer

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default confidence level used when neither the request nor the caller sets one.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Probability distribution assumed for a Type B source.
///
/// The distribution only selects the default divisor that turns the declared
/// half-width / expanded value into a standard uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Value is already a standard uncertainty (or comes with its own divisor, e.g. k=2).
    #[default]
    Normal,
    /// Uniform over ±value (resolution, manufacturer limits): divisor √3.
    Rectangular,
    /// Triangular over ±value: divisor √6.
    Triangular,
}

impl Distribution {
    pub fn default_divisor(self) -> f64 {
        match self {
            Distribution::Normal => 1.0,
            Distribution::Rectangular => 3.0_f64.sqrt(),
            Distribution::Triangular => 6.0_f64.sqrt(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Distribution::Normal => "normal",
            Distribution::Rectangular => "rectangular",
            Distribution::Triangular => "triangular",
        }
    }
}

/// Degrees of freedom attached to an uncertainty estimate.
///
/// JSON form: `"infinite"` or `{ "finite": 9 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreesOfFreedom {
    Finite(u32),
    #[default]
    Infinite,
}

impl DegreesOfFreedom {
    pub fn is_infinite(self) -> bool {
        matches!(self, DegreesOfFreedom::Infinite)
    }
}

impl fmt::Display for DegreesOfFreedom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreesOfFreedom::Finite(n) => f.pad(&n.to_string()),
            DegreesOfFreedom::Infinite => f.pad("inf"),
        }
    }
}

impl FromStr for DegreesOfFreedom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inf" | "infinite" | "infinity" => Ok(DegreesOfFreedom::Infinite),
            other => other
                .parse::<u32>()
                .map(DegreesOfFreedom::Finite)
                .map_err(|_| format!("expected a non-negative integer or 'inf', got '{s}'")),
        }
    }
}

/// Confidence level `c` in the open interval (0, 1).
///
/// Threaded explicitly through every call that needs it; there is no global
/// or per-calculator confidence state.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidConfidence(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Cumulative probability of the upper bound of a two-sided interval: `(1 + c) / 2`.
    pub fn two_tailed_probability(self) -> f64 {
        (1.0 + self.0) / 2.0
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        ConfidenceLevel::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(value: ConfidenceLevel) -> Self {
        value.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.0)
    }
}

fn default_sensitivity() -> f64 {
    1.0
}

/// A declared, non-statistical uncertainty contribution (Type B).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintySource {
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(default)]
    pub distribution: Distribution,
    /// Explicit divisor; overrides the distribution default when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisor: Option<f64>,
    #[serde(default = "default_sensitivity")]
    pub sensitivity_coefficient: f64,
    #[serde(default)]
    pub degrees_of_freedom: DegreesOfFreedom,
}

impl UncertaintySource {
    /// A source with default sensitivity (1.0) and infinite degrees of freedom.
    pub fn new(description: impl Into<String>, value: f64, distribution: Distribution) -> Self {
        Self {
            description: description.into(),
            value,
            distribution,
            divisor: None,
            sensitivity_coefficient: default_sensitivity(),
            degrees_of_freedom: DegreesOfFreedom::Infinite,
        }
    }

    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = Some(divisor);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity_coefficient = sensitivity;
        self
    }

    pub fn with_degrees_of_freedom(mut self, dof: DegreesOfFreedom) -> Self {
        self.degrees_of_freedom = dof;
        self
    }

    /// Explicit divisor if present, else the distribution default.
    pub fn effective_divisor(&self) -> f64 {
        self.divisor
            .unwrap_or_else(|| self.distribution.default_divisor())
    }
}

/// Type A (statistical) estimate from repeated readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeAResult {
    pub mean: f64,
    pub sample_stdev: f64,
    pub stdev_of_mean: f64,
    pub degrees_of_freedom: u32,
    /// Student-t quantile for the confidence level; reported, not applied.
    pub t_factor: f64,
    pub standard_uncertainty: f64,
}

impl TypeAResult {
    /// Result for a series too short to estimate dispersion: every field zero.
    pub fn degenerate() -> Self {
        Self {
            mean: 0.0,
            sample_stdev: 0.0,
            stdev_of_mean: 0.0,
            degrees_of_freedom: 0,
            t_factor: 0.0,
            standard_uncertainty: 0.0,
        }
    }
}

/// One resolved Type B source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBComponent {
    pub description: String,
    pub value: f64,
    pub distribution: Distribution,
    pub divisor: f64,
    pub sensitivity_coefficient: f64,
    pub standard_uncertainty: f64,
    pub contribution: f64,
    pub contribution_squared: f64,
    pub degrees_of_freedom: DegreesOfFreedom,
}

/// Aggregated Type B estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBResult {
    pub components: Vec<TypeBComponent>,
    pub combined: f64,
}

/// Quadrature combination of Type A and Type B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedUncertaintyResult {
    pub u_a: f64,
    pub u_b: f64,
    pub u_c: f64,
    pub effective_degrees_of_freedom: DegreesOfFreedom,
}

/// Share of `u_c²` attributed to one input (Type A or a Type B source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionShare {
    pub label: String,
    pub percent: f64,
}

/// Every intermediate result of a full GUM evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyBudget {
    pub type_a: TypeAResult,
    pub type_b: TypeBResult,
    pub combined: CombinedUncertaintyResult,
    pub coverage_factor: f64,
    pub expanded_uncertainty: f64,
    pub confidence: ConfidenceLevel,
    pub shares: Vec<ContributionShare>,
}

/// Conformity verdict for one error / uncertainty / tolerance triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConformityResult {
    pub error: f64,
    pub expanded_uncertainty: f64,
    pub tolerance: f64,
    pub conforms: bool,
    /// `|error| / |tolerance| × 100`; `+inf` when the tolerance is exactly zero.
    pub error_ratio_percent: f64,
}

/// Which conformity policy the caller selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Full GUM pipeline with guard-banded verdict.
    Full,
    /// 10%-of-error heuristic with k = 2 (registration-form screening).
    Quick,
}

impl PolicyKind {
    pub fn display_name(self) -> &'static str {
        match self {
            PolicyKind::Full => "full GUM",
            PolicyKind::Quick => "quick screening",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "gum" => Ok(PolicyKind::Full),
            "quick" | "screening" => Ok(PolicyKind::Quick),
            other => Err(format!("unknown conformity policy '{other}' (expected 'full' or 'quick')")),
        }
    }
}

/// One nominal point of a calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub sequence: u32,
    /// Value of the reference standard.
    pub reference: f64,
    /// Repeated indications of the instrument under calibration.
    pub readings: Vec<f64>,
    /// Maximum permissible error (sign ignored).
    pub tolerance: f64,
    #[serde(default)]
    pub sources: Vec<UncertaintySource>,
}

/// A calibration request as handed over by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRequest {
    #[serde(default)]
    pub instrument: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLevel>,
    pub points: Vec<CalibrationPoint>,
}

/// Evaluation of one calibration point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEvaluation {
    pub sequence: u32,
    pub reference: f64,
    /// Mean of the readings.
    pub indicated: f64,
    pub policy: PolicyKind,
    pub standard_uncertainty: f64,
    pub coverage_factor: f64,
    pub conformity: ConformityResult,
    /// Present for the full GUM policy only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<UncertaintyBudget>,
}

/// Evaluation of a whole calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRun {
    pub instrument: String,
    pub policy: PolicyKind,
    pub confidence: ConfidenceLevel,
    pub evaluated_at: DateTime<Utc>,
    pub points: Vec<PointEvaluation>,
    /// True only if every point conforms.
    pub conforms: bool,
}

/// A run's configuration as understood by the pipeline.
///
/// Derived from CLI flags, then environment (`.env`), then built-in defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub policy: PolicyKind,
    /// Overrides the confidence stored in the request when set.
    pub confidence: Option<ConfidenceLevel>,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}
