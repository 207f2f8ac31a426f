//! Conformity policies and per-point evaluation.
//!
//! Two policies exist and are never substituted for one another:
//!
//! - `FullGum`: Type A from the readings, Type B from the declared sources,
//!   Welch–Satterthwaite k, guard-banded verdict against the tolerance.
//! - `QuickScreening`: the registration-form heuristic. `u = 10% of |error|`,
//!   `k = 2`, and the point passes when `|error| ≤ U`. Type A/B are skipped.

use log::debug;
use rayon::prelude::*;

use crate::domain::{CalibrationPoint, ConfidenceLevel, ConformityResult, PointEvaluation, PolicyKind};
use crate::engine::{CONVENTIONAL_K, conformity, error, error_ratio_percent, expanded, full_uncertainty};
use crate::error::ValidationError;
use crate::math::mean;

/// Fraction of `|error|` used as the standard uncertainty by quick screening.
pub const QUICK_SCREENING_FRACTION: f64 = 0.1;

/// Conformity policy selected explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConformityPolicy {
    FullGum { confidence: ConfidenceLevel },
    QuickScreening,
}

impl ConformityPolicy {
    pub fn from_kind(kind: PolicyKind, confidence: ConfidenceLevel) -> Self {
        match kind {
            PolicyKind::Full => ConformityPolicy::FullGum { confidence },
            PolicyKind::Quick => ConformityPolicy::QuickScreening,
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            ConformityPolicy::FullGum { .. } => PolicyKind::Full,
            ConformityPolicy::QuickScreening => PolicyKind::Quick,
        }
    }
}

/// Evaluate one calibration point under `policy`.
///
/// The indicated value is the mean of the readings; the error is
/// `indicated − reference`.
pub fn evaluate_point(
    point: &CalibrationPoint,
    policy: &ConformityPolicy,
) -> Result<PointEvaluation, ValidationError> {
    validate_point(point)?;

    let indicated = mean(&point.readings);
    let err = error(indicated, point.reference);

    let evaluation = match policy {
        ConformityPolicy::FullGum { confidence } => {
            let budget = full_uncertainty(&point.readings, &point.sources, *confidence)?;
            PointEvaluation {
                sequence: point.sequence,
                reference: point.reference,
                indicated,
                policy: PolicyKind::Full,
                standard_uncertainty: budget.combined.u_c,
                coverage_factor: budget.coverage_factor,
                conformity: conformity(err, budget.expanded_uncertainty, point.tolerance),
                budget: Some(budget),
            }
        }
        ConformityPolicy::QuickScreening => {
            let u = err.abs() * QUICK_SCREENING_FRACTION;
            let u_exp = expanded(u, CONVENTIONAL_K);
            let verdict = ConformityResult {
                error: err,
                expanded_uncertainty: u_exp,
                tolerance: point.tolerance,
                conforms: err.abs() <= u_exp,
                error_ratio_percent: error_ratio_percent(err, point.tolerance),
            };
            PointEvaluation {
                sequence: point.sequence,
                reference: point.reference,
                indicated,
                policy: PolicyKind::Quick,
                standard_uncertainty: u,
                coverage_factor: CONVENTIONAL_K,
                conformity: verdict,
                budget: None,
            }
        }
    };

    debug!(
        "Point {}: policy={:?} error={} U={} conforms={}",
        evaluation.sequence,
        evaluation.policy,
        evaluation.conformity.error,
        evaluation.conformity.expanded_uncertainty,
        evaluation.conformity.conforms
    );

    Ok(evaluation)
}

/// Reject a point with no readings or with non-finite readings, reference or
/// tolerance. Source checks happen in `type_b`.
pub fn validate_point(point: &CalibrationPoint) -> Result<(), ValidationError> {
    if point.readings.is_empty() {
        return Err(ValidationError::EmptyReadings {
            sequence: point.sequence,
        });
    }
    let all_finite = point.readings.iter().all(|v| v.is_finite())
        && point.reference.is_finite()
        && point.tolerance.is_finite();
    if !all_finite {
        return Err(ValidationError::NonFiniteInput {
            sequence: point.sequence,
        });
    }
    Ok(())
}

/// Evaluate independent points in parallel; output order follows input order.
pub fn evaluate_points(
    points: &[CalibrationPoint],
    policy: &ConformityPolicy,
) -> Result<Vec<PointEvaluation>, ValidationError> {
    points
        .par_iter()
        .map(|p| evaluate_point(p, policy))
        .collect()
}
