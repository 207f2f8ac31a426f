//! Command-line parsing for the uncertainty engine.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! engine. Defaults that may come from the environment (`GUM_CONFIDENCE`,
//! `GUM_POLICY`) are left as `Option`s here and resolved in `app`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DegreesOfFreedom, PolicyKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gum", version, about = "GUM measurement uncertainty engine for calibration data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate every point of a calibration request and print the verdicts.
    Evaluate(EvaluateArgs),
    /// Print the full uncertainty budget of one calibration point.
    Budget(BudgetArgs),
    /// Print the coverage factor k for given effective degrees of freedom.
    Coverage(CoverageArgs),
    /// Generate a synthetic reading series and print its Type A evaluation.
    Simulate(SimulateArgs),
    /// Suggest calibration points across an instrument range.
    Points(PointsArgs),
}

/// Options for evaluating a calibration request.
#[derive(Debug, Parser, Clone)]
pub struct EvaluateArgs {
    /// Calibration request JSON.
    #[arg(short, long, value_name = "JSON")]
    pub input: PathBuf,

    /// Conformity policy (defaults to $GUM_POLICY, else `full`).
    #[arg(long, value_enum)]
    pub policy: Option<PolicyKind>,

    /// Confidence level in (0, 1); overrides the request and $GUM_CONFIDENCE.
    #[arg(short, long)]
    pub confidence: Option<f64>,

    /// Export the full run (with budgets) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Export per-point results to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,
}

/// Options for printing one point's budget.
#[derive(Debug, Parser, Clone)]
pub struct BudgetArgs {
    /// Calibration request JSON.
    #[arg(short, long, value_name = "JSON")]
    pub input: PathBuf,

    /// Sequence number of the point (defaults to the first point).
    #[arg(long)]
    pub point: Option<u32>,

    /// Confidence level in (0, 1); overrides the request and $GUM_CONFIDENCE.
    #[arg(short, long)]
    pub confidence: Option<f64>,
}

/// Options for the coverage factor lookup.
#[derive(Debug, Parser, Clone)]
pub struct CoverageArgs {
    /// Effective degrees of freedom (integer or `inf`).
    #[arg(long, default_value = "inf")]
    pub dof: DegreesOfFreedom,

    /// Confidence level in (0, 1).
    #[arg(short, long)]
    pub confidence: Option<f64>,
}

/// Options for synthetic series generation.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Reference value.
    #[arg(long)]
    pub reference: f64,

    /// Number of readings.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Systematic offset of the simulated instrument.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub bias: f64,

    /// Repeatability standard deviation.
    #[arg(long, default_value_t = 0.01)]
    pub noise: f64,

    /// Display resolution (readings are rounded to multiples of it).
    #[arg(long)]
    pub resolution: Option<f64>,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Confidence level in (0, 1).
    #[arg(short, long)]
    pub confidence: Option<f64>,
}

/// Options for suggested calibration points.
#[derive(Debug, Parser, Clone)]
pub struct PointsArgs {
    /// Lower end of the instrument range.
    #[arg(long, allow_hyphen_values = true)]
    pub min: f64,

    /// Upper end of the instrument range.
    #[arg(long, allow_hyphen_values = true)]
    pub max: f64,
}
