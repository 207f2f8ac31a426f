//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging and loads `.env`
//! - parses CLI arguments
//! - resolves configuration (flags > environment > built-ins)
//! - runs the engine and prints reports
//! - writes optional exports

use clap::Parser;
use log::debug;

use crate::cli::{BudgetArgs, Command, CoverageArgs, EvaluateArgs, PointsArgs, SimulateArgs};
use crate::data::{SimulationConfig, simulate_readings, suggested_points};
use crate::domain::{ConfidenceLevel, PolicyKind, RunConfig};
use crate::engine::{coverage_factor, type_a};
use crate::error::{AppError, EXIT_INPUT, EXIT_NUMERIC};

pub mod pipeline;

/// Environment variable holding the default confidence level.
pub const ENV_CONFIDENCE: &str = "GUM_CONFIDENCE";
/// Environment variable holding the default conformity policy.
pub const ENV_POLICY: &str = "GUM_POLICY";

/// Entry point for the `gum` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();
    let env = EnvDefaults::from_env()?;
    debug!("Environment defaults: {env:?}");

    match cli.command {
        Command::Evaluate(args) => handle_evaluate(&args, &env),
        Command::Budget(args) => handle_budget(&args, &env),
        Command::Coverage(args) => handle_coverage(&args, &env),
        Command::Simulate(args) => handle_simulate(&args, &env),
        Command::Points(args) => handle_points(&args),
    }
}

/// Defaults read from the process environment (after `.env` is loaded).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvDefaults {
    pub confidence: Option<ConfidenceLevel>,
    pub policy: Option<PolicyKind>,
}

impl EnvDefaults {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_values(
            std::env::var(ENV_CONFIDENCE).ok().as_deref(),
            std::env::var(ENV_POLICY).ok().as_deref(),
        )
    }

    /// Parse raw environment values; empty strings count as unset.
    pub fn from_values(confidence: Option<&str>, policy: Option<&str>) -> Result<Self, AppError> {
        let confidence = match confidence.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| AppError::new(EXIT_INPUT, format!("{ENV_CONFIDENCE}='{raw}' is not a number.")))?;
                Some(
                    ConfidenceLevel::new(value)
                        .map_err(|e| AppError::new(EXIT_INPUT, format!("{ENV_CONFIDENCE}: {e}")))?,
                )
            }
            None => None,
        };
        let policy = match policy.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<PolicyKind>()
                    .map_err(|e| AppError::new(EXIT_INPUT, format!("{ENV_POLICY}: {e}")))?,
            ),
            None => None,
        };
        Ok(Self { confidence, policy })
    }
}

fn handle_evaluate(args: &EvaluateArgs, env: &EnvDefaults) -> Result<(), AppError> {
    let config = run_config_from_args(args, env)?;
    let run = pipeline::run_evaluation(&config)?;
    println!("{}", crate::report::format_run_summary(&run));
    Ok(())
}

fn handle_budget(args: &BudgetArgs, env: &EnvDefaults) -> Result<(), AppError> {
    let request = crate::io::read_request(&args.input)?;
    let confidence = pipeline::resolve_confidence(cli_confidence(args.confidence, env)?, &request);

    let (point, budget) = pipeline::point_budget(&request, args.point, confidence)?;
    println!("=== gum - uncertainty budget, point {} ===", point.sequence);
    println!("{}", crate::report::format_budget(&budget));
    Ok(())
}

fn handle_coverage(args: &CoverageArgs, env: &EnvDefaults) -> Result<(), AppError> {
    let confidence = cli_confidence(args.confidence, env)?.unwrap_or_default();
    let k = coverage_factor(args.dof, confidence);
    if !k.is_finite() {
        return Err(AppError::new(
            EXIT_NUMERIC,
            format!("Coverage factor is not finite for dof = {}.", args.dof),
        ));
    }
    let source = if args.dof.is_infinite() { "normal" } else { "Student-t" };
    println!("k = {k:.4} (dof = {}, confidence = {confidence}, {source})", args.dof);
    Ok(())
}

fn handle_simulate(args: &SimulateArgs, env: &EnvDefaults) -> Result<(), AppError> {
    let confidence = cli_confidence(args.confidence, env)?.unwrap_or_default();
    let readings = simulate_readings(&SimulationConfig {
        reference: args.reference,
        count: args.count,
        bias: args.bias,
        noise: args.noise,
        resolution: args.resolution,
        seed: args.seed,
    })?;
    let result = type_a(&readings, confidence);
    println!("{}", crate::report::format_type_a(&readings, &result, confidence));
    Ok(())
}

fn handle_points(args: &PointsArgs) -> Result<(), AppError> {
    let points = suggested_points(args.min, args.max)?;
    for (idx, value) in points.iter().enumerate() {
        println!("{:>2}  {value}", idx + 1);
    }
    Ok(())
}

/// Resolve the configuration for `gum evaluate`.
pub fn run_config_from_args(args: &EvaluateArgs, env: &EnvDefaults) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        input: args.input.clone(),
        policy: args.policy.or(env.policy).unwrap_or(pipeline::DEFAULT_POLICY),
        confidence: cli_confidence(args.confidence, env)?,
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
    })
}

/// CLI flag if given (validated), else the environment default.
fn cli_confidence(flag: Option<f64>, env: &EnvDefaults) -> Result<Option<ConfidenceLevel>, AppError> {
    match flag {
        Some(value) => Ok(Some(ConfidenceLevel::new(value)?)),
        None => Ok(env.confidence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            input: PathBuf::from("req.json"),
            policy: None,
            confidence: None,
            export_json: None,
            export_csv: None,
        }
    }

    #[test]
    fn env_values_parse() {
        let env = EnvDefaults::from_values(Some("0.99"), Some("quick")).unwrap();
        assert_eq!(env.confidence.map(f64::from), Some(0.99));
        assert_eq!(env.policy, Some(PolicyKind::Quick));

        assert_eq!(EnvDefaults::from_values(Some(""), None).unwrap(), EnvDefaults::default());
        assert!(EnvDefaults::from_values(Some("95"), None).is_err());
        assert!(EnvDefaults::from_values(Some("abc"), None).is_err());
        assert!(EnvDefaults::from_values(None, Some("strict")).is_err());
    }

    #[test]
    fn flags_override_environment() {
        let env = EnvDefaults::from_values(Some("0.99"), Some("quick")).unwrap();
        let cfg = run_config_from_args(
            &EvaluateArgs {
                policy: Some(PolicyKind::Full),
                confidence: Some(0.9),
                ..args()
            },
            &env,
        )
        .unwrap();
        assert_eq!(cfg.policy, PolicyKind::Full);
        assert_eq!(cfg.confidence.map(f64::from), Some(0.9));
    }

    #[test]
    fn environment_overrides_builtins() {
        let env = EnvDefaults::from_values(Some("0.99"), Some("quick")).unwrap();
        let cfg = run_config_from_args(&args(), &env).unwrap();
        assert_eq!(cfg.policy, PolicyKind::Quick);
        assert_eq!(cfg.confidence.map(f64::from), Some(0.99));

        let cfg = run_config_from_args(&args(), &EnvDefaults::default()).unwrap();
        assert_eq!(cfg.policy, PolicyKind::Full);
        assert!(cfg.confidence.is_none());
    }

    #[test]
    fn invalid_confidence_flag_is_a_validation_error() {
        let err = run_config_from_args(
            &EvaluateArgs {
                confidence: Some(1.5),
                ..args()
            },
            &EnvDefaults::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_VALIDATION);
    }
}
