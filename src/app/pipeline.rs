//! Shared "evaluation pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the workflow:
//! request -> policy resolution -> per-point evaluation (parallel) -> run verdict
//!
//! The host application can call `evaluate_run` directly with an in-memory
//! request; the CLI only adds file loading and printing around it.

use chrono::Utc;
use log::info;

use crate::domain::{CalibrationPoint, CalibrationRequest, CalibrationRun, ConfidenceLevel, PolicyKind, RunConfig, UncertaintyBudget};
use crate::engine::{ConformityPolicy, evaluate_points, full_uncertainty, validate_point};
use crate::error::{AppError, ValidationError};

/// Default policy when neither the CLI nor the environment picks one.
pub const DEFAULT_POLICY: PolicyKind = PolicyKind::Full;

/// Evaluate every point of `request` under `policy`.
///
/// `confidence` is the resolved level reported on the run (see
/// [`resolve_confidence`]); a `FullGum` policy evaluates at its own level.
/// The calibration conforms only if every point conforms; a request with no
/// points does not conform.
pub fn evaluate_run(
    request: &CalibrationRequest,
    policy: &ConformityPolicy,
    confidence: ConfidenceLevel,
) -> Result<CalibrationRun, ValidationError> {
    let points = evaluate_points(&request.points, policy)?;
    let conforms = !points.is_empty() && points.iter().all(|p| p.conformity.conforms);

    info!(
        "Evaluated {} point(s) for '{}' with {} policy: {}",
        points.len(),
        request.instrument,
        policy.kind().display_name(),
        if conforms { "conforms" } else { "does not conform" }
    );

    Ok(CalibrationRun {
        instrument: request.instrument.clone(),
        policy: policy.kind(),
        confidence,
        evaluated_at: Utc::now(),
        points,
        conforms,
    })
}

/// Confidence precedence: explicit config, then request, then built-in default.
pub fn resolve_confidence(config: Option<ConfidenceLevel>, request: &CalibrationRequest) -> ConfidenceLevel {
    config.or(request.confidence).unwrap_or_default()
}

/// Full uncertainty budget of one point: the one with `sequence`, or the first.
///
/// The point goes through the same validation as an evaluated point.
pub fn point_budget<'a>(
    request: &'a CalibrationRequest,
    sequence: Option<u32>,
    confidence: ConfidenceLevel,
) -> Result<(&'a CalibrationPoint, UncertaintyBudget), AppError> {
    let point = match sequence {
        Some(seq) => request.points.iter().find(|p| p.sequence == seq).ok_or_else(|| {
            AppError::new(crate::error::EXIT_INPUT, format!("No calibration point with sequence {seq}."))
        })?,
        None => request
            .points
            .first()
            .ok_or_else(|| AppError::new(crate::error::EXIT_INPUT, "Request contains no calibration points."))?,
    };
    validate_point(point)?;
    let budget = full_uncertainty(&point.readings, &point.sources, confidence)?;
    Ok((point, budget))
}

/// Load the request named by `config`, evaluate it and write requested exports.
pub fn run_evaluation(config: &RunConfig) -> Result<CalibrationRun, AppError> {
    let request = crate::io::read_request(&config.input)?;
    let confidence = resolve_confidence(config.confidence, &request);
    let policy = ConformityPolicy::from_kind(config.policy, confidence);

    if request.points.is_empty() {
        return Err(AppError::new(
            crate::error::EXIT_INPUT,
            format!("Request '{}' contains no calibration points.", config.input.display()),
        ));
    }

    let run = evaluate_run(&request, &policy, confidence)?;
    if let Some(p) = run.points.iter().find(|p| !p.conformity.expanded_uncertainty.is_finite()) {
        return Err(AppError::new(
            crate::error::EXIT_NUMERIC,
            format!("Point {} produced a non-finite expanded uncertainty.", p.sequence),
        ));
    }

    if let Some(path) = &config.export_json {
        crate::io::write_run_json(path, &run)?;
        info!("Wrote JSON export to {}", path.display());
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_results_csv(path, &run)?;
        info!("Wrote CSV export to {}", path.display());
    }

    Ok(run)
}
