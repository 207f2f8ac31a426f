//! Conformity assessment against a maximum permissible error.
//!
//! Guard-band rule: an instrument conforms only if `|error| + U ≤ |tolerance|`.
//! The measurement uncertainty is counted against the instrument.

use crate::domain::ConformityResult;

/// Evaluate `error` and expanded uncertainty `U` against `tolerance`.
///
/// The tolerance may be given signed; only its magnitude is used. A tolerance
/// of exactly zero reports an error ratio of `+inf` rather than failing.
pub fn conformity(error: f64, expanded_uncertainty: f64, tolerance: f64) -> ConformityResult {
    let limit = tolerance.abs();
    let conforms = error.abs() + expanded_uncertainty <= limit;
    ConformityResult {
        error,
        expanded_uncertainty,
        tolerance,
        conforms,
        error_ratio_percent: error_ratio_percent(error, tolerance),
    }
}

/// `|error| / |tolerance| × 100`, or `+inf` for a zero tolerance.
pub fn error_ratio_percent(error: f64, tolerance: f64) -> f64 {
    if tolerance == 0.0 {
        f64::INFINITY
    } else {
        error.abs() / tolerance.abs() * 100.0
    }
}
