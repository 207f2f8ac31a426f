//! Coverage factor and expanded uncertainty.

use log::debug;

use crate::domain::{ConfidenceLevel, DegreesOfFreedom};
use crate::math::{normal_quantile, student_t_quantile};

/// Conventional coverage factor used when no degrees-of-freedom information is
/// available. An approximation of the 95% normal quantile, not a derived value.
pub const CONVENTIONAL_K: f64 = 2.0;

/// Coverage factor `k` for the given effective degrees of freedom.
///
/// - infinite dof: standard-normal quantile at `(1 + c) / 2`
/// - finite dof: Student-t quantile at `(1 + c) / 2` (dof 0 is treated as 1)
pub fn coverage_factor(effective_dof: DegreesOfFreedom, confidence: ConfidenceLevel) -> f64 {
    let p = confidence.two_tailed_probability();
    let k = match effective_dof {
        DegreesOfFreedom::Infinite => normal_quantile(p),
        DegreesOfFreedom::Finite(dof) => student_t_quantile(p, dof),
    };
    debug!("Coverage factor: nu_eff={effective_dof} c={} k={k}", confidence.value());
    k
}

/// `U = u_c × k`.
pub fn expanded(combined_uncertainty: f64, k: f64) -> f64 {
    combined_uncertainty * k
}

/// Pick a coverage factor from what the caller knows.
///
/// An explicit `k` wins; otherwise `k` is derived from the effective degrees of
/// freedom; with neither, [`CONVENTIONAL_K`] is used.
pub fn resolve_coverage_factor(
    k: Option<f64>,
    effective_dof: Option<DegreesOfFreedom>,
    confidence: ConfidenceLevel,
) -> f64 {
    match (k, effective_dof) {
        (Some(k), _) => k,
        (None, Some(dof)) => coverage_factor(dof, confidence),
        (None, None) => CONVENTIONAL_K,
    }
}
