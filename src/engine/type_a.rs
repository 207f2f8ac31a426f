//! Type A evaluation: standard uncertainty from repeated readings.
//!
//! The standard uncertainty is the experimental standard deviation of the
//! mean, `s / √n`, with `n − 1` degrees of freedom. The Student-t factor for
//! the requested confidence is reported alongside but not applied; the
//! coverage factor used for the expanded uncertainty is chosen later from the
//! effective degrees of freedom of the whole budget.

use log::{debug, warn};

use crate::domain::{ConfidenceLevel, TypeAResult};
use crate::math::{mean, sample_stdev, student_t_quantile};

/// Evaluate a measurement series.
///
/// Fewer than two readings cannot estimate dispersion and yield the
/// degenerate result (all fields zero, including the mean).
pub fn type_a(series: &[f64], confidence: ConfidenceLevel) -> TypeAResult {
    let n = series.len();
    if n < 2 {
        warn!("Type A: {n} reading(s), no dispersion estimate; contributing zero uncertainty");
        return TypeAResult::degenerate();
    }

    let m = mean(series);
    let s = sample_stdev(series);
    let stdev_of_mean = s / (n as f64).sqrt();
    let dof = u32::try_from(n - 1).unwrap_or(u32::MAX);
    let t_factor = student_t_quantile(confidence.two_tailed_probability(), dof);

    debug!("Type A: n={n} mean={m} s={s} s_mean={stdev_of_mean} dof={dof} t={t_factor}");

    TypeAResult {
        mean: m,
        sample_stdev: s,
        stdev_of_mean,
        degrees_of_freedom: dof,
        t_factor,
        standard_uncertainty: stdev_of_mean,
    }
}
