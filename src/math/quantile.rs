//! Two-sided quantiles of the standard normal and Student-t distributions.
//!
//! Both functions take the cumulative probability of the upper bound of a
//! symmetric interval, i.e. `(1 + c) / 2` for a confidence level `c`.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Standard-normal quantile at cumulative probability `p`.
///
/// Returns `NaN` for `p` outside `(0, 1)`.
pub fn normal_quantile(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    Normal::new(0.0, 1.0)
        .map(|n| n.inverse_cdf(p))
        .unwrap_or(f64::NAN)
}

/// Student-t quantile at cumulative probability `p` with `dof` degrees of freedom.
///
/// `dof == 0` has no t distribution; it is treated as 1 (the widest interval).
/// Returns `NaN` for `p` outside `(0, 1)`.
pub fn student_t_quantile(p: f64, dof: u32) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    let freedom = f64::from(dof.max(1));
    StudentsT::new(0.0, 1.0, freedom)
        .map(|t| t.inverse_cdf(p))
        .unwrap_or(f64::NAN)
}
