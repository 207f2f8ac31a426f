//! Descriptive statistics for short measurement series.
//!
//! Series in calibration work are small (typically 3–30 readings), so we use a
//! plain two-pass algorithm: mean first, then the sum of squared deviations
//! about that mean. This avoids the cancellation of the one-pass
//! `Σx² − n·x̄²` form, which matters here because readings share many leading
//! digits (e.g. `100.02, 100.03, ...`).

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample standard deviation (`n − 1` denominator).
///
/// Returns `0.0` when fewer than two values are supplied.
pub fn sample_stdev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    sqrt_clamped(ss / (n as f64 - 1.0))
}

/// Square root with negative radicands (floating-point noise) clamped to zero.
///
/// NaN is not clamped: it propagates so bad input never reads as zero
/// uncertainty.
pub fn sqrt_clamped(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x.sqrt() }
}

/// Quadrature (root-sum-of-squares) of the given components.
pub fn quadrature<I>(components: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    sqrt_clamped(components.into_iter().map(|c| c * c).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_stdev_of_known_series() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        // Population stdev is 2.0; sample stdev is sqrt(32/7).
        assert!((sample_stdev(&v) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn short_series_have_zero_dispersion() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_stdev(&[]), 0.0);
        assert_eq!(sample_stdev(&[100.0]), 0.0);
    }

    #[test]
    fn constant_series_is_exactly_zero() {
        let v = [100.02; 6];
        assert_eq!(sample_stdev(&v), 0.0);
    }

    #[test]
    fn negative_radicand_clamps() {
        assert_eq!(sqrt_clamped(-1e-18), 0.0);
        assert_eq!(sqrt_clamped(4.0), 2.0);
    }

    #[test]
    fn nan_radicand_propagates() {
        assert!(sqrt_clamped(f64::NAN).is_nan());
        assert!(sample_stdev(&[1.0, 2.0, f64::INFINITY]).is_nan());
    }

    #[test]
    fn quadrature_sum() {
        assert!((quadrature([3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(quadrature(std::iter::empty()), 0.0);
    }
}
