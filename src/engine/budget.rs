//! Full uncertainty budget: Type A → Type B → combination → k → U in one call.

use log::debug;

use crate::domain::{ConfidenceLevel, ContributionShare, UncertaintyBudget, UncertaintySource};
use crate::error::ValidationError;
use crate::engine::{combine, coverage_factor, expanded, type_a, type_b};

/// Label used for the Type A share in a budget.
pub const TYPE_A_LABEL: &str = "Type A (repeatability)";

/// Run the complete GUM evaluation for a series and its Type B sources.
pub fn full_uncertainty(
    series: &[f64],
    sources: &[UncertaintySource],
    confidence: ConfidenceLevel,
) -> Result<UncertaintyBudget, ValidationError> {
    let type_b = type_b(sources)?;
    let type_a = type_a(series, confidence);
    let combined = combine(&type_a, &type_b);
    let k = coverage_factor(combined.effective_degrees_of_freedom, confidence);
    let expanded_uncertainty = expanded(combined.u_c, k);

    let variance = combined.u_c * combined.u_c;
    let percent = |component: f64| {
        if variance > 0.0 {
            component * component / variance * 100.0
        } else {
            0.0
        }
    };

    let mut shares = Vec::with_capacity(type_b.components.len() + 1);
    shares.push(ContributionShare {
        label: TYPE_A_LABEL.to_string(),
        percent: percent(type_a.standard_uncertainty),
    });
    shares.extend(type_b.components.iter().map(|c| ContributionShare {
        label: c.description.clone(),
        percent: percent(c.contribution),
    }));

    debug!("Budget: u_c={} k={k} U={expanded_uncertainty}", combined.u_c);

    Ok(UncertaintyBudget {
        type_a,
        type_b,
        combined,
        coverage_factor: k,
        expanded_uncertainty,
        confidence,
        shares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DegreesOfFreedom, Distribution};

    fn sources() -> Vec<UncertaintySource> {
        vec![
            UncertaintySource::new("Instrument resolution", 0.01, Distribution::Rectangular),
            UncertaintySource::new("Reference standard", 0.001, Distribution::Normal)
                .with_divisor(2.0)
                .with_degrees_of_freedom(DegreesOfFreedom::Finite(50)),
            UncertaintySource::new("Temperature", 0.002, Distribution::Rectangular),
            UncertaintySource::new("Reference drift", 0.003, Distribution::Triangular),
        ]
    }

    #[test]
    fn expanded_exceeds_combined_and_k_is_positive() {
        let series = [10.02, 10.03, 10.01, 10.02, 10.03];
        let b = full_uncertainty(&series, &sources(), ConfidenceLevel::default()).unwrap();
        assert!(b.coverage_factor > 0.0);
        assert!(b.expanded_uncertainty > b.combined.u_c);
        assert!(matches!(b.combined.effective_degrees_of_freedom, DegreesOfFreedom::Finite(n) if n >= 4));
    }

    #[test]
    fn shares_sum_to_100_percent() {
        let series = [10.02, 10.03, 10.01, 10.02, 10.03];
        let b = full_uncertainty(&series, &sources(), ConfidenceLevel::default()).unwrap();
        assert_eq!(b.shares.len(), 5);
        assert_eq!(b.shares[0].label, TYPE_A_LABEL);
        let total: f64 = b.shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9, "total = {total}");
    }

    #[test]
    fn zero_budget_has_zero_shares() {
        let b = full_uncertainty(&[1.0], &[], ConfidenceLevel::default()).unwrap();
        assert_eq!(b.combined.u_c, 0.0);
        assert_eq!(b.expanded_uncertainty, 0.0);
        assert!(b.shares.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn invalid_source_aborts_the_budget() {
        let bad = vec![UncertaintySource::new("bad", -1.0, Distribution::Normal)];
        assert!(full_uncertainty(&[1.0, 2.0], &bad, ConfidenceLevel::default()).is_err());
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let series = [100.05, 99.95, 100.10, 99.90, 100.00];
        let a = full_uncertainty(&series, &sources(), ConfidenceLevel::default()).unwrap();
        let b = full_uncertainty(&series, &sources(), ConfidenceLevel::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.expanded_uncertainty.to_bits(), b.expanded_uncertainty.to_bits());
    }
}
