//! Type B evaluation: uncertainty from declared, non-statistical sources.
//!
//! Each source is converted to a standard uncertainty (`value / divisor`),
//! scaled by its sensitivity coefficient, and the contributions are summed in
//! quadrature. Degrees of freedom are carried through untouched for the
//! Welch–Satterthwaite step.

use log::debug;

use crate::domain::{DegreesOfFreedom, TypeBComponent, TypeBResult, UncertaintySource};
use crate::error::ValidationError;
use crate::math::quadrature;

/// Aggregate Type B sources.
///
/// All sources are validated before any arithmetic; the first invalid source
/// aborts the whole evaluation.
pub fn type_b(sources: &[UncertaintySource]) -> Result<TypeBResult, ValidationError> {
    for (idx, src) in sources.iter().enumerate() {
        validate_source(idx + 1, src)?;
    }

    let components: Vec<TypeBComponent> = sources
        .iter()
        .enumerate()
        .map(|(idx, src)| resolve(idx + 1, src))
        .collect();

    let combined = quadrature(components.iter().map(|c| c.contribution));

    debug!("Type B: {} source(s), combined={combined}", components.len());

    Ok(TypeBResult {
        components,
        combined,
    })
}

fn validate_source(index: usize, src: &UncertaintySource) -> Result<(), ValidationError> {
    if !(src.value.is_finite() && src.value >= 0.0) {
        return Err(ValidationError::InvalidSourceValue {
            index,
            description: src.description.clone(),
            value: src.value,
        });
    }
    if let Some(divisor) = src.divisor {
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(ValidationError::InvalidDivisor {
                index,
                description: src.description.clone(),
                divisor,
            });
        }
    }
    if src.degrees_of_freedom == DegreesOfFreedom::Finite(0) {
        return Err(ValidationError::InvalidDegreesOfFreedom {
            index,
            description: src.description.clone(),
        });
    }
    if !src.sensitivity_coefficient.is_finite() {
        return Err(ValidationError::InvalidSensitivity {
            index,
            description: src.description.clone(),
            sensitivity: src.sensitivity_coefficient,
        });
    }
    Ok(())
}

fn resolve(index: usize, src: &UncertaintySource) -> TypeBComponent {
    let divisor = src.effective_divisor();
    let standard_uncertainty = src.value / divisor;
    let contribution = standard_uncertainty * src.sensitivity_coefficient;

    let description = if src.description.trim().is_empty() {
        format!("Source {index}")
    } else {
        src.description.clone()
    };

    TypeBComponent {
        description,
        value: src.value,
        distribution: src.distribution,
        divisor,
        sensitivity_coefficient: src.sensitivity_coefficient,
        standard_uncertainty,
        contribution,
        contribution_squared: contribution * contribution,
        degrees_of_freedom: src.degrees_of_freedom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Distribution;

    #[test]
    fn rectangular_plus_normal_with_divisor() {
        let sources = vec![
            UncertaintySource::new("Resolution", 0.01, Distribution::Rectangular),
            UncertaintySource::new("Reference certificate", 0.005, Distribution::Normal).with_divisor(2.0),
        ];
        let r = type_b(&sources).unwrap();
        let expected = ((0.01 / 3.0_f64.sqrt()).powi(2) + (0.005_f64 / 2.0).powi(2)).sqrt();
        assert!((r.combined - expected).abs() < 1e-12);
        assert!((r.combined - 0.00629).abs() < 0.0001, "got {}", r.combined);
        assert_eq!(r.components.len(), 2);
        assert!((r.components[1].standard_uncertainty - 0.0025).abs() < 1e-15);
    }

    #[test]
    fn sensitivity_scales_contribution() {
        let sources = vec![
            UncertaintySource::new("Thermal expansion", 0.02, Distribution::Normal).with_sensitivity(-0.5),
        ];
        let r = type_b(&sources).unwrap();
        let c = &r.components[0];
        assert!((c.contribution + 0.01).abs() < 1e-15);
        assert!((c.contribution_squared - 1e-4).abs() < 1e-15);
        assert!((r.combined - 0.01).abs() < 1e-15);
    }

    #[test]
    fn triangular_uses_sqrt6() {
        let r = type_b(&[UncertaintySource::new("t", 6.0_f64.sqrt(), Distribution::Triangular)]).unwrap();
        assert!((r.combined - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_sources_combine_to_zero() {
        let r = type_b(&[]).unwrap();
        assert_eq!(r.combined, 0.0);
        assert!(r.components.is_empty());
    }

    #[test]
    fn negative_value_is_rejected() {
        let sources = vec![
            UncertaintySource::new("ok", 0.01, Distribution::Normal),
            UncertaintySource::new("bad", -0.01, Distribution::Normal),
        ];
        let err = type_b(&sources).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSourceValue { index: 2, .. }), "{err:?}");
    }

    #[test]
    fn non_positive_divisor_is_rejected() {
        for divisor in [0.0, -2.0, f64::NAN] {
            let sources = vec![UncertaintySource::new("d", 0.01, Distribution::Normal).with_divisor(divisor)];
            let err = type_b(&sources).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidDivisor { index: 1, .. }), "{err:?}");
        }
    }

    #[test]
    fn zero_finite_dof_is_rejected() {
        let sources = vec![
            UncertaintySource::new("cert", 0.005, Distribution::Normal)
                .with_degrees_of_freedom(DegreesOfFreedom::Finite(50)),
            UncertaintySource::new("drift", 1.0, Distribution::Normal)
                .with_degrees_of_freedom(DegreesOfFreedom::Finite(0)),
        ];
        let err = type_b(&sources).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDegreesOfFreedom { index: 2, .. }), "{err:?}");
    }

    #[test]
    fn unnamed_sources_get_positional_labels() {
        let r = type_b(&[
            UncertaintySource::new("", 0.01, Distribution::Normal),
            UncertaintySource::new("Drift", 0.01, Distribution::Normal),
        ])
        .unwrap();
        assert_eq!(r.components[0].description, "Source 1");
        assert_eq!(r.components[1].description, "Drift");
    }

    #[test]
    fn dof_is_carried_through() {
        let r = type_b(&[UncertaintySource::new("cert", 0.005, Distribution::Normal)
            .with_divisor(2.0)
            .with_degrees_of_freedom(DegreesOfFreedom::Finite(50))])
        .unwrap();
        assert_eq!(r.components[0].degrees_of_freedom, DegreesOfFreedom::Finite(50));
    }
}
