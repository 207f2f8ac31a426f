//! Combined standard uncertainty and effective degrees of freedom.
//!
//! `u_c = √(u_a² + u_b²)` and the Welch–Satterthwaite approximation
//!
//! ```text
//! ν_eff = u_c⁴ / ( u_a⁴/ν_a + Σ_i c_i⁴/ν_i )
//! ```
//!
//! where the sum runs over Type B contributions `c_i` with finite, non-zero
//! `ν_i`. Terms with zero uncertainty or zero / infinite dof drop out. The
//! result is floored to an integer (never rounded up): fewer degrees of
//! freedom give a larger coverage factor.

use log::debug;

use crate::domain::{CombinedUncertaintyResult, DegreesOfFreedom, TypeAResult, TypeBResult};
use crate::math::quadrature;

/// Combine Type A and Type B results.
pub fn combine(a: &TypeAResult, b: &TypeBResult) -> CombinedUncertaintyResult {
    let u_a = a.standard_uncertainty;
    let u_b = b.combined;
    let u_c = quadrature([u_a, u_b]);

    let effective_degrees_of_freedom = welch_satterthwaite(u_c, a, b);

    debug!("Combined: u_a={u_a} u_b={u_b} u_c={u_c} nu_eff={effective_degrees_of_freedom}");

    CombinedUncertaintyResult {
        u_a,
        u_b,
        u_c,
        effective_degrees_of_freedom,
    }
}

fn welch_satterthwaite(u_c: f64, a: &TypeAResult, b: &TypeBResult) -> DegreesOfFreedom {
    let u_a = a.standard_uncertainty;
    let term_a = if u_a > 0.0 && a.degrees_of_freedom > 0 {
        u_a.powi(4) / f64::from(a.degrees_of_freedom)
    } else {
        0.0
    };

    let terms_b: f64 = b
        .components
        .iter()
        .filter(|c| c.contribution != 0.0)
        .filter_map(|c| match c.degrees_of_freedom {
            DegreesOfFreedom::Finite(dof) if dof > 0 => Some(c.contribution.powi(4) / f64::from(dof)),
            _ => None,
        })
        .sum();

    let denominator = term_a + terms_b;
    if !(denominator > 0.0 && u_c > 0.0) {
        return DegreesOfFreedom::Infinite;
    }

    let nu = (u_c.powi(4) / denominator).floor();
    if nu.is_finite() && nu < f64::from(u32::MAX) {
        // Casting a finite non-negative value below u32::MAX is exact after floor.
        DegreesOfFreedom::Finite(nu.max(0.0) as u32)
    } else {
        DegreesOfFreedom::Infinite
    }
}
