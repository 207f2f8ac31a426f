//! Synthetic reading series and suggested calibration points.
//!
//! Synthetic series are used by the `simulate` command and by tests that need
//! realistic repeated readings without a bench: each reading is
//! `reference + bias + N(0, noise)`, optionally quantized to the instrument
//! resolution. Generation is deterministic for a given seed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::{AppError, EXIT_INPUT, ValidationError};

/// Fractions of the instrument range at which calibration points are suggested.
pub const SUGGESTED_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Parameters of a synthetic reading series.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub reference: f64,
    pub count: usize,
    /// Systematic offset of the simulated instrument.
    pub bias: f64,
    /// Standard deviation of the repeatability noise.
    pub noise: f64,
    /// Display resolution; readings are rounded to a multiple of it when set.
    pub resolution: Option<f64>,
    pub seed: u64,
}

/// Generate a reproducible series of readings.
pub fn simulate_readings(config: &SimulationConfig) -> Result<Vec<f64>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(EXIT_INPUT, "Reading count must be > 0."));
    }
    if !(config.reference.is_finite() && config.bias.is_finite()) {
        return Err(AppError::new(EXIT_INPUT, "Reference and bias must be finite."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Noise must be finite and >= 0."));
    }
    if let Some(res) = config.resolution {
        if !(res.is_finite() && res > 0.0) {
            return Err(AppError::new(EXIT_INPUT, "Resolution must be finite and > 0."));
        }
    }

    let mut rng = StdRng::seed_from_u64(series_seed(config));
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Noise distribution error: {e}")))?;

    let readings = (0..config.count)
        .map(|_| {
            let raw = config.reference + config.bias + normal.sample(&mut rng);
            match config.resolution {
                Some(res) => (raw / res).round() * res,
                None => raw,
            }
        })
        .collect();

    Ok(readings)
}

/// Nominal calibration points at 0/25/50/75/100% of `[min, max]`.
pub fn suggested_points(min: f64, max: f64) -> Result<Vec<f64>, ValidationError> {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Err(ValidationError::InvalidRange { min, max });
    }
    Ok(SUGGESTED_FRACTIONS
        .iter()
        .map(|f| min + (max - min) * f)
        .collect())
}

fn series_seed(config: &SimulationConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.seed.hash(&mut hasher);
    config.reference.to_bits().hash(&mut hasher);
    config.count.hash(&mut hasher);
    hasher.finish()
}
