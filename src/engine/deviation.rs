//! Measurement error (deviation of an indication from its reference).

/// `reading − reference`.
pub fn error(reading: f64, reference: f64) -> f64 {
    reading - reference
}
