//! Error types.
//!
//! - `ValidationError` is returned by the engine when caller-supplied data can't
//!   be used for a calculation. No partial result is ever produced alongside it.
//! - `AppError` is the front-end error: a message plus the process exit code.

use thiserror::Error;

/// Exit code for input / IO / configuration problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for calibration data that fails engine validation.
pub const EXIT_VALIDATION: u8 = 3;
/// Exit code for internal numeric failures.
pub const EXIT_NUMERIC: u8 = 4;

/// Invalid calibration data rejected by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("uncertainty source #{index} ('{description}'): value must be finite and >= 0, got {value}")]
    InvalidSourceValue {
        index: usize,
        description: String,
        value: f64,
    },

    #[error("uncertainty source #{index} ('{description}'): divisor must be finite and > 0, got {divisor}")]
    InvalidDivisor {
        index: usize,
        description: String,
        divisor: f64,
    },

    #[error("uncertainty source #{index} ('{description}'): sensitivity coefficient must be finite, got {sensitivity}")]
    InvalidSensitivity {
        index: usize,
        description: String,
        sensitivity: f64,
    },

    #[error("uncertainty source #{index} ('{description}'): finite degrees of freedom must be positive")]
    InvalidDegreesOfFreedom { index: usize, description: String },

    #[error("confidence level must lie strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    #[error("calibration point {sequence}: at least one reading is required")]
    EmptyReadings { sequence: u32 },

    #[error("calibration point {sequence}: readings, reference and tolerance must be finite")]
    NonFiniteInput { sequence: u32 },

    #[error("invalid instrument range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_VALIDATION, format!("Invalid calibration data: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
