//! Read calibration requests (JSON).
//!
//! A request is what the host application hands over for one calibration:
//! instrument label, optional confidence level, and the calibration points
//! with their readings, tolerance and Type B sources. The schema is defined by
//! `domain::CalibrationRequest`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::CalibrationRequest;
use crate::error::{AppError, EXIT_INPUT};

/// Read a calibration request from a JSON file.
pub fn read_request(path: &Path) -> Result<CalibrationRequest, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open request JSON '{}': {e}", path.display())))?;
    parse_request(BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid request JSON '{}': {e}", path.display())))
}

/// Parse a calibration request from any reader.
pub fn parse_request<R: std::io::Read>(reader: R) -> Result<CalibrationRequest, serde_json::Error> {
    serde_json::from_reader(reader)
}
