//! Export evaluated calibrations.
//!
//! - CSV: one row per calibration point, easy to consume in spreadsheets or by
//!   the certificate renderer.
//! - JSON: the full `CalibrationRun`, including per-point budgets.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::CalibrationRun;
use crate::error::{AppError, EXIT_INPUT};

const CSV_HEADER: &str = "sequence,reference,indicated,error,policy,standard_uncertainty,coverage_factor,expanded_uncertainty,tolerance,error_ratio_percent,conforms";

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, run: &CalibrationRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, run).map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV: {e}")))
}

fn write_csv<W: Write>(out: &mut W, run: &CalibrationRun) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for p in &run.points {
        let c = &p.conformity;
        writeln!(
            out,
            "{},{},{:.10},{:.10},{:?},{:.10},{:.6},{:.10},{},{},{}",
            p.sequence,
            p.reference,
            p.indicated,
            c.error,
            p.policy,
            p.standard_uncertainty,
            p.coverage_factor,
            c.expanded_uncertainty,
            c.tolerance,
            fmt_ratio(c.error_ratio_percent),
            c.conforms,
        )?;
    }
    Ok(())
}

/// Write the full run (points + budgets) as pretty JSON.
///
/// JSON has no representation for infinity: a zero-tolerance error ratio is
/// written as `null`.
pub fn write_run_json(path: &Path, run: &CalibrationRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, run)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export JSON: {e}")))
}

fn fmt_ratio(ratio: f64) -> String {
    if ratio.is_infinite() {
        "inf".to_string()
    } else {
        format!("{ratio:.4}")
    }
}
