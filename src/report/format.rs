//! Formatted terminal output.
//!
//! Formatting lives in one place so the engine stays free of presentation
//! concerns. This is a plain-text summary for the command line, not the
//! certificate layout (which belongs to the host application).

use crate::domain::{CalibrationRun, ConfidenceLevel, TypeAResult, UncertaintyBudget};

/// Format a calibration run: header plus one line per point.
pub fn format_run_summary(run: &CalibrationRun) -> String {
    let mut out = String::new();

    out.push_str("=== gum - calibration evaluation ===\n");
    if !run.instrument.is_empty() {
        out.push_str(&format!("Instrument: {}\n", run.instrument));
    }
    out.push_str(&format!("Policy: {}\n", run.policy.display_name()));
    out.push_str(&format!("Confidence: {}\n", run.confidence));
    out.push_str(&format!("Evaluated: {}\n", run.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    out.push('\n');

    out.push_str(&format!(
        "{:>4} {:>14} {:>14} {:>12} {:>12} {:>7} {:>12} {:>10} {:>9}\n",
        "#", "reference", "indicated", "error", "u", "k", "U", "ratio%", "verdict"
    ));
    for p in &run.points {
        let c = &p.conformity;
        out.push_str(&format!(
            "{:>4} {:>14.6} {:>14.6} {:>12.6} {:>12.6} {:>7.3} {:>12.6} {:>10} {:>9}\n",
            p.sequence,
            p.reference,
            p.indicated,
            c.error,
            p.standard_uncertainty,
            p.coverage_factor,
            c.expanded_uncertainty,
            fmt_ratio(c.error_ratio_percent),
            verdict(c.conforms),
        ));
    }

    out.push_str(&format!(
        "\nResult: {} ({} of {} points conform)\n",
        verdict(run.conforms),
        run.points.iter().filter(|p| p.conformity.conforms).count(),
        run.points.len()
    ));
    out
}

/// Format a full uncertainty budget.
pub fn format_budget(budget: &UncertaintyBudget) -> String {
    let mut out = String::new();
    let a = &budget.type_a;

    out.push_str("Type A\n");
    out.push_str(&format_type_a_body(a));

    out.push_str("\nType B\n");
    out.push_str(&format!(
        "  {:<28} {:>12} {:>12} {:>9} {:>8} {:>12} {:>6}\n",
        "source", "value", "dist", "divisor", "c_i", "u_i·c_i", "dof"
    ));
    for c in &budget.type_b.components {
        out.push_str(&format!(
            "  {:<28} {:>12.6} {:>12} {:>9.4} {:>8.3} {:>12.6} {:>6}\n",
            truncate(&c.description, 28),
            c.value,
            c.distribution.label(),
            c.divisor,
            c.sensitivity_coefficient,
            c.contribution,
            c.degrees_of_freedom,
        ));
    }
    out.push_str(&format!("  combined u_B = {:.6}\n", budget.type_b.combined));

    out.push_str("\nContributions to u_c²\n");
    for s in &budget.shares {
        out.push_str(&format!("  {:<28} {:>7.2}%\n", truncate(&s.label, 28), s.percent));
    }

    let c = &budget.combined;
    out.push_str(&format!(
        "\nu_c = {:.6}   nu_eff = {}   k = {:.4} ({})   U = {:.6}\n",
        c.u_c, c.effective_degrees_of_freedom, budget.coverage_factor, budget.confidence, budget.expanded_uncertainty
    ));
    out
}

/// Format a standalone Type A evaluation (used by `simulate`).
pub fn format_type_a(readings: &[f64], result: &TypeAResult, confidence: ConfidenceLevel) -> String {
    let mut out = String::new();
    let parts: Vec<String> = readings.iter().map(|v| format!("{v:.6}")).collect();
    out.push_str(&format!("Readings (n={}): [{}]\n", readings.len(), parts.join(", ")));
    out.push_str(&format!("Confidence: {confidence}\n"));
    out.push_str(&format_type_a_body(result));
    out
}

fn format_type_a_body(a: &TypeAResult) -> String {
    format!(
        "  mean = {:.6}   s = {:.6}   s/√n = {:.6}   dof = {}   t = {:.4}\n",
        a.mean, a.sample_stdev, a.stdev_of_mean, a.degrees_of_freedom, a.t_factor
    )
}

fn verdict(conforms: bool) -> &'static str {
    if conforms { "PASS" } else { "FAIL" }
}

fn fmt_ratio(ratio: f64) -> String {
    if ratio.is_infinite() {
        "inf".to_string()
    } else {
        format!("{ratio:.1}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
