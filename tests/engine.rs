//! End-to-end checks through the public library API.

use std::io::Write;

use gum_engine::app::pipeline::{evaluate_run, run_evaluation};
use gum_engine::domain::{
    ConfidenceLevel, DegreesOfFreedom, Distribution, PolicyKind, RunConfig, UncertaintySource,
};
use gum_engine::engine::{
    ConformityPolicy, combine, conformity, coverage_factor, error, expanded, full_uncertainty, type_a, type_b,
};
use gum_engine::error::EXIT_INPUT;
use gum_engine::io::parse_request;

const REQUEST: &str = r#"{
  "instrument": "Digital thermometer",
  "confidence": 0.95,
  "points": [
    {
      "sequence": 1,
      "reference": 100.0,
      "readings": [100.02, 100.03, 100.01, 100.02, 100.02],
      "tolerance": 0.1,
      "sources": [
        { "description": "Resolution", "value": 0.01, "distribution": "rectangular" },
        { "description": "Reference certificate", "value": 0.005, "distribution": "normal",
          "divisor": 2.0, "degrees_of_freedom": { "finite": 50 } }
      ]
    },
    {
      "sequence": 2,
      "reference": 200.0,
      "readings": [200.05, 199.95, 200.10, 199.90, 200.00],
      "tolerance": 0.05,
      "sources": []
    }
  ]
}"#;

#[test]
fn deviation_sign_convention() {
    assert!((error(100.05, 100.00) - 0.05).abs() < 1e-12);
    assert!((error(99.95, 100.00) + 0.05).abs() < 1e-12);
    assert_eq!(error(100.0, 100.0), 0.0);
}

#[test]
fn combined_dominates_its_components_and_expanded_dominates_combined() {
    let c = ConfidenceLevel::default();
    let a = type_a(&[100.05, 99.95, 100.10, 99.90, 100.00], c);
    let b = type_b(&[
        UncertaintySource::new("Resolution", 0.01, Distribution::Rectangular),
        UncertaintySource::new("Reference certificate", 0.005, Distribution::Normal).with_divisor(2.0),
    ])
    .unwrap();
    let combined = combine(&a, &b);
    assert!(combined.u_c >= combined.u_a);
    assert!(combined.u_c >= combined.u_b);

    let k = coverage_factor(combined.effective_degrees_of_freedom, c);
    assert!(k >= 1.0);
    assert!(expanded(combined.u_c, k) >= combined.u_c);
}

#[test]
fn coverage_factor_reference_values() {
    let c = ConfidenceLevel::default();
    assert!((coverage_factor(DegreesOfFreedom::Infinite, c) - 1.96).abs() < 1e-3);
    assert!((coverage_factor(DegreesOfFreedom::Finite(4), c) - 2.776).abs() < 1e-3);
}

#[test]
fn zero_tolerance_is_a_sentinel_not_an_error() {
    let r = conformity(0.01, 0.02, 0.0);
    assert!(r.error_ratio_percent.is_infinite());
    assert!(!r.conforms);
}

#[test]
fn request_evaluates_under_both_policies() {
    let request = parse_request(REQUEST.as_bytes()).unwrap();
    let confidence = request.confidence.unwrap_or_default();

    let gum = evaluate_run(&request, &ConformityPolicy::FullGum { confidence }, confidence).unwrap();
    assert_eq!(gum.policy, PolicyKind::Full);
    assert!(gum.points[0].conformity.conforms, "{:#?}", gum.points[0]);
    assert!(gum.points[0].budget.is_some());
    // Point 2 has no bias but its scatter gives U ≈ 0.098, beyond the 0.05 tolerance.
    assert!(!gum.points[1].conformity.conforms);
    assert!(!gum.conforms);

    let quick = evaluate_run(&request, &ConformityPolicy::QuickScreening, confidence).unwrap();
    assert_eq!(quick.policy, PolicyKind::Quick);
    assert!(quick.points.iter().all(|p| p.budget.is_none() && p.coverage_factor == 2.0));
}

#[test]
fn budget_matches_staged_computation() {
    let request = parse_request(REQUEST.as_bytes()).unwrap();
    let point = &request.points[0];
    let c = ConfidenceLevel::default();

    let budget = full_uncertainty(&point.readings, &point.sources, c).unwrap();
    let a = type_a(&point.readings, c);
    let b = type_b(&point.sources).unwrap();
    let combined = combine(&a, &b);
    let k = coverage_factor(combined.effective_degrees_of_freedom, c);

    assert_eq!(budget.combined, combined);
    assert_eq!(budget.coverage_factor, k);
    assert_eq!(budget.expanded_uncertainty, expanded(combined.u_c, k));
}

#[test]
fn run_evaluation_reads_file_and_writes_exports() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::File::create(&input)
        .unwrap()
        .write_all(REQUEST.as_bytes())
        .unwrap();

    let config = RunConfig {
        input,
        policy: PolicyKind::Full,
        confidence: Some(ConfidenceLevel::new(0.99).unwrap()),
        export_json: Some(dir.path().join("run.json")),
        export_csv: Some(dir.path().join("run.csv")),
    };
    let run = run_evaluation(&config).unwrap();
    assert_eq!(run.confidence.value(), 0.99);
    assert_eq!(run.instrument, "Digital thermometer");

    let csv = std::fs::read_to_string(dir.path().join("run.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("run.json")).unwrap()).unwrap();
    assert_eq!(json["points"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_request_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        input: dir.path().join("missing.json"),
        policy: PolicyKind::Quick,
        confidence: None,
        export_json: None,
        export_csv: None,
    };
    let err = run_evaluation(&config).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INPUT);
}
