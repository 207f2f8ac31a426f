//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - input types (`UncertaintySource`, `CalibrationPoint`, `CalibrationRequest`)
//! - small closed enumerations (`Distribution`, `DegreesOfFreedom`, `PolicyKind`)
//! - result types for each pipeline stage
//! - the run configuration (`RunConfig`)

pub mod types;

pub use types::*;
