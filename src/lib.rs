//! `gum-engine` library crate.
//!
//! Measurement uncertainty evaluation for calibration data following the GUM
//! (Guide to the Expression of Uncertainty in Measurement).
//!
//! The binary (`gum`) is a thin wrapper around this library so that:
//!
//! - the engine is testable without spawning processes
//! - a host application can call [`engine`] and [`app::pipeline`] directly

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
