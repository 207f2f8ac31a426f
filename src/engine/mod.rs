//! The GUM uncertainty engine.
//!
//! Pipeline (left to right, each stage a pure function of its inputs):
//!
//! - `error`: indication minus reference
//! - `type_a`: repeatability from a series of readings
//! - `type_b`: declared sources summed in quadrature
//! - `combine`: `u_c` plus Welch–Satterthwaite effective dof
//! - `coverage_factor`: `k` from effective dof and confidence
//! - `expanded`: `U = k · u_c`
//! - `conformity`: guard-banded verdict against a tolerance
//!
//! `full_uncertainty` chains the middle stages; `evaluate_point` applies a
//! caller-selected `ConformityPolicy` to one calibration point.

pub mod budget;
pub mod combine;
pub mod conformity;
pub mod coverage;
pub mod deviation;
pub mod policy;
pub mod type_a;
pub mod type_b;

pub use budget::*;
pub use combine::*;
pub use conformity::*;
pub use coverage::*;
pub use deviation::*;
pub use policy::*;
pub use type_a::*;
pub use type_b::*;
