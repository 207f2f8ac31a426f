//! Input/output helpers.
//!
//! - calibration request JSON (`request`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod request;

pub use export::*;
pub use request::*;
