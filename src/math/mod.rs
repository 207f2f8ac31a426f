//! Mathematical utilities: descriptive statistics and distribution quantiles.

pub mod quantile;
pub mod stats;

pub use quantile::*;
pub use stats::*;
