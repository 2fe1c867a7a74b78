//! Item system: roll ranges, items and pool statistics.

pub mod pool;
pub mod types;

pub use types::*;
