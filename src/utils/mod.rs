//! Utility modules: file persistence and logging setup.

pub mod logging;
pub mod persistence;
