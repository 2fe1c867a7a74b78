//! Battle simulator for Monte Carlo analysis of the opponent engine.
//!
//! Fights thousands of seeded battles between the AI opponent and an
//! autopilot player to analyze:
//! - Player win rate overall and per difficulty tier
//! - Battle length in ticks and moves
//! - How often each stage of the opponent's decision cascade fires
//!
//! Battles run through the same `Battle` loop as interactive play, so the
//! numbers reflect real behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRecord, SimReport, TierStats};
pub use runner::{run_simulation, AutopilotController};
