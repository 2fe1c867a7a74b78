//! Skirmish - Turn-Based Item Battle Library
//!
//! This module exposes the battle engine for testing and external use:
//! combatants and their item pools, the AI opponent's decision cascade,
//! player control, and the tick-driven battle loop.

pub mod build_info;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod items;
pub mod loadout;
pub mod simulator;
pub mod utils;
