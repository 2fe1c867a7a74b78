//! Simulation configuration.

use crate::config::BattleConfig;
use crate::core::constants::SIMULATION_MAX_TICKS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to fight
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Ticks per battle before it is called off as stalled
    pub max_ticks_per_battle: u64,

    /// Max health of the simulated player
    pub player_max_health: u32,

    /// Fixed opponent difficulty (None = rolled per battle)
    pub difficulty: Option<f64>,

    /// Fixed opponent risk tolerance (None = rolled per battle)
    pub risk: Option<f64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = every battle)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_ticks_per_battle: SIMULATION_MAX_TICKS,
            player_max_health: 100,
            difficulty: None,
            risk: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for smoke-testing the opponent engine
    pub fn quick(num_runs: u32) -> Self {
        Self {
            num_runs,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Every battle against the same opponent personality
    pub fn fixed_opponent(difficulty: f64, risk: f64) -> Self {
        Self {
            num_runs: 200,
            difficulty: Some(difficulty),
            risk: Some(risk),
            ..Default::default()
        }
    }

    /// Battle settings for each simulated fight.
    pub fn battle_config(&self) -> BattleConfig {
        BattleConfig {
            difficulty: self.difficulty,
            risk: self.risk,
            max_ticks: Some(self.max_ticks_per_battle),
            ..BattleConfig::simulation()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_config_carries_overrides() {
        let config = SimConfig {
            max_ticks_per_battle: 500,
            ..SimConfig::fixed_opponent(0.6, 0.4)
        };
        let battle = config.battle_config();
        assert_eq!(battle.difficulty, Some(0.6));
        assert_eq!(battle.risk, Some(0.4));
        assert_eq!(battle.max_ticks, Some(500));
    }

    #[test]
    fn test_default_rolls_opponents() {
        let battle = SimConfig::default().battle_config();
        assert!(battle.difficulty.is_none());
        assert_eq!(battle.max_ticks, Some(SIMULATION_MAX_TICKS));
    }
}
