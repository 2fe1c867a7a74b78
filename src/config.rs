//! Battle configuration.

use crate::core::constants::*;

/// Knobs for a single battle.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleConfig {
    /// Fixed opponent difficulty (None = rolled)
    pub difficulty: Option<f64>,

    /// Fixed opponent risk tolerance (None = rolled)
    pub risk: Option<f64>,

    /// Player moves the opponent models when looking for threats
    pub moves_to_predict: usize,

    /// Ticks after which the battle is called off (None = run to the end)
    pub max_ticks: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            difficulty: None,
            risk: None,
            moves_to_predict: MOVES_TO_PREDICT,
            max_ticks: None,
        }
    }
}

impl BattleConfig {
    /// Interactive play against a human: no tick cap.
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Unattended runs: capped so a pair of healers cannot stall forever.
    pub fn simulation() -> Self {
        Self {
            max_ticks: Some(SIMULATION_MAX_TICKS),
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.moves_to_predict, 2);
        assert!(config.difficulty.is_none());
        assert!(config.max_ticks.is_none());
    }

    #[test]
    fn test_simulation_preset_is_capped() {
        assert_eq!(
            BattleConfig::simulation().max_ticks,
            Some(SIMULATION_MAX_TICKS)
        );
    }

    #[test]
    fn test_builders() {
        let config = BattleConfig::interactive().with_difficulty(0.3).with_risk(0.6);
        assert_eq!(config.difficulty, Some(0.3));
        assert_eq!(config.risk, Some(0.6));
        assert_eq!(config.with_max_ticks(50).max_ticks, Some(50));
    }
}
