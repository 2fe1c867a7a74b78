use super::combatant::Combatant;
use crate::config::BattleConfig;
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub fn from_difficulty(difficulty: f64) -> Self {
        if difficulty < EASY_DIFFICULTY_BELOW {
            DifficultyTier::Easy
        } else if difficulty < MEDIUM_DIFFICULTY_BELOW {
            DifficultyTier::Medium
        } else {
            DifficultyTier::Hard
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }

    pub fn all() -> [DifficultyTier; 3] {
        [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
        ]
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Personality of an AI opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    /// 0.25 (soft) to 0.75 (ruthless).
    pub difficulty: f64,
    /// Largest share of its own health the opponent will lose, or bet on a
    /// roll, before changing course.
    pub risk: f64,
    /// Player moves modelled by the threat lookahead.
    pub moves_to_predict: usize,
}

impl OpponentProfile {
    pub fn new(difficulty: f64, risk: f64) -> Self {
        Self {
            difficulty,
            risk,
            moves_to_predict: MOVES_TO_PREDICT,
        }
    }

    /// Rolls whatever the config leaves open.
    pub fn generate(config: &BattleConfig, rng: &mut impl Rng) -> Self {
        let difficulty = config
            .difficulty
            .unwrap_or_else(|| round_profile(rng.gen_range(DIFFICULTY_MIN..=DIFFICULTY_MAX)));
        let risk = config
            .risk
            .unwrap_or_else(|| round_profile(rng.gen_range(RISK_MIN..=RISK_MAX)));
        Self {
            difficulty,
            risk,
            moves_to_predict: config.moves_to_predict,
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::from_difficulty(self.difficulty)
    }

    /// Health fraction below which a combatant counts as being on low health.
    /// Harder opponents draw the line lower and hold strong attacks back longer.
    pub fn health_threshold(&self) -> f64 {
        0.5 + (0.5 - self.difficulty) / 2.0
    }

    /// Share of a ranked candidate list kept at each narrowing step.
    /// Harder opponents keep fewer, better-fitting candidates.
    pub fn selection_fraction(&self) -> f64 {
        0.5 + (0.5 - self.difficulty) / 1.5
    }

    /// Scales the player's maximum health by difficulty.
    pub fn max_health_for(&self, player_max_health: u32) -> u32 {
        let scaled = player_max_health as f64 * (1.0 + (self.difficulty - 0.5));
        (scaled.round() as u32).max(1)
    }
}

fn round_profile(value: f64) -> f64 {
    let scale = 10f64.powi(PROFILE_DECIMALS);
    (value * scale).round() / scale
}

/// Names an opponent after its tier, e.g. "hard ogre".
pub fn generate_opponent_name(tier: DifficultyTier, rng: &mut impl Rng) -> String {
    let creature = OPPONENT_CREATURES
        .choose(rng)
        .copied()
        .unwrap_or(OPPONENT_CREATURES[0]);
    format!("{} {}", tier, creature)
}

/// An AI-controlled combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct Opponent {
    pub combatant: Combatant,
    pub profile: OpponentProfile,
}

impl Opponent {
    pub fn new(combatant: Combatant, profile: OpponentProfile) -> Self {
        Self {
            combatant,
            profile,
        }
    }

    /// Builds an opponent armed with its own copy of the player's items.
    pub fn mirror(player: &Combatant, config: &BattleConfig, rng: &mut impl Rng) -> Self {
        let profile = OpponentProfile::generate(config, rng);
        let name = generate_opponent_name(profile.tier(), rng);
        let combatant = Combatant::new(
            name,
            profile.max_health_for(player.max_health()),
            player.damaging().to_vec(),
            player.healing().to_vec(),
        );
        tracing::debug!(
            difficulty = profile.difficulty,
            risk = profile.risk,
            "generated opponent {}",
            combatant.name()
        );
        Self::new(combatant, profile)
    }
}
