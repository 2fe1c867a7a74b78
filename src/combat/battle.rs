//! Battle orchestration.
//!
//! A [`Battle`] pairs the player with a mirrored AI opponent and advances
//! them tick by tick. Each tick the player acts if off cooldown, then the
//! opponent acts if off cooldown and still standing, then both cooldowns
//! recover by one. Everything worth showing goes to a [`Narrator`].

use super::combatant::{ActionOutcome, Combatant, InventoryDelta};
use super::decision::{Decision, DecisionReason};
use super::opponent::Opponent;
use super::player::{PlayerController, PlayerProfile};
use crate::config::BattleConfig;
use crate::error::Result;
use crate::items::{Item, ItemDefinition};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Output sink for battle narration.
pub trait Narrator {
    fn narrate(&mut self, line: &str);
}

impl Narrator for Vec<String> {
    fn narrate(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Prints narration to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn narrate(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Discards narration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn narrate(&mut self, _line: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    PlayerWon,
    OpponentWon,
    /// Tick cap reached with both sides standing.
    Stalled,
}

/// How often each stage of the opponent's decision cascade fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTally {
    pub lethal: u32,
    pub survive: u32,
    pub attack: u32,
    pub heal: u32,
}

impl DecisionTally {
    pub fn record(&mut self, reason: DecisionReason) {
        match reason {
            DecisionReason::Lethal { .. } => self.lethal += 1,
            DecisionReason::Survive { .. } => self.survive += 1,
            DecisionReason::Attack => self.attack += 1,
            DecisionReason::Heal => self.heal += 1,
        }
    }

    pub fn merge(&mut self, other: &DecisionTally) {
        self.lethal += other.lethal;
        self.survive += other.survive;
        self.attack += other.attack;
        self.heal += other.heal;
    }

    pub fn total(&self) -> u32 {
        self.lethal + self.survive + self.attack + self.heal
    }
}

/// Final state of a battle, including what the player's inventory lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub result: BattleResult,
    pub ticks: u64,
    pub player_moves: u32,
    pub opponent_moves: u32,
    pub player_health: u32,
    pub opponent_health: u32,
    pub opponent_name: String,
    pub difficulty: f64,
    pub risk: f64,
    pub deltas: Vec<InventoryDelta>,
    pub decisions: DecisionTally,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub player_action: Option<ActionOutcome>,
    pub opponent_action: Option<(Decision, ActionOutcome)>,
}

#[derive(Debug, Clone)]
pub struct Battle {
    pub player_id: u32,
    pub player: Combatant,
    pub opponent: Opponent,
    pub config: BattleConfig,
    ticks: u64,
    decisions: DecisionTally,
}

impl Battle {
    /// Sets up a battle for `profile` carrying the given items. The opponent
    /// is generated from `config` and gets its own copy of those items.
    pub fn new(
        profile: &PlayerProfile,
        damaging: &[ItemDefinition],
        healing: &[ItemDefinition],
        config: BattleConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let player = Combatant::new(
            profile.name.clone(),
            profile.max_health,
            damaging.iter().map(Item::from).collect(),
            healing.iter().map(Item::from).collect(),
        );
        let opponent = Opponent::mirror(&player, &config, rng);
        Self::from_combatants(profile.id, player, opponent, config)
    }

    pub fn from_combatants(
        player_id: u32,
        player: Combatant,
        opponent: Opponent,
        config: BattleConfig,
    ) -> Self {
        Self {
            player_id,
            player,
            opponent,
            config,
            ticks: 0,
            decisions: DecisionTally::default(),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn decisions(&self) -> &DecisionTally {
        &self.decisions
    }

    pub fn is_over(&self) -> bool {
        !self.player.is_alive() || !self.opponent.combatant.is_alive()
    }

    fn tick_cap_reached(&self) -> bool {
        self.config
            .max_ticks
            .is_some_and(|limit| self.ticks >= limit)
    }

    /// Advances the battle by one tick.
    pub fn tick<C: PlayerController, N: Narrator>(
        &mut self,
        controller: &mut C,
        narrator: &mut N,
        rng: &mut impl Rng,
    ) -> Result<TickResult> {
        let mut result = TickResult::default();

        if !self.player.on_cooldown() {
            narrator.narrate(&self.player.status_board());
            narrator.narrate(&self.opponent.combatant.status_board());
            let slot = controller.choose_move(&self.player, &self.opponent.combatant, narrator)?;
            let outcome = self
                .player
                .use_item(slot, &mut self.opponent.combatant, rng)?;
            tracing::info!(tick = self.ticks, "{}", outcome.narration());
            narrator.narrate(&outcome.narration());
            result.player_action = Some(outcome);
        }

        if !self.opponent.combatant.on_cooldown() && self.opponent.combatant.is_alive() {
            let decision = self.opponent.decide_move(&self.player, rng)?;
            self.decisions.record(decision.reason);
            let outcome = self
                .opponent
                .combatant
                .use_item(decision.slot, &mut self.player, rng)?;
            tracing::info!(
                tick = self.ticks,
                reason = %decision.reason,
                "{}",
                outcome.narration()
            );
            narrator.narrate(&outcome.narration());
            result.opponent_action = Some((decision, outcome));
        }

        self.player.decay_cooldown();
        self.opponent.combatant.decay_cooldown();
        self.ticks += 1;
        Ok(result)
    }

    /// Runs the battle to its end and narrates the summary.
    pub fn run<C: PlayerController, N: Narrator>(
        &mut self,
        controller: &mut C,
        narrator: &mut N,
        rng: &mut impl Rng,
    ) -> Result<BattleReport> {
        narrator.narrate("Beginning Combat!");
        tracing::info!(
            opponent = self.opponent.combatant.name(),
            difficulty = self.opponent.profile.difficulty,
            risk = self.opponent.profile.risk,
            "battle started"
        );

        while !self.is_over() {
            if self.tick_cap_reached() {
                tracing::warn!(ticks = self.ticks, "battle stalled, calling it off");
                break;
            }
            self.tick(controller, narrator, rng)?;
        }

        let report = self.report();
        tracing::info!(result = ?report.result, ticks = report.ticks, "battle finished");
        self.narrate_summary(&report, narrator);
        Ok(report)
    }

    pub fn result(&self) -> BattleResult {
        if !self.opponent.combatant.is_alive() {
            BattleResult::PlayerWon
        } else if !self.player.is_alive() {
            BattleResult::OpponentWon
        } else {
            BattleResult::Stalled
        }
    }

    pub fn report(&self) -> BattleReport {
        BattleReport {
            result: self.result(),
            ticks: self.ticks,
            player_moves: self.player.move_count(),
            opponent_moves: self.opponent.combatant.move_count(),
            player_health: self.player.health(),
            opponent_health: self.opponent.combatant.health(),
            opponent_name: self.opponent.combatant.name().to_string(),
            difficulty: self.opponent.profile.difficulty,
            risk: self.opponent.profile.risk,
            deltas: self.player.inventory_deltas(),
            decisions: self.decisions,
        }
    }

    fn narrate_summary<N: Narrator>(&self, report: &BattleReport, narrator: &mut N) {
        let player = self.player.name();
        let opponent = &report.opponent_name;

        narrator.narrate("End of Combat!");
        match report.result {
            BattleResult::PlayerWon => {
                narrator.narrate(&format!("Congratulations {player}, you defeated the {opponent}!"))
            }
            BattleResult::OpponentWon => {
                narrator.narrate(&format!("You were defeated by the {opponent}!"))
            }
            BattleResult::Stalled => narrator.narrate(&format!(
                "The fight with the {opponent} was called off after {} ticks!",
                report.ticks
            )),
        }
        narrator.narrate(&format!(
            "{player} made {} moves while {opponent} made {} moves",
            report.player_moves, report.opponent_moves
        ));
        narrator.narrate(&format!(
            "All items used in combat have been removed from {player}'s inventory!"
        ));
    }
}
