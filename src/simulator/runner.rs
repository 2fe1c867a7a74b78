//! Main simulation runner.
//!
//! Each run is one full battle through `Battle::run`, with the player side
//! driven by [`AutopilotController`]. Statistics are taken from the battle
//! reports.

use super::config::SimConfig;
use super::report::{BattleRecord, SimReport};
use crate::combat::{Battle, Combatant, Narrator, PlayerController, SilentNarrator};
use crate::error::{BattleError, Result};
use crate::items::pool::{all_indices, filter_max};
use crate::items::{Item, ItemSlot};
use crate::loadout::Loadout;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Health fraction below which the autopilot reaches for a heal.
const AUTOPILOT_HEAL_BELOW: f64 = 0.5;

/// Stand-in for a human: heals when below half health and a heal exists,
/// otherwise swings the attack with the highest average.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutopilotController;

impl PlayerController for AutopilotController {
    fn choose_move<N: Narrator>(
        &mut self,
        player: &Combatant,
        _opponent: &Combatant,
        _narrator: &mut N,
    ) -> Result<ItemSlot> {
        let strongest = |items: &[Item]| {
            filter_max(items, &all_indices(items), Item::magnitude_average)
                .first()
                .copied()
        };

        if player.health_remaining_fraction() < AUTOPILOT_HEAL_BELOW {
            if let Some(index) = strongest(player.healing()) {
                return Ok(ItemSlot::healing(index));
            }
        }
        strongest(player.damaging())
            .map(ItemSlot::damaging)
            .or_else(|| strongest(player.healing()).map(ItemSlot::healing))
            .ok_or_else(|| BattleError::NoMoveAvailable {
                combatant: player.name().to_string(),
            })
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, loadout: &Loadout) -> Result<SimReport> {
    let mut records = Vec::with_capacity(config.num_runs as usize);
    let mut profile = loadout.player.clone();
    profile.max_health = config.player_max_health;

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut battle = Battle::new(
            &profile,
            &loadout.damaging,
            &loadout.healing,
            config.battle_config(),
            &mut rng,
        );
        let report = battle.run(&mut AutopilotController, &mut SilentNarrator, &mut rng)?;
        let record = BattleRecord::from_report(&report);

        if config.verbosity >= 2 {
            println!(
                "Battle {}/{} - {:?} vs {} ({:.3}/{:.3}) in {} ticks, HP {}-{}",
                run_idx + 1,
                config.num_runs,
                record.result,
                report.opponent_name,
                record.difficulty,
                record.risk,
                record.ticks,
                report.player_health,
                report.opponent_health
            );
        }
        records.push(record);
    }

    Ok(SimReport::from_battles(records))
}
