//! Opponent move selection.
//!
//! Every opponent turn runs the same three-stage cascade, stopping at the
//! first stage that produces a move:
//!
//! 1. **Lethal** - an attack likely enough (above the opponent's risk) to
//!    finish the player this turn.
//! 2. **Survive** - the player's most dangerous items could plausibly finish
//!    the opponent within the lookahead window, so it heals.
//! 3. **Normal** - a difficulty-shaped heuristic that ranks attacks by power
//!    or reach, narrows them by cooldown, then weighs the pick against a heal.
//!
//! The cascade reads both combatants and never mutates them; all ranking is
//! done on index lists into the pools.

use super::combatant::Combatant;
use super::opponent::Opponent;
use crate::error::{BattleError, Result};
use crate::items::pool::*;
use crate::items::{Item, ItemSlot, RollRange};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Why the opponent picked its move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionReason {
    /// Attack expected to finish the player this turn.
    Lethal { chance: f64 },
    /// Heal forced by the threat lookahead.
    Survive { threat: f64 },
    /// Heuristic attack.
    Attack,
    /// Heuristic heal.
    Heal,
}

impl DecisionReason {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionReason::Lethal { .. } => "lethal",
            DecisionReason::Survive { .. } => "survive",
            DecisionReason::Attack => "attack",
            DecisionReason::Heal => "heal",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub slot: ItemSlot,
    pub reason: DecisionReason,
}

impl Opponent {
    /// Picks the item to use this turn.
    pub fn decide_move(&self, player: &Combatant, rng: &mut impl Rng) -> Result<Decision> {
        if let Some((slot, chance)) = self.find_lethal_move(player) {
            tracing::debug!(
                chance,
                "found attack that can kill the player this move: {}",
                self.combatant.item(slot)?.name
            );
            return Ok(Decision {
                slot,
                reason: DecisionReason::Lethal { chance },
            });
        }

        let threat = self.estimate_threat(player)?;
        tracing::debug!(
            "{:.0}% chance I die in the next {} player moves",
            threat * 100.0,
            self.profile.moves_to_predict
        );
        if threat > self.profile.risk {
            if let Some(slot) = self.survival_heal() {
                tracing::debug!("healing to survive with {}", self.combatant.item(slot)?.name);
                return Ok(Decision {
                    slot,
                    reason: DecisionReason::Survive { threat },
                });
            }
            tracing::debug!("cannot heal, moving on");
        }

        self.normal_move(player, rng)
    }

    /// The attack most likely to finish the player this turn, provided its
    /// chance beats the opponent's risk tolerance.
    pub fn find_lethal_move(&self, player: &Combatant) -> Option<(ItemSlot, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, item) in self.combatant.damaging().iter().enumerate() {
            let chance = item.magnitude.chance_at_least(player.health());
            if chance <= self.profile.risk {
                continue;
            }
            match best {
                Some((_, current)) if chance <= current => {}
                _ => best = Some((index, chance)),
            }
        }
        best.map(|(index, chance)| (ItemSlot::damaging(index), chance))
    }

    /// The player's most dangerous item units, one entry per modelled move.
    ///
    /// Items are taken by highest magnitude average, then widest range, then
    /// quickest cooldown. Returned values index `player.damaging()`.
    pub fn dangerous_player_items(&self, player: &Combatant) -> Result<Vec<usize>> {
        let pool = player.damaging();
        let wanted = (self.profile.moves_to_predict as u64).min(total_units(pool));

        let mut remaining = all_indices(pool);
        let mut strongest: Vec<usize> = Vec::new();
        let mut widest: Vec<usize> = Vec::new();
        let mut selected: Vec<usize> = Vec::new();

        while units_of(pool, &selected) < wanted {
            if widest.is_empty() {
                if strongest.is_empty() {
                    strongest = filter_max(pool, &remaining, Item::magnitude_average);
                }
                widest = filter_max(pool, &strongest, |item| item.magnitude_width() as f64);
                sort_indices(pool, &mut widest, false, Item::cooldown_average);
            }
            if widest.is_empty() {
                break;
            }
            let pick = widest.remove(0);
            selected.push(pick);
            strongest.retain(|&i| i != pick);
            remaining.retain(|&i| i != pick);
        }

        let units = take_units(pool, &selected, wanted)?;
        tracing::debug!(
            "player items dangerous to me: {}",
            units
                .iter()
                .map(|&i| pool[i].name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(units)
    }

    /// Probability that the player's most dangerous items, used back to back,
    /// deal at least the opponent's current health.
    pub fn estimate_threat(&self, player: &Combatant) -> Result<f64> {
        let units = self.dangerous_player_items(player)?;
        let ranges: Vec<RollRange> = units
            .iter()
            .map(|&i| player.damaging()[i].magnitude)
            .collect();
        Ok(kill_probability(&ranges, self.combatant.health()))
    }

    /// Heal closest to the missing health with the tightest range, quickest
    /// cooldown first. `None` when unhurt or out of heals.
    pub fn survival_heal(&self) -> Option<ItemSlot> {
        let me = &self.combatant;
        if me.health_lost() == 0 || me.healing().is_empty() {
            return None;
        }
        let healing = me.healing();
        let likely = find_likely_to_roll(healing, &all_indices(healing), me.health_lost() as f64);
        first_min_by(healing, &likely, Item::cooldown_average).map(ItemSlot::healing)
    }

    /// Heuristic move used when nothing is about to die.
    pub fn normal_move(&self, player: &Combatant, rng: &mut impl Rng) -> Result<Decision> {
        let me = &self.combatant;
        let damaging = me.damaging();
        let healing = me.healing();
        if damaging.is_empty() && healing.is_empty() {
            return Err(BattleError::NoMoveAvailable {
                combatant: me.name().to_string(),
            });
        }

        let mut attack = None;
        if !damaging.is_empty() {
            let threshold = self.profile.health_threshold();
            let fraction = self.profile.selection_fraction();

            let mut ranked = all_indices(damaging);
            if player.health_remaining_fraction() < threshold {
                tracing::debug!("player has lower health, favouring stronger attacks");
                sort_indices(damaging, &mut ranked, true, Item::magnitude_average);
            } else {
                tracing::debug!("player has higher health, favouring wider attacks");
                sort_indices(damaging, &mut ranked, true, |item| {
                    item.magnitude_width() as f64
                });
            }

            let mut shortlist = top_fraction(&ranked, fraction).to_vec();
            let low_health = me.health_remaining_fraction() < threshold;
            // low on health: quick recovery first; otherwise slow, heavy items are fine
            sort_indices(damaging, &mut shortlist, !low_health, Item::cooldown_average);

            let pick = *top_fraction(&shortlist, fraction)
                .choose(rng)
                .ok_or_else(|| no_move(me))?;
            tracing::debug!("selected best suited attack as {}", damaging[pick].name);

            if healing.is_empty() || me.health_lost_fraction() < self.profile.risk {
                return Ok(Decision {
                    slot: ItemSlot::damaging(pick),
                    reason: DecisionReason::Attack,
                });
            }
            tracing::debug!(
                "lost {:.0}% of my health, considering a heal",
                me.health_lost_fraction() * 100.0
            );
            attack = Some(pick);
        }

        let likely = find_likely_to_roll(healing, &all_indices(healing), me.health_lost() as f64);
        let heal = *likely.choose(rng).ok_or_else(|| no_move(me))?;

        if let Some(pick) = attack {
            let attack_effect = damaging[pick].magnitude_average() / player.max_health() as f64;
            let heal_effect = healing[heal].magnitude_average() / me.max_health() as f64;
            if attack_effect > heal_effect {
                tracing::debug!("attack is more effective: {}", damaging[pick].name);
                return Ok(Decision {
                    slot: ItemSlot::damaging(pick),
                    reason: DecisionReason::Attack,
                });
            }
        }

        tracing::debug!("using heal {}", healing[heal].name);
        Ok(Decision {
            slot: ItemSlot::healing(heal),
            reason: DecisionReason::Heal,
        })
    }
}

fn no_move(combatant: &Combatant) -> BattleError {
    BattleError::NoMoveAvailable {
        combatant: combatant.name().to_string(),
    }
}

/// Share of all equally likely roll combinations of `ranges` whose total
/// reaches `health`. With two ranges this is the full cross product of
/// their values.
pub fn kill_probability(ranges: &[RollRange], health: u32) -> f64 {
    if ranges.is_empty() {
        return 0.0;
    }

    // counts[s] = combinations summing to base + s
    let base: u64 = ranges.iter().map(|r| r.min() as u64).sum();
    let mut counts = vec![1.0f64];
    for range in ranges {
        let spread = (range.width() - 1) as usize;
        // next[s] = sum of counts[s - spread..=s], as a sliding window
        let mut next = Vec::with_capacity(counts.len() + spread);
        let mut window = 0.0;
        for s in 0..counts.len() + spread {
            if s < counts.len() {
                window += counts[s];
            }
            if s > spread {
                window -= counts[s - spread - 1];
            }
            next.push(window);
        }
        counts = next;
    }

    let total: f64 = counts.iter().sum();
    let reaching: f64 = counts
        .iter()
        .enumerate()
        .filter(|(offset, _)| base + *offset as u64 >= health as u64)
        .map(|(_, &ways)| ways)
        .sum();
    reaching / total
}
