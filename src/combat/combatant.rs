//! State shared by every battle participant.
//!
//! A [`Combatant`] owns its health, cooldown and item pools. It enforces the
//! two inventory rules the rest of the engine relies on: exhausted items move
//! to the `used` archive, and at least one usable item always exists.

use crate::error::{BattleError, Result};
use crate::items::{Item, ItemSlot, PoolKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    name: String,
    health: u32,
    max_health: u32,
    cooldown: u32,
    move_count: u32,
    damaging: Vec<Item>,
    healing: Vec<Item>,
    used: Vec<Item>,
}

/// What one use of an item did.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub actor: String,
    pub target: String,
    pub item_name: String,
    pub kind: PoolKind,
    /// Health actually changed, after clamping.
    pub amount: u32,
    /// Cooldown added to the actor.
    pub cooldown: u32,
}

impl ActionOutcome {
    pub fn narration(&self) -> String {
        match self.kind {
            PoolKind::Healing => format!(
                "{} healed themself with {} gaining {} HP",
                self.actor, self.item_name, self.amount
            ),
            PoolKind::Damaging => format!(
                "{} attacked {} with {} dealing {} dmg",
                self.actor, self.target, self.item_name, self.amount
            ),
        }
    }
}

/// How many of an inventory item a battle consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDelta {
    pub item_id: u32,
    pub name: String,
    pub used: u32,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        damaging: Vec<Item>,
        healing: Vec<Item>,
    ) -> Self {
        let mut combatant = Self {
            name: name.into(),
            health: max_health,
            max_health,
            cooldown: 0,
            move_count: 0,
            damaging,
            healing,
            used: Vec::new(),
        };
        combatant.ensure_move_available();
        combatant
    }

    /// Starts the combatant part-way through a fight, clamped to its maximum.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn damaging(&self) -> &[Item] {
        &self.damaging
    }

    pub fn healing(&self) -> &[Item] {
        &self.healing
    }

    pub fn used(&self) -> &[Item] {
        &self.used
    }

    pub fn pool(&self, kind: PoolKind) -> &[Item] {
        match kind {
            PoolKind::Damaging => &self.damaging,
            PoolKind::Healing => &self.healing,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut Vec<Item> {
        match kind {
            PoolKind::Damaging => &mut self.damaging,
            PoolKind::Healing => &mut self.healing,
        }
    }

    pub fn item(&self, slot: ItemSlot) -> Result<&Item> {
        self.pool(slot.kind)
            .get(slot.index)
            .ok_or(BattleError::NoSuchItem {
                kind: slot.kind,
                index: slot.index,
            })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown > 0
    }

    pub fn add_cooldown(&mut self, amount: u32) {
        self.cooldown += amount;
    }

    /// One tick of cooldown recovery.
    pub fn decay_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    pub fn health_lost(&self) -> u32 {
        self.max_health - self.health
    }

    pub fn health_remaining_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    pub fn health_lost_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health_lost() as f64 / self.max_health as f64
    }

    /// Active items, damaging first, with their slots.
    pub fn items(&self) -> impl Iterator<Item = (ItemSlot, &Item)> {
        let damaging = self
            .damaging
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemSlot::damaging(i), item));
        let healing = self
            .healing
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemSlot::healing(i), item));
        damaging.chain(healing)
    }

    pub fn item_names(&self) -> Vec<&str> {
        self.items().map(|(_, item)| item.name.as_str()).collect()
    }

    /// First active item called `name`, searching damaging items first.
    pub fn find_by_name(&self, name: &str) -> Option<ItemSlot> {
        self.items()
            .find(|(_, item)| item.name == name)
            .map(|(slot, _)| slot)
    }

    /// Changes health by `amount`, clamped to `[0, max_health]`.
    /// Returns how much health actually changed.
    pub fn apply_health_delta(&mut self, amount: i64) -> u32 {
        let before = self.health;
        let after = (self.health as i64 + amount).clamp(0, self.max_health as i64);
        self.health = after as u32;
        before.abs_diff(self.health)
    }

    /// Hands out the fallback attack when both pools are empty.
    pub fn ensure_move_available(&mut self) {
        if self.damaging.is_empty() && self.healing.is_empty() {
            tracing::debug!(combatant = %self.name, "out of items, granting fallback attack");
            self.damaging.push(Item::fallback());
        }
    }

    /// Spends one unit of the item in `slot`. Exhausted items move to the
    /// `used` archive; the fallback attack is never spent.
    pub fn reduce_item(&mut self, slot: ItemSlot) -> Result<()> {
        self.item(slot)?;
        let pool = self.pool_mut(slot.kind);
        if !pool[slot.index].is_fallback() {
            let item = &mut pool[slot.index];
            item.count = item.count.saturating_sub(1);
            if item.count < 1 {
                let exhausted = pool.remove(slot.index);
                self.used.push(exhausted);
            }
        }
        self.ensure_move_available();
        Ok(())
    }

    /// Uses the item in `slot`: heals self for healing items, otherwise
    /// damages `target`. The rolled cooldown stacks onto any existing one.
    pub fn use_item(
        &mut self,
        slot: ItemSlot,
        target: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Result<ActionOutcome> {
        let item = self.item(slot)?;
        let item_name = item.name.clone();
        let rolled = item.roll_amount(rng);
        let cooldown = item.roll_cooldown(rng);

        self.move_count += 1;
        self.add_cooldown(cooldown);
        self.reduce_item(slot)?;

        let amount = match slot.kind {
            PoolKind::Healing => self.apply_health_delta(rolled as i64),
            PoolKind::Damaging => target.apply_health_delta(-(rolled as i64)),
        };

        Ok(ActionOutcome {
            actor: self.name.clone(),
            target: match slot.kind {
                PoolKind::Healing => self.name.clone(),
                PoolKind::Damaging => target.name.clone(),
            },
            item_name,
            kind: slot.kind,
            amount,
            cooldown,
        })
    }

    /// Consumption of every inventory-backed item, including exhausted ones.
    /// Items whose count never changed are left out.
    pub fn inventory_deltas(&self) -> Vec<InventoryDelta> {
        self.damaging
            .iter()
            .chain(self.healing.iter())
            .chain(self.used.iter())
            .filter(|item| item.initial_count != item.count)
            .filter_map(|item| {
                item.id.map(|item_id| InventoryDelta {
                    item_id,
                    name: item.name.clone(),
                    used: item.used_count(),
                })
            })
            .collect()
    }

    /// Multi-line board showing health and remaining items.
    pub fn status_board(&self) -> String {
        let header = format!("{} {}/{} HP", self.name, self.health, self.max_health);
        let divider = "-".repeat(self.name.len() + 8);
        let mut board = format!("{divider}\n{header}\n{divider}\n\n");
        board.push_str(&format!("Attacks\n{}\n", "-".repeat("Attacks".len())));
        board.push_str(&list_items(&self.damaging));
        board.push_str(&format!("\nHeals\n{}\n", "-".repeat("Heals".len())));
        board.push_str(&list_items(&self.healing));
        board
    }
}

fn list_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| format!("{} - {} x{}\n", item.name, item.magnitude, item.count))
        .collect()
}
