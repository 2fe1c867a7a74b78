use crate::core::constants::*;
use crate::error::RangeError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of a combatant's two active pools an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    Damaging,
    Healing,
}

impl PoolKind {
    pub fn name(&self) -> &'static str {
        match self {
            PoolKind::Damaging => "damaging",
            PoolKind::Healing => "healing",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to an item in one of a combatant's pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemSlot {
    pub kind: PoolKind,
    pub index: usize,
}

impl ItemSlot {
    pub fn damaging(index: usize) -> Self {
        Self {
            kind: PoolKind::Damaging,
            index,
        }
    }

    pub fn healing(index: usize) -> Self {
        Self {
            kind: PoolKind::Healing,
            index,
        }
    }
}

/// Inclusive range of values an item can roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct RollRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct RawRange {
    min: u32,
    max: u32,
}

impl TryFrom<RawRange> for RollRange {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        RollRange::new(raw.min, raw.max)
    }
}

impl RollRange {
    pub fn new(min: u32, max: u32) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        if max > MAX_ROLL_VALUE {
            return Err(RangeError::TooLarge {
                max,
                limit: MAX_ROLL_VALUE,
            });
        }
        Ok(Self { min, max })
    }

    /// A range that always rolls `value`.
    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of distinct values the range can roll.
    pub fn width(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    pub fn average(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    /// Chance that a roll lands at or above `target`, measured as the share of
    /// the range above it. Targets outside the range score 0.
    pub fn chance_at_least(&self, target: u32) -> f64 {
        if !self.contains(target) {
            return 0.0;
        }
        (self.max - target) as f64 / self.width() as f64
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}

/// An item as supplied by the outside inventory, before it enters a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub name: String,
    pub count: u32,
    pub magnitude: RollRange,
    pub cooldown: RollRange,
    #[serde(default = "no_experience")]
    pub experience: RollRange,
}

fn no_experience() -> RollRange {
    RollRange::fixed(0)
}

/// A consumable attack or heal owned by one combatant for one battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Inventory id. `None` only for the fallback attack.
    pub id: Option<u32>,
    pub name: String,
    pub count: u32,
    /// Count at battle start, used to report what was consumed.
    pub initial_count: u32,
    pub magnitude: RollRange,
    pub cooldown: RollRange,
    /// Carried through for the inventory system; combat never reads it.
    pub experience: RollRange,
    is_fallback: bool,
}

impl Item {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        count: u32,
        magnitude: RollRange,
        cooldown: RollRange,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            count,
            initial_count: count,
            magnitude,
            cooldown,
            experience: RollRange::fixed(0),
            is_fallback: false,
        }
    }

    /// The always-available basic attack handed out when a combatant runs dry.
    pub fn fallback() -> Self {
        Self {
            id: None,
            name: FALLBACK_ITEM_NAME.to_string(),
            count: 1,
            initial_count: 1,
            magnitude: RollRange::new(FALLBACK_MAGNITUDE.0, FALLBACK_MAGNITUDE.1)
                .unwrap_or(RollRange::fixed(FALLBACK_MAGNITUDE.1)),
            cooldown: RollRange::new(FALLBACK_COOLDOWN.0, FALLBACK_COOLDOWN.1)
                .unwrap_or(RollRange::fixed(FALLBACK_COOLDOWN.1)),
            experience: RollRange::fixed(0),
            is_fallback: true,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn magnitude_average(&self) -> f64 {
        self.magnitude.average()
    }

    pub fn magnitude_width(&self) -> u64 {
        self.magnitude.width()
    }

    pub fn cooldown_average(&self) -> f64 {
        self.cooldown.average()
    }

    pub fn roll_amount(&self, rng: &mut impl Rng) -> u32 {
        self.magnitude.roll(rng)
    }

    pub fn roll_cooldown(&self, rng: &mut impl Rng) -> u32 {
        self.cooldown.roll(rng)
    }

    /// How many were consumed since the battle started.
    pub fn used_count(&self) -> u32 {
        self.initial_count.saturating_sub(self.count)
    }
}

impl From<&ItemDefinition> for Item {
    fn from(def: &ItemDefinition) -> Self {
        Self {
            id: Some(def.id),
            name: def.name.clone(),
            count: def.count,
            initial_count: def.count,
            magnitude: def.magnitude,
            cooldown: def.cooldown,
            experience: def.experience,
            is_fallback: false,
        }
    }
}
