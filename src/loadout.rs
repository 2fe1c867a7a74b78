//! The player's loadout: who they are and which items they carry.
//!
//! A loadout lives as JSON at `~/.skirmish/loadout.json`. When no file
//! exists yet the built-in starter loadout is used. After a battle the items
//! consumed are written back through [`InventoryStore`], dropping any item
//! whose count reaches zero.

use crate::combat::{InventoryDelta, PlayerProfile};
use crate::error::RangeError;
use crate::items::{ItemDefinition, RollRange};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOADOUT_FILE: &str = "loadout.json";

#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid range: {0}")]
    Range(#[from] RangeError),

    #[error("entry {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("player {name} has zero max health")]
    ZeroHealth { name: String },
}

/// Receives the inventory changes a battle produced.
pub trait InventoryStore {
    fn apply_deltas(&mut self, player_id: u32, deltas: &[InventoryDelta])
        -> Result<(), LoadoutError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub player: PlayerProfile,
    #[serde(default)]
    pub damaging: Vec<ItemDefinition>,
    #[serde(default)]
    pub healing: Vec<ItemDefinition>,
}

impl Loadout {
    /// What a new adventurer starts with.
    pub fn starter() -> Result<Self, LoadoutError> {
        let item = |id, name: &str, count, magnitude: (u32, u32), cooldown: (u32, u32)| {
            Ok::<_, RangeError>(ItemDefinition {
                id,
                name: name.to_string(),
                count,
                magnitude: RollRange::new(magnitude.0, magnitude.1)?,
                cooldown: RollRange::new(cooldown.0, cooldown.1)?,
                experience: RollRange::new(1, 3)?,
            })
        };

        Ok(Self {
            player: PlayerProfile {
                id: 1,
                name: "adventurer".to_string(),
                max_health: 100,
            },
            damaging: vec![
                item(1, "short sword", 6, (8, 14), (1, 2))?,
                item(2, "war axe", 3, (12, 24), (2, 3))?,
                item(3, "throwing knife", 8, (4, 9), (0, 1))?,
            ],
            healing: vec![
                item(4, "healing potion", 3, (15, 30), (1, 2))?,
                item(5, "bandage", 5, (5, 10), (0, 1))?,
            ],
        })
    }

    /// `~/.skirmish/loadout.json`
    pub fn default_path() -> io::Result<PathBuf> {
        persistence::save_path(LOADOUT_FILE)
    }

    /// Reads and validates a loadout file. Items with no copies left are
    /// dropped.
    pub fn load(path: &Path) -> Result<Self, LoadoutError> {
        let json = persistence::read_if_exists(path)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no loadout at {}", path.display()),
            )
        })?;
        Self::from_json(&json)
    }

    /// Like [`Loadout::load`], falling back to the starter loadout when the
    /// file does not exist.
    pub fn load_or_starter(path: &Path) -> Result<Self, LoadoutError> {
        match persistence::read_if_exists(path)? {
            Some(json) => Self::from_json(&json),
            None => {
                tracing::info!(path = %path.display(), "no loadout file, using starter loadout");
                Self::starter()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadoutError> {
        let mut loadout: Loadout = serde_json::from_str(json)?;
        loadout.damaging.retain(|item| item.count > 0);
        loadout.healing.retain(|item| item.count > 0);
        loadout.validate()?;
        Ok(loadout)
    }

    pub fn save(&self, path: &Path) -> Result<(), LoadoutError> {
        persistence::save_json(path, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), LoadoutError> {
        if self.player.name.trim().is_empty() {
            return Err(LoadoutError::EmptyName { id: self.player.id });
        }
        if self.player.max_health == 0 {
            return Err(LoadoutError::ZeroHealth {
                name: self.player.name.clone(),
            });
        }
        if let Some(item) = self.items().find(|item| item.name.trim().is_empty()) {
            return Err(LoadoutError::EmptyName { id: item.id });
        }
        Ok(())
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.damaging.iter().chain(self.healing.iter())
    }

    pub fn count_of(&self, item_id: u32) -> u32 {
        self.items()
            .filter(|item| item.id == item_id)
            .map(|item| item.count)
            .sum()
    }
}

impl InventoryStore for Loadout {
    fn apply_deltas(
        &mut self,
        player_id: u32,
        deltas: &[InventoryDelta],
    ) -> Result<(), LoadoutError> {
        if player_id != self.player.id {
            tracing::warn!(
                player_id,
                loadout_player = self.player.id,
                "inventory changes are for another player, ignoring"
            );
            return Ok(());
        }

        for delta in deltas {
            let row = self
                .damaging
                .iter_mut()
                .chain(self.healing.iter_mut())
                .find(|item| item.id == delta.item_id);
            match row {
                Some(item) => item.count = item.count.saturating_sub(delta.used),
                None => tracing::warn!(item_id = delta.item_id, "used item is not in the loadout"),
            }
        }

        for pool in [&mut self.damaging, &mut self.healing] {
            pool.retain(|item| {
                if item.count == 0 {
                    tracing::debug!(item = %item.name, "item used up, removing from loadout");
                }
                item.count > 0
            });
        }
        Ok(())
    }
}
