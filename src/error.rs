//! Error types shared by the battle engine.

use crate::items::PoolKind;
use thiserror::Error;

/// Errors raised while resolving a battle.
#[derive(Debug, Error)]
pub enum BattleError {
    /// More item units were requested than a pool holds.
    #[error("requested {requested} item units but the pool only holds {available}")]
    PoolCapacity { requested: u64, available: u64 },

    /// Both item pools were empty when a move was needed. The fallback item
    /// makes this unreachable while the inventory invariant holds.
    #[error("{combatant} has no damaging or healing items to choose from")]
    NoMoveAvailable { combatant: String },

    /// A slot pointed past the end of its pool.
    #[error("no {kind} item at slot {index}")]
    NoSuchItem { kind: PoolKind, index: usize },

    /// The move input provider closed before a valid item was chosen.
    #[error("move input closed before an item was chosen")]
    InputClosed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when building a roll range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range lower bound {min} is above upper bound {max}")]
    Inverted { min: u32, max: u32 },

    #[error("range upper bound {max} is above the limit of {limit}")]
    TooLarge { max: u32, limit: u32 },
}

pub type Result<T> = std::result::Result<T, BattleError>;
