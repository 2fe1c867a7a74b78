//! Combat system: combatants, the AI opponent, player control and the
//! battle loop.

pub mod battle;
pub mod combatant;
pub mod decision;
pub mod matching;
pub mod opponent;
pub mod player;

pub use battle::*;
pub use combatant::*;
pub use decision::*;
pub use opponent::*;
pub use player::*;
