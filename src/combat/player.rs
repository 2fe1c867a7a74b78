//! Player-side move selection.
//!
//! The orchestrator asks a [`PlayerController`] for the player's move. The
//! interactive controller reads free text from a [`MoveSource`] and matches
//! it against the player's current item names, reprompting until something
//! matches.

use super::battle::Narrator;
use super::combatant::Combatant;
use super::matching::close_match;
use crate::core::constants::{MOVE_PROMPT, MOVE_RETRY_MESSAGE, NAME_MATCH_CUTOFF};
use crate::error::{BattleError, Result};
use crate::items::ItemSlot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Who the player is, as held by the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: u32,
    pub name: String,
    pub max_health: u32,
}

/// Supplies raw move text for the human player.
pub trait MoveSource {
    /// Shows `prompt` and returns the next line of input.
    /// Fails with [`BattleError::InputClosed`] once input runs out.
    fn read_move(&mut self, prompt: &str) -> Result<String>;
}

/// Chooses the player's item each time the player is off cooldown.
pub trait PlayerController {
    fn choose_move<N: Narrator>(
        &mut self,
        player: &Combatant,
        opponent: &Combatant,
        narrator: &mut N,
    ) -> Result<ItemSlot>;
}

/// Text-driven controller for a human at the keyboard.
pub struct HumanController<S> {
    source: S,
}

impl<S: MoveSource> HumanController<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: MoveSource> PlayerController for HumanController<S> {
    fn choose_move<N: Narrator>(
        &mut self,
        player: &Combatant,
        _opponent: &Combatant,
        narrator: &mut N,
    ) -> Result<ItemSlot> {
        loop {
            let input = self.source.read_move(MOVE_PROMPT)?;
            let names = player.item_names();
            if let Some(slot) =
                close_match(&input, &names, NAME_MATCH_CUTOFF).and_then(|name| player.find_by_name(name))
            {
                return Ok(slot);
            }
            tracing::debug!(input = input.trim(), "no item matched");
            narrator.narrate(MOVE_RETRY_MESSAGE);
        }
    }
}

/// Moves typed at a terminal.
pub struct ConsoleMoves<R, W> {
    input: R,
    output: W,
}

impl ConsoleMoves<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleMoves<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsoleMoves<R, W> {
    fn read_move(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BattleError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pre-recorded moves, consumed in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<String>,
}

impl ScriptedMoves {
    pub fn new<I, T>(moves: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn read_move(&mut self, _prompt: &str) -> Result<String> {
        self.moves.pop_front().ok_or(BattleError::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, RollRange};

    fn hero() -> Combatant {
        let r = RollRange::fixed(3);
        Combatant::new(
            "hero",
            20,
            vec![
                Item::new(1, "short sword", 2, r, r),
                Item::new(2, "war axe", 1, r, r),
            ],
            vec![Item::new(3, "healing potion", 1, r, r)],
        )
    }

    fn ogre() -> Combatant {
        Combatant::new("ogre", 20, vec![], vec![])
    }

    #[test]
    fn test_exact_and_approximate_names_resolve() {
        let mut narration: Vec<String> = Vec::new();
        let mut controller =
            HumanController::new(ScriptedMoves::new(["war axe", "sword", "Healing Potion"]));
        let (player, opponent) = (hero(), ogre());

        let moves: Vec<ItemSlot> = (0..3)
            .map(|_| {
                controller
                    .choose_move(&player, &opponent, &mut narration)
                    .unwrap()
            })
            .collect();
        assert_eq!(
            moves,
            vec![
                ItemSlot::damaging(1),
                ItemSlot::damaging(0),
                ItemSlot::healing(0)
            ]
        );
        assert!(narration.is_empty());
    }

    #[test]
    fn test_reprompts_until_match() {
        let mut narration: Vec<String> = Vec::new();
        let mut controller =
            HumanController::new(ScriptedMoves::new(["banana", "xyzzy", "war ax"]));
        let slot = controller
            .choose_move(&hero(), &ogre(), &mut narration)
            .unwrap();
        assert_eq!(slot, ItemSlot::damaging(1));
        assert_eq!(narration, vec![MOVE_RETRY_MESSAGE, MOVE_RETRY_MESSAGE]);
        assert_eq!(controller.into_source().remaining(), 0);
    }

    #[test]
    fn test_closed_input_ends_prompting() {
        let mut narration: Vec<String> = Vec::new();
        let mut controller = HumanController::new(ScriptedMoves::new(["banana"]));
        let err = controller
            .choose_move(&hero(), &ogre(), &mut narration)
            .unwrap_err();
        assert!(matches!(err, BattleError::InputClosed));
        assert_eq!(narration.len(), 1);
    }

    #[test]
    fn test_console_moves_prompt_and_trim() {
        let input = io::Cursor::new("war axe\r\nsword\n");
        let mut output = Vec::new();
        {
            let mut source = ConsoleMoves::new(input, &mut output);
            assert_eq!(source.read_move("> ").unwrap(), "war axe");
            assert_eq!(source.read_move("> ").unwrap(), "sword");
            assert!(matches!(
                source.read_move("> "),
                Err(BattleError::InputClosed)
            ));
        }
        assert_eq!(String::from_utf8(output).unwrap(), "> > > ");
    }
}
