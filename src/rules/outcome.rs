//! Game outcome.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerSlot;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerSlot),
    /// The game was forced to end without a derivable winner.
    Undetermined,
}

impl GameResult {
    /// Check if a slot won.
    #[must_use]
    pub fn is_winner(&self, slot: PlayerSlot) -> bool {
        matches!(self, GameResult::Winner(s) if *s == slot)
    }

    /// The winning slot, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerSlot> {
        match self {
            GameResult::Winner(slot) => Some(*slot),
            GameResult::Undetermined => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(slot) => write!(f, "{slot} wins"),
            GameResult::Undetermined => f.write_str("no winner"),
        }
    }
}
