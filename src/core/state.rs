//! Game snapshots.
//!
//! A `GameSnapshot` is the complete observable state of a game: turn
//! counter, active slot, phase, outcome, and both players with all of their
//! zones. It is what observers receive after every state change and what
//! gets persisted.
//!
//! Player zones are `im::Vector`s, so taking a snapshot shares structure
//! with the live game instead of deep-copying every card.
//!
//! ## Persistence
//!
//! `to_bytes` / `from_bytes` use bincode.

use serde::{Deserialize, Serialize};

use super::config::TurnPhase;
use super::error::SnapshotError;
use super::player::{PlayerMap, PlayerSlot};
use crate::games::duel::Player;
use crate::rules::GameResult;

/// Full observable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Round counter; increments when control returns to the first slot.
    pub turn: u32,

    /// Slot whose turn it is.
    pub current_player: PlayerSlot,

    /// Phase of the current turn.
    pub phase: TurnPhase,

    /// Sticky once true.
    pub ended: bool,

    /// Set together with `ended`.
    pub result: Option<GameResult>,

    /// Both players.
    pub players: PlayerMap<Player>,
}

impl GameSnapshot {
    /// A player's state.
    #[must_use]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot]
    }

    /// The winning slot, if the game ended with one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerSlot> {
        self.result.and_then(|r| r.winner())
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
