//! The public command contract of a game.
//!
//! `GameCommands` is everything an actor (a human front end or an
//! `OpponentPolicy`) may use: read-only access to both players and the two
//! mutating commands of the main phase. Ending a turn is not part of it; a
//! policy-driven turn ends through the game's pacing steps.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::error::ActionError;
use crate::core::player::PlayerSlot;
use crate::games::duel::Player;

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// Direct attack on a player's life.
    Player(PlayerSlot),
    /// A unit on the defending battlefield.
    Unit(InstanceId),
}

impl std::fmt::Display for AttackTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackTarget::Player(slot) => write!(f, "{slot}"),
            AttackTarget::Unit(id) => write!(f, "{id}"),
        }
    }
}

impl From<PlayerSlot> for AttackTarget {
    fn from(slot: PlayerSlot) -> Self {
        AttackTarget::Player(slot)
    }
}

impl From<InstanceId> for AttackTarget {
    fn from(id: InstanceId) -> Self {
        AttackTarget::Unit(id)
    }
}

/// Commands and queries available to an actor.
pub trait GameCommands {
    /// Public state of a player.
    fn player(&self, slot: PlayerSlot) -> &Player;

    /// The slot whose turn it is.
    fn current_player(&self) -> PlayerSlot;

    /// True once the game has ended.
    fn is_ended(&self) -> bool;

    /// Play a card from `slot`'s hand.
    fn play_card(&mut self, slot: PlayerSlot, card: InstanceId) -> Result<(), ActionError>;

    /// Declare an attack with a unit on `slot`'s battlefield.
    fn declare_attack(
        &mut self,
        slot: PlayerSlot,
        attacker: InstanceId,
        target: AttackTarget,
    ) -> Result<(), ActionError>;
}
