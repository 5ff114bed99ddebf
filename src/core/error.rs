//! Error types.
//!
//! `ActionError` covers every rule violation a command can hit. They are all
//! recoverable: an `Err` means the command had no effect on the game.

use super::entity::InstanceId;
use super::player::PlayerSlot;

/// A command was rejected by the rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game has already ended")]
    GameEnded,
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerSlot),
    #[error("{0} is not in hand")]
    CardNotInHand(InstanceId),
    #[error("not enough crystals: cost {cost}, available {available}")]
    InsufficientCrystals { cost: u32, available: u32 },
    #[error("a resource card was already played this turn")]
    ResourceAlreadyPlayed,
    #[error("resource zone is full")]
    ResourceZoneFull,
    #[error("battlefield is full")]
    FieldFull,
    #[error("{0} is not on the attacker's battlefield")]
    AttackerNotFound(InstanceId),
    #[error("{0} is not a unit")]
    NotAUnit(InstanceId),
    #[error("{0} cannot attack right now")]
    AttackerNotReady(InstanceId),
    #[error("invalid attack target")]
    InvalidTarget,
    #[error("the defending battlefield has units that must be attacked first")]
    MustAttackBlocker,
    #[error("a policy-driven turn is in progress")]
    PolicyTurnInProgress,
    #[error("no pending step to resume")]
    NothingPending,
}

/// Snapshot persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot encoding error: {0}")]
    Codec(#[from] bincode::Error),
}
