//! # crystal-duel
//!
//! Rules engine and turn state machine for a two-player collectible card
//! game: resource economy, zone transitions, combat, and win/loss
//! detection.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine exposes plain state and accepts plain
//!    commands. Presentation hangs off the `StateObserver` capability.
//!
//! 2. **Explicit collaborators**: Card creation (`CardFactory`), shuffling
//!    (`Shuffler`), and opponent decisions (`OpponentPolicy`) are injected,
//!    so every game can be made deterministic.
//!
//! 3. **Recoverable rule violations**: Commands return
//!    `Result<_, ActionError>`; an error means nothing changed.
//!
//! ## Architecture
//!
//! - **Closed card variants**: `CardKind` is an enum, and zone and combat
//!   rules match on it exhaustively.
//!
//! - **Persistent Data Structures**: Zones are `im::Vector`s, so a
//!   `GameSnapshot` after every command is cheap.
//!
//! - **Explicit pacing**: A policy-driven turn is suspended at two points
//!   with configurable delays instead of hidden timers.
//!
//! ## Modules
//!
//! - `core`: Ids, player slots, configuration, shuffling, errors, snapshots
//! - `cards`: Templates, instances, and the card factory
//! - `zones`: The deck
//! - `rules`: Outcomes, the command contract, observers and events
//! - `games`: The duel (players, game, pacing, policy)

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionError, CardType, GameRng, GameSnapshot, IdGenerator, InstanceId, PacingConfig, PlayerMap, PlayerSlot,
    PreserveOrder, RulesConfig, Shuffler, SnapshotError, TurnPhase, Zone,
};

pub use crate::cards::{Card, CardFactory, CardKind, CardRegistry, CardTemplate, Challenger, TemplateId, TemplateKind};

pub use crate::zones::Deck;

pub use crate::rules::{
    AttackTarget, DrawSkip, GameCommands, GameEvent, GameResult, NullObserver, RecordingObserver, StateObserver,
};

pub use crate::games::duel::{
    DrawOutcome, Game, GameBuilder, HeuristicPolicy, OpponentPolicy, PendingStep, Player, Suspension,
};
