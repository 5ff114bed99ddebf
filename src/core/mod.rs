//! Core engine types: ids, player slots, configuration, shuffling, errors,
//! and snapshots.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{CardType, PacingConfig, RulesConfig, TurnPhase, Zone};
pub use entity::{IdGenerator, InstanceId};
pub use error::{ActionError, SnapshotError};
pub use player::{PlayerMap, PlayerSlot};
pub use rng::{GameRng, PreserveOrder, Shuffler};
pub use state::GameSnapshot;
