//! Rules-facing contracts shared by games and actors.
//!
//! - `GameResult`: how a game ended
//! - `GameCommands` / `AttackTarget`: what an actor may do
//! - `StateObserver` / `GameEvent`: what the game reports

pub mod commands;
pub mod observer;
pub mod outcome;

pub use commands::{AttackTarget, GameCommands};
pub use observer::{DrawSkip, GameEvent, NullObserver, RecordingObserver, StateObserver};
pub use outcome::GameResult;
