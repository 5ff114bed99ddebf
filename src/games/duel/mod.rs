//! Two-player duel: players, the turn state machine, pacing, and the
//! reference opponent policy.
//!
//! ## Usage
//!
//! ```
//! use crystal_duel::cards::TemplateId;
//! use crystal_duel::core::{PlayerSlot, RulesConfig};
//! use crystal_duel::games::duel::{GameBuilder, HeuristicPolicy};
//!
//! let list: Vec<TemplateId> = ["crystal", "stalker", "crystal", "kaelen"]
//!     .iter()
//!     .cycle()
//!     .take(24)
//!     .map(|&id| id.into())
//!     .collect();
//!
//! // Both slots policy-driven, no pacing: the whole game runs in `start_game`.
//! let mut game = GameBuilder::new()
//!     .rules(RulesConfig::default().headless())
//!     .policy(PlayerSlot::Player, HeuristicPolicy)
//!     .seed(7)
//!     .build(&list, &list);
//!
//! game.start_game();
//! assert!(game.is_ended());
//! assert!(game.winner().is_some());
//! ```

pub mod game;
pub mod pacing;
pub mod player;
pub mod policy;

pub use crate::rules::AttackTarget;
pub use game::{Game, GameBuilder};
pub use pacing::{PendingStep, Suspension};
pub use player::{DrawOutcome, Player};
pub use policy::{HeuristicPolicy, OpponentPolicy};
