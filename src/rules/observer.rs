//! State observers.
//!
//! The game pushes a full `GameSnapshot` to its observer after every
//! state-changing operation, and a `GameEvent` for each discrete thing that
//! happened. Observers never influence the game.
//!
//! - `NullObserver`: ignores everything (headless play, benchmarks)
//! - `RecordingObserver`: keeps every snapshot and event (tests, replays)

use serde::{Deserialize, Serialize};

use super::commands::AttackTarget;
use super::outcome::GameResult;
use crate::core::config::Zone;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerSlot;
use crate::core::state::GameSnapshot;

/// Why a draw did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSkip {
    /// The starting player's first turn.
    FirstTurn,
    /// The hand was at its limit; the card stays on the deck.
    HandFull,
}

/// A discrete game occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        first: PlayerSlot,
    },
    TurnStarted {
        turn: u32,
        slot: PlayerSlot,
    },
    CardDrawn {
        slot: PlayerSlot,
        card: InstanceId,
    },
    DrawSkipped {
        slot: PlayerSlot,
        reason: DrawSkip,
    },
    /// Tried to draw from an empty deck.
    PlayerDecked {
        slot: PlayerSlot,
    },
    CardPlayed {
        slot: PlayerSlot,
        card: InstanceId,
        zone: Zone,
    },
    AttackDeclared {
        slot: PlayerSlot,
        attacker: InstanceId,
        target: AttackTarget,
        damage: i32,
    },
    UnitDestroyed {
        slot: PlayerSlot,
        card: InstanceId,
    },
    PlayerDamaged {
        slot: PlayerSlot,
        amount: i32,
        life: i32,
    },
    TurnEnded {
        turn: u32,
        slot: PlayerSlot,
    },
    GameEnded {
        result: GameResult,
    },
}

/// Receives game state updates.
pub trait StateObserver {
    /// Whether `on_state` should be called. Building a snapshot is skipped
    /// entirely when this returns false.
    fn wants_snapshots(&self) -> bool {
        true
    }

    /// Called after every state-changing operation.
    fn on_state(&mut self, snapshot: &GameSnapshot);

    /// Called for each discrete event, before the snapshot that includes it.
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl StateObserver for NullObserver {
    fn wants_snapshots(&self) -> bool {
        false
    }

    fn on_state(&mut self, _snapshot: &GameSnapshot) {}
}

/// Observer that records everything it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub snapshots: Vec<GameSnapshot>,
    pub events: Vec<GameEvent>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshots.last()
    }

    /// Count events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.events.clear();
    }
}

impl StateObserver for RecordingObserver {
    fn on_state(&mut self, snapshot: &GameSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<T: StateObserver + ?Sized> StateObserver for &mut T {
    fn wants_snapshots(&self) -> bool {
        (**self).wants_snapshots()
    }

    fn on_state(&mut self, snapshot: &GameSnapshot) {
        (**self).on_state(snapshot);
    }

    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}
