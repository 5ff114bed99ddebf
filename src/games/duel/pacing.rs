//! Pacing of policy-driven turns.
//!
//! A policy-driven turn is split into two suspensions so an observer can
//! follow it: the game pauses before the policy acts (`OpponentThinking`)
//! and again before the turn ends (`OpponentTurnComplete`). Each pause is a
//! `PendingStep` the caller resumes once its delay has elapsed. Steps with
//! a zero delay are resumed by the game itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerSlot;

/// Where a policy-driven turn is suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suspension {
    /// The policy has not acted yet.
    OpponentThinking,
    /// The policy has acted; the turn ends on resume.
    OpponentTurnComplete,
}

/// A suspension waiting to be resumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingStep {
    pub suspension: Suspension,
    /// The policy-driven slot.
    pub slot: PlayerSlot,
    /// How long the caller should wait before resuming.
    pub delay: Duration,
}

impl PendingStep {
    #[must_use]
    pub fn thinking(slot: PlayerSlot, delay: Duration) -> Self {
        Self {
            suspension: Suspension::OpponentThinking,
            slot,
            delay,
        }
    }

    #[must_use]
    pub fn turn_complete(slot: PlayerSlot, delay: Duration) -> Self {
        Self {
            suspension: Suspension::OpponentTurnComplete,
            slot,
            delay,
        }
    }

    /// Resumed by the game without waiting.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}
