//! Shared tags and rules configuration.
//!
//! - `Zone`, `TurnPhase`, `CardType`: enumerations used by every component
//! - `RulesConfig`: numeric rules (life, hand size, zone limits, turn cap)
//! - `PacingConfig`: cosmetic delays around a policy-driven turn
//!
//! Defaults reproduce the reference ruleset.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Zone a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Face-down draw pile.
    Deck,
    /// Cards held by the player.
    Hand,
    /// Battlefield; holds units only.
    Field,
    /// Destroyed, used, and redirected cards.
    Discard,
    /// Played resource cards.
    Resources,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Field => "field",
            Zone::Discard => "discard",
            Zone::Resources => "resources",
        };
        f.write_str(name)
    }
}

/// Phase within a single player-turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Start,
    Main,
    End,
}

/// Card type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Unit with attack and health.
    Challenger,
    /// Non-unit card; no mechanical effect yet.
    Support,
    /// Zero-cost card that raises maximum crystals.
    Resource,
}

/// Delays around a policy-driven turn.
///
/// These only exist so an observer can follow the policy's moves. They have
/// no effect on rules. Zero delays make the game resume policy steps
/// synchronously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause before the policy starts acting.
    pub thinking_delay: Duration,
    /// Pause between the policy's last action and its end of turn.
    pub end_turn_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(500),
            end_turn_delay: Duration::from_millis(1000),
        }
    }
}

impl PacingConfig {
    /// No delays; policy turns run to completion inline.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            thinking_delay: Duration::ZERO,
            end_turn_delay: Duration::ZERO,
        }
    }

    /// True if both delays are zero.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.thinking_delay.is_zero() && self.end_turn_delay.is_zero()
    }
}

/// Numeric rules of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Life each player starts with (also `max_life`).
    pub starting_life: i32,

    /// Cards drawn when a player is initialized.
    pub initial_hand_size: usize,

    /// A draw with this many cards in hand is skipped.
    pub max_hand_size: usize,

    /// Maximum units on a battlefield.
    pub max_field_size: usize,

    /// Maximum cards in the resource zone.
    pub max_resources: usize,

    /// The starting player does not draw on their very first turn.
    pub first_player_skips_draw: bool,

    /// Last turn that may be played. When the `Player` slot would start the
    /// turn after it, the game ends with `GameResult::Undetermined`. `None`
    /// lets a game run until someone loses.
    pub max_turns: Option<u32>,

    /// Cosmetic pacing of policy turns.
    pub pacing: PacingConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            initial_hand_size: 5,
            max_hand_size: 7,
            max_field_size: 5,
            max_resources: 10,
            first_player_skips_draw: true,
            max_turns: Some(200),
            pacing: PacingConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Set starting life.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the battlefield limit.
    #[must_use]
    pub fn with_max_field_size(mut self, size: usize) -> Self {
        self.max_field_size = size;
        self
    }

    /// Set the resource zone limit.
    #[must_use]
    pub fn with_max_resources(mut self, size: usize) -> Self {
        self.max_resources = size;
        self
    }

    /// Set the turn cap.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Remove all pacing delays.
    #[must_use]
    pub fn headless(self) -> Self {
        self.with_pacing(PacingConfig::instant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert_eq!(rules.starting_life, 20);
        assert_eq!(rules.initial_hand_size, 5);
        assert_eq!(rules.max_hand_size, 7);
        assert_eq!(rules.max_field_size, 5);
        assert_eq!(rules.max_resources, 10);
        assert!(rules.first_player_skips_draw);
        assert_eq!(rules.max_turns, Some(200));
        assert!(!rules.pacing.is_instant());
    }

    #[test]
    fn test_builder_pattern() {
        let rules = RulesConfig::default()
            .with_starting_life(30)
            .with_max_field_size(3)
            .with_max_turns(None)
            .headless();

        assert_eq!(rules.starting_life, 30);
        assert_eq!(rules.max_field_size, 3);
        assert_eq!(rules.max_turns, None);
        assert!(rules.pacing.is_instant());
    }

    #[test]
    fn test_default_pacing() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.thinking_delay, Duration::from_millis(500));
        assert_eq!(pacing.end_turn_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(Zone::Resources.to_string(), "resources");
        assert_eq!(Zone::Field.to_string(), "field");
    }

    #[test]
    fn test_serialization() {
        let rules = RulesConfig::default().with_starting_life(12);
        let json = serde_json::to_string(&rules).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, deserialized);
    }
}
