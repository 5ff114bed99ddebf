//! Player slots and per-slot data storage.
//!
//! ## PlayerSlot
//!
//! The game always has exactly two seats: the first-acting `Player` slot and
//! the `Opponent` slot.
//!
//! ## PlayerMap
//!
//! Per-slot storage indexable by `PlayerSlot`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed player seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// The first slot; takes the first turn.
    Player,
    /// The second slot.
    Opponent,
}

impl PlayerSlot {
    /// Both slots, in turn order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::Player, PlayerSlot::Opponent];

    /// The other seat.
    ///
    /// ```
    /// use crystal_duel::core::PlayerSlot;
    ///
    /// assert_eq!(PlayerSlot::Player.other(), PlayerSlot::Opponent);
    /// assert_eq!(PlayerSlot::Opponent.other(), PlayerSlot::Player);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PlayerSlot::Player => PlayerSlot::Opponent,
            PlayerSlot::Opponent => PlayerSlot::Player,
        }
    }

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerSlot::Player => 0,
            PlayerSlot::Opponent => 1,
        }
    }

    /// Default display name for the seat.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            PlayerSlot::Player => "Player",
            PlayerSlot::Opponent => "Opponent",
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Per-slot data storage.
///
/// ## Example
///
/// ```
/// use crystal_duel::core::{PlayerMap, PlayerSlot};
///
/// let mut life: PlayerMap<i32> = PlayerMap::with_value(20);
/// life[PlayerSlot::Opponent] = 15;
///
/// assert_eq!(life[PlayerSlot::Player], 20);
/// assert_eq!(life[PlayerSlot::Opponent], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerSlot) -> T) -> Self {
        Self {
            data: [factory(PlayerSlot::Player), factory(PlayerSlot::Opponent)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a slot's data.
    #[must_use]
    pub fn get(&self, slot: PlayerSlot) -> &T {
        &self.data[slot.index()]
    }

    /// Get a mutable reference to a slot's data.
    pub fn get_mut(&mut self, slot: PlayerSlot) -> &mut T {
        &mut self.data[slot.index()]
    }

    /// Iterate over (PlayerSlot, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, &T)> {
        PlayerSlot::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerSlot, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerSlot, &mut T)> {
        PlayerSlot::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerSlot> for PlayerMap<T> {
    type Output = T;

    fn index(&self, slot: PlayerSlot) -> &Self::Output {
        self.get(slot)
    }
}

impl<T> IndexMut<PlayerSlot> for PlayerMap<T> {
    fn index_mut(&mut self, slot: PlayerSlot) -> &mut Self::Output {
        self.get_mut(slot)
    }
}
