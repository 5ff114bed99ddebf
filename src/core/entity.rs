//! Card instance identification.
//!
//! Every card instance in a game has a unique `InstanceId`, assigned once by
//! the card factory when the instance is created and never reassigned. Two
//! instances built from the same template always carry different ids.
//!
//! ## Allocation
//!
//! Ids come from an explicit `IdGenerator` owned by the card factory rather
//! than from hidden global state, so tests can start or reset the sequence
//! deterministically.
//!
//! ```
//! use crystal_duel::core::{IdGenerator, InstanceId};
//!
//! let mut ids = IdGenerator::new();
//! assert_eq!(ids.next_id(), Some(InstanceId(0)));
//! assert_eq!(ids.next_id(), Some(InstanceId(1)));
//!
//! ids.reset();
//! assert_eq!(ids.next_id(), Some(InstanceId(0)));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// Sequential source of fresh instance ids.
///
/// Ids are never reused: once `u32::MAX` has been handed out the generator
/// is exhausted until `reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u32,
    #[serde(default)]
    exhausted: bool,
}

impl IdGenerator {
    /// Create a generator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose first id is `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: first,
            exhausted: false,
        }
    }

    /// Allocate the next id. `None` once the id space is used up.
    pub fn next_id(&mut self) -> Option<InstanceId> {
        if self.exhausted {
            return None;
        }
        let id = InstanceId(self.next);
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }
        Some(id)
    }

    /// Peek at the id the next call to `next_id` will return.
    #[must_use]
    pub fn peek(&self) -> Option<InstanceId> {
        (!self.exhausted).then_some(InstanceId(self.next))
    }

    /// Restart the sequence at 0.
    pub fn reset(&mut self) {
        self.next = 0;
        self.exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_allocation() {
        let mut ids = IdGenerator::new();

        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_eq!(a, Some(InstanceId(0)));
        assert_eq!(b, Some(InstanceId(1)));
        assert_eq!(c, Some(InstanceId(2)));
        assert_eq!(ids.peek(), Some(InstanceId(3)));
    }

    #[test]
    fn test_starting_at() {
        let mut ids = IdGenerator::starting_at(100);
        assert_eq!(ids.next_id(), Some(InstanceId(100)));
        assert_eq!(ids.next_id(), Some(InstanceId(101)));
    }

    #[test]
    fn test_exhaustion() {
        let mut ids = IdGenerator::starting_at(u32::MAX - 1);
        assert_eq!(ids.next_id(), Some(InstanceId(u32::MAX - 1)));
        assert_eq!(ids.next_id(), Some(InstanceId(u32::MAX)));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);

        ids.reset();
        assert_eq!(ids.next_id(), Some(InstanceId(0)));
    }

    #[test]
    fn test_reset() {
        let mut ids = IdGenerator::starting_at(7);
        ids.next_id();
        ids.reset();
        assert_eq!(ids.next_id(), Some(InstanceId(0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", InstanceId(42)), "card-42");
    }

    #[test]
    fn test_serialization() {
        let id = InstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
