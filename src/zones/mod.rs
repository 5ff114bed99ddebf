//! Zone storage.
//!
//! Hand, field, resources, and discard are plain insertion-ordered
//! collections owned by the player. The deck has draw semantics of its own.

pub mod deck;

pub use deck::Deck;
