//! Shuffling: the randomness collaborator of the rules engine.
//!
//! The engine never draws random numbers itself. Decks are permuted through
//! the `Shuffler` capability, which games receive at construction.
//!
//! - `GameRng`: seeded ChaCha8, uniform Fisher-Yates permutation
//! - `PreserveOrder`: identity permutation, for scripted tests
//!
//! ```
//! use crystal_duel::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut xs: Vec<u32> = (0..10).collect();
//! let mut ys = xs.clone();
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//!
//! // Same seed, same permutation
//! assert_eq!(xs, ys);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::Card;

/// Capability to permute a sequence of cards in place.
pub trait Shuffler: Send {
    /// Permute `cards` in place.
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// Deterministic RNG used for deck shuffling.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

impl Shuffler for GameRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        GameRng::shuffle(self, cards);
    }
}

/// Shuffler that leaves the order untouched.
///
/// With this shuffler the last entry of a deck list is the first card drawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreserveOrder;

impl Shuffler for PreserveOrder {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
}
