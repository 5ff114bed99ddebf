//! Game implementations.
//!
//! - `duel`: the two-player crystal duel

pub mod duel;
