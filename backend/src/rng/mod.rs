//! Deterministic random number generation
//!
//! Player orderings are the only randomness in the game; keeping them on a
//! seeded generator makes a full game transcript replayable.

pub mod xorshift;

pub use xorshift::RngManager;
