//! Round Orchestrator
//!
//! Sequences phases into rounds and rounds into a full game:
//! `NOT_STARTED -> (ROUND_IN_PROGRESS ->)* COMPLETED`, where each round runs
//! MESSAGING -> TRANSACTING -> SETTLING -> RECORDING.

pub mod engine;

pub use engine::{Game, GameConfig, GameError};
