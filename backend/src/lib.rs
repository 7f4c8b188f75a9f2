//! Credit Arena Core - Rust Engine
//!
//! Round engine and transaction-settlement core for a multi-agent credit
//! exchange game. Independent decision-makers (language models behind the
//! [`decision::DecisionMaker`] boundary) trade private messages, then transfer
//! credits to one another across repeated rounds; the largest balance at the
//! end wins.
//!
//! # Architecture
//!
//! - **models**: Domain types (PlayerId, GameState, GameRound, events)
//! - **protocol**: Validator turning untrusted free text into typed actions
//! - **phases**: Messaging and transaction phase executors
//! - **settlement**: Debits, credits and mutual-cooperation bonuses
//! - **orchestrator**: Round/game state machine
//! - **decision**: External decision-maker boundary and fault policy
//! - **prompt**: Game-state-to-text context rendering
//! - **events**: Closed lifecycle event type, observers and the event log
//! - **rng**: Deterministic random number generation (player shuffles)
//!
//! # Critical Invariants
//!
//! 1. All credit values are i64
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Malformed agent output is a validation outcome, never a fault
//! 4. Round history is append-only and never shows a partially-settled round

// Module declarations
pub mod decision;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod phases;
pub mod prompt;
pub mod protocol;
pub mod rng;
pub mod settlement;

// Re-exports for convenience
pub use decision::{DecisionError, DecisionMaker, FaultPolicy, ScriptedDecisionMaker};
pub use events::{GameObserver, Emitter};
pub use models::{
    event::{EventLog, GameEvent},
    player::{Player, PlayerId},
    round::{GameRound, Message, TransferMap},
    state::GameState,
};
pub use orchestrator::{Game, GameConfig, GameError};
pub use prompt::PromptBuilder;
pub use protocol::{MessageAction, ProtocolViolation, TransferAction};
pub use rng::RngManager;
pub use settlement::{apply_round, BonusAward, SettlementReport};
