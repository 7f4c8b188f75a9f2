//! External decision-maker boundary
//!
//! Each player holds exactly one bound decision-maker for the whole game.
//! The engine hands it a prompt string and gets untrusted free text back;
//! latency and content are outside the engine's control. Before the first
//! round the orchestrator sends each decision-maker a one-time system
//! framing message and never re-sends it per turn.
//!
//! Call faults are handled per [`FaultPolicy`]: the reference behavior lets
//! a fault end the game, but backends fail often enough in practice that the
//! default policy retries and then treats the turn as an implicit SKIP.

use std::collections::VecDeque;
use thiserror::Error;

/// Errors surfaced by a decision-maker backend
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision backend failure: {0}")]
    Backend(String),
}

/// An external decision-maker bound to one player.
///
/// Implementations wrap whatever actually produces text (a language model
/// client, a script, a human console). The returned text is untrusted and
/// goes through protocol validation before it can affect game state.
pub trait DecisionMaker {
    /// Receive the one-time system framing message. Called once, before the
    /// first round. Default: ignore it.
    fn set_system_prompt(&mut self, _prompt: &str) {}

    /// Produce a response for the given turn prompt
    fn decide(&mut self, prompt: &str) -> Result<String, DecisionError>;
}

/// How a phase treats a decision-maker call fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Propagate the fault and abort the game (reference behavior)
    Abort,

    /// Retry up to `retries` additional times, then treat the turn as an
    /// implicit SKIP so one bad backend never breaks the game
    SkipAfterRetries { retries: u32 },
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::SkipAfterRetries { retries: 1 }
    }
}

/// Scripted decision-maker replaying canned responses in order.
///
/// Answers `SKIP` once the script is exhausted. Used by integration tests
/// and the demo runner.
///
/// NOTE: Available in all builds to support integration testing,
/// but real games bind an actual backend.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionMaker {
    responses: VecDeque<String>,
    system_prompt: Option<String>,
}

impl ScriptedDecisionMaker {
    /// Create a script from a list of responses
    pub fn new(responses: Vec<impl Into<String>>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            system_prompt: None,
        }
    }

    /// The system framing message received at game start, if any
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }
}

impl DecisionMaker for ScriptedDecisionMaker {
    fn set_system_prompt(&mut self, prompt: &str) {
        self.system_prompt = Some(prompt.to_string());
    }

    fn decide(&mut self, _prompt: &str) -> Result<String, DecisionError> {
        Ok(self
            .responses
            .pop_front()
            .unwrap_or_else(|| "SKIP".to_string()))
    }
}
