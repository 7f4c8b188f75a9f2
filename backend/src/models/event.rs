//! Lifecycle events and the event log.
//!
//! `GameEvent` is a closed enum with one variant per lifecycle notification
//! the core emits. Dispatch to observers is an exhaustive match (see
//! `crate::events`), so adding a variant is a compile error until every seam
//! handles it. Events double as the replayable audit trail: the orchestrator
//! appends each emitted event to an `EventLog`.
//!
//! Only accepted effects produce events. Rejected submissions are reported
//! through the tracing channel instead and never reach game state.

use crate::models::player::PlayerId;

/// A lifecycle event emitted by the game core.
///
/// All variants carry the round they occurred in for temporal ordering
/// (`GameStarted` reports round 0).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Game constructed and about to run
    GameStarted {
        total_rounds: u32,
        initial_balance: i64,
        players: Vec<PlayerId>,
    },

    /// A round began (number is 1-indexed)
    RoundStarted { round: u32 },

    /// A message passed validation and joined the round's message log
    MessageAccepted {
        round: u32,
        sender: PlayerId,
        recipients: Vec<PlayerId>,
        text: String,
    },

    /// A player explicitly skipped messaging (or a tolerated fault did)
    MessageSkipped { round: u32, sender: PlayerId },

    /// One accepted transfer (a submission emits one event per recipient)
    TransactionAccepted {
        round: u32,
        sender: PlayerId,
        recipient: PlayerId,
        amount: i64,
    },

    /// A player explicitly skipped the transaction phase
    TransactionSkipped { round: u32, sender: PlayerId },

    /// Mutual-exchange bonus credited to both players of a pair
    BonusApplied {
        round: u32,
        first: PlayerId,
        second: PlayerId,
        amount: i64,
    },

    /// A round settled and was recorded; standings are post-settlement
    RoundEnded {
        round: u32,
        standings: Vec<(PlayerId, i64)>,
    },

    /// The configured round count completed
    GameEnded {
        round: u32,
        final_balances: Vec<(PlayerId, i64)>,
    },
}

impl GameEvent {
    /// Round this event occurred in (0 for `GameStarted`)
    pub fn round(&self) -> u32 {
        match self {
            GameEvent::GameStarted { .. } => 0,
            GameEvent::RoundStarted { round } => *round,
            GameEvent::MessageAccepted { round, .. } => *round,
            GameEvent::MessageSkipped { round, .. } => *round,
            GameEvent::TransactionAccepted { round, .. } => *round,
            GameEvent::TransactionSkipped { round, .. } => *round,
            GameEvent::BonusApplied { round, .. } => *round,
            GameEvent::RoundEnded { round, .. } => *round,
            GameEvent::GameEnded { round, .. } => *round,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "GameStarted",
            GameEvent::RoundStarted { .. } => "RoundStarted",
            GameEvent::MessageAccepted { .. } => "MessageAccepted",
            GameEvent::MessageSkipped { .. } => "MessageSkipped",
            GameEvent::TransactionAccepted { .. } => "TransactionAccepted",
            GameEvent::TransactionSkipped { .. } => "TransactionSkipped",
            GameEvent::BonusApplied { .. } => "BonusApplied",
            GameEvent::RoundEnded { .. } => "RoundEnded",
            GameEvent::GameEnded { .. } => "GameEnded",
        }
    }

    /// Acting player, if the event is about a specific player
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            GameEvent::MessageAccepted { sender, .. } => Some(sender),
            GameEvent::MessageSkipped { sender, .. } => Some(sender),
            GameEvent::TransactionAccepted { sender, .. } => Some(sender),
            GameEvent::TransactionSkipped { sender, .. } => Some(sender),
            GameEvent::BonusApplied { first, .. } => Some(first),
            _ => None,
        }
    }
}

/// Append-only log of emitted events with convenience queries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in emission order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events from a specific round
    pub fn events_in_round(&self, round: u32) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.round() == round).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events where the given player acted
    pub fn events_for_player(&self, player: &PlayerId) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|e| e.player() == Some(player))
            .collect()
    }
}
