//! Observer interface and event fan-out
//!
//! Consumers (console renderers, metrics collectors) implement
//! [`GameObserver`] and subscribe on the orchestrator. The core has no
//! dependency on any particular consumer and runs fine with zero
//! subscribers; every emitted event also lands in the orchestrator's
//! [`EventLog`](crate::EventLog) for replay and assertions.
//!
//! Dispatch is an exhaustive match over the closed [`GameEvent`] enum: a new
//! lifecycle event will not compile until it has a subscriber method here.

use crate::models::event::{EventLog, GameEvent};
use crate::models::player::PlayerId;

/// Typed subscriber with one method per lifecycle event.
///
/// All methods default to no-ops so a consumer implements only what it
/// cares about.
pub trait GameObserver {
    fn on_game_started(&mut self, _total_rounds: u32, _initial_balance: i64, _players: &[PlayerId]) {
    }

    fn on_round_started(&mut self, _round: u32) {}

    fn on_message_accepted(&mut self, _sender: &PlayerId, _recipients: &[PlayerId], _text: &str) {}

    fn on_message_skipped(&mut self, _sender: &PlayerId) {}

    fn on_transaction_accepted(&mut self, _sender: &PlayerId, _recipient: &PlayerId, _amount: i64) {
    }

    fn on_transaction_skipped(&mut self, _sender: &PlayerId) {}

    fn on_bonus_applied(&mut self, _first: &PlayerId, _second: &PlayerId, _amount: i64) {}

    fn on_round_ended(&mut self, _round: u32, _standings: &[(PlayerId, i64)]) {}

    fn on_game_ended(&mut self, _final_balances: &[(PlayerId, i64)]) {}
}

/// Route one event to the matching observer method
pub fn dispatch(observer: &mut dyn GameObserver, event: &GameEvent) {
    match event {
        GameEvent::GameStarted {
            total_rounds,
            initial_balance,
            players,
        } => observer.on_game_started(*total_rounds, *initial_balance, players),
        GameEvent::RoundStarted { round } => observer.on_round_started(*round),
        GameEvent::MessageAccepted {
            sender,
            recipients,
            text,
            ..
        } => observer.on_message_accepted(sender, recipients, text),
        GameEvent::MessageSkipped { sender, .. } => observer.on_message_skipped(sender),
        GameEvent::TransactionAccepted {
            sender,
            recipient,
            amount,
            ..
        } => observer.on_transaction_accepted(sender, recipient, *amount),
        GameEvent::TransactionSkipped { sender, .. } => observer.on_transaction_skipped(sender),
        GameEvent::BonusApplied {
            first,
            second,
            amount,
            ..
        } => observer.on_bonus_applied(first, second, *amount),
        GameEvent::RoundEnded { round, standings } => observer.on_round_ended(*round, standings),
        GameEvent::GameEnded { final_balances, .. } => observer.on_game_ended(final_balances),
    }
}

/// Fans emitted events out to every subscriber, then records them.
///
/// Borrows the orchestrator's subscriber list and event log for the duration
/// of a phase.
pub struct Emitter<'a> {
    observers: &'a mut [Box<dyn GameObserver>],
    log: &'a mut EventLog,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(observers: &'a mut [Box<dyn GameObserver>], log: &'a mut EventLog) -> Self {
        Self { observers, log }
    }

    /// Notify all subscribers and append the event to the log
    pub fn emit(&mut self, event: GameEvent) {
        for observer in self.observers.iter_mut() {
            dispatch(observer.as_mut(), &event);
        }
        self.log.log(event);
    }
}
