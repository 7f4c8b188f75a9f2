//! Game State
//!
//! Holds the roster, per-player balances and the append-only round history.
//! Read/update primitives only - no phase or settlement logic lives here.
//!
//! # Critical Invariants
//!
//! 1. **Roster is fixed**: players are registered once at construction
//! 2. **History is append-only**: records are never reordered or truncated
//! 3. **Balances change only through settlement**: the delta primitive is
//!    crate-private and reached from the settlement engine alone

use crate::models::player::PlayerId;
use crate::models::round::GameRound;
use std::collections::HashMap;

/// Complete game state: roster order, balances and round history.
///
/// # Example
///
/// ```
/// use credit_arena_core_rs::{GameState, PlayerId};
///
/// let state = GameState::new(vec![PlayerId::new("Alice"), PlayerId::new("Bob")], 100);
/// assert_eq!(state.num_players(), 2);
/// assert_eq!(state.balance(&PlayerId::new("Alice")), 100);
/// assert_eq!(state.total_balance(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    /// Roster in registration order (fixed player order for phases)
    players: Vec<PlayerId>,

    /// Current balance per player
    balances: HashMap<PlayerId, i64>,

    /// Completed rounds, oldest first
    history: Vec<GameRound>,

    /// Current round number; 0 before the first round starts
    current_round: u32,
}

impl GameState {
    /// Create state with every player at the configured starting balance
    pub fn new(players: Vec<PlayerId>, initial_balance: i64) -> Self {
        let balances = players
            .iter()
            .map(|p| (p.clone(), initial_balance))
            .collect();

        Self {
            players,
            balances,
            history: Vec::new(),
            current_round: 0,
        }
    }

    /// Roster in registration order
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Number of players in the game
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Resolve a name to a roster identity (exact match)
    pub fn lookup(&self, name: &str) -> Option<&PlayerId> {
        self.players.iter().find(|p| p.as_str() == name)
    }

    /// Current balance for a player
    ///
    /// # Panics
    ///
    /// Panics if the player is not on the roster; phases only ever hand in
    /// roster identities.
    pub fn balance(&self, player: &PlayerId) -> i64 {
        self.balances[player]
    }

    /// Apply a signed balance delta. Settlement engine only.
    pub(crate) fn apply_delta(&mut self, player: &PlayerId, delta: i64) {
        if let Some(balance) = self.balances.get_mut(player) {
            *balance += delta;
        }
    }

    /// Total credits in the system (bonuses inject new credits over time)
    pub fn total_balance(&self) -> i64 {
        self.balances.values().sum()
    }

    /// Players with balances, sorted by balance descending.
    ///
    /// The sort is stable, so ties keep roster order.
    pub fn standings(&self) -> Vec<(PlayerId, i64)> {
        let mut ranked: Vec<(PlayerId, i64)> = self
            .players
            .iter()
            .map(|p| (p.clone(), self.balances[p]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Current round number (0 before the first round)
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Advance to the next round. Called before any phase work.
    pub(crate) fn increment_round(&mut self) {
        self.current_round += 1;
    }

    /// Append a completed round to the history
    pub(crate) fn record_round(&mut self, round: GameRound) {
        debug_assert_eq!(round.number(), self.current_round);
        self.history.push(round);
    }

    /// Completed rounds, oldest first
    pub fn history(&self) -> &[GameRound] {
        &self.history
    }
}
