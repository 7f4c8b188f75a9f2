//! Settlement Engine
//!
//! Applies a round's accepted transfer map to the balance ledger:
//!
//! 1. **Debit phase**: each sender loses the sum of their sent amounts
//! 2. **Credit phase**: each recipient gains each amount sent to them
//! 3. **Bonus phase**: for every unordered pair of players, both are
//!    credited `min(sent, received)` when the pair exchanged in both
//!    directions this round
//!
//! Transfers alone conserve total credits; bonuses inject `2 x bonus` new
//! credits per cooperating pair - intentional, not a bug. Settlement trusts
//! the transaction phase's sum-vs-balance enforcement and does not re-check.
//! Debits only touch each sender's own total, so settlement order across
//! senders cannot change outcomes.

use crate::models::player::PlayerId;
use crate::models::round::TransferMap;
use crate::models::state::GameState;

/// A mutual-exchange bonus credited to both players of a pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusAward {
    pub first: PlayerId,
    pub second: PlayerId,
    pub amount: i64,
}

/// Outcome summary of settling one round
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettlementReport {
    /// Total credits moved between players (debits == credits)
    pub total_transferred: i64,

    /// Bonuses applied, in roster pair order
    pub bonuses: Vec<BonusAward>,
}

impl SettlementReport {
    /// New credits injected into the system this round
    pub fn total_bonus_injected(&self) -> i64 {
        self.bonuses.iter().map(|b| 2 * b.amount).sum()
    }
}

fn amount_between(transfers: &TransferMap, from: &PlayerId, to: &PlayerId) -> i64 {
    transfers
        .get(from)
        .and_then(|m| m.get(to))
        .copied()
        .unwrap_or(0)
}

/// Apply a round's accepted transfers and bonuses to the ledger.
///
/// Pure state transform: emits nothing itself; the orchestrator announces
/// bonuses from the returned report.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use credit_arena_core_rs::{apply_round, GameState, PlayerId, TransferMap};
///
/// let alice = PlayerId::new("Alice");
/// let bob = PlayerId::new("Bob");
/// let mut state = GameState::new(vec![alice.clone(), bob.clone()], 100);
///
/// let mut transfers = TransferMap::new();
/// transfers.insert(alice.clone(), BTreeMap::from([(bob.clone(), 20)]));
/// transfers.insert(bob.clone(), BTreeMap::from([(alice.clone(), 20)]));
///
/// let report = apply_round(&mut state, &transfers);
/// // 100 - 20 + 20 + 20 (bonus) on both sides
/// assert_eq!(state.balance(&alice), 120);
/// assert_eq!(state.balance(&bob), 120);
/// assert_eq!(report.total_bonus_injected(), 40);
/// ```
pub fn apply_round(state: &mut GameState, transfers: &TransferMap) -> SettlementReport {
    let mut total_transferred = 0;

    // Debits: each sender loses their total sent
    for (sender, recipients) in transfers {
        let total_sent: i64 = recipients.values().sum();
        state.apply_delta(sender, -total_sent);
        total_transferred += total_sent;
    }

    // Credits: each recipient gains each amount
    for recipients in transfers.values() {
        for (recipient, amount) in recipients {
            state.apply_delta(recipient, *amount);
        }
    }

    // Bonuses: every unordered pair evaluated exactly once, roster order
    let players: Vec<PlayerId> = state.players().to_vec();
    let mut bonuses = Vec::new();
    for (i, p1) in players.iter().enumerate() {
        for p2 in &players[i + 1..] {
            let sent = amount_between(transfers, p1, p2);
            let received = amount_between(transfers, p2, p1);
            let bonus = sent.min(received);

            if bonus > 0 {
                state.apply_delta(p1, bonus);
                state.apply_delta(p2, bonus);
                bonuses.push(BonusAward {
                    first: p1.clone(),
                    second: p2.clone(),
                    amount: bonus,
                });
            }
        }
    }

    SettlementReport {
        total_transferred,
        bonuses,
    }
}
