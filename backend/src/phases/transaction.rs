//! Transaction Phase Executor
//!
//! One solicitation per player in fixed roster order (not shuffled), strictly
//! sequential. Each sender's balance is read at the start of their own turn;
//! because settlement runs only after the whole phase, earlier players'
//! submissions never move a later player's balance mid-phase.
//!
//! A submission whose amounts sum past the sender's current balance is voided
//! entirely - no partial settlement. Every sender still gets an entry in the
//! transfer map (empty on skip or rejection) to simplify downstream
//! iteration.

use crate::events::Emitter;
use crate::models::event::GameEvent;
use crate::models::player::Player;
use crate::models::round::{Message, TransferMap};
use crate::models::state::GameState;
use crate::orchestrator::{GameConfig, GameError};
use crate::phases::solicit;
use crate::prompt::PromptBuilder;
use crate::protocol::{parse_transfer_action, TransferAction};
use std::collections::BTreeMap;
use tracing::warn;

/// Run the transaction phase for the current round.
///
/// Returns the accepted transfer map with one entry per player.
pub(crate) fn run(
    players: &mut [Player],
    state: &GameState,
    config: &GameConfig,
    prompts: &PromptBuilder,
    messages: &[Message],
    emitter: &mut Emitter<'_>,
) -> Result<TransferMap, GameError> {
    let round = state.current_round();
    let mut transfers = TransferMap::new();

    for player in players.iter_mut() {
        let sender = player.id().clone();
        // Rejected and skipped senders keep an empty entry
        transfers.insert(sender.clone(), BTreeMap::new());

        let balance = state.balance(&sender);
        let prompt = prompts.transaction_prompt(state, &sender, messages);

        let Some(raw) = solicit(player, &prompt, config.fault_policy)? else {
            emitter.emit(GameEvent::TransactionSkipped { round, sender });
            continue;
        };

        match parse_transfer_action(&raw, &sender, state) {
            Ok(TransferAction::Skip) => {
                emitter.emit(GameEvent::TransactionSkipped { round, sender });
            }
            Ok(TransferAction::Send(proposed)) => {
                let total: i64 = proposed.values().sum();
                if total > balance {
                    warn!(
                        round,
                        sender = %sender,
                        requested = total,
                        available = balance,
                        "transaction rejected: sum exceeds current balance"
                    );
                    continue;
                }

                for (recipient, amount) in &proposed {
                    emitter.emit(GameEvent::TransactionAccepted {
                        round,
                        sender: sender.clone(),
                        recipient: recipient.clone(),
                        amount: *amount,
                    });
                }
                transfers.insert(sender, proposed);
            }
            Err(violation) => {
                warn!(
                    round,
                    sender = %sender,
                    reason = %violation,
                    raw,
                    "transaction rejected"
                );
            }
        }
    }

    Ok(transfers)
}
