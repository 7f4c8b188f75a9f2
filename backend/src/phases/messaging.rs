//! Messaging Phase Executor
//!
//! For each configured communication cycle: generate a fresh random
//! permutation of the roster, then solicit every player once, in that order,
//! strictly in sequence. Accepted messages append to the in-progress log and
//! are immediately visible to later players in the same cycle. Rejections
//! are reported to the tracing channel and leave no trace in game state -
//! a bad response never aborts the round.

use crate::events::Emitter;
use crate::models::event::GameEvent;
use crate::models::player::Player;
use crate::models::round::Message;
use crate::models::state::GameState;
use crate::orchestrator::{GameConfig, GameError};
use crate::phases::solicit;
use crate::prompt::PromptBuilder;
use crate::protocol::{parse_message_action, MessageAction};
use crate::rng::RngManager;
use tracing::{debug, warn};

/// Run the messaging phase for the current round.
///
/// Returns the round's accepted messages in chronological order.
pub(crate) fn run(
    players: &mut [Player],
    state: &GameState,
    config: &GameConfig,
    prompts: &PromptBuilder,
    rng: &mut RngManager,
    emitter: &mut Emitter<'_>,
) -> Result<Vec<Message>, GameError> {
    let round = state.current_round();
    let mut messages: Vec<Message> = Vec::new();

    for cycle in 0..config.max_communication_cycles {
        let remaining = config.max_communication_cycles - cycle;
        let order = rng.shuffled_indices(players.len());
        debug!(round, cycle = cycle + 1, ?order, "messaging cycle start");

        let mut accepted_this_cycle = 0usize;
        for index in order {
            let player = &mut players[index];
            let sender = player.id().clone();
            let prompt = prompts.messaging_prompt(state, &sender, &messages, remaining);

            let Some(raw) = solicit(player, &prompt, config.fault_policy)? else {
                emitter.emit(GameEvent::MessageSkipped {
                    round,
                    sender,
                });
                continue;
            };

            match parse_message_action(&raw, &sender, state) {
                Ok(MessageAction::Skip) => {
                    emitter.emit(GameEvent::MessageSkipped { round, sender });
                }
                Ok(MessageAction::Send { recipients, text }) => {
                    messages.push(Message::new(sender.clone(), recipients.clone(), text.clone()));
                    accepted_this_cycle += 1;
                    emitter.emit(GameEvent::MessageAccepted {
                        round,
                        sender,
                        recipients,
                        text,
                    });
                }
                Err(violation) => {
                    // Rejections leave no trace in the round record
                    warn!(
                        round,
                        sender = %sender,
                        reason = %violation,
                        raw,
                        "message rejected"
                    );
                }
            }
        }

        // Two-party variant: stop early once a whole cycle goes quiet.
        // The N-player credit game leaves this off and runs every cycle.
        if config.stop_on_idle_cycle && accepted_this_cycle == 0 {
            debug!(round, cycle = cycle + 1, "idle cycle, ending messaging early");
            break;
        }
    }

    Ok(messages)
}
