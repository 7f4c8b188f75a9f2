//! Phase executors
//!
//! A round is two phases run back to back: messaging, then transactions.
//! Both iterate players strictly sequentially - one solicitation completes
//! (including its possibly slow external call) before the next player's turn
//! begins, so "current balance" and "messages so far" are always unambiguous,
//! monotonically-growing views.

pub mod messaging;
pub mod transaction;

use crate::decision::FaultPolicy;
use crate::models::player::Player;
use crate::orchestrator::GameError;
use tracing::warn;

/// Solicit one response from a player's decision-maker under the configured
/// fault policy.
///
/// Returns `Ok(None)` when a tolerated fault exhausts its retry budget - the
/// caller treats that as an implicit SKIP. Under `FaultPolicy::Abort` the
/// first fault propagates as a game-ending error.
pub(crate) fn solicit(
    player: &mut Player,
    prompt: &str,
    policy: FaultPolicy,
) -> Result<Option<String>, GameError> {
    let attempts = match policy {
        FaultPolicy::Abort => 1,
        FaultPolicy::SkipAfterRetries { retries } => 1 + retries,
    };

    let mut remaining = attempts;
    loop {
        match player.brain_mut().decide(prompt) {
            Ok(response) => return Ok(Some(response)),
            Err(source) => {
                remaining -= 1;
                warn!(
                    player = %player.id(),
                    remaining,
                    error = %source,
                    "decision-maker call failed"
                );
                if remaining == 0 {
                    return match policy {
                        FaultPolicy::Abort => Err(GameError::DecisionFault {
                            player: player.id().clone(),
                            source,
                        }),
                        FaultPolicy::SkipAfterRetries { .. } => {
                            warn!(
                                player = %player.id(),
                                "retry budget exhausted, treating turn as SKIP"
                            );
                            Ok(None)
                        }
                    };
                }
            }
        }
    }
}
