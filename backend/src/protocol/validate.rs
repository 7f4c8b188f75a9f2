//! Game-rule validation of parsed payloads
//!
//! Two entry points, one per phase protocol:
//! - messages: `{"recipients": ["name", ...], "message": "text"}`
//! - transfers: `{"name": amount, ...}`
//!
//! The literal token `SKIP` (case-insensitive, trimmed) is always a valid
//! explicit no-op in both protocols. One invalid entry voids an entire
//! submission - partial acceptance is never allowed.

use crate::models::player::PlayerId;
use crate::models::state::GameState;
use crate::protocol::cleanup::clean_and_parse;
use serde_json::Value;
use thiserror::Error;

/// A rule violation in an untrusted response.
///
/// Carries enough detail for an observability channel to reproduce the
/// rejection (the caller supplies sender and raw text).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProtocolViolation {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("JSON parsing error: {0}")]
    InvalidJson(String),

    #[error("missing or ill-typed field: {field}")]
    MissingField { field: &'static str },

    #[error("recipient does not exist: {name}")]
    UnknownRecipient { name: String },

    #[error("player addressed itself")]
    SelfTarget,

    #[error("duplicate recipient: {name}")]
    DuplicateRecipient { name: String },

    #[error("message text is empty")]
    EmptyMessage,

    #[error("recipient list is empty")]
    NoRecipients,

    #[error("invalid amount for {recipient}: {value}")]
    InvalidAmount { recipient: String, value: String },
}

/// Validated outcome of a messaging-phase response
#[derive(Debug, Clone, PartialEq)]
pub enum MessageAction {
    /// Explicit no-op
    Skip,

    /// Send one message to the resolved recipients, in listed order
    Send {
        recipients: Vec<PlayerId>,
        text: String,
    },
}

/// Validated outcome of a transaction-phase response
#[derive(Debug, Clone, PartialEq)]
pub enum TransferAction {
    /// Explicit no-op
    Skip,

    /// Proposed transfers, recipient -> non-negative amount
    Send(std::collections::BTreeMap<PlayerId, i64>),
}

fn is_skip(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("SKIP")
}

/// Resolve a recipient name against the roster and forbid self-targeting
fn resolve_recipient(
    name: &str,
    sender: &PlayerId,
    state: &GameState,
) -> Result<PlayerId, ProtocolViolation> {
    let recipient = state
        .lookup(name)
        .ok_or_else(|| ProtocolViolation::UnknownRecipient {
            name: name.to_string(),
        })?;
    if recipient == sender {
        return Err(ProtocolViolation::SelfTarget);
    }
    Ok(recipient.clone())
}

/// Validate a messaging-phase response.
///
/// Accepts `SKIP` or an object with a non-empty `recipients` string list and
/// a non-empty `message`. Every recipient must be a known player other than
/// the sender; duplicates reject the whole message.
///
/// # Example
/// ```
/// use credit_arena_core_rs::{GameState, PlayerId};
/// use credit_arena_core_rs::protocol::{parse_message_action, MessageAction};
///
/// let state = GameState::new(vec![PlayerId::new("Alice"), PlayerId::new("Bob")], 100);
/// let action = parse_message_action(
///     r#"{"recipients": ["Bob"], "message": "truce?"}"#,
///     &PlayerId::new("Alice"),
///     &state,
/// ).unwrap();
/// assert!(matches!(action, MessageAction::Send { .. }));
/// ```
pub fn parse_message_action(
    raw: &str,
    sender: &PlayerId,
    state: &GameState,
) -> Result<MessageAction, ProtocolViolation> {
    if is_skip(raw) {
        return Ok(MessageAction::Skip);
    }

    let object = clean_and_parse(raw)?;

    let recipients_value = object
        .get("recipients")
        .ok_or(ProtocolViolation::MissingField {
            field: "recipients",
        })?;
    let names = recipients_value
        .as_array()
        .ok_or(ProtocolViolation::MissingField {
            field: "recipients",
        })?;
    if names.is_empty() {
        return Err(ProtocolViolation::NoRecipients);
    }

    let text = object
        .get("message")
        .and_then(Value::as_str)
        .ok_or(ProtocolViolation::MissingField { field: "message" })?
        .trim();
    if text.is_empty() {
        return Err(ProtocolViolation::EmptyMessage);
    }

    let mut recipients = Vec::with_capacity(names.len());
    for name_value in names {
        let name = name_value
            .as_str()
            .ok_or(ProtocolViolation::MissingField {
                field: "recipients",
            })?;
        let recipient = resolve_recipient(name, sender, state)?;
        if recipients.contains(&recipient) {
            return Err(ProtocolViolation::DuplicateRecipient {
                name: name.to_string(),
            });
        }
        recipients.push(recipient);
    }

    Ok(MessageAction::Send {
        recipients,
        text: text.to_string(),
    })
}

/// Validate a transaction-phase response.
///
/// Accepts `SKIP` or an object whose keys are player names and whose values
/// are non-negative integers. Zero amounts are syntactically valid and
/// contribute nothing. Any invalid entry voids the whole submission.
///
/// The sum-vs-balance check is the transaction phase's job, not the
/// validator's: it depends on the sender's current balance at their turn.
pub fn parse_transfer_action(
    raw: &str,
    sender: &PlayerId,
    state: &GameState,
) -> Result<TransferAction, ProtocolViolation> {
    if is_skip(raw) {
        return Ok(TransferAction::Skip);
    }

    let object = clean_and_parse(raw)?;

    let mut transfers = std::collections::BTreeMap::new();
    for (name, amount_value) in &object {
        let recipient = resolve_recipient(name, sender, state)?;

        let amount = amount_value
            .as_i64()
            .filter(|a| *a >= 0)
            .ok_or_else(|| ProtocolViolation::InvalidAmount {
                recipient: name.clone(),
                value: amount_value.to_string(),
            })?;

        transfers.insert(recipient, amount);
    }

    Ok(TransferAction::Send(transfers))
}
