//! Response validator
//!
//! Converts an arbitrary text blob from a decision-maker into either a
//! typed action or a [`ProtocolViolation`] - never a panic. Malformed input
//! from the untrusted source is a validation outcome, not a system fault.
//!
//! The heuristics live in two isolated stages so they can be tuned
//! independently as model output styles drift:
//! - `cleanup`: unescape, delimiter extraction, strict JSON parse
//! - `validate`: game-rule checks against the roster

pub mod cleanup;
pub mod validate;

pub use cleanup::clean_and_parse;
pub use validate::{
    parse_message_action, parse_transfer_action, MessageAction, ProtocolViolation, TransferAction,
};
