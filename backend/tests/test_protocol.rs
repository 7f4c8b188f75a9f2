//! Integration tests for the untrusted-response protocol pipeline
//!
//! Exercises cleanup and validation together on the kind of noisy output
//! real model backends produce: markdown fences, surrounding prose, stray
//! escape sequences. Only the exact documented formats may reach game state.

use credit_arena_core_rs::protocol::{
    clean_and_parse, parse_message_action, parse_transfer_action,
};
use credit_arena_core_rs::{GameState, MessageAction, PlayerId, ProtocolViolation, TransferAction};

// ============================================================================
// Helper Functions
// ============================================================================

fn id(name: &str) -> PlayerId {
    PlayerId::new(name)
}

fn state() -> GameState {
    GameState::new(vec![id("Alice"), id("Bob"), id("Carol")], 100)
}

// ============================================================================
// Cleanup: noisy model output
// ============================================================================

#[test]
fn test_markdown_fenced_transfer_parses() {
    let raw = "Here is my decision:\n```json\n{\"Bob\": 25}\n```\nGood luck everyone!";

    let action = parse_transfer_action(raw, &id("Alice"), &state()).unwrap();

    assert_eq!(
        action,
        TransferAction::Send([(id("Bob"), 25)].into_iter().collect())
    );
}

#[test]
fn test_prose_wrapped_message_parses() {
    let raw = concat!(
        "Sure, I want to coordinate with Bob. ",
        r#"{"recipients": ["Bob"], "message": "Send me 10 and I will match it."}"#,
        " Let me know if that works."
    );

    let action = parse_message_action(raw, &id("Alice"), &state()).unwrap();

    match action {
        MessageAction::Send { recipients, text } => {
            assert_eq!(recipients, vec![id("Bob")]);
            assert_eq!(text, "Send me 10 and I will match it.");
        }
        other => panic!("expected Send, got {other:?}"),
    }
}

#[test]
fn test_escaped_json_from_double_serialization() {
    // Some backends return JSON that was string-escaped a second time
    let raw = "{\\\"recipients\\\": [\\\"Bob\\\"], \\\"message\\\": \\\"truce\\\"}";

    let action = parse_message_action(raw, &id("Alice"), &state()).unwrap();

    assert!(matches!(action, MessageAction::Send { .. }));
}

#[test]
fn test_literal_newline_markers_inside_object() {
    let raw = "{\\n  \"Bob\": 10,\\n  \"Carol\": 5\\n}";

    let action = parse_transfer_action(raw, &id("Alice"), &state()).unwrap();

    assert_eq!(
        action,
        TransferAction::Send(
            [(id("Bob"), 10), (id("Carol"), 5)].into_iter().collect()
        )
    );
}

#[test]
fn test_clean_and_parse_takes_first_object_only() {
    let map = clean_and_parse("ignore this {\"Bob\": 1} and this {\"Carol\": 2}").unwrap();

    assert!(map.contains_key("Bob"));
    assert!(!map.contains_key("Carol"));
}

#[test]
fn test_refusal_text_is_a_clean_violation() {
    let raw = "I don't think I should participate in this round.";

    assert_eq!(
        parse_message_action(raw, &id("Alice"), &state()).unwrap_err(),
        ProtocolViolation::NoJsonObject
    );
    assert_eq!(
        parse_transfer_action(raw, &id("Alice"), &state()).unwrap_err(),
        ProtocolViolation::NoJsonObject
    );
}

// ============================================================================
// Validation: rules shared across both protocols
// ============================================================================

#[test]
fn test_skip_token_is_always_accepted() {
    for raw in ["SKIP", "skip", "Skip", "  sKiP\n"] {
        assert_eq!(
            parse_message_action(raw, &id("Bob"), &state()).unwrap(),
            MessageAction::Skip
        );
        assert_eq!(
            parse_transfer_action(raw, &id("Bob"), &state()).unwrap(),
            TransferAction::Skip
        );
    }
}

#[test]
fn test_single_recipient_key_is_not_the_message_protocol() {
    // The message protocol requires a `recipients` list; the old
    // one-recipient shape must be rejected, not silently upgraded
    let raw = r#"{"recipient": "Bob", "message": "hello"}"#;

    assert_eq!(
        parse_message_action(raw, &id("Alice"), &state()).unwrap_err(),
        ProtocolViolation::MissingField {
            field: "recipients"
        }
    );
}

#[test]
fn test_whole_submission_voided_by_one_bad_entry() {
    let raw = r#"{"Bob": 10, "Nobody": 5}"#;

    assert!(matches!(
        parse_transfer_action(raw, &id("Alice"), &state()).unwrap_err(),
        ProtocolViolation::UnknownRecipient { .. }
    ));
}

#[test]
fn test_group_message_resolves_recipients_in_listed_order() {
    let raw = r#"{"recipients": ["Carol", "Bob"], "message": "both of you"}"#;

    let action = parse_message_action(raw, &id("Alice"), &state()).unwrap();

    match action {
        MessageAction::Send { recipients, .. } => {
            assert_eq!(recipients, vec![id("Carol"), id("Bob")]);
        }
        other => panic!("expected Send, got {other:?}"),
    }
}
