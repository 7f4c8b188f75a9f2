//! Text-cleanup pipeline for noisy model output
//!
//! Real model responses wrap their JSON in prose, markdown fences and stray
//! escape sequences. The pipeline below must stay byte-for-byte compatible
//! with what the validator was tuned against:
//!
//! 1. Unescape `\"` and `\'`
//! 2. Collapse literal two-character `\n` / `\t` / `\r` sequences to a space
//! 3. Collapse doubled backslashes to one
//! 4. Extract the substring from the first `{` to the next `}` (may span lines)
//! 5. Strict JSON parse of exactly that substring
//!
//! Any failure is a [`ProtocolViolation`], never a crash.

use crate::protocol::validate::ProtocolViolation;
use serde_json::{Map, Value};

/// Strip the escape noise models commonly emit around inline JSON.
///
/// The passes run strictly in the documented order. The escape-marker
/// collapse sees the text before doubled backslashes shrink, so a
/// double-escaped marker like `\\n` ends up as `\ ` and fails the strict
/// parse rather than turning into a valid `\n` escape.
fn sanitize(raw: &str) -> String {
    raw.replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\n", " ")
        .replace("\\t", " ")
        .replace("\\r", " ")
        .replace("\\\\", "\\")
}

/// Extract the first brace-delimited object candidate (non-greedy: first
/// `{` to the first `}` after it)
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text[start..].find('}')?;
    Some(&text[start..start + end + 1])
}

/// Clean raw decision-maker output and parse the embedded JSON object.
///
/// # Example
/// ```
/// use credit_arena_core_rs::protocol::clean_and_parse;
///
/// let noisy = "Sure! Here is my move:\n```json\n{\"Alice\": 10}\n```";
/// let object = clean_and_parse(noisy).unwrap();
/// assert_eq!(object["Alice"], 10);
/// ```
pub fn clean_and_parse(raw: &str) -> Result<Map<String, Value>, ProtocolViolation> {
    let sanitized = sanitize(raw);

    let candidate = extract_object(&sanitized).ok_or(ProtocolViolation::NoJsonObject)?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ProtocolViolation::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        // Unreachable in practice: a parsed `{..}` substring is an object
        _ => Err(ProtocolViolation::InvalidJson("not an object".to_string())),
    }
}
