//! Per-round records: messages, transfers and the immutable round snapshot
//!
//! A `GameRound` is created once at round end and never modified afterwards.
//! Only accepted effects appear here; rejected submissions leave no trace.
//!
//! CRITICAL: All credit values are i64

use crate::models::player::PlayerId;
use std::collections::BTreeMap;

/// Accepted transfers for one round: sender -> (recipient -> amount).
///
/// Every player appears as a sender key, with an empty inner map when their
/// submission was skipped or rejected. Amounts are non-negative; zero-amount
/// entries are legal and contribute nothing.
pub type TransferMap = BTreeMap<PlayerId, BTreeMap<PlayerId, i64>>;

/// An accepted private message.
///
/// Visible only to the sender and the listed recipients; everyone else's
/// context must never contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: PlayerId,
    recipients: Vec<PlayerId>,
    text: String,
}

impl Message {
    /// Create a message. Recipients are already validated and ordered.
    pub fn new(sender: PlayerId, recipients: Vec<PlayerId>, text: String) -> Self {
        Self {
            sender,
            recipients,
            text,
        }
    }

    pub fn sender(&self) -> &PlayerId {
        &self.sender
    }

    pub fn recipients(&self) -> &[PlayerId] {
        &self.recipients
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the given player is allowed to see this message
    pub fn visible_to(&self, player: &PlayerId) -> bool {
        self.sender == *player || self.recipients.contains(player)
    }
}

/// Immutable record of one completed round.
///
/// Round numbers are 1-indexed, monotonically increasing and gapless in the
/// game history.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRound {
    number: u32,
    transfers: TransferMap,
    messages: Vec<Message>,
}

impl GameRound {
    /// Create the record for a settled round
    pub fn new(number: u32, transfers: TransferMap, messages: Vec<Message>) -> Self {
        Self {
            number,
            transfers,
            messages,
        }
    }

    /// 1-indexed round number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Accepted transfers, every sender present
    pub fn transfers(&self) -> &TransferMap {
        &self.transfers
    }

    /// Accepted messages in chronological order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Amount sent from one player to another this round (0 if none)
    pub fn amount_sent(&self, sender: &PlayerId, recipient: &PlayerId) -> i64 {
        self.transfers
            .get(sender)
            .and_then(|m| m.get(recipient))
            .copied()
            .unwrap_or(0)
    }

    /// Messages the given player sent or received, in order.
    ///
    /// The id is cloned into the iterator, so callers may pass a temporary.
    pub fn messages_visible_to<'a>(
        &'a self,
        player: &PlayerId,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        let player = player.clone();
        self.messages
            .iter()
            .filter(move |m| m.visible_to(&player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    #[test]
    fn test_message_visibility() {
        let msg = Message::new(id("A"), vec![id("B"), id("C")], "hi".to_string());

        assert!(msg.visible_to(&id("A")));
        assert!(msg.visible_to(&id("B")));
        assert!(msg.visible_to(&id("C")));
        assert!(!msg.visible_to(&id("D")));
    }

    #[test]
    fn test_amount_sent_defaults_to_zero() {
        let mut transfers = TransferMap::new();
        transfers.insert(id("A"), BTreeMap::from([(id("B"), 25)]));
        transfers.insert(id("B"), BTreeMap::new());

        let round = GameRound::new(1, transfers, vec![]);

        assert_eq!(round.amount_sent(&id("A"), &id("B")), 25);
        assert_eq!(round.amount_sent(&id("B"), &id("A")), 0);
        assert_eq!(round.amount_sent(&id("C"), &id("A")), 0);
    }

    #[test]
    fn test_messages_visible_to_filters_third_parties() {
        let messages = vec![
            Message::new(id("A"), vec![id("B")], "for B".to_string()),
            Message::new(id("B"), vec![id("C")], "for C".to_string()),
        ];
        let round = GameRound::new(1, TransferMap::new(), messages);

        // The id arguments are temporaries; the iterators must not hold them
        let seen: Vec<_> = round.messages_visible_to(&id("A")).collect();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].text(), "for B");

        let mut seen_by_b = round.messages_visible_to(&id("B"));
        assert_eq!(seen_by_b.next().map(Message::text), Some("for B"));
        assert_eq!(seen_by_b.next().map(Message::text), Some("for C"));
        assert_eq!(seen_by_b.next().map(Message::text), None);
    }
}
