//! Prompt rendering
//!
//! Pure formatting of already-known game state into the text handed to each
//! decision-maker. The engine never parses anything back out of these
//! strings, so wording changes here cannot affect game rules - but the
//! per-player filtering MUST match the visibility contract: a player sees
//! only messages they sent or received, while past transfers are public.

use crate::models::player::PlayerId;
use crate::models::round::Message;
use crate::models::state::GameState;
use std::fmt::Write;

/// Renders game context and phase instructions into prompt text.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    total_rounds: u32,
    initial_balance: i64,
    max_communication_cycles: u32,
}

impl PromptBuilder {
    pub fn new(total_rounds: u32, initial_balance: i64, max_communication_cycles: u32) -> Self {
        Self {
            total_rounds,
            initial_balance,
            max_communication_cycles,
        }
    }

    /// One-time system framing: rules, wire formats and the player's name
    pub fn system_prompt(&self, player: &PlayerId) -> String {
        format!(
            "Game Overview:\n\
             You are a competitive player in a game with simulated participants. \
             Your primary goal is to maximize your credits. The game consists of {rounds} rounds, \
             and you start with {balance} credits.\n\n\
             Game Rules:\n\
             1. Starting Credits: Each player starts with the same number of credits.\n\
             2. Total Rounds: {rounds}\n\
             3. Per Round Actions:\n\
                - Before each round, you may send private messages to other players \
             (up to {cycles} per round).\n\
                - At the end of each round, you can give credits to other players.\n\
                - You cannot exceed your current balance when giving credits.\n\
                - Credits received from others are added to your balance.\n\
                - When you and another player exchange credits mutually, \
             you both receive a bonus equal to the smaller amount exchanged.\n\n\
             Strategy Notes:\n\
                - ONLY the player with the most credits wins.\n\
                - All players are AI entities - deception and strategic alliances are \
             allowed and expected.\n\
                - Monitor past rounds to evaluate alliances and strategies.\n\n\
             IMPORTANT: All responses must be in JSON format or the word 'SKIP'\n\
             For messages: {{\"recipients\": [\"player_name\", ...], \"message\": \"your message\"}}\n\
             For transactions: {{\"player_name\": amount, \"player_name2\": amount2}}\n\
             FOLLOW THE RULES WHEN PROMPTED FOR YOUR RESPONSE, AND AVOID DEVIATIONS.\n\
             YOUR NAME FOR THIS GAME IS: {name}\n",
            rounds = self.total_rounds,
            balance = self.initial_balance,
            cycles = self.max_communication_cycles,
            name = player,
        )
    }

    /// Current standings, with the prompted player marked
    fn game_status(&self, state: &GameState, player: &PlayerId) -> String {
        let mut out = format!(
            "Game Status:\n- Total Rounds: {}\n- Current Round: {}\n- Current Rankings (by balance):\n",
            self.total_rounds,
            state.current_round(),
        );
        for (position, (ranked, balance)) in state.standings().iter().enumerate() {
            let marker = if ranked == player { "→" } else { " " };
            let _ = writeln!(
                out,
                "  {}. {} {}: {} credits",
                position + 1,
                marker,
                ranked,
                balance
            );
        }
        let _ = writeln!(out, "\nREMEMBER: You are {}.", player);
        out
    }

    /// Past rounds: the player's own messages plus everyone's transfers
    fn game_history(&self, state: &GameState, player: &PlayerId) -> String {
        if state.history().is_empty() {
            return "\nHistory of Rounds So Far: None, it is the first round.\n".to_string();
        }

        let mut out = "\nHistory of Rounds So Far:\n".to_string();
        for round in state.history() {
            let _ = writeln!(out, "\nRound {}:", round.number());
            out.push_str(
                "Messages you've sent or received (visible only to you and the other party):\n",
            );

            let mut any = false;
            for message in round.messages_visible_to(player) {
                any = true;
                let _ = writeln!(
                    out,
                    "  - {} sent to {}: '{}'",
                    message.sender(),
                    join_names(message.recipients()),
                    message.text()
                );
            }
            if !any {
                out.push_str("  None\n");
            }

            out.push_str("Transactions placed by ALL players (visible to everyone):\n");
            for (sender, recipients) in round.transfers() {
                for (recipient, amount) in recipients {
                    let _ = writeln!(out, "  - {} sent {} credits to {}", sender, amount, recipient);
                }
            }
        }
        out
    }

    /// This round's messages so far, filtered to the player
    fn current_round_messages(
        &self,
        state: &GameState,
        player: &PlayerId,
        ongoing: &[Message],
    ) -> String {
        let mut out = format!("\nWe are now running round {}:\n\n", state.current_round());
        out.push_str(
            "Messages you've sent or received this round (visible only to you and the other party, newest last):\n",
        );

        let visible: Vec<&Message> = ongoing.iter().filter(|m| m.visible_to(player)).collect();
        if visible.is_empty() {
            out.push_str("  None yet\n");
        } else {
            for message in visible {
                let _ = writeln!(
                    out,
                    "  - {} sent to {}: '{}'",
                    message.sender(),
                    join_names(message.recipients()),
                    message.text()
                );
            }
        }
        out
    }

    fn remaining_rounds(&self, state: &GameState) -> u32 {
        self.total_rounds.saturating_sub(state.current_round())
    }

    /// Full messaging-phase prompt for one solicitation
    pub fn messaging_prompt(
        &self,
        state: &GameState,
        player: &PlayerId,
        ongoing: &[Message],
        remaining_messages: u32,
    ) -> String {
        let mut out = self.game_status(state, player);
        out.push_str(&self.game_history(state, player));
        out.push_str(&self.current_round_messages(state, player, ongoing));
        let _ = write!(
            out,
            "\nIt's time to send a message (optional). Facts for your strategy:\n\
             - In this round, you have {} message(s) left after this one\n\
             - There are {} round(s) remaining after this one\n\n\
             Message Rules:\n\
             1. You can address one or more players in a single message\n\
             2. Respond with a JSON formatted string containing 'recipients' and 'message', or type 'SKIP'\n\
                Example: {{\"recipients\": [\"player_name\"], \"message\": \"your message\"}}\n\n\
             Your message will be rejected if you use anything other than a JSON formatted string or 'SKIP'.\n\
             Your message: ",
            remaining_messages.saturating_sub(1),
            self.remaining_rounds(state),
        );
        out
    }

    /// Full transaction-phase prompt for one solicitation
    pub fn transaction_prompt(
        &self,
        state: &GameState,
        player: &PlayerId,
        ongoing: &[Message],
    ) -> String {
        let balance = state.balance(player);
        let mut out = self.game_status(state, player);
        out.push_str(&self.game_history(state, player));
        out.push_str(&self.current_round_messages(state, player, ongoing));
        let _ = write!(
            out,
            "\nThe messaging phase is complete. It is time to place your transactions. \
             Your current balance is {balance} credits.\n\
             There are {} round(s) remaining after this one.\n\n\
             Transaction Rules:\n\
             1. Specify your transactions with a JSON formatted string or type 'SKIP' to pass\n\
                Example: {{\"player_name\": amount, \"player_name2\": amount2}}\n\
                You can send to one, multiple, or all players - you have only one attempt\n\n\
             2. Your transactions WILL BE REJECTED if:\n\
                - You use anything other than a JSON formatted string or 'SKIP'\n\
                - You attempt to give more credits than your current balance ({balance})\n\n\
             Your response: ",
            self.remaining_rounds(state),
        );
        out
    }
}

fn join_names(players: &[PlayerId]) -> String {
    players
        .iter()
        .map(PlayerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
