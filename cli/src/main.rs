//! Demo runner for the credit exchange game.
//!
//! Plays a short scripted game on the console so the whole pipeline can be
//! exercised without binding a real decision backend: messaging cycles,
//! transaction submissions, settlement with mutual-exchange bonuses, and the
//! final standings.

use credit_arena_core_rs::{
    Game, GameConfig, GameObserver, Player, PlayerId, ScriptedDecisionMaker,
};

/// Prints every lifecycle event as a human-readable line.
struct ConsolePrinter;

impl GameObserver for ConsolePrinter {
    fn on_game_started(&mut self, total_rounds: u32, initial_balance: i64, players: &[PlayerId]) {
        let names: Vec<&str> = players.iter().map(PlayerId::as_str).collect();
        println!(
            "=== Game start: {} rounds, {} credits each, players: {} ===",
            total_rounds,
            initial_balance,
            names.join(", ")
        );
    }

    fn on_round_started(&mut self, round: u32) {
        println!("\n--- Round {round} ---");
    }

    fn on_message_accepted(&mut self, sender: &PlayerId, recipients: &[PlayerId], text: &str) {
        let names: Vec<&str> = recipients.iter().map(PlayerId::as_str).collect();
        println!("  [msg] {} -> {}: {}", sender, names.join(", "), text);
    }

    fn on_message_skipped(&mut self, sender: &PlayerId) {
        println!("  [msg] {sender} passes");
    }

    fn on_transaction_accepted(&mut self, sender: &PlayerId, recipient: &PlayerId, amount: i64) {
        println!("  [txn] {sender} sends {amount} to {recipient}");
    }

    fn on_transaction_skipped(&mut self, sender: &PlayerId) {
        println!("  [txn] {sender} holds");
    }

    fn on_bonus_applied(&mut self, first: &PlayerId, second: &PlayerId, amount: i64) {
        println!("  [bonus] {first} and {second} each gain {amount} for mutual exchange");
    }

    fn on_round_ended(&mut self, round: u32, standings: &[(PlayerId, i64)]) {
        println!("  Round {round} standings:");
        for (player, balance) in standings {
            println!("    {player}: {balance}");
        }
    }

    fn on_game_ended(&mut self, final_balances: &[(PlayerId, i64)]) {
        println!("\n=== Final standings ===");
        for (rank, (player, balance)) in final_balances.iter().enumerate() {
            println!("  {}. {player}: {balance} credits", rank + 1);
        }
    }
}

fn demo_players() -> Vec<Player> {
    // Each script alternates messaging-cycle responses with one transaction
    // response per round. Alice and Bob trade with each other; Carol hoards.
    let alice = ScriptedDecisionMaker::new(vec![
        r#"{"recipients": ["Bob"], "message": "I will send you 20 if you reciprocate."}"#,
        "SKIP",
        r#"{"Bob": 20}"#,
        "SKIP",
        "SKIP",
        r#"{"Bob": 20}"#,
    ]);
    let bob = ScriptedDecisionMaker::new(vec![
        r#"{"recipients": ["Alice"], "message": "Deal. 20 for 20, every round."}"#,
        "SKIP",
        r#"{"Alice": 20}"#,
        "SKIP",
        "SKIP",
        r#"{"Alice": 20}"#,
    ]);
    let carol = ScriptedDecisionMaker::new(vec![
        r#"{"recipients": ["Alice", "Bob"], "message": "I am keeping my credits, good luck."}"#,
        "SKIP",
        "SKIP",
    ]);

    vec![
        Player::new("Alice", Box::new(alice)),
        Player::new("Bob", Box::new(bob)),
        Player::new("Carol", Box::new(carol)),
    ]
}

/// Load a `GameConfig` from a JSON file; missing fields take defaults.
fn load_config(path: &str) -> Result<GameConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("parse {path}: {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Optional first argument: path to a config JSON
    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load config: {err}");
                std::process::exit(1);
            }
        },
        None => GameConfig {
            total_rounds: 2,
            initial_balance: 100,
            max_communication_cycles: 2,
            ..GameConfig::default()
        },
    };

    let mut game = match Game::new(demo_players(), config) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("failed to set up game: {err}");
            std::process::exit(1);
        }
    };
    game.add_observer(Box::new(ConsolePrinter));

    match game.run() {
        Ok(_) => {
            println!("\n{} events recorded", game.event_log().len());
        }
        Err(err) => {
            eprintln!("game aborted: {err}");
            std::process::exit(1);
        }
    }
}
