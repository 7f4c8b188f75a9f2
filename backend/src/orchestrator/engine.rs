//! Game engine - configuration, validation and the round loop
//!
//! The `Game` owns all state and coordinates:
//! - Messaging phase (N communication cycles, shuffled order)
//! - Transaction phase (fixed order, balance-capped submissions)
//! - Settlement (debits, credits, mutual-exchange bonuses)
//! - Round recording (history is appended only after settlement, so readers
//!   never observe a partially-settled round)
//! - Lifecycle event fan-out to observers and the event log
//!
//! # Determinism
//!
//! Player shuffles come from a seeded xorshift64* generator; with scripted
//! decision-makers, same seed + same config = identical transcript.
//!
//! # Example
//!
//! ```
//! use credit_arena_core_rs::{Game, GameConfig, Player, ScriptedDecisionMaker};
//!
//! let config = GameConfig {
//!     total_rounds: 1,
//!     initial_balance: 100,
//!     max_communication_cycles: 1,
//!     ..GameConfig::default()
//! };
//!
//! let players = vec![
//!     Player::new("Alice", Box::new(ScriptedDecisionMaker::new(vec!["SKIP", "{\"Bob\": 10}"]))),
//!     Player::new("Bob", Box::new(ScriptedDecisionMaker::new(vec!["SKIP", "SKIP"]))),
//! ];
//!
//! let mut game = Game::new(players, config).unwrap();
//! let final_balances = game.run().unwrap();
//! assert_eq!(final_balances[0].1 + final_balances[1].1, 200);
//! ```

use crate::decision::{DecisionError, FaultPolicy};
use crate::events::{Emitter, GameObserver};
use crate::models::event::{EventLog, GameEvent};
use crate::models::player::{Player, PlayerId};
use crate::models::round::GameRound;
use crate::models::state::GameState;
use crate::phases::{messaging, transaction};
use crate::prompt::PromptBuilder;
use crate::rng::RngManager;
use crate::settlement;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Complete game configuration, read-only after construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rounds the game runs; there is no early termination
    pub total_rounds: u32,

    /// Starting balance for every player (credits)
    pub initial_balance: i64,

    /// Communication cycles per round (one solicitation per player each)
    pub max_communication_cycles: u32,

    /// Seed for the deterministic player-order shuffles
    pub rng_seed: u64,

    /// How decision-maker call faults are treated
    #[serde(skip)]
    pub fault_policy: FaultPolicy,

    /// End the messaging phase once a whole cycle accepts no messages.
    /// Off for the credit game; the two-party variant turns it on.
    pub stop_on_idle_cycle: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: 10,
            initial_balance: 100,
            max_communication_cycles: 3,
            rng_seed: 0x5EED,
            fault_policy: FaultPolicy::default(),
            stop_on_idle_cycle: false,
        }
    }
}

/// Game-level error types
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("decision-maker fault for player {player}")]
    DecisionFault {
        player: PlayerId,
        #[source]
        source: DecisionError,
    },
}

/// The full game: state, roster, configuration and observers.
pub struct Game {
    state: GameState,
    players: Vec<Player>,
    config: GameConfig,
    prompts: PromptBuilder,
    rng: RngManager,
    observers: Vec<Box<dyn GameObserver>>,
    event_log: EventLog,
}

impl Game {
    /// Create a game from a roster and configuration.
    ///
    /// Validates the configuration and sends each decision-maker its
    /// one-time system framing message. Fails fast before any turn-level
    /// player interaction occurs.
    pub fn new(players: Vec<Player>, config: GameConfig) -> Result<Self, GameError> {
        Self::validate(&players, &config)?;

        let roster: Vec<PlayerId> = players.iter().map(|p| p.id().clone()).collect();
        let state = GameState::new(roster, config.initial_balance);
        let prompts = PromptBuilder::new(
            config.total_rounds,
            config.initial_balance,
            config.max_communication_cycles,
        );
        let rng = RngManager::new(config.rng_seed);

        let mut game = Self {
            state,
            players,
            config,
            prompts,
            rng,
            observers: Vec::new(),
            event_log: EventLog::new(),
        };

        // One-time framing; never re-sent per turn
        for player in &mut game.players {
            let system_prompt = game.prompts.system_prompt(player.id());
            player.brain_mut().set_system_prompt(&system_prompt);
        }

        Ok(game)
    }

    fn validate(players: &[Player], config: &GameConfig) -> Result<(), GameError> {
        if config.total_rounds == 0 {
            return Err(GameError::InvalidConfig(
                "total_rounds must be > 0".to_string(),
            ));
        }
        if config.initial_balance < 0 {
            return Err(GameError::InvalidConfig(
                "initial_balance must be >= 0".to_string(),
            ));
        }
        if players.len() < 2 {
            return Err(GameError::InvalidConfig(
                "must have at least two players".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for player in players {
            if player.id().as_str().trim().is_empty() {
                return Err(GameError::InvalidConfig(
                    "player names must be non-empty".to_string(),
                ));
            }
            if !names.insert(player.id().clone()) {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate player name: {}",
                    player.id()
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current game state (balances, history, round counter)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The configuration this game was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// All lifecycle events emitted so far
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Subscribe an observer to all lifecycle events
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    // ========================================================================
    // Round Loop
    // ========================================================================

    /// Run the full game and return final balances in standings order.
    pub fn run(&mut self) -> Result<Vec<(PlayerId, i64)>, GameError> {
        Emitter::new(&mut self.observers, &mut self.event_log).emit(GameEvent::GameStarted {
            total_rounds: self.config.total_rounds,
            initial_balance: self.config.initial_balance,
            players: self.state.players().to_vec(),
        });

        for _ in 0..self.config.total_rounds {
            self.conduct_round()?;
        }

        let final_balances = self.state.standings();
        Emitter::new(&mut self.observers, &mut self.event_log).emit(GameEvent::GameEnded {
            round: self.state.current_round(),
            final_balances: final_balances.clone(),
        });

        Ok(final_balances)
    }

    /// Conduct one full round: messaging, transactions, settlement, record.
    fn conduct_round(&mut self) -> Result<(), GameError> {
        self.state.increment_round();
        let round = self.state.current_round();

        let mut emitter = Emitter::new(&mut self.observers, &mut self.event_log);
        emitter.emit(GameEvent::RoundStarted { round });

        let messages = messaging::run(
            &mut self.players,
            &self.state,
            &self.config,
            &self.prompts,
            &mut self.rng,
            &mut emitter,
        )?;

        let transfers = transaction::run(
            &mut self.players,
            &self.state,
            &self.config,
            &self.prompts,
            &messages,
            &mut emitter,
        )?;

        let report = settlement::apply_round(&mut self.state, &transfers);
        let mut emitter = Emitter::new(&mut self.observers, &mut self.event_log);
        for bonus in &report.bonuses {
            emitter.emit(GameEvent::BonusApplied {
                round,
                first: bonus.first.clone(),
                second: bonus.second.clone(),
                amount: bonus.amount,
            });
        }

        // Only now does the round become visible to history readers
        self.state
            .record_round(GameRound::new(round, transfers, messages));

        Emitter::new(&mut self.observers, &mut self.event_log).emit(GameEvent::RoundEnded {
            round,
            standings: self.state.standings(),
        });

        Ok(())
    }
}
