//! Player identity and roster entries
//!
//! Identity is a small value type (`PlayerId`, an interned name) used as the
//! map key everywhere. The richer record (`Player`) pairs an identity with
//! its bound decision-maker and lives only in the game roster, so the "same"
//! player can never be constructed in two places with diverging state.

use crate::decision::DecisionMaker;
use std::fmt;
use std::sync::Arc;

/// Opaque player identity.
///
/// Cheap to clone, compared and hashed by name. Two ids with the same name
/// are the same entity.
///
/// # Example
/// ```
/// use credit_arena_core_rs::PlayerId;
///
/// let a = PlayerId::new("Alice");
/// let b = PlayerId::new("Alice");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(Arc<str>);

impl PlayerId {
    /// Create an identity from a player name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The player's name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A participant: identity plus its bound external decision-maker.
///
/// Created once at game setup; the identity is immutable for the game's
/// lifetime. The decision-maker handle is opaque to the engine - given a
/// prompt it returns untrusted free text, possibly slowly.
pub struct Player {
    id: PlayerId,
    brain: Box<dyn DecisionMaker>,
}

impl Player {
    /// Create a player with the given name and decision-maker
    pub fn new(name: impl AsRef<str>, brain: Box<dyn DecisionMaker>) -> Self {
        Self {
            id: PlayerId::new(name),
            brain,
        }
    }

    /// The player's identity
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Mutable access to the bound decision-maker
    pub(crate) fn brain_mut(&mut self) -> &mut dyn DecisionMaker {
        self.brain.as_mut()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("id", &self.id).finish()
    }
}
