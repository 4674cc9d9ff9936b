//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a player (used in matches, seeds and lookups).
pub type PlayerId = String;

/// A player on the roster. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
        }
    }
}
