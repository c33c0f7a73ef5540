//! Player records and round-robin turn order.
//!
//! A player's `turn_remainder` is its fixed slot in the rotation: turn `n`
//! belongs to the player whose remainder equals `n mod player_count`.
//! Whoever holds remainder 0 moves first.

use serde::{Deserialize, Serialize};

use super::id::PlayerId;

/// Public information about one seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Session-supplied stable identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Position in round-robin order.
    pub turn_remainder: u32,
}

impl PlayerInfo {
    /// Create a new player record.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, turn_remainder: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            turn_remainder,
        }
    }

    /// Does turn `turn_number` belong to this player?
    #[must_use]
    pub fn owns_turn(&self, turn_number: usize, player_count: usize) -> bool {
        player_count > 0 && (turn_number % player_count) as u32 == self.turn_remainder
    }
}

/// Sort players into turn order.
pub fn sort_by_turn_order(players: &mut [PlayerInfo]) {
    players.sort_by_key(|p| p.turn_remainder);
}
