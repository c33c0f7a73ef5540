//! Identifiers for boards, players and game instances.
//!
//! ## BoardId
//!
//! Boards get short, randomly generated ids that render in base 36 so a
//! human can scan them in logs (`"k3f9q"`). They are collision-tolerant,
//! not secure: the engine re-rolls an id only when it clashes with a board
//! that is currently live.
//!
//! ```
//! use divinim::core::BoardId;
//!
//! let id = BoardId::new(1_234_567);
//! assert_eq!(id.to_string(), "qglj");
//! assert_eq!("qglj".parse::<BoardId>().unwrap(), id);
//! ```
//!
//! ## PlayerId
//!
//! Player ids are supplied by the session layer and never generated here.
//! The core does not check them for uniqueness or authenticity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render an integer in lowercase base 36.
pub(crate) fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

/// Identifier of a live board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardId(pub u32);

impl BoardId {
    /// Create a board ID from its raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_base36(u64::from(self.0)))
    }
}

impl FromStr for BoardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str_radix(s, 36).map(Self)
    }
}

impl From<u32> for BoardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Stable per-player identifier supplied by the session layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Tags one engine instance.
///
/// Messages and resolved requests carry the id of the game they belong to,
/// so anything arriving after a restart can be told apart and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a game ID from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Draw a fresh game ID from the thread RNG.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({:016x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_rendering() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::from(u32::MAX)), "1z141z3");
    }

    #[test]
    fn test_board_id_parse_round_trip() {
        for raw in [0, 1, 35, 36, 1_679_616, u32::MAX] {
            let id = BoardId::new(raw);
            assert_eq!(id.to_string().parse::<BoardId>().unwrap(), id);
        }
    }

    #[test]
    fn test_board_id_rejects_garbage() {
        assert!("not-an-id".parse::<BoardId>().is_err());
    }

    #[test]
    fn test_player_id_display() {
        let id = PlayerId::new("alice-7");
        assert_eq!(id.as_str(), "alice-7");
        assert_eq!(format!("{}", id), "alice-7");
        assert_eq!(PlayerId::from("alice-7"), id);
    }

    #[test]
    fn test_game_id_display() {
        assert_eq!(format!("{}", GameId::new(255)), "Game(00000000000000ff)");
    }

    #[test]
    fn test_serialization() {
        let id = BoardId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BoardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
