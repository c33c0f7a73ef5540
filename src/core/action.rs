//! Actions, applied turns and player responses.
//!
//! - `Action`: a proposed cut on one live board
//! - `Turn`: an action accepted and applied on behalf of a player
//! - `ActionResponse`: what a player hands back to the engine, optionally
//!   carrying boards whose identity should survive the cut

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::id::BoardId;
use super::player::PlayerInfo;
use crate::board::{Board, Direction, Slice};

/// A proposed slice on one board.
///
/// ```
/// use divinim::core::{Action, BoardId};
/// use divinim::board::Slice;
///
/// let action = Action::new(BoardId::new(50_000), Slice::vertical(2));
/// assert_eq!(action.to_string(), "vertical@2 on 12kw");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    /// Target board.
    pub board: BoardId,

    /// Where to cut it.
    pub slice: Slice,
}

impl Action {
    #[must_use]
    pub const fn new(board: BoardId, slice: Slice) -> Self {
        Self { board, slice }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.slice.direction
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.slice, self.board)
    }
}

/// An applied action. Immutable once recorded in the turn history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    pub player: PlayerInfo,
    pub action: Action,
}

impl Turn {
    #[must_use]
    pub fn new(player: PlayerInfo, action: Action) -> Self {
        Self { player, action }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.player.name, self.action)
    }
}

/// A player's answer to an action request.
///
/// `replacement_boards` are matched by content against the boards the
/// slice produces. A match keeps the replacement's id in the next state.
/// A slice has at most two descendants, so two inline slots cover it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: Action,
    pub replacement_boards: SmallVec<[Board; 2]>,
}

impl ActionResponse {
    /// A bare action with no replacement boards.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            action,
            replacement_boards: SmallVec::new(),
        }
    }

    /// An action plus candidate replacements for its descendants.
    #[must_use]
    pub fn with_replacements(action: Action, boards: impl IntoIterator<Item = Board>) -> Self {
        Self {
            action,
            replacement_boards: boards.into_iter().collect(),
        }
    }
}

impl From<Action> for ActionResponse {
    fn from(action: Action) -> Self {
        Self::new(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardDimensions, TileCoordinate};

    #[test]
    fn test_action_display() {
        let action = Action::new(BoardId::new(46_656), Slice::horizontal(1));
        assert_eq!(action.to_string(), "horizontal@1 on 1000");
        assert_eq!(action.direction(), Direction::Horizontal);
    }

    #[test]
    fn test_turn_display() {
        let turn = Turn::new(
            PlayerInfo::new("a", "Alice", 0),
            Action::new(BoardId::new(46_656), Slice::vertical(3)),
        );
        assert_eq!(turn.to_string(), "Alice: vertical@3 on 1000");
    }

    #[test]
    fn test_response_constructors() {
        let action = Action::new(BoardId::new(1), Slice::vertical(1));
        let bare = ActionResponse::from(action);
        assert_eq!(bare.action, action);
        assert!(bare.replacement_boards.is_empty());

        let board = Board::new(
            BoardId::new(2),
            BoardDimensions::new(1, 3).unwrap(),
            [TileCoordinate::new(0, 2)],
        )
        .unwrap();
        let with = ActionResponse::with_replacements(action, [board.clone()]);
        assert_eq!(with.replacement_boards.as_slice(), &[board]);
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::new(
            PlayerInfo::new("b", "Bob", 1),
            Action::new(BoardId::new(99_999), Slice::horizontal(2)),
        );
        let json = serde_json::to_string(&turn).unwrap();
        let deserialized: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, deserialized);
    }
}
