//! A single sliceable board.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::coord::{BoardDimensions, TileCoordinate};
use super::hash::board_hash;
use super::slice::{Direction, Slice};
use crate::core::BoardId;
use crate::error::BoardError;

/// A rectangle of tiles with some of them marked.
///
/// Every marked coordinate lies inside the dimensions. Marks are kept in an
/// `im::OrdSet`, so cloning a board into a new state is O(1) and iteration
/// order is stable across peers.
///
/// ```
/// use divinim::board::{Board, BoardDimensions, TileCoordinate};
/// use divinim::core::BoardId;
///
/// let dims = BoardDimensions::new(2, 3).unwrap();
/// let board = Board::new(BoardId::new(1), dims, [TileCoordinate::new(1, 2)]).unwrap();
///
/// assert_eq!(board.mark_count(), 1);
/// assert!(!board.is_resolved());
/// assert_eq!(board.available_slices().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    id: BoardId,
    dimensions: BoardDimensions,
    marks: OrdSet<TileCoordinate>,
}

impl Board {
    /// Create a board, checking every mark lies inside the dimensions.
    ///
    /// Duplicate coordinates collapse into one mark.
    pub fn new(
        id: BoardId,
        dimensions: BoardDimensions,
        marks: impl IntoIterator<Item = TileCoordinate>,
    ) -> Result<Self, BoardError> {
        let marks = marks
            .into_iter()
            .map(|coord| dimensions.check(coord))
            .collect::<Result<OrdSet<_>, _>>()?;

        Ok(Self {
            id,
            dimensions,
            marks,
        })
    }

    /// Build a board whose marks are already known to be in bounds.
    pub(crate) fn from_parts(
        id: BoardId,
        dimensions: BoardDimensions,
        marks: OrdSet<TileCoordinate>,
    ) -> Self {
        debug_assert!(marks.iter().all(|c| dimensions.contains(*c)));
        Self {
            id,
            dimensions,
            marks,
        }
    }

    #[must_use]
    pub fn id(&self) -> BoardId {
        self.id
    }

    #[must_use]
    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Marked coordinates in (x, y) order.
    #[must_use]
    pub fn marks(&self) -> &OrdSet<TileCoordinate> {
        &self.marks
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_marked(&self, coord: TileCoordinate) -> bool {
        self.marks.contains(&coord)
    }

    /// A resolved board has no marks, or is a single marked tile.
    ///
    /// Resolved boards never stay in live play. A 2x1 board with both tiles
    /// marked is not resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.marks.is_empty() || (self.dimensions.is_unit() && self.marks.len() == 1)
    }

    /// The same board under a different id.
    #[must_use]
    pub fn with_id(&self, id: BoardId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Same dimensions and marks, regardless of id.
    #[must_use]
    pub fn same_content(&self, other: &Board) -> bool {
        self.dimensions == other.dimensions && self.marks == other.marks
    }

    /// Compact content hash. See [`board_hash`].
    #[must_use]
    pub fn content_hash(&self) -> String {
        board_hash(self)
    }

    /// Every interior cut on this board: vertical lines first, then horizontal.
    #[must_use]
    pub fn available_slices(&self) -> Vec<Slice> {
        let vertical = (1..self.width()).map(|line| Slice::new(Direction::Vertical, line));
        let horizontal = (1..self.height()).map(|line| Slice::new(Direction::Horizontal, line));
        vertical.chain(horizontal).collect()
    }

    /// Number of interior cuts, without building them.
    #[must_use]
    pub fn available_slice_count(&self) -> usize {
        usize::try_from(self.dimensions.interior_line_count()).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Board({} {} marks={})",
            self.id,
            self.dimensions,
            self.marks.len()
        )
    }
}

/// Wire form of a board. Deserializing re-checks mark bounds.
#[derive(Clone, Serialize, Deserialize)]
struct RawBoard {
    id: BoardId,
    dimensions: BoardDimensions,
    marks: Vec<TileCoordinate>,
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            dimensions: board.dimensions,
            marks: board.marks.into_iter().collect(),
        }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::new(raw.id, raw.dimensions, raw.marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> BoardDimensions {
        BoardDimensions::new(width, height).unwrap()
    }

    fn coords(points: &[(u32, u32)]) -> Vec<TileCoordinate> {
        points.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_new_rejects_out_of_bounds_mark() {
        let result = Board::new(BoardId::new(1), dims(2, 2), coords(&[(0, 0), (2, 1)]));
        assert_eq!(
            result,
            Err(BoardError::OutOfBounds {
                x: 2,
                y: 1,
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn test_duplicate_marks_collapse() {
        let board = Board::new(BoardId::new(1), dims(2, 2), coords(&[(1, 1), (1, 1)])).unwrap();
        assert_eq!(board.mark_count(), 1);
    }

    #[test]
    fn test_resolution_rule() {
        let empty = Board::new(BoardId::new(1), dims(3, 3), []).unwrap();
        assert!(empty.is_resolved());

        let unit = Board::new(BoardId::new(2), dims(1, 1), coords(&[(0, 0)])).unwrap();
        assert!(unit.is_resolved());

        let pair = Board::new(BoardId::new(3), dims(2, 1), coords(&[(0, 0), (1, 0)])).unwrap();
        assert!(!pair.is_resolved());

        let single_on_larger = Board::new(BoardId::new(4), dims(1, 3), coords(&[(0, 2)])).unwrap();
        assert!(!single_on_larger.is_resolved());
    }

    #[test]
    fn test_available_slices() {
        let board = Board::new(BoardId::new(1), dims(3, 2), coords(&[(0, 0)])).unwrap();
        let slices = board.available_slices();

        assert_eq!(
            slices,
            vec![
                Slice::new(Direction::Vertical, 1),
                Slice::new(Direction::Vertical, 2),
                Slice::new(Direction::Horizontal, 1),
            ]
        );
        assert_eq!(board.available_slice_count(), 3);
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = Board::new(BoardId::new(1), dims(2, 2), coords(&[(0, 1)])).unwrap();
        let b = a.with_id(BoardId::new(2));

        assert!(a.same_content(&b));
        assert_ne!(a, b);
        assert_eq!(b.id(), BoardId::new(2));
    }

    #[test]
    fn test_serialization_round_trip() {
        let board = Board::new(BoardId::new(77), dims(3, 2), coords(&[(2, 1), (0, 0)])).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_out_of_bounds() {
        let json = r#"{"id":1,"dimensions":{"width":1,"height":1},"marks":[{"x":3,"y":0}]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
