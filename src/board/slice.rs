//! The slice algorithm.
//!
//! A slice cuts along an interior grid line. `Horizontal` lines run between
//! rows (`1..height`), `Vertical` lines between columns (`1..width`). Line 0
//! and line `dimension` are the border, not the interior, and are rejected.
//!
//! The tiles before the line become the *reduced* board (top or left), the
//! tiles from the line onward become the *child* board (bottom or right),
//! re-expressed relative to the child's own origin.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::Board;
use super::coord::{BoardDimensions, TileCoordinate};
use crate::core::BoardId;
use crate::error::SliceError;

/// Orientation of the cut line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Cut between two rows.
    Horizontal,
    /// Cut between two columns.
    Vertical,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Horizontal => write!(f, "horizontal"),
            Direction::Vertical => write!(f, "vertical"),
        }
    }
}

/// One interior cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slice {
    pub direction: Direction,
    pub line: u32,
}

impl Slice {
    #[must_use]
    pub const fn new(direction: Direction, line: u32) -> Self {
        Self { direction, line }
    }

    #[must_use]
    pub const fn horizontal(line: u32) -> Self {
        Self::new(Direction::Horizontal, line)
    }

    #[must_use]
    pub const fn vertical(line: u32) -> Self {
        Self::new(Direction::Vertical, line)
    }

    /// The side length this slice cuts across.
    #[must_use]
    pub const fn relevant_dimension(self, dimensions: BoardDimensions) -> u32 {
        match self.direction {
            Direction::Horizontal => dimensions.height(),
            Direction::Vertical => dimensions.width(),
        }
    }

    /// Check the line is interior for the given dimensions.
    pub fn validate(self, dimensions: BoardDimensions) -> Result<(), SliceError> {
        let dimension = self.relevant_dimension(dimensions);
        if self.line < 1 || self.line >= dimension {
            return Err(SliceError::LineOutOfBounds {
                direction: self.direction,
                line: self.line,
                dimension,
            });
        }
        Ok(())
    }

    /// Coordinate along the cut axis.
    const fn axis(self, coord: TileCoordinate) -> u32 {
        match self.direction {
            Direction::Horizontal => coord.y,
            Direction::Vertical => coord.x,
        }
    }

    /// Move a child-side coordinate to the child's origin.
    const fn shift(self, coord: TileCoordinate) -> TileCoordinate {
        match self.direction {
            Direction::Horizontal => TileCoordinate::new(coord.x, coord.y - self.line),
            Direction::Vertical => TileCoordinate::new(coord.x - self.line, coord.y),
        }
    }

    /// Dimensions of the (reduced, child) descendants. Call only after `validate`.
    fn split_dimensions(self, dimensions: BoardDimensions) -> (BoardDimensions, BoardDimensions) {
        let (w, h) = (dimensions.width(), dimensions.height());
        match self.direction {
            Direction::Horizontal => (
                BoardDimensions::from_nonzero(w, self.line),
                BoardDimensions::from_nonzero(w, h - self.line),
            ),
            Direction::Vertical => (
                BoardDimensions::from_nonzero(self.line, h),
                BoardDimensions::from_nonzero(w - self.line, h),
            ),
        }
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.direction, self.line)
    }
}

/// The surviving descendants of a slice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceBoards {
    /// Top (horizontal) or left (vertical) descendant, `None` if resolved away.
    pub reduced: Option<Board>,
    /// Bottom (horizontal) or right (vertical) descendant, `None` if resolved away.
    pub child: Option<Board>,
}

/// Everything a slice produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceResult {
    pub boards: SliceBoards,
    /// Descendants that left play, in (reduced, child) order.
    pub removed: SmallVec<[Board; 2]>,
}

impl SliceResult {
    /// Surviving boards, reduced first.
    pub fn survivors(&self) -> impl Iterator<Item = &Board> {
        self.boards.reduced.iter().chain(self.boards.child.iter())
    }

    /// Marks contained in removed boards.
    #[must_use]
    pub fn removed_mark_count(&self) -> usize {
        self.removed.iter().map(Board::mark_count).sum()
    }

    /// Total area of removed boards.
    #[must_use]
    pub fn removed_area(&self) -> u64 {
        self.removed.iter().map(|b| b.dimensions().area()).sum()
    }
}

/// Apply a slice to a board.
///
/// Never touches the input board. Both descendants get fresh ids from
/// `next_id`; keeping an existing identity is the caller's business.
/// Fails when the line is not an interior line of `board`.
///
/// ```
/// use divinim::board::{apply_slice, Board, BoardDimensions, Slice, TileCoordinate};
/// use divinim::core::{BoardId, GameRng};
///
/// let dims = BoardDimensions::new(2, 3).unwrap();
/// let board = Board::new(BoardId::new(1), dims, [TileCoordinate::new(1, 2)]).unwrap();
/// let mut rng = GameRng::new(0);
///
/// let result = apply_slice(&board, Slice::vertical(1), || rng.next_board_id()).unwrap();
/// assert!(result.boards.reduced.is_none());
/// assert_eq!(result.removed.len(), 1);
/// assert!(result.boards.child.unwrap().is_marked(TileCoordinate::new(0, 2)));
/// ```
pub fn apply_slice(
    board: &Board,
    slice: Slice,
    mut next_id: impl FnMut() -> BoardId,
) -> Result<SliceResult, SliceError> {
    slice.validate(board.dimensions())?;

    let (reduced_marks, child_marks): (OrdSet<_>, OrdSet<_>) = {
        let mut reduced = OrdSet::new();
        let mut child = OrdSet::new();
        for &coord in board.marks() {
            if slice.axis(coord) < slice.line {
                reduced.insert(coord);
            } else {
                child.insert(slice.shift(coord));
            }
        }
        (reduced, child)
    };

    let (reduced_dims, child_dims) = slice.split_dimensions(board.dimensions());
    let reduced = Board::from_parts(next_id(), reduced_dims, reduced_marks);
    let child = Board::from_parts(next_id(), child_dims, child_marks);

    let mut removed = SmallVec::new();
    let boards = SliceBoards {
        reduced: keep_unless_resolved(reduced, &mut removed),
        child: keep_unless_resolved(child, &mut removed),
    };

    Ok(SliceResult { boards, removed })
}

fn keep_unless_resolved(candidate: Board, removed: &mut SmallVec<[Board; 2]>) -> Option<Board> {
    if candidate.is_resolved() {
        removed.push(candidate);
        None
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn board(width: u32, height: u32, marks: &[(u32, u32)]) -> Board {
        Board::new(
            BoardId::new(1),
            BoardDimensions::new(width, height).unwrap(),
            marks.iter().map(|&p| TileCoordinate::from(p)),
        )
        .unwrap()
    }

    fn slice(board: &Board, slice: Slice) -> Result<SliceResult, SliceError> {
        let mut rng = GameRng::new(9);
        apply_slice(board, slice, || rng.next_board_id())
    }

    #[test]
    fn test_validate_boundaries() {
        let dims = BoardDimensions::new(4, 2).unwrap();

        assert!(Slice::vertical(0).validate(dims).is_err());
        assert!(Slice::vertical(1).validate(dims).is_ok());
        assert!(Slice::vertical(3).validate(dims).is_ok());
        assert!(Slice::vertical(4).validate(dims).is_err());
        assert!(Slice::horizontal(1).validate(dims).is_ok());
        assert_eq!(
            Slice::horizontal(2).validate(dims),
            Err(SliceError::LineOutOfBounds {
                direction: Direction::Horizontal,
                line: 2,
                dimension: 2,
            })
        );
    }

    #[test]
    fn test_vertical_slice_empty_left_side() {
        let b = board(2, 3, &[(1, 2)]);
        let result = slice(&b, Slice::vertical(1)).unwrap();

        assert!(result.boards.reduced.is_none());
        let child = result.boards.child.as_ref().unwrap();
        assert_eq!(child.dimensions(), BoardDimensions::new(1, 3).unwrap());
        assert!(child.is_marked(TileCoordinate::new(0, 2)));

        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].dimensions(), BoardDimensions::new(1, 3).unwrap());
        assert_eq!(result.removed[0].mark_count(), 0);
    }

    #[test]
    fn test_horizontal_slice_two_unit_boards() {
        let b = board(1, 2, &[(0, 0), (0, 1)]);
        let result = slice(&b, Slice::horizontal(1)).unwrap();

        assert!(result.boards.reduced.is_none());
        assert!(result.boards.child.is_none());
        assert_eq!(result.removed.len(), 2);
        assert!(result.removed.iter().all(|r| r.mark_count() == 1));
        assert_eq!(result.removed_mark_count(), 2);
        assert_eq!(result.removed_area(), 2);
    }

    #[test]
    fn test_marked_pair_is_not_removed() {
        let b = board(4, 1, &[(0, 0), (1, 0), (3, 0)]);
        let result = slice(&b, Slice::vertical(2)).unwrap();

        let reduced = result.boards.reduced.as_ref().unwrap();
        assert_eq!(reduced.dimensions(), BoardDimensions::new(2, 1).unwrap());
        assert_eq!(reduced.mark_count(), 2);

        // Right side is 2x1 with one mark: not a unit board, stays live.
        let child = result.boards.child.as_ref().unwrap();
        assert!(child.is_marked(TileCoordinate::new(1, 0)));
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_invalid_line_reports_dimension() {
        let b = board(3, 3, &[(0, 0)]);
        assert!(slice(&b, Slice::vertical(0)).is_err());
        assert!(slice(&b, Slice::vertical(3)).is_err());
        assert!(slice(&b, Slice::horizontal(7)).is_err());
    }

    #[test]
    fn test_input_untouched_and_ids_fresh() {
        let b = board(3, 3, &[(0, 0), (2, 2)]);
        let before = b.clone();
        let result = slice(&b, Slice::horizontal(1)).unwrap();

        assert_eq!(b, before);
        let ids: Vec<_> = result
            .survivors()
            .chain(result.removed.iter())
            .map(Board::id)
            .collect();
        assert!(ids.iter().all(|id| *id != b.id()));
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_slice_result_serialization() {
        let b = board(3, 2, &[(0, 0), (2, 1)]);
        let result = slice(&b, Slice::vertical(1)).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: SliceResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
