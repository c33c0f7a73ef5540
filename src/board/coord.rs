//! Tile coordinates and board dimensions.
//!
//! Coordinates use a pixel-like orientation: the origin is the top-left
//! tile, `x` grows to the right and `y` grows downwards.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Position of one tile on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoordinate {
    pub x: u32,
    pub y: u32,
}

impl TileCoordinate {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for TileCoordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Width and height of a board, both at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct BoardDimensions {
    width: u32,
    height: u32,
}

impl BoardDimensions {
    /// Create dimensions, rejecting a zero side.
    pub fn new(width: u32, height: u32) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Dimensions derived from a validated slice; both sides are non-zero.
    pub(crate) const fn from_nonzero(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { width, height }
    }

    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Number of tiles.
    #[must_use]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Is this a single tile?
    #[must_use]
    pub const fn is_unit(self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Does the coordinate lie on this board?
    #[must_use]
    pub const fn contains(self, coord: TileCoordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Number of interior grid lines: `(width - 1) + (height - 1)`.
    #[must_use]
    pub const fn interior_line_count(self) -> u64 {
        (self.width as u64 - 1) + (self.height as u64 - 1)
    }

    /// Check a coordinate, reporting where it fell off the board.
    pub(crate) fn check(self, coord: TileCoordinate) -> Result<TileCoordinate, BoardError> {
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(BoardError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

impl TryFrom<RawDimensions> for BoardDimensions {
    type Error = BoardError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl std::fmt::Display for BoardDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
