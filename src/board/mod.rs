//! Boards and the slice algorithm.
//!
//! A board is a rectangle of tiles, some of them marked. A slice cuts one
//! board along an interior grid line into at most two descendants. A
//! descendant with no marks, or a 1x1 board with its single tile marked, is
//! "resolved": it leaves play at once and is reported in `removed`.
//!
//! ## Key Components
//!
//! - [`TileCoordinate`], [`BoardDimensions`]: plain geometry
//! - [`Board`]: id, dimensions and the set of marked tiles
//! - [`Slice`], [`apply_slice`], [`SliceResult`]: the cut and what it leaves behind
//! - [`board_hash`]: compact content hash used to match replacement boards
//! - [`generate_boards`]: random boards for game setup

mod board;
mod coord;
mod generate;
mod hash;
mod slice;

pub use board::Board;
pub use coord::{BoardDimensions, TileCoordinate};
pub use generate::generate_boards;
pub use hash::board_hash;
pub use slice::{apply_slice, Direction, Slice, SliceBoards, SliceResult};
