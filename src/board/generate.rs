//! Random board generation for game setup.

use im::OrdSet;
use rustc_hash::FxHashSet;

use super::board::Board;
use super::coord::{BoardDimensions, TileCoordinate};
use crate::core::{BoardGenConfig, BoardId, GameRng};
use crate::error::ConfigError;

/// Generate one board. `config` must already be validated.
///
/// The result is never resolved: a board that rolled no marks gets one at a
/// random tile, and a 1x1 roll is widened to 2x1.
pub(crate) fn generate_board(config: &BoardGenConfig, rng: &mut GameRng, id: BoardId) -> Board {
    let mut width = rng.gen_range_inclusive(config.min_side..=config.max_side);
    let height = rng.gen_range_inclusive(config.min_side..=config.max_side);
    if width == 1 && height == 1 {
        width = 2;
    }
    let dimensions = BoardDimensions::from_nonzero(width, height);

    let mut marks = OrdSet::new();
    for y in 0..height {
        for x in 0..width {
            if rng.gen_bool(config.mark_probability) {
                marks.insert(TileCoordinate::new(x, y));
            }
        }
    }
    if marks.is_empty() {
        let x = rng.gen_range_inclusive(0..=width - 1);
        let y = rng.gen_range_inclusive(0..=height - 1);
        marks.insert(TileCoordinate::new(x, y));
    }

    Board::from_parts(id, dimensions, marks)
}

/// Generate the initial boards, each under a distinct id.
///
/// ```
/// use divinim::board::generate_boards;
/// use divinim::core::{BoardGenConfig, GameRng};
///
/// let config = BoardGenConfig::default().with_board_count(4);
/// let boards = generate_boards(&config, &mut GameRng::new(1)).unwrap();
/// assert_eq!(boards.len(), 4);
/// assert!(boards.iter().all(|b| !b.is_resolved()));
/// ```
pub fn generate_boards(
    config: &BoardGenConfig,
    rng: &mut GameRng,
) -> Result<Vec<Board>, ConfigError> {
    config.validate()?;

    let mut used = FxHashSet::default();
    let boards = (0..config.board_count)
        .map(|_| {
            let id = loop {
                let candidate = rng.next_board_id();
                if used.insert(candidate) {
                    break candidate;
                }
            };
            generate_board(config, rng, id)
        })
        .collect();

    Ok(boards)
}
