//! Compact, non-cryptographic board content hash.
//!
//! Format: `"{width}x{height}:{mask}"` where `mask` is the base-36 rendering
//! of a bitmask over `width * height` tiles, bit index `y * width + x`.
//! The id is not part of the hash: two boards with identical content hash
//! identically whatever they are called.

use super::board::Board;
use crate::core::id::BASE36_DIGITS;

/// Hash a board's dimensions and marks.
///
/// ```
/// use divinim::board::{board_hash, Board, BoardDimensions, TileCoordinate};
/// use divinim::core::BoardId;
///
/// let dims = BoardDimensions::new(2, 3).unwrap();
/// // Bit index 2 * 2 + 1 = 5, so the mask is 32 = "w" in base 36.
/// let board = Board::new(BoardId::new(9), dims, [TileCoordinate::new(1, 2)]).unwrap();
/// assert_eq!(board_hash(&board), "2x3:w");
/// ```
#[must_use]
pub fn board_hash(board: &Board) -> String {
    let width = board.width() as usize;
    let bits = width * board.height() as usize;

    // Little-endian 32-bit limbs.
    let mut limbs = vec![0u32; bits.div_ceil(32).max(1)];
    for coord in board.marks() {
        let index = coord.y as usize * width + coord.x as usize;
        limbs[index / 32] |= 1 << (index % 32);
    }

    format!("{}x{}:{}", board.width(), board.height(), limbs_to_base36(limbs))
}

/// Render a little-endian limb vector in base 36 by repeated division.
fn limbs_to_base36(mut limbs: Vec<u32>) -> String {
    let mut digits = Vec::new();

    loop {
        while limbs.len() > 1 && limbs.last() == Some(&0) {
            limbs.pop();
        }
        if limbs.len() == 1 && limbs[0] == 0 {
            break;
        }

        let mut remainder = 0u64;
        for limb in limbs.iter_mut().rev() {
            let value = (remainder << 32) | u64::from(*limb);
            *limb = (value / 36) as u32;
            remainder = value % 36;
        }
        digits.push(BASE36_DIGITS[remainder as usize] as char);
    }

    if digits.is_empty() {
        return "0".to_string();
    }
    digits.iter().rev().collect()
}
