//! Applying one turn to a state.
//!
//! [`advance`] is the pure transition used by `Game::simulate_turn`,
//! `Game::play_turn` and replay. It never touches its input state.

use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::board::{apply_slice, Board, SliceResult};
use crate::core::{BoardId, GameRng, GameState, Turn};
use crate::error::EngineError;
use crate::rules::{RuleSet, ScoreDeltas};

/// Everything produced by one applied turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnResult {
    pub turn: Turn,

    /// State immediately before the turn.
    pub in_state: GameState,

    /// State immediately after the turn, scores and history included.
    pub out_state: GameState,

    /// The slice outcome, with replacement boards already substituted.
    pub slice_result: SliceResult,

    /// Summed score changes awarded for this turn.
    pub score_deltas: ScoreDeltas,
}

impl TurnResult {
    /// Turn number this result was applied at.
    #[must_use]
    pub fn turn_number(&self) -> usize {
        self.in_state.current_turn_number()
    }
}

/// Apply `turn` to `state`.
///
/// Fresh ids come from the `turn:n` stream of `seed` and are re-rolled when
/// they clash with a live board or with each other. `replacements` whose
/// content matches a surviving descendant take its place, id included.
pub fn advance(
    state: &GameState,
    rules: &RuleSet,
    seed: u64,
    turn: Turn,
    replacements: &[Board],
) -> Result<TurnResult, EngineError> {
    let target = turn.action.board;
    let board = state
        .board(target)
        .ok_or(EngineError::MissingBoard(target))?;

    let mut rng = GameRng::for_turn(seed, state.current_turn_number());
    let mut minted: Vec<BoardId> = Vec::with_capacity(2);
    let next_id = || loop {
        let id = rng.next_board_id();
        if !state.contains_board(id) && !minted.contains(&id) {
            minted.push(id);
            return id;
        }
        trace!(id = %id, "Re-rolling colliding board id");
    };

    let mut slice_result = apply_slice(board, turn.action.slice, next_id)?;
    substitute_replacements(state, target, &mut slice_result, replacements);

    let mut builder = state.to_builder().without_board(target);
    for survivor in slice_result.survivors() {
        builder = builder.with_board(survivor.clone());
    }
    let out_state = builder.push_turn(turn.clone()).build();

    let mut result = TurnResult {
        turn,
        in_state: state.clone(),
        out_state,
        slice_result,
        score_deltas: ScoreDeltas::default(),
    };

    let deltas = rules.score_deltas(&result);
    if !deltas.is_empty() {
        let mut scored = result.out_state.to_builder();
        for (player, delta) in &deltas {
            scored = scored.add_score(player, *delta);
        }
        result.out_state = scored.build();
    }
    result.score_deltas = deltas;

    Ok(result)
}

/// Swap each surviving descendant for a content-equal replacement.
///
/// A replacement is used at most once. One whose id already names another
/// live board, or a board already placed by this slice, is skipped, since
/// adopting it would drop that board.
fn substitute_replacements(
    state: &GameState,
    target: BoardId,
    result: &mut SliceResult,
    replacements: &[Board],
) {
    if replacements.is_empty() {
        return;
    }

    let mut assigned: FxHashSet<BoardId> = result.survivors().map(Board::id).collect();
    let mut used = vec![false; replacements.len()];
    for slot in [&mut result.boards.reduced, &mut result.boards.child] {
        let Some(fresh) = slot.as_ref() else {
            continue;
        };
        let fresh_id = fresh.id();
        let hash = fresh.content_hash();

        // Dimensions first: hashing a candidate allocates by its area.
        let found = replacements.iter().enumerate().find(|(i, candidate)| {
            !used[*i]
                && candidate.dimensions() == fresh.dimensions()
                && candidate.content_hash() == hash
                && candidate.same_content(fresh)
        });
        let Some((index, replacement)) = found else {
            continue;
        };

        let id = replacement.id();
        if id != target && state.contains_board(id) {
            warn!(id = %id, "Replacement board id is already live; keeping fresh id");
            continue;
        }
        if id != fresh_id && assigned.contains(&id) {
            warn!(id = %id, "Replacement board id already placed by this slice; keeping fresh id");
            continue;
        }

        used[index] = true;
        assigned.remove(&fresh_id);
        assigned.insert(id);
        *slot = Some(replacement.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardDimensions, Slice, TileCoordinate};
    use crate::core::{Action, PlayerId, PlayerInfo};
    use crate::rules::ScoreCondition;

    fn board(id: u32, width: u32, height: u32, marks: &[(u32, u32)]) -> Board {
        Board::new(
            BoardId::new(id),
            BoardDimensions::new(width, height).unwrap(),
            marks.iter().map(|&p| TileCoordinate::from(p)),
        )
        .unwrap()
    }

    fn state(boards: Vec<Board>) -> GameState {
        GameState::new(
            [
                PlayerInfo::new("a", "Alice", 0),
                PlayerInfo::new("b", "Bob", 1),
            ],
            boards,
        )
        .unwrap()
    }

    fn turn(state: &GameState, board: u32, slice: Slice) -> Turn {
        Turn::new(
            state.current_player().clone(),
            Action::new(BoardId::new(board), slice),
        )
    }

    #[test]
    fn test_advance_is_pure_and_deterministic() {
        let s = state(vec![board(1, 3, 3, &[(0, 0), (2, 2)])]);
        let t = turn(&s, 1, Slice::horizontal(1));

        let a = advance(&s, &RuleSet::default(), 7, t.clone(), &[]).unwrap();
        let b = advance(&s, &RuleSet::default(), 7, t, &[]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.in_state, s);
        assert_eq!(a.out_state.current_turn_number(), 1);
        assert!(!a.out_state.contains_board(BoardId::new(1)));
        assert_eq!(a.out_state.board_count(), 2);
    }

    #[test]
    fn test_missing_board_fails() {
        let s = state(vec![board(1, 3, 3, &[(0, 0)])]);
        let t = turn(&s, 2, Slice::vertical(1));
        assert_eq!(
            advance(&s, &RuleSet::default(), 0, t, &[]),
            Err(EngineError::MissingBoard(BoardId::new(2)))
        );
    }

    #[test]
    fn test_invalid_slice_fails() {
        let s = state(vec![board(1, 3, 3, &[(0, 0)])]);
        let t = turn(&s, 1, Slice::vertical(3));
        assert!(matches!(
            advance(&s, &RuleSet::default(), 0, t, &[]),
            Err(EngineError::InvalidSlice(_))
        ));
    }

    #[test]
    fn test_scores_applied_to_mover() {
        let rules = RuleSet {
            score_conditions: vec![ScoreCondition::MarkedSquares, ScoreCondition::TotalArea],
            ..RuleSet::default()
        };
        let s = state(vec![board(1, 1, 2, &[(0, 0), (0, 1)])]);
        let t = turn(&s, 1, Slice::horizontal(1));

        let result = advance(&s, &rules, 0, t, &[]).unwrap();

        // 2 marks + 2 unit tiles of area
        assert_eq!(result.score_deltas.get(&PlayerId::from("a")), Some(&4));
        assert_eq!(result.out_state.score_of(&"a".into()), Some(4));
        assert_eq!(result.out_state.score_of(&"b".into()), Some(0));
        assert_eq!(result.out_state.board_count(), 0);
    }

    #[test]
    fn test_replacement_keeps_identity() {
        let s = state(vec![board(1, 2, 3, &[(1, 2)])]);
        let t = turn(&s, 1, Slice::vertical(1));
        let replacement = board(55_555, 1, 3, &[(0, 2)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[replacement.clone()]).unwrap();

        assert_eq!(result.slice_result.boards.child.as_ref(), Some(&replacement));
        assert!(result.out_state.contains_board(BoardId::new(55_555)));
        assert_eq!(result.out_state.board_count(), 1);
    }

    #[test]
    fn test_non_matching_replacement_ignored() {
        let s = state(vec![board(1, 2, 3, &[(1, 2)])]);
        let t = turn(&s, 1, Slice::vertical(1));
        let wrong = board(55_555, 1, 3, &[(0, 1)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[wrong]).unwrap();
        assert!(!result.out_state.contains_board(BoardId::new(55_555)));
        assert_eq!(result.out_state.board_count(), 1);
    }

    #[test]
    fn test_replacement_colliding_with_live_board_skipped() {
        let s = state(vec![board(1, 2, 3, &[(1, 2)]), board(2, 2, 2, &[(0, 0)])]);
        let t = turn(&s, 1, Slice::vertical(1));
        let clash = board(2, 1, 3, &[(0, 2)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[clash]).unwrap();

        assert_eq!(result.out_state.board_count(), 2);
        let untouched = result.out_state.board(BoardId::new(2)).unwrap();
        assert_eq!(untouched.dimensions(), BoardDimensions::new(2, 2).unwrap());
    }

    #[test]
    fn test_replacements_sharing_an_id_keep_both_survivors() {
        let s = state(vec![board(1, 2, 4, &[(0, 0), (1, 1), (0, 3)])]);
        let t = turn(&s, 1, Slice::horizontal(2));
        let top = board(777, 2, 2, &[(0, 0), (1, 1)]);
        let bottom = board(777, 2, 2, &[(0, 1)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[top.clone(), bottom]).unwrap();

        assert_eq!(result.slice_result.boards.reduced.as_ref(), Some(&top));
        let child = result.slice_result.boards.child.as_ref().unwrap();
        assert_ne!(child.id(), BoardId::new(777));
        assert_eq!(result.out_state.board_count(), 2);
        assert_eq!(result.out_state.total_marks(), 3);
    }

    #[test]
    fn test_replacement_taking_sibling_fresh_id_skipped() {
        let s = state(vec![board(1, 2, 4, &[(0, 0), (1, 1), (0, 3)])]);
        let t = turn(&s, 1, Slice::horizontal(2));

        let plain = advance(&s, &RuleSet::default(), 0, t.clone(), &[]).unwrap();
        let child_id = plain.slice_result.boards.child.as_ref().unwrap().id();
        let top = board(child_id.raw(), 2, 2, &[(0, 0), (1, 1)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[top]).unwrap();

        assert_eq!(result.out_state.board_count(), 2);
        assert_eq!(result.out_state.total_marks(), 3);
        assert!(result.out_state.contains_board(child_id));
        let reduced = result.slice_result.boards.reduced.as_ref().unwrap();
        assert_ne!(reduced.id(), child_id);
    }

    #[test]
    fn test_oversized_replacement_ignored() {
        let s = state(vec![board(1, 2, 3, &[(1, 2)])]);
        let t = turn(&s, 1, Slice::vertical(1));
        let huge = board(55_555, 200_000, 200_000, &[]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[huge]).unwrap();

        assert!(!result.out_state.contains_board(BoardId::new(55_555)));
        assert_eq!(result.out_state.board_count(), 1);
    }

    #[test]
    fn test_replacement_used_once() {
        // Both halves are identical 2x1 boards with both tiles marked.
        let s = state(vec![board(1, 2, 2, &[(0, 0), (1, 0), (0, 1), (1, 1)])]);
        let t = turn(&s, 1, Slice::horizontal(1));
        let replacement = board(60_000, 2, 1, &[(0, 0), (1, 0)]);

        let result = advance(&s, &RuleSet::default(), 0, t, &[replacement]).unwrap();

        let ids: Vec<_> = result.slice_result.survivors().map(Board::id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], BoardId::new(60_000));
        assert_ne!(ids[1], BoardId::new(60_000));
        assert_eq!(result.out_state.board_count(), 2);
    }
}
