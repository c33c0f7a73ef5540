//! Game state: the authoritative snapshot of one game.
//!
//! ## GameState
//!
//! - Live boards, keyed by id
//! - Players, sorted by turn remainder
//! - One score per player
//! - The append-only turn history
//!
//! A `GameState` is never mutated in place. Every applied turn yields a new
//! value built through [`StateBuilder`], and the previous snapshot stays
//! valid for inspection, replay and resync. Collections are `im` persistent
//! structures, so each copy shares structure with its predecessor.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::{Action, Turn};
use super::config::GameConfig;
use super::id::{BoardId, PlayerId};
use super::player::{sort_by_turn_order, PlayerInfo};
use super::rng::GameRng;
use crate::board::{generate_boards, Board};
use crate::error::StateError;

/// Complete, serializable game state.
///
/// ```
/// use divinim::core::{GameState, PlayerInfo};
/// use divinim::board::{Board, BoardDimensions, TileCoordinate};
/// use divinim::core::BoardId;
///
/// let board = Board::new(
///     BoardId::new(1),
///     BoardDimensions::new(2, 3).unwrap(),
///     [TileCoordinate::new(1, 2)],
/// )
/// .unwrap();
/// let state = GameState::new(
///     [PlayerInfo::new("b", "Bob", 1), PlayerInfo::new("a", "Alice", 0)],
///     [board],
/// )
/// .unwrap();
///
/// assert_eq!(state.current_player().name, "Alice");
/// assert_eq!(state.previous_player().name, "Bob");
/// assert_eq!(state.available_action_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    boards: OrdMap<BoardId, Board>,
    players: Vector<PlayerInfo>,
    scores: OrdMap<PlayerId, i64>,
    turn_history: Vector<Turn>,
}

impl GameState {
    /// Create the initial state of a game.
    ///
    /// Players are sorted by turn remainder; the remainders must be exactly
    /// `0..player_count`. Every score starts at 0.
    pub fn new(
        players: impl IntoIterator<Item = PlayerInfo>,
        boards: impl IntoIterator<Item = Board>,
    ) -> Result<Self, StateError> {
        let players = checked_turn_order(players.into_iter().collect())?;
        let scores = players.iter().map(|p| (p.id.clone(), 0)).collect();
        let boards = boards.into_iter().map(|b| (b.id(), b)).collect();

        Ok(Self {
            boards,
            players,
            scores,
            turn_history: Vector::new(),
        })
    }

    /// Create an initial state with randomly generated boards.
    ///
    /// Boards come from the `setup` stream of `config.seed`, so the same
    /// config always deals the same boards.
    pub fn new_random(
        players: impl IntoIterator<Item = PlayerInfo>,
        config: &GameConfig,
    ) -> crate::Result<Self> {
        let mut rng = GameRng::new(config.seed).for_context("setup");
        let boards = generate_boards(&config.board_gen, &mut rng)?;
        Ok(Self::new(players, boards)?)
    }

    /// Start a copy-with builder from this state.
    #[must_use]
    pub fn to_builder(&self) -> StateBuilder {
        StateBuilder {
            state: self.clone(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn boards(&self) -> &OrdMap<BoardId, Board> {
        &self.boards
    }

    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(&id)
    }

    #[must_use]
    pub fn contains_board(&self, id: BoardId) -> bool {
        self.boards.contains_key(&id)
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<PlayerInfo> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn scores(&self) -> &OrdMap<PlayerId, i64> {
        &self.scores
    }

    #[must_use]
    pub fn turn_history(&self) -> &Vector<Turn> {
        &self.turn_history
    }

    // === Turn Order ===

    /// Number of turns applied so far.
    #[must_use]
    pub fn current_turn_number(&self) -> usize {
        self.turn_history.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &PlayerInfo {
        &self.players[self.current_turn_number() % self.players.len()]
    }

    /// The player who moved last. Before the first turn this is the last
    /// player in round-robin order.
    #[must_use]
    pub fn previous_player(&self) -> &PlayerInfo {
        let count = self.players.len();
        &self.players[(self.current_turn_number() + count - 1) % count]
    }

    #[must_use]
    pub fn is_player_turn(&self, player: &PlayerId) -> bool {
        self.current_player().id == *player
    }

    #[must_use]
    pub fn player_by_id(&self, id: &PlayerId) -> Option<&PlayerInfo> {
        self.players.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turn_history.back()
    }

    // === Actions ===

    /// Every legal action, board by board in id order.
    #[must_use]
    pub fn available_actions(&self) -> Vec<Action> {
        self.boards
            .values()
            .flat_map(|board| {
                let id = board.id();
                board
                    .available_slices()
                    .into_iter()
                    .map(move |slice| Action::new(id, slice))
            })
            .collect()
    }

    /// Legal actions on one board; empty if the board isn't live.
    #[must_use]
    pub fn available_actions_for(&self, id: BoardId) -> Vec<Action> {
        self.board(id)
            .map(|board| {
                board
                    .available_slices()
                    .into_iter()
                    .map(|slice| Action::new(id, slice))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `Σ (width - 1) + (height - 1)` over live boards.
    #[must_use]
    pub fn available_action_count(&self) -> usize {
        self.boards
            .values()
            .map(Board::available_slice_count)
            .fold(0, usize::saturating_add)
    }

    #[must_use]
    pub fn has_available_actions(&self) -> bool {
        self.boards.values().any(|b| b.available_slice_count() > 0)
    }

    /// Is `action` legal against the board as it is now?
    ///
    /// The target must be live and the line interior to its current
    /// dimensions, whatever they were when the action was proposed.
    #[must_use]
    pub fn is_valid_action(&self, action: &Action) -> bool {
        self.board(action.board)
            .is_some_and(|board| action.slice.validate(board.dimensions()).is_ok())
    }

    // === Summaries ===

    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Marks across all live boards.
    #[must_use]
    pub fn total_marks(&self) -> usize {
        self.boards.values().map(Board::mark_count).sum()
    }

    #[must_use]
    pub fn score_of(&self, player: &PlayerId) -> Option<i64> {
        self.scores.get(player).copied()
    }
}

/// Copy-with builder over a [`GameState`].
///
/// Players are fixed for the lifetime of a game and can't be overridden.
///
/// ```
/// use divinim::core::{GameState, PlayerInfo, PlayerId};
///
/// let state = GameState::new([PlayerInfo::new("a", "Alice", 0)], []).unwrap();
/// let next = state.to_builder().add_score(&PlayerId::from("a"), 3).build();
///
/// assert_eq!(state.score_of(&PlayerId::from("a")), Some(0));
/// assert_eq!(next.score_of(&PlayerId::from("a")), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct StateBuilder {
    state: GameState,
}

impl StateBuilder {
    /// Replace every live board.
    #[must_use]
    pub fn with_boards(mut self, boards: impl IntoIterator<Item = Board>) -> Self {
        self.state.boards = boards.into_iter().map(|b| (b.id(), b)).collect();
        self
    }

    /// Insert or replace one board.
    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.state.boards.insert(board.id(), board);
        self
    }

    #[must_use]
    pub fn without_board(mut self, id: BoardId) -> Self {
        self.state.boards.remove(&id);
        self
    }

    /// Replace the score table. Players missing from `scores` keep theirs;
    /// ids that aren't players are ignored.
    #[must_use]
    pub fn with_scores(mut self, scores: impl IntoIterator<Item = (PlayerId, i64)>) -> Self {
        for (player, score) in scores {
            if let Some(entry) = self.state.scores.get_mut(&player) {
                *entry = score;
            }
        }
        self
    }

    /// Add `delta` to one player's score. Unknown ids are ignored.
    #[must_use]
    pub fn add_score(mut self, player: &PlayerId, delta: i64) -> Self {
        if let Some(entry) = self.state.scores.get_mut(player) {
            *entry += delta;
        }
        self
    }

    /// Append an applied turn to the history.
    #[must_use]
    pub fn push_turn(mut self, turn: Turn) -> Self {
        self.state.turn_history.push_back(turn);
        self
    }

    #[must_use]
    pub fn build(self) -> GameState {
        self.state
    }
}

/// Sort players and check remainders are exactly `0..n`.
fn checked_turn_order(mut players: Vec<PlayerInfo>) -> Result<Vector<PlayerInfo>, StateError> {
    if players.is_empty() {
        return Err(StateError::NoPlayers);
    }
    sort_by_turn_order(&mut players);

    let in_order = players
        .iter()
        .enumerate()
        .all(|(i, p)| p.turn_remainder as usize == i);
    if !in_order {
        return Err(StateError::InvalidTurnRemainders {
            player_count: players.len(),
            found: players.iter().map(|p| p.turn_remainder).collect(),
        });
    }

    Ok(players.into_iter().collect())
}

/// Wire form of a snapshot. Deserializing re-checks turn order and scores,
/// and re-keys boards by their own ids.
#[derive(Deserialize)]
struct RawGameState {
    boards: OrdMap<BoardId, Board>,
    players: Vec<PlayerInfo>,
    scores: OrdMap<PlayerId, i64>,
    turn_history: Vector<Turn>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let players = checked_turn_order(raw.players)?;
        let scores = players
            .iter()
            .map(|p| (p.id.clone(), raw.scores.get(&p.id).copied().unwrap_or(0)))
            .collect();

        let boards = raw.boards.into_iter().map(|(_, b)| (b.id(), b)).collect();

        Ok(Self {
            boards,
            players,
            scores,
            turn_history: raw.turn_history,
        })
    }
}
