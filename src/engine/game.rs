//! The game engine.
//!
//! One `Game` owns one current `GameState` and replaces it wholesale on
//! every committed turn. Control is strictly sequential: the only
//! suspension point is awaiting the current player's action.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::observer::TurnObserver;
use super::phase::EnginePhase;
use super::turn::{advance, TurnResult};
use crate::board::Board;
use crate::core::{Action, ActionResponse, GameConfig, GameId, GameState, PlayerId, PlayerInfo, Turn};
use crate::error::EngineError;
use crate::players::Player;
use crate::rules::RuleSet;

/// A running game.
///
/// ```
/// use divinim::core::{GameConfig, GameState, PlayerInfo};
/// use divinim::engine::Game;
/// use divinim::players::RandomPlayer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = GameConfig::default().with_seed(3);
/// let alice = PlayerInfo::new("a", "Alice", 0);
/// let bob = PlayerInfo::new("b", "Bob", 1);
/// let state = GameState::new_random([alice.clone(), bob.clone()], &config).unwrap();
///
/// let mut game = Game::new(config, state).unwrap();
/// game.add_player(Box::new(RandomPlayer::new(alice, 1))).unwrap();
/// game.add_player(Box::new(RandomPlayer::new(bob, 2))).unwrap();
///
/// let winners = game.play_loop().await.unwrap();
/// assert_eq!(winners.len(), 1);
/// assert!(!game.state().has_available_actions());
/// # }
/// ```
pub struct Game {
    id: GameId,
    config: GameConfig,
    rules: RuleSet,
    state: GameState,
    phase: EnginePhase,
    controllers: FxHashMap<PlayerId, Box<dyn Player>>,
    observers: Vec<Box<dyn TurnObserver>>,
}

impl Game {
    /// Create an engine over an initial state.
    ///
    /// Rejects an invalid config before any turn is processed. A state that
    /// already satisfies a win condition starts out terminated.
    pub fn new(config: GameConfig, state: GameState) -> Result<Self, EngineError> {
        config.validate()?;
        let rules = RuleSet::from_config(&config);

        let mut game = Self {
            id: GameId::random(),
            config,
            rules,
            phase: EnginePhase::AwaitingAction(state.current_player().clone()),
            state,
            controllers: FxHashMap::default(),
            observers: Vec::new(),
        };

        let winners = game.winners();
        if !winners.is_empty() {
            game.phase = EnginePhase::Terminated(winners);
        }
        Ok(game)
    }

    /// Tag this engine with a session-supplied game id.
    #[must_use]
    pub fn with_game_id(mut self, id: GameId) -> Self {
        self.id = id;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &EnginePhase {
        &self.phase
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.phase.is_terminated()
    }

    // === Setup ===

    /// Register the controller for one seat.
    ///
    /// Replaces any controller already registered for the same player.
    pub fn add_player(&mut self, player: Box<dyn Player>) -> Result<(), EngineError> {
        let id = player.info().id.clone();
        if self.state.player_by_id(&id).is_none() {
            return Err(EngineError::UnknownPlayer(id));
        }
        debug!(game = %self.id, player = %id, "Controller registered");
        self.controllers.insert(id, player);
        Ok(())
    }

    /// Subscribe to committed turns and game over.
    pub fn subscribe(&mut self, observer: Box<dyn TurnObserver>) {
        self.observers.push(observer);
    }

    // === Turn Loop ===

    /// Ask a player's controller for its next action.
    ///
    /// Suspends for as long as the controller does; no timeout is applied.
    pub async fn request_player_action(
        &mut self,
        player: &PlayerId,
    ) -> Result<ActionResponse, EngineError> {
        let controller = self
            .controllers
            .get_mut(player)
            .ok_or_else(|| EngineError::NoController(player.clone()))?;

        debug!(game = %self.id, player = %player, "Requesting action");
        Ok(controller.get_action(&self.state).await?)
    }

    /// Is `action` legal against the current state?
    #[must_use]
    pub fn is_valid_action(&self, action: &Action) -> bool {
        self.state.is_valid_action(action)
    }

    /// Compute the result of `turn` without committing it.
    ///
    /// Fails if the target board isn't live or the slice is invalid.
    pub fn simulate_turn(&self, turn: &Turn, replacements: &[Board]) -> Result<TurnResult, EngineError> {
        advance(
            &self.state,
            &self.rules,
            self.config.seed,
            turn.clone(),
            replacements,
        )
    }

    /// Apply and commit `turn`, then check for winners.
    ///
    /// On error the current state is left exactly as it was.
    pub fn play_turn(&mut self, turn: Turn, replacements: &[Board]) -> Result<TurnResult, EngineError> {
        if self.is_terminated() {
            return Err(EngineError::Terminated(self.id));
        }
        if !self.state.is_player_turn(&turn.player.id) {
            return Err(EngineError::NotPlayersTurn {
                player: turn.player.id,
                current: self.state.current_player().id.clone(),
            });
        }

        self.phase = EnginePhase::Applying;
        let result = match self.simulate_turn(&turn, replacements) {
            Ok(result) => result,
            Err(e) => {
                self.phase = EnginePhase::AwaitingAction(self.state.current_player().clone());
                return Err(e);
            }
        };
        self.state = result.out_state.clone();

        info!(
            game = %self.id,
            turn = result.turn_number(),
            player = %turn.player.name,
            action = %turn.action,
            removed = result.slice_result.removed.len(),
            boards = self.state.board_count(),
            "Turn committed"
        );
        for observer in &mut self.observers {
            observer.on_turn(&result);
        }

        self.phase = EnginePhase::CheckingWin;
        let winners = self.winners();
        if winners.is_empty() {
            self.phase = EnginePhase::AwaitingAction(self.state.current_player().clone());
        } else {
            let names: Vec<_> = winners.iter().map(|w| w.name.as_str()).collect();
            info!(game = %self.id, winners = ?names, "Game over");
            for observer in &mut self.observers {
                observer.on_game_over(&winners);
            }
            self.phase = EnginePhase::Terminated(winners);
        }
        debug!(game = %self.id, phase = %self.phase, "Phase transition");

        Ok(result)
    }

    /// Play until a win condition fires, returning the winners.
    ///
    /// Invalid actions are ignored and the same player is asked again.
    /// Errors from a controller or from applying a valid action abort the
    /// loop with the last committed state intact.
    pub async fn play_loop(&mut self) -> Result<Vec<PlayerInfo>, EngineError> {
        info!(game = %self.id, players = self.state.player_count(), "Starting play loop");

        loop {
            if let EnginePhase::Terminated(winners) = &self.phase {
                return Ok(winners.clone());
            }

            let current = self.state.current_player().clone();
            self.phase = EnginePhase::AwaitingAction(current.clone());
            let response = self.request_player_action(&current.id).await?;

            self.phase = EnginePhase::Validating;
            if !self.is_valid_action(&response.action) {
                warn!(
                    game = %self.id,
                    player = %current.name,
                    action = %response.action,
                    "Ignoring invalid action"
                );
                continue;
            }

            self.play_turn(Turn::new(current, response.action), &response.replacement_boards)?;
        }
    }

    /// Winners against the current state; empty while the game goes on.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerInfo> {
        self.rules.winners(&self.state)
    }

    // === Recovery ===

    /// Replace the current state wholesale with a peer's snapshot.
    pub fn resync(&mut self, state: GameState) -> Result<(), EngineError> {
        if self.is_terminated() {
            return Err(EngineError::Terminated(self.id));
        }
        info!(
            game = %self.id,
            from_turn = self.state.current_turn_number(),
            to_turn = state.current_turn_number(),
            "Resyncing state"
        );
        self.state = state;

        let winners = self.winners();
        self.phase = if winners.is_empty() {
            EnginePhase::AwaitingAction(self.state.current_player().clone())
        } else {
            EnginePhase::Terminated(winners)
        };
        Ok(())
    }

    /// Re-apply a turn history from an initial state.
    ///
    /// With the same seed and no replacement boards this reproduces the
    /// original states exactly.
    pub fn replay(
        config: GameConfig,
        initial: GameState,
        turns: impl IntoIterator<Item = Turn>,
    ) -> Result<GameState, EngineError> {
        let mut game = Self::new(config, initial)?;
        for turn in turns {
            let turn_number = game.state.current_turn_number();
            game.play_turn(turn, &[]).map_err(|source| EngineError::Replay {
                turn_number,
                source: Box::new(source),
            })?;
        }
        Ok(game.state)
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("turn", &self.state.current_turn_number())
            .field("controllers", &self.controllers.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardDimensions, Slice, TileCoordinate};
    use crate::core::BoardId;
    use crate::rules::WinCondition;

    fn board(id: u32, width: u32, height: u32, marks: &[(u32, u32)]) -> Board {
        Board::new(
            BoardId::new(id),
            BoardDimensions::new(width, height).unwrap(),
            marks.iter().map(|&p| TileCoordinate::from(p)),
        )
        .unwrap()
    }

    fn alice() -> PlayerInfo {
        PlayerInfo::new("a", "Alice", 0)
    }

    fn bob() -> PlayerInfo {
        PlayerInfo::new("b", "Bob", 1)
    }

    fn game(boards: Vec<Board>) -> Game {
        let state = GameState::new([alice(), bob()], boards).unwrap();
        Game::new(GameConfig::default(), state).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let state = GameState::new([alice(), bob()], [board(1, 2, 2, &[(0, 0)])]).unwrap();
        let config = GameConfig::default().with_win_conditions([]);
        assert!(matches!(
            Game::new(config, state),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_new_on_finished_state_is_terminated() {
        let g = game(vec![board(1, 1, 1, &[(0, 0)])]);
        assert!(g.is_terminated());
        assert_eq!(g.winners(), vec![bob()]);
    }

    #[test]
    fn test_play_turn_rejects_wrong_player() {
        let mut g = game(vec![board(1, 3, 3, &[(0, 0)])]);
        let turn = Turn::new(bob(), Action::new(BoardId::new(1), Slice::vertical(1)));

        assert_eq!(
            g.play_turn(turn, &[]),
            Err(EngineError::NotPlayersTurn {
                player: "b".into(),
                current: "a".into(),
            })
        );
        assert_eq!(g.state().current_turn_number(), 0);
    }

    #[test]
    fn test_failed_turn_leaves_state_intact() {
        let mut g = game(vec![board(1, 3, 3, &[(0, 0)])]);
        let before = g.state().clone();

        let missing = Turn::new(alice(), Action::new(BoardId::new(2), Slice::vertical(1)));
        assert_eq!(
            g.play_turn(missing, &[]),
            Err(EngineError::MissingBoard(BoardId::new(2)))
        );
        assert_eq!(g.state(), &before);
        assert_eq!(g.phase(), &EnginePhase::AwaitingAction(alice()));
    }

    #[test]
    fn test_game_ends_after_last_cut() {
        let mut g = game(vec![board(1, 1, 2, &[(0, 0), (0, 1)])]);
        let turn = Turn::new(alice(), Action::new(BoardId::new(1), Slice::horizontal(1)));

        g.play_turn(turn.clone(), &[]).unwrap();

        assert_eq!(g.phase(), &EnginePhase::Terminated(vec![alice()]));
        assert_eq!(g.play_turn(turn, &[]), Err(EngineError::Terminated(g.id())));
    }

    #[test]
    fn test_resync_replaces_state() {
        let mut g = game(vec![board(1, 3, 3, &[(0, 0)])]);
        let snapshot = GameState::new([alice(), bob()], [board(9, 2, 2, &[(1, 1)])]).unwrap();

        g.resync(snapshot.clone()).unwrap();
        assert_eq!(g.state(), &snapshot);
        assert!(!g.is_terminated());
    }

    #[test]
    fn test_add_player_rejects_stranger() {
        let mut g = game(vec![board(1, 3, 3, &[(0, 0)])]);
        let stranger = PlayerInfo::new("z", "Zed", 0);
        let result = g.add_player(Box::new(crate::players::RandomPlayer::new(stranger, 0)));
        assert_eq!(result, Err(EngineError::UnknownPlayer("z".into())));
    }

    #[test]
    fn test_win_conditions_from_config() {
        let state = GameState::new([alice(), bob()], [board(1, 2, 2, &[(0, 0)])]).unwrap();
        let config = GameConfig::default().with_win_conditions([WinCondition::LowestScore]);
        let g = Game::new(config, state).unwrap();
        assert_eq!(g.rules().win_conditions, vec![WinCondition::LowestScore]);
    }
}
