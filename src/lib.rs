//! # divinim
//!
//! Game core for Divinim, an abstract strategy game where players take turns
//! slicing rectangular boards into smaller boards until nothing is left to cut.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: Every applied turn produces a new `GameState`.
//!    The previous state stays valid for inspection, replay and resync.
//!    Persistent `im` collections make each snapshot O(1) to clone.
//!
//! 2. **Deterministic Transitions**: Fresh board identities come from a
//!    seeded `GameRng` stream per turn, so replaying a turn history with the
//!    same seed reproduces the same states.
//!
//! 3. **N-Player Turn Order**: Players hold a fixed `turn_remainder`; turn `n`
//!    belongs to the player whose remainder is `n mod player_count`.
//!
//! 4. **Configuration Over Convention**: Win and score rules are selected by
//!    `GameConfig` at setup. Unknown rule names are rejected before play.
//!
//! ## Modules
//!
//! - `core`: ids, players, actions, RNG, configuration, game state
//! - `board`: coordinates, boards, the slice algorithm, board hashing, generation
//! - `rules`: win and score conditions
//! - `engine`: the turn loop, turn results, observers, replay
//! - `players`: random, interactive and network-relayed players
//! - `relay`: serializable wire messages and the turn broadcaster

pub mod board;
pub mod core;
pub mod engine;
pub mod error;
pub mod players;
pub mod relay;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionResponse, BoardGenConfig, BoardId, GameConfig, GameId, GameRng, GameState,
    PlayerId, PlayerInfo, StateBuilder, Turn,
};

pub use crate::board::{
    apply_slice, board_hash, generate_boards, Board, BoardDimensions, Direction, Slice,
    SliceBoards, SliceResult, TileCoordinate,
};

pub use crate::rules::{RuleSet, ScoreCondition, ScoreDeltas, WinCondition};

pub use crate::engine::{ChannelObserver, EnginePhase, Game, GameEvent, TurnObserver, TurnResult};

pub use crate::players::{InteractivePlayer, NetworkPlayer, Player, RandomPlayer, SliceSelector};

pub use crate::relay::{RelayBroadcaster, RelayMessage, SessionInfo, SessionPlayer, TurnMessage};

pub use crate::error::{
    BoardError, ConfigError, DivinimError, EngineError, PlayerError, RelayError, Result,
    SliceError, StateError,
};
