//! Error types for the Divinim game core.
//!
//! Each layer has its own error enum; `DivinimError` wraps them all for
//! callers that don't care which layer failed.

use thiserror::Error;

use crate::board::Direction;
use crate::core::{BoardId, GameId, PlayerId};

/// Board construction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Coordinate ({x}, {y}) lies outside a {width}x{height} board")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// A slice that would cut the border of a board instead of its interior.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error("{direction} slice at line {line} is outside the interior lines 1..{dimension}")]
    LineOutOfBounds {
        direction: Direction,
        line: u32,
        dimension: u32,
    },
}

/// Setup configuration failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown win condition: {0}")]
    UnknownWinCondition(String),

    #[error("Unknown score condition: {0}")]
    UnknownScoreCondition(String),

    #[error("At least one win condition is required")]
    NoWinConditions,

    #[error("Board sides must satisfy 1 <= min_side ({min}) <= max_side ({max}) and max_side >= 2")]
    InvalidSideRange { min: u32, max: u32 },

    #[error("Mark probability {0} is outside (0, 1]")]
    InvalidMarkProbability(f64),

    #[error("At least one board must be generated")]
    NoBoards,

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Game state construction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("Turn remainders must be exactly 0..{player_count}, found {found:?}")]
    InvalidTurnRemainders { player_count: usize, found: Vec<u32> },
}

/// Failures while a player produces its next action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("No available actions: the game should already have ended")]
    NoAvailableActions,

    #[error("An action request is already outstanding for {0}")]
    RequestOutstanding(PlayerId),

    #[error("No action request is pending")]
    NoPendingRequest,

    #[error("Action channel closed")]
    ChannelClosed,

    #[error("Turn message for turn {received} arrived while expecting turn {expected}")]
    OutOfSync { expected: usize, received: usize },
}

/// Failures applying or requesting a turn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Board {0} is not live in the current state")]
    MissingBoard(BoardId),

    #[error("Invalid slice: {0}")]
    InvalidSlice(#[from] SliceError),

    #[error("It is not {player}'s turn (current player: {current})")]
    NotPlayersTurn { player: PlayerId, current: PlayerId },

    #[error("No controller registered for {0}")]
    NoController(PlayerId),

    #[error("{0} is not a player in this game")]
    UnknownPlayer(PlayerId),

    #[error("Game {0} has already terminated")]
    Terminated(GameId),

    #[error("Player failed: {0}")]
    Player(#[from] PlayerError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Replay failed at turn {turn_number}: {source}")]
    Replay {
        turn_number: usize,
        source: Box<EngineError>,
    },
}

/// Wire encoding failures.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary codec error: {0}")]
    Binary(#[from] bincode::Error),
}

/// Any error raised by the game core.
#[derive(Error, Debug)]
pub enum DivinimError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

pub type Result<T> = std::result::Result<T, DivinimError>;
