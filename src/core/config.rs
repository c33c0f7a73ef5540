//! Game configuration.
//!
//! A game is configured once at setup with:
//! - the set of active win conditions (at least one)
//! - the set of active score conditions (possibly empty)
//! - how the initial boards are generated
//! - the seed driving every deterministic stream of the game
//!
//! Condition names are kebab-case (`no-moves-left`, `marked-squares`, ...).
//! Unknown names are rejected here, before any engine exists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::{ScoreCondition, WinCondition};

/// Parameters for random board generation at setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGenConfig {
    /// Number of boards in the initial state.
    pub board_count: usize,

    /// Smallest side length, inclusive.
    pub min_side: u32,

    /// Largest side length, inclusive.
    pub max_side: u32,

    /// Probability that any one tile starts marked.
    pub mark_probability: f64,
}

impl Default for BoardGenConfig {
    fn default() -> Self {
        Self {
            board_count: 3,
            min_side: 2,
            max_side: 6,
            mark_probability: 0.35,
        }
    }
}

impl BoardGenConfig {
    pub fn with_board_count(mut self, board_count: usize) -> Self {
        self.board_count = board_count;
        self
    }

    pub fn with_sides(mut self, min_side: u32, max_side: u32) -> Self {
        self.min_side = min_side;
        self.max_side = max_side;
        self
    }

    pub fn with_mark_probability(mut self, probability: f64) -> Self {
        self.mark_probability = probability;
        self
    }

    /// Check generation bounds.
    ///
    /// `max_side` must be at least 2: a generated board is never resolved,
    /// and the only board shape available at `max_side == 1` is a 1x1 tile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_count == 0 {
            return Err(ConfigError::NoBoards);
        }
        if self.min_side == 0 || self.min_side > self.max_side || self.max_side < 2 {
            return Err(ConfigError::InvalidSideRange {
                min: self.min_side,
                max: self.max_side,
            });
        }
        if !(self.mark_probability > 0.0 && self.mark_probability <= 1.0) {
            return Err(ConfigError::InvalidMarkProbability(self.mark_probability));
        }
        Ok(())
    }
}

/// Complete setup configuration for one game.
///
/// ```
/// use divinim::core::GameConfig;
/// use divinim::rules::{ScoreCondition, WinCondition};
///
/// let config = GameConfig::from_names(&["highest-score"], &["marked-squares"]).unwrap();
/// assert!(config.win_conditions.contains(&WinCondition::HighestScore));
/// assert!(config.score_conditions.contains(&ScoreCondition::MarkedSquares));
///
/// assert!(GameConfig::from_names(&["most-boards"], &[] as &[&str]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    /// Evaluated after every applied turn; any result ends the game.
    pub win_conditions: BTreeSet<WinCondition>,

    /// Evaluated once per applied turn; deltas are summed.
    pub score_conditions: BTreeSet<ScoreCondition>,

    /// Initial board generation.
    pub board_gen: BoardGenConfig,

    /// Seed for board generation and per-turn fresh board ids.
    pub seed: u64,

    /// Simulated thinking time for random players, in milliseconds.
    pub random_player_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_conditions: BTreeSet::from([WinCondition::NoMovesLeft]),
            score_conditions: BTreeSet::new(),
            board_gen: BoardGenConfig::default(),
            seed: 42,
            random_player_delay_ms: 0,
        }
    }
}

impl GameConfig {
    /// Build a config from condition names, rejecting unknown names.
    pub fn from_names<W, S>(win: &[W], score: &[S]) -> Result<Self, ConfigError>
    where
        W: AsRef<str>,
        S: AsRef<str>,
    {
        let config = Self {
            win_conditions: parse_names(win)?,
            score_conditions: parse_names(score)?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// Syntax errors are `Malformed`; unknown condition names keep their
    /// typed variant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawGameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Reject configurations that can't produce a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_conditions.is_empty() {
            return Err(ConfigError::NoWinConditions);
        }
        self.board_gen.validate()
    }

    pub fn with_win_condition(mut self, condition: WinCondition) -> Self {
        self.win_conditions.insert(condition);
        self
    }

    /// Replace the win conditions with exactly `conditions`.
    pub fn with_win_conditions(mut self, conditions: impl IntoIterator<Item = WinCondition>) -> Self {
        self.win_conditions = conditions.into_iter().collect();
        self
    }

    pub fn with_score_condition(mut self, condition: ScoreCondition) -> Self {
        self.score_conditions.insert(condition);
        self
    }

    pub fn with_board_gen(mut self, board_gen: BoardGenConfig) -> Self {
        self.board_gen = board_gen;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_random_player_delay_ms(mut self, delay_ms: u64) -> Self {
        self.random_player_delay_ms = delay_ms;
        self
    }
}

/// Wire form: condition names are plain strings, checked by `TryFrom`.
/// `from_json` reports an unknown name as `UnknownWinCondition` /
/// `UnknownScoreCondition`; a plain serde deserialize reports its message.
#[derive(Deserialize)]
#[serde(default)]
struct RawGameConfig {
    win_conditions: Vec<String>,
    score_conditions: Vec<String>,
    board_gen: BoardGenConfig,
    seed: u64,
    random_player_delay_ms: u64,
}

impl Default for RawGameConfig {
    fn default() -> Self {
        let defaults = GameConfig::default();
        Self {
            win_conditions: defaults
                .win_conditions
                .iter()
                .map(ToString::to_string)
                .collect(),
            score_conditions: Vec::new(),
            board_gen: defaults.board_gen,
            seed: defaults.seed,
            random_player_delay_ms: defaults.random_player_delay_ms,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        let config = Self {
            win_conditions: parse_names(&raw.win_conditions)?,
            score_conditions: parse_names(&raw.score_conditions)?,
            board_gen: raw.board_gen,
            seed: raw.seed,
            random_player_delay_ms: raw.random_player_delay_ms,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_names<T, N>(names: &[N]) -> Result<BTreeSet<T>, ConfigError>
where
    T: std::str::FromStr<Err = ConfigError> + Ord,
    N: AsRef<str>,
{
    names.iter().map(|name| name.as_ref().parse()).collect()
}
