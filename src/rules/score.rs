//! Score conditions.
//!
//! Each condition looks at one applied turn and returns per-player deltas,
//! or `None` when it awards nothing. Deltas from several active conditions
//! are summed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::PlayerId;
use crate::engine::TurnResult;
use crate::error::ConfigError;

/// Score change per player for one turn.
pub type ScoreDeltas = FxHashMap<PlayerId, i64>;

/// Closed set of score conditions, selected by name at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreCondition {
    /// One point per mark on each board removed this turn.
    MarkedSquares,
    /// `width * height` for each board removed this turn.
    TotalArea,
}

impl ScoreCondition {
    pub const ALL: [ScoreCondition; 2] = [ScoreCondition::MarkedSquares, ScoreCondition::TotalArea];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScoreCondition::MarkedSquares => "marked-squares",
            ScoreCondition::TotalArea => "total-area",
        }
    }

    /// Points for the mover of `result`, or `None` if nothing was removed.
    #[must_use]
    pub fn evaluate(self, result: &TurnResult) -> Option<ScoreDeltas> {
        let removed = &result.slice_result;
        if removed.removed.is_empty() {
            return None;
        }

        let points = match self {
            ScoreCondition::MarkedSquares => removed.removed_mark_count() as i64,
            ScoreCondition::TotalArea => removed.removed_area() as i64,
        };

        let mut deltas = ScoreDeltas::default();
        deltas.insert(result.turn.player.id.clone(), points);
        Some(deltas)
    }
}

impl std::fmt::Display for ScoreCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ConfigError::UnknownScoreCondition(s.to_string()))
    }
}
