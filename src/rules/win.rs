//! Win conditions.
//!
//! Each condition is a pure function of the state after a turn. `None`
//! means the game goes on; `Some(winners)` ends it, ties included.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{GameState, PlayerInfo};
use crate::error::ConfigError;

/// Closed set of win conditions, selected by name at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinCondition {
    /// No moves left: the player who made the last move wins.
    NoMovesLeft,
    /// No moves left: every player tied on the highest score wins.
    HighestScore,
    /// No moves left: every player tied on the lowest score wins.
    LowestScore,
}

impl WinCondition {
    pub const ALL: [WinCondition; 3] = [
        WinCondition::NoMovesLeft,
        WinCondition::HighestScore,
        WinCondition::LowestScore,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WinCondition::NoMovesLeft => "no-moves-left",
            WinCondition::HighestScore => "highest-score",
            WinCondition::LowestScore => "lowest-score",
        }
    }

    /// Evaluate against the state after a turn.
    ///
    /// Every variant only fires once no live board can be cut.
    #[must_use]
    pub fn evaluate(self, state: &GameState) -> Option<Vec<PlayerInfo>> {
        if state.has_available_actions() {
            return None;
        }

        match self {
            // Last move wins: whoever is "current" now has nothing to cut.
            WinCondition::NoMovesLeft => Some(vec![state.previous_player().clone()]),
            WinCondition::HighestScore => {
                let best = state.scores().values().copied().max()?;
                Some(players_with_score(state, best))
            }
            WinCondition::LowestScore => {
                let worst = state.scores().values().copied().min()?;
                Some(players_with_score(state, worst))
            }
        }
    }
}

fn players_with_score(state: &GameState, score: i64) -> Vec<PlayerInfo> {
    state
        .players()
        .iter()
        .filter(|p| state.score_of(&p.id) == Some(score))
        .cloned()
        .collect()
}

impl std::fmt::Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WinCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ConfigError::UnknownWinCondition(s.to_string()))
    }
}
