//! Win and score rules.
//!
//! Rules are closed enums dispatched by `match`, chosen at setup from
//! `GameConfig`. A `RuleSet` holds the active ones for a game:
//! - `winners`: union of every win condition's result, each player once
//! - `score_deltas`: sum of every score condition's deltas

pub mod score;
pub mod win;

pub use score::{ScoreCondition, ScoreDeltas};
pub use win::WinCondition;

use crate::core::{GameConfig, GameState, PlayerInfo};
use crate::engine::TurnResult;

/// The active rules of one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub win_conditions: Vec<WinCondition>,
    pub score_conditions: Vec<ScoreCondition>,
}

impl RuleSet {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            win_conditions: config.win_conditions.iter().copied().collect(),
            score_conditions: config.score_conditions.iter().copied().collect(),
        }
    }

    /// Winners against `state`; empty while the game goes on.
    ///
    /// Results are concatenated in condition order, and a player named by
    /// more than one condition is listed once, at its first occurrence.
    #[must_use]
    pub fn winners(&self, state: &GameState) -> Vec<PlayerInfo> {
        let mut winners: Vec<PlayerInfo> = Vec::new();
        for found in self
            .win_conditions
            .iter()
            .filter_map(|condition| condition.evaluate(state))
        {
            for player in found {
                if !winners.iter().any(|w| w.id == player.id) {
                    winners.push(player);
                }
            }
        }
        winners
    }

    /// Summed deltas of every score condition for one turn.
    #[must_use]
    pub fn score_deltas(&self, result: &TurnResult) -> ScoreDeltas {
        let mut total = ScoreDeltas::default();
        for deltas in self
            .score_conditions
            .iter()
            .filter_map(|condition| condition.evaluate(result))
        {
            for (player, delta) in deltas {
                *total.entry(player).or_insert(0) += delta;
            }
        }
        total
    }
}
