//! Turn loop state machine.
//!
//! ```text
//! AwaitingAction(player) -> Validating -> Applying -> CheckingWin
//!        ^                      |                          |
//!        +------ invalid -------+                          |
//!        +--------------- no winner -----------------------+
//!                                                          v
//!                                              Terminated(winners)
//! ```

use crate::core::PlayerInfo;

/// Where the engine is in its turn loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    /// Waiting on this player's action.
    AwaitingAction(PlayerInfo),
    /// Checking a received action against the current state.
    Validating,
    /// Applying the slice and scores.
    Applying,
    /// Evaluating win conditions on the committed state.
    CheckingWin,
    /// Game over. Never left once entered.
    Terminated(Vec<PlayerInfo>),
}

impl EnginePhase {
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self, EnginePhase::Terminated(_))
    }

    /// Winners, if the game is over.
    #[must_use]
    pub fn winners(&self) -> Option<&[PlayerInfo]> {
        match self {
            EnginePhase::Terminated(winners) => Some(winners),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnginePhase::AwaitingAction(player) => write!(f, "AwaitingAction({})", player.name),
            EnginePhase::Validating => write!(f, "Validating"),
            EnginePhase::Applying => write!(f, "Applying"),
            EnginePhase::CheckingWin => write!(f, "CheckingWin"),
            EnginePhase::Terminated(winners) => {
                let names: Vec<_> = winners.iter().map(|w| w.name.as_str()).collect();
                write!(f, "Terminated([{}])", names.join(", "))
            }
        }
    }
}
