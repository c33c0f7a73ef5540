//! Random player: picks uniformly among the available actions.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::Player;
use crate::core::{ActionResponse, GameRng, GameState, PlayerInfo};
use crate::error::PlayerError;

/// Plays a uniformly random legal action.
///
/// Its choices come from a seeded stream, so a seeded game against random
/// players is reproducible.
#[derive(Debug)]
pub struct RandomPlayer {
    info: PlayerInfo,
    rng: GameRng,
    delay: Duration,
}

impl RandomPlayer {
    pub fn new(info: PlayerInfo, seed: u64) -> Self {
        let rng = GameRng::new(seed).for_context(&format!("player:{}", info.id));
        Self {
            info,
            rng,
            delay: Duration::ZERO,
        }
    }

    /// Simulated thinking time before each action.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Player for RandomPlayer {
    fn info(&self) -> &PlayerInfo {
        &self.info
    }

    async fn get_action(&mut self, state: &GameState) -> Result<ActionResponse, PlayerError> {
        let actions = state.available_actions();
        if actions.is_empty() {
            return Err(PlayerError::NoAvailableActions);
        }

        debug!(ai = %self.info.name, options = actions.len(), "Random player thinking");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let action = *self
            .rng
            .choose(&actions)
            .ok_or(PlayerError::NoAvailableActions)?;
        debug!(ai = %self.info.name, action = %action, "Random player chose action");

        Ok(ActionResponse::new(action))
    }
}
