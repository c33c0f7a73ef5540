//! Network player: the action comes from a remote peer's turn message.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::Player;
use crate::core::{ActionResponse, GameId, GameState, PlayerInfo};
use crate::error::PlayerError;
use crate::relay::TurnMessage;

/// Stands in for a seat played on another peer.
///
/// Messages tagged with another game, authored by another player, or for a
/// turn that has already been applied are discarded. A message from the
/// future means this peer missed a turn and fails with `OutOfSync`.
#[derive(Debug)]
pub struct NetworkPlayer {
    info: PlayerInfo,
    game_id: GameId,
    inbox: mpsc::UnboundedReceiver<TurnMessage>,
}

impl NetworkPlayer {
    pub fn new(
        info: PlayerInfo,
        game_id: GameId,
        inbox: mpsc::UnboundedReceiver<TurnMessage>,
    ) -> Self {
        Self {
            info,
            game_id,
            inbox,
        }
    }

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }
}

#[async_trait]
impl Player for NetworkPlayer {
    fn info(&self) -> &PlayerInfo {
        &self.info
    }

    async fn get_action(&mut self, state: &GameState) -> Result<ActionResponse, PlayerError> {
        let expected = state.current_turn_number();

        loop {
            let message = self.inbox.recv().await.ok_or(PlayerError::ChannelClosed)?;

            if message.game_id != self.game_id {
                warn!(
                    player = %self.info.name,
                    game = %message.game_id,
                    "Discarding turn message for another game"
                );
                continue;
            }
            if message.turn.player.id != self.info.id {
                warn!(
                    player = %self.info.name,
                    author = %message.turn.player.id,
                    "Discarding turn message from another player"
                );
                continue;
            }
            if message.turn_number < expected {
                debug!(
                    player = %self.info.name,
                    turn = message.turn_number,
                    expected,
                    "Discarding stale turn message"
                );
                continue;
            }
            if message.turn_number > expected {
                return Err(PlayerError::OutOfSync {
                    expected,
                    received: message.turn_number,
                });
            }

            debug!(player = %self.info.name, action = %message.turn.action, "Received remote turn");
            let replacements = message.slice_result.survivors().cloned().collect::<Vec<_>>();
            return Ok(ActionResponse::with_replacements(
                message.turn.action,
                replacements,
            ));
        }
    }
}
