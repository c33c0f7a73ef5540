//! Interactive player: the action arrives from outside the engine.
//!
//! `get_action` parks a oneshot sender in a shared single slot and awaits
//! the receiver. A [`SliceSelector`] held by the UI (or a test) takes the
//! sender out of the slot and fires it. Only one request may be pending
//! per player at a time.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::debug;

use super::Player;
use crate::core::{ActionResponse, GameState, PlayerId, PlayerInfo};
use crate::error::PlayerError;

type Slot = Arc<Mutex<Option<oneshot::Sender<ActionResponse>>>>;

/// Waits for an externally selected action.
#[derive(Debug)]
pub struct InteractivePlayer {
    info: PlayerInfo,
    slot: Slot,
}

/// Handle that delivers a selected action to a waiting [`InteractivePlayer`].
#[derive(Clone, Debug)]
pub struct SliceSelector {
    player: PlayerId,
    slot: Slot,
}

impl InteractivePlayer {
    /// Create a player and its first selector handle.
    pub fn new(info: PlayerInfo) -> (Self, SliceSelector) {
        let player = Self {
            info,
            slot: Arc::new(Mutex::new(None)),
        };
        let selector = player.selector();
        (player, selector)
    }

    /// Another handle onto the same slot.
    #[must_use]
    pub fn selector(&self) -> SliceSelector {
        SliceSelector {
            player: self.info.id.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

#[async_trait]
impl Player for InteractivePlayer {
    fn info(&self) -> &PlayerInfo {
        &self.info
    }

    async fn get_action(&mut self, _state: &GameState) -> Result<ActionResponse, PlayerError> {
        let rx = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            // A sender whose receiver is gone belongs to an abandoned request.
            if slot.as_ref().is_some_and(|tx| !tx.is_closed()) {
                return Err(PlayerError::RequestOutstanding(self.info.id.clone()));
            }
            let (tx, rx) = oneshot::channel();
            *slot = Some(tx);
            rx
        };

        debug!(player = %self.info.name, "Waiting for slice selection");
        rx.await.map_err(|_| PlayerError::ChannelClosed)
    }
}

impl SliceSelector {
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Is the player currently waiting for a selection?
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Resolve the pending request.
    ///
    /// Fails with `NoPendingRequest` when nothing is waiting. The engine
    /// validates the action, not the selector.
    pub fn select(&self, response: impl Into<ActionResponse>) -> Result<(), PlayerError> {
        let tx = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(PlayerError::NoPendingRequest)?;

        tx.send(response.into())
            .map_err(|_| PlayerError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Slice;
    use crate::core::{Action, BoardId};

    fn state() -> GameState {
        GameState::new([PlayerInfo::new("h", "Human", 0)], []).unwrap()
    }

    async fn wait_until_pending(selector: &SliceSelector) {
        while !selector.is_pending() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_selection_resolves_request() {
        let (mut player, selector) = InteractivePlayer::new(PlayerInfo::new("h", "Human", 0));
        let action = Action::new(BoardId::new(1), Slice::vertical(1));

        let ui = tokio::spawn(async move {
            wait_until_pending(&selector).await;
            selector.select(action)
        });

        let response = player.get_action(&state()).await.unwrap();
        assert_eq!(response.action, action);
        assert_eq!(ui.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_select_without_request_fails() {
        let (_player, selector) = InteractivePlayer::new(PlayerInfo::new("h", "Human", 0));
        let action = Action::new(BoardId::new(1), Slice::vertical(1));

        assert!(!selector.is_pending());
        assert_eq!(selector.select(action), Err(PlayerError::NoPendingRequest));
    }

    #[tokio::test]
    async fn test_abandoned_request_frees_slot() {
        let (mut player, selector) = InteractivePlayer::new(PlayerInfo::new("h", "Human", 0));
        let s = state();

        // Drop the first request before it resolves.
        {
            let pending = player.get_action(&s);
            let timed_out =
                tokio::time::timeout(std::time::Duration::from_millis(5), pending).await;
            assert!(timed_out.is_err());
        }
        assert!(!selector.is_pending());

        let action = Action::new(BoardId::new(2), Slice::horizontal(1));
        let second = player.selector();
        let ui = tokio::spawn(async move {
            wait_until_pending(&second).await;
            second.select(action)
        });
        assert_eq!(player.get_action(&s).await.unwrap().action, action);
        ui.await.unwrap().unwrap();
    }

    #[test]
    fn test_selector_names_player() {
        let (player, selector) = InteractivePlayer::new(PlayerInfo::new("h", "Human", 0));
        assert_eq!(selector.player(), &PlayerId::from("h"));
        assert_eq!(player.selector().player(), selector.player());
    }
}
