//! Post-turn subscribers.
//!
//! The engine notifies every subscribed [`TurnObserver`] after a turn is
//! committed and once when the game ends. Observers see results, never the
//! engine, and the engine works the same with none subscribed.

use tokio::sync::mpsc;

use super::turn::TurnResult;
use crate::core::PlayerInfo;

/// Receives committed turns.
pub trait TurnObserver: Send {
    /// Called once per committed turn, in commit order.
    fn on_turn(&mut self, result: &TurnResult);

    /// Called once when win conditions end the game.
    fn on_game_over(&mut self, _winners: &[PlayerInfo]) {}
}

/// Events forwarded by a [`ChannelObserver`].
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A turn was committed.
    TurnPlayed(Box<TurnResult>),
    /// The game ended.
    GameOver { winners: Vec<PlayerInfo> },
}

/// Forwards engine events onto an unbounded tokio channel.
///
/// A dropped receiver is not an error: events are discarded.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TurnObserver for ChannelObserver {
    fn on_turn(&mut self, result: &TurnResult) {
        let _ = self.tx.send(GameEvent::TurnPlayed(Box::new(result.clone())));
    }

    fn on_game_over(&mut self, winners: &[PlayerInfo]) {
        let _ = self.tx.send(GameEvent::GameOver {
            winners: winners.to_vec(),
        });
    }
}
