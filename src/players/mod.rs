//! Player controllers.
//!
//! The engine asks the current seat's controller for an action and awaits
//! it without knowing what kind of controller it is:
//!
//! - [`RandomPlayer`]: uniform choice among available actions, after an
//!   optional thinking delay
//! - [`InteractivePlayer`]: waits until a [`SliceSelector`] handle delivers
//!   the choice, e.g. from a UI event
//! - [`NetworkPlayer`]: waits for the remote peer's [`TurnMessage`] and
//!   passes its surviving boards through as replacements
//!
//! [`TurnMessage`]: crate::relay::TurnMessage

mod interactive;
mod network;
mod random;

pub use interactive::{InteractivePlayer, SliceSelector};
pub use network::NetworkPlayer;
pub use random::RandomPlayer;

use async_trait::async_trait;

use crate::core::{ActionResponse, GameState, PlayerInfo};
use crate::error::PlayerError;

/// A controller for one seat.
#[async_trait]
pub trait Player: Send {
    /// The seat this controller plays.
    fn info(&self) -> &PlayerInfo;

    /// Display name.
    fn name(&self) -> &str {
        &self.info().name
    }

    /// Produce the next action for `state`.
    ///
    /// May suspend indefinitely; the engine applies no timeout.
    async fn get_action(&mut self, state: &GameState) -> Result<ActionResponse, PlayerError>;
}
