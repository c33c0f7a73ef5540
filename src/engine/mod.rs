//! The turn loop.
//!
//! ## Key Components
//!
//! - [`Game`]: owns the current state and the player controllers, drives
//!   `AwaitingAction -> Validating -> Applying -> CheckingWin`
//! - [`TurnResult`]: the before/after snapshots and slice outcome of a turn
//! - [`TurnObserver`]: post-turn subscribers (presentation, relay)
//! - [`advance`]: the pure state transition behind every applied turn

mod game;
mod observer;
mod phase;
mod turn;

pub use game::Game;
pub use observer::{ChannelObserver, GameEvent, TurnObserver};
pub use phase::EnginePhase;
pub use turn::{advance, TurnResult};
