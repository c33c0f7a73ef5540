//! Core engine types: ids, players, actions, RNG, configuration, state.
//!
//! Everything in here is plain data that can cross a relay boundary.
//! Behaviour that needs a running game lives in `engine` and `players`.

pub mod action;
pub mod config;
pub mod id;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionResponse, Turn};
pub use config::{BoardGenConfig, GameConfig};
pub use id::{BoardId, GameId, PlayerId};
pub use player::PlayerInfo;
pub use rng::GameRng;
pub use state::{GameState, StateBuilder};
