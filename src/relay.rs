//! Wire types for relaying a game between peers.
//!
//! Only plain data crosses this boundary: boards, turns, slice results,
//! player records and whole state snapshots. The relay server itself just
//! mirrors these messages and has no say over the rules.
//!
//! Two codecs are provided: JSON for the relay server, bincode for compact
//! local transport.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::board::SliceResult;
use crate::core::{GameId, GameState, PlayerId, PlayerInfo, Turn};
use crate::engine::{TurnObserver, TurnResult};
use crate::error::RelayError;

/// One applied turn, as sent to the other peers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnMessage {
    pub game_id: GameId,

    /// Turn number the turn was applied at (history length before it).
    pub turn_number: usize,

    pub turn: Turn,

    /// Lets the receiver keep the sender's board ids.
    pub slice_result: SliceResult,
}

impl TurnMessage {
    #[must_use]
    pub fn from_result(game_id: GameId, result: &TurnResult) -> Self {
        Self {
            game_id,
            turn_number: result.turn_number(),
            turn: result.turn.clone(),
            slice_result: result.slice_result.clone(),
        }
    }
}

/// One participant as the session layer knows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlayer {
    pub id: PlayerId,
    pub name: String,
}

/// The session record mirrored by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub game_id: GameId,

    /// Participants in join order.
    pub players: Vec<SessionPlayer>,
}

impl SessionInfo {
    #[must_use]
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            players: Vec::new(),
        }
    }

    /// Add a participant. Ids are taken as given; a repeated id is ignored.
    pub fn join(&mut self, id: impl Into<PlayerId>, name: impl Into<String>) {
        let id = id.into();
        if self.players.iter().all(|p| p.id != id) {
            self.players.push(SessionPlayer {
                id,
                name: name.into(),
            });
        }
    }

    /// Player records with turn remainders assigned by join order.
    #[must_use]
    pub fn player_infos(&self) -> Vec<PlayerInfo> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerInfo::new(p.id.clone(), p.name.clone(), i as u32))
            .collect()
    }
}

/// Everything that travels over the relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RelayMessage {
    /// Session roster update.
    Session(SessionInfo),
    /// A turn applied by one peer.
    Turn(TurnMessage),
    /// A full state, for resync.
    Snapshot { game_id: GameId, state: GameState },
}

impl RelayMessage {
    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RelayError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RelayError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The game this message belongs to.
    #[must_use]
    pub fn game_id(&self) -> GameId {
        match self {
            RelayMessage::Session(session) => session.game_id,
            RelayMessage::Turn(turn) => turn.game_id,
            RelayMessage::Snapshot { game_id, .. } => *game_id,
        }
    }
}

/// Forwards turns made by local seats to the relay.
///
/// Turns by remote seats were received from the relay in the first place
/// and are not echoed back.
#[derive(Debug)]
pub struct RelayBroadcaster {
    game_id: GameId,
    local: FxHashSet<PlayerId>,
    tx: mpsc::UnboundedSender<TurnMessage>,
}

impl RelayBroadcaster {
    /// Create a broadcaster for the given local seats, and its outbox.
    pub fn new(
        game_id: GameId,
        local: impl IntoIterator<Item = PlayerId>,
    ) -> (Self, mpsc::UnboundedReceiver<TurnMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = Self {
            game_id,
            local: local.into_iter().collect(),
            tx,
        };
        (broadcaster, rx)
    }
}

impl TurnObserver for RelayBroadcaster {
    fn on_turn(&mut self, result: &TurnResult) {
        if !self.local.contains(&result.turn.player.id) {
            return;
        }
        let message = TurnMessage::from_result(self.game_id, result);
        debug!(game = %self.game_id, turn = message.turn_number, "Broadcasting turn");
        if self.tx.send(message).is_err() {
            debug!(game = %self.game_id, "Relay outbox closed; turn not broadcast");
        }
    }
}
