//! Pre-game and post-game roster.
//!
//! The lobby is where players sit before the first round and where survivors
//! land after a session winds down. It carries no card state; the runtime
//! trades it for a `GameState` when the host starts a round.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::state::{ConnectionId, GameState, PlayerId, PlayerStatus};

#[derive(Debug, Clone)]
pub struct LobbyPlayer {
    pub id: PlayerId,
    pub name: String,
    pub connection: Option<ConnectionId>,
    pub is_host: bool,
    pub ready: bool,
}

/// Wire view of a lobby seat.
#[derive(Debug, Clone, Serialize)]
pub struct LobbyPlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub ready: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Lobby {
    pub players: Vec<LobbyPlayer>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a ready player; the first seat taken is host.
    pub fn add_ready(&mut self, name: impl Into<String>, connection: Option<ConnectionId>) {
        let is_host = self.players.is_empty();
        self.players.push(LobbyPlayer {
            id: Uuid::new_v4(),
            name: name.into(),
            connection,
            is_host,
            ready: true,
        });
    }

    pub fn ready_players(&self) -> impl Iterator<Item = &LobbyPlayer> {
        self.players.iter().filter(|p| p.ready)
    }

    /// Humans who outlived a session come back to the lobby with their seats;
    /// bot-converted seats are left behind.
    pub fn from_survivors(state: &GameState) -> Self {
        let mut players: Vec<LobbyPlayer> = state
            .players
            .iter()
            .filter(|p| !p.is_bot && p.status != PlayerStatus::Removed)
            .map(|p| LobbyPlayer {
                id: p.id,
                name: p.name.clone(),
                connection: p.connection,
                is_host: p.is_host,
                ready: false,
            })
            .collect();
        if !players.iter().any(|p| p.is_host) {
            if let Some(first) = players.first_mut() {
                first.is_host = true;
            }
        }
        Self { players }
    }

    pub fn public(&self) -> Vec<LobbyPlayerPublic> {
        self.players
            .iter()
            .map(|p| LobbyPlayerPublic {
                id: p.id,
                name: p.name.clone(),
                is_host: p.is_host,
                ready: p.ready,
                connected: p.connection.is_some(),
            })
            .collect()
    }
}
