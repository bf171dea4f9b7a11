//! Wire-facing action/message types and the runtime's internal command set.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{ConnectionId, LogEntry, PlayerId};
use crate::engine::round_lifecycle::RoundSummary;
use crate::lobby::LobbyPlayerPublic;

/// Settings as they arrive from a client; parsed into `GameSettings` by the
/// runtime so bad values surface as a validation error, not a deser failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsMsg {
    pub deck_mode: String,
    pub win_condition: String,
}

/// Player-originated requests plus transport notifications, one channel's
/// worth of everything a connection layer can ask of the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    StartRound {
        requester: PlayerId,
        settings: SettingsMsg,
    },
    PlayCard {
        player: PlayerId,
        card: Card,
    },
    PassTurn {
        player: PlayerId,
    },
    RequestNextRound {
        requester: PlayerId,
    },
    MarkPlayerAfk {
        requester: PlayerId,
        target: PlayerId,
    },
    PlayerIsBack {
        player: PlayerId,
    },
    EndSession {
        requester: PlayerId,
    },
    PlayerDisconnected {
        player: PlayerId,
    },
    PlayerReconnected {
        player: PlayerId,
        prior: Option<PlayerId>,
        name: String,
        connection: ConnectionId,
    },
}

/// Teardown is a two-beat sequence so clients can show the final log before
/// being dropped back to the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    BroadcastLog,
    ReturnToLobby,
}

/// Everything the runtime task consumes. Timer callbacks carry the
/// generation captured when they were armed; a mismatch means the state has
/// moved on and the tick is dropped.
#[derive(Debug, Clone)]
pub enum Command {
    Action(Action),
    BotTick { generation: u64 },
    GraceExpired { player: PlayerId, generation: u64 },
    Teardown { step: TeardownStep, generation: u64 },
}

/// Delivery scope for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Player(PlayerId),
}

#[derive(Debug, Clone)]
pub struct Outbound {
    pub scope: Scope,
    pub msg: ServerMsg,
}

impl Outbound {
    pub fn all(msg: ServerMsg) -> Self {
        Self {
            scope: Scope::All,
            msg,
        }
    }

    pub fn to(player: PlayerId, msg: ServerMsg) -> Self {
        Self {
            scope: Scope::Player(player),
            msg,
        }
    }
}

/// Server-to-client messages.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    GameState { view: GameSnapshot },
    LobbyState { players: Vec<LobbyPlayerPublic> },
    RoundOver { summary: RoundSummary },
    GameOver { winner_names: Vec<String> },
    SessionEnded { log: Vec<LogEntry> },
    AfkNotice { player: String },
    Warning { title: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let json = r#"{
            "action": "start_round",
            "requester": "7f8a1f8e-27b1-4d2e-9c3e-5a4b6c7d8e9f",
            "settings": {"deck_mode": "fungible", "win_condition": "first_out"}
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        match action {
            Action::StartRound { settings, .. } => {
                assert_eq!(settings.deck_mode, "fungible");
                assert_eq!(settings.win_condition, "first_out");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn play_card_round_trips_the_card_payload() {
        let json = r#"{
            "action": "play_card",
            "player": "7f8a1f8e-27b1-4d2e-9c3e-5a4b6c7d8e9f",
            "card": {"suit": "hearts", "rank": "seven", "copy": "d0"}
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert!(matches!(action, Action::PlayCard { .. }));
    }

    #[test]
    fn server_messages_carry_a_type_tag() {
        let msg = ServerMsg::Warning {
            title: "Not your turn".into(),
            message: "wait for your turn".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["title"], "Not your turn");
    }
}
