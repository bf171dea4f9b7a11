//! Entire game/session container, sufficient for pure domain operations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::Card;
use crate::domain::layout::BoardLayout;
use crate::errors::domain::{DomainError, ValidationKind};

pub type PlayerId = Uuid;
pub type ConnectionId = Uuid;

/// Deck-building strategy, fixed for the whole session. Also selects the
/// board layout variant: strict for one/two decks, pooled rows for fungible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckMode {
    One,
    Two,
    Fungible,
}

impl DeckMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(DeckMode::One),
            "2" => Some(DeckMode::Two),
            "fungible" => Some(DeckMode::Fungible),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeckMode::One => "1",
            DeckMode::Two => "2",
            DeckMode::Fungible => "fungible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    FirstOut,
}

impl WinCondition {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first_out" => Some(WinCondition::FirstOut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub deck_mode: DeckMode,
    pub win_condition: WinCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Active,
    Disconnected,
    /// Terminal: the player is bot-controlled for the rest of the session.
    Removed,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Stable across reconnects.
    pub id: PlayerId,
    pub name: String,
    /// Live transport connection, if any.
    pub connection: Option<ConnectionId>,
    /// Opaque token echoed in targeted payloads so the transport can
    /// re-associate a returning connection.
    pub reconnect_token: Uuid,
    pub is_host: bool,
    pub status: PlayerStatus,
    pub is_bot: bool,
    pub hand: Vec<Card>,
    pub score_total: u32,
}

impl Player {
    pub fn human(id: PlayerId, name: impl Into<String>, connection: Option<ConnectionId>) -> Self {
        Self {
            id,
            name: name.into(),
            connection,
            reconnect_token: Uuid::new_v4(),
            is_host: false,
            status: PlayerStatus::Active,
            is_bot: false,
            hand: Vec::new(),
            score_total: 0,
        }
    }

    /// Eligible to take a turn right now: bots with cards, or active humans
    /// with cards.
    pub fn is_available(&self) -> bool {
        !self.hand.is_empty() && (self.is_bot || self.status == PlayerStatus::Active)
    }
}

/// Overall session phases while a game exists. `NoGame` is the absence of a
/// `GameState` at the runtime layer, not a phase here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    RoundInProgress,
    BetweenRounds,
    SessionEnding,
}

#[derive(Debug, Clone, Default)]
pub struct PauseState {
    pub is_paused: bool,
    /// Display names of the players the game is currently waiting on.
    pub paused_for: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub at: OffsetDateTime,
    pub message: String,
}

/// Bounded in-game event history, included in state broadcasts and the
/// session-end dump.
#[derive(Debug, Clone)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl GameLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(64)),
            cap,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: OffsetDateTime::now_utc(),
            message: message.into(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The single process-wide mutable aggregate. At most one exists at a time;
/// the runtime owns it as `Option<GameState>` and passes it explicitly.
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: GameSettings,
    /// Seating order, fixed at session start.
    pub players: Vec<Player>,
    pub layout: BoardLayout,
    pub current_player: PlayerId,
    pub is_first_move: bool,
    pub round_no: u32,
    /// Fixed dealer rotation established at session start, independent of
    /// turn order.
    pub dealer_order: Vec<PlayerId>,
    pub dealer_idx: usize,
    pub phase: Phase,
    pub pause: PauseState,
    pub log: GameLog,
    /// Bumped whenever pending timer callbacks must be invalidated. Every
    /// scheduled callback captures the generation at arm time and no-ops
    /// when it no longer matches.
    pub generation: u64,
}

impl GameState {
    /// Build a fresh session from a seated roster, keeping the ids the seats
    /// already carry. The first seat is host. No round is in progress yet;
    /// call `start_new_round` to deal.
    pub fn new(
        settings: GameSettings,
        seats: Vec<(PlayerId, String, Option<ConnectionId>)>,
        log_cap: usize,
    ) -> Self {
        let mut players: Vec<Player> = seats
            .into_iter()
            .map(|(id, name, conn)| Player::human(id, name, conn))
            .collect();
        if let Some(first) = players.first_mut() {
            first.is_host = true;
        }
        let dealer_order: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let current_player = dealer_order[0];

        Self {
            settings,
            players,
            layout: BoardLayout::for_mode(settings.deck_mode),
            current_player,
            is_first_move: true,
            round_no: 0,
            dealer_order,
            dealer_idx: 0,
            phase: Phase::BetweenRounds,
            pause: PauseState::default(),
            log: GameLog::new(log_cap),
            generation: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn require_player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.player(id).ok_or_else(|| {
            DomainError::validation(ValidationKind::UnknownPlayer, format!("no player {id}"))
        })
    }

    pub fn require_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, DomainError> {
        self.player_mut(id).ok_or_else(|| {
            DomainError::validation(ValidationKind::UnknownPlayer, format!("no player {id}"))
        })
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer_order.get(self.dealer_idx).copied()
    }

    /// Humans still part of the session (bots represent departed humans).
    pub fn seated_human_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_bot).count()
    }

    /// Recompute the game-wide pause gate from player statuses. Pause is
    /// derived, never tracked independently.
    pub fn recompute_pause(&mut self) {
        let paused_for: Vec<String> = self
            .players
            .iter()
            .filter(|p| p.status == PlayerStatus::Disconnected)
            .map(|p| p.name.clone())
            .collect();
        self.pause.is_paused = !paused_for.is_empty();
        self.pause.paused_for = paused_for;
    }
}
