//! Public snapshot API for observing game state without exposing internals.
//!
//! Every broadcast after a mutation is a per-player redacted view: viewers
//! see their own hand, everyone else's card counts only.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::cards::{Card, CopyTag, Suit};
use crate::domain::layout::{BoardLayout, Run, SuitRows};
use crate::domain::state::{DeckMode, GameState, Phase, PlayerId, PlayerStatus};

/// Public info about a single seat in the game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub is_bot: bool,
    pub status: PlayerStatus,
    pub card_count: usize,
    pub score_total: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrictRunView {
    pub suit: Suit,
    pub copy: CopyTag,
    pub low: u8,
    pub high: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct FungibleSuitView {
    pub suit: Suit,
    pub row1: Option<Run>,
    pub row2: Option<Run>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum LayoutView {
    Strict { runs: Vec<StrictRunView> },
    Fungible { suits: Vec<FungibleSuitView> },
}

impl LayoutView {
    fn from_layout(layout: &BoardLayout) -> Self {
        match layout {
            BoardLayout::Strict(l) => LayoutView::Strict {
                runs: l
                    .runs()
                    .map(|(suit, copy, run)| StrictRunView {
                        suit,
                        copy,
                        low: run.low,
                        high: run.high,
                    })
                    .collect(),
            },
            BoardLayout::Fungible(l) => LayoutView::Fungible {
                suits: l
                    .suits()
                    .map(|(suit, rows): (Suit, &SuitRows)| FungibleSuitView {
                        suit,
                        row1: rows.row1,
                        row2: rows.row2,
                    })
                    .collect(),
            },
        }
    }
}

/// Top-level per-viewer snapshot, emitted after every accepted mutation.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub round_no: u32,
    pub deck_mode: DeckMode,
    pub players: Vec<PlayerPublic>,
    pub layout: LayoutView,
    pub current_player: PlayerId,
    pub is_first_move: bool,
    pub is_paused: bool,
    pub paused_for: Vec<String>,
    pub dealer: Option<PlayerId>,
    pub between_rounds: bool,
    /// The viewer's own cards. Everyone else is reduced to a count.
    pub your_hand: Vec<Card>,
    /// Echoed so the transport can re-associate a returning connection.
    pub reconnect_token: Option<Uuid>,
}

pub fn for_player(state: &GameState, viewer: PlayerId) -> GameSnapshot {
    let players = state
        .players
        .iter()
        .map(|p| PlayerPublic {
            id: p.id,
            name: p.name.clone(),
            is_host: p.is_host,
            is_bot: p.is_bot,
            status: p.status,
            card_count: p.hand.len(),
            score_total: p.score_total,
        })
        .collect();

    let me = state.player(viewer);

    GameSnapshot {
        round_no: state.round_no,
        deck_mode: state.settings.deck_mode,
        players,
        layout: LayoutView::from_layout(&state.layout),
        current_player: state.current_player,
        is_first_move: state.is_first_move,
        is_paused: state.pause.is_paused,
        paused_for: state.pause.paused_for.clone(),
        dealer: state.dealer(),
        between_rounds: state.phase == Phase::BetweenRounds,
        your_hand: me.map(|p| p.hand.clone()).unwrap_or_default(),
        reconnect_token: me.map(|p| p.reconnect_token),
    }
}
