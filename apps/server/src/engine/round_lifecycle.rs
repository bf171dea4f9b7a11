//! Round start/end and session-level scoring.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::deck::{deal, shuffled_deck};
use crate::domain::rules;
use crate::domain::scoring;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::{BoardLayout, Card};

/// Whether a new round could actually begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartRoundOutcome {
    Started,
    /// Fewer than two humans remain; the session must wind down instead.
    SessionEnds,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub name: String,
    pub round_score: u32,
    pub total_score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalHand {
    pub name: String,
    pub cards: Vec<Card>,
}

/// Everything a client needs to render the end-of-round screen.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub winner_name: Option<String>,
    /// Sorted ascending by cumulative total (leader first).
    pub scoreboard: Vec<ScoreRow>,
    pub final_hands: Vec<FinalHand>,
    pub host: Option<String>,
}

/// Deal a fresh round: rotate the dealer, reset the board and hands, and hand
/// the opening turn to whoever holds the starting seven. Pending timer
/// callbacks from the previous round are invalidated via the generation bump;
/// the caller re-arms grace timers for players still disconnected.
pub fn start_new_round(state: &mut GameState, seed: Option<u64>) -> StartRoundOutcome {
    if state.seated_human_count() < 2 {
        info!("fewer than two humans remain, session ends");
        return StartRoundOutcome::SessionEnds;
    }

    state.generation += 1;
    state.round_no += 1;
    if state.round_no > 1 {
        state.dealer_idx = (state.dealer_idx + 1) % state.dealer_order.len();
    }

    state.layout = BoardLayout::for_mode(state.settings.deck_mode);
    state.log.clear();
    state.is_first_move = true;
    state.phase = Phase::RoundInProgress;

    let deck = shuffled_deck(state.settings.deck_mode, seed);
    let mut hands: Vec<Vec<Card>> = vec![Vec::new(); state.players.len()];
    deal(deck, &mut hands);
    for (player, mut hand) in state.players.iter_mut().zip(hands) {
        hand.sort();
        player.hand = hand;
    }

    let opener = rules::starting_card(state.settings.deck_mode);
    let first_seat = state
        .players
        .iter()
        .position(|p| p.hand.contains(&opener))
        .unwrap_or_else(|| {
            // Cannot happen with a full deal; recover rather than wedge.
            warn!(card = %opener, "no hand holds the starting card");
            0
        });
    state.current_player = state.players[first_seat].id;

    let dealer_name = state
        .dealer()
        .and_then(|id| state.player(id))
        .map(|p| p.name.clone())
        .unwrap_or_default();
    let first_name = state.players[first_seat].name.clone();
    state
        .log
        .push(format!("Round {} dealt by {dealer_name}", state.round_no));
    state.log.push(format!("{first_name} leads with the first move"));
    info!(
        round = state.round_no,
        dealer = %dealer_name,
        first = %first_name,
        "round started"
    );
    StartRoundOutcome::Started
}

/// Close out a round: the winner scores zero, everyone else the pip value of
/// what they still hold. Only humans accumulate; a seat that went to bot
/// control keeps the total it had. Grace timers survive into the
/// between-rounds phase, so the generation is deliberately left alone.
pub fn end_round(state: &mut GameState, winner: Option<PlayerId>) -> RoundSummary {
    let final_hands: Vec<FinalHand> = state
        .players
        .iter()
        .map(|p| FinalHand {
            name: p.name.clone(),
            cards: p.hand.clone(),
        })
        .collect();

    let mut scoreboard = Vec::with_capacity(state.players.len());
    for player in &mut state.players {
        let round_score = if Some(player.id) == winner {
            0
        } else {
            scoring::hand_value(&player.hand)
        };
        if !player.is_bot {
            player.score_total += round_score;
        }
        scoreboard.push(ScoreRow {
            name: player.name.clone(),
            round_score,
            total_score: player.score_total,
        });
        player.hand.clear();
    }
    scoreboard.sort_by_key(|row| row.total_score);

    let winner_name = winner
        .and_then(|id| state.player(id))
        .map(|p| p.name.clone());
    state.phase = Phase::BetweenRounds;
    state.is_first_move = true;
    match &winner_name {
        Some(name) => state.log.push(format!("{name} wins round {}", state.round_no)),
        None => state
            .log
            .push(format!("Round {} ends with no winner", state.round_no)),
    }
    info!(round = state.round_no, winner = ?winner_name, "round over");

    RoundSummary {
        round_no: state.round_no,
        winner_name,
        scoreboard,
        final_hands,
        host: state.host().map(|p| p.name.clone()),
    }
}

/// Session winners: lowest cumulative total among players who are still human.
pub fn session_winner_names(state: &GameState) -> Vec<String> {
    let best = state
        .players
        .iter()
        .filter(|p| !p.is_bot)
        .map(|p| p.score_total)
        .min();
    match best {
        Some(best) => state
            .players
            .iter()
            .filter(|p| !p.is_bot && p.score_total == best)
            .map(|p| p.name.clone())
            .collect(),
        None => Vec::new(),
    }
}
