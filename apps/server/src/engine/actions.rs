//! The validate→apply pipeline for plays and passes.
//!
//! Every check runs before any mutation; a rejected action leaves the state
//! byte-identical. The same pipeline serves humans and bots.

use tracing::{debug, info};

use crate::domain::cards::Card;
use crate::domain::layout::LayoutRules;
use crate::domain::rules;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::engine::turns;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of an accepted play or pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Continues,
    RoundOver { winner: Option<PlayerId> },
}

/// Play `card` for `who`: turn and pause gates, card-in-hand, legality,
/// then board mutation, log entry, and turn advancement.
pub fn apply_play(
    state: &mut GameState,
    who: PlayerId,
    card: Card,
) -> Result<TurnOutcome, DomainError> {
    ensure_can_act(state, who)?;

    let mode = state.settings.deck_mode;
    let seat = state
        .seat_of(who)
        .ok_or_else(|| DomainError::invariant("acting player lost their seat"))?;

    let pos = state.players[seat]
        .hand
        .iter()
        .position(|c| *c == card)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} is not in your hand"),
            )
        })?;

    if !rules::is_legal(&state.layout, mode, &card, state.is_first_move) {
        return Err(DomainError::validation(
            ValidationKind::IllegalMove,
            format!("{card} cannot be played right now"),
        ));
    }

    // All checks passed: mutate, board first.
    state.layout.place(&card)?;
    state.players[seat].hand.remove(pos);
    state.is_first_move = false;

    let name = state.players[seat].name.clone();
    state.log.push(format!("{name} played {card}"));
    info!(player = %name, card = %card, "play accepted");

    if state.players[seat].hand.is_empty() {
        info!(player = %name, round = state.round_no, "hand emptied, round over");
        return Ok(TurnOutcome::RoundOver { winner: Some(who) });
    }
    advance(state, who)
}

/// Pass for `who`. Only legal when no card in their hand can be played.
pub fn apply_pass(state: &mut GameState, who: PlayerId) -> Result<TurnOutcome, DomainError> {
    ensure_can_act(state, who)?;

    let mode = state.settings.deck_mode;
    let player = state.require_player(who)?;
    if rules::hand_has_legal_move(&player.hand, &state.layout, mode, state.is_first_move) {
        return Err(DomainError::validation(
            ValidationKind::IllegalPass,
            "you still have a legal move",
        ));
    }

    let name = player.name.clone();
    state.log.push(format!("{name} passed"));
    debug!(player = %name, "pass accepted");
    advance(state, who)
}

fn advance(state: &mut GameState, who: PlayerId) -> Result<TurnOutcome, DomainError> {
    match turns::next_available_after(state, who) {
        Some(next) => {
            state.current_player = next;
            Ok(TurnOutcome::Continues)
        }
        None => {
            info!(round = state.round_no, "no available player, round over without winner");
            Ok(TurnOutcome::RoundOver { winner: None })
        }
    }
}

fn ensure_can_act(state: &GameState, who: PlayerId) -> Result<(), DomainError> {
    if state.phase != Phase::RoundInProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "no round is in progress",
        ));
    }
    if state.pause.is_paused {
        return Err(DomainError::validation(
            ValidationKind::GamePaused,
            format!("waiting for {}", state.pause.paused_for.join(", ")),
        ));
    }
    state.require_player(who)?;
    if state.current_player != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "it is not your turn",
        ));
    }
    Ok(())
}
