//! Autonomous turn-taking for bot-controlled seats.

use tracing::debug;

use crate::domain::bot;
use crate::domain::state::{GameState, Phase};
use crate::engine::actions::{self, TurnOutcome};
use crate::errors::domain::DomainError;

/// Take one turn on behalf of the current player if, and only if, that seat
/// is bot-controlled and play is unblocked. `Ok(None)` means no bot turn was
/// due, typically because a stale timer tick raced a state change.
pub fn take_bot_action(state: &mut GameState) -> Result<Option<TurnOutcome>, DomainError> {
    if state.phase != Phase::RoundInProgress || state.pause.is_paused {
        return Ok(None);
    }
    let mover = state.current_player;
    let Some(player) = state.player(mover) else {
        return Ok(None);
    };
    if !player.is_bot {
        return Ok(None);
    }

    let name = player.name.clone();
    let pick = bot::choose_card(
        &player.hand,
        &state.layout,
        state.settings.deck_mode,
        state.is_first_move,
    );
    let outcome = match pick {
        Some(card) => {
            debug!(player = %name, card = %card, "bot plays");
            actions::apply_play(state, mover, card)?
        }
        None => {
            debug!(player = %name, "bot passes");
            actions::apply_pass(state, mover)?
        }
    };
    Ok(Some(outcome))
}
