//! Turn rotation over currently-available players.

use crate::domain::state::{GameState, PlayerId};

/// First available player strictly after `from` in seating order, wrapping,
/// with `from` itself considered last. Available means: still holding cards,
/// and either a bot or an active human. Returns `None` when nobody at all can
/// act, which ends the round with no winner.
pub fn next_available_after(state: &GameState, from: PlayerId) -> Option<PlayerId> {
    let seats = state.players.len();
    let start = state.seat_of(from)?;
    for step in 1..=seats {
        let candidate = &state.players[(start + step) % seats];
        if candidate.is_available() {
            return Some(candidate.id);
        }
    }
    None
}
