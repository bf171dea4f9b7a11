//! Shared builders for engine unit tests.

use crate::domain::state::{
    DeckMode, GameSettings, GameState, Phase, PlayerId, WinCondition,
};

pub fn settings(mode: DeckMode) -> GameSettings {
    GameSettings {
        deck_mode: mode,
        win_condition: WinCondition::FirstOut,
    }
}

/// A freshly seated session in mode "1", no round started, empty hands.
pub fn fresh_state(names: &[&str]) -> GameState {
    fresh_state_with_mode(names, DeckMode::One)
}

pub fn fresh_state_with_mode(names: &[&str], mode: DeckMode) -> GameState {
    let seats = names
        .iter()
        .map(|n| (uuid::Uuid::new_v4(), n.to_string(), None))
        .collect();
    GameState::new(settings(mode), seats, 200)
}

/// Put a fresh state straight into play without dealing: hands are assigned
/// by the test, the named seat is on turn.
pub fn in_play(state: &mut GameState, current_seat: usize, is_first_move: bool) -> PlayerId {
    state.phase = Phase::RoundInProgress;
    state.round_no = 1;
    state.is_first_move = is_first_move;
    let id = state.players[current_seat].id;
    state.current_player = id;
    id
}
