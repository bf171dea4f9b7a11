#![allow(dead_code)]

use sevens_server::domain::state::{DeckMode, GameState, WinCondition};
use sevens_server::GameSettings;

// Logging is auto-installed for all test binaries
#[ctor::ctor]
fn init_logging() {
    server_test_support::logging::init();
}

pub fn settings(mode: DeckMode) -> GameSettings {
    GameSettings {
        deck_mode: mode,
        win_condition: WinCondition::FirstOut,
    }
}

/// A seated session in the given mode, no round dealt yet.
pub fn seated(names: &[&str], mode: DeckMode) -> GameState {
    let seats = names
        .iter()
        .map(|n| {
            (
                uuid::Uuid::new_v4(),
                n.to_string(),
                Some(uuid::Uuid::new_v4()),
            )
        })
        .collect();
    GameState::new(settings(mode), seats, 200)
}
