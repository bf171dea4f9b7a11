#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod lobby;
pub mod runtime;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::cards::{Card, CopyTag, Rank, Suit};
pub use domain::snapshot::GameSnapshot;
pub use domain::state::{DeckMode, GameSettings, GameState, PlayerId, WinCondition};
pub use error::EngineError;
pub use errors::domain::{DomainError, ValidationKind};
pub use lobby::Lobby;
pub use runtime::{Action, Command, GameHandle, GameServer, Outbound, Scope, ServerMsg};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    server_test_support::logging::init();
}
