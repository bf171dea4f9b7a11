//! Domain layer: pure game logic types and helpers.

pub mod bot;
pub mod cards;
pub mod deck;
pub mod layout;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests_layout;
#[cfg(test)]
mod tests_props_layout;
#[cfg(test)]
mod tests_rules;

// Re-exports for ergonomics
pub use cards::{Card, CopyTag, Rank, Suit};
pub use layout::{BoardLayout, LayoutRules, Run};
pub use state::{DeckMode, GameState, PlayerId, PlayerStatus};
