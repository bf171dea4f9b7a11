//! Stateful orchestration over a single `GameState`.
//!
//! Everything here is synchronous: handlers take the state explicitly and
//! either mutate it fully or reject without touching it. Timer scheduling
//! lives one layer up in `runtime`.

pub mod actions;
pub mod bots;
pub mod presence;
pub mod round_lifecycle;
pub mod turns;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use actions::TurnOutcome;
