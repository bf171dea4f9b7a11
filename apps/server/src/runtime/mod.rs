//! Single-task runtime that owns the game state.
//!
//! All mutation flows through one mpsc channel into one cooperative task;
//! timers are detached sleeps that post commands back into the same channel
//! with a generation token, so nothing ever locks.

pub mod commands;
pub mod server;
pub mod timers;

pub use commands::{Action, Command, Outbound, Scope, ServerMsg, TeardownStep};
pub use server::{GameHandle, GameServer};
