//! Top-level engine error type.

use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("engine loop is not running")]
    ChannelClosed,
}
