//! Domain-level error type used across the rules engine and the runtime loop.
//!
//! This error type is transport-agnostic. The runtime converts rejected
//! actions into targeted warning notices; it never mutates state on error.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds carried by rejected player actions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    GamePaused,
    CardNotInHand,
    IllegalMove,
    IllegalPass,
    PhaseMismatch,
    NotHost,
    UnknownPlayer,
    InvalidSettings,
    NotEnoughPlayers,
    Other(String),
}

impl ValidationKind {
    /// Short human-facing title used for warning notices.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationKind::OutOfTurn => "Not your turn",
            ValidationKind::GamePaused => "Game paused",
            ValidationKind::CardNotInHand => "Card not in hand",
            ValidationKind::IllegalMove => "Invalid move",
            ValidationKind::IllegalPass => "Invalid pass",
            ValidationKind::PhaseMismatch => "Not available right now",
            ValidationKind::NotHost => "Host only",
            ValidationKind::UnknownPlayer => "Unknown player",
            ValidationKind::InvalidSettings => "Invalid settings",
            ValidationKind::NotEnoughPlayers => "Not enough players",
            ValidationKind::Other(_) => "Request rejected",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict (e.g. reconnecting a removed player)
    Conflict(String),
    /// Internal invariant violation
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(d) => write!(f, "conflict: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Title used when surfacing this error to a client as a warning notice.
    pub fn title(&self) -> &'static str {
        match self {
            DomainError::Validation(kind, _) => kind.title(),
            DomainError::Conflict(_) => "Request rejected",
            DomainError::Invariant(_) => "Internal error",
        }
    }
}
