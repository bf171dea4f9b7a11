//! Board layout engine: per-suit runs anchored at rank 7.
//!
//! Two rule variants share one capability surface. `StrictLayout` keys runs
//! by `(suit, copy)` so each physical deck grows independently;
//! `FungibleLayout` keys by suit alone and feeds up to two rows from the
//! pooled card supply. The variant is chosen once at session start and never
//! changes mid-session.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::cards::{Card, CopyTag, Suit};
use crate::domain::state::DeckMode;
use crate::errors::domain::{DomainError, ValidationKind};

/// Every run is anchored at 7 and grows strictly outward.
pub const ANCHOR: u8 = 7;

/// Contiguous rank interval of one run. Invariant: `low <= 7 <= high`, and
/// each accepted play moves exactly one bound outward by exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub low: u8,
    pub high: u8,
}

impl Run {
    pub fn open() -> Self {
        Self {
            low: ANCHOR,
            high: ANCHOR,
        }
    }

    /// Whether `rank` extends this run at either bound.
    pub fn extends(&self, rank: u8) -> bool {
        rank == self.high + 1 || rank + 1 == self.low
    }

    /// Grow by one at the matching bound. Returns false when `rank` does not
    /// touch either bound; the run is left unchanged in that case.
    pub fn grow(&mut self, rank: u8) -> bool {
        if rank == self.high + 1 {
            self.high = rank;
            true
        } else if rank + 1 == self.low {
            self.low = rank;
            true
        } else {
            false
        }
    }
}

/// Capability surface shared by the two rule variants.
///
/// First-move gating is not part of the layout; see `rules::is_legal`.
pub trait LayoutRules {
    /// Legality of a candidate card against the current board, ignoring turn
    /// order and first-move gating.
    fn is_card_legal(&self, card: &Card) -> bool;

    /// Commit a card to the board.
    fn place(&mut self, card: &Card) -> Result<(), DomainError>;
}

fn illegal(card: &Card) -> DomainError {
    DomainError::validation(
        ValidationKind::IllegalMove,
        format!("{card} does not extend any run"),
    )
}

/// Per-deck-strict variant: one run per `(suit, copy)` pair.
#[derive(Debug, Clone, Default)]
pub struct StrictLayout {
    runs: BTreeMap<(Suit, CopyTag), Run>,
}

impl StrictLayout {
    pub fn runs(&self) -> impl Iterator<Item = (Suit, CopyTag, &Run)> {
        self.runs.iter().map(|(&(suit, copy), run)| (suit, copy, run))
    }
}

impl LayoutRules for StrictLayout {
    fn is_card_legal(&self, card: &Card) -> bool {
        let key = (card.suit, card.copy);
        match (card.rank.value(), self.runs.get(&key)) {
            (ANCHOR, None) => true,
            (ANCHOR, Some(_)) => false,
            (rank, Some(run)) => run.extends(rank),
            (_, None) => false,
        }
    }

    fn place(&mut self, card: &Card) -> Result<(), DomainError> {
        let key = (card.suit, card.copy);
        let rank = card.rank.value();
        if rank == ANCHOR {
            if self.runs.contains_key(&key) {
                return Err(illegal(card));
            }
            self.runs.insert(key, Run::open());
            return Ok(());
        }
        match self.runs.get_mut(&key) {
            Some(run) => {
                if run.grow(rank) {
                    Ok(())
                } else {
                    Err(illegal(card))
                }
            }
            None => Err(illegal(card)),
        }
    }
}

/// Row slots of one suit's pooled supply.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SuitRows {
    pub row1: Option<Run>,
    pub row2: Option<Run>,
}

/// Pooled-fungible variant: up to two rows per suit, copy tags ignored except
/// for card identity.
#[derive(Debug, Clone, Default)]
pub struct FungibleLayout {
    rows: BTreeMap<Suit, SuitRows>,
}

impl FungibleLayout {
    pub fn suits(&self) -> impl Iterator<Item = (Suit, &SuitRows)> {
        self.rows.iter().map(|(&suit, rows)| (suit, rows))
    }
}

impl LayoutRules for FungibleLayout {
    fn is_card_legal(&self, card: &Card) -> bool {
        let rank = card.rank.value();
        let rows = self.rows.get(&card.suit);
        if rank == ANCHOR {
            // Row1 opens first; a second 7 opens row2; a third is dead.
            return match rows {
                None => true,
                Some(r) => r.row1.is_some() && r.row2.is_none(),
            };
        }
        match rows {
            None => false,
            Some(r) => {
                r.row1.is_some_and(|run| run.extends(rank))
                    || r.row2.is_some_and(|run| run.extends(rank))
            }
        }
    }

    fn place(&mut self, card: &Card) -> Result<(), DomainError> {
        let rank = card.rank.value();
        if rank == ANCHOR {
            let entry = self.rows.entry(card.suit).or_default();
            return if entry.row1.is_none() {
                entry.row1 = Some(Run::open());
                Ok(())
            } else if entry.row2.is_none() {
                entry.row2 = Some(Run::open());
                Ok(())
            } else {
                Err(illegal(card))
            };
        }
        // Deterministic commitment: prefer row1 when both could match.
        let Some(rows) = self.rows.get_mut(&card.suit) else {
            return Err(illegal(card));
        };
        if let Some(run) = rows.row1.as_mut() {
            if run.grow(rank) {
                return Ok(());
            }
        }
        if let Some(run) = rows.row2.as_mut() {
            if run.grow(rank) {
                return Ok(());
            }
        }
        Err(illegal(card))
    }
}

/// The variant selected at session start, held immutably in settings.
#[derive(Debug, Clone)]
pub enum BoardLayout {
    Strict(StrictLayout),
    Fungible(FungibleLayout),
}

impl BoardLayout {
    pub fn for_mode(mode: DeckMode) -> Self {
        match mode {
            DeckMode::One | DeckMode::Two => BoardLayout::Strict(StrictLayout::default()),
            DeckMode::Fungible => BoardLayout::Fungible(FungibleLayout::default()),
        }
    }
}

impl LayoutRules for BoardLayout {
    fn is_card_legal(&self, card: &Card) -> bool {
        match self {
            BoardLayout::Strict(l) => l.is_card_legal(card),
            BoardLayout::Fungible(l) => l.is_card_legal(card),
        }
    }

    fn place(&mut self, card: &Card) -> Result<(), DomainError> {
        match self {
            BoardLayout::Strict(l) => l.place(card),
            BoardLayout::Fungible(l) => l.place(card),
        }
    }
}
