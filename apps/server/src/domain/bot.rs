//! Greedy fallback card selection.
//!
//! A pure function of (hand, layout, mode, first-move flag), shared by
//! autonomous bots and removed-player fallback control. Not real AI: the
//! first card in hand order that passes validation wins, and `None` means
//! the only legal action is a pass.

use crate::domain::cards::Card;
use crate::domain::layout::BoardLayout;
use crate::domain::rules;
use crate::domain::state::DeckMode;

pub fn choose_card(
    hand: &[Card],
    layout: &BoardLayout,
    mode: DeckMode,
    is_first_move: bool,
) -> Option<Card> {
    hand.iter()
        .copied()
        .find(|c| rules::is_legal(layout, mode, c, is_first_move))
}
