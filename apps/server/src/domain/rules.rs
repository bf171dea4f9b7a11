//! Move legality: first-move gating plus layout delegation.

use crate::domain::cards::{Card, CopyTag, Rank, Suit};
use crate::domain::layout::{BoardLayout, LayoutRules};
use crate::domain::state::DeckMode;

/// The fixed card that must open every round: 7 of Hearts of the designated
/// copy (`-0` in strict play, `-c1` in fungible play).
pub fn starting_card(mode: DeckMode) -> Card {
    let copy = match mode {
        DeckMode::Fungible => CopyTag::C1,
        DeckMode::One | DeckMode::Two => CopyTag::D0,
    };
    Card::new(Suit::Hearts, Rank::Seven, copy)
}

/// Server-authoritative legality of a single candidate play.
///
/// On the first move of a round only the designated starting card is legal;
/// every other card, other suits' sevens included, is rejected until it has
/// been played.
pub fn is_legal(layout: &BoardLayout, mode: DeckMode, card: &Card, is_first_move: bool) -> bool {
    if is_first_move {
        return *card == starting_card(mode);
    }
    layout.is_card_legal(card)
}

/// Whether any card in `hand` is currently playable. A pass is only legal
/// when this returns false for the acting player's full hand.
pub fn hand_has_legal_move(
    hand: &[Card],
    layout: &BoardLayout,
    mode: DeckMode,
    is_first_move: bool,
) -> bool {
    hand.iter().any(|c| is_legal(layout, mode, c, is_first_move))
}
