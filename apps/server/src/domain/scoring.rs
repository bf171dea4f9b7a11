//! Round scoring: losers score the pip sum of their remaining cards.

use crate::domain::cards::Card;

/// Pip sum of a hand using A=1 .. K=13.
pub fn hand_value(hand: &[Card]) -> u32 {
    hand.iter().map(|c| c.rank.value() as u32).sum()
}
