//! Deck construction, shuffling, and round-robin dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::{Card, CopyTag, Rank, Suit};
use crate::domain::state::DeckMode;

/// Build the full card multiset for the selected mode, in standard order.
pub fn build_deck(mode: DeckMode) -> Vec<Card> {
    let tags: &[CopyTag] = match mode {
        DeckMode::One => &[CopyTag::D0],
        DeckMode::Two => &[CopyTag::D0, CopyTag::D1],
        DeckMode::Fungible => &[CopyTag::C1, CopyTag::C2],
    };

    let mut deck = Vec::with_capacity(52 * tags.len());
    for &copy in tags {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card { suit, rank, copy });
            }
        }
    }
    deck
}

/// Build and shuffle a deck. A seed makes the shuffle reproducible for tests;
/// `None` seeds from system entropy.
pub fn shuffled_deck(mode: DeckMode, seed: Option<u64>) -> Vec<Card> {
    let mut deck = build_deck(mode);
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    deck.shuffle(&mut rng);
    deck
}

/// Deal round-robin, one card per player per pass, until the deck is
/// exhausted. Hand sizes end up differing by at most 1.
pub fn deal(deck: Vec<Card>, hands: &mut [Vec<Card>]) {
    let seats = hands.len();
    for (i, card) in deck.into_iter().enumerate() {
        hands[i % seats].push(card);
    }
}
