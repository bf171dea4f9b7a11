//! Core card-related types: Card, Rank, Suit, CopyTag

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Pip value, Ace low: A=1 .. K=13.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.value() == v)
    }
}

/// Suffix distinguishing otherwise-identical duplicate cards across decks.
///
/// `D0`/`D1` mark the physical deck in strict play; `C1`/`C2` mark the two
/// decks of a fungible pool, interchangeable for layout purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTag {
    D0,
    D1,
    C1,
    C2,
}

impl CopyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyTag::D0 => "-0",
            CopyTag::D1 => "-1",
            CopyTag::C1 => "-c1",
            CopyTag::C2 => "-c2",
        }
    }
}

/// A single physical card. Identity is the full (suit, rank, copy) triple:
/// two decks' 7 of Hearts are distinct cards even when the rules treat them
/// as interchangeable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub copy: CopyTag,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank, copy: CopyTag) -> Self {
        Self { suit, rank, copy }
    }

    /// Stable identity string, e.g. `"7-hearts-0"`.
    pub fn id(&self) -> String {
        format!("{}-{}{}", self.rank.value(), self.suit.as_str(), self.copy.as_str())
    }
}

// Note: Ord on Card is only for stable sorting: suit, then rank, then copy.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.suit, self.rank, self.copy).cmp(&(other.suit, other.rank, other.copy))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
