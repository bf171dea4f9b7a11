/// Property-based tests for board layout invariants
use proptest::prelude::*;

use crate::domain::cards::{Card, CopyTag, Rank, Suit};
use crate::domain::layout::{BoardLayout, LayoutRules, Run};
use crate::domain::state::DeckMode;

fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

fn strict_card() -> impl Strategy<Value = Card> {
    (suit(), rank(), prop::sample::select(vec![CopyTag::D0, CopyTag::D1]))
        .prop_map(|(s, r, c)| Card::new(s, r, c))
}

fn fungible_card() -> impl Strategy<Value = Card> {
    (suit(), rank(), prop::sample::select(vec![CopyTag::C1, CopyTag::C2]))
        .prop_map(|(s, r, c)| Card::new(s, r, c))
}

fn check_run(run: &Run) {
    assert!(run.low <= 7, "low {} above anchor", run.low);
    assert!(run.high >= 7, "high {} below anchor", run.high);
    assert!((1..=13).contains(&run.low));
    assert!((1..=13).contains(&run.high));
}

fn runs_of(layout: &BoardLayout) -> Vec<Run> {
    match layout {
        BoardLayout::Strict(l) => l.runs().map(|(_, _, run)| *run).collect(),
        BoardLayout::Fungible(l) => l
            .suits()
            .flat_map(|(_, rows)| [rows.row1, rows.row2])
            .flatten()
            .collect(),
    }
}

/// Apply a card stream, placing only when the layout reports legality, and
/// check that every accepted play moves exactly one bound of exactly one run
/// outward by exactly 1 (or opens a fresh {7,7} run).
fn check_stream(mut layout: BoardLayout, cards: Vec<Card>) {
    for card in cards {
        let before = runs_of(&layout);
        let legal = layout.is_card_legal(&card);
        let placed = layout.place(&card);
        assert_eq!(
            legal,
            placed.is_ok(),
            "legality and placement must agree for {card}"
        );

        let after = runs_of(&layout);
        for run in &after {
            check_run(run);
        }

        if placed.is_ok() {
            let spread =
                |runs: &[Run]| -> u32 { runs.iter().map(|r| (r.high - r.low + 1) as u32).sum() };
            assert_eq!(
                spread(&after),
                spread(&before) + 1,
                "each accepted play adds exactly one rank to the board"
            );
        } else {
            assert_eq!(before, after, "rejected play must not mutate the board");
        }
    }
}

proptest! {
    #[test]
    fn prop_strict_runs_grow_outward_by_one(cards in prop::collection::vec(strict_card(), 0..200)) {
        check_stream(BoardLayout::for_mode(DeckMode::Two), cards);
    }

    #[test]
    fn prop_fungible_rows_grow_outward_by_one(cards in prop::collection::vec(fungible_card(), 0..200)) {
        check_stream(BoardLayout::for_mode(DeckMode::Fungible), cards);
    }

    #[test]
    fn prop_fungible_never_holds_more_than_two_rows_per_suit(
        cards in prop::collection::vec(fungible_card(), 0..200)
    ) {
        let mut layout = BoardLayout::for_mode(DeckMode::Fungible);
        for card in cards {
            let _ = layout.place(&card);
        }
        if let BoardLayout::Fungible(l) = &layout {
            let mut sevens_per_suit = 0;
            for (_, rows) in l.suits() {
                let open = rows.row1.iter().count() + rows.row2.iter().count();
                assert!(open <= 2);
                sevens_per_suit = sevens_per_suit.max(open);
            }
            assert!(sevens_per_suit <= 2);
        }
    }
}
