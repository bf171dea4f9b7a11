use crate::domain::cards::{Card, CopyTag, Rank, Suit};
use crate::domain::layout::{BoardLayout, FungibleLayout, LayoutRules, StrictLayout};
use crate::domain::state::DeckMode;

fn card(suit: Suit, rank: Rank, copy: CopyTag) -> Card {
    Card::new(suit, rank, copy)
}

#[test]
fn strict_seven_opens_a_run_at_seven_seven() {
    let mut l = StrictLayout::default();
    let seven = card(Suit::Hearts, Rank::Seven, CopyTag::D0);
    assert!(l.is_card_legal(&seven));
    l.place(&seven).unwrap();

    let (suit, copy, run) = l.runs().next().unwrap();
    assert_eq!((suit, copy), (Suit::Hearts, CopyTag::D0));
    assert_eq!((run.low, run.high), (7, 7));

    // A second 7 on the same (suit, copy) pair is dead.
    assert!(!l.is_card_legal(&seven));
    assert!(l.place(&seven).is_err());
}

#[test]
fn strict_extends_high_by_exactly_one() {
    let mut l = StrictLayout::default();
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::D0)).unwrap();

    let eight = card(Suit::Hearts, Rank::Eight, CopyTag::D0);
    assert!(l.is_card_legal(&eight));
    l.place(&eight).unwrap();
    let (_, _, run) = l.runs().next().unwrap();
    assert_eq!((run.low, run.high), (7, 8));

    // 10 skips 9: rejected, board untouched.
    let ten = card(Suit::Hearts, Rank::Ten, CopyTag::D0);
    assert!(!l.is_card_legal(&ten));
    assert!(l.place(&ten).is_err());
    let (_, _, run) = l.runs().next().unwrap();
    assert_eq!((run.low, run.high), (7, 8));
}

#[test]
fn strict_copy_tags_are_not_interchangeable() {
    let mut l = StrictLayout::default();
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::D0)).unwrap();

    // 6 of Hearts from the other deck has no run yet.
    let six_other_deck = card(Suit::Hearts, Rank::Six, CopyTag::D1);
    assert!(!l.is_card_legal(&six_other_deck));

    // After the other deck's 7 opens its own run, the 6 becomes legal.
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::D1)).unwrap();
    assert!(l.is_card_legal(&six_other_deck));
    l.place(&six_other_deck).unwrap();

    let runs: Vec<_> = l.runs().collect();
    assert_eq!(runs.len(), 2);
}

#[test]
fn strict_runs_stop_at_ace_and_king() {
    let mut l = StrictLayout::default();
    l.place(&card(Suit::Clubs, Rank::Seven, CopyTag::D0)).unwrap();
    for r in [Rank::Six, Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace] {
        l.place(&card(Suit::Clubs, r, CopyTag::D0)).unwrap();
    }
    for r in [
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ] {
        l.place(&card(Suit::Clubs, r, CopyTag::D0)).unwrap();
    }
    let (_, _, run) = l.runs().next().unwrap();
    assert_eq!((run.low, run.high), (1, 13));
}

#[test]
fn fungible_second_seven_opens_row2_third_is_dead() {
    let mut l = FungibleLayout::default();
    let seven_c1 = card(Suit::Hearts, Rank::Seven, CopyTag::C1);
    let seven_c2 = card(Suit::Hearts, Rank::Seven, CopyTag::C2);

    l.place(&seven_c1).unwrap();
    assert!(l.is_card_legal(&seven_c2));
    l.place(&seven_c2).unwrap();

    // Both rows exist; any further 7 of Hearts is never legal.
    assert!(!l.is_card_legal(&seven_c1));
    assert!(!l.is_card_legal(&seven_c2));
    assert!(l.place(&seven_c1).is_err());
}

#[test]
fn fungible_copy_tag_is_ignored_for_non_sevens() {
    let mut l = FungibleLayout::default();
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::C1)).unwrap();

    // An 8 from the other deck extends the pooled row just as well.
    let eight_c2 = card(Suit::Hearts, Rank::Eight, CopyTag::C2);
    assert!(l.is_card_legal(&eight_c2));
    l.place(&eight_c2).unwrap();

    let (_, rows) = l.suits().next().unwrap();
    let row1 = rows.row1.unwrap();
    assert_eq!((row1.low, row1.high), (7, 8));
    assert!(rows.row2.is_none());
}

#[test]
fn fungible_commitment_prefers_row1() {
    let mut l = FungibleLayout::default();
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::C1)).unwrap();
    l.place(&card(Suit::Hearts, Rank::Seven, CopyTag::C2)).unwrap();

    // 8 extends either row; it must land on row1.
    l.place(&card(Suit::Hearts, Rank::Eight, CopyTag::C2)).unwrap();
    let (_, rows) = l.suits().next().unwrap();
    assert_eq!(rows.row1.unwrap().high, 8);
    assert_eq!(rows.row2.unwrap().high, 7);

    // The second 8 of Hearts now only fits row2.
    l.place(&card(Suit::Hearts, Rank::Eight, CopyTag::C1)).unwrap();
    let (_, rows) = l.suits().next().unwrap();
    assert_eq!(rows.row2.unwrap().high, 8);
}

#[test]
fn board_layout_variant_follows_deck_mode() {
    assert!(matches!(
        BoardLayout::for_mode(DeckMode::One),
        BoardLayout::Strict(_)
    ));
    assert!(matches!(
        BoardLayout::for_mode(DeckMode::Two),
        BoardLayout::Strict(_)
    ));
    assert!(matches!(
        BoardLayout::for_mode(DeckMode::Fungible),
        BoardLayout::Fungible(_)
    ));
}
