use crate::domain::cards::{Card, CopyTag, Rank, Suit};
use crate::domain::layout::{BoardLayout, LayoutRules};
use crate::domain::rules::{hand_has_legal_move, is_legal, starting_card};
use crate::domain::state::DeckMode;

fn c(suit: Suit, rank: Rank, copy: CopyTag) -> Card {
    Card::new(suit, rank, copy)
}

#[test]
fn starting_card_depends_on_mode() {
    assert_eq!(
        starting_card(DeckMode::One),
        c(Suit::Hearts, Rank::Seven, CopyTag::D0)
    );
    assert_eq!(
        starting_card(DeckMode::Two),
        c(Suit::Hearts, Rank::Seven, CopyTag::D0)
    );
    assert_eq!(
        starting_card(DeckMode::Fungible),
        c(Suit::Hearts, Rank::Seven, CopyTag::C1)
    );
}

#[test]
fn first_move_admits_only_the_designated_seven_of_hearts() {
    let layout = BoardLayout::for_mode(DeckMode::Two);

    assert!(is_legal(
        &layout,
        DeckMode::Two,
        &c(Suit::Hearts, Rank::Seven, CopyTag::D0),
        true,
    ));
    // Other suits' sevens, and the other deck's 7 of Hearts, stay illegal.
    for bad in [
        c(Suit::Spades, Rank::Seven, CopyTag::D0),
        c(Suit::Hearts, Rank::Seven, CopyTag::D1),
        c(Suit::Hearts, Rank::Eight, CopyTag::D0),
    ] {
        assert!(!is_legal(&layout, DeckMode::Two, &bad, true), "{bad}");
    }
}

#[test]
fn after_first_move_sevens_follow_the_open_row_rule() {
    let mut layout = BoardLayout::for_mode(DeckMode::One);
    layout
        .place(&c(Suit::Hearts, Rank::Seven, CopyTag::D0))
        .unwrap();

    assert!(is_legal(
        &layout,
        DeckMode::One,
        &c(Suit::Spades, Rank::Seven, CopyTag::D0),
        false,
    ));
    assert!(is_legal(
        &layout,
        DeckMode::One,
        &c(Suit::Hearts, Rank::Eight, CopyTag::D0),
        false,
    ));
    assert!(!is_legal(
        &layout,
        DeckMode::One,
        &c(Suit::Hearts, Rank::Five, CopyTag::D0),
        false,
    ));
}

#[test]
fn pass_authorization_reflects_the_whole_hand() {
    let mut layout = BoardLayout::for_mode(DeckMode::One);
    layout
        .place(&c(Suit::Hearts, Rank::Seven, CopyTag::D0))
        .unwrap();

    let stuck = vec![
        c(Suit::Clubs, Rank::Two, CopyTag::D0),
        c(Suit::Spades, Rank::King, CopyTag::D0),
    ];
    assert!(!hand_has_legal_move(&stuck, &layout, DeckMode::One, false));

    let playable = vec![
        c(Suit::Clubs, Rank::Two, CopyTag::D0),
        c(Suit::Hearts, Rank::Six, CopyTag::D0),
    ];
    assert!(hand_has_legal_move(&playable, &layout, DeckMode::One, false));
}

#[test]
fn first_move_pass_is_only_legal_without_the_starting_card() {
    let layout = BoardLayout::for_mode(DeckMode::One);
    let without = vec![c(Suit::Spades, Rank::Seven, CopyTag::D0)];
    assert!(!hand_has_legal_move(&without, &layout, DeckMode::One, true));

    let with = vec![c(Suit::Hearts, Rank::Seven, CopyTag::D0)];
    assert!(hand_has_legal_move(&with, &layout, DeckMode::One, true));
}
