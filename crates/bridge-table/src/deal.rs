//! Deck construction, dealing, and the draw for first dealer.

use crate::error::DealRejection;
use bridge_core::hand::HAND_SIZE;
use bridge_core::{Card, Hands, Rank, Seat, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, clubs first, two through ace.
    pub fn ordered() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Deals the whole deck one card at a time, starting left of the dealer.
///
/// Panics if the deck repeats a card; a deck is only ever built here.
pub fn deal(deck: Deck, dealer: Seat) -> Hands {
    let mut seen = HashSet::with_capacity(deck.len());
    assert!(
        deck.cards.iter().all(|&c| seen.insert(c)),
        "deck contains a duplicate card"
    );
    assert_eq!(deck.len(), DECK_SIZE, "deck must hold 52 cards");

    let mut hands = Hands::default();
    let mut seat = dealer.next();
    for card in deck.cards {
        hands[seat].push(card);
        seat = seat.next();
    }
    for seat in Seat::ALL {
        assert_eq!(hands[seat].len(), HAND_SIZE);
        hands[seat].sort();
    }
    hands
}

/// Every seat draws a card from a fresh shuffle; the highest card deals first.
pub fn draw_for_dealer(rng: &mut impl Rng) -> (Seat, [(Seat, Card); 4]) {
    let deck = Deck::shuffled(rng);
    let draws = [
        (Seat::North, deck.cards[0]),
        (Seat::East, deck.cards[1]),
        (Seat::South, deck.cards[2]),
        (Seat::West, deck.cards[3]),
    ];
    let mut winner = draws[0];
    for draw in &draws[1..] {
        if draw.1.draw_order(winner.1).is_gt() {
            winner = *draw;
        }
    }
    (winner.0, draws)
}

/// Checks caller-supplied hands form a complete, disjoint deal.
pub fn validate_hands(hands: &Hands) -> Result<(), DealRejection> {
    if let Some((seat, hand)) = hands.iter().find(|(_, hand)| hand.len() != HAND_SIZE) {
        return Err(DealRejection::WrongCount { seat, len: hand.len() });
    }
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for (_, hand) in hands.iter() {
        if let Some(&card) = hand.iter().find(|&&c| !seen.insert(c)) {
            return Err(DealRejection::Duplicate { card });
        }
    }
    Ok(())
}
