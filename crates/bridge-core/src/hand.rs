use crate::board::Seat;
use crate::card::Card;
use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the card, returning whether it was held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    /// Sorts for display: spades first, high cards first within a suit.
    pub fn sort(&mut self) {
        self.cards.sort_by(|a, b| a.display_order(*b));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards of one suit, in hand order.
    pub fn cards_in(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.suit == suit)
    }

    /// PBN form `S.H.D.C`, e.g. `AK2.QJ3.T987.654`.
    pub fn to_pbn(&self) -> String {
        let mut sorted = self.clone();
        sorted.sort();
        Suit::DESCENDING
            .iter()
            .map(|&suit| sorted.cards_in(suit).map(|c| c.rank.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Hand {
    type Err = ParseError;

    /// Parses the PBN form `S.H.D.C`; empty groups are voids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.trim().split('.').collect();
        if groups.len() != 4 {
            return Err(ParseError::Hand(s.to_string()));
        }
        let mut cards = Vec::new();
        for (&suit, group) in Suit::DESCENDING.iter().zip(groups) {
            for c in group.chars() {
                let rank = Rank::from_char(c).ok_or_else(|| ParseError::Hand(s.to_string()))?;
                let card = Card::new(suit, rank);
                if cards.contains(&card) {
                    return Err(ParseError::Hand(s.to_string()));
                }
                cards.push(card);
            }
        }
        Ok(Hand { cards })
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pbn())
    }
}

/// The four hands at the table, indexed by seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hands([Hand; 4]);

impl Hands {
    pub fn new(north: Hand, east: Hand, south: Hand, west: Hand) -> Self {
        Self([north, east, south, west])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Hand)> {
        Seat::ALL.into_iter().zip(self.0.iter())
    }

    pub fn total_cards(&self) -> usize {
        self.0.iter().map(Hand::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Hand::is_empty)
    }

    /// Seat currently holding the card, if any.
    pub fn holder(&self, card: Card) -> Option<Seat> {
        self.iter().find(|(_, hand)| hand.contains(card)).map(|(seat, _)| seat)
    }

    /// True when the hands hold 13 cards each and together the whole deck.
    pub fn is_full_deal(&self) -> bool {
        if self.0.iter().any(|h| h.len() != HAND_SIZE) {
            return false;
        }
        let mut seen = std::collections::HashSet::new();
        self.0.iter().flat_map(Hand::iter).all(|&c| seen.insert(c))
    }
}

impl Index<Seat> for Hands {
    type Output = Hand;

    fn index(&self, seat: Seat) -> &Hand {
        &self.0[seat.idx()]
    }
}

impl IndexMut<Seat> for Hands {
    fn index_mut(&mut self, seat: Seat) -> &mut Hand {
        &mut self.0[seat.idx()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_sorting() {
        let mut hand = Hand::new(vec![
            Card::new(Suit::Clubs, Rank::Ace),
            Card::new(Suit::Spades, Rank::Two),
            Card::new(Suit::Spades, Rank::Queen),
        ]);
        hand.sort();
        assert_eq!(hand.cards[0], Card::new(Suit::Spades, Rank::Queen));
        assert_eq!(hand.cards[1], Card::new(Suit::Spades, Rank::Two));
        assert_eq!(hand.cards[2].suit, Suit::Clubs);
    }

    #[test]
    fn test_remove_and_contains() {
        let sa = Card::new(Suit::Spades, Rank::Ace);
        let mut hand = Hand::new(vec![sa, Card::new(Suit::Hearts, Rank::Two)]);
        assert!(hand.contains(sa));
        assert!(hand.remove(sa));
        assert!(!hand.remove(sa));
        assert_eq!(hand.len(), 1);
        assert!(!hand.has_suit(Suit::Spades));
        assert!(hand.has_suit(Suit::Hearts));
        assert_eq!(hand.length(Suit::Hearts), 1);
    }

    #[test]
    fn test_pbn_hand() {
        let hand: Hand = "AK2.QJ3.T987.654".parse().unwrap();
        assert_eq!(hand.len(), 13);
        assert_eq!(hand.length(Suit::Diamonds), 4);
        assert_eq!(hand.to_pbn(), "AK2.QJ3.T987.654");

        let void: Hand = "AKQJT98765432...".parse().unwrap();
        assert_eq!(void.length(Suit::Spades), 13);
        assert_eq!(void.to_pbn(), "AKQJT98765432...");

        assert!("AK2.QJ3.T987".parse::<Hand>().is_err());
        assert!("AA.QJ3.T987.654".parse::<Hand>().is_err());
        assert!("AZ.QJ3.T987.654".parse::<Hand>().is_err());
    }

    #[test]
    fn test_hands_indexing() {
        let mut hands = Hands::default();
        let card = Card::new(Suit::Diamonds, Rank::Jack);
        hands[Seat::East].push(card);
        assert_eq!(hands[Seat::East].len(), 1);
        assert_eq!(hands.holder(card), Some(Seat::East));
        assert_eq!(hands.total_cards(), 1);
        assert!(!hands.is_full_deal());
    }
}
