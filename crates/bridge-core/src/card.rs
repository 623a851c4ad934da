use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single playing card. Equality is by suit and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn value(self) -> u8 {
        self.rank.value()
    }

    pub fn suit_rank(self) -> u8 {
        self.suit.suit_rank()
    }

    /// Ordering used when cutting for dealer: card value first, then suit rank.
    pub fn draw_order(self, other: Card) -> Ordering {
        self.value()
            .cmp(&other.value())
            .then(self.suit_rank().cmp(&other.suit_rank()))
    }

    /// Ordering used for hand display: spades first, high cards first.
    pub fn display_order(self, other: Card) -> Ordering {
        other
            .suit_rank()
            .cmp(&self.suit_rank())
            .then(other.value().cmp(&self.value()))
    }

    /// Renders the card with a suit symbol, e.g. `♠A`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.suit.symbol(), self.rank)
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parses `SA`, `HT`, `D10`, or the rank-first forms `AS` and `10D`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Card(s.to_string());
        let t = s.trim();
        let first = t.chars().next().ok_or_else(err)?;
        let first_len = first.len_utf8();

        if let Some(suit) = Suit::from_char(first) {
            let rank: Rank = t[first_len..].parse().map_err(|_| err())?;
            return Ok(Card { suit, rank });
        }

        let last = t.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(last).ok_or_else(err)?;
        let rank: Rank = t[..t.len() - last.len_utf8()].parse().map_err(|_| err())?;
        Ok(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}
