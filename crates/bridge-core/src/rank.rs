use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// Numeric value, 2 through 14 with the ace high.
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        RANK_CHARS[self.value() as usize - 2]
    }

    /// Accepts `2-9`, `T` or `0` for the ten, and `J Q K A` in either case.
    pub fn from_char(c: char) -> Option<Self> {
        let c = match c.to_ascii_uppercase() {
            '0' => 'T',
            c => c,
        };
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::ALL[i])
    }
}

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

impl FromStr for Rank {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or_else(|| ParseError::Rank(s.to_string())),
            _ => Err(ParseError::Rank(s.to_string())),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_parsing() {
        assert_eq!(Rank::from_char('0'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('q'), Some(Rank::Queen));
        assert_eq!(Rank::from_char('Z'), None);
        assert_eq!(Rank::from_char('1'), None);
        assert_eq!("10".parse::<Rank>(), Ok(Rank::Ten));
        assert!("11".parse::<Rank>().is_err());
    }

    #[test]
    fn test_rank_value() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn test_chars_round_trip_in_order() {
        let text: String = Rank::ALL.iter().map(|r| r.to_char()).collect();
        assert_eq!(text, "23456789TJQKA");
        for rank in Rank::ALL {
            assert_eq!(Rank::from_char(rank.to_char().to_ascii_lowercase()), Some(rank));
        }
        assert_eq!(Rank::Ten.to_string(), "T");
    }
}
