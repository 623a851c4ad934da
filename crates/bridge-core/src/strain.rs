use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    pub const ALL: [Strain; 5] = [
        Strain::Clubs,
        Strain::Diamonds,
        Strain::Hearts,
        Strain::Spades,
        Strain::NoTrump,
    ];

    /// Position in bidding order: clubs 0 through no-trump 4.
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        self.to_suit().map_or('N', Suit::to_char)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Strain::NoTrump),
            other => Suit::from_char(other).map(Strain::from_suit),
        }
    }

    pub fn symbol(self) -> &'static str {
        self.to_suit().map_or("NT", Suit::symbol)
    }

    pub fn from_suit(suit: Suit) -> Self {
        Strain::ALL[suit.suit_rank() as usize - 1]
    }

    /// The trump suit this strain names, or `None` for no-trump.
    pub fn to_suit(self) -> Option<Suit> {
        Suit::ALL.get(self.idx()).copied()
    }

    pub fn is_major(self) -> bool {
        self.to_suit().is_some_and(Suit::is_major)
    }

    pub fn is_minor(self) -> bool {
        self.to_suit().is_some_and(Suit::is_minor)
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strain_parsing() {
        assert_eq!(Strain::from_char('S'), Some(Strain::Spades));
        assert_eq!(Strain::from_char('n'), Some(Strain::NoTrump));
        assert_eq!(Strain::from_char('♥'), Some(Strain::Hearts));
        assert_eq!(Strain::from_char('Z'), None);
    }

    #[test]
    fn test_strain_suit_mapping() {
        for suit in Suit::ALL {
            assert_eq!(Strain::from_suit(suit).to_suit(), Some(suit));
        }
        assert_eq!(Strain::NoTrump.to_suit(), None);
        assert_eq!(Strain::NoTrump.symbol(), "NT");
    }

    #[test]
    fn test_strain_bidding_order() {
        let indices: Vec<usize> = Strain::ALL.iter().map(|s| s.idx()).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
        assert!(Strain::Spades < Strain::NoTrump);
        let text: String = Strain::ALL.iter().map(|s| s.to_char()).collect();
        assert_eq!(text, "CDHSN");
    }

    #[test]
    fn test_majors_and_minors() {
        assert!(Strain::Hearts.is_major() && Strain::Spades.is_major());
        assert!(Strain::Clubs.is_minor() && !Strain::Clubs.is_major());
        assert!(!Strain::NoTrump.is_major() && !Strain::NoTrump.is_minor());
    }
}
