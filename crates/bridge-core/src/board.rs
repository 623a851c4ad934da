use crate::error::ParseError;
use crate::hand::Hands;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Seat {
    North,
    East,
    #[default]
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub const ALL: [Partnership; 2] = [Partnership::NS, Partnership::EW];

    pub fn contains(self, seat: Seat) -> bool {
        seat.partnership() == self
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Partnership::NS => [Seat::North, Seat::South],
            Partnership::EW => [Seat::East, Seat::West],
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl fmt::Display for Partnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partnership::NS => write!(f, "NS"),
            Partnership::EW => write!(f, "EW"),
        }
    }
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn partnership(self) -> Partnership {
        match self {
            Seat::North | Seat::South => Partnership::NS,
            Seat::East | Seat::West => Partnership::EW,
        }
    }

    /// The seat to the left, which acts next.
    pub fn next(self) -> Self {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }

    pub fn partner(self) -> Self {
        match self {
            Seat::North => Seat::South,
            Seat::South => Seat::North,
            Seat::East => Seat::West,
            Seat::West => Seat::East,
        }
    }

    /// Left-hand opponent.
    pub fn lho(self) -> Self {
        self.next()
    }

    /// Right-hand opponent.
    pub fn rho(self) -> Self {
        self.partner().next()
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Seat::ALL[index as usize]
    }
}

impl FromStr for Seat {
    type Err = ParseError;

    /// Accepts a single letter or the full seat name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Seat::from_char(c).ok_or_else(|| ParseError::Seat(s.to_string()));
        }
        Seat::ALL
            .into_iter()
            .find(|seat| seat.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| ParseError::Seat(s.to_string()))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, seat: Seat) -> bool {
        self.partnership_vulnerable(seat.partnership())
    }

    pub fn partnership_vulnerable(self, partnership: Partnership) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => partnership == Partnership::NS,
            Vulnerability::EW => partnership == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    /// Standard duplicate rotation over a 16-board cycle.
    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }

    pub fn to_pbn(self) -> &'static str {
        match self {
            Vulnerability::None => "None",
            Vulnerability::NS => "NS",
            Vulnerability::EW => "EW",
            Vulnerability::Both => "All",
        }
    }

    pub fn from_pbn(s: &str) -> Option<Self> {
        match s.trim() {
            "None" | "Love" | "-" => Some(Vulnerability::None),
            "NS" => Some(Vulnerability::NS),
            "EW" => Some(Vulnerability::EW),
            "All" | "Both" => Some(Vulnerability::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Vulnerability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pbn())
    }
}

/// The deal as it stood when the last card was dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    pub hands: Hands,
}

impl Board {
    pub fn new(dealer: Seat, vulnerability: Vulnerability, hands: Hands) -> Self {
        Self {
            dealer,
            vulnerability,
            hands,
        }
    }
}
