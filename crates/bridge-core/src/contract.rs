use crate::board::{Partnership, Seat};
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl DoubleStatus {
    pub fn multiplier(self) -> u32 {
        match self {
            DoubleStatus::Undoubled => 1,
            DoubleStatus::Doubled => 2,
            DoubleStatus::Redoubled => 4,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Seat,
}

impl Contract {
    pub fn new(level: u8, strain: Strain, declarer: Seat) -> Self {
        Self {
            level,
            strain,
            double_status: DoubleStatus::Undoubled,
            declarer,
        }
    }

    pub fn dummy(&self) -> Seat {
        self.declarer.partner()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.strain.to_suit()
    }

    /// Tricks the declaring side needs to make the contract.
    pub fn required_tricks(&self) -> u8 {
        6 + self.level
    }

    pub fn partnership(&self) -> Partnership {
        self.declarer.partnership()
    }

    pub fn belongs_to(&self, partnership: Partnership) -> bool {
        self.partnership() == partnership
    }

    pub fn is_game(&self) -> bool {
        match self.strain {
            Strain::NoTrump => self.level >= 3,
            Strain::Hearts | Strain::Spades => self.level >= 4,
            Strain::Clubs | Strain::Diamonds => self.level >= 5,
        }
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }

    pub fn is_grand_slam(&self) -> bool {
        self.level == 7
    }

    /// Human-readable form, e.g. `4♠ doubled by South`.
    pub fn describe(&self) -> String {
        let doubled = match self.double_status {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => " doubled",
            DoubleStatus::Redoubled => " redoubled",
        };
        format!(
            "{}{}{} by {}",
            self.level,
            self.strain.symbol(),
            doubled,
            self.declarer.name()
        )
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.level,
            self.strain.to_char(),
            self.double_status.suffix()
        )
    }
}
