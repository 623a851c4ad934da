use crate::error::ParseError;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Bid { level: u8, strain: Strain },
    Double,
    Redouble,
}

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// A bid checked to be at level 1 through 7.
    pub fn try_bid(level: u8, strain: Strain) -> Result<Self, ParseError> {
        if (1..=7).contains(&level) {
            Ok(Call::Bid { level, strain })
        } else {
            Err(ParseError::Call(format!("{}{}", level, strain.to_char())))
        }
    }

    /// Ordering key of a bid, `level * 5 + strain index`. Higher outranks lower.
    ///
    /// `None` for non-bids and for bids outside levels 1 through 7.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Call::Bid { level, strain } if (1..=7).contains(level) => {
                Some(level * 5 + strain.idx() as u8)
            }
            _ => None,
        }
    }

    /// Every bid from 1C through 7NT in ascending rank.
    pub fn all_bids() -> impl Iterator<Item = Call> {
        (1..=7u8).flat_map(|level| Strain::ALL.into_iter().map(move |strain| Call::Bid { level, strain }))
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }

    /// Long form used in table transcripts, e.g. `4♠` or `3NT`.
    pub fn pretty(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "Double".to_string(),
            Call::Redouble => "Redouble".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.symbol()),
        }
    }
}

impl FromStr for Call {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Call(s.to_string());
        let t = s.trim().to_ascii_uppercase();
        match t.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }

        let mut chars = t.chars();
        let level = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(err)? as u8;
        let strain = chars.next().and_then(Strain::from_char).ok_or_else(err)?;
        let rest: String = chars.collect();
        match (strain, rest.as_str()) {
            (_, "") | (Strain::NoTrump, "T") => Call::try_bid(level, strain).map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
