use thiserror::Error;

/// Errors raised while parsing the textual forms of bridge values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid suit {0:?}")]
    Suit(String),
    #[error("invalid rank {0:?}")]
    Rank(String),
    #[error("invalid card {0:?}")]
    Card(String),
    #[error("invalid call {0:?}")]
    Call(String),
    #[error("invalid seat {0:?}")]
    Seat(String),
    #[error("invalid hand {0:?}")]
    Hand(String),
    #[error("invalid board: {0}")]
    Board(String),
}
