use crate::table::GamePhase;
use bridge_core::{Call, Card, Seat};
use std::path::PathBuf;
use thiserror::Error;

/// Why the auction refused a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CallRejection {
    #[error("bid level must be between 1 and 7")]
    LevelOutOfRange,
    #[error("bid does not outrank the previous bid")]
    InsufficientBid,
    #[error("no opposing bid to double")]
    NothingToDouble,
    #[error("the bid is already doubled")]
    AlreadyDoubled,
    #[error("no opposing double to redouble")]
    NothingToRedouble,
    #[error("the bid is already redoubled")]
    AlreadyRedoubled,
}

/// Why the play engine refused a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("it is not this seat's turn to play")]
    OutOfTurn,
    #[error("the card is not in the hand")]
    CardNotInHand,
    #[error("must follow the suit led")]
    MustFollowSuit,
}

/// Why a preset deal was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealRejection {
    #[error("{seat} holds {len} cards, expected 13")]
    WrongCount { seat: Seat, len: usize },
    #[error("{card} appears twice")]
    Duplicate { card: Card },
}

/// Errors returned by table operations. A rejected operation leaves the table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("illegal call {call} by {seat}: {reason}")]
    IllegalCall {
        seat: Seat,
        call: Call,
        reason: CallRejection,
    },

    #[error("illegal play {card} by {seat}: {reason}")]
    IllegalPlay {
        seat: Seat,
        card: Card,
        reason: PlayRejection,
    },

    #[error("cannot {operation} during {phase}")]
    InvalidPhaseOperation {
        operation: &'static str,
        phase: GamePhase,
    },

    #[error("trick has {plays} of 4 cards")]
    IncompleteTrickOperation { plays: usize },

    #[error("invalid deal: {0}")]
    InvalidDeal(DealRejection),
}

impl TableError {
    pub(crate) fn phase(operation: &'static str, phase: GamePhase) -> Self {
        TableError::InvalidPhaseOperation { operation, phase }
    }
}

/// Errors raised while loading a [`crate::config::TableConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("rounds must be at least 1")]
    ZeroRounds,

    #[error("vulnerability table must not be empty")]
    EmptySchedule,

    #[error("unknown vulnerability schedule {0:?}")]
    UnknownSchedule(String),
}
