//! A four-seat duplicate bridge table: deal, auction, play and scoring over a fixed number of rounds.

pub mod auction;
pub mod config;
pub mod deal;
pub mod error;
pub mod play;
pub mod provider;
pub mod scoring;
pub mod session;
pub mod table;

pub use auction::{AuctionEngine, CallOutcome};
pub use config::{TableConfig, VulnerabilitySchedule};
pub use deal::Deck;
pub use error::{CallRejection, ConfigError, DealRejection, PlayRejection, TableError};
pub use play::{PlayEngine, Trick, TrickOutcome};
pub use provider::{DecisionProvider, FirstLegal, RandomLegal};
pub use scoring::{score_deal, DealScore, ScoreBreakdown};
pub use session::{run_round, run_session, Seats};
pub use table::{GamePhase, RoundResult, SeatView, Table};
