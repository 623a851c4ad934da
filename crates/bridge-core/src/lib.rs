pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod hand;
pub mod board;
pub mod call;
pub mod contract;
pub mod auction;
pub mod error;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use hand::{Hand, Hands};
pub use board::{Board, Partnership, Seat, Vulnerability};
pub use call::Call;
pub use contract::{Contract, DoubleStatus};
pub use auction::Auction;
pub use error::ParseError;
