//! The bidding state machine.

use crate::error::{CallRejection, TableError};
use crate::table::GamePhase;
use bridge_core::{Auction, Call, Contract, DoubleStatus, Seat};
use tracing::debug;

/// What happened after an accepted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Continue { next: Seat },
    Contract(Contract),
    PassedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionEngine {
    auction: Auction,
    bidder: Seat,
    consecutive_passes: usize,
    double_status: DoubleStatus,
    finished: bool,
}

impl AuctionEngine {
    pub fn new(dealer: Seat) -> Self {
        Self {
            auction: Auction::new(dealer),
            bidder: dealer,
            consecutive_passes: 0,
            double_status: DoubleStatus::Undoubled,
            finished: false,
        }
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn dealer(&self) -> Seat {
        self.auction.dealer
    }

    /// The seat due to call, or `None` once the auction is over.
    pub fn bidder(&self) -> Option<Seat> {
        (!self.finished).then_some(self.bidder)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn double_status(&self) -> DoubleStatus {
        self.double_status
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    pub fn history(&self) -> Vec<(Seat, Call)> {
        self.auction.iter().map(|(seat, call)| (seat, *call)).collect()
    }

    /// Checks `call` against the auction so far, for the seat due to call.
    pub fn check(&self, call: Call) -> Result<(), CallRejection> {
        match call {
            Call::Pass => Ok(()),
            Call::Bid { level, .. } => {
                if !(1..=7).contains(&level) {
                    return Err(CallRejection::LevelOutOfRange);
                }
                let high = self.auction.last_bid().and_then(|(_, bid)| bid.rank());
                match (call.rank(), high) {
                    (Some(rank), Some(high)) if rank <= high => Err(CallRejection::InsufficientBid),
                    _ => Ok(()),
                }
            }
            Call::Double => match self.auction.last_action() {
                Some((seat, Call::Bid { .. }))
                    if seat.partnership() != self.bidder.partnership()
                        && self.double_status == DoubleStatus::Undoubled =>
                {
                    Ok(())
                }
                Some((_, Call::Double | Call::Redouble)) => Err(CallRejection::AlreadyDoubled),
                _ => Err(CallRejection::NothingToDouble),
            },
            Call::Redouble => match self.auction.last_action() {
                Some((seat, Call::Double))
                    if seat.partnership() != self.bidder.partnership()
                        && self.double_status == DoubleStatus::Doubled =>
                {
                    Ok(())
                }
                Some((_, Call::Redouble)) => Err(CallRejection::AlreadyRedoubled),
                _ => Err(CallRejection::NothingToRedouble),
            },
        }
    }

    /// Applies a call for the current bidder. Rejected calls change nothing.
    pub fn make_call(&mut self, call: Call) -> Result<CallOutcome, TableError> {
        let seat = self.bidder;
        if self.finished {
            return Err(TableError::phase("call after the auction closed", GamePhase::Auction));
        }
        self.check(call)
            .map_err(|reason| TableError::IllegalCall { seat, call, reason })?;

        self.auction.add_call(call);
        match call {
            Call::Pass => self.consecutive_passes += 1,
            Call::Bid { .. } => {
                self.consecutive_passes = 0;
                self.double_status = DoubleStatus::Undoubled;
            }
            Call::Double => {
                self.consecutive_passes = 0;
                self.double_status = DoubleStatus::Doubled;
            }
            Call::Redouble => {
                self.consecutive_passes = 0;
                self.double_status = DoubleStatus::Redoubled;
            }
        }
        debug!(seat = %seat, call = %call, "call accepted");

        if self.consecutive_passes >= 3 && self.auction.len() >= 4 {
            self.finished = true;
            return Ok(match self.auction.final_contract() {
                Some(contract) => CallOutcome::Contract(contract),
                None => CallOutcome::PassedOut,
            });
        }

        self.bidder = seat.next();
        Ok(CallOutcome::Continue { next: self.bidder })
    }

    /// Calls `seat` may legally make now: pass, bids 1C..7NT, then double and redouble.
    pub fn legal_calls(&self, seat: Seat) -> Vec<Call> {
        if self.finished || seat != self.bidder {
            return Vec::new();
        }
        std::iter::once(Call::Pass)
            .chain(Call::all_bids())
            .chain([Call::Double, Call::Redouble])
            .filter(|&call| self.check(call).is_ok())
            .collect()
    }

    /// The contract reached, once the auction is over and was not passed out.
    pub fn contract(&self) -> Option<Contract> {
        if self.finished {
            self.auction.final_contract()
        } else {
            None
        }
    }
}
