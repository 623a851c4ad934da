use crate::board::Seat;
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// The public record of calls made on one deal, starting with the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Seat,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    pub fn bidding(dealer: Seat, calls: &str) -> Result<Self, ParseError> {
        let calls = calls
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Call>, _>>()?;
        Ok(Self { dealer, calls })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Call)> {
        let mut seat = self.dealer;
        self.calls.iter().map(move |call| {
            let this = seat;
            seat = seat.next();
            (this, call)
        })
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn current_player(&self) -> Seat {
        let mut seat = self.dealer;
        for _ in 0..self.calls.len() % 4 {
            seat = seat.next();
        }
        seat
    }

    /// Returns the last bid (not pass/double/redouble) and who made it.
    pub fn last_bid(&self) -> Option<(Seat, &Call)> {
        self.iter().filter(|(_, call)| call.is_bid()).last()
    }

    /// The most recent call that was not a pass.
    pub fn last_action(&self) -> Option<(Seat, &Call)> {
        self.iter().filter(|(_, call)| !call.is_pass()).last()
    }

    pub fn opener(&self) -> Option<Seat> {
        self.iter()
            .find(|(_, call)| call.is_bid())
            .map(|(seat, _)| seat)
    }

    pub fn trailing_passes(&self) -> usize {
        self.calls.iter().rev().take_while(|c| c.is_pass()).count()
    }

    /// Three passes in a row after at least four calls.
    pub fn is_finished(&self) -> bool {
        self.calls.len() >= 4 && self.trailing_passes() >= 3
    }

    pub fn is_passed_out(&self) -> bool {
        self.is_finished() && self.last_bid().is_none()
    }

    /// The contract the auction stands at so far.
    ///
    /// The declarer is whichever member of the bidding side first named the
    /// final strain, not necessarily the seat that made the last bid.
    pub fn current_contract(&self) -> Option<Contract> {
        let mut last_bid = None;
        let mut double_status = DoubleStatus::Undoubled;

        // Index: partnership, then strain.
        let mut first_bidders: [[Option<Seat>; 5]; 2] = [[None; 5]; 2];

        for (seat, call) in self.iter() {
            match call {
                Call::Bid { level, strain } => {
                    let slot = &mut first_bidders[seat.partnership().idx()][strain.idx()];
                    let declarer = *slot.get_or_insert(seat);
                    last_bid = Some((*level, *strain, declarer));
                    double_status = DoubleStatus::Undoubled;
                }
                Call::Double => double_status = DoubleStatus::Doubled,
                Call::Redouble => double_status = DoubleStatus::Redoubled,
                Call::Pass => {}
            }
        }

        last_bid.map(|(level, strain, declarer)| Contract {
            level,
            strain,
            double_status,
            declarer,
        })
    }

    pub fn final_contract(&self) -> Option<Contract> {
        if self.is_finished() {
            self.current_contract()
        } else {
            None
        }
    }

    /// Space-separated call list, e.g. `1S P 2S P P P`.
    pub fn render(&self) -> String {
        self.calls
            .iter()
            .map(|c| c.render())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
