//! Drives a table from the dealer draw to game over with one provider per seat.

use crate::error::TableError;
use crate::provider::DecisionProvider;
use crate::table::{GamePhase, RoundResult, Table};
use bridge_core::Seat;
use tracing::warn;

/// One decision provider per seat, indexed by [`Seat::idx`].
pub type Seats<'a> = [&'a mut dyn DecisionProvider; 4];

/// Plays the current deal to its end and scores it.
///
/// The table must be in the deal phase. Providers that offer an illegal
/// option are logged and replaced by the first legal option for that turn.
pub fn run_round(table: &mut Table, providers: &mut Seats<'_>) -> Result<RoundResult, TableError> {
    table.deal_cards()?;

    while table.phase() == GamePhase::Auction {
        let seat = next_seat(table, "call")?;
        let legal = table.legal_calls(seat);
        let view = table.view(seat);
        let provider = &mut providers[seat.idx()];
        let call = provider.choose_call(&view, &legal);
        if let Err(err) = table.make_call(call) {
            warn!(seat = %seat, provider = provider.name(), error = %err, "provider chose an illegal call");
            table.make_call(legal[0])?;
        }
    }

    while table.phase() == GamePhase::Play {
        let Some(seat) = table.seat_to_act() else {
            table.complete_trick()?;
            continue;
        };
        let controller = table.controller(seat);
        let legal = table.legal_cards(seat);
        let view = table.view(controller);
        let provider = &mut providers[controller.idx()];
        let card = provider.choose_play(&view, &legal);
        if let Err(err) = table.play_card(seat, card) {
            warn!(seat = %seat, provider = provider.name(), error = %err, "provider chose an illegal card");
            table.play_card(seat, legal[0])?;
        }
    }

    table.end_round().cloned()
}

fn next_seat(table: &Table, operation: &'static str) -> Result<Seat, TableError> {
    table
        .seat_to_act()
        .ok_or(TableError::InvalidPhaseOperation {
            operation,
            phase: table.phase(),
        })
}

/// Runs every configured round and returns the results in order.
pub fn run_session(table: &mut Table, providers: &mut Seats<'_>) -> Result<Vec<RoundResult>, TableError> {
    if table.phase() == GamePhase::PartnershipSetup {
        table.determine_partnerships_and_dealer()?;
    }
    loop {
        run_round(table, providers)?;
        if table.phase() == GamePhase::GameOver {
            break;
        }
        table.start_new_round()?;
    }
    Ok(table.results().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::provider::{FirstLegal, RandomLegal};
    use crate::table::SeatView;
    use bridge_core::{Call, Card, Strain};

    /// Always bids level 0 and always offers a card outside the legal list.
    #[derive(Default)]
    struct Stubborn {
        calls: usize,
        plays: usize,
    }

    impl DecisionProvider for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose_call(&mut self, _view: &SeatView, _legal: &[Call]) -> Call {
            self.calls += 1;
            Call::bid(0, Strain::Clubs)
        }

        fn choose_play(&mut self, _view: &SeatView, legal: &[Card]) -> Card {
            self.plays += 1;
            let deck = crate::deal::Deck::ordered();
            *deck.cards().iter().find(|c| !legal.contains(c)).unwrap()
        }
    }

    #[test]
    fn test_first_legal_session_passes_out() {
        let mut table = Table::with_seed(TableConfig::default(), 8);
        let (mut n, mut e, mut s, mut w) = (FirstLegal, FirstLegal, FirstLegal, FirstLegal);
        let mut seats: Seats = [&mut n, &mut e, &mut s, &mut w];
        let results = run_session(&mut table, &mut seats).unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.contract.is_none() && r.ns_delta == 0 && r.ew_delta == 0));
        assert_eq!(table.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_illegal_choices_fall_back() {
        let mut table = Table::with_seed(TableConfig { rounds: 1, ..TableConfig::default() }, 4);
        let mut stubborn = Stubborn::default();
        let mut random = RandomLegal::new(Some(2)).with_pass_weight(3);
        let (mut e, mut w) = (FirstLegal, FirstLegal);
        let mut seats: Seats = [&mut stubborn, &mut e, &mut random, &mut w];
        let results = run_session(&mut table, &mut seats).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(table.phase(), GamePhase::GameOver);

        // Every level-0 bid was replaced by the first legal call, a pass.
        let north_calls: Vec<Call> = results[0]
            .auction
            .iter()
            .filter(|(seat, _)| *seat == Seat::North)
            .map(|(_, call)| *call)
            .collect();
        assert!(stubborn.calls > 0);
        assert_eq!(north_calls.len(), stubborn.calls);
        assert!(north_calls.iter().all(|call| *call == Call::Pass));

        // North chooses for dummy too when declaring, and nothing as dummy.
        let expected_plays = match results[0].declarer {
            None | Some(Seat::South) => 0,
            Some(Seat::North) => 26,
            Some(_) => 13,
        };
        assert_eq!(stubborn.plays, expected_plays);
    }
}
