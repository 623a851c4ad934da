//! Decision providers: whoever, or whatever, picks the next call or card for a seat.

use crate::table::SeatView;
use bridge_core::{Call, Card};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks a call or card from the legal options the table offers.
///
/// `legal` is never empty. Returning anything outside it is rejected by the
/// table; the session driver then falls back to the first legal option.
pub trait DecisionProvider {
    fn name(&self) -> &str;

    fn choose_call(&mut self, view: &SeatView, legal: &[Call]) -> Call;

    fn choose_play(&mut self, view: &SeatView, legal: &[Card]) -> Card;
}

/// Always takes the first legal option: passes every auction, plays the top card.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl DecisionProvider for FirstLegal {
    fn name(&self) -> &str {
        "first"
    }

    fn choose_call(&mut self, _view: &SeatView, legal: &[Call]) -> Call {
        legal[0]
    }

    fn choose_play(&mut self, _view: &SeatView, legal: &[Card]) -> Card {
        legal[0]
    }
}

/// Uniformly random among the legal options.
///
/// Bids are drawn with the same weight as a pass, so auctions tend to climb;
/// `pass_weight` biases the choice towards passing to keep contracts sane.
#[derive(Debug, Clone)]
pub struct RandomLegal {
    rng: StdRng,
    pass_weight: u32,
}

impl RandomLegal {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, pass_weight: 1 }
    }

    pub fn with_pass_weight(mut self, weight: u32) -> Self {
        self.pass_weight = weight.max(1);
        self
    }
}

impl DecisionProvider for RandomLegal {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_call(&mut self, _view: &SeatView, legal: &[Call]) -> Call {
        let pass_weight = self.pass_weight;
        legal
            .choose_weighted(&mut self.rng, |call| if call.is_pass() { pass_weight } else { 1 })
            .copied()
            .unwrap_or(legal[0])
    }

    fn choose_play(&mut self, _view: &SeatView, legal: &[Card]) -> Card {
        legal.choose(&mut self.rng).copied().unwrap_or(legal[0])
    }
}
