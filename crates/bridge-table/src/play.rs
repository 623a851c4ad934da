//! Trick play: turn order, follow-suit, and trick resolution.

use crate::error::{PlayRejection, TableError};
use bridge_core::{Card, Contract, Hand, Hands, Partnership, Seat, Suit};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const TRICKS_PER_DEAL: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub leader: Seat,
    pub plays: Vec<(Seat, Card)>,
    pub winner: Option<Seat>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
            winner: None,
        }
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, card)| card.suit)
    }

    pub fn is_full(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Seat due to play, or `None` once four cards are down.
    pub fn next_seat(&self) -> Option<Seat> {
        match self.plays.last() {
            None => Some(self.leader),
            Some(_) if self.is_full() => None,
            Some((seat, _)) => Some(seat.next()),
        }
    }
}

/// The seat whose card takes the trick: highest trump if any, else highest of the suit led.
pub fn trick_winner(plays: &[(Seat, Card)], trump: Option<Suit>) -> Option<Seat> {
    let (_, lead) = plays.first()?;
    let beats = |card: &Card, best: &Card| match trump {
        Some(t) if card.suit == t && best.suit != t => true,
        _ => card.suit == best.suit && card.rank > best.rank,
    };
    let mut best = plays[0];
    for play in &plays[1..] {
        if beats(&play.1, &best.1) {
            best = *play;
        }
    }
    debug_assert!(trump.is_some() || best.1.suit == lead.suit);
    Some(best.0)
}

/// Cards `hand` may play to a trick led with `led`.
pub fn follow_suit(hand: &Hand, led: Option<Suit>) -> Vec<Card> {
    match led {
        Some(suit) if hand.has_suit(suit) => hand.cards_in(suit).collect(),
        _ => hand.cards.clone(),
    }
}

/// Result of closing a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickOutcome {
    pub winner: Seat,
    pub trick_number: usize,
    pub deal_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEngine {
    contract: Contract,
    current: Trick,
    completed: Vec<Trick>,
    tricks_won: [u8; 2],
    dummy_revealed: bool,
}

impl PlayEngine {
    /// The opening lead belongs to the declarer's left-hand opponent.
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            current: Trick::new(contract.declarer.lho()),
            completed: Vec::with_capacity(TRICKS_PER_DEAL),
            tricks_won: [0; 2],
            dummy_revealed: false,
        }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current
    }

    pub fn completed_tricks(&self) -> &[Trick] {
        &self.completed
    }

    pub fn dummy_revealed(&self) -> bool {
        self.dummy_revealed
    }

    pub fn tricks_won(&self, partnership: Partnership) -> u8 {
        self.tricks_won[partnership.idx()]
    }

    pub fn declarer_tricks(&self) -> u8 {
        self.tricks_won(self.contract.partnership())
    }

    pub fn seat_to_act(&self) -> Option<Seat> {
        if self.is_over() {
            return None;
        }
        self.current.next_seat()
    }

    pub fn is_over(&self) -> bool {
        self.completed.len() == TRICKS_PER_DEAL
    }

    pub fn legal_cards(&self, hands: &Hands, seat: Seat) -> Vec<Card> {
        if self.seat_to_act() != Some(seat) {
            return Vec::new();
        }
        follow_suit(&hands[seat], self.current.led_suit())
    }

    fn check(&self, hands: &Hands, seat: Seat, card: Card) -> Result<(), PlayRejection> {
        if self.seat_to_act() != Some(seat) {
            return Err(PlayRejection::OutOfTurn);
        }
        let hand = &hands[seat];
        if !hand.contains(card) {
            return Err(PlayRejection::CardNotInHand);
        }
        match self.current.led_suit() {
            Some(led) if card.suit != led && hand.has_suit(led) => Err(PlayRejection::MustFollowSuit),
            _ => Ok(()),
        }
    }

    /// Plays `card` from `seat`'s hand into the current trick.
    pub fn play_card(&mut self, hands: &mut Hands, seat: Seat, card: Card) -> Result<(), TableError> {
        self.check(hands, seat, card)
            .map_err(|reason| TableError::IllegalPlay { seat, card, reason })?;

        hands[seat].remove(card);
        self.current.plays.push((seat, card));
        if !self.dummy_revealed {
            self.dummy_revealed = true;
            debug!(dummy = %self.contract.dummy(), "dummy revealed");
        }
        debug!(seat = %seat, card = %card, "card played");
        Ok(())
    }

    /// Resolves a full trick, credits the winner and opens the next trick.
    pub fn complete_trick(&mut self) -> Result<TrickOutcome, TableError> {
        if !self.current.is_full() {
            return Err(TableError::IncompleteTrickOperation {
                plays: self.current.plays.len(),
            });
        }
        let winner = trick_winner(&self.current.plays, self.contract.trump())
            .ok_or(TableError::IncompleteTrickOperation { plays: 0 })?;

        let mut trick = std::mem::replace(&mut self.current, Trick::new(winner));
        trick.winner = Some(winner);
        self.completed.push(trick);
        self.tricks_won[winner.partnership().idx()] += 1;

        let trick_number = self.completed.len();
        info!(
            trick = trick_number,
            winner = %winner,
            ns = self.tricks_won[0],
            ew = self.tricks_won[1],
            "trick won"
        );
        Ok(TrickOutcome {
            winner,
            trick_number,
            deal_over: self.is_over(),
        })
    }
}
