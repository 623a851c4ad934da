//! The table aggregate: one authoritative phase and every piece of mutable game state.

use crate::auction::{AuctionEngine, CallOutcome};
use crate::config::TableConfig;
use crate::deal::{self, Deck};
use crate::error::TableError;
use crate::play::{PlayEngine, Trick, TrickOutcome};
use crate::scoring::{score_deal, ScoreBreakdown};
use bridge_core::{Auction, Board, Call, Card, Contract, Hand, Hands, Partnership, Seat, Vulnerability};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    PartnershipSetup,
    Deal,
    Auction,
    Play,
    Scoring,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::PartnershipSetup => "partnership setup",
            GamePhase::Deal => "deal",
            GamePhase::Auction => "auction",
            GamePhase::Play => "play",
            GamePhase::Scoring => "scoring",
            GamePhase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// The permanent record of one scored deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub board: Board,
    pub auction: Auction,
    pub contract: Option<Contract>,
    pub description: String,
    pub declarer: Option<Seat>,
    pub tricks_made: Option<u8>,
    pub ns_delta: i32,
    pub ew_delta: i32,
    pub breakdown: ScoreBreakdown,
}

/// What one seat is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub phase: GamePhase,
    pub round: u32,
    pub dealer: Option<Seat>,
    pub vulnerability: Vulnerability,
    pub hand: Hand,
    /// Dummy's seat and cards, once the opening lead is made.
    pub dummy: Option<(Seat, Hand)>,
    pub auction: Vec<(Seat, Call)>,
    pub contract: Option<Contract>,
    pub current_trick: Option<Trick>,
    pub tricks_completed: usize,
}

pub struct Table {
    config: TableConfig,
    phase: GamePhase,
    round: u32,
    dealer: Option<Seat>,
    vulnerability: Vulnerability,
    dealer_draw: Option<[(Seat, Card); 4]>,
    hands: Hands,
    board: Option<Board>,
    auction: Option<AuctionEngine>,
    play: Option<PlayEngine>,
    results: Vec<RoundResult>,
    totals: [i32; 2],
    rng: StdRng,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: TableConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: TableConfig, rng: StdRng) -> Self {
        Self {
            config,
            phase: GamePhase::PartnershipSetup,
            round: 0,
            dealer: None,
            vulnerability: Vulnerability::None,
            dealer_draw: None,
            hands: Hands::default(),
            board: None,
            auction: None,
            play: None,
            results: Vec::new(),
            totals: [0; 2],
            rng,
        }
    }

    fn require(&self, operation: &'static str, phase: GamePhase) -> Result<(), TableError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TableError::phase(operation, self.phase))
        }
    }

    // -- transitions ----------------------------------------------------

    /// Fixes NS/EW and draws for the first dealer. Starts round 1.
    pub fn determine_partnerships_and_dealer(&mut self) -> Result<Seat, TableError> {
        self.require("draw for dealer", GamePhase::PartnershipSetup)?;
        let (dealer, draws) = deal::draw_for_dealer(&mut self.rng);
        self.dealer = Some(dealer);
        self.dealer_draw = Some(draws);
        self.round = 1;
        self.vulnerability = self.config.vulnerability.for_round(self.round);
        self.phase = GamePhase::Deal;
        info!(dealer = %dealer, vulnerability = %self.vulnerability, "dealer drawn");
        Ok(dealer)
    }

    /// Shuffles and deals a fresh deck, then opens the auction.
    pub fn deal_cards(&mut self) -> Result<&Board, TableError> {
        self.require("deal", GamePhase::Deal)?;
        let dealer = self.current_dealer("deal")?;
        let hands = deal::deal(Deck::shuffled(&mut self.rng), dealer);
        Ok(self.start_auction(dealer, hands))
    }

    /// Deals caller-supplied hands, e.g. a board read back from PBN.
    pub fn deal_preset(&mut self, mut hands: Hands) -> Result<&Board, TableError> {
        self.require("deal", GamePhase::Deal)?;
        let dealer = self.current_dealer("deal")?;
        deal::validate_hands(&hands).map_err(TableError::InvalidDeal)?;
        for seat in Seat::ALL {
            hands[seat].sort();
        }
        Ok(self.start_auction(dealer, hands))
    }

    fn current_dealer(&self, operation: &'static str) -> Result<Seat, TableError> {
        self.dealer.ok_or(TableError::phase(operation, self.phase))
    }

    fn start_auction(&mut self, dealer: Seat, hands: Hands) -> &Board {
        assert!(self.hands.is_empty(), "dealing into non-empty hands");
        self.hands = hands;
        self.auction = Some(AuctionEngine::new(dealer));
        self.play = None;
        self.phase = GamePhase::Auction;
        info!(round = self.round, dealer = %dealer, "cards dealt");
        self.board.insert(Board::new(dealer, self.vulnerability, self.hands.clone()))
    }

    /// Makes a call for the seat due to call.
    pub fn make_call(&mut self, call: Call) -> Result<CallOutcome, TableError> {
        self.require("call", GamePhase::Auction)?;
        let engine = self
            .auction
            .as_mut()
            .ok_or(TableError::phase("call", GamePhase::Auction))?;
        let outcome = engine.make_call(call)?;
        match outcome {
            CallOutcome::Continue { .. } => {}
            CallOutcome::Contract(contract) => {
                info!(contract = %contract, declarer = %contract.declarer, "contract reached");
                self.play = Some(PlayEngine::new(contract));
                self.phase = GamePhase::Play;
            }
            CallOutcome::PassedOut => {
                info!(round = self.round, "deal passed out");
                self.phase = GamePhase::Scoring;
            }
        }
        Ok(outcome)
    }

    /// Plays a card from `seat`. For dummy, the declarer decides but the card is dummy's.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), TableError> {
        self.require("play a card", GamePhase::Play)?;
        let engine = self
            .play
            .as_mut()
            .ok_or(TableError::phase("play a card", GamePhase::Play))?;
        engine.play_card(&mut self.hands, seat, card)
    }

    pub fn complete_trick(&mut self) -> Result<TrickOutcome, TableError> {
        self.require("complete a trick", GamePhase::Play)?;
        let engine = self
            .play
            .as_mut()
            .ok_or(TableError::phase("complete a trick", GamePhase::Play))?;
        let outcome = engine.complete_trick()?;
        if outcome.deal_over {
            self.phase = GamePhase::Scoring;
        }
        Ok(outcome)
    }

    fn round_scored(&self) -> bool {
        self.results.len() as u32 >= self.round
    }

    /// Scores the finished deal and records it. Moves to game over after the last round.
    pub fn end_round(&mut self) -> Result<&RoundResult, TableError> {
        self.require("score the round", GamePhase::Scoring)?;
        if self.round_scored() {
            return Err(TableError::phase("score a round twice", self.phase));
        }
        let board = self
            .board
            .clone()
            .ok_or(TableError::phase("score without a deal", self.phase))?;
        let auction = self
            .auction
            .as_ref()
            .map(|a| a.auction().clone())
            .unwrap_or_else(|| Auction::new(board.dealer));

        let contract = self.play.as_ref().map(|p| *p.contract());
        let tricks_made = self.play.as_ref().map(|p| p.declarer_tricks());
        let vulnerable = contract
            .map(|c| self.vulnerability.partnership_vulnerable(c.partnership()))
            .unwrap_or(false);
        let score = score_deal(contract.as_ref(), tricks_made.unwrap_or(0), vulnerable);

        self.totals[Partnership::NS.idx()] += score.ns;
        self.totals[Partnership::EW.idx()] += score.ew;

        let result = RoundResult {
            round: self.round,
            board,
            auction,
            contract,
            description: describe(contract.as_ref(), tricks_made),
            declarer: contract.map(|c| c.declarer),
            tricks_made,
            ns_delta: score.ns,
            ew_delta: score.ew,
            breakdown: score.breakdown,
        };
        info!(
            round = self.round,
            result = %result.description,
            ns = score.ns,
            ew = score.ew,
            "round scored"
        );

        if self.round >= self.config.rounds {
            self.phase = GamePhase::GameOver;
            info!(ns = self.totals[0], ew = self.totals[1], "game over");
        }
        self.results.push(result);
        Ok(&self.results[self.results.len() - 1])
    }

    /// Moves to the next round: the deal passes to the left and vulnerability follows the schedule.
    pub fn start_new_round(&mut self) -> Result<(), TableError> {
        self.require("start a new round", GamePhase::Scoring)?;
        if !self.round_scored() {
            return Err(TableError::phase("start a new round before scoring", self.phase));
        }
        if self.round >= self.config.rounds {
            return Err(TableError::phase("start a round with none remaining", self.phase));
        }
        let dealer = self.current_dealer("start a new round")?.next();
        self.round += 1;
        self.dealer = Some(dealer);
        self.vulnerability = self.config.vulnerability.for_round(self.round);
        self.hands = Hands::default();
        self.board = None;
        self.auction = None;
        self.play = None;
        self.phase = GamePhase::Deal;
        info!(round = self.round, dealer = %dealer, vulnerability = %self.vulnerability, "new round");
        Ok(())
    }

    // -- queries --------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn dealer(&self) -> Option<Seat> {
        self.dealer
    }

    pub fn dealer_draw(&self) -> Option<&[(Seat, Card); 4]> {
        self.dealer_draw.as_ref()
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn auction(&self) -> Option<&AuctionEngine> {
        self.auction.as_ref()
    }

    pub fn play(&self) -> Option<&PlayEngine> {
        self.play.as_ref()
    }

    pub fn contract(&self) -> Option<Contract> {
        self.play.as_ref().map(|p| *p.contract())
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn total(&self, partnership: Partnership) -> i32 {
        self.totals[partnership.idx()]
    }

    /// The seat whose call or card the table is waiting for.
    pub fn seat_to_act(&self) -> Option<Seat> {
        match self.phase {
            GamePhase::Auction => self.auction.as_ref().and_then(|a| a.bidder()),
            GamePhase::Play => self.play.as_ref().and_then(|p| p.seat_to_act()),
            _ => None,
        }
    }

    pub fn legal_calls(&self, seat: Seat) -> Vec<Call> {
        match (&self.phase, &self.auction) {
            (GamePhase::Auction, Some(engine)) => engine.legal_calls(seat),
            _ => Vec::new(),
        }
    }

    pub fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        match (&self.phase, &self.play) {
            (GamePhase::Play, Some(engine)) => engine.legal_cards(&self.hands, seat),
            _ => Vec::new(),
        }
    }

    /// Who decides for `seat`: the declarer plays dummy's cards.
    pub fn controller(&self, seat: Seat) -> Seat {
        match (&self.phase, &self.play) {
            (GamePhase::Play, Some(engine)) if engine.contract().dummy() == seat => {
                engine.contract().declarer
            }
            _ => seat,
        }
    }

    pub fn view(&self, seat: Seat) -> SeatView {
        let dummy = self
            .play
            .as_ref()
            .filter(|p| p.dummy_revealed())
            .map(|p| {
                let dummy = p.contract().dummy();
                (dummy, self.hands[dummy].clone())
            });
        SeatView {
            seat,
            phase: self.phase,
            round: self.round,
            dealer: self.dealer,
            vulnerability: self.vulnerability,
            hand: self.hands[seat].clone(),
            dummy,
            auction: self.auction.as_ref().map(|a| a.history()).unwrap_or_default(),
            contract: self.contract(),
            current_trick: self.play.as_ref().map(|p| p.current_trick().clone()),
            tricks_completed: self.play.as_ref().map_or(0, |p| p.completed_tricks().len()),
        }
    }
}

fn describe(contract: Option<&Contract>, tricks_made: Option<u8>) -> String {
    let (Some(contract), Some(tricks)) = (contract, tricks_made) else {
        return "Passed out".to_string();
    };
    let required = contract.required_tricks();
    let outcome = match tricks.cmp(&required) {
        std::cmp::Ordering::Less => format!("down {}", required - tricks),
        std::cmp::Ordering::Equal => "made".to_string(),
        std::cmp::Ordering::Greater => format!("made +{}", tricks - required),
    };
    format!("{}, {} ({} tricks)", contract.describe(), outcome, tricks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VulnerabilitySchedule;
    use crate::error::{CallRejection, DealRejection};
    use bridge_core::Strain;

    fn seeded() -> Table {
        Table::with_seed(TableConfig::default(), 17)
    }

    fn calls(table: &mut Table, calls: &str) {
        for token in calls.split_whitespace() {
            table.make_call(token.parse().unwrap()).unwrap();
        }
    }

    fn play_first_legal(table: &mut Table) {
        while table.phase() == GamePhase::Play {
            match table.seat_to_act() {
                Some(seat) => {
                    let card = table.legal_cards(seat)[0];
                    table.play_card(seat, card).unwrap();
                }
                None => {
                    table.complete_trick().unwrap();
                }
            }
        }
    }

    #[test]
    fn test_phase_guards() {
        let mut table = seeded();
        assert_eq!(table.phase(), GamePhase::PartnershipSetup);
        assert_eq!(
            table.deal_cards().unwrap_err(),
            TableError::InvalidPhaseOperation {
                operation: "deal",
                phase: GamePhase::PartnershipSetup,
            }
        );
        assert!(table.make_call(Call::Pass).is_err());
        assert!(table.end_round().is_err());
        assert!(table.legal_calls(Seat::North).is_empty());
        assert_eq!(table.seat_to_act(), None);
    }

    #[test]
    fn test_play_during_auction_rejected() {
        let mut table = seeded();
        table.determine_partnerships_and_dealer().unwrap();
        table.deal_cards().unwrap();
        let seat = table.seat_to_act().unwrap();
        let card = table.hand(seat).cards[0];

        assert_eq!(
            table.play_card(seat, card).unwrap_err(),
            TableError::InvalidPhaseOperation {
                operation: "play a card",
                phase: GamePhase::Auction,
            }
        );
        assert_eq!(
            table.complete_trick().unwrap_err(),
            TableError::InvalidPhaseOperation {
                operation: "complete a trick",
                phase: GamePhase::Auction,
            }
        );
        assert_eq!(table.hand(seat).len(), 13);
        assert!(table.hand(seat).contains(card));
        assert_eq!(table.phase(), GamePhase::Auction);
        assert_eq!(table.seat_to_act(), Some(seat));
    }

    #[test]
    #[should_panic(expected = "non-empty hands")]
    fn test_deal_into_held_cards_panics() {
        let mut table = seeded();
        table.determine_partnerships_and_dealer().unwrap();
        table.hands = deal::deal(Deck::ordered(), Seat::North);
        let _ = table.deal_cards();
    }

    #[test]
    fn test_draw_and_deal() {
        let mut table = seeded();
        let dealer = table.determine_partnerships_and_dealer().unwrap();
        assert_eq!(table.phase(), GamePhase::Deal);
        assert_eq!(table.round(), 1);
        assert_eq!(table.vulnerability(), Vulnerability::None);
        assert!(table.determine_partnerships_and_dealer().is_err());

        let board = table.deal_cards().unwrap();
        assert_eq!(board.dealer, dealer);
        assert!(board.hands.is_full_deal());
        assert_eq!(table.phase(), GamePhase::Auction);
        assert_eq!(table.seat_to_act(), Some(dealer));
        assert_eq!(table.legal_calls(dealer).len(), 36);
        assert!(table.legal_calls(dealer.next()).is_empty());
    }

    #[test]
    fn test_passed_out_round_scores_zero() {
        let mut table = seeded();
        table.determine_partnerships_and_dealer().unwrap();
        table.deal_cards().unwrap();
        calls(&mut table, "P P P P");
        assert_eq!(table.phase(), GamePhase::Scoring);

        let result = table.end_round().unwrap();
        assert_eq!(result.contract, None);
        assert_eq!((result.ns_delta, result.ew_delta), (0, 0));
        assert_eq!(result.description, "Passed out");
        assert!(table.end_round().is_err());
    }

    #[test]
    fn test_rejected_call_leaves_table_unchanged() {
        let mut table = seeded();
        table.determine_partnerships_and_dealer().unwrap();
        table.deal_cards().unwrap();
        calls(&mut table, "1N");
        let before = table.view(Seat::North);
        let err = table.make_call(Call::bid(1, Strain::Spades)).unwrap_err();
        assert!(matches!(
            err,
            TableError::IllegalCall { reason: CallRejection::InsufficientBid, .. }
        ));
        assert_eq!(table.view(Seat::North), before);
    }

    #[test]
    fn test_full_round_with_contract() {
        let mut table = seeded();
        let dealer = table.determine_partnerships_and_dealer().unwrap();
        table.deal_cards().unwrap();
        calls(&mut table, "1S P P P");
        let contract = table.contract().unwrap();
        assert_eq!(contract.declarer, dealer);
        assert_eq!(table.phase(), GamePhase::Play);
        assert_eq!(table.seat_to_act(), Some(dealer.next()));

        // Dummy's cards are chosen by the declarer.
        assert_eq!(table.controller(contract.dummy()), contract.declarer);
        assert_eq!(table.controller(dealer.next()), dealer.next());
        assert!(table.view(dealer.next()).dummy.is_none());

        let leader = dealer.next();
        let lead = table.legal_cards(leader)[0];
        table.play_card(leader, lead).unwrap();
        let view = table.view(leader);
        let (dummy_seat, dummy_hand) = view.dummy.clone().unwrap();
        assert_eq!(dummy_seat, contract.dummy());
        assert_eq!(dummy_hand.len(), 13);
        assert_eq!(view.hand.len(), 12);

        play_first_legal(&mut table);
        assert_eq!(table.phase(), GamePhase::Scoring);
        let result = table.end_round().unwrap().clone();
        let play = table.play().unwrap();
        assert_eq!(result.tricks_made, Some(play.declarer_tricks()));
        assert_eq!(result.declarer, Some(dealer));
        assert_eq!(
            table.total(Partnership::NS) + table.total(Partnership::EW),
            result.ns_delta + result.ew_delta
        );
    }

    #[test]
    fn test_rounds_rotate_dealer_and_vulnerability() {
        let config = TableConfig {
            rounds: 3,
            vulnerability: VulnerabilitySchedule::Table(vec![Vulnerability::EW, Vulnerability::Both]),
            ..TableConfig::default()
        };
        let mut table = Table::with_seed(config, 3);
        let first = table.determine_partnerships_and_dealer().unwrap();
        assert_eq!(table.vulnerability(), Vulnerability::EW);

        for round in 1..=3u32 {
            assert_eq!(table.round(), round);
            assert!(table.start_new_round().is_err());
            table.deal_cards().unwrap();
            calls(&mut table, "P P P P");
            assert!(table.start_new_round().is_err());
            table.end_round().unwrap();
            if round < 3 {
                table.start_new_round().unwrap();
            }
        }
        assert_eq!(table.phase(), GamePhase::GameOver);
        assert!(table.start_new_round().is_err());
        assert_eq!(table.results().len(), 3);
        assert_eq!(table.results()[1].board.dealer, first.next());
        assert_eq!(table.results()[2].board.dealer, first.next().next());
        assert_eq!(table.results()[1].board.vulnerability, Vulnerability::Both);
        assert_eq!(table.results()[2].board.vulnerability, Vulnerability::EW);
    }

    #[test]
    fn test_deal_preset_validates() {
        let mut table = seeded();
        table.determine_partnerships_and_dealer().unwrap();
        let mut hands = deal::deal(Deck::ordered(), Seat::North);
        hands[Seat::North].cards.pop();
        assert_eq!(
            table.deal_preset(hands).unwrap_err(),
            TableError::InvalidDeal(DealRejection::WrongCount { seat: Seat::North, len: 12 })
        );
        assert_eq!(table.phase(), GamePhase::Deal);

        let hands = deal::deal(Deck::ordered(), Seat::North);
        let board = table.deal_preset(hands.clone()).unwrap();
        assert_eq!(board.hands, hands);
    }

    #[test]
    fn test_describe() {
        let contract = Contract::new(4, Strain::Spades, Seat::South);
        assert_eq!(describe(Some(&contract), Some(10)), "4♠ by South, made (10 tricks)");
        assert_eq!(describe(Some(&contract), Some(11)), "4♠ by South, made +1 (11 tricks)");
        assert_eq!(describe(Some(&contract), Some(8)), "4♠ by South, down 2 (8 tricks)");
        assert_eq!(describe(None, None), "Passed out");
    }
}
