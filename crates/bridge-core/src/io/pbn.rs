use crate::board::{Board, Seat, Vulnerability};
use crate::contract::{Contract, DoubleStatus};
use crate::error::ParseError;
use crate::hand::{Hand, Hands};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};

/// How a board ended, as far as a PBN record can say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DealOutcome {
    #[default]
    Unplayed,
    PassedOut,
    Played { contract: Contract, tricks: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbnBoard {
    pub number: Option<u32>,
    pub board: Board,
    pub outcome: DealOutcome,
}

pub fn export_board(board: &Board, number: u32, outcome: DealOutcome) -> String {
    let mut s = String::new();
    s.push_str("[Event \"?\"]\n");
    s.push_str("[Site \"?\"]\n");
    s.push_str("[Date \"?\"]\n");
    s.push_str(&format!("[Board \"{}\"]\n", number));
    s.push_str("[West \"?\"]\n");
    s.push_str("[North \"?\"]\n");
    s.push_str("[East \"?\"]\n");
    s.push_str("[South \"?\"]\n");
    s.push_str(&format!("[Dealer \"{}\"]\n", board.dealer));
    s.push_str(&format!("[Vulnerable \"{}\"]\n", board.vulnerability.to_pbn()));
    s.push_str(&format!("[Deal \"{}\"]\n", export_deal(board.dealer, &board.hands)));
    s.push_str("[Scoring \"MP\"]\n");

    let (declarer, contract, result) = match outcome {
        DealOutcome::Unplayed => ("?".to_string(), "?".to_string(), "?".to_string()),
        DealOutcome::PassedOut => (String::new(), "Pass".to_string(), String::new()),
        DealOutcome::Played { contract, tricks } => (
            contract.declarer.to_string(),
            export_contract(&contract),
            tricks.to_string(),
        ),
    };
    s.push_str(&format!("[Declarer \"{}\"]\n", declarer));
    s.push_str(&format!("[Contract \"{}\"]\n", contract));
    s.push_str(&format!("[Result \"{}\"]\n", result));
    s
}

/// `D:hand hand hand hand`, clockwise from the first seat.
pub fn export_deal(first: Seat, hands: &Hands) -> String {
    let mut deal = format!("{}:", first);
    let mut seat = first;
    for i in 0..4 {
        if i > 0 {
            deal.push(' ');
        }
        if hands[seat].is_empty() {
            deal.push('-');
        } else {
            deal.push_str(&hands[seat].to_pbn());
        }
        seat = seat.next();
    }
    deal
}

pub fn export_hand(hand: &Hand) -> String {
    hand.to_pbn()
}

pub fn import_hand(hand_str: &str) -> Result<Hand, ParseError> {
    hand_str.parse()
}

fn export_contract(contract: &Contract) -> String {
    let strain = match contract.strain {
        Strain::NoTrump => "NT".to_string(),
        other => other.to_char().to_string(),
    };
    let doubled = match contract.double_status {
        DoubleStatus::Undoubled => "",
        DoubleStatus::Doubled => "X",
        DoubleStatus::Redoubled => "XX",
    };
    format!("{}{}{}", contract.level, strain, doubled)
}

fn import_contract(value: &str, declarer: Seat) -> Result<Contract, ParseError> {
    let err = || ParseError::Board(format!("bad contract {:?}", value));
    let upper = value.trim().to_ascii_uppercase();
    let (body, double_status) = if let Some(body) = upper.strip_suffix("XX") {
        (body, DoubleStatus::Redoubled)
    } else if let Some(body) = upper.strip_suffix('X') {
        (body, DoubleStatus::Doubled)
    } else {
        (upper.as_str(), DoubleStatus::Undoubled)
    };
    let call: crate::call::Call = body.parse().map_err(|_| err())?;
    match (call.level(), call.strain()) {
        (Some(level), Some(strain)) => Ok(Contract {
            level,
            strain,
            double_status,
            declarer,
        }),
        _ => Err(err()),
    }
}

/// Splits a `[Tag "Value"]` line.
fn parse_tag(line: &str) -> Option<(&str, &str)> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (tag, rest) = inner.split_once(' ')?;
    let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((tag, value))
}

fn import_deal(value: &str) -> Result<Hands, ParseError> {
    let err = || ParseError::Board(format!("bad deal {:?}", value));
    let (first, rest) = value.split_once(':').ok_or_else(err)?;
    let mut seat: Seat = first.parse()?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(err());
    }
    let mut hands = Hands::default();
    for part in parts {
        if part != "-" {
            hands[seat] = import_hand(part)?;
        }
        seat = seat.next();
    }
    Ok(hands)
}

pub fn import_board(pbn: &str) -> Result<PbnBoard, ParseError> {
    let mut number = None;
    let mut dealer = None;
    let mut vulnerability = Vulnerability::None;
    let mut hands = None;
    let mut declarer = None;
    let mut contract_tag = None;
    let mut result = None;

    for (tag, value) in pbn.lines().filter_map(parse_tag) {
        match tag {
            "Board" => number = value.parse().ok(),
            "Dealer" => dealer = Some(value.parse::<Seat>()?),
            "Vulnerable" => {
                vulnerability = Vulnerability::from_pbn(value)
                    .ok_or_else(|| ParseError::Board(format!("bad vulnerability {:?}", value)))?
            }
            "Deal" => hands = Some(import_deal(value)?),
            "Declarer" => declarer = value.parse::<Seat>().ok(),
            "Contract" => contract_tag = Some(value.to_string()),
            "Result" => result = value.parse::<u8>().ok(),
            _ => {}
        }
    }

    let dealer = dealer.ok_or_else(|| ParseError::Board("missing Dealer tag".to_string()))?;
    let hands = hands.ok_or_else(|| ParseError::Board("missing Deal tag".to_string()))?;

    let outcome = match (contract_tag.as_deref(), declarer, result) {
        (Some(c), _, _) if c.eq_ignore_ascii_case("pass") => DealOutcome::PassedOut,
        (Some(c), Some(declarer), Some(tricks)) if c != "?" => DealOutcome::Played {
            contract: import_contract(c, declarer)?,
            tricks,
        },
        _ => DealOutcome::Unplayed,
    };

    Ok(PbnBoard {
        number,
        board: Board::new(dealer, vulnerability, hands),
        outcome,
    })
}
