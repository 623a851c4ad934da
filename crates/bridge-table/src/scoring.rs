//! Duplicate scoring for a single deal.

use bridge_core::{Contract, DoubleStatus, Partnership, Strain};
use serde::{Deserialize, Serialize};

/// The pieces that make up a deal's score, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub trick_score: i32,
    pub overtricks: i32,
    /// Game bonus, or the part-score bonus when the contract is below game.
    pub game_bonus: i32,
    pub slam_bonus: i32,
    pub insult_bonus: i32,
    pub undertrick_penalty: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.trick_score
            + self.overtricks
            + self.game_bonus
            + self.slam_bonus
            + self.insult_bonus
            + self.undertrick_penalty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DealScore {
    pub ns: i32,
    pub ew: i32,
    pub breakdown: ScoreBreakdown,
}

impl DealScore {
    pub fn for_partnership(&self, partnership: Partnership) -> i32 {
        match partnership {
            Partnership::NS => self.ns,
            Partnership::EW => self.ew,
        }
    }

    fn credit(partnership: Partnership, points: i32, breakdown: ScoreBreakdown) -> Self {
        let (ns, ew) = match partnership {
            Partnership::NS => (points, 0),
            Partnership::EW => (0, points),
        };
        Self { ns, ew, breakdown }
    }
}

/// Points per contracted trick; no-trump also earns 10 on the first trick.
pub fn trick_value(strain: Strain) -> i32 {
    match strain {
        Strain::Clubs | Strain::Diamonds => 20,
        Strain::Hearts | Strain::Spades | Strain::NoTrump => 30,
    }
}

/// Scores a deal. `None` is a passed-out deal and scores nothing.
pub fn score_deal(contract: Option<&Contract>, declarer_tricks: u8, vulnerable: bool) -> DealScore {
    let Some(contract) = contract else {
        return DealScore::default();
    };
    let required = contract.required_tricks();
    let side = contract.partnership();

    if declarer_tricks >= required {
        let breakdown = making_score(contract, declarer_tricks - required, vulnerable);
        DealScore::credit(side, breakdown.total(), breakdown)
    } else {
        let penalty = undertrick_penalty(required - declarer_tricks, contract.double_status, vulnerable);
        let breakdown = ScoreBreakdown {
            undertrick_penalty: penalty,
            ..Default::default()
        };
        DealScore::credit(side.opponent(), penalty, breakdown)
    }
}

fn making_score(contract: &Contract, overtricks: u8, vulnerable: bool) -> ScoreBreakdown {
    let level = contract.level as i32;
    let per_trick = trick_value(contract.strain);
    let multiplier = contract.double_status.multiplier() as i32;

    let mut base = level * per_trick;
    if contract.strain == Strain::NoTrump {
        base += 10;
    }
    let trick_score = base * multiplier;

    let game_bonus = match (trick_score >= 100, vulnerable) {
        (true, true) => 500,
        (true, false) => 300,
        (false, _) => 50,
    };

    let slam_bonus = match (contract.is_grand_slam(), contract.is_slam(), vulnerable) {
        (true, _, true) => 1500,
        (true, _, false) => 1000,
        (false, true, true) => 750,
        (false, true, false) => 500,
        _ => 0,
    };

    let per_overtrick = match (contract.double_status, vulnerable) {
        (DoubleStatus::Undoubled, _) => per_trick,
        (DoubleStatus::Doubled, false) => 100,
        (DoubleStatus::Doubled, true) => 200,
        (DoubleStatus::Redoubled, false) => 200,
        (DoubleStatus::Redoubled, true) => 400,
    };

    let insult_bonus = match contract.double_status {
        DoubleStatus::Undoubled => 0,
        DoubleStatus::Doubled => 50,
        DoubleStatus::Redoubled => 100,
    };

    ScoreBreakdown {
        trick_score,
        overtricks: overtricks as i32 * per_overtrick,
        game_bonus,
        slam_bonus,
        insult_bonus,
        undertrick_penalty: 0,
    }
}

/// Penalty earned by the defenders for `undertricks` tricks short.
pub fn undertrick_penalty(undertricks: u8, double_status: DoubleStatus, vulnerable: bool) -> i32 {
    let doubled = |n: i32| -> i32 {
        if vulnerable {
            // 200, 300, 300, ...
            200 + (n - 1) * 300
        } else {
            // 100, 200, 200, 300, 300, ...
            match n {
                1 => 100,
                2 => 300,
                3 => 500,
                n => 500 + (n - 3) * 300,
            }
        }
    };
    let n = undertricks as i32;
    if n == 0 {
        return 0;
    }
    match double_status {
        DoubleStatus::Undoubled => n * if vulnerable { 100 } else { 50 },
        DoubleStatus::Doubled => doubled(n),
        DoubleStatus::Redoubled => doubled(n) * 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::Seat;

    fn contract(s: &str, declarer: Seat) -> Contract {
        let (body, double_status) = if let Some(b) = s.strip_suffix("XX") {
            (b, DoubleStatus::Redoubled)
        } else if let Some(b) = s.strip_suffix('X') {
            (b, DoubleStatus::Doubled)
        } else {
            (s, DoubleStatus::Undoubled)
        };
        let call: bridge_core::Call = body.parse().unwrap();
        Contract {
            level: call.level().unwrap(),
            strain: call.strain().unwrap(),
            double_status,
            declarer,
        }
    }

    #[test]
    fn test_major_game() {
        let score = score_deal(Some(&contract("4S", Seat::South)), 10, false);
        assert_eq!((score.ns, score.ew), (420, 0));
        assert_eq!(score.breakdown.trick_score, 120);
        assert_eq!(score.breakdown.game_bonus, 300);
    }

    #[test]
    fn test_no_trump_down_two() {
        let score = score_deal(Some(&contract("3N", Seat::North)), 7, false);
        assert_eq!((score.ns, score.ew), (0, 100));
        assert_eq!(score.breakdown.undertrick_penalty, 100);
    }

    #[test]
    fn test_part_score_with_overtricks() {
        let score = score_deal(Some(&contract("2H", Seat::East)), 9, true);
        assert_eq!((score.ns, score.ew), (0, 140));
        assert_eq!(score.breakdown.overtricks, 30);
        assert_eq!(score.breakdown.game_bonus, 50);
    }

    #[test]
    fn test_doubled_into_game() {
        // 2S doubled: 120 trick score is game.
        let score = score_deal(Some(&contract("2SX", Seat::West)), 8, false);
        assert_eq!(score.ew, 120 + 300 + 50);
        let score = score_deal(Some(&contract("2SX", Seat::West)), 9, true);
        assert_eq!(score.ew, 120 + 500 + 50 + 200);
    }

    #[test]
    fn test_slams() {
        let score = score_deal(Some(&contract("6N", Seat::South)), 12, true);
        assert_eq!(score.ns, 190 + 500 + 750);
        let score = score_deal(Some(&contract("7C", Seat::East)), 13, false);
        assert_eq!(score.ew, 140 + 300 + 1000);
    }

    #[test]
    fn test_redoubled_overtricks() {
        let score = score_deal(Some(&contract("1NXX", Seat::North)), 8, false);
        assert_eq!(score.breakdown.trick_score, 160);
        assert_eq!(score.breakdown.overtricks, 200);
        assert_eq!(score.breakdown.insult_bonus, 100);
        assert_eq!(score.ns, 160 + 300 + 200 + 100);
    }

    #[test]
    fn test_undertrick_tables() {
        let nv: Vec<i32> = (1..=5).map(|n| undertrick_penalty(n, DoubleStatus::Doubled, false)).collect();
        assert_eq!(nv, [100, 300, 500, 800, 1100]);
        let v: Vec<i32> = (1..=4).map(|n| undertrick_penalty(n, DoubleStatus::Doubled, true)).collect();
        assert_eq!(v, [200, 500, 800, 1100]);
        assert_eq!(undertrick_penalty(3, DoubleStatus::Redoubled, false), 1000);
        assert_eq!(undertrick_penalty(2, DoubleStatus::Undoubled, true), 200);
        assert_eq!(undertrick_penalty(0, DoubleStatus::Doubled, true), 0);
    }

    #[test]
    fn test_passed_out() {
        let score = score_deal(None, 0, true);
        assert_eq!(score, DealScore::default());
        assert_eq!(score.for_partnership(Partnership::EW), 0);
    }
}
