//! Table configuration, loaded from YAML.

use crate::error::ConfigError;
use bridge_core::{Seat, Vulnerability};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../config/default.yaml");

/// Which vulnerability applies on each round.
///
/// In YAML this is either a preset name (`standard`, `progressive`, `board`)
/// or an explicit list such as `[None, NS, EW, Both]`, cycled past its end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRepr", into = "ScheduleRepr")]
pub enum VulnerabilitySchedule {
    /// None, NS, NS, EW, Both.
    #[default]
    Standard,
    /// None, NS, then Both from round 3 on.
    Progressive,
    /// The 16-board duplicate rotation, with round N played as board N.
    BoardNumber,
    Table(Vec<Vulnerability>),
}

const STANDARD: [Vulnerability; 5] = [
    Vulnerability::None,
    Vulnerability::NS,
    Vulnerability::NS,
    Vulnerability::EW,
    Vulnerability::Both,
];

impl VulnerabilitySchedule {
    /// Vulnerability for a 1-based round number.
    pub fn for_round(&self, round: u32) -> Vulnerability {
        let i = round.saturating_sub(1) as usize;
        match self {
            VulnerabilitySchedule::Standard => STANDARD[i % STANDARD.len()],
            VulnerabilitySchedule::Progressive => match round {
                0 | 1 => Vulnerability::None,
                2 => Vulnerability::NS,
                _ => Vulnerability::Both,
            },
            VulnerabilitySchedule::BoardNumber => Vulnerability::from_board_number(round),
            VulnerabilitySchedule::Table(table) => {
                table.get(i % table.len().max(1)).copied().unwrap_or_default()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VulnerabilitySchedule::Standard => "standard",
            VulnerabilitySchedule::Progressive => "progressive",
            VulnerabilitySchedule::BoardNumber => "board",
            VulnerabilitySchedule::Table(_) => "table",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ScheduleRepr {
    Named(String),
    Table(Vec<Vulnerability>),
}

impl TryFrom<ScheduleRepr> for VulnerabilitySchedule {
    type Error = ConfigError;

    fn try_from(repr: ScheduleRepr) -> Result<Self, Self::Error> {
        match repr {
            ScheduleRepr::Named(name) => match name.to_ascii_lowercase().as_str() {
                "standard" => Ok(VulnerabilitySchedule::Standard),
                "progressive" => Ok(VulnerabilitySchedule::Progressive),
                "board" => Ok(VulnerabilitySchedule::BoardNumber),
                _ => Err(ConfigError::UnknownSchedule(name)),
            },
            ScheduleRepr::Table(table) if table.is_empty() => Err(ConfigError::EmptySchedule),
            ScheduleRepr::Table(table) => Ok(VulnerabilitySchedule::Table(table)),
        }
    }
}

impl From<VulnerabilitySchedule> for ScheduleRepr {
    fn from(schedule: VulnerabilitySchedule) -> Self {
        match schedule {
            VulnerabilitySchedule::Table(table) => ScheduleRepr::Table(table),
            named => ScheduleRepr::Named(named.name().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Deals played before the game is over.
    pub rounds: u32,
    /// The seat the local player occupies.
    pub local_seat: Seat,
    pub vulnerability: VulnerabilitySchedule,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            local_seat: Seat::South,
            vulnerability: VulnerabilitySchedule::Standard,
        }
    }
}

impl TableConfig {
    /// The configuration shipped with the crate.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_yaml_str(DEFAULT_CONFIG)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if let VulnerabilitySchedule::Table(table) = &self.vulnerability {
            if table.is_empty() {
                return Err(ConfigError::EmptySchedule);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_default() {
        assert_eq!(TableConfig::embedded().unwrap(), TableConfig::default());
    }

    #[test]
    fn test_standard_schedule() {
        let schedule = VulnerabilitySchedule::Standard;
        let rounds: Vec<Vulnerability> = (1..=6).map(|r| schedule.for_round(r)).collect();
        assert_eq!(
            rounds,
            [
                Vulnerability::None,
                Vulnerability::NS,
                Vulnerability::NS,
                Vulnerability::EW,
                Vulnerability::Both,
                Vulnerability::None,
            ]
        );
    }

    #[test]
    fn test_progressive_and_board_schedules() {
        let progressive = VulnerabilitySchedule::Progressive;
        assert_eq!(progressive.for_round(1), Vulnerability::None);
        assert_eq!(progressive.for_round(2), Vulnerability::NS);
        assert_eq!(progressive.for_round(5), Vulnerability::Both);

        let board = VulnerabilitySchedule::BoardNumber;
        assert_eq!(board.for_round(1), Vulnerability::None);
        assert_eq!(board.for_round(3), Vulnerability::EW);
        assert_eq!(board.for_round(4), Vulnerability::Both);
    }

    #[test]
    fn test_parse_named_schedule() {
        let config = TableConfig::from_yaml_str("rounds: 3\nvulnerability: progressive\n").unwrap();
        assert_eq!(config.rounds, 3);
        assert_eq!(config.local_seat, Seat::South);
        assert_eq!(config.vulnerability, VulnerabilitySchedule::Progressive);
    }

    #[test]
    fn test_parse_table_schedule() {
        let config =
            TableConfig::from_yaml_str("local_seat: North\nvulnerability: [Both, EW]\n").unwrap();
        assert_eq!(config.local_seat, Seat::North);
        assert_eq!(config.vulnerability.for_round(1), Vulnerability::Both);
        assert_eq!(config.vulnerability.for_round(2), Vulnerability::EW);
        assert_eq!(config.vulnerability.for_round(3), Vulnerability::Both);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            TableConfig::from_yaml_str("rounds: 0\n"),
            Err(ConfigError::ZeroRounds)
        ));
        assert!(TableConfig::from_yaml_str("vulnerability: []\n").is_err());
        assert!(TableConfig::from_yaml_str("vulnerability: sideways\n").is_err());
        assert!(TableConfig::from_yaml_str("players: 3\n").is_err());
        assert!(matches!(
            TableConfig::load("/nonexistent/table.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_schedule_serializes_by_name() {
        let yaml = serde_yaml::to_string(&TableConfig::default()).unwrap();
        assert!(yaml.contains("vulnerability: standard"));
        let back = TableConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, TableConfig::default());
    }
}
