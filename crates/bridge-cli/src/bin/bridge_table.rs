/// Play a whole automated duplicate session at one table and print the results.
use anyhow::{Context, Result};
use bridge_core::io::pbn::{self, DealOutcome};
use bridge_core::{Partnership, Seat};
use bridge_table::{
    run_session, DecisionProvider, FirstLegal, RandomLegal, RoundResult, Seats, Table,
    TableConfig,
};
use clap::{Parser, ValueEnum};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Play an automated four-seat duplicate bridge session"
)]
struct Args {
    /// Number of deals to play (overrides the config file)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Seed for the shuffle and the random players; picked at random if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML table configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How every seat chooses its calls and cards
    #[arg(short, long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Relative weight of a pass against any single bid for the random policy
    #[arg(long, default_value_t = 12)]
    pass_weight: u32,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log every call and card (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Pass every auction and play the first legal card
    First,
    /// Pick uniformly among legal options, biased towards passing
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Pbn,
}

#[derive(Serialize)]
struct SessionReport<'a> {
    seed: u64,
    config: &'a TableConfig,
    results: &'a [RoundResult],
    ns_total: i32,
    ew_total: i32,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;
    Ok(())
}

fn load_config(args: &Args) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TableConfig::embedded().context("embedded config is invalid")?,
    };
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    config.validate()?;
    Ok(config)
}

fn providers(policy: Policy, seed: u64, pass_weight: u32) -> Vec<Box<dyn DecisionProvider>> {
    Seat::ALL
        .iter()
        .map(|seat| -> Box<dyn DecisionProvider> {
            match policy {
                Policy::First => Box::new(FirstLegal),
                Policy::Random => Box::new(
                    RandomLegal::new(Some(seed.wrapping_add(1 + seat.idx() as u64)))
                        .with_pass_weight(pass_weight),
                ),
            }
        })
        .collect()
}

fn print_text(table: &Table, seed: u64) {
    let local = table.config().local_seat;
    println!("Seed: {}", seed);
    if let Some(draw) = table.dealer_draw() {
        let cards: Vec<String> = draw
            .iter()
            .map(|(seat, card)| format!("{} {}", seat.name(), card.pretty()))
            .collect();
        println!("Draw for dealer: {}", cards.join(", "));
    }

    for result in table.results() {
        let board = &result.board;
        println!();
        println!(
            "Round {}  Dealer: {}  Vulnerable: {}",
            result.round,
            board.dealer.name(),
            board.vulnerability
        );
        for (seat, hand) in board.hands.iter() {
            let marker = if seat == local { " (you)" } else { "" };
            println!("  {:<12} {}", format!("{}{}", seat.name(), marker), hand);
        }
        println!("Auction: {}", result.auction.render());
        println!(
            "Result:  {}  NS {:+}  EW {:+}",
            result.description, result.ns_delta, result.ew_delta
        );
    }

    println!();
    println!(
        "Final score: NS {}  EW {}",
        table.total(Partnership::NS),
        table.total(Partnership::EW)
    );
}

fn print_json(table: &Table, seed: u64) -> Result<()> {
    let report = SessionReport {
        seed,
        config: table.config(),
        results: table.results(),
        ns_total: table.total(Partnership::NS),
        ew_total: table.total(Partnership::EW),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_pbn(table: &Table) {
    for (i, result) in table.results().iter().enumerate() {
        let outcome = match (result.contract, result.tricks_made) {
            (Some(contract), Some(tricks)) => DealOutcome::Played { contract, tricks },
            _ => DealOutcome::PassedOut,
        };
        if i > 0 {
            println!();
        }
        print!("{}", pbn::export_board(&result.board, result.round, outcome));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, rounds = config.rounds, schedule = config.vulnerability.name(), "starting session");

    let mut owned = providers(args.policy, seed, args.pass_weight);
    let [n, e, s, w] = owned.as_mut_slice() else {
        anyhow::bail!("expected one player per seat");
    };
    let mut seats: Seats = [&mut **n, &mut **e, &mut **s, &mut **w];

    let mut table = Table::with_seed(config, seed);
    run_session(&mut table, &mut seats).context("session aborted")?;

    match args.format {
        Format::Text => print_text(&table, seed),
        Format::Json => print_json(&table, seed)?,
        Format::Pbn => print_pbn(&table),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "bridge-table",
            "--rounds",
            "3",
            "--seed",
            "42",
            "--policy",
            "first",
            "--format",
            "pbn",
            "-v",
        ]);
        assert_eq!(args.rounds, Some(3));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.policy, Policy::First);
        assert_eq!(args.format, Format::Pbn);
        assert!(args.verbose);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["bridge-table"]);
        assert_eq!(args.policy, Policy::Random);
        assert_eq!(args.format, Format::Text);
        let config = load_config(&args).unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let args = Args::parse_from(["bridge-table", "--rounds", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_one_provider_per_seat() {
        let providers = providers(Policy::Random, 1, 4);
        assert_eq!(providers.len(), 4);
        assert!(providers.iter().all(|p| p.name() == "random"));
    }
}
