//! Knights Tourney - headless tournament runner
//!
//! Registers a field of knights, fights rounds until the arena reaches its
//! final level (or the round cap), then reports the winners.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use knights_tourney::arena::{Arena, RoundReport};
use knights_tourney::combat::{EquipmentCatalog, Knight};
use knights_tourney::core::error::Result;
use knights_tourney::core::{RandomSource, RngSource, TournamentConfig};

/// Headless tournament runner
#[derive(Parser, Debug)]
#[command(name = "knights-tourney")]
#[command(about = "Run a knight tournament and report the winners")]
struct Args {
    /// Knight to register (repeatable); the first is the player
    #[arg(long = "knight")]
    knights: Vec<String>,

    /// Equipment catalog TOML (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Tournament config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds even if the tournament is not over
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Log every exchange
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct TournamentSummary<'a> {
    rounds: &'a [RoundReport],
    level: u32,
    pot: u64,
    concluded: bool,
    knights: &'a [Knight],
    winners: Vec<&'a str>,
}

const DEFAULT_FIELD: [&str; 4] = ["arthur", "lancelot", "gawain", "percival"];

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &args.catalog {
        Some(path) => EquipmentCatalog::load(path)?,
        None => EquipmentCatalog::builtin()?,
    };
    let config = match &args.config {
        Some(path) => TournamentConfig::load(path)?,
        None => TournamentConfig::default(),
    };

    match args.seed {
        Some(seed) => run(&args, catalog, config, &mut RngSource::seeded(seed)),
        None => run(&args, catalog, config, &mut RngSource::thread()),
    }
}

fn run(
    args: &Args,
    catalog: EquipmentCatalog,
    config: TournamentConfig,
    rng: &mut impl RandomSource,
) -> Result<()> {
    let mut arena = Arena::new(catalog, config)?;

    if args.knights.is_empty() {
        for name in DEFAULT_FIELD {
            arena.add_knight(name, rng)?;
        }
    } else {
        for name in &args.knights {
            arena.add_knight(name, rng)?;
        }
    }

    let mut rounds = Vec::new();
    while !arena.is_concluded() && (rounds.len() as u32) < args.max_rounds {
        rounds.push(arena.run_round(rng)?);
    }

    if !arena.is_concluded() {
        tracing::warn!(
            "Stopped after {} rounds at level {} of {}",
            rounds.len(),
            arena.level(),
            arena.config().final_level
        );
    }

    let winners: Vec<&str> = arena.find_winners().into_iter().map(Knight::name).collect();

    if args.format == "json" {
        let summary = TournamentSummary {
            rounds: &rounds,
            level: arena.level(),
            pot: arena.pot(),
            concluded: arena.is_concluded(),
            knights: arena.knights(),
            winners,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&rounds, &arena, &winners);
    }

    Ok(())
}

fn print_text(rounds: &[RoundReport], arena: &Arena, winners: &[&str]) {
    for (number, round) in rounds.iter().enumerate() {
        println!("{}", "*".repeat(10));
        println!("ROUND {}: {} vs {}", number + 1, round.player, round.opponent);
        println!("{}", "*".repeat(10));
        for message in round.messages() {
            println!("  {}", message);
        }
        if round.is_draw() {
            println!("  The duel was a draw. Neither side wins!");
        }
        println!();
    }

    println!("Final level {}, pot {} gold", arena.level(), arena.pot());
    for knight in arena.knights() {
        println!(
            "  {:<30} Gold: {:>5}  Health: {}/{}",
            knight.name(),
            knight.gold(),
            knight.health(),
            knight.max_health()
        );
    }
    println!();
    println!("WINNER:: {}", winners.join(", "));
}
