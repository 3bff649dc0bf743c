//! Rift Armada - Entry Point
//!
//! Generates a random fleet from a seed, runs one combat encounter to a
//! terminal state and prints the turn narration.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rift_armada::combat::Encounter;
use rift_armada::content::random_unit;
use rift_armada::core::config::EncounterConfig;
use rift_armada::core::error::Result;

const SHIP_NAMES: [&str; 8] = [
    "Dauntless",
    "Vigilant",
    "Meridian",
    "Kestrel",
    "Oberon",
    "Halcyon",
    "Tempest",
    "Aurora",
];

#[derive(Parser, Debug)]
#[command(about = "Turn-based fleet combat simulator")]
struct Args {
    /// Seed for the encounter RNG
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of randomly generated units
    #[arg(long, default_value_t = 4)]
    units: usize,

    /// Optional TOML config file; overrides the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print post-encounter unit reports as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("rift_armada=info")
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EncounterConfig::load(path)?,
        None => EncounterConfig {
            seed: args.seed,
            units: args.units,
            ..EncounterConfig::default()
        },
    };

    tracing::info!(seed = config.seed, units = config.units, "Rift Armada starting");

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut fleet = Vec::with_capacity(config.units);
    for i in 0..config.units {
        let name = SHIP_NAMES
            .get(i)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("Ship-{}", i + 1));
        fleet.push(random_unit(&name, &mut rng)?);
    }

    let mut encounter = Encounter::with_action_cap(fleet, config.max_cannon_actions);
    for line in encounter.run(&mut rng)? {
        println!("{line}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&encounter.reports())?);
    }

    Ok(())
}
