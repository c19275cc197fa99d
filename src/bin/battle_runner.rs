//! Headless Battle Runner
//!
//! Runs a scenario to completion and prints the result as JSON or text.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use grid_battle::battle::{BattleStats, Scenario};
use grid_battle::core::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Built-in scenario used when no file is given
const DEFAULT_SCENARIO: &str = include_str!("../../scenarios/skirmish.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless Battle Runner - run a grid battle scenario
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run a grid battle scenario and report the outcome")]
struct Args {
    /// Scenario TOML file (defaults to the built-in skirmish)
    scenario: Option<PathBuf>,

    /// Override the scenario's tick cap
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Seed for randomized strategies
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print the battle log trail to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    scenario: String,
    seed: Option<u64>,
    #[serde(flatten)]
    stats: BattleStats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_battle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let (name, mut scenario) = match &args.scenario {
        Some(path) => (path.display().to_string(), Scenario::load(path)?),
        None => ("skirmish (built-in)".to_string(), Scenario::from_toml_str(DEFAULT_SCENARIO)?),
    };
    if let Some(max_ticks) = args.max_ticks {
        scenario = scenario.with_max_ticks(max_ticks);
    }
    if let Some(seed) = args.seed {
        scenario = scenario.with_seed(seed);
    }

    let mut engine = scenario.build_engine()?;
    engine.run();
    let stats = engine.battle_stats();

    if args.verbose {
        eprintln!("=== Battle Log ===");
        for line in &stats.logs {
            eprintln!("  {}", line);
        }
        eprintln!();
    }

    match args.format {
        OutputFormat::Json => {
            let report = RunReport {
                scenario: name,
                seed: args.seed,
                stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("=== Battle Result ===");
            println!("Scenario: {}", name);
            println!("Winner: {}", stats.winner);
            println!("Ticks: {}", stats.total_ticks);
            println!("teamA remaining: {}", stats.team_a_units_remaining);
            println!("teamB remaining: {}", stats.team_b_units_remaining);
            println!("Total damage: {}", stats.total_damage_dealt);
            for (team, damage) in &stats.damage_by_team {
                println!("  {} dealt {}", team, damage);
            }
        }
    }

    Ok(())
}
