//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations of the opponent engine against an autopilot
//! player.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 1000 battles, rolled opponents
//!   cargo run --bin simulate -- -n 100 --difficulty 0.7
//!   cargo run --bin simulate -- --seed 42 --json     # Reproducible run, JSON saved

use clap::Parser;
use skirmish::loadout::Loadout;
use skirmish::simulator::{run_simulation, SimConfig};
use skirmish::utils::logging::init_tracing;
use std::process::ExitCode;

/// Skirmish balance simulator
#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Fight seeded battles against the opponent engine")]
struct Args {
    /// Number of battles to simulate
    #[arg(short = 'n', long = "runs", default_value_t = 1000)]
    runs: u32,

    /// Random seed for reproducibility
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Ticks per battle before it is called off
    #[arg(short = 't', long = "ticks")]
    ticks: Option<u64>,

    /// Max health of the simulated player
    #[arg(long = "health")]
    health: Option<u32>,

    /// Fix the opponent difficulty (0.25-0.75)
    #[arg(long = "difficulty")]
    difficulty: Option<f64>,

    /// Fix the opponent risk tolerance (0.3-0.85)
    #[arg(long = "risk")]
    risk: Option<f64>,

    /// Save a JSON report next to the text one
    #[arg(long = "json")]
    json: bool,

    /// Print every battle
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            num_runs: self.runs,
            seed: self.seed,
            max_ticks_per_battle: self.ticks.unwrap_or(defaults.max_ticks_per_battle),
            player_max_health: self.health.unwrap_or(defaults.player_max_health),
            difficulty: self.difficulty,
            risk: self.risk,
            verbosity: if self.verbose { 2 } else { 1 },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(false);
    let config = args.sim_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SKIRMISH BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:        {}", config.num_runs);
    println!("  Player Health:  {}", config.player_max_health);
    println!("  Max Ticks:      {}", config.max_ticks_per_battle);
    if let Some(difficulty) = config.difficulty {
        println!("  Difficulty:     {}", difficulty);
    }
    if let Some(risk) = config.risk {
        println!("  Risk:           {}", risk);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match Loadout::starter()
        .map_err(|e| e.to_string())
        .and_then(|loadout| run_simulation(&config, &loadout).map_err(|e| e.to_string()))
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("failed to write {filename}: {e}");
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }
    ExitCode::SUCCESS
}
