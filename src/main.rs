//! Skirmish - fight an AI opponent with the items in your loadout.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Items used in the battle are removed from the loadout file afterwards
//! unless `--dry-run` is given.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::build_info;
use skirmish::combat::{Battle, ConsoleMoves, ConsoleNarrator, HumanController, Narrator};
use skirmish::config::BattleConfig;
use skirmish::error::BattleError;
use skirmish::loadout::{InventoryStore, Loadout, LoadoutError};
use skirmish::utils::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;

/// Skirmish - turn-based item battles
#[derive(Parser, Debug)]
#[command(name = "skirmish", about = "Fight an AI opponent armed with copies of your items")]
struct Args {
    /// Loadout file (default: ~/.skirmish/loadout.json)
    #[arg(long = "loadout")]
    loadout: Option<PathBuf>,

    /// Random seed for a replayable battle
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Fix the opponent difficulty (0.25-0.75)
    #[arg(long = "difficulty")]
    difficulty: Option<f64>,

    /// Fix the opponent risk tolerance (0.3-0.85)
    #[arg(long = "risk")]
    risk: Option<f64>,

    /// Do not write used items back to the loadout
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Show the opponent's reasoning on stderr
    #[arg(long = "debug")]
    debug: bool,

    /// Print build information
    #[arg(short = 'V', long = "version")]
    version: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Loadout(#[from] LoadoutError),

    #[error(transparent)]
    Battle(#[from] BattleError),
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        println!("{}", build_info::version_line("skirmish"));
        return ExitCode::SUCCESS;
    }

    init_tracing(args.debug);

    match play(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Battle(BattleError::InputClosed)) => {
            eprintln!("\nInput closed, battle abandoned. Your loadout is unchanged.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play(args: &Args) -> Result<(), AppError> {
    let path = match &args.loadout {
        Some(path) => path.clone(),
        None => Loadout::default_path().map_err(LoadoutError::from)?,
    };
    let mut loadout = Loadout::load_or_starter(&path)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut config = BattleConfig::interactive();
    config.difficulty = args.difficulty;
    config.risk = args.risk;

    let mut battle = Battle::new(
        &loadout.player,
        &loadout.damaging,
        &loadout.healing,
        config,
        &mut rng,
    );
    let mut controller = HumanController::new(ConsoleMoves::stdio());
    let mut narrator = ConsoleNarrator;
    let report = battle.run(&mut controller, &mut narrator, &mut rng)?;

    if args.dry_run {
        narrator.narrate("(dry run: loadout left unchanged)");
        return Ok(());
    }
    loadout.apply_deltas(battle.player_id, &report.deltas)?;
    loadout.save(&path)?;
    tracing::info!(path = %path.display(), "loadout updated");
    Ok(())
}
