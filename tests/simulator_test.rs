//! Integration test: simulator over the starter loadout

use skirmish::combat::DifficultyTier;
use skirmish::loadout::Loadout;
use skirmish::simulator::{run_simulation, SimConfig};

fn quiet(config: SimConfig) -> SimConfig {
    SimConfig {
        verbosity: 0,
        ..config
    }
}

#[test]
fn test_outcomes_account_for_every_run() {
    let loadout = Loadout::starter().unwrap();
    let report = run_simulation(&quiet(SimConfig::quick(30)), &loadout).unwrap();

    assert_eq!(report.num_runs, 30);
    assert_eq!(
        report.player_wins + report.opponent_wins + report.stalled,
        30
    );
    assert_eq!(report.tiers.iter().map(|t| t.battles).sum::<u32>(), 30);
    assert_eq!(report.runs.len(), 30);
    assert!(report.decisions.total() > 0);
}

#[test]
fn test_fixed_opponent_stays_in_one_tier() {
    let loadout = Loadout::starter().unwrap();
    let config = quiet(SimConfig {
        num_runs: 15,
        seed: Some(7),
        ..SimConfig::fixed_opponent(0.7, 0.6)
    });
    let report = run_simulation(&config, &loadout).unwrap();

    let hard = report
        .tiers
        .iter()
        .find(|t| t.tier == DifficultyTier::Hard)
        .unwrap();
    assert_eq!(hard.battles, 15);
    assert!(report.runs.iter().all(|r| r.difficulty == 0.7 && r.risk == 0.6));
}

#[test]
fn test_json_report_parses() {
    let loadout = Loadout::starter().unwrap();
    let report = run_simulation(&quiet(SimConfig::quick(5)), &loadout).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
    assert_eq!(json["num_runs"], 5);
    assert_eq!(json["tiers"].as_array().map(Vec::len), Some(3));
    assert!(report.to_text().contains("BALANCE ASSESSMENT"));
}
