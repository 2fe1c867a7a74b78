//! Integration test: loadout persistence around a battle
//!
//! Saves and reloads loadouts through real files, then checks that the
//! items a battle consumed are written back and used-up rows disappear.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::combat::{Battle, SilentNarrator};
use skirmish::config::BattleConfig;
use skirmish::loadout::{InventoryStore, Loadout, LoadoutError};
use skirmish::simulator::AutopilotController;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("loadout.json");

    let loadout = Loadout::starter().unwrap();
    loadout.save(&path).unwrap();
    let loaded = Loadout::load(&path).unwrap();

    assert_eq!(loaded, loadout);
}

#[test]
fn test_missing_file_uses_starter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loadout.json");

    let loadout = Loadout::load_or_starter(&path).unwrap();
    assert_eq!(loadout, Loadout::starter().unwrap());
    assert!(!path.exists());
    assert!(matches!(Loadout::load(&path), Err(LoadoutError::Io(_))));
}

#[test]
fn test_malformed_file_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loadout.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Loadout::load_or_starter(&path),
        Err(LoadoutError::Json(_))
    ));
}

#[test]
fn test_oversized_roll_range_is_rejected() {
    let json = r#"{
        "player": {"id": 1, "name": "hero", "max_health": 50},
        "damaging": [{
            "id": 1, "name": "void lance", "count": 1,
            "magnitude": {"min": 0, "max": 4294967295},
            "cooldown": {"min": 1, "max": 2}
        }]
    }"#;
    assert!(matches!(Loadout::from_json(json), Err(LoadoutError::Json(_))));
}

#[test]
fn test_battle_consumption_is_written_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loadout.json");
    let mut loadout = Loadout::starter().unwrap();
    loadout.save(&path).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut battle = Battle::new(
        &loadout.player,
        &loadout.damaging,
        &loadout.healing,
        BattleConfig::simulation(),
        &mut rng,
    );
    let report = battle
        .run(&mut AutopilotController, &mut SilentNarrator, &mut rng)
        .unwrap();
    assert!(!report.deltas.is_empty());

    let before = loadout.clone();
    loadout.apply_deltas(battle.player_id, &report.deltas).unwrap();
    loadout.save(&path).unwrap();
    let reloaded = Loadout::load(&path).unwrap();

    for delta in &report.deltas {
        let expected = before.count_of(delta.item_id).saturating_sub(delta.used);
        assert_eq!(reloaded.count_of(delta.item_id), expected);
    }
    assert!(reloaded.items().all(|item| item.count > 0));
    for exhausted in battle.player.used().iter().filter_map(|item| item.id) {
        assert!(reloaded.items().all(|item| item.id != exhausted));
    }
}

#[test]
fn test_deltas_for_another_player_are_ignored() {
    let mut loadout = Loadout::starter().unwrap();
    let before = loadout.clone();

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut battle = Battle::new(
        &loadout.player,
        &loadout.damaging,
        &loadout.healing,
        BattleConfig::simulation(),
        &mut rng,
    );
    let report = battle
        .run(&mut AutopilotController, &mut SilentNarrator, &mut rng)
        .unwrap();

    loadout
        .apply_deltas(loadout.player.id + 1, &report.deltas)
        .unwrap();
    assert_eq!(loadout, before);
}
