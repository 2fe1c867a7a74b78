//! Integration test: opponent decision cascade
//!
//! Exercises `Opponent::decide_move` through the public API: lethal attacks
//! take priority, the threat lookahead forces heals, the player is never
//! mutated by the opponent's planning, and mirrored pools are independent.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::combat::{Combatant, DecisionReason, Opponent, OpponentProfile};
use skirmish::config::BattleConfig;
use skirmish::items::{Item, ItemSlot, RollRange};

fn range(min: u32, max: u32) -> RollRange {
    RollRange::new(min, max).unwrap()
}

fn attack(id: u32, name: &str, min: u32, max: u32) -> Item {
    Item::new(id, name, 3, range(min, max), range(1, 2))
}

#[test]
fn test_lethal_attack_beats_every_other_option() {
    let opponent = Opponent::new(
        Combatant::new(
            "hard ogre",
            40,
            vec![
                attack(1, "dagger", 1, 3),
                attack(2, "greatsword", 10, 30),
                attack(3, "club", 12, 14),
            ],
            vec![Item::new(4, "potion", 2, range(10, 20), range(1, 1))],
        )
        .with_health(5),
        OpponentProfile::new(0.75, 0.5),
    );
    let player =
        Combatant::new("hero", 40, vec![attack(1, "dagger", 20, 30)], vec![]).with_health(12);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let decision = opponent.decide_move(&player, &mut rng).unwrap();

    // greatsword: (30 - 12) / 21 beats club's (14 - 12) / 3
    assert_eq!(decision.slot, ItemSlot::damaging(1));
    match decision.reason {
        DecisionReason::Lethal { chance } => assert!((chance - 18.0 / 21.0).abs() < 1e-12),
        other => panic!("expected a lethal decision, got {other:?}"),
    }
}

#[test]
fn test_threatened_opponent_heals() {
    let opponent = Opponent::new(
        Combatant::new(
            "easy witch",
            30,
            vec![attack(1, "hex", 1, 2)],
            vec![
                Item::new(4, "potion", 2, range(10, 20), range(2, 3)),
                Item::new(5, "draught", 1, range(14, 16), range(1, 1)),
            ],
        )
        .with_health(12),
        OpponentProfile::new(0.3, 0.4),
    );
    // two maul hits always deal at least 12
    let player = Combatant::new("hero", 30, vec![attack(1, "maul", 6, 8)], vec![]);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let threat = opponent.estimate_threat(&player).unwrap();
    assert_eq!(threat, 1.0);

    let decision = opponent.decide_move(&player, &mut rng).unwrap();
    // missing 18: both heals average 15, the draught has the tighter range
    assert_eq!(decision.slot, ItemSlot::healing(1));
    assert!(matches!(decision.reason, DecisionReason::Survive { .. }));
}

#[test]
fn test_partial_threat_uses_cross_product() {
    let opponent = Opponent::new(
        Combatant::new("medium hog", 30, vec![attack(1, "tusk", 1, 2)], vec![]).with_health(7),
        OpponentProfile::new(0.5, 0.5),
    );
    let player = Combatant::new("hero", 30, vec![attack(1, "sling", 1, 4)], vec![]);

    // sums of two [1,4] rolls reaching 7: (3,4) (4,3) (4,4)
    assert_eq!(opponent.estimate_threat(&player).unwrap(), 3.0 / 16.0);
}

#[test]
fn test_planning_never_mutates_the_player() {
    let opponent = Opponent::new(
        Combatant::new(
            "hard spirit",
            30,
            vec![attack(1, "wail", 2, 9), attack(2, "chill", 1, 4)],
            vec![Item::new(4, "ether", 2, range(3, 9), range(1, 1))],
        )
        .with_health(9),
        OpponentProfile::new(0.7, 0.35),
    );
    let player = Combatant::new(
        "hero",
        30,
        vec![
            Item::new(1, "bomb", 1, range(5, 9), range(3, 3)),
            Item::new(2, "arrow", 4, range(2, 6), range(1, 1)),
        ],
        vec![],
    )
    .with_health(17);
    let before = player.clone();

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    for _ in 0..25 {
        opponent.decide_move(&player, &mut rng).unwrap();
    }
    assert_eq!(player, before);
}

#[test]
fn test_mirrored_pools_are_independent_both_ways() {
    let mut player = Combatant::new(
        "hero",
        50,
        vec![attack(1, "sword", 4, 8)],
        vec![Item::new(2, "potion", 2, range(5, 10), range(1, 1))],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut opponent = Opponent::mirror(&player, &BattleConfig::default(), &mut rng);

    assert_eq!(opponent.combatant.damaging(), player.damaging());
    assert_eq!(opponent.combatant.healing(), player.healing());

    opponent.combatant.reduce_item(ItemSlot::damaging(0)).unwrap();
    assert_eq!(player.damaging()[0].count, 3);
    assert_eq!(opponent.combatant.damaging()[0].count, 2);

    player.reduce_item(ItemSlot::healing(0)).unwrap();
    player.reduce_item(ItemSlot::healing(0)).unwrap();
    assert!(player.healing().is_empty());
    assert_eq!(opponent.combatant.healing()[0].count, 2);
}

#[test]
fn test_mirrored_opponent_profile_is_in_range() {
    let player = Combatant::new("hero", 80, vec![attack(1, "sword", 4, 8)], vec![]);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..50 {
        let opponent = Opponent::mirror(&player, &BattleConfig::default(), &mut rng);
        let profile = opponent.profile;
        assert!((0.25..=0.75).contains(&profile.difficulty));
        assert!((0.3..=0.85).contains(&profile.risk));
        assert!(opponent.combatant.name().starts_with(profile.tier().name()));
        assert_eq!(
            opponent.combatant.max_health(),
            (80.0 * (1.0 + (profile.difficulty - 0.5))).round() as u32
        );
    }
}
