//! Scenario tests: stats -> turn order -> abilities -> monster block -> rewards
//!
//! Each test drives the public API the way a game front-end would.

use combat_core::ability::{AbilityResolver, Battlefield};
use combat_core::combat::{DamageKind, DodgeKind, HealKind};
use combat_core::config::CombatConstants;
use combat_core::formula::attack_damage;
use combat_core::item::{EquipmentTemplate, InstanceId, ItemInstance};
use combat_core::prelude::*;
use combat_core::set_bonus::{EquipmentSet, SetTier};
use combat_core::turn::TurnOrder;
use combat_core::types::ItemKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

fn stats(attack: i32, defense: i32, hp: i32, mp: i32, speed: i32) -> FlatStats {
    FlatStats {
        attack,
        defense,
        hp,
        mp,
        speed,
    }
}

fn item(id: u64, kind: ItemKind, attack: i32, set: Option<&str>) -> ItemInstance {
    ItemInstance::new(
        InstanceId(id),
        EquipmentTemplate {
            id: format!("item_{id}"),
            name: format!("Item {id}"),
            kind,
            rarity: Rarity::Common,
            attack,
            defense: 0,
            hp: 0,
            mp: 0,
            speed: 0,
            allowed_jobs: Job::ALL.to_vec(),
            set: set.map(str::to_string),
        },
    )
}

/// A single-set table
fn table(name: &str, tiers: Vec<SetTier>) -> SetBonusTable {
    SetBonusTable::from_sets(vec![EquipmentSet {
        name: name.to_string(),
        theme: String::new(),
        tiers,
    }])
    .unwrap()
}

/// Bundled data with the set table swapped out
fn data_with_sets(sets: SetBonusTable) -> Arc<GameData> {
    Arc::new(GameData {
        sets,
        ..GameData::load_default().unwrap()
    })
}

fn bundled() -> Arc<GameData> {
    Arc::new(GameData::load_default().unwrap())
}

/// Equip two pieces of `set` in weapon and armor
fn wear_pair(member: &mut Character, set: &str, first_id: u64) {
    member
        .equipment
        .insert(EquipSlot::Weapon, item(first_id, ItemKind::Weapon, 0, Some(set)));
    member
        .equipment
        .insert(EquipSlot::Armor, item(first_id + 1, ItemKind::Armor, 0, Some(set)));
}

fn damage_to(events: &[CombatEvent], target: CombatantId) -> Vec<i32> {
    events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Damage { target: t, amount, .. } if *t == target => Some(*amount),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Stat aggregation and set thresholds
// ---------------------------------------------------------------------------

#[test]
fn test_two_items_then_set_percent() {
    let mut fighter = Character::new("f", "Bork", Job::Fighter, stats(10, 0, 50, 0, 5));
    fighter
        .equipment
        .insert(EquipSlot::Weapon, item(1, ItemKind::Weapon, 5, Some("Might")));
    fighter
        .equipment
        .insert(EquipSlot::Helmet, item(2, ItemKind::Helmet, 5, Some("Might")));

    let no_bonus = SetBonusTable::new();
    assert_eq!(effective_stats(&fighter, &no_bonus).attack, 20);

    let might = table(
        "Might",
        vec![SetTier {
            pieces: 2,
            attack_percent: 10,
            ..SetTier::default()
        }],
    );
    assert_eq!(effective_stats(&fighter, &might).attack, 22);

    // 25 * 10% = 2.5, floored
    fighter.base.attack = 15;
    assert_eq!(effective_stats(&fighter, &might).attack, 27);
}

#[test]
fn test_set_tiers_are_cumulative() {
    let tier = |pieces, crit| SetTier {
        pieces,
        crit_chance: crit,
        ..SetTier::default()
    };
    let sets = table("Quad", vec![tier(2, 1), tier(4, 10), tier(6, 100), tier(9, 1000)]);

    let slots = [
        (EquipSlot::Weapon, ItemKind::Weapon),
        (EquipSlot::Armor, ItemKind::Armor),
        (EquipSlot::Helmet, ItemKind::Helmet),
        (EquipSlot::Gloves, ItemKind::Gloves),
        (EquipSlot::Boots, ItemKind::Boots),
        (EquipSlot::Necklace, ItemKind::Necklace),
    ];
    let mut fighter = Character::new("f", "Bork", Job::Fighter, stats(10, 0, 50, 0, 5));
    for (i, (slot, kind)) in slots.iter().take(2).enumerate() {
        fighter.equipment.insert(*slot, item(i as u64, *kind, 0, Some("Quad")));
    }

    let bonuses = active_bonuses(fighter.equipment.iter().map(|(_, i)| i), &sets);
    assert_eq!(bonuses.len(), 1);
    assert_eq!(bonuses[0].pieces, 2);
    assert_eq!(bonuses[0].unlocked_tiers.len(), 1);
    assert_eq!(combat_stats(&fighter, &sets).crit_chance, 1);

    for (i, (slot, kind)) in slots.iter().enumerate().skip(2) {
        fighter.equipment.insert(*slot, item(i as u64, *kind, 0, Some("Quad")));
    }
    let bonuses = active_bonuses(fighter.equipment.iter().map(|(_, i)| i), &sets);
    let unlocked: Vec<u32> = bonuses[0].unlocked_tiers.iter().map(|t| t.pieces).collect();
    assert_eq!(unlocked, [2, 4, 6]);
    assert_eq!(combat_stats(&fighter, &sets).crit_chance, 111);
}

#[test]
fn test_both_rings_count_toward_one_set() {
    let sets = table(
        "Twin",
        vec![SetTier {
            pieces: 2,
            evasion: 15,
            ..SetTier::default()
        }],
    );
    let mut monk = Character::new("m", "Milo", Job::Monk, stats(10, 0, 45, 10, 12));
    monk.equipment.insert(EquipSlot::Ring1, item(1, ItemKind::Ring, 0, Some("Twin")));
    monk.equipment.insert(EquipSlot::Ring2, item(2, ItemKind::Ring, 0, Some("Twin")));

    assert_eq!(combat_stats(&monk, &sets).evasion, 15);
}

// ---------------------------------------------------------------------------
// Turn order
// ---------------------------------------------------------------------------

#[test]
fn test_turn_order_by_speed_and_dead_excluded() {
    let mut party = vec![
        Character::new("f", "Bork", Job::Fighter, stats(10, 0, 50, 0, 8)),
        Character::new("g", "Pyra", Job::Mage, stats(4, 0, 30, 40, 12)),
        Character::new("m", "Milo", Job::Monk, stats(10, 0, 45, 10, 10)),
    ];
    let sets = SetBonusTable::new();
    let statuses = StatusEffectTracker::new();

    let order = TurnOrder::build(&party, &[], &sets, &statuses);
    assert_eq!(order.party_order(), [1, 2, 0]);

    party[1].hp = 0;
    let order = TurnOrder::build(&party, &[], &sets, &statuses);
    assert_eq!(order.party_order(), [2, 0]);
}

// ---------------------------------------------------------------------------
// Ability resolution
// ---------------------------------------------------------------------------

#[test]
fn test_damage_formula_and_penetration() {
    assert_eq!(attack_damage(20, 10, 10, 0), 15);
    assert_eq!(attack_damage(20, 10, 10, 20), 16);

    let sets = table(
        "Piercing",
        vec![SetTier {
            pieces: 2,
            defense_penetration: 20,
            ..SetTier::default()
        }],
    );
    let mut party = vec![Character::new("f", "Bork", Job::Fighter, stats(20, 0, 50, 0, 5))];
    wear_pair(&mut party[0], "Piercing", 1);
    let mut monsters = vec![Monster::new("Golem", 100, 5, 10, 1)];
    let mut statuses = StatusEffectTracker::new();
    let mut defending = false;
    let data = bundled();
    let attack = data.abilities.get("attack").unwrap();
    let constants = CombatConstants::default();
    let mut rng = ScriptedRng::new([0.99]);

    let mut field = Battlefield {
        party: &mut party,
        monsters: &mut monsters,
        statuses: &mut statuses,
        defending: &mut defending,
    };
    let events = AbilityResolver::new(&sets, &constants)
        .resolve(&mut field, 0, attack, Some(0), &mut rng)
        .unwrap();

    assert_eq!(damage_to(&events, CombatantId::Monster(0)), [16]);
    assert_eq!(monsters[0].hp, 84);
}

#[test]
fn test_guaranteed_crit_doubles_damage() {
    let sets = table(
        "Keen",
        vec![SetTier {
            pieces: 2,
            crit_chance: 100,
            crit_damage: 50,
            ..SetTier::default()
        }],
    );
    let mut party = vec![Character::new("f", "Bork", Job::Fighter, stats(20, 0, 50, 0, 5))];
    wear_pair(&mut party[0], "Keen", 1);

    let mut battle = CombatSession::new(data_with_sets(sets), party, Vec::new(), 1, ScriptedRng::new([0.5]));
    battle.start_with(vec![Monster::new("Golem", 100, 5, 10, 1)]).unwrap();
    battle.use_ability("attack", Some(0)).unwrap();

    let events = battle.take_events();
    let hit = events
        .iter()
        .find(|e| matches!(e, CombatEvent::Damage { kind: DamageKind::Hit, .. }))
        .unwrap();
    assert!(matches!(
        hit,
        CombatEvent::Damage {
            amount: 30,
            critical: true,
            ..
        }
    ));
    assert!(battle.log().iter().any(|l| l == "Critical hit! Bork deals 30 damage to Golem!"));
}

#[test]
fn test_chain_damage_hits_other_living_monsters() {
    let sets = table(
        "Storm",
        vec![SetTier {
            pieces: 2,
            chain_damage: 25,
            ..SetTier::default()
        }],
    );
    let mut party = vec![Character::new("f", "Bork", Job::Fighter, stats(100, 0, 50, 0, 5))];
    wear_pair(&mut party[0], "Storm", 1);

    let mut battle = CombatSession::new(data_with_sets(sets), party, Vec::new(), 1, ScriptedRng::new([0.99]));
    battle
        .start_with(vec![
            Monster::new("Bat", 500, 1, 0, 1),
            Monster::new("Bat", 500, 1, 0, 1),
            Monster::new("Bat", 500, 1, 0, 1),
        ])
        .unwrap();
    battle.use_ability("attack", Some(1)).unwrap();

    let hp: Vec<i32> = battle.monsters().iter().map(|m| m.hp).collect();
    assert_eq!(hp, [475, 400, 475]);
    let chain_lines = battle.log().iter().filter(|l| l.starts_with("Chain damage hits")).count();
    assert_eq!(chain_lines, 2);
}

#[test]
fn test_lowest_hp_ratio_gets_healed() {
    let mut party = vec![
        Character::new("f", "Bork", Job::Fighter, stats(10, 0, 60, 0, 8)),
        Character::new("g", "Pyra", Job::Mage, stats(4, 0, 40, 40, 12)),
        Character::new("m", "Milo", Job::Monk, stats(10, 0, 30, 10, 10)),
    ];
    // Bork 30/60 (50%) is lower than Milo 20/30 (66%) despite more raw HP
    party[0].hp = 30;
    party[2].hp = 20;

    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.99]));
    battle.start_with(vec![Monster::new("Rat", 50, 1, 0, 1)]).unwrap();
    assert_eq!(battle.current_actor(), Some(1));
    battle.use_ability("heal", None).unwrap();

    assert_eq!(battle.party()[0].hp, 55);
    assert_eq!(battle.party()[2].hp, 20);
    assert_eq!(battle.party()[1].mp, 34);
    assert!(battle.take_events().iter().any(|e| matches!(
        e,
        CombatEvent::Healed {
            target: CombatantId::Party(0),
            amount: 25,
            kind: HealKind::Ability
        }
    )));
}

// ---------------------------------------------------------------------------
// Status effects
// ---------------------------------------------------------------------------

fn ember_mage(hp_of_target: i32) -> CombatSession<ScriptedRng> {
    let sets = table(
        "Ember",
        vec![SetTier {
            pieces: 2,
            burn_damage: 5,
            ..SetTier::default()
        }],
    );
    let mut mage = Character::new("g", "Pyra", Job::Mage, stats(10, 0, 40, 40, 12));
    wear_pair(&mut mage, "Ember", 1);

    // 0.0 passes the 40% freeze roll
    let mut battle = CombatSession::new(data_with_sets(sets), vec![mage], Vec::new(), 1, ScriptedRng::new([0.0]));
    battle
        .start_with(vec![Monster::new("Imp", hp_of_target, 10, 0, 1)])
        .unwrap();
    battle.use_ability("ice_shard", Some(0)).unwrap();
    battle
}

#[test]
fn test_burn_then_freeze_skip() {
    let mut battle = ember_mage(100);
    // 10 attack * 2.2
    assert_eq!(battle.monsters()[0].hp, 78);
    let record = battle.statuses().query(CombatantId::Monster(0)).unwrap();
    assert_eq!(record.burn, Some(5));
    assert!(record.frozen);
    assert_eq!(battle.phase(), BattlePhase::MonsterTurn);

    battle.take_events();
    battle.run_monster_turn().unwrap();
    let events = battle.take_events();

    assert_eq!(battle.monsters()[0].hp, 73);
    assert_eq!(battle.party()[0].hp, 40);
    assert!(events.contains(&CombatEvent::TurnSkipped {
        actor: CombatantId::Monster(0)
    }));
    let record = battle.statuses().query(CombatantId::Monster(0)).unwrap();
    assert!(!record.frozen);
    assert_eq!(record.burn, Some(5));
    assert_eq!(battle.round(), 2);
}

#[test]
fn test_burn_kills_before_freeze_matters() {
    let mut battle = ember_mage(25);
    assert_eq!(battle.monsters()[0].hp, 3);
    battle.take_events();

    battle.run_monster_turn().unwrap();
    let events = battle.take_events();

    assert_eq!(battle.phase(), BattlePhase::Victory);
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::TurnSkipped { .. })));
    assert!(events.contains(&CombatEvent::Defeated {
        target: CombatantId::Monster(0)
    }));
}

#[test]
fn test_taunt_draws_attacks_to_the_fighter() {
    let party = vec![
        Character::new("f", "Bork", Job::Fighter, stats(10, 0, 60, 10, 10)),
        Character::new("g", "Pyra", Job::Mage, stats(4, 0, 40, 40, 5)),
    ];
    // 0.99 would pick Pyra for an untaunted monster
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.99]));
    battle.start_with(vec![Monster::new("Ogre", 500, 10, 0, 1)]).unwrap();

    battle.use_ability("provoke", Some(0)).unwrap();
    battle.use_ability("attack", Some(0)).unwrap();
    battle.run_monster_turn().unwrap();

    assert_eq!(battle.party()[0].mp, 6);
    // 10 attack - 2 reduction
    assert_eq!(battle.party()[0].hp, 52);
    assert_eq!(battle.party()[1].hp, 40);

    // Second taunted turn, then the taunt is spent
    battle.use_ability("attack", Some(0)).unwrap();
    battle.use_ability("attack", Some(0)).unwrap();
    battle.run_monster_turn().unwrap();
    assert_eq!(battle.party()[0].hp, 44);
    assert!(battle.statuses().taunt(CombatantId::Monster(0)).is_none());

    battle.use_ability("attack", Some(0)).unwrap();
    battle.use_ability("attack", Some(0)).unwrap();
    battle.run_monster_turn().unwrap();
    assert_eq!(battle.party()[1].hp, 30);
}

#[test]
fn test_defend_lasts_one_monster_block() {
    let party = vec![Character::new("f", "Bork", Job::Fighter, stats(10, 4, 60, 0, 10))];
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.0]));
    battle.start_with(vec![Monster::new("Ogre", 500, 10, 0, 1)]).unwrap();

    battle.use_ability("defend", None).unwrap();
    assert!(battle.is_defending());
    battle.run_monster_turn().unwrap();
    // 10 - 8/2
    assert_eq!(battle.party()[0].hp, 54);
    assert!(!battle.is_defending());

    battle.use_ability("attack", Some(0)).unwrap();
    battle.run_monster_turn().unwrap();
    // 10 - 4/2
    assert_eq!(battle.party()[0].hp, 46);
}

#[test]
fn test_stealth_dodges_before_evasion() {
    let party = vec![Character::new("m", "Milo", Job::Monk, stats(10, 0, 45, 10, 12))];
    // target pick, then a 10 stealth roll against 20%
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.0, 0.1]));
    battle.start_with(vec![Monster::new("Ogre", 500, 10, 0, 1)]).unwrap();

    battle.use_ability("stealth", None).unwrap();
    battle.take_events();
    battle.run_monster_turn().unwrap();

    assert_eq!(battle.party()[0].hp, 45);
    assert!(battle.take_events().contains(&CombatEvent::Dodged {
        attacker: CombatantId::Monster(0),
        target: CombatantId::Party(0),
        kind: DodgeKind::Stealth,
    }));
    assert_eq!(battle.statuses().stealth(CombatantId::Party(0)), 20);
}

fn vampire_fighter(hp: i32) -> CombatSession<ScriptedRng> {
    let sets = table(
        "Vampire",
        vec![SetTier {
            pieces: 2,
            lifesteal: 50,
            on_hit_heal: 3,
            ..SetTier::default()
        }],
    );
    let mut bork = Character::new("f", "Bork", Job::Fighter, stats(20, 0, 60, 0, 5));
    wear_pair(&mut bork, "Vampire", 1);
    bork.hp = hp;

    let mut battle = CombatSession::new(data_with_sets(sets), vec![bork], Vec::new(), 1, ScriptedRng::new([0.99]));
    battle.start_with(vec![Monster::new("Golem", 100, 1, 0, 1)]).unwrap();
    battle.use_ability("attack", Some(0)).unwrap();
    battle
}

#[test]
fn test_lifesteal_and_on_hit_heal_restore_attacker() {
    let mut battle = vampire_fighter(30);

    // 50% of 20 plus 3
    assert_eq!(battle.monsters()[0].hp, 80);
    assert_eq!(battle.party()[0].hp, 43);
    assert!(battle.take_events().contains(&CombatEvent::Healed {
        target: CombatantId::Party(0),
        amount: 13,
        kind: HealKind::Lifesteal,
    }));
    assert!(battle.log().iter().any(|l| l == "Bork drains 13 HP!"));
}

#[test]
fn test_lifesteal_capped_at_max_hp() {
    let battle = vampire_fighter(55);
    assert_eq!(battle.party()[0].hp, 60);
    assert!(battle.log().iter().any(|l| l == "Bork drains 5 HP!"));
}

/// Bork alone with a single-tier set, defending against one monster
fn guarded_fighter(tier: SetTier, monster_hp: i32) -> CombatSession<ScriptedRng> {
    let sets = table("Guard", vec![tier]);
    let mut bork = Character::new("f", "Bork", Job::Fighter, stats(20, 0, 60, 0, 5));
    wear_pair(&mut bork, "Guard", 1);

    let mut battle = CombatSession::new(data_with_sets(sets), vec![bork], Vec::new(), 1, ScriptedRng::new([0.99]));
    battle.start_with(vec![Monster::new("G", monster_hp, 5, 0, 1)]).unwrap();
    battle.use_ability("defend", None).unwrap();
    battle.take_events();
    battle
}

#[test]
fn test_counter_attack_hits_back() {
    let counter = SetTier {
        pieces: 2,
        counter_chance: 100,
        ..SetTier::default()
    };
    let mut battle = guarded_fighter(counter, 80);
    battle.run_monster_turn().unwrap();

    assert_eq!(battle.party()[0].hp, 55);
    assert_eq!(battle.monsters()[0].hp, 60);
    assert!(battle.take_events().contains(&CombatEvent::Damage {
        source: Some(CombatantId::Party(0)),
        target: CombatantId::Monster(0),
        amount: 20,
        critical: false,
        kind: DamageKind::Counter,
    }));
    assert!(battle.log().iter().any(|l| l == "Bork counters G for 20 damage!"));
    assert_eq!(battle.phase(), BattlePhase::PartyTurn);
}

#[test]
fn test_counter_attack_can_win_the_battle() {
    let counter = SetTier {
        pieces: 2,
        counter_chance: 100,
        ..SetTier::default()
    };
    let mut battle = guarded_fighter(counter, 20);
    battle.run_monster_turn().unwrap();

    assert_eq!(battle.monsters()[0].hp, 0);
    assert_eq!(battle.phase(), BattlePhase::Victory);
    assert!(battle.take_events().contains(&CombatEvent::Defeated {
        target: CombatantId::Monster(0)
    }));
}

#[test]
fn test_full_evasion_dodges_every_attack() {
    let evasive = SetTier {
        pieces: 2,
        evasion: 100,
        ..SetTier::default()
    };
    let mut battle = guarded_fighter(evasive, 80);
    battle.run_monster_turn().unwrap();
    let events = battle.take_events();

    assert_eq!(battle.party()[0].hp, 60);
    assert!(damage_to(&events, CombatantId::Party(0)).is_empty());
    assert!(events.contains(&CombatEvent::Dodged {
        attacker: CombatantId::Monster(0),
        target: CombatantId::Party(0),
        kind: DodgeKind::Evasion,
    }));
    assert!(battle.log().iter().any(|l| l == "Bork evades G's attack!"));
}

// ---------------------------------------------------------------------------
// Session flow
// ---------------------------------------------------------------------------

#[test]
fn test_insufficient_mp_keeps_turn() {
    let mut mage = Character::new("g", "Pyra", Job::Mage, stats(10, 0, 40, 40, 12));
    mage.mp = 0;
    let mut battle = CombatSession::new(bundled(), vec![mage], Vec::new(), 1, ScriptedRng::new([0.99]));
    battle.start_with(vec![Monster::new("Rat", 50, 1, 0, 1)]).unwrap();

    let err = battle.use_ability("fireball", Some(0)).unwrap_err();
    assert!(matches!(err, ActionError::InsufficientMp { cost: 8, available: 0, .. }));
    assert_eq!(battle.monsters()[0].hp, 50);
    assert_eq!(battle.current_actor(), Some(0));
    assert_eq!(battle.phase(), BattlePhase::PartyTurn);
    assert_eq!(battle.log().last().map(String::as_str), Some("Pyra needs 8 MP for Fireball but has 0"));
}

#[test]
fn test_victory_awards_xp_to_everyone_and_retargets() {
    let mut party = vec![
        Character::new("f", "Bork", Job::Fighter, stats(100, 0, 60, 0, 10)),
        Character::new("g", "Pyra", Job::Mage, stats(4, 0, 40, 40, 12)),
        Character::new("m", "Milo", Job::Monk, stats(100, 0, 45, 10, 5)),
    ];
    party[1].hp = 0;

    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.99]));
    battle
        .start_with(vec![
            Monster::new("Bat", 1, 1, 0, 1).with_rewards(10, 3),
            Monster::new("Rat", 1, 1, 0, 1).with_rewards(20, 4),
        ])
        .unwrap();

    battle.use_ability("attack", None).unwrap();
    assert_eq!(battle.target(), 1);
    battle.use_ability("attack", None).unwrap();

    assert_eq!(battle.phase(), BattlePhase::Victory);
    let outcome = battle.finish();
    let rewards = outcome.result.rewards().unwrap();
    assert_eq!(rewards.xp, 30);
    assert_eq!(rewards.gold, 7);
    assert!(rewards.equipment.is_empty());
    assert!(rewards.potions.is_empty());
    for member in &outcome.party {
        assert_eq!(member.xp, 30);
    }
    assert_eq!(outcome.party[1].hp, 0);
}

#[test]
fn test_flee_is_lossless() {
    let party = vec![
        Character::new("f", "Bork", Job::Fighter, stats(10, 0, 60, 10, 10)),
        Character::new("g", "Pyra", Job::Mage, stats(4, 0, 40, 40, 5)),
    ];
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.3]));
    battle.start_with(vec![Monster::new("Ogre", 500, 10, 0, 1)]).unwrap();
    battle.use_ability("attack", None).unwrap();
    battle.use_ability("attack", None).unwrap();
    battle.run_monster_turn().unwrap();

    let before = battle.party().to_vec();
    battle.flee().unwrap();
    assert_eq!(battle.phase(), BattlePhase::Fled);
    assert_eq!(
        battle.use_ability("attack", None),
        Err(ActionError::NotAcceptingInput(BattlePhase::Fled))
    );

    let outcome = battle.finish();
    assert_eq!(outcome.result, BattleResult::Fled);
    assert_eq!(outcome.party, before);
}

#[test]
fn test_total_party_loss_is_defeat() {
    let party = vec![Character::new("f", "Bork", Job::Fighter, stats(1, 0, 5, 0, 10))];
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.0]));
    battle.start_with(vec![Monster::new("Ogre", 500, 50, 0, 1)]).unwrap();

    battle.use_ability("attack", None).unwrap();
    battle.run_monster_turn().unwrap();

    assert_eq!(battle.phase(), BattlePhase::Defeat);
    assert_eq!(battle.result(), Some(&BattleResult::Defeat));
    assert_eq!(battle.party()[0].hp, 0);
    assert_eq!(battle.run_monster_turn(), Err(ActionError::NotAcceptingInput(BattlePhase::Defeat)));
}

#[test]
fn test_potion_restores_and_uses_turn() {
    let data = bundled();
    let potion = data.potions.get("minor_health_potion").unwrap().clone();
    let mut bork = Character::new("f", "Bork", Job::Fighter, stats(10, 0, 60, 0, 10));
    bork.hp = 50;

    let mut battle = CombatSession::new(data, vec![bork], vec![potion], 1, ScriptedRng::new([0.0]));
    battle.start_with(vec![Monster::new("Rat", 50, 1, 0, 1)]).unwrap();

    assert_eq!(battle.use_potion(3, 0), Err(ActionError::NoSuchPotion(3)));
    battle.use_potion(0, 0).unwrap();

    // Capped at max HP
    assert_eq!(battle.party()[0].hp, 60);
    assert!(battle.potions().is_empty());
    assert_eq!(battle.phase(), BattlePhase::MonsterTurn);
}

#[test]
fn test_view_reflects_battle() {
    let party = vec![Character::new("f", "Bork", Job::Fighter, stats(10, 0, 60, 0, 10))];
    let mut battle = CombatSession::new(bundled(), party, Vec::new(), 1, ScriptedRng::new([0.99]));
    battle
        .start_with(vec![Monster::new("Rat", 50, 1, 0, 1), Monster::new("Bat", 40, 1, 0, 1)])
        .unwrap();
    battle.select_target(1).unwrap();
    battle.use_ability("attack", None).unwrap();

    let view = battle.view();
    assert_eq!(view.phase, BattlePhase::MonsterTurn);
    assert_eq!(view.current_actor, None);
    assert_eq!(view.target, 1);
    assert_eq!(view.monsters[1].hp, 30);
    assert_eq!(view.monsters[1].max_hp, 40);
    assert_eq!(view.party[0].max_hp, 60);
    assert_eq!(view.recent_log(1), ["Bork deals 10 damage to Bat!"]);
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_snapshot_round_trip_preserves_stats() {
    let data = bundled();
    let snapshot = GameSnapshot::new_game(&data).unwrap();

    let json = snapshot.to_json().unwrap();
    let reloaded = GameSnapshot::from_json(&json).unwrap();

    assert_eq!(reloaded, snapshot);
    for (before, after) in snapshot.party.iter().zip(&reloaded.party) {
        assert_eq!(effective_stats(before, &data.sets), effective_stats(after, &data.sets));
        assert_eq!(combat_stats(before, &data.sets), combat_stats(after, &data.sets));
    }
}

#[test]
fn test_old_snapshot_without_equipment_loads_empty() {
    let data = bundled();
    let snapshot = GameSnapshot::new_game(&data).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    for member in value["party"].as_array_mut().unwrap() {
        member.as_object_mut().unwrap().remove("equipment");
    }

    let reloaded = GameSnapshot::from_json(&value.to_string()).unwrap();
    assert!(reloaded.party.iter().all(|c| c.equipment.is_empty()));
}

#[test]
fn test_seeded_battle_runs_to_completion() {
    let data = bundled();
    let mut snapshot = GameSnapshot::new_game(&data).unwrap();
    let mut battle = snapshot
        .start_battle(Arc::clone(&data), ChaCha8Rng::seed_from_u64(7))
        .unwrap();
    battle.start().unwrap();

    for _ in 0..500 {
        match battle.phase() {
            BattlePhase::PartyTurn => {
                battle.retarget();
                battle.use_ability("attack", None).unwrap();
            }
            BattlePhase::MonsterTurn => battle.run_monster_turn().unwrap(),
            _ => break,
        }
    }
    assert!(battle.phase().is_over());

    let gold_before = snapshot.gold;
    let result = snapshot.finish_battle(battle.finish());
    match result {
        BattleResult::Victory(rewards) => assert_eq!(snapshot.gold, gold_before + rewards.gold),
        _ => assert_eq!(snapshot.gold, gold_before),
    }
    assert_eq!(snapshot.party.len(), 3);
    assert!(snapshot.to_json().is_ok());
}
