//! LootResolver - Equipment and potion drops after a won battle

use crate::config::{GameData, LootConstants};
use crate::item::{EquipmentCatalog, InstanceIdGenerator, ItemInstance, Potion, PotionCatalog, MAX_ENHANCEMENT};
use crate::monster::Monster;
use crate::rng::CombatRng;
use crate::types::Rarity;
use tracing::debug;

/// Everything dropped by one battle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loot {
    pub equipment: Vec<ItemInstance>,
    pub potions: Vec<Potion>,
}

/// Roll drops for every defeated monster.
///
/// Equipment is rolled for each monster first, then potions. Every dropped
/// item gets a fresh instance id.
pub fn roll_loot<R: CombatRng + ?Sized>(
    defeated: &[Monster],
    depth: u32,
    data: &GameData,
    ids: &mut InstanceIdGenerator,
    rng: &mut R,
) -> Loot {
    let constants = &data.constants.loot;
    let mut loot = Loot::default();

    for _ in defeated {
        if let Some(item) = roll_equipment_drop(&data.equipment, depth, constants, ids, rng) {
            debug!(item = %item.display_name(), id = %item.instance_id, "equipment drop");
            loot.equipment.push(item);
        }
    }
    for _ in defeated {
        if let Some(potion) = roll_potion_drop(&data.potions, depth, constants, rng) {
            debug!(potion = %potion.name, "potion drop");
            loot.potions.push(potion);
        }
    }
    loot
}

/// Rarity tier for an equipment drop. Deeper floors unlock rare and epic.
pub fn roll_rarity<R: CombatRng + ?Sized>(depth: u32, constants: &LootConstants, rng: &mut R) -> Rarity {
    let roll = rng.next_f64();
    if depth >= constants.epic_min_depth && roll < constants.epic_chance {
        Rarity::Epic
    } else if depth >= constants.rare_min_depth && roll < constants.rare_chance {
        Rarity::Rare
    } else if roll < constants.uncommon_chance {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// Enhancement level 0-4 for a dropped item. Depth raises the odds of
/// higher levels.
pub fn roll_enhancement<R: CombatRng + ?Sized>(depth: u32, constants: &LootConstants, rng: &mut R) -> u8 {
    let roll = rng.next_f64() * 100.0;
    let bonus = f64::from(depth.saturating_mul(2).min(constants.enhancement_depth_bonus_cap));
    let level = if roll < 1.0 + bonus * 0.5 {
        4
    } else if roll < 5.0 + bonus * 0.5 {
        3
    } else if roll < 15.0 + bonus * 0.3 {
        2
    } else if roll < 40.0 + bonus * 0.2 {
        1
    } else {
        0
    };
    level.min(MAX_ENHANCEMENT)
}

/// One monster's equipment roll: drop chance, rarity, template, enhancement.
/// No drop when no template has the rolled rarity.
pub fn roll_equipment_drop<R: CombatRng + ?Sized>(
    catalog: &EquipmentCatalog,
    depth: u32,
    constants: &LootConstants,
    ids: &mut InstanceIdGenerator,
    rng: &mut R,
) -> Option<ItemInstance> {
    if !rng.chance(constants.equipment_drop_chance) {
        return None;
    }
    let rarity = roll_rarity(depth, constants, rng);
    let pool = catalog.by_rarity(rarity);
    if pool.is_empty() {
        debug!(?rarity, "no templates of rolled rarity");
        return None;
    }
    let template = pool[rng.pick_index(pool.len())].clone();
    let enhancement = roll_enhancement(depth, constants, rng);
    Some(ItemInstance::new(ids.issue(), template).with_enhancement(enhancement))
}

/// One monster's potion roll. Shallow floors only drop common potions,
/// floors 3-4 add uncommon ones. Picks are weighted by rarity.
pub fn roll_potion_drop<R: CombatRng + ?Sized>(
    catalog: &PotionCatalog,
    depth: u32,
    constants: &LootConstants,
    rng: &mut R,
) -> Option<Potion> {
    if !rng.chance(constants.potion_drop_chance) {
        return None;
    }
    let max_rarity = match depth {
        0..=2 => Rarity::Common,
        3..=4 => Rarity::Uncommon,
        _ => Rarity::Legendary,
    };
    let weighted: Vec<(&Potion, u32)> = catalog
        .iter()
        .filter(|p| p.rarity <= max_rarity)
        .map(|p| (p, constants.potion_weights.weight(p.rarity)))
        .filter(|(_, weight)| *weight > 0)
        .collect();
    let total: u32 = weighted.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }

    let mut pick = rng.pick_index(total as usize) as u32;
    for (potion, weight) in weighted {
        if pick < weight {
            return Some(potion.clone());
        }
        pick -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn data() -> GameData {
        GameData::load_default().unwrap()
    }

    #[test]
    fn test_rarity_gates() {
        let c = LootConstants::default();
        let roll = |depth, r| roll_rarity(depth, &c, &mut ScriptedRng::new(vec![r]));
        assert_eq!(roll(3, 0.01), Rarity::Epic);
        assert_eq!(roll(2, 0.01), Rarity::Rare);
        assert_eq!(roll(1, 0.01), Rarity::Uncommon);
        assert_eq!(roll(5, 0.10), Rarity::Rare);
        assert_eq!(roll(5, 0.30), Rarity::Uncommon);
        assert_eq!(roll(5, 0.50), Rarity::Common);
    }

    #[test]
    fn test_enhancement_thresholds() {
        let c = LootConstants::default();
        let roll = |depth, r| roll_enhancement(depth, &c, &mut ScriptedRng::new(vec![r]));
        // depth 0: +4 < 1, +3 < 5, +2 < 15, +1 < 40
        assert_eq!(roll(0, 0.005), 4);
        assert_eq!(roll(0, 0.03), 3);
        assert_eq!(roll(0, 0.10), 2);
        assert_eq!(roll(0, 0.30), 1);
        assert_eq!(roll(0, 0.50), 0);
        // depth 10 (bonus capped at 20): +4 < 11
        assert_eq!(roll(10, 0.10), 4);
        assert_eq!(roll(50, 0.10), 4);
        assert_eq!(roll(50, 0.12), 3);
    }

    #[test]
    fn test_equipment_drop_issues_fresh_ids() {
        let data = data();
        let mut ids = InstanceIdGenerator::starting_at(100);
        // drop 0.1, rarity 0.9 (common), pick 0.0, enhancement 0.99 (+0)
        let mut rng = ScriptedRng::new(vec![0.1, 0.9, 0.0, 0.99]);
        let first = roll_equipment_drop(&data.equipment, 1, &data.constants.loot, &mut ids, &mut rng).unwrap();
        let second = roll_equipment_drop(&data.equipment, 1, &data.constants.loot, &mut ids, &mut rng).unwrap();

        assert_eq!(first.template.id, second.template.id);
        assert_eq!(first.template.rarity, Rarity::Common);
        assert_ne!(first.instance_id, second.instance_id);
        assert_eq!(first.enhancement, 0);
    }

    #[test]
    fn test_equipment_miss_draws_once() {
        let data = data();
        let mut ids = InstanceIdGenerator::default();
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert!(roll_equipment_drop(&data.equipment, 1, &data.constants.loot, &mut ids, &mut rng).is_none());
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn test_empty_rarity_pool_drops_nothing() {
        let data = data();
        let mut ids = InstanceIdGenerator::default();
        // rare rolled at depth 2; the bundled catalog has no rare equipment
        let mut rng = ScriptedRng::new(vec![0.1, 0.10]);
        assert!(data.equipment.by_rarity(Rarity::Rare).is_empty());
        assert!(roll_equipment_drop(&data.equipment, 2, &data.constants.loot, &mut ids, &mut rng).is_none());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn test_shallow_potions_are_common() {
        let data = data();
        for r in [0.0, 0.3, 0.6, 0.99] {
            let mut rng = ScriptedRng::new(vec![0.1, r]);
            let potion = roll_potion_drop(&data.potions, 1, &data.constants.loot, &mut rng).unwrap();
            assert_eq!(potion.rarity, Rarity::Common);
        }
    }

    #[test]
    fn test_potion_weights() {
        let data = data();
        // depth 3: minor_health (5), health (3), minor_mana (5), mana (3), minor_elixir (3) = 19
        // pick 0.27 * 19 = 5 -> second entry, health_potion
        let mut rng = ScriptedRng::new(vec![0.1, 0.27]);
        let potion = roll_potion_drop(&data.potions, 3, &data.constants.loot, &mut rng).unwrap();
        assert_eq!(potion.id, "health_potion");
    }

    #[test]
    fn test_roll_loot_per_monster() {
        let data = data();
        let monsters = vec![Monster::new("A", 1, 1, 0, 1), Monster::new("B", 1, 1, 0, 1)];
        let mut ids = InstanceIdGenerator::default();
        // Equipment: both miss. Potions: both hit with the first common potion.
        let mut rng = ScriptedRng::new(vec![0.9, 0.9, 0.1, 0.0, 0.1, 0.0]);
        let loot = roll_loot(&monsters, 1, &data, &mut ids, &mut rng);
        assert!(loot.equipment.is_empty());
        assert_eq!(loot.potions.len(), 2);
        assert_eq!(loot.potions[0].id, "minor_health_potion");
    }
}
