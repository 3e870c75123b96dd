//! Encounter spawning - how many and which monsters a fight starts with

use crate::config::EncounterConstants;
use crate::monster::{Monster, MonsterCatalog};
use crate::rng::CombatRng;
use tracing::debug;

/// Roll a random encounter for `depth`.
///
/// One or two monsters, plus `depth / 2` more on a `bonus_chance` roll,
/// capped at `max_monsters`. Each is drawn uniformly from the depth's pool.
/// Returns an empty list only when the pool is empty.
pub fn spawn_encounter<R: CombatRng + ?Sized>(
    catalog: &MonsterCatalog,
    depth: u32,
    constants: &EncounterConstants,
    rng: &mut R,
) -> Vec<Monster> {
    let pool = catalog.pool_for_depth(depth);
    if pool.is_empty() {
        return Vec::new();
    }

    let base = 1 + (rng.next_f64() * 2.0) as usize;
    let bonus = if rng.chance(constants.bonus_chance) {
        (depth / 2) as usize
    } else {
        0
    };
    let count = (base + bonus).min(constants.max_monsters.max(1));

    let monsters: Vec<Monster> = (0..count)
        .map(|_| Monster::spawn(pool[rng.pick_index(pool.len())], depth, constants))
        .collect();

    debug!(
        depth,
        count,
        monsters = ?monsters.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        "spawned encounter"
    );
    monsters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterTemplate;
    use crate::rng::ScriptedRng;

    fn catalog() -> MonsterCatalog {
        let template = |id: &str, min_depth| MonsterTemplate {
            id: id.to_string(),
            name: id.to_string(),
            hp: 10,
            mp: 0,
            attack: 2,
            defense: 1,
            speed: 5,
            xp: 5,
            gold: 1,
            min_depth,
        };
        MonsterCatalog::new(vec![template("a", 1), template("b", 1), template("c", 6)])
    }

    #[test]
    fn test_single_monster_without_bonus() {
        // base draw 0.2 -> 1 monster, bonus draw 0.9 misses, pick 0.0 -> "a"
        let mut rng = ScriptedRng::new(vec![0.2, 0.9, 0.0]);
        let monsters = spawn_encounter(&catalog(), 1, &EncounterConstants::default(), &mut rng);
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].template_id, "a");
    }

    #[test]
    fn test_bonus_monsters_capped() {
        // base 2, bonus hit at depth 8 adds 4, capped at 4
        let mut rng = ScriptedRng::new(vec![0.7, 0.1, 0.0, 0.5, 0.9, 0.0]);
        let monsters = spawn_encounter(&catalog(), 8, &EncounterConstants::default(), &mut rng);
        assert_eq!(monsters.len(), 4);
    }

    #[test]
    fn test_shallow_pool_excludes_deep_monsters() {
        let mut rng = ScriptedRng::new(vec![0.7, 0.9, 0.99, 0.99]);
        let monsters = spawn_encounter(&catalog(), 2, &EncounterConstants::default(), &mut rng);
        assert_eq!(monsters.len(), 2);
        assert!(monsters.iter().all(|m| m.template_id != "c"));
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = ScriptedRng::new(vec![0.5]);
        let monsters = spawn_encounter(&MonsterCatalog::default(), 3, &EncounterConstants::default(), &mut rng);
        assert!(monsters.is_empty());
    }
}
