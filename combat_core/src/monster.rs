//! Monsters - Templates from config and their in-battle copies

use crate::config::EncounterConstants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub hp: i32,
    #[serde(default)]
    pub mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    /// XP awarded when defeated
    pub xp: u32,
    /// Gold awarded when defeated
    pub gold: u32,
    /// Shallowest dungeon depth this monster appears on
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,
}

fn default_min_depth() -> u32 {
    1
}

/// A monster in a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub template_id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub xp: u32,
    pub gold: u32,
}

impl Monster {
    /// Unscaled copy of a template
    pub fn from_template(template: &MonsterTemplate) -> Self {
        Monster {
            template_id: template.id.clone(),
            name: template.name.clone(),
            hp: template.hp,
            max_hp: template.hp,
            mp: template.mp,
            attack: template.attack,
            defense: template.defense,
            speed: template.speed,
            xp: template.xp,
            gold: template.gold,
        }
    }

    /// Copy of a template scaled for a dungeon depth.
    ///
    /// HP and attack grow by `hp_scaling_percent` per depth, gold by
    /// `gold_scaling_percent`. Defense, speed and XP are unscaled.
    pub fn spawn(template: &MonsterTemplate, depth: u32, scaling: &EncounterConstants) -> Self {
        let depth = depth as i32;
        let scale = |value: i32, percent: i32| (value * (100 + percent * depth)).div_euclid(100);
        let mut monster = Monster::from_template(template);
        monster.max_hp = scale(template.hp, scaling.hp_scaling_percent);
        monster.hp = monster.max_hp;
        monster.attack = scale(template.attack, scaling.hp_scaling_percent);
        monster.gold = scale(template.gold as i32, scaling.gold_scaling_percent).max(0) as u32;
        monster
    }

    /// A hand-built monster, mostly for tests and scripted fights
    pub fn new(name: impl Into<String>, hp: i32, attack: i32, defense: i32, speed: i32) -> Self {
        let name = name.into();
        Monster {
            template_id: name.to_lowercase().replace(' ', "_"),
            name,
            hp,
            max_hp: hp,
            mp: 0,
            attack,
            defense,
            speed,
            xp: 0,
            gold: 0,
        }
    }

    pub fn with_rewards(mut self, xp: u32, gold: u32) -> Self {
        self.xp = xp;
        self.gold = gold;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Reduce HP, never below zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.hp);
        self.hp -= lost;
        lost
    }
}

/// All monster templates, in config order
#[derive(Debug, Clone, Default)]
pub struct MonsterCatalog {
    monsters: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn new(monsters: Vec<MonsterTemplate>) -> Self {
        MonsterCatalog { monsters }
    }

    pub fn get(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Templates that can appear at `depth`
    pub fn pool_for_depth(&self, depth: u32) -> Vec<&MonsterTemplate> {
        self.monsters.iter().filter(|m| m.min_depth <= depth.max(1)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterTemplate> {
        self.monsters.iter()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bat() -> MonsterTemplate {
        MonsterTemplate {
            id: "cave_bat".to_string(),
            name: "Cave Bat".to_string(),
            hp: 12,
            mp: 0,
            attack: 3,
            defense: 1,
            speed: 14,
            xp: 6,
            gold: 2,
            min_depth: 1,
        }
    }

    #[test]
    fn test_spawn_scales_with_depth() {
        let scaling = EncounterConstants::default();
        // depth 1: hp 12 * 1.1 = 13.2 -> 13, gold 2 * 1.15 = 2.3 -> 2
        let m = Monster::spawn(&bat(), 1, &scaling);
        assert_eq!(m.max_hp, 13);
        assert_eq!(m.hp, 13);
        assert_eq!(m.attack, 3);
        assert_eq!(m.gold, 2);
        assert_eq!(m.xp, 6);

        // depth 5: hp 12 * 1.5 = 18, attack 3 * 1.5 = 4.5 -> 4, gold 2 * 1.75 = 3.5 -> 3
        let m = Monster::spawn(&bat(), 5, &scaling);
        assert_eq!(m.max_hp, 18);
        assert_eq!(m.attack, 4);
        assert_eq!(m.gold, 3);
        assert_eq!(m.defense, 1);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut m = Monster::new("Rat", 10, 2, 0, 5);
        assert_eq!(m.take_damage(4), 4);
        assert_eq!(m.take_damage(40), 6);
        assert!(!m.is_alive());
    }

    #[test]
    fn test_pool_for_depth() {
        let mut deep = bat();
        deep.id = "dragon".to_string();
        deep.min_depth = 9;
        let catalog = MonsterCatalog::new(vec![bat(), deep]);
        assert_eq!(catalog.pool_for_depth(1).len(), 1);
        assert_eq!(catalog.pool_for_depth(0).len(), 1);
        assert_eq!(catalog.pool_for_depth(9).len(), 2);
    }
}
