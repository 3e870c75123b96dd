//! Game constants configuration

use crate::types::{FlatStats, Job, Rarity};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub loot: LootConstants,
    #[serde(default)]
    pub encounter: EncounterConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Ability power bonus per level above 1, in percent
    #[serde(default = "default_level_scaling")]
    pub level_scaling_percent: i32,
    /// Crit multiplier before crit damage bonuses (150 = 1.5x)
    #[serde(default = "default_crit_base")]
    pub crit_base_percent: i32,
    /// Party defense multiplier while defending
    #[serde(default = "default_defend_multiplier")]
    pub defend_multiplier: i32,
    /// Counter-attack power, as an ability power multiplier
    #[serde(default = "default_counter_power")]
    pub counter_power: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            level_scaling_percent: default_level_scaling(),
            crit_base_percent: default_crit_base(),
            defend_multiplier: default_defend_multiplier(),
            counter_power: default_counter_power(),
        }
    }
}

fn default_level_scaling() -> i32 {
    15
}
fn default_crit_base() -> i32 {
    150
}
fn default_defend_multiplier() -> i32 {
    2
}
fn default_counter_power() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootConstants {
    /// Chance per defeated monster to drop equipment
    #[serde(default = "default_equipment_drop")]
    pub equipment_drop_chance: f64,
    /// Chance per defeated monster to drop a potion
    #[serde(default = "default_potion_drop")]
    pub potion_drop_chance: f64,
    #[serde(default = "default_epic_chance")]
    pub epic_chance: f64,
    #[serde(default = "default_epic_min_depth")]
    pub epic_min_depth: u32,
    #[serde(default = "default_rare_chance")]
    pub rare_chance: f64,
    #[serde(default = "default_rare_min_depth")]
    pub rare_min_depth: u32,
    #[serde(default = "default_uncommon_chance")]
    pub uncommon_chance: f64,
    /// Cap on the depth bonus to enhancement rolls
    #[serde(default = "default_enhancement_cap")]
    pub enhancement_depth_bonus_cap: u32,
    #[serde(default)]
    pub potion_weights: PotionWeights,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants {
            equipment_drop_chance: default_equipment_drop(),
            potion_drop_chance: default_potion_drop(),
            epic_chance: default_epic_chance(),
            epic_min_depth: default_epic_min_depth(),
            rare_chance: default_rare_chance(),
            rare_min_depth: default_rare_min_depth(),
            uncommon_chance: default_uncommon_chance(),
            enhancement_depth_bonus_cap: default_enhancement_cap(),
            potion_weights: PotionWeights::default(),
        }
    }
}

fn default_equipment_drop() -> f64 {
    0.20
}
fn default_potion_drop() -> f64 {
    0.30
}
fn default_epic_chance() -> f64 {
    0.05
}
fn default_epic_min_depth() -> u32 {
    3
}
fn default_rare_chance() -> f64 {
    0.15
}
fn default_rare_min_depth() -> u32 {
    2
}
fn default_uncommon_chance() -> f64 {
    0.40
}
fn default_enhancement_cap() -> u32 {
    20
}

/// Relative potion drop weights by rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
}

impl PotionWeights {
    pub fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            _ => self.rare,
        }
    }
}

impl Default for PotionWeights {
    fn default() -> Self {
        PotionWeights {
            common: 5,
            uncommon: 3,
            rare: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterConstants {
    #[serde(default = "default_max_monsters")]
    pub max_monsters: usize,
    /// Chance that an encounter brings depth/2 extra monsters
    #[serde(default = "default_bonus_chance")]
    pub bonus_chance: f64,
    /// Monster HP and attack growth per depth, in percent
    #[serde(default = "default_hp_scaling")]
    pub hp_scaling_percent: i32,
    /// Monster gold growth per depth, in percent
    #[serde(default = "default_gold_scaling")]
    pub gold_scaling_percent: i32,
}

impl Default for EncounterConstants {
    fn default() -> Self {
        EncounterConstants {
            max_monsters: default_max_monsters(),
            bonus_chance: default_bonus_chance(),
            hp_scaling_percent: default_hp_scaling(),
            gold_scaling_percent: default_gold_scaling(),
        }
    }
}

fn default_max_monsters() -> usize {
    4
}
fn default_bonus_chance() -> f64 {
    0.30
}
fn default_hp_scaling() -> i32 {
    10
}
fn default_gold_scaling() -> i32 {
    15
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// XP needed to reach level 2
    #[serde(default = "default_xp_base")]
    pub xp_base: u32,
    /// Multiplier applied per level
    #[serde(default = "default_xp_growth")]
    pub xp_growth: f64,
    #[serde(default)]
    pub growth: JobGrowth,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            xp_base: default_xp_base(),
            xp_growth: default_xp_growth(),
            growth: JobGrowth::default(),
        }
    }
}

fn default_xp_base() -> u32 {
    100
}
fn default_xp_growth() -> f64 {
    1.5
}

/// Flat base stat gain per level, by job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobGrowth {
    pub fighter: FlatStats,
    pub mage: FlatStats,
    pub monk: FlatStats,
}

impl JobGrowth {
    pub fn for_job(&self, job: Job) -> FlatStats {
        match job {
            Job::Fighter => self.fighter,
            Job::Mage => self.mage,
            Job::Monk => self.monk,
        }
    }
}

impl Default for JobGrowth {
    fn default() -> Self {
        JobGrowth {
            fighter: FlatStats {
                hp: 10,
                mp: 0,
                attack: 3,
                defense: 2,
                speed: 1,
            },
            mage: FlatStats {
                hp: 4,
                mp: 8,
                attack: 1,
                defense: 1,
                speed: 1,
            },
            monk: FlatStats {
                hp: 8,
                mp: 2,
                attack: 2,
                defense: 1,
                speed: 2,
            },
        }
    }
}
