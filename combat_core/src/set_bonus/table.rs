//! SetBonusTable - Equipment set definitions and their threshold tiers

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One threshold tier of a set.
///
/// Percent fields scale the matching effective stat. The remaining fields
/// feed combat stats and are flat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTier {
    /// Equipped pieces required to unlock this tier
    pub pieces: u32,
    #[serde(default)]
    pub attack_percent: i32,
    #[serde(default)]
    pub defense_percent: i32,
    #[serde(default)]
    pub hp_percent: i32,
    #[serde(default)]
    pub mp_percent: i32,
    #[serde(default)]
    pub speed_percent: i32,
    #[serde(default)]
    pub crit_chance: i32,
    #[serde(default)]
    pub crit_damage: i32,
    #[serde(default)]
    pub evasion: i32,
    #[serde(default)]
    pub defense_penetration: i32,
    #[serde(default)]
    pub lifesteal: i32,
    #[serde(default)]
    pub counter_chance: i32,
    #[serde(default)]
    pub on_hit_heal: i32,
    #[serde(default)]
    pub burn_damage: i32,
    #[serde(default)]
    pub slow_effect: i32,
    #[serde(default)]
    pub chain_damage: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSet {
    pub name: String,
    #[serde(default)]
    pub theme: String,
    /// Tiers ordered by strictly increasing piece count
    pub tiers: Vec<SetTier>,
}

/// Set name -> set definition
#[derive(Debug, Clone, Default)]
pub struct SetBonusTable {
    sets: BTreeMap<String, EquipmentSet>,
}

impl SetBonusTable {
    pub fn new() -> Self {
        SetBonusTable::default()
    }

    /// Build a table, rejecting duplicate sets and non-increasing thresholds
    pub fn from_sets(sets: Vec<EquipmentSet>) -> Result<Self, ConfigError> {
        let mut table = SetBonusTable::new();
        for set in sets {
            table.insert(set)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, set: EquipmentSet) -> Result<(), ConfigError> {
        if self.sets.contains_key(&set.name) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate equipment set '{}'",
                set.name
            )));
        }
        let mut previous = 0;
        for tier in &set.tiers {
            if tier.pieces <= previous {
                return Err(ConfigError::ValidationError(format!(
                    "set '{}': tier thresholds must be strictly increasing ({} after {})",
                    set.name, tier.pieces, previous
                )));
            }
            previous = tier.pieces;
        }
        self.sets.insert(set.name.clone(), set);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EquipmentSet> {
        self.sets.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentSet> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
