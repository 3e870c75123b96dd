//! EquipmentTemplate - Immutable item definitions loaded from config

use crate::types::{FlatStats, ItemKind, Job, Rarity};
use serde::{Deserialize, Serialize};

/// An item definition. Runtime copies are wrapped in [`super::ItemInstance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    /// Template id ("rusty_sword"). Shared by every copy of the item.
    pub id: String,
    pub name: String,
    /// Which kind of slot the item goes into
    #[serde(rename = "slot")]
    pub kind: ItemKind,
    pub rarity: Rarity,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub mp: i32,
    #[serde(default)]
    pub speed: i32,
    /// Jobs allowed to equip this item
    #[serde(default)]
    pub allowed_jobs: Vec<Job>,
    /// Equipment set this item belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
}

impl EquipmentTemplate {
    /// Flat stat bonuses before enhancement
    pub fn base_stats(&self) -> FlatStats {
        FlatStats {
            attack: self.attack,
            defense: self.defense,
            hp: self.hp,
            mp: self.mp,
            speed: self.speed,
        }
    }

    pub fn allows(&self, job: Job) -> bool {
        self.allowed_jobs.contains(&job)
    }
}

/// All known equipment templates
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    items: Vec<EquipmentTemplate>,
}

impl EquipmentCatalog {
    pub fn new(items: Vec<EquipmentTemplate>) -> Self {
        EquipmentCatalog { items }
    }

    pub fn get(&self, id: &str) -> Option<&EquipmentTemplate> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Templates of one rarity, in catalog order
    pub fn by_rarity(&self, rarity: Rarity) -> Vec<&EquipmentTemplate> {
        self.items.iter().filter(|item| item.rarity == rarity).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentTemplate> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
