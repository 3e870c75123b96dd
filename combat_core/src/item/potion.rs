//! Potions - Consumables usable during a battle

use crate::types::Rarity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Potion {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// HP restored
    #[serde(default)]
    pub hp: i32,
    /// MP restored
    #[serde(default)]
    pub mp: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct PotionCatalog {
    potions: Vec<Potion>,
}

impl PotionCatalog {
    pub fn new(potions: Vec<Potion>) -> Self {
        PotionCatalog { potions }
    }

    pub fn get(&self, id: &str) -> Option<&Potion> {
        self.potions.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Potion> {
        self.potions.iter()
    }

    pub fn len(&self) -> usize {
        self.potions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.potions.is_empty()
    }
}
