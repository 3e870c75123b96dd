//! Loadout - The items a character currently wears

use super::ItemInstance;
use crate::types::EquipSlot;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Equipped items keyed by slot. Missing and `null` slots are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Loadout {
    slots: BTreeMap<EquipSlot, ItemInstance>,
}

impl<'de> Deserialize<'de> for Loadout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slots = BTreeMap::<EquipSlot, Option<ItemInstance>>::deserialize(deserializer)?;
        Ok(Loadout {
            slots: slots
                .into_iter()
                .filter_map(|(slot, item)| Some((slot, item?)))
                .collect(),
        })
    }
}

impl Loadout {
    pub fn new() -> Self {
        Loadout::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&ItemInstance> {
        self.slots.get(&slot)
    }

    /// Put an item in a slot, returning whatever was there before
    pub fn insert(&mut self, slot: EquipSlot, item: ItemInstance) -> Option<ItemInstance> {
        self.slots.insert(slot, item)
    }

    pub fn remove(&mut self, slot: EquipSlot) -> Option<ItemInstance> {
        self.slots.remove(&slot)
    }

    /// Occupied slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &ItemInstance)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_slots_load_as_empty() {
        let json = r#"{
            "shield": null,
            "weapon": {
                "instance_id": 4,
                "template": {
                    "id": "rusty_sword",
                    "name": "Rusty Sword",
                    "slot": "weapon",
                    "rarity": "common",
                    "attack": 3,
                    "allowed_jobs": ["fighter"]
                }
            },
            "ring2": null
        }"#;
        let loadout: Loadout = serde_json::from_str(json).unwrap();

        assert_eq!(loadout.len(), 1);
        assert!(loadout.get(EquipSlot::Shield).is_none());
        assert_eq!(
            loadout.get(EquipSlot::Weapon).map(|i| i.display_name()),
            Some("Rusty Sword".to_string())
        );

        // Empty slots are omitted on the way back out
        let out = serde_json::to_value(&loadout).unwrap();
        assert!(out.get("shield").is_none());
    }
}
