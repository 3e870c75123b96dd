//! Set bonus resolution - which tiers a set of equipped items unlocks

use super::{SetBonusTable, SetTier};
use crate::character::Character;
use crate::item::ItemInstance;
use std::collections::BTreeMap;

/// A set represented in a character's equipment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSetBonus {
    pub set_name: String,
    /// Equipped pieces of this set
    pub pieces: u32,
    /// Every tier whose requirement is met, lowest first
    pub unlocked_tiers: Vec<SetTier>,
}

impl ActiveSetBonus {
    pub fn is_active(&self) -> bool {
        !self.unlocked_tiers.is_empty()
    }
}

/// Group `items` by set tag and unlock tiers cumulatively.
///
/// Items without a set are ignored. Sets missing from the table are still
/// reported, with no tiers. Output is sorted by set name.
pub fn active_bonuses<'a>(
    items: impl IntoIterator<Item = &'a ItemInstance>,
    table: &SetBonusTable,
) -> Vec<ActiveSetBonus> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for item in items {
        if let Some(set) = item.set_name() {
            *counts.entry(set).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, pieces)| {
            let unlocked_tiers = table
                .get(name)
                .map(|set| {
                    set.tiers
                        .iter()
                        .filter(|tier| tier.pieces <= pieces)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            ActiveSetBonus {
                set_name: name.to_string(),
                pieces,
                unlocked_tiers,
            }
        })
        .collect()
}

/// Set bonuses for the items a character can actually use
pub fn character_bonuses(character: &Character, table: &SetBonusTable) -> Vec<ActiveSetBonus> {
    active_bonuses(character.active_items().map(|(_, item)| item), table)
}

/// The next locked tier of a set, given the current piece count
pub fn next_tier<'t>(set_name: &str, pieces: u32, table: &'t SetBonusTable) -> Option<&'t SetTier> {
    table
        .get(set_name)?
        .tiers
        .iter()
        .find(|tier| tier.pieces > pieces)
}
