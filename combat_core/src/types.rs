//! Core type definitions shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    Fighter,
    Mage,
    Monk,
}

impl Job {
    pub const ALL: [Job; 3] = [Job::Fighter, Job::Mage, Job::Monk];
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Job::Fighter => "Fighter",
            Job::Mage => "Mage",
            Job::Monk => "Monk",
        };
        f.write_str(name)
    }
}

/// Equipment slots on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Shield,
    Armor,
    Helmet,
    Gloves,
    Boots,
    Necklace,
    Ring1,
    Ring2,
    Relic,
    Offhand,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 11] = [
        EquipSlot::Weapon,
        EquipSlot::Shield,
        EquipSlot::Armor,
        EquipSlot::Helmet,
        EquipSlot::Gloves,
        EquipSlot::Boots,
        EquipSlot::Necklace,
        EquipSlot::Ring1,
        EquipSlot::Ring2,
        EquipSlot::Relic,
        EquipSlot::Offhand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Shield => "Shield",
            EquipSlot::Armor => "Armor",
            EquipSlot::Helmet => "Helmet",
            EquipSlot::Gloves => "Gloves",
            EquipSlot::Boots => "Boots",
            EquipSlot::Necklace => "Necklace",
            EquipSlot::Ring1 => "Ring 1",
            EquipSlot::Ring2 => "Ring 2",
            EquipSlot::Relic => "Relic",
            EquipSlot::Offhand => "Offhand",
        }
    }
}

/// What kind of item a template is. Decides which slot(s) it fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Shield,
    Armor,
    Helmet,
    Gloves,
    Boots,
    Necklace,
    /// Fits either ring slot
    Ring,
    Relic,
    Offhand,
}

impl ItemKind {
    /// Whether an item of this kind can be placed in `slot`
    pub fn fits(self, slot: EquipSlot) -> bool {
        matches!(
            (self, slot),
            (ItemKind::Weapon, EquipSlot::Weapon)
                | (ItemKind::Shield, EquipSlot::Shield)
                | (ItemKind::Armor, EquipSlot::Armor)
                | (ItemKind::Helmet, EquipSlot::Helmet)
                | (ItemKind::Gloves, EquipSlot::Gloves)
                | (ItemKind::Boots, EquipSlot::Boots)
                | (ItemKind::Necklace, EquipSlot::Necklace)
                | (ItemKind::Ring, EquipSlot::Ring1)
                | (ItemKind::Ring, EquipSlot::Ring2)
                | (ItemKind::Relic, EquipSlot::Relic)
                | (ItemKind::Offhand, EquipSlot::Offhand)
        )
    }

    /// Slots an item of this kind may occupy, in preference order
    pub fn slots(self) -> &'static [EquipSlot] {
        match self {
            ItemKind::Weapon => &[EquipSlot::Weapon],
            ItemKind::Shield => &[EquipSlot::Shield],
            ItemKind::Armor => &[EquipSlot::Armor],
            ItemKind::Helmet => &[EquipSlot::Helmet],
            ItemKind::Gloves => &[EquipSlot::Gloves],
            ItemKind::Boots => &[EquipSlot::Boots],
            ItemKind::Necklace => &[EquipSlot::Necklace],
            ItemKind::Ring => &[EquipSlot::Ring1, EquipSlot::Ring2],
            ItemKind::Relic => &[EquipSlot::Relic],
            ItemKind::Offhand => &[EquipSlot::Offhand],
        }
    }
}

/// Item and potion rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}

/// The five primary stats as flat amounts.
///
/// Used for item bonuses, base stats and per-level growth alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatStats {
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
}

impl FlatStats {
    pub fn is_zero(&self) -> bool {
        *self == FlatStats::default()
    }
}

impl std::ops::AddAssign for FlatStats {
    fn add_assign(&mut self, rhs: FlatStats) {
        self.attack += rhs.attack;
        self.defense += rhs.defense;
        self.hp += rhs.hp;
        self.mp += rhs.mp;
        self.speed += rhs.speed;
    }
}

/// Identity of a combatant inside one battle.
///
/// Party members and monsters are addressed by their roster position,
/// which never changes during a battle (defeated combatants stay listed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "side", content = "index", rename_all = "snake_case")]
pub enum CombatantId {
    Party(usize),
    Monster(usize),
}

impl CombatantId {
    pub fn is_party(self) -> bool {
        matches!(self, CombatantId::Party(_))
    }

    pub fn index(self) -> usize {
        match self {
            CombatantId::Party(i) | CombatantId::Monster(i) => i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_fits_both_ring_slots() {
        assert!(ItemKind::Ring.fits(EquipSlot::Ring1));
        assert!(ItemKind::Ring.fits(EquipSlot::Ring2));
        assert!(!ItemKind::Ring.fits(EquipSlot::Necklace));
    }

    #[test]
    fn test_kind_slots_agree_with_fits() {
        let kinds = [
            ItemKind::Weapon,
            ItemKind::Shield,
            ItemKind::Armor,
            ItemKind::Helmet,
            ItemKind::Gloves,
            ItemKind::Boots,
            ItemKind::Necklace,
            ItemKind::Ring,
            ItemKind::Relic,
            ItemKind::Offhand,
        ];
        for kind in kinds {
            for slot in EquipSlot::ALL {
                assert_eq!(kind.fits(slot), kind.slots().contains(&slot), "{kind:?} / {slot:?}");
            }
        }
    }

    #[test]
    fn test_job_serde_names() {
        let json = serde_json::to_string(&Job::Monk).unwrap();
        assert_eq!(json, "\"monk\"");
    }
}
