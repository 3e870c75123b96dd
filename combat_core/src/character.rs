//! Character - A party member with base stats, progression and a loadout

use crate::item::{slot_rules, ItemInstance, Loadout};
use crate::types::{EquipSlot, FlatStats, Job};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub job: Job,
    pub level: u32,
    /// XP carried toward the next level
    #[serde(default)]
    pub xp: u32,
    pub hp: i32,
    pub mp: i32,
    /// Base stats before equipment. `hp` / `mp` are the base maximums.
    pub base: FlatStats,
    /// Worn items. Older saves without some (or all) slots load as empty.
    #[serde(default)]
    pub equipment: Loadout,
}

impl Character {
    /// A level 1 character at full HP and MP
    pub fn new(id: impl Into<String>, name: impl Into<String>, job: Job, base: FlatStats) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            job,
            level: 1,
            xp: 0,
            hp: base.hp,
            mp: base.mp,
            base,
            equipment: Loadout::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Equipped items in slots this character's job can use.
    ///
    /// Items sitting in a forbidden slot (for example from an old save)
    /// contribute nothing.
    pub fn active_items(&self) -> impl Iterator<Item = (EquipSlot, &ItemInstance)> {
        let job = self.job;
        self.equipment
            .iter()
            .filter(move |(slot, _)| slot_rules::can_use_slot(job, *slot))
    }

    /// Reduce HP, never below zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore HP up to `max_hp`. Returns the HP actually gained.
    pub fn restore_hp(&mut self, amount: i32, max_hp: i32) -> i32 {
        let gained = amount.clamp(0, (max_hp - self.hp).max(0));
        self.hp += gained;
        gained
    }

    /// Restore MP up to `max_mp`. Returns the MP actually gained.
    pub fn restore_mp(&mut self, amount: i32, max_mp: i32) -> i32 {
        let gained = amount.clamp(0, (max_mp - self.mp).max(0));
        self.mp += gained;
        gained
    }

    /// Pull current HP/MP back under the given maximums
    pub fn clamp_resources(&mut self, max_hp: i32, max_mp: i32) {
        self.hp = self.hp.clamp(0, max_hp.max(0));
        self.mp = self.mp.clamp(0, max_mp.max(0));
    }
}
