//! ItemInstance - A concrete copy of a template owned by the party

use super::EquipmentTemplate;
use crate::types::FlatStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest enhancement level an item can carry
pub const MAX_ENHANCEMENT: u8 = 4;

/// Stat bonus per enhancement level, as a percentage of the item's base stats
pub const ENHANCEMENT_BONUS_PERCENT: [i32; 5] = [0, 10, 25, 50, 100];

/// Runtime identity of one item copy, distinct from its template id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues fresh instance ids. The counter is persisted with the save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceIdGenerator {
    next: u64,
}

impl InstanceIdGenerator {
    pub fn starting_at(next: u64) -> Self {
        InstanceIdGenerator { next }
    }

    pub fn issue(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`issue`](Self::issue) will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for InstanceIdGenerator {
    fn default() -> Self {
        InstanceIdGenerator { next: 1 }
    }
}

/// An owned item: template data plus its own identity and enhancement level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub instance_id: InstanceId,
    pub template: EquipmentTemplate,
    #[serde(default)]
    pub enhancement: u8,
}

impl ItemInstance {
    pub fn new(instance_id: InstanceId, template: EquipmentTemplate) -> Self {
        ItemInstance {
            instance_id,
            template,
            enhancement: 0,
        }
    }

    pub fn with_enhancement(mut self, level: u8) -> Self {
        self.enhancement = level.min(MAX_ENHANCEMENT);
        self
    }

    pub fn set_name(&self) -> Option<&str> {
        self.template.set.as_deref()
    }

    /// Flat bonuses after enhancement, floored per stat
    pub fn stats(&self) -> FlatStats {
        let level = usize::from(self.enhancement.min(MAX_ENHANCEMENT));
        let bonus = ENHANCEMENT_BONUS_PERCENT[level];
        let enhance = |value: i32| value + (value * bonus).div_euclid(100);
        let base = self.template.base_stats();
        FlatStats {
            attack: enhance(base.attack),
            defense: enhance(base.defense),
            hp: enhance(base.hp),
            mp: enhance(base.mp),
            speed: enhance(base.speed),
        }
    }

    /// "Rusty Sword +2"
    pub fn display_name(&self) -> String {
        if self.enhancement > 0 {
            format!("{} +{}", self.template.name, self.enhancement)
        } else {
            self.template.name.clone()
        }
    }
}
