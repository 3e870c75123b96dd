//! Equipment sets and threshold bonuses

mod resolver;
mod table;

pub use resolver::{active_bonuses, character_bonuses, next_tier, ActiveSetBonus};
pub use table::{EquipmentSet, SetBonusTable, SetTier};
