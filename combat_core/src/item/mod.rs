//! Items - Equipment templates, owned instances, loadouts and potions

mod instance;
mod loadout;
mod potion;
pub mod slot_rules;
mod template;

pub use instance::{InstanceId, InstanceIdGenerator, ItemInstance, ENHANCEMENT_BONUS_PERCENT, MAX_ENHANCEMENT};
pub use loadout::Loadout;
pub use potion::{Potion, PotionCatalog};
pub use template::{EquipmentCatalog, EquipmentTemplate};

use crate::types::{EquipSlot, Job};
use thiserror::Error;

/// Rejected equipment change. The roster and bag are left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquipError {
    #[error("{item} cannot be used by a {job}")]
    WrongJob { item: String, job: Job },
    #[error("a {job} cannot use the {} slot", .slot.label())]
    SlotForbidden { job: Job, slot: EquipSlot },
    #[error("{item} does not fit the {} slot", .slot.label())]
    SlotMismatch { item: String, slot: EquipSlot },
    #[error("item {0} is not in the bag")]
    NotInBag(InstanceId),
    #[error("no party member at position {0}")]
    NoSuchMember(usize),
    #[error("the {} slot is empty", .0.label())]
    EmptySlot(EquipSlot),
    #[error("equipment cannot change while a battle is in progress")]
    BattleInProgress,
}
