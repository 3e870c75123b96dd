//! Class slot table - which jobs may use which equipment slots
//!
//! Every equip path (snapshot equip, stat aggregation, UI filtering) goes
//! through this table instead of checking jobs inline.

use super::{EquipError, EquipmentTemplate};
use crate::types::{EquipSlot, Job};

/// Slots a job can never use
const FORBIDDEN_SLOTS: [(Job, &[EquipSlot]); 3] = [
    (Job::Fighter, &[EquipSlot::Relic, EquipSlot::Offhand]),
    (Job::Mage, &[EquipSlot::Shield]),
    (Job::Monk, &[EquipSlot::Shield, EquipSlot::Relic]),
];

/// Slots forbidden to `job`
pub fn forbidden_slots(job: Job) -> &'static [EquipSlot] {
    FORBIDDEN_SLOTS
        .iter()
        .find(|(j, _)| *j == job)
        .map(|(_, slots)| *slots)
        .unwrap_or(&[])
}

pub fn can_use_slot(job: Job, slot: EquipSlot) -> bool {
    !forbidden_slots(job).contains(&slot)
}

/// Slots available to `job`, in display order
pub fn usable_slots(job: Job) -> Vec<EquipSlot> {
    EquipSlot::ALL
        .into_iter()
        .filter(|slot| can_use_slot(job, *slot))
        .collect()
}

/// Check that `item` may go into `slot` on a character of class `job`
pub fn validate_equip(job: Job, slot: EquipSlot, item: &EquipmentTemplate) -> Result<(), EquipError> {
    if !can_use_slot(job, slot) {
        return Err(EquipError::SlotForbidden { job, slot });
    }
    if !item.kind.fits(slot) {
        return Err(EquipError::SlotMismatch {
            item: item.name.clone(),
            slot,
        });
    }
    if !item.allows(job) {
        return Err(EquipError::WrongJob {
            item: item.name.clone(),
            job,
        });
    }
    Ok(())
}
