//! GearSource - Stats from an equipped item

use crate::item::ItemInstance;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::EquipSlot;

/// Flat stats from one equipped item, enhancement included
pub struct GearSource<'a> {
    pub slot: EquipSlot,
    pub item: &'a ItemInstance,
}

impl<'a> GearSource<'a> {
    pub fn new(slot: EquipSlot, item: &'a ItemInstance) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.template.id
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_flat(self.item.stats());
    }
}
