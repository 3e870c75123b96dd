//! SetTierSource - Stats from one unlocked set bonus tier

use crate::set_bonus::SetTier;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;

pub struct SetTierSource<'a> {
    pub set_name: &'a str,
    pub tier: &'a SetTier,
}

impl<'a> SetTierSource<'a> {
    pub fn new(set_name: &'a str, tier: &'a SetTier) -> Self {
        SetTierSource { set_name, tier }
    }
}

impl StatSource for SetTierSource<'_> {
    fn id(&self) -> &str {
        self.set_name
    }

    fn priority(&self) -> i32 {
        100 // Percentages apply to the post-equipment totals
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_tier(self.tier);
    }
}
