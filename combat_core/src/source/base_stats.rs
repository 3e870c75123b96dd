//! BaseStatsSource - A character's own stats

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::FlatStats;

/// Stats the character has without any equipment
pub struct BaseStatsSource {
    pub base: FlatStats,
}

impl BaseStatsSource {
    pub fn new(base: FlatStats) -> Self {
        BaseStatsSource { base }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_flat(self.base);
    }
}
