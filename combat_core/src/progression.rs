//! ProgressionManager - XP awards, level-ups and per-job stat growth

use crate::character::Character;
use crate::config::ProgressionConstants;
use crate::set_bonus::SetBonusTable;
use crate::stat_block::effective_stats;
use crate::types::FlatStats;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A level gained by one party member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// Party index
    pub member: usize,
    pub name: String,
    pub level: u32,
    /// Base stats gained
    pub growth: FlatStats,
}

/// Cumulative curve value `floor(base * growth^(level - 1))`.
///
/// A character at level L needs `xp_for_level(L + 1)` carried XP to level up.
pub fn xp_for_level(level: u32, constants: &ProgressionConstants) -> u32 {
    let exponent = level.max(1) - 1;
    let value = f64::from(constants.xp_base) * constants.xp_growth.powi(exponent as i32);
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.floor() as u32
    }
}

/// XP a character needs to reach their next level
pub fn xp_to_next_level(character: &Character, constants: &ProgressionConstants) -> u32 {
    xp_for_level(character.level + 1, constants)
}

/// Give `xp` to every party member, dead or alive.
///
/// Each member levels up at most once per award; leftover XP carries over.
/// Growth raises base stats, and current HP/MP of living members by the
/// same amounts (clamped to the new maximums). Fallen members stay at 0 HP.
pub fn award_xp(
    party: &mut [Character],
    xp: u32,
    constants: &ProgressionConstants,
    sets: &SetBonusTable,
) -> Vec<LevelUp> {
    let mut level_ups = Vec::new();
    for (index, member) in party.iter_mut().enumerate() {
        member.xp = member.xp.saturating_add(xp);
        let needed = xp_to_next_level(member, constants);
        if member.xp < needed {
            continue;
        }

        member.xp -= needed;
        member.level += 1;
        let growth = constants.growth.for_job(member.job);
        member.base += growth;

        let stats = effective_stats(member, sets);
        if member.is_alive() {
            member.hp += growth.hp;
            member.mp += growth.mp;
        }
        member.clamp_resources(stats.max_hp, stats.max_mp);

        info!(member = %member.name, level = member.level, "level up");
        level_ups.push(LevelUp {
            member: index,
            name: member.name.clone(),
            level: member.level,
            growth,
        });
    }
    level_ups
}
