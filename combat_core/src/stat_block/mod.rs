//! Stat aggregation - base stats + equipment + set bonuses
//!
//! Stats are never stored on the character; they are recomputed from the
//! current loadout whenever combat math needs them.

mod accumulator;

pub use accumulator::StatAccumulator;

use crate::character::Character;
use crate::set_bonus::{character_bonuses, ActiveSetBonus, SetBonusTable};
use crate::source::{BaseStatsSource, GearSource, SetTierSource, StatSource};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Primary stats used by all combat math
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub attack: i32,
    pub defense: i32,
    pub max_hp: i32,
    pub max_mp: i32,
    pub speed: i32,
}

/// Secondary modifiers granted only by set bonuses. All values are percent
/// points except `on_hit_heal` and `burn_damage`, which are flat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub crit_chance: i32,
    /// Added to the base crit multiplier
    pub crit_damage: i32,
    pub evasion: i32,
    pub defense_penetration: i32,
    pub lifesteal: i32,
    pub counter_chance: i32,
    pub on_hit_heal: i32,
    pub burn_damage: i32,
    pub slow_effect: i32,
    pub chain_damage: i32,
}

/// Everything the aggregator produces for one character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSheet {
    pub effective: EffectiveStats,
    pub combat: CombatStats,
}

/// All stat sources for a character: base stats, each usable equipped item,
/// and every unlocked set tier
pub fn character_sources<'a>(
    character: &'a Character,
    bonuses: &'a [ActiveSetBonus],
) -> Vec<Box<dyn StatSource + 'a>> {
    let mut sources: Vec<Box<dyn StatSource + 'a>> = vec![Box::new(BaseStatsSource::new(character.base))];
    for (slot, item) in character.active_items() {
        sources.push(Box::new(GearSource::new(slot, item)));
    }
    for bonus in bonuses {
        for tier in &bonus.unlocked_tiers {
            sources.push(Box::new(SetTierSource::new(&bonus.set_name, tier)));
        }
    }
    sources
}

/// Apply sources in priority order and resolve
pub fn aggregate_sources(sources: &[Box<dyn StatSource + '_>]) -> StatSheet {
    let mut sorted_sources: Vec<_> = sources.iter().collect();
    sorted_sources.sort_by_key(|s| s.priority());

    let mut accumulator = StatAccumulator::new();
    for source in sorted_sources {
        trace!(source = source.id(), priority = source.priority(), "applying stat source");
        source.apply(&mut accumulator);
    }
    accumulator.resolve()
}

/// Effective and combat stats for a character's current equipment
pub fn stat_sheet(character: &Character, sets: &SetBonusTable) -> StatSheet {
    let bonuses = character_bonuses(character, sets);
    let sources = character_sources(character, &bonuses);
    aggregate_sources(&sources)
}

pub fn effective_stats(character: &Character, sets: &SetBonusTable) -> EffectiveStats {
    stat_sheet(character, sets).effective
}

pub fn combat_stats(character: &Character, sets: &SetBonusTable) -> CombatStats {
    stat_sheet(character, sets).combat
}
