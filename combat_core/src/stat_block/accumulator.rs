//! StatAccumulator - Collects stat contributions before resolving them

use super::{CombatStats, EffectiveStats, StatSheet};
use crate::set_bonus::SetTier;
use crate::types::FlatStats;

/// Accumulates contributions from every source.
///
/// Flat amounts are summed first. Percentages from all tiers of all sets
/// are summed per stat and applied once to the flat total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatAccumulator {
    // === Primary ===
    pub attack_flat: i32,
    pub defense_flat: i32,
    pub hp_flat: i32,
    pub mp_flat: i32,
    pub speed_flat: i32,
    pub attack_percent: i32,
    pub defense_percent: i32,
    pub hp_percent: i32,
    pub mp_percent: i32,
    pub speed_percent: i32,

    // === Combat ===
    pub crit_chance: i32,
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

impl StatAccumulator {
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    pub fn add_flat(&mut self, stats: FlatStats) {
        self.attack_flat += stats.attack;
        self.defense_flat += stats.defense;
        self.hp_flat += stats.hp;
        self.mp_flat += stats.mp;
        self.speed_flat += stats.speed;
    }

    pub fn add_tier(&mut self, tier: &SetTier) {
        self.attack_percent += tier.attack_percent;
        self.defense_percent += tier.defense_percent;
        self.hp_percent += tier.hp_percent;
        self.mp_percent += tier.mp_percent;
        self.speed_percent += tier.speed_percent;

        self.crit_chance += tier.crit_chance;
        self.crit_damage += tier.crit_damage;
        self.evasion += tier.evasion;
        self.defense_penetration += tier.defense_penetration;
        self.lifesteal += tier.lifesteal;
        self.counter_chance += tier.counter_chance;
        self.on_hit_heal += tier.on_hit_heal;
        self.burn_damage += tier.burn_damage;
        self.slow_effect += tier.slow_effect;
        self.chain_damage += tier.chain_damage;
    }

    /// Resolve into final stats
    pub fn resolve(&self) -> StatSheet {
        StatSheet {
            effective: EffectiveStats {
                attack: with_percent(self.attack_flat, self.attack_percent),
                defense: with_percent(self.defense_flat, self.defense_percent),
                max_hp: with_percent(self.hp_flat, self.hp_percent),
                max_mp: with_percent(self.mp_flat, self.mp_percent),
                speed: with_percent(self.speed_flat, self.speed_percent),
            },
            combat: CombatStats {
                crit_chance: self.crit_chance,
                crit_damage: self.crit_damage,
                evasion: self.evasion,
                defense_penetration: self.defense_penetration,
                lifesteal: self.lifesteal,
                counter_chance: self.counter_chance,
                on_hit_heal: self.on_hit_heal,
                burn_damage: self.burn_damage,
                slow_effect: self.slow_effect,
                chain_damage: self.chain_damage,
            },
        }
    }
}

/// `value + floor(value * percent / 100)`
fn with_percent(value: i32, percent: i32) -> i32 {
    value + (value * percent).div_euclid(100)
}
