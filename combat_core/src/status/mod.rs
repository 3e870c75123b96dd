//! StatusEffectTracker - Per-battle ledger of burns, freezes, taunts, ...
//!
//! One tracker belongs to one battle. It never touches HP itself: ticks
//! report burn damage and the session applies it.

mod record;

pub use record::{StatusEffect, StatusRecord, Taunt, TickOutcome};

use crate::types::CombatantId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct StatusEffectTracker {
    records: BTreeMap<CombatantId, StatusRecord>,
}

impl StatusEffectTracker {
    pub fn new() -> Self {
        StatusEffectTracker::default()
    }

    /// Apply an effect. Burn, slow and stealth overwrite earlier values.
    pub fn apply(&mut self, id: CombatantId, effect: StatusEffect) {
        let record = self.records.entry(id).or_default();
        match effect {
            StatusEffect::Burn { damage } => record.burn = Some(damage),
            StatusEffect::Slow { percent } => record.slow = Some(percent),
            StatusEffect::Freeze => record.frozen = true,
            StatusEffect::Taunt {
                taunter,
                turns,
                attack_reduction,
            } => {
                record.taunt = Some(Taunt {
                    taunter,
                    turns_left: turns,
                    attack_reduction,
                })
            }
            StatusEffect::Stealth { dodge } => record.stealth = Some(dodge),
        }
    }

    /// Start-of-turn processing: report burn damage and consume a freeze.
    ///
    /// The caller deals the burn first; a combatant that survives it and
    /// has `skip_turn` set loses the turn.
    pub fn tick(&mut self, id: CombatantId) -> TickOutcome {
        let Some(record) = self.records.get_mut(&id) else {
            return TickOutcome::default();
        };
        let outcome = TickOutcome {
            burn_damage: record.burn.unwrap_or(0),
            skip_turn: record.frozen,
        };
        record.frozen = false;
        outcome
    }

    /// Drop every effect on a combatant (on death)
    pub fn clear(&mut self, id: CombatantId) {
        self.records.remove(&id);
    }

    pub fn query(&self, id: CombatantId) -> Option<&StatusRecord> {
        self.records.get(&id).filter(|r| !r.is_empty())
    }

    pub fn slow(&self, id: CombatantId) -> i32 {
        self.records.get(&id).and_then(|r| r.slow).unwrap_or(0)
    }

    pub fn stealth(&self, id: CombatantId) -> i32 {
        self.records.get(&id).and_then(|r| r.stealth).unwrap_or(0)
    }

    pub fn taunt(&self, id: CombatantId) -> Option<Taunt> {
        self.records.get(&id).and_then(|r| r.taunt)
    }

    /// Spend one turn of a taunt, removing it when it runs out
    pub fn consume_taunt_turn(&mut self, id: CombatantId) {
        if let Some(record) = self.records.get_mut(&id) {
            if let Some(taunt) = record.taunt.as_mut() {
                taunt.turns_left = taunt.turns_left.saturating_sub(1);
                if taunt.turns_left == 0 {
                    record.taunt = None;
                }
            }
        }
    }

    /// Remove every taunt pointing at a party member (when they die)
    pub fn clear_taunts_by(&mut self, taunter: usize) {
        for record in self.records.values_mut() {
            if record.taunt.is_some_and(|t| t.taunter == taunter) {
                record.taunt = None;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(StatusRecord::is_empty)
    }
}
