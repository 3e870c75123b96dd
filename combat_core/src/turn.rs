//! TurnScheduler - Speed-ordered turn sequence for one round
//!
//! The party block acts first, fastest first. Monsters then act as one
//! block in their own speed order, with slows applied. Ties keep roster
//! order.

use crate::character::Character;
use crate::formula::slowed_speed;
use crate::monster::Monster;
use crate::set_bonus::SetBonusTable;
use crate::stat_block::effective_stats;
use crate::status::StatusEffectTracker;
use crate::types::CombatantId;
use std::cmp::Reverse;

/// Indices sorted by speed, high to low; equal speeds keep input order
pub fn order_by_speed(entries: impl IntoIterator<Item = (usize, i32)>) -> Vec<usize> {
    let mut entries: Vec<(usize, i32)> = entries.into_iter().collect();
    // sort_by_key is stable
    entries.sort_by_key(|&(_, speed)| Reverse(speed));
    entries.into_iter().map(|(index, _)| index).collect()
}

/// One round's turn sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOrder {
    party: Vec<usize>,
    monsters: Vec<usize>,
    cursor: usize,
}

impl TurnOrder {
    /// Build the order for a new round. Dead combatants are left out.
    pub fn build(
        party: &[Character],
        monsters: &[Monster],
        sets: &SetBonusTable,
        statuses: &StatusEffectTracker,
    ) -> Self {
        let party_order = order_by_speed(
            party
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_alive())
                .map(|(i, c)| (i, effective_stats(c, sets).speed)),
        );
        let monster_order = order_by_speed(
            monsters
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_alive())
                .map(|(i, m)| (i, slowed_speed(m.speed, statuses.slow(CombatantId::Monster(i))))),
        );
        TurnOrder {
            party: party_order,
            monsters: monster_order,
            cursor: 0,
        }
    }

    /// Party member whose turn it is, if the party block isn't finished
    pub fn current(&self) -> Option<usize> {
        self.party.get(self.cursor).copied()
    }

    /// Move to the next party slot
    pub fn advance(&mut self) -> Option<usize> {
        if self.cursor < self.party.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn party_done(&self) -> bool {
        self.cursor >= self.party.len()
    }

    pub fn party_order(&self) -> &[usize] {
        &self.party
    }

    pub fn monster_order(&self) -> &[usize] {
        &self.monsters
    }

    /// The whole round as combatant ids: party block, then monsters
    pub fn sequence(&self) -> Vec<CombatantId> {
        self.party
            .iter()
            .map(|&i| CombatantId::Party(i))
            .chain(self.monsters.iter().map(|&i| CombatantId::Monster(i)))
            .collect()
    }
}
