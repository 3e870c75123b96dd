//! The monster block of a round
//!
//! Monsters act against a snapshot of HP taken when the block starts. Every
//! hit lands in an [`HpLedger`]; the roster is only written once the whole
//! block has resolved.

use super::{CombatEvent, DamageKind, DodgeKind};
use crate::character::Character;
use crate::config::CombatConstants;
use crate::formula::{attack_damage, monster_damage};
use crate::monster::Monster;
use crate::rng::CombatRng;
use crate::set_bonus::SetBonusTable;
use crate::stat_block::{stat_sheet, StatSheet};
use crate::status::StatusEffectTracker;
use crate::types::CombatantId;

/// Working HP values for one monster block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HpLedger {
    party: Vec<i32>,
    monsters: Vec<i32>,
}

impl HpLedger {
    fn snapshot(party: &[Character], monsters: &[Monster]) -> Self {
        HpLedger {
            party: party.iter().map(|c| c.hp).collect(),
            monsters: monsters.iter().map(|m| m.hp).collect(),
        }
    }

    fn living_party(&self) -> Vec<usize> {
        (0..self.party.len()).filter(|&i| self.party[i] > 0).collect()
    }

    /// Returns the HP actually lost
    fn hit_party(&mut self, index: usize, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.party[index]);
        self.party[index] -= lost;
        lost
    }

    fn hit_monster(&mut self, index: usize, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.monsters[index]);
        self.monsters[index] -= lost;
        lost
    }

    fn commit(self, party: &mut [Character], monsters: &mut [Monster]) {
        for (member, hp) in party.iter_mut().zip(self.party) {
            member.hp = hp;
        }
        for (monster, hp) in monsters.iter_mut().zip(self.monsters) {
            monster.hp = hp;
        }
    }
}

/// Everything the monster block reads or writes
pub(super) struct MonsterBlock<'a> {
    pub party: &'a mut [Character],
    pub monsters: &'a mut [Monster],
    pub statuses: &'a mut StatusEffectTracker,
    pub defending: bool,
    pub sets: &'a SetBonusTable,
    pub constants: &'a CombatConstants,
}

impl MonsterBlock<'_> {
    /// Resolve every monster in `order` once.
    ///
    /// Per monster:
    /// 1. Burn ticks, and may kill it
    /// 2. A frozen monster loses the turn
    /// 3. Target is the taunter while the taunt holds, else a random living member
    /// 4. Stealth dodge, then evasion
    /// 5. Damage, then the defender's counter-attack roll
    pub fn run<R: CombatRng + ?Sized>(self, order: &[usize], rng: &mut R) -> Vec<CombatEvent> {
        let mut ledger = HpLedger::snapshot(self.party, self.monsters);
        let sheets: Vec<StatSheet> = self.party.iter().map(|c| stat_sheet(c, self.sets)).collect();
        let multiplier = if self.defending {
            self.constants.defend_multiplier
        } else {
            1
        };
        let counter_tenths = (self.constants.counter_power * 10.0).round() as i64;
        let mut events = Vec::new();

        for &index in order {
            let monster_id = CombatantId::Monster(index);
            if ledger.monsters[index] <= 0 {
                continue;
            }

            // Step 1: Burn
            let tick = self.statuses.tick(monster_id);
            if tick.burn_damage > 0 {
                let amount = ledger.hit_monster(index, tick.burn_damage);
                events.push(CombatEvent::Damage {
                    source: None,
                    target: monster_id,
                    amount,
                    critical: false,
                    kind: DamageKind::Burn,
                });
                if ledger.monsters[index] <= 0 {
                    self.statuses.clear(monster_id);
                    events.push(CombatEvent::Defeated { target: monster_id });
                    continue;
                }
            }

            // Step 2: Freeze
            if tick.skip_turn {
                events.push(CombatEvent::TurnSkipped { actor: monster_id });
                continue;
            }

            // Step 3: Targeting
            let living = ledger.living_party();
            if living.is_empty() {
                break;
            }
            let (target, reduction) = match self.statuses.taunt(monster_id) {
                Some(taunt) if ledger.party.get(taunt.taunter).is_some_and(|&hp| hp > 0) => {
                    self.statuses.consume_taunt_turn(monster_id);
                    (taunt.taunter, taunt.attack_reduction)
                }
                _ => (living[rng.pick_index(living.len())], 0),
            };
            let target_id = CombatantId::Party(target);
            let sheet = &sheets[target];

            // Step 4: Dodges
            if rng.roll_percent(self.statuses.stealth(target_id)) {
                events.push(CombatEvent::Dodged {
                    attacker: monster_id,
                    target: target_id,
                    kind: DodgeKind::Stealth,
                });
                continue;
            }
            if rng.roll_percent(sheet.combat.evasion) {
                events.push(CombatEvent::Dodged {
                    attacker: monster_id,
                    target: target_id,
                    kind: DodgeKind::Evasion,
                });
                continue;
            }

            // Step 5: Damage and counter
            let monster = &self.monsters[index];
            let damage = monster_damage(monster.attack, reduction, sheet.effective.defense, multiplier);
            let amount = ledger.hit_party(target, damage);
            events.push(CombatEvent::Damage {
                source: Some(monster_id),
                target: target_id,
                amount,
                critical: false,
                kind: DamageKind::MonsterAttack,
            });
            if ledger.party[target] <= 0 {
                self.statuses.clear(target_id);
                self.statuses.clear_taunts_by(target);
                events.push(CombatEvent::Defeated { target: target_id });
                continue;
            }

            if rng.roll_percent(sheet.combat.counter_chance) {
                let counter = attack_damage(
                    sheet.effective.attack,
                    counter_tenths,
                    monster.defense,
                    sheet.combat.defense_penetration,
                );
                let amount = ledger.hit_monster(index, counter);
                events.push(CombatEvent::Damage {
                    source: Some(target_id),
                    target: monster_id,
                    amount,
                    critical: false,
                    kind: DamageKind::Counter,
                });
                if ledger.monsters[index] <= 0 {
                    self.statuses.clear(monster_id);
                    events.push(CombatEvent::Defeated { target: monster_id });
                }
            }
        }

        ledger.commit(self.party, self.monsters);
        events
    }
}
