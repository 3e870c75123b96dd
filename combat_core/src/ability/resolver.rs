//! AbilityResolver - Executes one party member's ability

use super::{Ability, AbilityKind, BuffEffect, DebuffEffect, HealTarget, OnHitEffect};
use crate::character::Character;
use crate::combat::{ActionError, CombatEvent, DamageKind, HealKind};
use crate::config::CombatConstants;
use crate::formula::{attack_damage, crit_damage, heal_amount, percent_of, scaled_power_tenths};
use crate::monster::Monster;
use crate::rng::CombatRng;
use crate::set_bonus::SetBonusTable;
use crate::stat_block::{effective_stats, stat_sheet};
use crate::status::{StatusEffect, StatusEffectTracker};
use crate::types::CombatantId;

/// The mutable battle state an ability can touch
pub struct Battlefield<'a> {
    pub party: &'a mut [Character],
    pub monsters: &'a mut [Monster],
    pub statuses: &'a mut StatusEffectTracker,
    /// Party-wide defend flag for the coming monster block
    pub defending: &'a mut bool,
}

/// Side effects of an attack after combining ability data and gear stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HitEffects {
    burn: i32,
    slow: i32,
    chain: i32,
    freeze_chance: i32,
}

impl HitEffects {
    fn add(&mut self, effect: OnHitEffect) {
        match effect {
            OnHitEffect::Freeze { chance } => self.freeze_chance += chance,
            OnHitEffect::Burn { damage } => self.burn += damage,
            OnHitEffect::Slow { percent } => self.slow += percent,
            OnHitEffect::Chain { percent } => self.chain += percent,
        }
    }
}

/// Resolves abilities against a [`Battlefield`]
pub struct AbilityResolver<'a> {
    sets: &'a SetBonusTable,
    constants: &'a CombatConstants,
}

impl<'a> AbilityResolver<'a> {
    pub fn new(sets: &'a SetBonusTable, constants: &'a CombatConstants) -> Self {
        AbilityResolver { sets, constants }
    }

    /// Execute `ability` for party member `actor`.
    ///
    /// Validation happens before any mutation; on error nothing changes:
    /// 1. The actor must be alive and able to use the ability
    /// 2. The actor must have enough MP
    /// 3. Monster-targeting abilities need a living target
    ///
    /// Returns the events produced, in order.
    pub fn resolve<R: CombatRng + ?Sized>(
        &self,
        field: &mut Battlefield<'_>,
        actor: usize,
        ability: &Ability,
        target: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        let member = field.party.get(actor).ok_or(ActionError::ActorCannotAct(actor))?;
        if !member.is_alive() {
            return Err(ActionError::ActorCannotAct(actor));
        }
        if !ability.usable_by(member.job) {
            return Err(ActionError::UnknownAbility(ability.id.clone()));
        }
        if member.mp < ability.mp_cost {
            return Err(ActionError::InsufficientMp {
                actor: member.name.clone(),
                ability: ability.name.clone(),
                cost: ability.mp_cost,
                available: member.mp,
            });
        }
        let monster_target = if ability.targets_monster() {
            let index = target.ok_or(ActionError::MissingTarget)?;
            let monster = field
                .monsters
                .get(index)
                .ok_or(ActionError::InvalidTarget(CombatantId::Monster(index)))?;
            if !monster.is_alive() {
                return Err(ActionError::DeadTarget(CombatantId::Monster(index)));
            }
            Some(index)
        } else {
            None
        };

        field.party[actor].mp -= ability.mp_cost;
        let mut events = vec![CombatEvent::AbilityUsed {
            actor: CombatantId::Party(actor),
            ability: ability.name.clone(),
            mp_cost: ability.mp_cost,
        }];

        match (&ability.kind, monster_target) {
            (AbilityKind::Attack { power, on_hit }, Some(index)) => {
                self.resolve_attack(field, actor, *power, on_hit, index, rng, &mut events);
            }
            (AbilityKind::Heal { power, target }, _) => {
                self.resolve_heal(field, actor, *power, *target, &mut events);
            }
            (AbilityKind::Buff { buff }, _) => resolve_buff(field, actor, *buff, &mut events),
            (AbilityKind::Debuff { debuff }, Some(index)) => {
                resolve_debuff(field, actor, *debuff, index, &mut events);
            }
            // targets_monster() guarantees a target for attacks and debuffs
            (AbilityKind::Attack { .. } | AbilityKind::Debuff { .. }, None) => {}
        }

        Ok(events)
    }

    /// Attack resolution:
    /// 1. Damage from scaled power, target defense and penetration
    /// 2. Crit roll multiplies damage
    /// 3. Lifesteal and on-hit heal restore the actor
    /// 4. Burn and slow overwrite the target's previous values
    /// 5. Freeze roll
    /// 6. Chain damage to every other living monster
    #[allow(clippy::too_many_arguments)]
    fn resolve_attack<R: CombatRng + ?Sized>(
        &self,
        field: &mut Battlefield<'_>,
        actor: usize,
        power: f64,
        on_hit: &[OnHitEffect],
        target: usize,
        rng: &mut R,
        events: &mut Vec<CombatEvent>,
    ) {
        let attacker = &field.party[actor];
        let sheet = stat_sheet(attacker, self.sets);
        let combat = sheet.combat;
        let actor_id = CombatantId::Party(actor);
        let target_id = CombatantId::Monster(target);

        let mut effects = HitEffects {
            burn: combat.burn_damage,
            slow: combat.slow_effect,
            chain: combat.chain_damage,
            freeze_chance: 0,
        };
        for effect in on_hit {
            effects.add(*effect);
        }

        // Step 1: Base damage
        let tenths = scaled_power_tenths(power, attacker.level, self.constants.level_scaling_percent);
        let defense = field.monsters[target].defense;
        let mut damage = attack_damage(sheet.effective.attack, tenths, defense, combat.defense_penetration);

        // Step 2: Crit
        let critical = rng.roll_percent(combat.crit_chance);
        if critical {
            damage = crit_damage(damage, self.constants.crit_base_percent, combat.crit_damage);
        }

        let dealt = field.monsters[target].take_damage(damage);
        events.push(CombatEvent::Damage {
            source: Some(actor_id),
            target: target_id,
            amount: dealt,
            critical,
            kind: DamageKind::Hit,
        });
        let target_alive = field.monsters[target].is_alive();
        if !target_alive {
            field.statuses.clear(target_id);
            events.push(CombatEvent::Defeated { target: target_id });
        }

        // Step 3: Lifesteal and on-hit heal, based on the damage rolled
        let drain = percent_of(damage, combat.lifesteal) + combat.on_hit_heal;
        if drain > 0 {
            let healed = field.party[actor].restore_hp(drain, sheet.effective.max_hp);
            if healed > 0 {
                events.push(CombatEvent::Healed {
                    target: actor_id,
                    amount: healed,
                    kind: HealKind::Lifesteal,
                });
            }
        }

        // Step 4 and 5: Status effects only land on a survivor
        if target_alive {
            if effects.burn > 0 {
                let effect = StatusEffect::Burn { damage: effects.burn };
                field.statuses.apply(target_id, effect);
                events.push(CombatEvent::StatusApplied { target: target_id, effect });
            }
            if effects.slow > 0 {
                let effect = StatusEffect::Slow { percent: effects.slow };
                field.statuses.apply(target_id, effect);
                events.push(CombatEvent::StatusApplied { target: target_id, effect });
            }
            if rng.roll_percent(effects.freeze_chance) {
                field.statuses.apply(target_id, StatusEffect::Freeze);
                events.push(CombatEvent::StatusApplied {
                    target: target_id,
                    effect: StatusEffect::Freeze,
                });
            }
        }

        // Step 6: Chain damage
        if effects.chain > 0 {
            let splash = percent_of(damage, effects.chain);
            for index in 0..field.monsters.len() {
                if index == target || !field.monsters[index].is_alive() || splash <= 0 {
                    continue;
                }
                let id = CombatantId::Monster(index);
                let dealt = field.monsters[index].take_damage(splash);
                events.push(CombatEvent::Damage {
                    source: Some(actor_id),
                    target: id,
                    amount: dealt,
                    critical: false,
                    kind: DamageKind::Chain,
                });
                if !field.monsters[index].is_alive() {
                    field.statuses.clear(id);
                    events.push(CombatEvent::Defeated { target: id });
                }
            }
        }
    }

    fn resolve_heal(
        &self,
        field: &mut Battlefield<'_>,
        actor: usize,
        power: f64,
        target: HealTarget,
        events: &mut Vec<CombatEvent>,
    ) {
        let recipient = match target {
            HealTarget::Caster => actor,
            HealTarget::LowestHpAlly => lowest_hp_ally(field.party, self.sets).unwrap_or(actor),
        };
        let level = field.party[actor].level;
        let amount = heal_amount(scaled_power_tenths(power, level, self.constants.level_scaling_percent));
        let max_hp = effective_stats(&field.party[recipient], self.sets).max_hp;
        let healed = field.party[recipient].restore_hp(amount, max_hp);
        events.push(CombatEvent::Healed {
            target: CombatantId::Party(recipient),
            amount: healed,
            kind: HealKind::Ability,
        });
    }
}

fn resolve_buff(field: &mut Battlefield<'_>, actor: usize, buff: BuffEffect, events: &mut Vec<CombatEvent>) {
    let actor_id = CombatantId::Party(actor);
    match buff {
        BuffEffect::Defend => {
            *field.defending = true;
            events.push(CombatEvent::Defending { actor: actor_id });
        }
        BuffEffect::Stealth { dodge } => {
            let effect = StatusEffect::Stealth { dodge };
            field.statuses.apply(actor_id, effect);
            events.push(CombatEvent::StatusApplied { target: actor_id, effect });
        }
    }
}

fn resolve_debuff(
    field: &mut Battlefield<'_>,
    actor: usize,
    debuff: DebuffEffect,
    target: usize,
    events: &mut Vec<CombatEvent>,
) {
    match debuff {
        DebuffEffect::Taunt {
            turns,
            attack_reduction,
        } => {
            let target_id = CombatantId::Monster(target);
            let effect = StatusEffect::Taunt {
                taunter: actor,
                turns,
                attack_reduction,
            };
            field.statuses.apply(target_id, effect);
            events.push(CombatEvent::StatusApplied { target: target_id, effect });
        }
    }
}

/// The living party member with the lowest HP ratio. Ties go to the
/// earlier roster position.
pub fn lowest_hp_ally(party: &[Character], sets: &SetBonusTable) -> Option<usize> {
    let mut best: Option<(usize, i64, i64)> = None;
    for (index, member) in party.iter().enumerate().filter(|(_, m)| m.is_alive()) {
        let hp = i64::from(member.hp);
        let max = i64::from(effective_stats(member, sets).max_hp.max(1));
        let lower = match best {
            // hp / max < best_hp / best_max, compared without division
            Some((_, best_hp, best_max)) => hp * best_max < best_hp * max,
            None => true,
        };
        if lower {
            best = Some((index, hp, max));
        }
    }
    best.map(|(index, _, _)| index)
}
