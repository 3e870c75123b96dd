//! Ability definitions
//!
//! Abilities are per-job catalog entries, not combatant state. Each one is a
//! tagged archetype with its side effects listed as data.

use crate::types::Job;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Jobs that can use this ability
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub mp_cost: i32,
    pub kind: AbilityKind,
}

impl Ability {
    pub fn usable_by(&self, job: Job) -> bool {
        self.jobs.contains(&job)
    }

    /// Whether the ability needs a monster target
    pub fn targets_monster(&self) -> bool {
        matches!(self.kind, AbilityKind::Attack { .. } | AbilityKind::Debuff { .. })
    }
}

/// Ability archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbilityKind {
    /// Damage a monster. `power` multiplies the actor's attack.
    Attack {
        power: f64,
        #[serde(default)]
        on_hit: Vec<OnHitEffect>,
    },
    /// Restore `power` HP (level scaled)
    Heal { power: f64, target: HealTarget },
    Buff { buff: BuffEffect },
    Debuff { debuff: DebuffEffect },
}

/// Extra effects of an attack ability, on top of the actor's combat stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum OnHitEffect {
    /// Percent chance to freeze the target
    Freeze { chance: i32 },
    /// Burn damage per turn
    Burn { damage: i32 },
    /// Speed reduction percent
    Slow { percent: i32 },
    /// Percent of the hit dealt to every other living monster
    Chain { percent: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealTarget {
    Caster,
    /// The living party member with the lowest HP ratio
    LowestHpAlly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum BuffEffect {
    /// Multiply party defense until the monsters have acted
    Defend,
    /// Persistent percent chance to dodge monster attacks
    Stealth { dodge: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DebuffEffect {
    /// Force the target to attack the caster, with reduced attack
    Taunt { turns: u32, attack_reduction: i32 },
}

/// All abilities, in catalog order
#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    abilities: Vec<Ability>,
}

impl AbilityCatalog {
    pub fn new(abilities: Vec<Ability>) -> Self {
        AbilityCatalog { abilities }
    }

    pub fn get(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// Abilities a job can use, in catalog order
    pub fn for_job(&self, job: Job) -> Vec<&Ability> {
        self.abilities.iter().filter(|a| a.usable_by(job)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}
