//! Abilities - Catalog model and resolution

mod model;
mod resolver;

pub use model::{Ability, AbilityCatalog, AbilityKind, BuffEffect, DebuffEffect, HealTarget, OnHitEffect};
pub use resolver::{lowest_hp_ally, AbilityResolver, Battlefield};
