//! combat_core - Turn-based party combat and progression engine
//!
//! This library provides:
//! - StatAggregator: effective and combat stats from base stats, gear and set bonuses
//! - SetBonusResolver: which set tiers a loadout unlocks
//! - TurnScheduler: speed-ordered rounds
//! - StatusEffectTracker: burn, slow, freeze, taunt and stealth per battle
//! - AbilityResolver: attacks, heals, buffs and debuffs
//! - CombatSession: the battle state machine
//! - LootResolver / ProgressionManager: drops, XP and level-ups after a win

pub mod ability;
pub mod character;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod formula;
pub mod item;
pub mod loot;
pub mod monster;
pub mod prelude;
pub mod progression;
pub mod rng;
pub mod set_bonus;
pub mod snapshot;
pub mod source;
pub mod stat_block;
pub mod status;
pub mod turn;
pub mod types;

// Re-export core types for convenience
pub use ability::{Ability, AbilityCatalog, AbilityKind, AbilityResolver};
pub use character::Character;
pub use combat::{ActionError, BattleOutcome, BattlePhase, BattleResult, BattleView, CombatEvent, CombatSession};
pub use config::{ConfigError, GameData};
pub use item::{EquipError, InstanceId, ItemInstance, Potion};
pub use monster::Monster;
pub use rng::{CombatRng, ScriptedRng};
pub use snapshot::{GameSnapshot, SnapshotError};
pub use stat_block::{combat_stats, effective_stats, CombatStats, EffectiveStats};
pub use types::{CombatantId, EquipSlot, FlatStats, Job, Rarity};
