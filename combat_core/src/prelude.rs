//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::character::Character;
pub use crate::monster::Monster;
pub use crate::types::{CombatantId, EquipSlot, FlatStats, Job, Rarity};

// Stats
pub use crate::set_bonus::{active_bonuses, ActiveSetBonus, SetBonusTable};
pub use crate::stat_block::{combat_stats, effective_stats, stat_sheet, CombatStats, EffectiveStats};

// Combat
pub use crate::combat::{ActionError, BattlePhase, BattleResult, BattleView, CombatEvent, CombatSession};
pub use crate::rng::{CombatRng, ScriptedRng};
pub use crate::status::{StatusEffect, StatusEffectTracker};

// Items and saves
pub use crate::item::{EquipError, InstanceId, ItemInstance, Potion};
pub use crate::snapshot::GameSnapshot;

// Config
pub use crate::config::GameData;
