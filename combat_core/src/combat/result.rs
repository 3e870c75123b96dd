//! BattleResult - How a battle ended and what it paid out

use crate::item::{ItemInstance, Potion};
use crate::progression::LevelUp;
use serde::{Deserialize, Serialize};

/// Rewards of a won battle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// XP awarded to every party member
    pub xp: u32,
    pub gold: u32,
    pub equipment: Vec<ItemInstance>,
    pub potions: Vec<Potion>,
    pub level_ups: Vec<LevelUp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BattleResult {
    Victory(Rewards),
    Defeat,
    Fled,
}

impl BattleResult {
    pub fn is_victory(&self) -> bool {
        matches!(self, BattleResult::Victory(_))
    }

    pub fn rewards(&self) -> Option<&Rewards> {
        match self {
            BattleResult::Victory(rewards) => Some(rewards),
            _ => None,
        }
    }

    /// Get a summary string of the result
    pub fn summary(&self) -> String {
        match self {
            BattleResult::Victory(rewards) => {
                format!("Victory! +{} XP, +{} Gold", rewards.xp, rewards.gold)
            }
            BattleResult::Defeat => "The party has been defeated...".to_string(),
            BattleResult::Fled => "The party fled from battle.".to_string(),
        }
    }
}
