//! Configuration loading from TOML files

mod abilities;
mod constants;
mod equipment;
mod monsters;
mod potions;
mod sets;

pub use abilities::{load_abilities, parse_abilities};
pub use constants::{
    CombatConstants, EncounterConstants, GameConstants, JobGrowth, LootConstants, PotionWeights,
    ProgressionConstants,
};
pub use equipment::{load_equipment, parse_equipment};
pub use monsters::{load_monsters, parse_monsters};
pub use potions::{load_potions, parse_potions};
pub use sets::{load_set_bonuses, parse_set_bonuses};

use crate::ability::AbilityCatalog;
use crate::item::{EquipmentCatalog, PotionCatalog};
use crate::monster::MonsterCatalog;
use crate::set_bonus::SetBonusTable;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

const ABILITIES_TOML: &str = include_str!("../../config/abilities.toml");
const CONSTANTS_TOML: &str = include_str!("../../config/constants.toml");
const EQUIPMENT_TOML: &str = include_str!("../../config/equipment.toml");
const MONSTERS_TOML: &str = include_str!("../../config/monsters.toml");
const POTIONS_TOML: &str = include_str!("../../config/potions.toml");
const SET_BONUSES_TOML: &str = include_str!("../../config/set_bonuses.toml");

/// Every static table the engine reads. Shared read-only by sessions.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub constants: GameConstants,
    pub abilities: AbilityCatalog,
    pub sets: SetBonusTable,
    pub equipment: EquipmentCatalog,
    pub monsters: MonsterCatalog,
    pub potions: PotionCatalog,
}

impl GameData {
    /// The tables bundled with the crate
    pub fn load_default() -> Result<Self, ConfigError> {
        let data = GameData {
            constants: parse_toml(CONSTANTS_TOML)?,
            abilities: parse_abilities(ABILITIES_TOML)?,
            sets: parse_set_bonuses(SET_BONUSES_TOML)?,
            equipment: parse_equipment(EQUIPMENT_TOML)?,
            monsters: parse_monsters(MONSTERS_TOML)?,
            potions: parse_potions(POTIONS_TOML)?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Load from a directory holding the same file names as `config/`.
    /// Missing files fall back to the bundled tables.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let read = |name: &str, bundled: &'static str| -> Result<String, ConfigError> {
            let path = dir.join(name);
            if path.exists() {
                Ok(fs::read_to_string(path)?)
            } else {
                Ok(bundled.to_string())
            }
        };

        let data = GameData {
            constants: parse_toml(&read("constants.toml", CONSTANTS_TOML)?)?,
            abilities: parse_abilities(&read("abilities.toml", ABILITIES_TOML)?)?,
            sets: parse_set_bonuses(&read("set_bonuses.toml", SET_BONUSES_TOML)?)?,
            equipment: parse_equipment(&read("equipment.toml", EQUIPMENT_TOML)?)?,
            monsters: parse_monsters(&read("monsters.toml", MONSTERS_TOML)?)?,
            potions: parse_potions(&read("potions.toml", POTIONS_TOML)?)?,
        };
        data.validate()?;
        info!(dir = %dir.display(), "loaded game data");
        Ok(data)
    }

    /// Cross-table checks
    fn validate(&self) -> Result<(), ConfigError> {
        for item in self.equipment.iter() {
            if let Some(set) = &item.set {
                if self.sets.get(set).is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "item '{}' references unknown set '{}'",
                        item.id, set
                    )));
                }
            }
        }
        Ok(())
    }
}
