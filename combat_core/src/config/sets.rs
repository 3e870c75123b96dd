//! Set bonus table loading

use super::ConfigError;
use crate::set_bonus::{EquipmentSet, SetBonusTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetsConfig {
    pub sets: Vec<EquipmentSet>,
}

pub fn load_set_bonuses(path: &Path) -> Result<SetBonusTable, ConfigError> {
    let config: SetsConfig = super::load_toml(path)?;
    SetBonusTable::from_sets(config.sets)
}

pub fn parse_set_bonuses(content: &str) -> Result<SetBonusTable, ConfigError> {
    let config: SetsConfig = super::parse_toml(content)?;
    SetBonusTable::from_sets(config.sets)
}
