//! Monster template loading

use super::ConfigError;
use crate::monster::{MonsterCatalog, MonsterTemplate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonstersConfig {
    pub monsters: Vec<MonsterTemplate>,
}

pub fn load_monsters(path: &Path) -> Result<MonsterCatalog, ConfigError> {
    let config: MonstersConfig = super::load_toml(path)?;
    build(config)
}

pub fn parse_monsters(content: &str) -> Result<MonsterCatalog, ConfigError> {
    let config: MonstersConfig = super::parse_toml(content)?;
    build(config)
}

fn build(config: MonstersConfig) -> Result<MonsterCatalog, ConfigError> {
    if let Some(bad) = config.monsters.iter().find(|m| m.hp <= 0) {
        return Err(ConfigError::ValidationError(format!(
            "monster '{}' must have positive HP",
            bad.id
        )));
    }
    Ok(MonsterCatalog::new(config.monsters))
}
