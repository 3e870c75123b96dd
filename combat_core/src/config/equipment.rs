//! Equipment template loading

use super::ConfigError;
use crate::item::{EquipmentCatalog, EquipmentTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub items: Vec<EquipmentTemplate>,
}

pub fn load_equipment(path: &Path) -> Result<EquipmentCatalog, ConfigError> {
    let config: EquipmentConfig = super::load_toml(path)?;
    build(config)
}

pub fn parse_equipment(content: &str) -> Result<EquipmentCatalog, ConfigError> {
    let config: EquipmentConfig = super::parse_toml(content)?;
    build(config)
}

fn build(config: EquipmentConfig) -> Result<EquipmentCatalog, ConfigError> {
    let mut seen = HashSet::new();
    for item in &config.items {
        if !seen.insert(item.id.as_str()) {
            return Err(ConfigError::ValidationError(format!("duplicate item '{}'", item.id)));
        }
        if item.allowed_jobs.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "item '{}' has no allowed jobs",
                item.id
            )));
        }
    }
    Ok(EquipmentCatalog::new(config.items))
}
