//! Ability catalog loading

use super::ConfigError;
use crate::ability::{Ability, AbilityCatalog, AbilityKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    pub abilities: Vec<Ability>,
}

pub fn load_abilities(path: &Path) -> Result<AbilityCatalog, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    build(config)
}

pub fn parse_abilities(content: &str) -> Result<AbilityCatalog, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    build(config)
}

fn build(config: AbilitiesConfig) -> Result<AbilityCatalog, ConfigError> {
    let mut seen = HashSet::new();
    for ability in &config.abilities {
        if !seen.insert(ability.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate ability '{}'",
                ability.id
            )));
        }
        if ability.mp_cost < 0 {
            return Err(ConfigError::ValidationError(format!(
                "ability '{}' has a negative MP cost",
                ability.id
            )));
        }
        let power = match ability.kind {
            AbilityKind::Attack { power, .. } | AbilityKind::Heal { power, .. } => power,
            _ => 0.0,
        };
        if !power.is_finite() || power < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "ability '{}' has invalid power {}",
                ability.id, power
            )));
        }
    }
    Ok(AbilityCatalog::new(config.abilities))
}
