//! Potion catalog loading

use super::ConfigError;
use crate::item::{Potion, PotionCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotionsConfig {
    pub potions: Vec<Potion>,
}

pub fn load_potions(path: &Path) -> Result<PotionCatalog, ConfigError> {
    let config: PotionsConfig = super::load_toml(path)?;
    Ok(PotionCatalog::new(config.potions))
}

pub fn parse_potions(content: &str) -> Result<PotionCatalog, ConfigError> {
    let config: PotionsConfig = super::parse_toml(content)?;
    Ok(PotionCatalog::new(config.potions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_potions_load() {
        let catalog = parse_potions(include_str!("../../config/potions.toml")).unwrap();
        assert_eq!(catalog.len(), 8);
        let elixir = catalog.get("elixir").unwrap();
        assert_eq!((elixir.hp, elixir.mp), (50, 25));
        assert_eq!(catalog.get("mana_potion").unwrap().hp, 0);
    }
}
