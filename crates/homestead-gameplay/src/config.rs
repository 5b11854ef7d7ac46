//! Static game configuration.
//!
//! Species growth tables, shop prices, per-action energy costs and the
//! player's starting state. Every field has a default so a partial config
//! file only overrides what it names.

use homestead_common::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::economy::{ItemCatalog, ItemListing};
use crate::plants::{PlantDefinition, Species};

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An item is referenced but has no shop listing
    #[error("{context} references unlisted item {item}")]
    UnlistedItem {
        /// Where the reference came from
        context: String,
        /// Item name
        item: String,
    },
    /// A non-seed item has a buy price
    #[error("{0} has a buy price but is not a seed")]
    BuyableNonSeed(String),
    /// The same species is defined twice
    #[error("{0:?} is defined more than once")]
    DuplicateSpecies(Species),
    /// A species yields nothing when harvested
    #[error("{0:?} has a harvest amount of zero")]
    EmptyHarvest(Species),
}

/// Energy spent by each player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyCosts {
    /// One step in any direction
    pub movement: u32,
    /// Tilling or untilling a tile
    pub till: u32,
    /// Planting a seed
    pub plant: u32,
    /// Harvesting a mature plant
    pub harvest: u32,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        Self {
            movement: 1,
            till: 2,
            plant: 2,
            harvest: 2,
        }
    }
}

/// Gameplay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    /// Money the player starts with
    pub starting_money: u64,
    /// Energy restored every morning
    pub max_energy: u32,
    /// Where the player starts on the map
    pub start_position: Position,
    /// Items the player starts with
    pub starting_inventory: BTreeMap<String, u32>,
    /// Per-action energy costs
    pub energy_costs: EnergyCosts,
    /// Shop listings, in display order
    pub items: Vec<ItemListing>,
    /// Plantable species
    pub plants: Vec<PlantDefinition>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            starting_money: 0,
            max_energy: 100,
            start_position: Position::new(0, 0),
            starting_inventory: [("Potato Seed", 5), ("Kale Seed", 3), ("Berry Seed", 1)]
                .into_iter()
                .map(|(name, n)| (name.to_string(), n))
                .collect(),
            energy_costs: EnergyCosts::default(),
            items: vec![
                ItemListing::new("Potato Seed", 5, 2),
                ItemListing::new("Kale Seed", 10, 5),
                ItemListing::new("Berry Seed", 15, 7),
                ItemListing::sell_only("Potato", 10),
                ItemListing::sell_only("Kale", 20),
                ItemListing::sell_only("Berry", 35),
            ],
            plants: vec![
                PlantDefinition::new(Species::Potato, "Potato Seed", 3, "Potato", 2),
                PlantDefinition::new(Species::Kale, "Kale Seed", 4, "Kale", 1),
                PlantDefinition::new(Species::Berry, "Berry Seed", 5, "Berry", 3),
            ],
        }
    }
}

impl FarmConfig {
    /// Checks that every referenced item is listed and only seeds are sold
    /// by the shop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let listed = |item: &str| self.items.iter().any(|l| l.name == item);
        let unlisted = |context: String, item: &str| ConfigError::UnlistedItem {
            context,
            item: item.to_string(),
        };

        for (i, def) in self.plants.iter().enumerate() {
            if self.plants[..i].iter().any(|d| d.species == def.species) {
                return Err(ConfigError::DuplicateSpecies(def.species));
            }
            if def.harvest_amount == 0 {
                return Err(ConfigError::EmptyHarvest(def.species));
            }
            let context = format!("{} definition", def.species.display_name());
            if !listed(&def.seed_item) {
                return Err(unlisted(context, &def.seed_item));
            }
            if !listed(&def.harvest_item) {
                return Err(unlisted(context, &def.harvest_item));
            }
        }

        for item in self.starting_inventory.keys() {
            if !listed(item) {
                return Err(unlisted("starting inventory".to_string(), item));
            }
        }

        for listing in &self.items {
            let is_seed = self.plants.iter().any(|d| d.seed_item == listing.name);
            if listing.buy_price.is_some() && !is_seed {
                return Err(ConfigError::BuyableNonSeed(listing.name.clone()));
            }
        }
        Ok(())
    }

    /// Builds the shop catalog described by this config.
    #[must_use]
    pub fn catalog(&self) -> ItemCatalog {
        ItemCatalog::new(self.items.clone(), &self.plants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FarmConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.max_energy, 100);
        assert_eq!(config.starting_money, 0);
    }

    #[test]
    fn test_default_species() {
        let config = FarmConfig::default();
        for species in Species::ALL {
            assert!(config.plants.iter().any(|d| d.species == species));
        }
        let catalog = config.catalog();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.is_purchasable("Berry Seed"));
        assert!(!catalog.is_purchasable("Berry"));
    }

    #[test]
    fn test_unlisted_harvest_item() {
        let mut config = FarmConfig::default();
        config.items.retain(|l| l.name != "Kale");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnlistedItem { item, .. }) if item == "Kale"
        ));
    }

    #[test]
    fn test_unlisted_starting_item() {
        let mut config = FarmConfig::default();
        config.starting_inventory.insert("Shovel".to_string(), 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnlistedItem { item, .. }) if item == "Shovel"
        ));
    }

    #[test]
    fn test_buyable_crop_rejected() {
        let mut config = FarmConfig::default();
        config.items.push(ItemListing::new("Pumpkin", 30, 60));
        assert_eq!(
            config.validate(),
            Err(ConfigError::BuyableNonSeed("Pumpkin".to_string()))
        );
    }

    #[test]
    fn test_empty_harvest() {
        let mut config = FarmConfig::default();
        config.plants[2].harvest_amount = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyHarvest(Species::Berry))
        );
    }

    #[test]
    fn test_duplicate_species() {
        let mut config = FarmConfig::default();
        let extra = config.plants[0].clone();
        config.plants.push(extra);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateSpecies(Species::Potato))
        );
    }
}
