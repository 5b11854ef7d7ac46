//! Economy: item catalog with buy and sell prices.
//!
//! Every listed item can be sold. Only seed items carry a buy price, so only
//! seeds can be bought from the shop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::plants::PlantDefinition;

/// Economy error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    /// Item cannot be bought
    #[error("{0} cannot be bought")]
    NotPurchasable(String),
    /// Insufficient funds
    #[error("Insufficient funds: need {needed}, have {have}")]
    InsufficientFunds {
        /// Amount needed
        needed: u64,
        /// Amount available
        have: u64,
    },
    /// Item not found in the catalog
    #[error("Item not found in catalog: {0}")]
    ItemNotFound(String),
    /// Inventory rejected the change
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;

/// Shop listing for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListing {
    /// Item name
    pub name: String,
    /// Price to buy one unit, if the shop sells it
    #[serde(default)]
    pub buy_price: Option<u64>,
    /// Price received for selling one unit
    pub sell_price: u64,
}

impl ItemListing {
    /// Creates a listing that can only be sold.
    #[must_use]
    pub fn sell_only(name: &str, sell_price: u64) -> Self {
        Self {
            name: name.to_string(),
            buy_price: None,
            sell_price,
        }
    }

    /// Creates a listing that can be bought and sold.
    #[must_use]
    pub fn new(name: &str, buy_price: u64, sell_price: u64) -> Self {
        Self {
            name: name.to_string(),
            buy_price: Some(buy_price),
            sell_price,
        }
    }
}

/// Catalog of tradeable items, kept in display order.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    listings: Vec<ItemListing>,
    seeds: Vec<(String, PlantDefinition)>,
}

impl ItemCatalog {
    /// Builds a catalog from listings and the plant definitions that name
    /// the seed items.
    #[must_use]
    pub fn new(listings: Vec<ItemListing>, plants: &[PlantDefinition]) -> Self {
        let seeds = plants
            .iter()
            .map(|def| (def.seed_item.clone(), def.clone()))
            .collect();
        Self { listings, seeds }
    }

    /// Gets the listing for an item.
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&ItemListing> {
        self.listings.iter().find(|l| l.name == item)
    }

    /// Returns all listings in display order.
    #[must_use]
    pub fn listings(&self) -> &[ItemListing] {
        &self.listings
    }

    /// Checks whether an item is a seed.
    #[must_use]
    pub fn is_seed(&self, item: &str) -> bool {
        self.seed_definition(item).is_some()
    }

    /// Returns the plant definition grown from a seed item.
    #[must_use]
    pub fn seed_definition(&self, item: &str) -> Option<&PlantDefinition> {
        self.seeds
            .iter()
            .find(|(seed, _)| seed == item)
            .map(|(_, def)| def)
    }

    /// Checks whether the shop sells an item.
    #[must_use]
    pub fn is_purchasable(&self, item: &str) -> bool {
        self.is_seed(item) && self.get(item).is_some_and(|l| l.buy_price.is_some())
    }

    /// Gets the unit buy price of an item.
    pub fn buy_price(&self, item: &str) -> EconomyResult<u64> {
        if !self.is_purchasable(item) {
            return Err(EconomyError::NotPurchasable(item.to_string()));
        }
        self.get(item)
            .and_then(|l| l.buy_price)
            .ok_or_else(|| EconomyError::NotPurchasable(item.to_string()))
    }

    /// Gets the unit sell price of an item.
    pub fn sell_price(&self, item: &str) -> EconomyResult<u64> {
        self.get(item)
            .map(|l| l.sell_price)
            .ok_or_else(|| EconomyError::ItemNotFound(item.to_string()))
    }

    /// Returns the number of listed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Checks if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
