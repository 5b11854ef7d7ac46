//! Inventory system.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Quantity must be positive
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    /// Not enough items
    #[error("Not enough {item}: need {needed}, have {have}")]
    InsufficientQuantity {
        /// Item name
        item: String,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Item counts keyed by item name.
///
/// Counts never go negative. An item removed down to zero keeps its entry so
/// the presentation layer can still show it as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of a specific item.
    #[must_use]
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Checks if the inventory contains at least the given amount.
    #[must_use]
    pub fn has(&self, item: &str, amount: u32) -> bool {
        self.count(item) >= amount
    }

    /// Checks if the item has an entry, even an empty one.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// Adds items to the inventory.
    pub fn add(&mut self, item: &str, amount: u32) -> InventoryResult<()> {
        if amount == 0 {
            return Err(InventoryError::InvalidQuantity(amount));
        }
        let count = self.items.entry(item.to_string()).or_insert(0);
        *count = count.saturating_add(amount);
        Ok(())
    }

    /// Removes items from the inventory.
    pub fn remove(&mut self, item: &str, amount: u32) -> InventoryResult<()> {
        if amount == 0 {
            return Err(InventoryError::InvalidQuantity(amount));
        }
        let current = self.count(item);
        if current < amount {
            return Err(InventoryError::InsufficientQuantity {
                item: item.to_string(),
                needed: amount,
                have: current,
            });
        }
        self.items.insert(item.to_string(), current - amount);
        Ok(())
    }

    /// Returns the number of item entries, empty ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the inventory has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

}

impl<S: Into<String>> FromIterator<(S, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|(name, n)| (name.into(), n)).collect(),
        }
    }
}
