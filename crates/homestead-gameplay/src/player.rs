//! Player state: position, facing, energy, money and inventory.
//!
//! Every operation either fully applies or returns an error and leaves the
//! player untouched.

use homestead_common::{Direction, Position};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::economy::{EconomyError, EconomyResult, ItemCatalog};
use crate::inventory::{Inventory, InventoryResult};

/// Errors that can occur in the player system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// Not enough energy left today
    #[error("Insufficient energy: need {needed}, have {have}")]
    InsufficientEnergy {
        /// Energy the action costs
        needed: u32,
        /// Energy remaining
        have: u32,
    },
}

/// The farmer.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    position: Position,
    direction: Direction,
    energy: u32,
    max_energy: u32,
    money: u64,
    selected_item: Option<String>,
    inventory: Inventory,
}

impl Player {
    /// Creates a player with full energy, facing down.
    #[must_use]
    pub fn new(position: Position, max_energy: u32, money: u64, inventory: Inventory) -> Self {
        Self {
            position,
            direction: Direction::default(),
            energy: max_energy,
            max_energy,
            money,
            selected_item: None,
            inventory,
        }
    }

    /// Returns the player's grid position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the direction the player faces.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the remaining energy.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Returns the player's money.
    #[must_use]
    pub const fn money(&self) -> u64 {
        self.money
    }

    /// Returns the selected item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    /// Returns the player's inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Adds items to the inventory.
    pub fn add_item(&mut self, item: &str, amount: u32) -> InventoryResult<()> {
        self.inventory.add(item, amount)
    }

    /// Removes items from the inventory.
    ///
    /// Selection is dropped once the selected item runs out.
    pub fn remove_item(&mut self, item: &str, amount: u32) -> InventoryResult<()> {
        self.inventory.remove(item, amount)?;
        if self.inventory.count(item) == 0 && self.selected_item.as_deref() == Some(item) {
            self.selected_item = None;
        }
        Ok(())
    }

    /// Selects an item the player holds at least one of.
    ///
    /// Returns false and keeps the previous selection otherwise.
    pub fn select_item(&mut self, item: &str) -> bool {
        if self.inventory.count(item) == 0 {
            debug!("Cannot select {item}: none held");
            return false;
        }
        self.selected_item = Some(item.to_string());
        true
    }

    /// Buys one unit of a seed item.
    pub fn buy(&mut self, catalog: &ItemCatalog, item: &str, unit_price: u64) -> EconomyResult<()> {
        if !catalog.is_purchasable(item) {
            return Err(EconomyError::NotPurchasable(item.to_string()));
        }
        if self.money < unit_price {
            return Err(EconomyError::InsufficientFunds {
                needed: unit_price,
                have: self.money,
            });
        }
        self.inventory.add(item, 1)?;
        self.money -= unit_price;
        Ok(())
    }

    /// Sells one unit of an item.
    pub fn sell(&mut self, item: &str, unit_price: u64) -> EconomyResult<()> {
        self.remove_item(item, 1)?;
        self.money = self.money.saturating_add(unit_price);
        Ok(())
    }

    /// Spends energy on an action.
    pub fn spend_energy(&mut self, cost: u32) -> Result<(), PlayerError> {
        if self.energy < cost {
            return Err(PlayerError::InsufficientEnergy {
                needed: cost,
                have: self.energy,
            });
        }
        self.energy -= cost;
        Ok(())
    }

    /// Restores energy to its daily maximum.
    pub fn restore_energy(&mut self) {
        self.energy = self.max_energy;
    }

    pub(crate) fn move_to(&mut self, position: Position, direction: Direction) {
        self.position = position;
        self.direction = direction;
    }
}
