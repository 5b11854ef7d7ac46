//! # Homestead Gameplay
//!
//! Farm rules for Homestead.
//!
//! This crate holds everything that decides what happens in a session:
//! - Tile map parsing and tilling
//! - Plant species and daily growth
//! - Inventory and the item shop
//! - Player energy, money and item selection
//! - The farm model that enforces per-action rules
//! - Key bindings and the session controller that drives it all

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod controller;
pub mod economy;
pub mod farm;
pub mod input;
pub mod inventory;
pub mod map;
pub mod player;
pub mod plants;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::controller::*;
    pub use crate::economy::*;
    pub use crate::farm::*;
    pub use crate::input::*;
    pub use crate::inventory::*;
    pub use crate::map::*;
    pub use crate::player::*;
    pub use crate::plants::*;
}

pub use prelude::*;
