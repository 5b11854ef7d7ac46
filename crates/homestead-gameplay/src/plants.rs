//! Plant growth system.
//!
//! Plants advance one stage per day until they reach their species' final
//! stage, at which point they can be harvested:
//! - Stage counter capped at the species maximum
//! - Display phase derived from the stage for presentation
//! - Harvest yield defined per species

use serde::{Deserialize, Serialize};

/// Crop species that can be planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Potato
    Potato,
    /// Kale
    Kale,
    /// Berry
    Berry,
}

impl Species {
    /// All species.
    pub const ALL: [Self; 3] = [Self::Potato, Self::Kale, Self::Berry];

    /// Get the display name of this species.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Potato => "Potato",
            Self::Kale => "Kale",
            Self::Berry => "Berry",
        }
    }
}

/// Coarse growth phase, derived from the stage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrowthPhase {
    /// Just planted (stage 0).
    #[default]
    Seed,
    /// First half of growth.
    Sprout,
    /// Second half of growth.
    Growing,
    /// Fully grown, can be harvested.
    Mature,
}

impl GrowthPhase {
    /// Get the display name of this phase.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Sprout => "Sprout",
            Self::Growing => "Growing",
            Self::Mature => "Mature",
        }
    }
}

/// Definition of a plantable species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDefinition {
    /// Species being defined.
    pub species: Species,
    /// Inventory item consumed to plant this species.
    pub seed_item: String,
    /// Days from planting to maturity.
    pub max_stage: u32,
    /// Item produced on harvest.
    pub harvest_item: String,
    /// Amount produced per harvest.
    pub harvest_amount: u32,
}

impl PlantDefinition {
    /// Creates a new plant definition.
    #[must_use]
    pub fn new(
        species: Species,
        seed_item: &str,
        max_stage: u32,
        harvest_item: &str,
        harvest_amount: u32,
    ) -> Self {
        Self {
            species,
            seed_item: seed_item.to_string(),
            max_stage,
            harvest_item: harvest_item.to_string(),
            harvest_amount,
        }
    }
}

/// Items produced by a successful harvest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvest {
    /// Item harvested.
    pub item: String,
    /// Amount harvested.
    pub amount: u32,
}

/// A planted crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    species: Species,
    stage: u32,
    max_stage: u32,
    harvest_item: String,
    harvest_amount: u32,
}

impl Plant {
    /// Creates a freshly planted crop at stage 0.
    #[must_use]
    pub fn new(definition: &PlantDefinition) -> Self {
        Self {
            species: definition.species,
            stage: 0,
            max_stage: definition.max_stage,
            harvest_item: definition.harvest_item.clone(),
            harvest_amount: definition.harvest_amount,
        }
    }

    /// Returns the species.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> u32 {
        self.stage
    }

    /// Returns the final stage for this species.
    #[must_use]
    pub const fn max_stage(&self) -> u32 {
        self.max_stage
    }

    /// Grows the plant by one day, stopping at maturity.
    pub fn advance_day(&mut self) {
        self.stage = (self.stage + 1).min(self.max_stage);
    }

    /// Check if this plant can be harvested.
    #[must_use]
    pub const fn is_harvestable(&self) -> bool {
        self.stage == self.max_stage
    }

    /// Returns the yield if the plant is mature.
    #[must_use]
    pub fn harvest_yield(&self) -> Option<Harvest> {
        self.is_harvestable().then(|| Harvest {
            item: self.harvest_item.clone(),
            amount: self.harvest_amount,
        })
    }

    /// Returns the display phase for the current stage.
    #[must_use]
    pub const fn phase(&self) -> GrowthPhase {
        if self.is_harvestable() {
            GrowthPhase::Mature
        } else if self.stage == 0 {
            GrowthPhase::Seed
        } else if self.stage * 2 < self.max_stage {
            GrowthPhase::Sprout
        } else {
            GrowthPhase::Growing
        }
    }
}
