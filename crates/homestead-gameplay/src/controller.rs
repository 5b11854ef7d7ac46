//! Session controller.
//!
//! `FarmController` is the context object a front end drives. It turns key
//! presses into farm actions and shop clicks into player trades, and keeps
//! planting and harvesting as two explicit steps: the model reports success
//! or a yield, then the controller updates the inventory.

use homestead_common::{Direction, HomesteadError, HomesteadResult, MapResult, Position};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::FarmConfig;
use crate::economy::ItemCatalog;
use crate::farm::FarmModel;
use crate::input::{Action, KeyBindings};
use crate::map::{Map, Tile};
use crate::plants::{GrowthPhase, Harvest, Plant, Species};

/// Values shown in the info bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoBar {
    /// Days elapsed
    pub day: u32,
    /// Player's money
    pub money: u64,
    /// Player's remaining energy
    pub energy: u32,
}

/// How an item entry should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemViewState {
    /// Currently selected for planting
    Selected,
    /// Held but not selected
    Unselected,
    /// None held
    Empty,
}

/// One row of the inventory/shop panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Item name
    pub name: String,
    /// Amount held
    pub amount: u32,
    /// Price when selling one
    pub sell_price: u64,
    /// Price when buying one, if the shop sells it
    pub buy_price: Option<u64>,
    /// Highlight state
    pub state: ItemViewState,
}

/// A plant as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantView {
    /// Where the plant is
    pub position: Position,
    /// What it is
    pub species: Species,
    /// Days grown
    pub stage: u32,
    /// Stage at which it can be harvested
    pub max_stage: u32,
    /// Display phase
    pub phase: GrowthPhase,
}

/// Read-only picture of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmSnapshot {
    /// Info bar values
    pub info: InfoBar,
    /// Map rows as text
    pub map: Vec<String>,
    /// Player position
    pub player_position: Position,
    /// Player facing
    pub player_direction: Direction,
    /// Selected item
    pub selected_item: Option<String>,
    /// Planted crops, ordered by position
    pub plants: Vec<PlantView>,
    /// Inventory/shop rows
    pub items: Vec<ItemView>,
}

/// Drives one play session.
#[derive(Debug, Clone)]
pub struct FarmController {
    model: FarmModel,
    catalog: ItemCatalog,
    bindings: KeyBindings,
}

impl FarmController {
    /// Starts a session on a map with the given config.
    pub fn new(map: Map, config: &FarmConfig) -> HomesteadResult<Self> {
        config
            .validate()
            .map_err(|e| HomesteadError::Config(e.to_string()))?;
        let model = FarmModel::new(map, config)?;
        info!(
            "Farm ready: {}x{} map, player at {}",
            model.dimensions().0,
            model.dimensions().1,
            model.player_position()
        );
        Ok(Self {
            model,
            catalog: config.catalog(),
            bindings: KeyBindings::new(),
        })
    }

    /// Returns the farm model.
    #[must_use]
    pub const fn model(&self) -> &FarmModel {
        &self.model
    }

    /// Returns the key bindings.
    #[must_use]
    pub const fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Returns the key bindings for rebinding.
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Handles a key press.
    ///
    /// Unbound keys are ignored. Returns whether an action took effect.
    pub fn handle_key(&mut self, key: char) -> MapResult<bool> {
        match self.bindings.action_for(key) {
            Some(action) => self.perform(action),
            None => {
                debug!("Ignoring unbound key {key:?}");
                Ok(false)
            },
        }
    }

    /// Performs an action at the player's position.
    ///
    /// Returns whether it took effect.
    pub fn perform(&mut self, action: Action) -> MapResult<bool> {
        let here = self.model.player_position();
        match action {
            Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => {
                Ok(action
                    .direction()
                    .is_some_and(|direction| self.model.move_player(direction)))
            },
            Action::Till => self.model.till_soil(here),
            Action::Untill => self.model.untill_soil(here),
            Action::Plant => self.plant_selected(),
            Action::Harvest => Ok(self.harvest_here()?.is_some()),
            Action::RemovePlant => Ok(self.model.remove_plant(here)?.is_some()),
            Action::NextDay => {
                self.next_day();
                Ok(true)
            },
        }
    }

    /// Plants the selected seed under the player.
    ///
    /// One seed is removed only after the model accepts the plant.
    pub fn plant_selected(&mut self) -> MapResult<bool> {
        let here = self.model.player_position();
        let Some(seed) = self.model.player().selected_item().map(str::to_string) else {
            debug!("Nothing selected to plant");
            return Ok(false);
        };
        let Some(definition) = self.catalog.seed_definition(&seed) else {
            debug!("{seed} is not a seed");
            return Ok(false);
        };
        if self.model.map().tile_at(here)? != Tile::Soil {
            debug!("Cannot plant {seed} at {here}: not soil");
            return Ok(false);
        }
        if !self.model.player().inventory().has(&seed, 1) {
            return Ok(false);
        }

        let plant = Plant::new(definition);
        if !self.model.add_plant(here, plant)? {
            return Ok(false);
        }
        if let Err(e) = self.model.player_mut().remove_item(&seed, 1) {
            debug!("Planted {seed} but could not remove it: {e}");
        }
        Ok(true)
    }

    /// Harvests the plant under the player and credits the yield.
    pub fn harvest_here(&mut self) -> MapResult<Option<Harvest>> {
        let here = self.model.player_position();
        let Some(harvest) = self.model.harvest_plant(here)? else {
            return Ok(None);
        };
        if let Err(e) = self
            .model
            .player_mut()
            .add_item(&harvest.item, harvest.amount)
        {
            debug!("Harvested {} but could not store it: {e}", harvest.item);
        }
        Ok(Some(harvest))
    }

    /// Selects an inventory item. Items with none held are ignored.
    pub fn select_item(&mut self, item: &str) -> bool {
        self.model.player_mut().select_item(item)
    }

    /// Buys one unit of an item at the catalog price.
    pub fn buy_item(&mut self, item: &str) -> bool {
        let result = self.catalog.buy_price(item).and_then(|price| {
            self.model
                .player_mut()
                .buy(&self.catalog, item, price)
                .map(|()| price)
        });
        match result {
            Ok(price) => {
                info!("Bought {item} for ${price}");
                true
            },
            Err(e) => {
                debug!("Cannot buy {item}: {e}");
                false
            },
        }
    }

    /// Sells one unit of an item at the catalog price.
    pub fn sell_item(&mut self, item: &str) -> bool {
        let result = self.catalog.sell_price(item).and_then(|price| {
            self.model
                .player_mut()
                .sell(item, price)
                .map(|()| price)
        });
        match result {
            Ok(price) => {
                info!("Sold {item} for ${price}");
                true
            },
            Err(e) => {
                debug!("Cannot sell {item}: {e}");
                false
            },
        }
    }

    /// Advances to the next day.
    pub fn next_day(&mut self) {
        self.model.new_day();
    }

    /// Returns the info bar values.
    #[must_use]
    pub fn info_bar(&self) -> InfoBar {
        let player = self.model.player();
        InfoBar {
            day: self.model.days_elapsed(),
            money: player.money(),
            energy: player.energy(),
        }
    }

    /// Returns one view per catalog item, in catalog order.
    #[must_use]
    pub fn item_views(&self) -> Vec<ItemView> {
        let player = self.model.player();
        self.catalog
            .listings()
            .iter()
            .map(|listing| {
                let amount = player.inventory().count(&listing.name);
                let state = if amount == 0 {
                    ItemViewState::Empty
                } else if player.selected_item() == Some(listing.name.as_str()) {
                    ItemViewState::Selected
                } else {
                    ItemViewState::Unselected
                };
                ItemView {
                    name: listing.name.clone(),
                    amount,
                    sell_price: listing.sell_price,
                    buy_price: self
                        .catalog
                        .is_purchasable(&listing.name)
                        .then_some(listing.buy_price)
                        .flatten(),
                    state,
                }
            })
            .collect()
    }

    /// Captures everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> FarmSnapshot {
        let mut plants: Vec<PlantView> = self
            .model
            .plants()
            .iter()
            .map(|(&position, plant)| PlantView {
                position,
                species: plant.species(),
                stage: plant.stage(),
                max_stage: plant.max_stage(),
                phase: plant.phase(),
            })
            .collect();
        plants.sort_by_key(|p| p.position);

        FarmSnapshot {
            info: self.info_bar(),
            map: self.model.map().rows(),
            player_position: self.model.player_position(),
            player_direction: self.model.player_direction(),
            selected_item: self.model.player().selected_item().map(str::to_string),
            plants,
            items: self.item_views(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(text: &str, start: (usize, usize)) -> FarmController {
        let config = FarmConfig {
            start_position: start.into(),
            ..FarmConfig::default()
        };
        FarmController::new(Map::parse(text).expect("valid map"), &config).expect("valid setup")
    }

    fn count(c: &FarmController, item: &str) -> u32 {
        c.model().player().inventory().count(item)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = FarmConfig::default();
        config.items.clear();
        let map = Map::parse("UU").expect("valid map");
        assert!(matches!(
            FarmController::new(map, &config),
            Err(HomesteadError::Config(_))
        ));
    }

    #[test]
    fn test_keys_drive_model() {
        let mut c = controller("UUU\nUUU", (0, 0));
        assert_eq!(c.handle_key('d'), Ok(true));
        assert_eq!(c.model().player_position(), Position::new(0, 1));
        assert_eq!(c.handle_key('w'), Ok(false));
        assert_eq!(c.handle_key('t'), Ok(true));
        assert_eq!(c.model().map().tile_at(Position::new(0, 1)), Ok(Tile::Soil));
        assert_eq!(c.handle_key('?'), Ok(false));
    }

    #[test]
    fn test_plant_consumes_one_seed() {
        let mut c = controller("S", (0, 0));
        assert!(c.select_item("Potato Seed"));
        assert_eq!(c.plant_selected(), Ok(true));
        assert_eq!(count(&c, "Potato Seed"), 4);

        // Tile is occupied now; no seed is taken.
        assert_eq!(c.plant_selected(), Ok(false));
        assert_eq!(count(&c, "Potato Seed"), 4);
    }

    #[test]
    fn test_plant_requires_selection_and_soil() {
        let mut c = controller("U", (0, 0));
        assert_eq!(c.plant_selected(), Ok(false));

        assert!(c.select_item("Kale Seed"));
        assert_eq!(c.plant_selected(), Ok(false));
        assert_eq!(count(&c, "Kale Seed"), 3);
    }

    #[test]
    fn test_plant_non_seed_selected() {
        let mut c = controller("S", (0, 0));
        c.model.player_mut().add_item("Potato", 1).expect("positive amount");
        assert!(c.select_item("Potato"));
        assert_eq!(c.plant_selected(), Ok(false));
        assert!(c.model().plants().is_empty());
    }

    #[test]
    fn test_last_seed_clears_selection() {
        let mut c = controller("S", (0, 0));
        assert!(c.select_item("Berry Seed"));
        assert_eq!(c.handle_key('p'), Ok(true));
        assert_eq!(count(&c, "Berry Seed"), 0);
        assert_eq!(c.model().player().selected_item(), None);

        let berry = c
            .item_views()
            .into_iter()
            .find(|v| v.name == "Berry Seed")
            .expect("listed");
        assert_eq!(berry.state, ItemViewState::Empty);
    }

    #[test]
    fn test_harvest_credits_inventory() {
        let mut c = controller("UU", (0, 0));
        assert_eq!(c.handle_key('t'), Ok(true));
        assert!(c.select_item("Potato Seed"));
        assert_eq!(c.handle_key('p'), Ok(true));

        assert_eq!(c.harvest_here(), Ok(None));
        assert_eq!(count(&c, "Potato"), 0);

        for _ in 0..3 {
            assert_eq!(c.handle_key('n'), Ok(true));
        }
        let harvest = c.harvest_here().expect("on map").expect("mature");
        assert_eq!(harvest.amount, 2);
        assert_eq!(count(&c, "Potato"), 2);
        assert!(c.model().plants().is_empty());
    }

    #[test]
    fn test_remove_plant_key() {
        let mut c = controller("S", (0, 0));
        assert!(c.select_item("Kale Seed"));
        assert_eq!(c.handle_key('p'), Ok(true));
        assert_eq!(c.handle_key('r'), Ok(true));
        assert!(c.model().plants().is_empty());
        assert_eq!(c.handle_key('r'), Ok(false));
        assert_eq!(count(&c, "Kale"), 0);
    }

    #[test]
    fn test_shop() {
        let mut c = controller("U", (0, 0));
        assert!(!c.buy_item("Potato Seed"));
        assert_eq!(c.info_bar().money, 0);

        assert!(c.sell_item("Potato Seed"));
        assert!(c.sell_item("Potato Seed"));
        assert!(c.sell_item("Potato Seed"));
        assert_eq!(c.info_bar().money, 6);
        assert!(c.buy_item("Potato Seed"));
        assert_eq!(c.info_bar().money, 1);
        assert_eq!(count(&c, "Potato Seed"), 3);

        assert!(!c.buy_item("Potato"));
        assert!(!c.sell_item("Potato"));
        assert!(!c.sell_item("Pumpkin"));
        assert_eq!(c.info_bar().money, 1);
    }

    #[test]
    fn test_item_views() {
        let mut c = controller("U", (0, 0));
        assert!(c.select_item("Kale Seed"));
        let views = c.item_views();
        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            ["Potato Seed", "Kale Seed", "Berry Seed", "Potato", "Kale", "Berry"]
        );
        assert_eq!(views[0].state, ItemViewState::Unselected);
        assert_eq!(views[1].state, ItemViewState::Selected);
        assert_eq!(views[3].state, ItemViewState::Empty);
        assert_eq!(views[0].buy_price, Some(5));
        assert_eq!(views[3].buy_price, None);
    }

    #[test]
    fn test_snapshot() {
        let mut c = controller("SU\nUU", (0, 0));
        assert!(c.select_item("Potato Seed"));
        assert_eq!(c.handle_key('p'), Ok(true));
        assert_eq!(c.handle_key('s'), Ok(true));
        c.next_day();

        let snap = c.snapshot();
        assert_eq!(snap.info, InfoBar { day: 1, money: 0, energy: 100 });
        assert_eq!(snap.map, vec!["SU".to_string(), "UU".to_string()]);
        assert_eq!(snap.player_position, Position::new(1, 0));
        assert_eq!(snap.player_direction, Direction::Down);
        assert_eq!(snap.selected_item.as_deref(), Some("Potato Seed"));
        assert_eq!(snap.plants.len(), 1);
        assert_eq!(snap.plants[0].stage, 1);
        assert_eq!(snap.plants[0].max_stage, 3);
        assert_eq!(snap.plants[0].phase, GrowthPhase::Sprout);
    }
}
