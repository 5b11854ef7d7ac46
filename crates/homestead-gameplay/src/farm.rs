//! Farm model: the single source of truth for a play session.
//!
//! `FarmModel` owns the map, the player and every planted crop, and enforces
//! the rules for each player action. Rule violations (too tired, wrong tile,
//! nothing to harvest) are ordinary outcomes reported as `false` or `None`.
//! Only positions outside the map are errors.
//!
//! Planting and harvesting never touch the inventory. The caller removes the
//! seed after a successful `add_plant` and credits the yield returned by
//! `harvest_plant`.

use homestead_common::{Direction, MapResult, Position};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{EnergyCosts, FarmConfig};
use crate::map::{Map, Tile};
use crate::plants::{Harvest, Plant};
use crate::player::Player;

/// Central farm state.
#[derive(Debug, Clone)]
pub struct FarmModel {
    map: Map,
    player: Player,
    plants: HashMap<Position, Plant>,
    days_elapsed: u32,
    costs: EnergyCosts,
}

impl FarmModel {
    /// Creates a farm from a parsed map and the gameplay config.
    ///
    /// Fails if the configured start position is off the map.
    pub fn new(map: Map, config: &FarmConfig) -> MapResult<Self> {
        map.check_bounds(config.start_position)?;
        let inventory = config
            .starting_inventory
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        let player = Player::new(
            config.start_position,
            config.max_energy,
            config.starting_money,
            inventory,
        );
        Ok(Self::with_player(map, player, config.energy_costs))
    }

    /// Creates a farm around an existing player.
    #[must_use]
    pub fn with_player(map: Map, player: Player, costs: EnergyCosts) -> Self {
        Self {
            map,
            player,
            plants: HashMap::new(),
            days_elapsed: 0,
            costs,
        }
    }

    /// Returns the map.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Returns (rows, cols) of the map.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        self.map.dimensions()
    }

    /// Returns a reference to the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns a mutable reference to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Returns the player's position.
    #[must_use]
    pub const fn player_position(&self) -> Position {
        self.player.position()
    }

    /// Returns the direction the player faces.
    #[must_use]
    pub const fn player_direction(&self) -> Direction {
        self.player.direction()
    }

    /// Returns every planted crop by position.
    #[must_use]
    pub const fn plants(&self) -> &HashMap<Position, Plant> {
        &self.plants
    }

    /// Returns the plant at a position, if any.
    #[must_use]
    pub fn plant_at(&self, position: Position) -> Option<&Plant> {
        self.plants.get(&position)
    }

    /// Returns the number of days that have passed.
    #[must_use]
    pub const fn days_elapsed(&self) -> u32 {
        self.days_elapsed
    }

    /// Moves the player one tile.
    ///
    /// Returns false, changing nothing, when the step leaves the map or the
    /// player is out of energy.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let Some(target) = self.player.position().step(direction, self.dimensions()) else {
            debug!("Move {} blocked by map edge", direction.display_name());
            return false;
        };
        if !self.spend(self.costs.movement, "move") {
            return false;
        }
        self.player.move_to(target, direction);
        true
    }

    /// Tills untilled ground at a position.
    ///
    /// Returns whether the tile was tilled. Grass, soil and insufficient
    /// energy leave everything unchanged.
    pub fn till_soil(&mut self, position: Position) -> MapResult<bool> {
        if self.map.tile_at(position)? != Tile::Untilled {
            return Ok(false);
        }
        if !self.spend(self.costs.till, "till") {
            return Ok(false);
        }
        self.map.till(position)
    }

    /// Turns soil at a position back into untilled ground.
    ///
    /// Refused while a plant occupies the tile.
    pub fn untill_soil(&mut self, position: Position) -> MapResult<bool> {
        if self.map.tile_at(position)? != Tile::Soil {
            return Ok(false);
        }
        if self.plants.contains_key(&position) {
            debug!("Cannot untill {position}: occupied by a plant");
            return Ok(false);
        }
        if !self.spend(self.costs.till, "untill") {
            return Ok(false);
        }
        self.map.untill(position)
    }

    /// Plants a crop on tilled soil.
    ///
    /// Returns false when the tile is not soil, already has a plant, or the
    /// player is out of energy. The seed is not removed from the inventory.
    pub fn add_plant(&mut self, position: Position, plant: Plant) -> MapResult<bool> {
        if self.map.tile_at(position)? != Tile::Soil {
            debug!("Cannot plant at {position}: not soil");
            return Ok(false);
        }
        if self.plants.contains_key(&position) {
            debug!("Cannot plant at {position}: already occupied");
            return Ok(false);
        }
        if !self.spend(self.costs.plant, "plant") {
            return Ok(false);
        }
        debug!("Planted {} at {position}", plant.species().display_name());
        self.plants.insert(position, plant);
        Ok(true)
    }

    /// Harvests a mature plant, removing it from the farm.
    ///
    /// Returns `None` when there is no plant, it is not mature yet, or the
    /// player is out of energy. The yield is not added to the inventory.
    pub fn harvest_plant(&mut self, position: Position) -> MapResult<Option<Harvest>> {
        self.map.check_bounds(position)?;
        let Some(harvest) = self.plant_at(position).and_then(Plant::harvest_yield) else {
            return Ok(None);
        };
        if !self.spend(self.costs.harvest, "harvest") {
            return Ok(None);
        }
        self.plants.remove(&position);
        info!("Harvested {} {} at {position}", harvest.amount, harvest.item);
        Ok(Some(harvest))
    }

    /// Removes whatever plant is at a position. Costs no energy.
    pub fn remove_plant(&mut self, position: Position) -> MapResult<Option<Plant>> {
        self.map.check_bounds(position)?;
        Ok(self.plants.remove(&position))
    }

    /// Advances to the next day: plants grow and the player's energy resets.
    pub fn new_day(&mut self) {
        self.days_elapsed += 1;
        for plant in self.plants.values_mut() {
            plant.advance_day();
        }
        self.player.restore_energy();
        info!("Day {} begins", self.days_elapsed);
    }

    fn spend(&mut self, cost: u32, action: &str) -> bool {
        match self.player.spend_energy(cost) {
            Ok(()) => true,
            Err(e) => {
                debug!("Cannot {action}: {e}");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::{PlantDefinition, Species};
    use homestead_common::MapError;
    use proptest::prelude::*;

    fn potato() -> PlantDefinition {
        PlantDefinition::new(Species::Potato, "Potato Seed", 3, "Potato", 2)
    }

    fn farm(text: &str, start: (usize, usize)) -> FarmModel {
        let config = FarmConfig {
            start_position: start.into(),
            ..FarmConfig::default()
        };
        FarmModel::new(Map::parse(text).expect("valid map"), &config).expect("start on map")
    }

    fn tire_out(farm: &mut FarmModel) {
        let energy = farm.player().energy();
        farm.player_mut().spend_energy(energy).expect("exact energy");
    }

    #[test]
    fn test_start_off_map() {
        let config = FarmConfig {
            start_position: Position::new(5, 5),
            ..FarmConfig::default()
        };
        let map = Map::parse("UU\nUU").expect("valid map");
        assert!(matches!(
            FarmModel::new(map, &config),
            Err(MapError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_full_growth_cycle() {
        let mut farm = farm("UUU\nUUU\nUUU", (1, 1));
        let center = Position::new(1, 1);

        assert_eq!(farm.till_soil(center), Ok(true));
        assert_eq!(farm.map().tile_at(center), Ok(Tile::Soil));

        assert_eq!(farm.add_plant(center, Plant::new(&potato())), Ok(true));
        assert_eq!(farm.plant_at(center).map(Plant::stage), Some(0));

        for _ in 0..potato().max_stage {
            assert_eq!(farm.harvest_plant(center), Ok(None));
            farm.new_day();
        }

        let harvest = farm.harvest_plant(center).expect("in bounds");
        assert_eq!(
            harvest,
            Some(Harvest {
                item: "Potato".to_string(),
                amount: 2,
            })
        );
        assert!(!farm.plants().contains_key(&center));
        assert_eq!(farm.days_elapsed(), 3);
    }

    #[test]
    fn test_move_out_of_bounds() {
        let mut farm = farm("UUU\nUUU\nUUU", (0, 0));
        let energy = farm.player().energy();

        assert!(!farm.move_player(Direction::Up));
        assert!(!farm.move_player(Direction::Left));
        assert_eq!(farm.player_position(), Position::new(0, 0));
        assert_eq!(farm.player_direction(), Direction::Down);
        assert_eq!(farm.player().energy(), energy);
    }

    #[test]
    fn test_move_spends_energy() {
        let mut farm = farm("UUU\nUUU\nUUU", (0, 0));
        assert!(farm.move_player(Direction::Right));
        assert_eq!(farm.player_position(), Position::new(0, 1));
        assert_eq!(farm.player_direction(), Direction::Right);
        assert_eq!(farm.player().energy(), 99);
    }

    #[test]
    fn test_move_without_energy() {
        let mut farm = farm("UUU\nUUU\nUUU", (0, 0));
        tire_out(&mut farm);
        assert!(!farm.move_player(Direction::Right));
        assert_eq!(farm.player_position(), Position::new(0, 0));
        assert_eq!(farm.player_direction(), Direction::Down);
    }

    #[test]
    fn test_till_grass_and_soil_noop() {
        let mut farm = farm("GS", (0, 0));
        assert_eq!(farm.till_soil(Position::new(0, 0)), Ok(false));
        assert_eq!(farm.till_soil(Position::new(0, 1)), Ok(false));
        assert_eq!(farm.player().energy(), 100);
    }

    #[test]
    fn test_till_without_energy() {
        let mut farm = farm("UU", (0, 0));
        tire_out(&mut farm);
        assert_eq!(farm.till_soil(Position::new(0, 0)), Ok(false));
        assert_eq!(farm.map().tile_at(Position::new(0, 0)), Ok(Tile::Untilled));
    }

    #[test]
    fn test_till_out_of_bounds() {
        let mut farm = farm("UU", (0, 0));
        assert!(farm.till_soil(Position::new(3, 0)).is_err());
        assert!(farm.untill_soil(Position::new(0, 9)).is_err());
        assert!(farm.add_plant(Position::new(1, 0), Plant::new(&potato())).is_err());
        assert!(farm.harvest_plant(Position::new(1, 0)).is_err());
        assert!(farm.remove_plant(Position::new(1, 0)).is_err());
    }

    #[test]
    fn test_untill() {
        let mut farm = farm("SU", (0, 0));
        assert_eq!(farm.untill_soil(Position::new(0, 0)), Ok(true));
        assert_eq!(farm.map().tile_at(Position::new(0, 0)), Ok(Tile::Untilled));
        assert_eq!(farm.untill_soil(Position::new(0, 1)), Ok(false));
        assert_eq!(farm.player().energy(), 98);
    }

    #[test]
    fn test_untill_refused_under_plant() {
        let mut farm = farm("S", (0, 0));
        let pos = Position::new(0, 0);
        assert_eq!(farm.add_plant(pos, Plant::new(&potato())), Ok(true));
        assert_eq!(farm.untill_soil(pos), Ok(false));
        assert_eq!(farm.map().tile_at(pos), Ok(Tile::Soil));
    }

    #[test]
    fn test_plant_requires_soil() {
        let mut farm = farm("UG", (0, 0));
        assert_eq!(farm.add_plant(Position::new(0, 0), Plant::new(&potato())), Ok(false));
        assert_eq!(farm.add_plant(Position::new(0, 1), Plant::new(&potato())), Ok(false));
        assert!(farm.plants().is_empty());
    }

    #[test]
    fn test_plant_occupied() {
        let mut farm = farm("S", (0, 0));
        let pos = Position::new(0, 0);
        assert_eq!(farm.add_plant(pos, Plant::new(&potato())), Ok(true));
        assert_eq!(farm.add_plant(pos, Plant::new(&potato())), Ok(false));
        assert_eq!(farm.plants().len(), 1);
    }

    #[test]
    fn test_plant_does_not_touch_inventory() {
        let mut farm = farm("S", (0, 0));
        let seeds = farm.player().inventory().count("Potato Seed");
        assert_eq!(farm.add_plant(Position::new(0, 0), Plant::new(&potato())), Ok(true));
        assert_eq!(farm.player().inventory().count("Potato Seed"), seeds);
    }

    #[test]
    fn test_plant_without_energy() {
        let mut farm = farm("S", (0, 0));
        tire_out(&mut farm);
        assert_eq!(farm.add_plant(Position::new(0, 0), Plant::new(&potato())), Ok(false));
        assert!(farm.plants().is_empty());
    }

    #[test]
    fn test_harvest_without_energy_keeps_plant() {
        let mut farm = farm("S", (0, 0));
        let pos = Position::new(0, 0);
        let ready = PlantDefinition::new(Species::Kale, "Kale Seed", 0, "Kale", 1);
        assert_eq!(farm.add_plant(pos, Plant::new(&ready)), Ok(true));
        tire_out(&mut farm);
        assert_eq!(farm.harvest_plant(pos), Ok(None));
        assert!(farm.plant_at(pos).is_some());
    }

    #[test]
    fn test_remove_plant() {
        let mut farm = farm("S", (0, 0));
        let pos = Position::new(0, 0);
        assert_eq!(farm.remove_plant(pos), Ok(None));

        farm.add_plant(pos, Plant::new(&potato())).expect("in bounds");
        let energy = farm.player().energy();
        let removed = farm.remove_plant(pos).expect("in bounds");
        assert_eq!(removed.map(|p| p.species()), Some(Species::Potato));
        assert!(farm.plants().is_empty());
        assert_eq!(farm.player().energy(), energy);
    }

    #[test]
    fn test_new_day_restores_energy() {
        let mut farm = farm("UU", (0, 0));
        assert!(farm.move_player(Direction::Right));
        farm.new_day();
        assert_eq!(farm.player().energy(), 100);
        assert_eq!(farm.days_elapsed(), 1);
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_map(
            moves in proptest::collection::vec(
                prop_oneof![
                    Just(Direction::Up),
                    Just(Direction::Down),
                    Just(Direction::Left),
                    Just(Direction::Right),
                ],
                1..150,
            ),
        ) {
            let mut farm = farm("UUUU\nUGGU\nUUUU", (0, 0));
            for direction in moves {
                let before = farm.player().energy();
                let moved = farm.move_player(direction);
                prop_assert!(farm.player_position().within(farm.dimensions()));
                if moved {
                    prop_assert_eq!(farm.player().energy(), before - 1);
                } else {
                    prop_assert_eq!(farm.player().energy(), before);
                }
            }
        }

        #[test]
        fn prop_plants_only_on_soil(actions in proptest::collection::vec(0u8..4, 1..60)) {
            let mut farm = farm("UUU\nUSU\nGUU", (1, 1));
            let directions = Direction::ALL;
            for (i, action) in actions.into_iter().enumerate() {
                let here = farm.player_position();
                match action {
                    0 => { farm.till_soil(here).expect("on map"); },
                    1 => { farm.untill_soil(here).expect("on map"); },
                    2 => { farm.add_plant(here, Plant::new(&potato())).expect("on map"); },
                    _ => { farm.move_player(directions[i % 4]); },
                }
                for pos in farm.plants().keys() {
                    prop_assert_eq!(farm.map().tile_at(*pos), Ok(Tile::Soil));
                }
            }
        }
    }
}
