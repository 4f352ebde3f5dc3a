//! The aggregate game state.
//!
//! A [`GameState`] is the one context object every subsystem operation works
//! on. The operations themselves live next to the data they concern:
//! [`crate::ledger`], [`crate::clones`], [`crate::shop`], [`crate::galley`],
//! [`crate::ship`] and [`crate::race`] each add an `impl GameState` block.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::clones::CloneState;
use crate::config::GameConfig;
use crate::ingredients::IngredientId;
use crate::race::RaceState;
use crate::recipes::{RecipeId, RECIPES};
use crate::ship::ShipState;
use crate::upgrades::UpgradeId;

/// Ingredient counts aboard. Missing keys read as zero.
pub type Inventory = BTreeMap<IngredientId, u32>;

/// Where on the ship the player currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipLocation {
    #[default]
    Bridge,
    Galley,
    Engineering,
    #[serde(rename = "clonebay")]
    CloneBay,
    Cargo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub race: RaceState,
    pub inventory: Inventory,
    pub science: u32,
    pub clones: CloneState,
    pub ship: ShipState,
    pub purchased_upgrades: BTreeSet<UpgradeId>,
    pub unlocked_recipes: BTreeSet<RecipeId>,
    pub current_location: ShipLocation,
    pub game_over: bool,
    pub victory: bool,
}

impl GameState {
    /// Fresh game: starting stats, every recipe that needs no research unlocked.
    pub fn new(config: &GameConfig) -> Self {
        let unlocked_recipes = RECIPES
            .iter()
            .filter(|r| !r.requires_research)
            .map(|r| r.id)
            .collect();

        Self {
            race: RaceState::new(&config.race),
            inventory: Inventory::new(),
            science: 0,
            clones: CloneState::new(&config.clones),
            ship: ShipState::new(&config.ship),
            purchased_upgrades: BTreeSet::new(),
            unlocked_recipes,
            current_location: ShipLocation::Bridge,
            game_over: false,
            victory: false,
        }
    }

    pub fn set_location(&mut self, location: ShipLocation) {
        self.current_location = location;
        log::debug!("Location changed to {:?}", location);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::default();
        assert_eq!(state.race.earth_position, 50);
        assert_eq!(state.race.gus_position, 0);
        assert_eq!(state.race.track_length, 100);
        assert_eq!(state.science, 0);
        assert_eq!(state.ship.cargo_capacity, 10);
        assert_eq!(state.clones.total_slots, 2);
        assert!(state.inventory.is_empty());
        assert!(state.purchased_upgrades.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn test_starting_recipes_unlocked() {
        let state = GameState::default();
        assert_eq!(state.unlocked_recipes.len(), 5);
        assert!(state.unlocked_recipes.contains(&RecipeId::DustSoup));
        assert!(state.unlocked_recipes.contains(&RecipeId::MysteryMush));
        assert!(!state.unlocked_recipes.contains(&RecipeId::SingularityStew));
    }

    #[test]
    fn test_config_drives_start() {
        let mut config = GameConfig::default();
        config.race.earth_start = 30;
        config.clones.slots = 5;
        let state = GameState::new(&config);
        assert_eq!(state.race.earth_position, 30);
        assert_eq!(state.clones.total_slots, 5);
    }

    #[test]
    fn test_set_location() {
        let mut state = GameState::default();
        state.set_location(ShipLocation::Galley);
        assert_eq!(state.current_location, ShipLocation::Galley);
    }
}
