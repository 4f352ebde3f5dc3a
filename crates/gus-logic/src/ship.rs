//! Ship stats — cargo hold, weapons, shields.

use serde::{Deserialize, Serialize};

use crate::config::ShipConfig;
use crate::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipState {
    pub cargo_capacity: u32,
    /// Total ingredient units aboard. Always equals the inventory sum.
    pub current_cargo: u32,
    pub weapon_damage: u32,
    /// Current shields. May go below zero under repeated hits.
    pub shield_hits: i32,
    pub max_shield_hits: i32,
}

impl ShipState {
    pub fn new(config: &ShipConfig) -> Self {
        Self {
            cargo_capacity: config.cargo_capacity,
            current_cargo: 0,
            weapon_damage: config.weapon_damage,
            shield_hits: config.shield_hits,
            max_shield_hits: config.shield_hits,
        }
    }

    pub fn free_cargo(&self) -> u32 {
        self.cargo_capacity.saturating_sub(self.current_cargo)
    }

    pub fn hull_breached(&self) -> bool {
        self.shield_hits <= 0
    }
}

impl GameState {
    /// Lose one shield. Returns true when shields are at or below zero.
    pub fn take_damage(&mut self) -> bool {
        self.ship.shield_hits -= 1;
        log::debug!("Shield hit, {} remaining", self.ship.shield_hits);
        self.ship.hull_breached()
    }

    pub fn repair_shields(&mut self) {
        self.ship.shield_hits = self.ship.max_shield_hits;
        log::debug!("Shields repaired to {}", self.ship.shield_hits);
    }
}
