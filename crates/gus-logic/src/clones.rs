//! Clone bay — workers sent on science missions.

use serde::{Deserialize, Serialize};

use crate::config::CloneConfig;
use crate::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneState {
    pub total_slots: u32,
    pub deployed_count: u32,
    /// Science per clone per mission.
    pub efficiency: u32,
}

impl CloneState {
    pub fn new(config: &CloneConfig) -> Self {
        Self {
            total_slots: config.slots,
            deployed_count: 0,
            efficiency: config.efficiency,
        }
    }

    pub fn available_slots(&self) -> u32 {
        self.total_slots.saturating_sub(self.deployed_count)
    }
}

impl GameState {
    /// Deploy up to `count` clones into free slots. Returns how many went out.
    pub fn deploy_clones(&mut self, count: u32) -> u32 {
        let deployed = count.min(self.clones.available_slots());
        self.clones.deployed_count += deployed;
        log::debug!("Clones deployed: {}", deployed);
        deployed
    }

    /// Bring every deployed clone home and bank the science they earned.
    pub fn return_clones(&mut self) -> u32 {
        let returned = self.clones.deployed_count;
        let earned = returned.saturating_mul(self.clones.efficiency);
        self.clones.deployed_count = 0;
        self.add_science(earned);
        log::info!("Clones returned: {} ({} science)", returned, earned);
        earned
    }
}
