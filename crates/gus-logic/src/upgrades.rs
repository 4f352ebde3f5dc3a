//! Upgrade catalog — research purchases made with science in Engineering.
//!
//! Each category is a linear chain: level II requires level I.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a catalog upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    #[serde(rename = "cargo_1")]
    Cargo1,
    #[serde(rename = "cargo_2")]
    Cargo2,
    #[serde(rename = "weapons_1")]
    Weapons1,
    #[serde(rename = "weapons_2")]
    Weapons2,
    #[serde(rename = "shields_1")]
    Shields1,
    #[serde(rename = "shields_2")]
    Shields2,
    #[serde(rename = "efficiency_1")]
    Efficiency1,
    #[serde(rename = "efficiency_2")]
    Efficiency2,
    #[serde(rename = "capacity_1")]
    Capacity1,
    #[serde(rename = "capacity_2")]
    Capacity2,
    #[serde(rename = "cookbook_1")]
    Cookbook1,
    #[serde(rename = "cookbook_2")]
    Cookbook2,
    #[serde(rename = "cookbook_3")]
    Cookbook3,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 13] = [
        Self::Cargo1,
        Self::Cargo2,
        Self::Weapons1,
        Self::Weapons2,
        Self::Shields1,
        Self::Shields2,
        Self::Efficiency1,
        Self::Efficiency2,
        Self::Capacity1,
        Self::Capacity2,
        Self::Cookbook1,
        Self::Cookbook2,
        Self::Cookbook3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cargo1 => "cargo_1",
            Self::Cargo2 => "cargo_2",
            Self::Weapons1 => "weapons_1",
            Self::Weapons2 => "weapons_2",
            Self::Shields1 => "shields_1",
            Self::Shields2 => "shields_2",
            Self::Efficiency1 => "efficiency_1",
            Self::Efficiency2 => "efficiency_2",
            Self::Capacity1 => "capacity_1",
            Self::Capacity2 => "capacity_2",
            Self::Cookbook1 => "cookbook_1",
            Self::Cookbook2 => "cookbook_2",
            Self::Cookbook3 => "cookbook_3",
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown upgrade: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeCategory {
    Ship,
    Clone,
    Recipe,
}

/// The single stat change an upgrade applies when bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UpgradeEffect {
    CargoCapacity(u32),
    WeaponDamage(u32),
    /// Raises both max and current shields.
    ShieldHits(i32),
    CloneEfficiency(u32),
    CloneSlots(u32),
    /// Unlocks every recipe of this tier. The value is the tier, not a count.
    UnlockRecipes(i8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: UpgradeCategory,
    /// Science cost.
    pub cost: u32,
    pub effect: UpgradeEffect,
    pub requires: Option<UpgradeId>,
}

use UpgradeCategory as Cat;
use UpgradeEffect as Fx;

pub const UPGRADES: [Upgrade; 13] = [
    // Ship
    Upgrade {
        id: UpgradeId::Cargo1,
        name: "Cargo Bay I",
        description: "Expanded storage racks. +2 cargo capacity.",
        category: Cat::Ship,
        cost: 10,
        effect: Fx::CargoCapacity(2),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Cargo2,
        name: "Cargo Bay II",
        description: "Compressed storage system. +3 cargo capacity.",
        category: Cat::Ship,
        cost: 25,
        effect: Fx::CargoCapacity(3),
        requires: Some(UpgradeId::Cargo1),
    },
    Upgrade {
        id: UpgradeId::Weapons1,
        name: "Weapons Array I",
        description: "Improved targeting. +20% weapon damage.",
        category: Cat::Ship,
        cost: 15,
        effect: Fx::WeaponDamage(2),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Weapons2,
        name: "Weapons Array II",
        description: "Heavy cannons. +30% weapon damage.",
        category: Cat::Ship,
        cost: 35,
        effect: Fx::WeaponDamage(3),
        requires: Some(UpgradeId::Weapons1),
    },
    Upgrade {
        id: UpgradeId::Shields1,
        name: "Shield Generator I",
        description: "Reinforced barrier. +1 shield hit.",
        category: Cat::Ship,
        cost: 20,
        effect: Fx::ShieldHits(1),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Shields2,
        name: "Shield Generator II",
        description: "Reactive shielding. +2 shield hits.",
        category: Cat::Ship,
        cost: 45,
        effect: Fx::ShieldHits(2),
        requires: Some(UpgradeId::Shields1),
    },
    // Clone
    Upgrade {
        id: UpgradeId::Efficiency1,
        name: "Clone Training I",
        description: "Better research protocols. +2 science per clone.",
        category: Cat::Clone,
        cost: 10,
        effect: Fx::CloneEfficiency(2),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Efficiency2,
        name: "Clone Training II",
        description: "Advanced methodologies. +3 science per clone.",
        category: Cat::Clone,
        cost: 25,
        effect: Fx::CloneEfficiency(3),
        requires: Some(UpgradeId::Efficiency1),
    },
    Upgrade {
        id: UpgradeId::Capacity1,
        name: "Clone Bay Expansion I",
        description: "Additional cloning pod. +1 clone slot.",
        category: Cat::Clone,
        cost: 30,
        effect: Fx::CloneSlots(1),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Capacity2,
        name: "Clone Bay Expansion II",
        description: "Another cloning pod. +1 clone slot.",
        category: Cat::Clone,
        cost: 60,
        effect: Fx::CloneSlots(1),
        requires: Some(UpgradeId::Capacity1),
    },
    // Recipe research
    Upgrade {
        id: UpgradeId::Cookbook1,
        name: "Cookbook Volume I",
        description: "Research advanced recipes. Unlocks 2 new dishes.",
        category: Cat::Recipe,
        cost: 15,
        effect: Fx::UnlockRecipes(1),
        requires: None,
    },
    Upgrade {
        id: UpgradeId::Cookbook2,
        name: "Cookbook Volume II",
        description: "Complex culinary techniques. Unlocks 2 new dishes.",
        category: Cat::Recipe,
        cost: 35,
        effect: Fx::UnlockRecipes(2),
        requires: Some(UpgradeId::Cookbook1),
    },
    Upgrade {
        id: UpgradeId::Cookbook3,
        name: "Cookbook Volume III",
        description: "Master chef secrets. Unlocks 2 ultimate dishes.",
        category: Cat::Recipe,
        cost: 55,
        effect: Fx::UnlockRecipes(3),
        requires: Some(UpgradeId::Cookbook2),
    },
];

pub fn upgrade(id: UpgradeId) -> &'static Upgrade {
    UPGRADES
        .iter()
        .find(|u| u.id == id)
        .unwrap_or_else(|| panic!("upgrade {} missing from catalog", id))
}

/// Look up an upgrade by its textual key.
///
/// # Panics
///
/// Panics on an unknown key.
pub fn upgrade_by_key(key: &str) -> &'static Upgrade {
    match key.parse::<UpgradeId>() {
        Ok(id) => upgrade(id),
        Err(e) => panic!("{}", e),
    }
}

pub fn upgrades_by_category(category: UpgradeCategory) -> Vec<&'static Upgrade> {
    UPGRADES.iter().filter(|u| u.category == category).collect()
}

/// Upgrades not yet bought whose prerequisite is met. Cost is not considered.
pub fn available_upgrades(purchased: &BTreeSet<UpgradeId>) -> Vec<&'static Upgrade> {
    UPGRADES
        .iter()
        .filter(|u| !purchased.contains(&u.id))
        .filter(|u| u.requires.map_or(true, |req| purchased.contains(&req)))
        .collect()
}
