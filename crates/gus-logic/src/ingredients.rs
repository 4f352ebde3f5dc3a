//! Ingredient catalog — the things asteroids drop and the galley cooks with.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identity of a catalog ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientId {
    Stardust,
    VoidSalt,
    NebulaNectar,
    CometTail,
    SingularitySeed,
    SolarFlarePepper,
}

impl IngredientId {
    pub const ALL: [IngredientId; 6] = [
        Self::Stardust,
        Self::VoidSalt,
        Self::NebulaNectar,
        Self::CometTail,
        Self::SingularitySeed,
        Self::SolarFlarePepper,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stardust => "stardust",
            Self::VoidSalt => "void_salt",
            Self::NebulaNectar => "nebula_nectar",
            Self::CometTail => "comet_tail",
            Self::SingularitySeed => "singularity_seed",
            Self::SolarFlarePepper => "solar_flare_pepper",
        }
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown ingredient: {}", s))
    }
}

/// How often an ingredient shows up in asteroid fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

/// Static ingredient definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    /// Hex color for UI.
    pub color: &'static str,
    /// Relative draw weight; higher = more common.
    pub spawn_weight: u32,
}

pub const INGREDIENTS: [Ingredient; 6] = [
    Ingredient {
        id: IngredientId::Stardust,
        name: "Stardust",
        description: "Glittering cosmic powder, remnants of ancient stars.",
        rarity: Rarity::Common,
        color: "#e0e0e0",
        spawn_weight: 30,
    },
    Ingredient {
        id: IngredientId::VoidSalt,
        name: "Void Salt",
        description: "Dark crystalline substance from the spaces between galaxies.",
        rarity: Rarity::Common,
        color: "#1a1a2e",
        spawn_weight: 30,
    },
    Ingredient {
        id: IngredientId::NebulaNectar,
        name: "Nebula Nectar",
        description: "Pink luminescent fluid harvested from stellar nurseries.",
        rarity: Rarity::Uncommon,
        color: "#c77dff",
        spawn_weight: 20,
    },
    Ingredient {
        id: IngredientId::CometTail,
        name: "Comet Tail",
        description: "Frozen strand of ice and cosmic dust.",
        rarity: Rarity::Uncommon,
        color: "#00d9ff",
        spawn_weight: 20,
    },
    Ingredient {
        id: IngredientId::SingularitySeed,
        name: "Singularity Seed",
        description: "A tiny, contained gravitational anomaly. Handle with care.",
        rarity: Rarity::Rare,
        color: "#4a0080",
        spawn_weight: 10,
    },
    Ingredient {
        id: IngredientId::SolarFlarePepper,
        name: "Solar Flare Pepper",
        description: "Burning chunk of stellar plasma. Extremely spicy.",
        rarity: Rarity::Rare,
        color: "#ff6b35",
        spawn_weight: 10,
    },
];

/// Look up an ingredient definition.
pub fn ingredient(id: IngredientId) -> &'static Ingredient {
    INGREDIENTS
        .iter()
        .find(|i| i.id == id)
        .unwrap_or_else(|| panic!("ingredient {} missing from catalog", id))
}

/// Look up an ingredient by its textual key.
///
/// # Panics
///
/// Panics on an unknown key. Keys come from authored data, so an unknown one
/// is a programming error rather than something gameplay can recover from.
pub fn ingredient_by_key(key: &str) -> &'static Ingredient {
    match key.parse::<IngredientId>() {
        Ok(id) => ingredient(id),
        Err(e) => panic!("{}", e),
    }
}

pub fn ingredients_by_rarity(rarity: Rarity) -> Vec<&'static Ingredient> {
    INGREDIENTS.iter().filter(|i| i.rarity == rarity).collect()
}

/// Sum of all spawn weights.
pub fn total_spawn_weight() -> u32 {
    INGREDIENTS.iter().map(|i| i.spawn_weight).sum()
}

/// Weighted random pick for asteroid spawning.
pub fn random_ingredient<R: Rng + ?Sized>(rng: &mut R) -> IngredientId {
    let mut roll = rng.gen_range(0..total_spawn_weight());
    for ingredient in &INGREDIENTS {
        if roll < ingredient.spawn_weight {
            return ingredient.id;
        }
        roll -= ingredient.spawn_weight;
    }
    INGREDIENTS[0].id
}
