//! Recipe catalog — what the galley can cook and what each dish does to the race.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ingredients::IngredientId;

/// A bundle of ingredients keyed by id.
pub type Bundle = BTreeMap<IngredientId, u32>;

/// Identity of a catalog recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeId {
    DustSoup,
    VoidCrackers,
    NebulaSmoothie,
    CometPopsicle,
    SingularityStew,
    SolarFlareWings,
    CosmicCasserole,
    EventHorizonCake,
    EverythingBagel,
    TardigradeTart,
    MysteryMush,
}

impl RecipeId {
    pub const ALL: [RecipeId; 11] = [
        Self::DustSoup,
        Self::VoidCrackers,
        Self::NebulaSmoothie,
        Self::CometPopsicle,
        Self::SingularityStew,
        Self::SolarFlareWings,
        Self::CosmicCasserole,
        Self::EventHorizonCake,
        Self::EverythingBagel,
        Self::TardigradeTart,
        Self::MysteryMush,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DustSoup => "dust_soup",
            Self::VoidCrackers => "void_crackers",
            Self::NebulaSmoothie => "nebula_smoothie",
            Self::CometPopsicle => "comet_popsicle",
            Self::SingularityStew => "singularity_stew",
            Self::SolarFlareWings => "solar_flare_wings",
            Self::CosmicCasserole => "cosmic_casserole",
            Self::EventHorizonCake => "event_horizon_cake",
            Self::EverythingBagel => "everything_bagel",
            Self::TardigradeTart => "tardigrade_tart",
            Self::MysteryMush => "mystery_mush",
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown recipe: {}", s))
    }
}

/// The dish cooked when a bundle matches nothing.
pub const FAILURE_RECIPE: RecipeId = RecipeId::MysteryMush;

/// Temporary adjustment to one competitor's speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedModifier {
    /// Signed change to base speed. Negative slows, positive speeds up.
    Delta(i32),
    /// Competitor does not advance at all while active.
    Frozen,
}

impl SpeedModifier {
    pub const NONE: SpeedModifier = SpeedModifier::Delta(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Speed after applying this modifier to `base`. Not clamped.
    pub fn apply(self, base: i32) -> i32 {
        match self {
            Self::Delta(d) => base.saturating_add(d),
            Self::Frozen => 0,
        }
    }
}

impl Default for SpeedModifier {
    fn default() -> Self {
        Self::NONE
    }
}

/// What a dish does to the race, and for how many ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEffect {
    pub gus: SpeedModifier,
    pub earth: SpeedModifier,
    pub duration: u32,
}

/// Static recipe definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: &'static str,
    pub description: &'static str,
    /// Required ingredients; every count is > 0.
    pub ingredients: &'static [(IngredientId, u32)],
    pub effect: RecipeEffect,
    /// -1 = failure dish, 0 = starting, 1-3 = research tiers.
    pub tier: i8,
    pub requires_research: bool,
}

impl Recipe {
    /// Requirements as a bundle.
    pub fn requirements(&self) -> Bundle {
        self.ingredients.iter().copied().collect()
    }

    /// Exact multiset equality with `bundle`. Zero-count bundle entries are ignored.
    pub fn matches(&self, bundle: &Bundle) -> bool {
        let wanted = bundle.iter().filter(|&(_, &n)| n > 0).count();
        wanted == self.ingredients.len()
            && self
                .ingredients
                .iter()
                .all(|(id, n)| bundle.get(id) == Some(n))
    }
}

const fn effect(gus: SpeedModifier, earth: SpeedModifier, duration: u32) -> RecipeEffect {
    RecipeEffect {
        gus,
        earth,
        duration,
    }
}

use IngredientId::*;
use SpeedModifier::{Delta, Frozen};

pub const RECIPES: [Recipe; 11] = [
    // Tier 0: starting recipes
    Recipe {
        id: RecipeId::DustSoup,
        name: "Dust Soup",
        description: "A simple broth of stardust. Mildly filling.",
        ingredients: &[(Stardust, 2)],
        effect: effect(Delta(-1), Delta(0), 2),
        tier: 0,
        requires_research: false,
    },
    Recipe {
        id: RecipeId::VoidCrackers,
        name: "Void Crackers",
        description: "Crunchy snacks that give Earth a slight boost.",
        ingredients: &[(VoidSalt, 2)],
        effect: effect(Delta(0), Delta(1), 2),
        tier: 0,
        requires_research: false,
    },
    Recipe {
        id: RecipeId::NebulaSmoothie,
        name: "Nebula Smoothie",
        description: "Sweet and tangy. Gus loves it.",
        ingredients: &[(NebulaNectar, 1), (Stardust, 1)],
        effect: effect(Delta(-2), Delta(0), 1),
        tier: 0,
        requires_research: false,
    },
    Recipe {
        id: RecipeId::CometPopsicle,
        name: "Comet Popsicle",
        description: "Frozen treat that energizes the ship.",
        ingredients: &[(CometTail, 2)],
        effect: effect(Delta(0), Delta(2), 1),
        tier: 0,
        requires_research: false,
    },
    // Tier 1: Cookbook I
    Recipe {
        id: RecipeId::SingularityStew,
        name: "Singularity Stew",
        description: "Dense and heavy. Slows Gus considerably.",
        ingredients: &[(SingularitySeed, 1), (VoidSalt, 1)],
        effect: effect(Delta(-3), Delta(0), 2),
        tier: 1,
        requires_research: true,
    },
    Recipe {
        id: RecipeId::SolarFlareWings,
        name: "Solar Flare Wings",
        description: "Spicy! Gives Earth a burst of speed.",
        ingredients: &[(SolarFlarePepper, 1), (Stardust, 1)],
        effect: effect(Delta(0), Delta(3), 1),
        tier: 1,
        requires_research: true,
    },
    // Tier 2: Cookbook II
    Recipe {
        id: RecipeId::CosmicCasserole,
        name: "Cosmic Casserole",
        description: "A hearty mix of common and uncommon ingredients. Long-lasting effect.",
        ingredients: &[(Stardust, 1), (VoidSalt, 1), (NebulaNectar, 1), (CometTail, 1)],
        effect: effect(Delta(-2), Delta(0), 4),
        tier: 2,
        requires_research: true,
    },
    Recipe {
        id: RecipeId::EventHorizonCake,
        name: "Event Horizon Cake",
        description: "So delicious Gus completely stops to savor it.",
        ingredients: &[(SingularitySeed, 1), (NebulaNectar, 1)],
        effect: effect(Frozen, Delta(0), 1),
        tier: 2,
        requires_research: true,
    },
    // Tier 3: Cookbook III
    Recipe {
        id: RecipeId::EverythingBagel,
        name: "The Everything Bagel",
        description: "Contains a bit of everything in the cosmos.",
        ingredients: &[
            (Stardust, 1),
            (VoidSalt, 1),
            (NebulaNectar, 1),
            (CometTail, 1),
            (SingularitySeed, 1),
            (SolarFlarePepper, 1),
        ],
        effect: effect(Delta(-5), Delta(0), 3),
        tier: 3,
        requires_research: true,
    },
    Recipe {
        id: RecipeId::TardigradeTart,
        name: "Tardigrade Tart",
        description: "Made specifically for tardigrade taste buds. Induces deep sleep.",
        ingredients: &[(SingularitySeed, 2), (SolarFlarePepper, 1)],
        effect: effect(Frozen, Delta(0), 2),
        tier: 3,
        requires_research: true,
    },
    // Failed dish
    Recipe {
        id: RecipeId::MysteryMush,
        name: "Mystery Mush",
        description: "Something went wrong. Gus is not pleased.",
        ingredients: &[],
        effect: effect(Delta(1), Delta(0), 1),
        tier: -1,
        requires_research: false,
    },
];

pub fn recipe(id: RecipeId) -> &'static Recipe {
    RECIPES
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("recipe {} missing from catalog", id))
}

pub fn recipes_by_tier(tier: i8) -> Vec<&'static Recipe> {
    RECIPES.iter().filter(|r| r.tier == tier).collect()
}

/// Find the catalog recipe whose requirements equal `bundle` exactly.
///
/// The failure recipe is never returned; callers decide what a non-match cooks
/// into (see [`match_or_failure`]).
pub fn find_matching_recipe(bundle: &Bundle) -> Option<&'static Recipe> {
    RECIPES
        .iter()
        .filter(|r| r.id != FAILURE_RECIPE)
        .find(|r| r.matches(bundle))
}

/// Matching recipe, or the failure recipe when nothing matches.
pub fn match_or_failure(bundle: &Bundle) -> &'static Recipe {
    find_matching_recipe(bundle).unwrap_or_else(|| recipe(FAILURE_RECIPE))
}
