//! Galley — turning ingredients into dishes that sway the race.
//!
//! Cooking checks stock and consumes it inside a single `&mut self` call, so
//! no other mutation can land between the check and the consumption.

use crate::recipes::{
    find_matching_recipe, recipe, Bundle, Recipe, RecipeId, FAILURE_RECIPE, RECIPES,
};
use crate::state::GameState;

impl GameState {
    pub fn is_unlocked(&self, id: RecipeId) -> bool {
        self.unlocked_recipes.contains(&id)
    }

    /// Unlocked recipes in catalog order.
    pub fn unlocked_recipes(&self) -> Vec<&'static Recipe> {
        RECIPES.iter().filter(|r| self.is_unlocked(r.id)).collect()
    }

    /// Cook a known recipe: consume its ingredients and install its effect,
    /// replacing any active one.
    pub fn cook(&mut self, id: RecipeId) -> bool {
        if !self.is_unlocked(id) {
            log::warn!("Recipe not unlocked: {}", id);
            return false;
        }

        let recipe = recipe(id);
        if !self.consume_bundle(&recipe.requirements()) {
            log::warn!("Missing ingredients for recipe {}", id);
            return false;
        }

        self.apply_recipe_effect(&recipe.effect);
        log::info!("Recipe cooked: {}", id);
        true
    }

    /// Throw an arbitrary bundle in the pot.
    ///
    /// The bundle is consumed whatever it turns into: the unlocked recipe it
    /// matches exactly, or the failure dish otherwise. Returns `None` without
    /// touching anything if the bundle is empty or not in stock.
    pub fn cook_bundle(&mut self, bundle: &Bundle) -> Option<RecipeId> {
        if bundle.values().all(|&n| n == 0) {
            log::warn!("Nothing in the pot");
            return None;
        }
        if !self.consume_bundle(bundle) {
            log::warn!("Missing ingredients for bundle {:?}", bundle);
            return None;
        }

        let dish = find_matching_recipe(bundle)
            .filter(|r| self.is_unlocked(r.id))
            .unwrap_or_else(|| recipe(FAILURE_RECIPE));
        self.apply_recipe_effect(&dish.effect);
        log::info!("Bundle cooked into {}", dish.id);
        Some(dish.id)
    }
}
