//! Resource ledger — ingredient counts, cargo usage, science.
//!
//! Every operation either applies fully or leaves the state untouched and
//! returns `false`.

use crate::ingredients::IngredientId;
use crate::recipes::Bundle;
use crate::state::GameState;

impl GameState {
    /// Stow `count` units of an ingredient. Fails when the hold would overflow.
    pub fn add_ingredient(&mut self, id: IngredientId, count: u32) -> bool {
        let new_cargo = match self.ship.current_cargo.checked_add(count) {
            Some(c) if c <= self.ship.cargo_capacity => c,
            _ => {
                log::warn!("Cargo full, cannot add {} x{}", id, count);
                return false;
            }
        };

        let total = self.inventory.entry(id).or_insert(0);
        *total += count;
        self.ship.current_cargo = new_cargo;
        log::debug!("Ingredient added: {} x{} (total {})", id, count, total);
        true
    }

    /// Take `count` units out of the hold. Fails when stock is short.
    pub fn remove_ingredient(&mut self, id: IngredientId, count: u32) -> bool {
        let have = self.ingredient_count(id);
        if have < count {
            log::warn!("Not enough {}: have {}, need {}", id, have, count);
            return false;
        }

        self.inventory.insert(id, have - count);
        self.ship.current_cargo -= count;
        log::debug!("Ingredient removed: {} x{}", id, count);
        true
    }

    pub fn ingredient_count(&self, id: IngredientId) -> u32 {
        self.inventory.get(&id).copied().unwrap_or(0)
    }

    /// True when every requirement is in stock.
    pub fn has_ingredients(&self, requirements: &Bundle) -> bool {
        requirements
            .iter()
            .all(|(&id, &count)| self.ingredient_count(id) >= count)
    }

    /// Remove a whole bundle, or nothing if any part is short.
    pub(crate) fn consume_bundle(&mut self, bundle: &Bundle) -> bool {
        if !self.has_ingredients(bundle) {
            return false;
        }
        for (&id, &count) in bundle.iter().filter(|&(_, &n)| n > 0) {
            let have = self.ingredient_count(id);
            self.inventory.insert(id, have - count);
            self.ship.current_cargo -= count;
        }
        true
    }

    pub fn add_science(&mut self, amount: u32) {
        self.science = self.science.saturating_add(amount);
        log::debug!("Science added: {} (total {})", amount, self.science);
    }

    pub fn spend_science(&mut self, amount: u32) -> bool {
        if self.science < amount {
            log::warn!("Not enough science: have {}, need {}", self.science, amount);
            return false;
        }
        self.science -= amount;
        log::debug!("Science spent: {} ({} left)", amount, self.science);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::ingredients::IngredientId::{self, *};
    use crate::recipes::Bundle;
    use crate::state::GameState;

    fn fresh() -> GameState {
        GameState::new(&GameConfig::default())
    }

    fn bundle(items: &[(IngredientId, u32)]) -> Bundle {
        items.iter().copied().collect()
    }

    #[test]
    fn test_add_then_remove_roundtrip() {
        for id in IngredientId::ALL {
            for count in 0..=4 {
                let mut state = fresh();
                state.add_ingredient(VoidSalt, 3);
                let before = (state.ingredient_count(id), state.ship.current_cargo);
                assert!(state.add_ingredient(id, count));
                assert!(state.remove_ingredient(id, count));
                assert_eq!((state.ingredient_count(id), state.ship.current_cargo), before);
            }
        }
    }

    #[test]
    fn test_add_up_to_capacity() {
        let mut state = fresh();
        assert!(state.add_ingredient(Stardust, 10));
        assert_eq!(state.ship.current_cargo, 10);
        assert_eq!(state.ship.free_cargo(), 0);
    }

    #[test]
    fn test_overflow_rejected_without_mutation() {
        let mut state = fresh();
        state.add_ingredient(CometTail, 8);
        let inventory = state.inventory.clone();
        assert!(!state.add_ingredient(Stardust, 3));
        assert_eq!(state.inventory, inventory);
        assert_eq!(state.ship.current_cargo, 8);
        assert_eq!(state.ingredient_count(Stardust), 0);
    }

    #[test]
    fn test_huge_count_does_not_wrap() {
        let mut state = fresh();
        state.add_ingredient(Stardust, 1);
        assert!(!state.add_ingredient(Stardust, u32::MAX));
        assert_eq!(state.ship.current_cargo, 1);
    }

    #[test]
    fn test_remove_more_than_held() {
        let mut state = fresh();
        state.add_ingredient(NebulaNectar, 1);
        assert!(!state.remove_ingredient(NebulaNectar, 2));
        assert_eq!(state.ingredient_count(NebulaNectar), 1);
        assert_eq!(state.ship.current_cargo, 1);
    }

    #[test]
    fn test_remove_never_seen() {
        let mut state = fresh();
        assert!(!state.remove_ingredient(SolarFlarePepper, 1));
        assert_eq!(state.ingredient_count(SolarFlarePepper), 0);
    }

    #[test]
    fn test_has_ingredients() {
        let mut state = fresh();
        state.add_ingredient(Stardust, 2);
        state.add_ingredient(VoidSalt, 1);
        assert!(state.has_ingredients(&bundle(&[(Stardust, 2), (VoidSalt, 1)])));
        assert!(!state.has_ingredients(&bundle(&[(Stardust, 3)])));
        assert!(!state.has_ingredients(&bundle(&[(CometTail, 1)])));
        assert!(state.has_ingredients(&Bundle::new()));
    }

    #[test]
    fn test_consume_bundle_all_or_nothing() {
        let mut state = fresh();
        state.add_ingredient(Stardust, 2);
        let b = bundle(&[(Stardust, 1), (CometTail, 1)]);
        assert!(!state.consume_bundle(&b));
        assert_eq!(state.ship.current_cargo, 2);

        state.add_ingredient(CometTail, 1);
        assert!(state.consume_bundle(&b));
        assert_eq!(state.ingredient_count(Stardust), 1);
        assert_eq!(state.ingredient_count(CometTail), 0);
        assert_eq!(state.ship.current_cargo, 1);
    }

    #[test]
    fn test_science() {
        let mut state = fresh();
        state.add_science(12);
        assert!(!state.spend_science(13));
        assert_eq!(state.science, 12);
        assert!(state.spend_science(12));
        assert_eq!(state.science, 0);
    }
}
