//! Engineering shop — buying upgrades with science.

use crate::recipes::recipes_by_tier;
use crate::state::GameState;
use crate::upgrades::{upgrade, Upgrade, UpgradeEffect, UpgradeId};

impl GameState {
    /// Not yet bought, prerequisite owned, and affordable.
    pub fn can_purchase(&self, id: UpgradeId) -> bool {
        let upgrade = upgrade(id);
        !self.purchased_upgrades.contains(&id)
            && upgrade
                .requires
                .map_or(true, |req| self.purchased_upgrades.contains(&req))
            && self.science >= upgrade.cost
    }

    /// Buy an upgrade and apply its effect. Nothing changes if it can't be bought.
    pub fn purchase(&mut self, id: UpgradeId) -> bool {
        if !self.can_purchase(id) {
            log::warn!("Cannot purchase upgrade {}", id);
            return false;
        }

        let upgrade = upgrade(id);
        self.science -= upgrade.cost;
        self.purchased_upgrades.insert(id);
        self.apply_upgrade_effect(upgrade);

        log::info!("Upgrade purchased: {} ({:?})", id, upgrade.effect);
        true
    }

    fn apply_upgrade_effect(&mut self, upgrade: &Upgrade) {
        match upgrade.effect {
            UpgradeEffect::CargoCapacity(n) => self.ship.cargo_capacity += n,
            UpgradeEffect::WeaponDamage(n) => self.ship.weapon_damage += n,
            UpgradeEffect::ShieldHits(n) => {
                self.ship.max_shield_hits += n;
                self.ship.shield_hits += n;
            }
            UpgradeEffect::CloneEfficiency(n) => self.clones.efficiency += n,
            UpgradeEffect::CloneSlots(n) => self.clones.total_slots += n,
            UpgradeEffect::UnlockRecipes(tier) => {
                self.unlocked_recipes
                    .extend(recipes_by_tier(tier).into_iter().map(|r| r.id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::recipes::RecipeId;
    use crate::state::GameState;
    use crate::upgrades::UpgradeId;

    fn rich() -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.add_science(500);
        state
    }

    #[test]
    fn test_prerequisite_required() {
        let mut state = rich();
        assert!(!state.can_purchase(UpgradeId::Cargo2));
        assert!(!state.purchase(UpgradeId::Cargo2));
        assert_eq!(state.science, 500);
        assert_eq!(state.ship.cargo_capacity, 10);
        assert!(state.purchased_upgrades.is_empty());
    }

    #[test]
    fn test_chain_purchase() {
        let mut state = rich();
        assert!(state.purchase(UpgradeId::Cargo1));
        assert!(state.purchase(UpgradeId::Cargo2));
        assert_eq!(state.ship.cargo_capacity, 15);
        assert_eq!(state.science, 500 - 10 - 25);
    }

    #[test]
    fn test_cannot_buy_twice() {
        let mut state = rich();
        assert!(state.purchase(UpgradeId::Weapons1));
        assert!(!state.purchase(UpgradeId::Weapons1));
        assert_eq!(state.ship.weapon_damage, 12);
        assert_eq!(state.science, 485);
    }

    #[test]
    fn test_insufficient_science_changes_nothing() {
        let mut state = GameState::new(&GameConfig::default());
        state.add_science(29);
        let before = state.clone();
        assert!(!state.purchase(UpgradeId::Capacity1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_exact_science_is_enough() {
        let mut state = GameState::new(&GameConfig::default());
        state.add_science(30);
        assert!(state.purchase(UpgradeId::Capacity1));
        assert_eq!(state.science, 0);
        assert_eq!(state.clones.total_slots, 3);
    }

    #[test]
    fn test_shields_heal_by_delta() {
        let mut state = rich();
        state.take_damage();
        assert!(state.purchase(UpgradeId::Shields1));
        assert_eq!(state.ship.max_shield_hits, 3);
        assert_eq!(state.ship.shield_hits, 2);
    }

    #[test]
    fn test_clone_efficiency() {
        let mut state = rich();
        state.purchase(UpgradeId::Efficiency1);
        state.purchase(UpgradeId::Efficiency2);
        assert_eq!(state.clones.efficiency, 10);
    }

    #[test]
    fn test_cookbook_unlocks_its_tier() {
        let mut state = rich();
        assert!(state.purchase(UpgradeId::Cookbook1));
        assert!(state.unlocked_recipes.contains(&RecipeId::SingularityStew));
        assert!(state.unlocked_recipes.contains(&RecipeId::SolarFlareWings));
        assert!(!state.unlocked_recipes.contains(&RecipeId::CosmicCasserole));

        assert!(state.purchase(UpgradeId::Cookbook2));
        assert!(state.purchase(UpgradeId::Cookbook3));
        assert_eq!(state.unlocked_recipes.len(), 11);
    }
}
