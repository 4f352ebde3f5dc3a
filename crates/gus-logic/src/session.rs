//! Game session — the one owner of a running game's state and its save slot.
//!
//! The session wraps every mutating [`GameState`] operation so that the save
//! slot mirrors the in-memory state after each successful change, and is
//! cleared as soon as the race ends or the game is reset. Save failures are
//! logged and swallowed: the in-memory state stays authoritative.

use crate::config::GameConfig;
use crate::ingredients::IngredientId;
use crate::persistence::{deserialize_state, serialize_state, SaveStore};
use crate::race::TickOutcome;
use crate::recipes::{Bundle, RecipeId};
use crate::state::{GameState, ShipLocation};
use crate::upgrades::UpgradeId;

/// What the arcade minigame hands back when a harvest run ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Units picked up during the run.
    pub collected: Bundle,
    /// Run ended early because shields gave out. Informational only: the
    /// haul is stowed the same way either way.
    pub aborted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Units that fit in the hold.
    pub stored: u32,
    /// Units lost because the hold was full.
    pub dropped: u32,
    pub tick: TickOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScienceMissionOutcome {
    pub deployed: u32,
    pub science_earned: u32,
    /// `None` when no clone could be sent, so no time passed.
    pub tick: Option<TickOutcome>,
}

pub struct GameSession<S: SaveStore> {
    state: GameState,
    store: S,
    config: GameConfig,
}

impl<S: SaveStore> GameSession<S> {
    /// Start a fresh game. Nothing is read from the store.
    pub fn new(config: GameConfig, store: S) -> Self {
        Self {
            state: GameState::new(&config),
            store,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Mirror the current state into the save slot. Failures are logged only.
    ///
    /// A finished race is never written; its slot stays cleared.
    pub fn save(&mut self) {
        if self.state.game_over {
            log::debug!("Race finished, not saving");
            return;
        }
        let result = serialize_state(&self.state)
            .and_then(|json| self.store.write(&self.config.save_key, &json));
        match result {
            Ok(()) => log::debug!("Game saved"),
            Err(e) => log::warn!("Failed to save game: {}", e),
        }
    }

    /// Restore from the save slot.
    ///
    /// Returns `false` and keeps (or restarts) a fresh game when there is no
    /// save, it can't be read, or it holds an already finished race.
    pub fn load(&mut self) -> bool {
        let json = match self.store.read(&self.config.save_key) {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("Failed to load game: {}", e);
                return false;
            }
        };

        let restored = match deserialize_state(&json) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Failed to load game: {}", e);
                return false;
            }
        };

        if restored.game_over {
            log::info!("Saved game already finished, starting fresh");
            self.reset();
            return false;
        }

        self.state = restored;
        log::info!("Game loaded from save");
        true
    }

    /// Delete the save slot.
    pub fn clear(&mut self) {
        match self.store.remove(&self.config.save_key) {
            Ok(()) => log::debug!("Save data cleared"),
            Err(e) => log::warn!("Failed to clear save: {}", e),
        }
    }

    /// Throw the current game away and start over.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        self.clear();
        log::info!("Game state reset");
    }

    fn commit(&mut self, changed: bool) -> bool {
        if changed {
            self.save();
        }
        changed
    }

    // ── Race ────────────────────────────────────────────────────────────

    pub fn tick(&mut self) -> TickOutcome {
        if self.state.game_over {
            return self.state.tick();
        }
        let outcome = self.state.tick();
        if outcome.game_over {
            self.clear();
        } else {
            self.save();
        }
        outcome
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    pub fn add_ingredient(&mut self, id: IngredientId, count: u32) -> bool {
        let added = self.state.add_ingredient(id, count);
        self.commit(added)
    }

    pub fn remove_ingredient(&mut self, id: IngredientId, count: u32) -> bool {
        let removed = self.state.remove_ingredient(id, count);
        self.commit(removed)
    }

    pub fn add_science(&mut self, amount: u32) {
        self.state.add_science(amount);
        self.save();
    }

    pub fn spend_science(&mut self, amount: u32) -> bool {
        let spent = self.state.spend_science(amount);
        self.commit(spent)
    }

    // ── Clones ──────────────────────────────────────────────────────────

    pub fn deploy_clones(&mut self, count: u32) -> u32 {
        let deployed = self.state.deploy_clones(count);
        self.commit(deployed > 0);
        deployed
    }

    pub fn return_clones(&mut self) -> u32 {
        let had_clones_out = self.state.clones.deployed_count > 0;
        let earned = self.state.return_clones();
        self.commit(had_clones_out);
        earned
    }

    // ── Shop, galley, ship ──────────────────────────────────────────────

    pub fn purchase(&mut self, id: UpgradeId) -> bool {
        let bought = self.state.purchase(id);
        self.commit(bought)
    }

    pub fn cook(&mut self, id: RecipeId) -> bool {
        let cooked = self.state.cook(id);
        self.commit(cooked)
    }

    pub fn cook_bundle(&mut self, bundle: &Bundle) -> Option<RecipeId> {
        let cooked = self.state.cook_bundle(bundle);
        self.commit(cooked.is_some());
        cooked
    }

    pub fn take_damage(&mut self) -> bool {
        let breached = self.state.take_damage();
        self.save();
        breached
    }

    pub fn repair_shields(&mut self) {
        self.state.repair_shields();
        self.save();
    }

    pub fn set_location(&mut self, location: ShipLocation) {
        self.state.set_location(location);
        self.save();
    }

    // ── Missions ────────────────────────────────────────────────────────

    /// Conclude a harvest run: stow the haul one unit at a time, then let
    /// one race tick pass. A finished race takes nothing aboard.
    pub fn complete_harvest(&mut self, report: &HarvestReport) -> HarvestOutcome {
        if self.state.game_over {
            log::warn!("Harvest ignored: race already finished");
            return HarvestOutcome {
                stored: 0,
                dropped: 0,
                tick: self.state.race_status().into(),
            };
        }

        let mut stored = 0;
        let mut dropped = 0;
        for (&id, &count) in &report.collected {
            for _ in 0..count {
                if self.state.add_ingredient(id, 1) {
                    stored += 1;
                } else {
                    dropped += 1;
                }
            }
        }
        log::info!(
            "Harvest {}: {} stored, {} dropped",
            if report.aborted { "aborted" } else { "complete" },
            stored,
            dropped
        );

        let tick = self.tick();
        HarvestOutcome {
            stored,
            dropped,
            tick,
        }
    }

    /// Send every free clone out, bring them back with their science, and
    /// let one race tick pass. Does nothing if no slot is free or the race
    /// is already over.
    pub fn run_science_mission(&mut self) -> ScienceMissionOutcome {
        if self.state.game_over {
            log::warn!("Science mission ignored: race already finished");
            return ScienceMissionOutcome {
                deployed: 0,
                science_earned: 0,
                tick: None,
            };
        }

        let free = self.state.clones.available_slots();
        let deployed = self.state.deploy_clones(free);
        if deployed == 0 {
            return ScienceMissionOutcome {
                deployed,
                science_earned: 0,
                tick: None,
            };
        }

        let science_earned = self.state.return_clones();
        let tick = self.tick();
        ScienceMissionOutcome {
            deployed,
            science_earned,
            tick: Some(tick),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, SaveError};
    use crate::race::RaceStatus;

    fn session() -> GameSession<MemoryStore> {
        GameSession::new(GameConfig::default(), MemoryStore::default())
    }

    fn key() -> String {
        GameConfig::default().save_key
    }

    /// Store whose writes always fail.
    #[derive(Default)]
    struct BrokenStore;

    impl SaveStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, SaveError> {
            Err(SaveError::Corrupt("unreadable".into()))
        }

        fn write(&mut self, _key: &str, _data: &str) -> Result<(), SaveError> {
            Err(SaveError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }

        fn remove(&mut self, _key: &str) -> Result<(), SaveError> {
            Ok(())
        }
    }

    #[test]
    fn test_mutations_are_mirrored() {
        let mut s = session();
        assert!(!s.store().contains(&key()));
        assert!(s.add_ingredient(IngredientId::Stardust, 2));
        assert!(s.store().contains(&key()));

        let saved = s.store().read(&key()).unwrap().unwrap();
        let restored = deserialize_state(&saved).unwrap();
        assert_eq!(&restored, s.state());
    }

    #[test]
    fn test_failed_operation_does_not_save() {
        let mut s = session();
        assert!(!s.purchase(UpgradeId::Cargo1));
        assert!(!s.store().contains(&key()));
    }

    #[test]
    fn test_load_restores_running_game() {
        let mut s = session();
        s.add_science(40);
        s.tick();

        let mut resumed = GameSession::new(GameConfig::default(), s.into_store());
        assert!(resumed.load());
        assert_eq!(resumed.state().science, 40);
        assert_eq!(resumed.state().race.tick, 1);
    }

    #[test]
    fn test_load_without_save() {
        let mut s = session();
        assert!(!s.load());
        assert_eq!(s.state(), &GameState::default());
    }

    #[test]
    fn test_load_rejects_finished_game() {
        let mut finished = GameState::default();
        finished.game_over = true;
        finished.victory = true;
        let mut store = MemoryStore::default();
        store
            .write(&key(), &serialize_state(&finished).unwrap())
            .unwrap();

        let mut s = GameSession::new(GameConfig::default(), store);
        assert!(!s.load());
        assert!(!s.state().game_over);
        assert!(!s.store().contains(&key()));
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let mut store = MemoryStore::default();
        store.write(&key(), "{ garbage").unwrap();
        let mut s = GameSession::new(GameConfig::default(), store);
        assert!(!s.load());
        assert_eq!(s.state(), &GameState::default());
    }

    #[test]
    fn test_terminal_tick_clears_save() {
        let mut s = session();
        s.add_science(1);
        assert!(s.store().contains(&key()));
        let mut outcome = s.tick();
        while !outcome.game_over {
            outcome = s.tick();
        }
        assert!(outcome.victory);
        assert_eq!(s.state().race_status(), RaceStatus::Victory);
        assert!(!s.store().contains(&key()));

        // Further ticks change nothing and do not resurrect the save.
        let before = s.state().clone();
        assert_eq!(s.tick(), outcome);
        assert_eq!(s.state(), &before);
        assert!(!s.store().contains(&key()));
    }

    #[test]
    fn test_finished_race_stays_unsaved() {
        let mut s = session();
        while !s.tick().game_over {}
        assert!(!s.store().contains(&key()));

        s.set_location(ShipLocation::Galley);
        s.add_science(5);
        assert!(s.add_ingredient(IngredientId::Stardust, 1));
        s.take_damage();
        s.repair_shields();
        assert!(!s.store().contains(&key()));

        let science = s.state().science;
        let mission = s.run_science_mission();
        assert_eq!(mission.deployed, 0);
        assert_eq!(mission.science_earned, 0);
        assert_eq!(mission.tick, None);
        assert_eq!(s.state().science, science);

        let harvest = s.complete_harvest(&HarvestReport {
            collected: [(IngredientId::VoidSalt, 2)].into_iter().collect(),
            aborted: false,
        });
        assert_eq!(harvest.stored, 0);
        assert!(harvest.tick.game_over && harvest.tick.victory);
        assert_eq!(s.state().ingredient_count(IngredientId::VoidSalt), 0);
        assert!(!s.store().contains(&key()));
    }

    #[test]
    fn test_reset_clears_save() {
        let mut s = session();
        s.add_science(50);
        s.reset();
        assert_eq!(s.state().science, 0);
        assert!(!s.store().contains(&key()));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut s = GameSession::new(GameConfig::default(), BrokenStore);
        assert!(s.add_ingredient(IngredientId::VoidSalt, 2));
        assert!(s.cook(RecipeId::VoidCrackers));
        assert_eq!(s.state().ship.current_cargo, 0);
        assert!(!s.load());
    }

    #[test]
    fn test_harvest_stores_until_full_then_ticks() {
        let mut s = session();
        let report = HarvestReport {
            collected: [(IngredientId::Stardust, 7), (IngredientId::CometTail, 6)]
                .into_iter()
                .collect(),
            aborted: false,
        };
        let outcome = s.complete_harvest(&report);
        assert_eq!(outcome.stored, 10);
        assert_eq!(outcome.dropped, 3);
        assert!(!outcome.tick.game_over);
        assert_eq!(s.state().race.tick, 1);
        assert_eq!(s.state().ship.current_cargo, 10);
    }

    #[test]
    fn test_aborted_harvest_still_stows_haul() {
        let mut s = session();
        let outcome = s.complete_harvest(&HarvestReport {
            collected: [(IngredientId::CometTail, 3)].into_iter().collect(),
            aborted: true,
        });
        assert_eq!(outcome.stored, 3);
        assert_eq!(s.state().ingredient_count(IngredientId::CometTail), 3);
        assert_eq!(s.state().race.tick, 1);
    }

    #[test]
    fn test_science_mission() {
        let mut s = session();
        let outcome = s.run_science_mission();
        assert_eq!(outcome.deployed, 2);
        assert_eq!(outcome.science_earned, 10);
        assert!(outcome.tick.is_some());
        assert_eq!(s.state().science, 10);
        assert_eq!(s.state().clones.deployed_count, 0);
        assert_eq!(s.state().race.tick, 1);
    }

    #[test]
    fn test_science_mission_with_no_free_slots() {
        let mut s = session();
        s.deploy_clones(2);
        let outcome = s.run_science_mission();
        assert_eq!(outcome.deployed, 0);
        assert_eq!(outcome.tick, None);
        assert_eq!(s.state().race.tick, 0);
    }
}
