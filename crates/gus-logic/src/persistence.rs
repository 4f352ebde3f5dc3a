//! Save/Load functionality for persisting game state
//!
//! Uses serde_json for a portable text snapshot stored in a single
//! key-value slot. Set-valued fields are written as sorted lists.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clones::CloneState;
use crate::race::RaceState;
use crate::recipes::RecipeId;
use crate::ship::ShipState;
use crate::state::{GameState, Inventory, ShipLocation};
use crate::upgrades::UpgradeId;

/// Version number for save format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub race: RaceState,
    pub inventory: Inventory,
    pub science: u32,
    pub clones: CloneState,
    pub ship: ShipState,
    pub upgrades: UpgradeSave,
    pub recipes: RecipeSave,
    pub current_location: ShipLocation,
    pub game_over: bool,
    pub victory: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpgradeSave {
    pub purchased: Vec<UpgradeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeSave {
    pub unlocked: Vec<RecipeId>,
}

impl From<&GameState> for SaveData {
    fn from(state: &GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            race: state.race.clone(),
            inventory: state.inventory.clone(),
            science: state.science,
            clones: state.clones.clone(),
            ship: state.ship.clone(),
            upgrades: UpgradeSave {
                purchased: state.purchased_upgrades.iter().copied().collect(),
            },
            recipes: RecipeSave {
                unlocked: state.unlocked_recipes.iter().copied().collect(),
            },
            current_location: state.current_location,
            game_over: state.game_over,
            victory: state.victory,
        }
    }
}

impl TryFrom<SaveData> for GameState {
    type Error = SaveError;

    fn try_from(data: SaveData) -> Result<Self, Self::Error> {
        if data.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: data.version,
            });
        }

        let held: u64 = data.inventory.values().map(|&n| u64::from(n)).sum();
        if held != u64::from(data.ship.current_cargo) {
            return Err(SaveError::Corrupt(format!(
                "cargo count {} does not match inventory total {}",
                data.ship.current_cargo, held
            )));
        }

        Ok(Self {
            race: data.race,
            inventory: data.inventory,
            science: data.science,
            clones: data.clones,
            ship: data.ship,
            purchased_upgrades: data.upgrades.purchased.into_iter().collect(),
            unlocked_recipes: data.recipes.unlocked.into_iter().collect(),
            current_location: data.current_location,
            game_over: data.game_over,
            victory: data.victory,
        })
    }
}

/// Snapshot a state as JSON text.
pub fn serialize_state(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&SaveData::from(state))?)
}

/// Rebuild a state from JSON text.
pub fn deserialize_state(json: &str) -> Result<GameState, SaveError> {
    let data: SaveData = serde_json::from_str(json)?;
    GameState::try_from(data)
}

/// Write a snapshot to any writer
pub fn write_snapshot<W: Write>(writer: W, state: &GameState) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &SaveData::from(state))?;
    Ok(())
}

/// Read a snapshot from any reader
pub fn read_snapshot<R: Read>(reader: R) -> Result<GameState, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    GameState::try_from(data)
}

/// Durable key-value slot storage (browser local storage, a directory, ...).
pub trait SaveStore {
    /// Stored text for `key`, or `None` if nothing is saved there.
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        self.slots.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), data)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
    Corrupt(String),
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Json(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Corrupt(msg) => write!(f, "Corrupt save: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::ingredients::IngredientId;
    use crate::recipes::SpeedModifier;

    fn played_state() -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.add_science(100);
        state.purchase(UpgradeId::Cookbook1);
        state.purchase(UpgradeId::Shields1);
        state.add_ingredient(IngredientId::SingularitySeed, 1);
        state.add_ingredient(IngredientId::NebulaNectar, 2);
        state.race.gus_modifier = SpeedModifier::Frozen;
        state.race.modifier_duration = 1;
        state.tick();
        state.take_damage();
        state.set_location(ShipLocation::CloneBay);
        state
    }

    #[test]
    fn test_save_load_roundtrip() {
        let state = played_state();
        let json = serialize_state(&state).expect("Save failed");
        let loaded = deserialize_state(&json).expect("Load failed");
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_sets_written_as_lists() {
        let json = serialize_state(&played_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let purchased = value["upgrades"]["purchased"].as_array().unwrap();
        assert_eq!(purchased.len(), 2);
        assert!(value["recipes"]["unlocked"].is_array());
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(value["current_location"], "clonebay");
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            deserialize_state("{ not json"),
            Err(SaveError::Json(_))
        ));
        assert!(matches!(
            deserialize_state(r#"{"version": 1}"#),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let json = serialize_state(&played_state()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["version"] = serde_json::json!(SAVE_VERSION + 1);
        let err = deserialize_state(&value.to_string()).unwrap_err();
        assert!(matches!(err, SaveError::VersionMismatch { found, .. } if found == SAVE_VERSION + 1));
    }

    #[test]
    fn test_cargo_mismatch_rejected() {
        let mut state = played_state();
        state.ship.current_cargo += 1;
        let json = serialize_state(&state).unwrap();
        assert!(matches!(deserialize_state(&json), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn test_writer_reader_roundtrip() {
        let state = played_state();
        let mut buffer = Vec::new();
        write_snapshot(&mut buffer, &state).unwrap();
        let loaded = read_snapshot(&buffer[..]).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.read("slot").unwrap(), None);
        store.write("slot", "data").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("data"));
        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert!(!store.contains("slot"));
    }

    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("gus-logic-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.read("slot").unwrap(), None);
        store.write("slot", "{}").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("{}"));
        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert_eq!(store.read("slot").unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_display() {
        let err = SaveError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(err.to_string(), "Save version mismatch: expected 1, found 2");
    }
}
