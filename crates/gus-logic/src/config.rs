//! Tunable starting values for a new game.
//!
//! Every field has a default matching the shipped balance, so a config file
//! only needs to name what it changes:
//!
//! ```
//! use gus_logic::config::{validate_config, GameConfig};
//!
//! let config = GameConfig::from_json(r#"{ "race": { "earth_speed": 3 } }"#).unwrap();
//! assert_eq!(config.race.earth_speed, 3);
//! assert_eq!(config.race.track_length, 100);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Fixed storage slot for the save snapshot.
pub const DEFAULT_SAVE_KEY: &str = "gus_must_eat_save";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Earth wins on reaching this position.
    pub track_length: i32,
    pub earth_start: i32,
    pub gus_start: i32,
    /// Base distance per tick.
    pub earth_speed: i32,
    pub gus_speed: i32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            track_length: 100,
            earth_start: 50,
            gus_start: 0,
            earth_speed: 2,
            gus_speed: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    pub slots: u32,
    /// Science per clone per mission.
    pub efficiency: u32,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            slots: 2,
            efficiency: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub cargo_capacity: u32,
    pub weapon_damage: u32,
    pub shield_hits: i32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            cargo_capacity: 10,
            weapon_damage: 10,
            shield_hits: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub race: RaceConfig,
    pub clones: CloneConfig,
    pub ship: ShipConfig,
    pub save_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            race: RaceConfig::default(),
            clones: CloneConfig::default(),
            ship: ShipConfig::default(),
            save_key: DEFAULT_SAVE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config over the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Validate a config, returning a list of problems (empty = valid).
pub fn validate_config(config: &GameConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let race = &config.race;

    if race.track_length <= race.earth_start {
        errors.push(format!(
            "track_length ({}) must be beyond earth_start ({})",
            race.track_length, race.earth_start
        ));
    }
    if race.gus_start >= race.earth_start {
        errors.push(format!(
            "gus_start ({}) must be behind earth_start ({})",
            race.gus_start, race.earth_start
        ));
    }
    if race.gus_speed < 0 {
        errors.push("gus_speed must not be negative".into());
    }
    if config.ship.cargo_capacity == 0 {
        errors.push("cargo_capacity must be positive".into());
    }
    if config.ship.shield_hits <= 0 {
        errors.push("shield_hits must be positive".into());
    }
    if config.save_key.trim().is_empty() {
        errors.push("save_key must not be empty".into());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&GameConfig::default()).is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "clones": { "slots": 4 } }"#).unwrap();
        assert_eq!(config.clones.slots, 4);
        assert_eq!(config.clones.efficiency, 5);
        assert_eq!(config.ship, ShipConfig::default());
        assert_eq!(config.save_key, DEFAULT_SAVE_KEY);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(GameConfig::from_json("{ race: ").is_err());
    }

    #[test]
    fn test_gus_ahead_of_earth_rejected() {
        let mut config = GameConfig::default();
        config.race.gus_start = 60;
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("gus_start"));
    }

    #[test]
    fn test_short_track_rejected() {
        let mut config = GameConfig::default();
        config.race.track_length = 40;
        assert!(validate_config(&config)
            .iter()
            .any(|e| e.contains("track_length")));
    }

    #[test]
    fn test_blank_save_key_rejected() {
        let config = GameConfig {
            save_key: "  ".into(),
            ..Default::default()
        };
        assert_eq!(validate_config(&config).len(), 1);
    }
}
