//! Race engine — Earth flees along the track, Gus gives chase.
//!
//! One [`GameState::tick`] is one discrete step:
//!
//! 1. Effective Gus speed = base + modifier, clamped to >= 0.
//! 2. Effective Earth speed = base + modifier, unclamped (Earth may retreat).
//! 3. Both positions advance.
//! 4. An active modifier loses one tick; at zero both modifiers clear.
//! 5. The tick counter increments.
//! 6. Earth past the track end is Victory; otherwise Gus on or past Earth is
//!    Defeat. Victory wins a tie.
//!
//! Ticking a finished race is rejected: nothing moves and the final outcome
//! is returned again.

use serde::{Deserialize, Serialize};

use crate::config::RaceConfig;
use crate::recipes::{RecipeEffect, SpeedModifier};
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
    Running,
    Victory,
    Defeat,
}

impl RaceStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// What the caller gets back from a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickOutcome {
    pub game_over: bool,
    pub victory: bool,
}

impl From<RaceStatus> for TickOutcome {
    fn from(status: RaceStatus) -> Self {
        Self {
            game_over: status.is_terminal(),
            victory: status == RaceStatus::Victory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceState {
    pub track_length: i32,
    pub earth_position: i32,
    pub gus_position: i32,
    pub earth_speed: i32,
    pub gus_speed: i32,
    pub earth_modifier: SpeedModifier,
    pub gus_modifier: SpeedModifier,
    /// Ticks left before both modifiers clear.
    pub modifier_duration: u32,
    pub tick: u64,
}

impl RaceState {
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            track_length: config.track_length,
            earth_position: config.earth_start,
            gus_position: config.gus_start,
            earth_speed: config.earth_speed,
            gus_speed: config.gus_speed,
            earth_modifier: SpeedModifier::NONE,
            gus_modifier: SpeedModifier::NONE,
            modifier_duration: 0,
            tick: 0,
        }
    }

    pub fn effective_gus_speed(&self) -> i32 {
        self.gus_modifier.apply(self.gus_speed).max(0)
    }

    pub fn effective_earth_speed(&self) -> i32 {
        self.earth_modifier.apply(self.earth_speed)
    }

    /// Gap between Earth and Gus. Zero or less means Gus has caught up.
    pub fn lead(&self) -> i32 {
        self.earth_position - self.gus_position
    }

    /// Install a dish's effect, replacing whatever was active.
    ///
    /// A zero-duration effect would never expire, so it clears the
    /// modifiers instead.
    pub fn apply_effect(&mut self, effect: &RecipeEffect) {
        if effect.duration == 0 {
            self.clear_modifiers();
            return;
        }
        self.gus_modifier = effect.gus;
        self.earth_modifier = effect.earth;
        self.modifier_duration = effect.duration;
    }

    pub fn clear_modifiers(&mut self) {
        self.gus_modifier = SpeedModifier::NONE;
        self.earth_modifier = SpeedModifier::NONE;
        self.modifier_duration = 0;
    }

    /// Current standing, without advancing.
    pub fn status(&self) -> RaceStatus {
        if self.earth_position >= self.track_length {
            RaceStatus::Victory
        } else if self.gus_position >= self.earth_position {
            RaceStatus::Defeat
        } else {
            RaceStatus::Running
        }
    }

    /// Advance one step and report the resulting status.
    pub fn step(&mut self) -> RaceStatus {
        let gus = self.effective_gus_speed();
        let earth = self.effective_earth_speed();

        self.gus_position = self.gus_position.saturating_add(gus);
        self.earth_position = self.earth_position.saturating_add(earth);

        if self.modifier_duration > 0 {
            self.modifier_duration -= 1;
            if self.modifier_duration == 0 {
                self.clear_modifiers();
                log::debug!("Recipe effects expired");
            }
        }

        self.tick += 1;
        self.status()
    }
}

impl GameState {
    pub fn race_status(&self) -> RaceStatus {
        if !self.game_over {
            RaceStatus::Running
        } else if self.victory {
            RaceStatus::Victory
        } else {
            RaceStatus::Defeat
        }
    }

    /// Advance the race one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            log::warn!("Tick ignored: race already finished");
            return self.race_status().into();
        }

        let status = self.race.step();
        log::info!(
            "Race tick {}: gus={} earth={}",
            self.race.tick,
            self.race.gus_position,
            self.race.earth_position
        );

        match status {
            RaceStatus::Victory => log::info!("Victory! Earth reached the flywheel"),
            RaceStatus::Defeat => log::info!("Defeat! Gus caught Earth"),
            RaceStatus::Running => {}
        }
        self.game_over = status.is_terminal();
        self.victory = status == RaceStatus::Victory;
        status.into()
    }

    /// Install a dish's effect on the race, replacing any active one.
    ///
    /// An effect with `duration == 0` would never expire, so instead of
    /// installing it this clears both modifiers.
    pub fn apply_recipe_effect(&mut self, effect: &RecipeEffect) {
        self.race.apply_effect(effect);
        log::info!(
            "Recipe effect applied: gus={:?} earth={:?} for {} ticks",
            effect.gus,
            effect.earth,
            effect.duration
        );
    }
}
