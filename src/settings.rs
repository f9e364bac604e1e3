//! Game tunables
//!
//! Every gameplay number that is not a fixed array size lives here. Settings
//! load from JSON; missing fields fall back to the defaults.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Session ===
    pub max_rounds: u32,
    pub starting_lives: u32,

    // === Formations ===
    /// Left inset of the first alien
    pub gutter: i32,
    /// Spacing between aliens and rows
    pub gap: i32,
    /// Alien bottom edge that counts as reaching the base
    pub base_line: i32,
    /// Round-one alien speed; later rounds scale from it
    pub alien_base_speed: i32,

    // === Player ===
    pub player_speed: i32,
    pub bullet_speed: i32,
    /// Ticks between shots
    pub bullet_cooldown: u32,

    // === Backdrop ===
    pub scroll_speed: i32,
    pub scroll_speed_step: i32,

    // === Assets ===
    /// Color keyed out of every sprite sheet, `#RRGGBB`
    pub transparent_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            max_rounds: MAX_ROUNDS,
            starting_lives: STARTING_LIVES,

            gutter: GUTTER_SIZE,
            gap: GAP_SIZE,
            base_line: BASE_LINE,
            alien_base_speed: 1,

            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            bullet_cooldown: BULLET_COOLDOWN,

            scroll_speed: SCROLL_SPEED,
            scroll_speed_step: SCROLL_SPEED_STEP,

            transparent_key: "#000000".to_string(),
        }
    }
}

impl Settings {
    #[inline]
    pub fn screen(&self) -> IVec2 {
        IVec2::new(self.screen_width, self.screen_height)
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return invalid("screen_width/screen_height", "must be positive");
        }
        if self.max_rounds == 0 {
            return invalid("max_rounds", "must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.gutter < 0 || self.gap < 0 {
            return invalid("gutter/gap", "must not be negative");
        }
        if self.base_line <= 0 || self.base_line > self.screen_height {
            return invalid("base_line", "must lie on screen");
        }
        if self.alien_base_speed <= 0 || self.player_speed <= 0 || self.bullet_speed <= 0 {
            return invalid("speeds", "must be positive");
        }
        if self.scroll_speed < 0 || self.scroll_speed_step < 0 {
            return invalid("scroll_speed/scroll_speed_step", "must not be negative");
        }
        Ok(())
    }
}
