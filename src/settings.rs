//! Game constants
//!
//! Every number the simulation depends on lives here and is threaded into
//! the engine explicitly. Loaded from a JSON file or taken from defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Physics, arena and scoring constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Width of a grid cell [pixels]
    pub cell_width: i32,
    /// Height of a grid cell [pixels]
    pub cell_height: i32,
    /// Arena width [cells]
    pub grid_width: i32,
    /// Arena height [cells]
    pub grid_height: i32,

    // === Man physics (pixels per frame) ===
    pub move_speed: i32,
    pub climb_speed: i32,
    /// Added to dy every falling frame
    pub gravity: i32,
    /// Initial vertical speed of a jump (negative = up)
    pub jump_speed: i32,

    // === Run ===
    pub initial_score: u32,
    /// Countdown at the start of a level [frames]
    pub initial_time: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,

            move_speed: CELL_WIDTH / 6,
            climb_speed: CELL_HEIGHT / 4,
            gravity: CELL_HEIGHT / SPRITE_HEIGHT,
            jump_speed: -CELL_HEIGHT / 2,

            initial_score: 0,
            initial_time: INITIAL_TIME,
        }
    }
}

impl Settings {
    /// Rightmost pixel x the man can occupy
    pub fn max_x(&self) -> i32 {
        (self.grid_width - 1) * self.cell_width
    }

    /// Lowest pixel y the man can occupy
    pub fn max_y(&self) -> i32 {
        (self.grid_height - 1) * self.cell_height
    }

    /// Terminal falling speed (the jump's initial speed, pointing down)
    pub fn max_fall_speed(&self) -> i32 {
        -self.jump_speed
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
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

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
            ("move_speed", self.move_speed),
            ("climb_speed", self.climb_speed),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(SettingsError::Invalid(format!(
                "{name} must be positive, got {value}"
            )));
        }
        let width = self.grid_width.checked_mul(self.cell_width);
        let height = self.grid_height.checked_mul(self.cell_height);
        if width.is_none() || height.is_none() {
            return Err(SettingsError::Invalid(format!(
                "arena of {}x{} cells at {}x{} pixels does not fit in i32",
                self.grid_width, self.grid_height, self.cell_width, self.cell_height
            )));
        }
        // A frame never moves the man further than one cell
        let per_frame = [
            ("move_speed", self.move_speed, self.cell_width),
            ("climb_speed", self.climb_speed, self.cell_height),
            ("jump_speed", self.jump_speed.saturating_neg(), self.cell_height),
            ("gravity", self.gravity, self.cell_height),
        ];
        if let Some((name, _, cell)) = per_frame.iter().find(|(_, v, cell)| v > cell) {
            return Err(SettingsError::Invalid(format!(
                "{name} must not exceed one cell ({cell} pixels) per frame"
            )));
        }
        if self.jump_speed >= 0 {
            return Err(SettingsError::Invalid(format!(
                "jump_speed must be negative (upward), got {}",
                self.jump_speed
            )));
        }
        if self.gravity < 0 {
            return Err(SettingsError::Invalid(format!(
                "gravity must not be negative, got {}",
                self.gravity
            )));
        }
        if self.initial_time < 0 {
            return Err(SettingsError::Invalid(format!(
                "initial_time must not be negative, got {}",
                self.initial_time
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sprite_geometry() {
        let s = Settings::default();
        assert_eq!(s.cell_width, 48);
        assert_eq!(s.cell_height, 32);
        assert_eq!(s.move_speed, 8);
        assert_eq!(s.climb_speed, 8);
        assert_eq!(s.gravity, 2);
        assert_eq!(s.jump_speed, -16);
        assert_eq!(s.max_fall_speed(), 16);
        assert_eq!(s.max_x(), 19 * 48);
        assert_eq!(s.max_y(), 23 * 32);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let s = Settings::from_json(r#"{ "initial_time": 100, "move_speed": 4 }"#).unwrap();
        assert_eq!(s.initial_time, 100);
        assert_eq!(s.move_speed, 4);
        assert_eq!(s.cell_width, CELL_WIDTH);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "cell_width": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "jump_speed": 5 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_arena_overflow() {
        let wide = Settings {
            grid_width: i32::MAX / 2,
            ..Settings::default()
        };
        assert!(matches!(wide.validate(), Err(SettingsError::Invalid(_))));

        let tall = Settings {
            cell_height: 1 << 20,
            grid_height: 1 << 12,
            ..Settings::default()
        };
        assert!(matches!(tall.validate(), Err(SettingsError::Invalid(_))));

        // Largest arena that still fits
        let edge = Settings {
            grid_width: i32::MAX / CELL_WIDTH,
            ..Settings::default()
        };
        assert!(edge.validate().is_ok());
        assert!(edge.max_x() > 0);
    }

    #[test]
    fn test_rejects_speeds_over_one_cell() {
        assert!(matches!(
            Settings::from_json(r#"{ "move_speed": 49 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(&format!(r#"{{ "jump_speed": {} }}"#, i32::MIN)),
            Err(SettingsError::Invalid(_))
        ));
        assert!(Settings::from_json(r#"{ "move_speed": 48 }"#).is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
