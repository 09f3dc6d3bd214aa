//! Data-driven game balance
//!
//! Defaults mirror [`crate::consts`]. A JSON document can override any field;
//! values that would break the simulation are rejected by [`Tuning::validate`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::{CROP_TYPES, CropType};

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    /// Document was not valid JSON for the target type
    Parse(serde_json::Error),
    /// Document parsed but a value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub tile: f32,
    /// Round length (seconds)
    pub game_len: f32,
    pub goal: u32,
    /// Frame delta cap (seconds)
    pub max_frame_dt: f32,
    /// Spawn interval at round start (seconds)
    pub spawn_every_start: f32,
    /// Spawn interval reduction reached at round end (seconds)
    pub spawn_every_ramp: f32,
    pub crop_types: Vec<CropType>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tile: TILE,
            game_len: GAME_LEN,
            goal: GOAL,
            max_frame_dt: MAX_FRAME_DT,
            spawn_every_start: SPAWN_EVERY_START,
            spawn_every_ramp: SPAWN_EVERY_RAMP,
            crop_types: CROP_TYPES.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        if tuning.crop_types.is_empty() {
            log::warn!("Tuning has no crop types, using the default crop");
            tuning.crop_types.push(CropType::default());
        }
        Ok(tuning)
    }

    /// Parse a tuning document, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("tile", self.tile),
            ("game_len", self.game_len),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.spawn_every_ramp >= 0.0 && self.spawn_every_start > self.spawn_every_ramp) {
            return Err(ConfigError::Invalid(format!(
                "spawn interval must stay positive (start {}, ramp {})",
                self.spawn_every_start, self.spawn_every_ramp
            )));
        }
        Ok(())
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Spawn interval for a given amount of time left in the round.
    /// Shrinks linearly from `spawn_every_start` to `start - ramp`.
    pub fn spawn_interval(&self, time_left: f32) -> f32 {
        let progress = 1.0 - time_left / self.game_len;
        self.spawn_every_start - self.spawn_every_ramp * progress
    }
}
