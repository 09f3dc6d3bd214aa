//! Player preferences
//!
//! Supplied by the host page as JSON at startup; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// When holding the pause key should toggle pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PauseTrigger {
    /// Every key-down event toggles, including auto-repeat
    #[default]
    EveryKeyDown,
    /// Only the first key-down of a press toggles
    PressEdge,
}

impl PauseTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            PauseTrigger::EveryKeyDown => "every_key_down",
            PauseTrigger::PressEdge => "press_edge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "every_key_down" | "repeat" => Some(PauseTrigger::EveryKeyDown),
            "press_edge" | "edge" => Some(PauseTrigger::PressEdge),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pause key behaviour
    pub pause_trigger: PauseTrigger,
    /// Draw each crop's point value above it
    pub show_crop_points: bool,
    /// Fixed RNG seed (random per page load when unset)
    pub seed: Option<u64>,
    /// Log at debug level instead of info
    pub verbose_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pause_trigger: PauseTrigger::EveryKeyDown,
            show_crop_points: true,
            seed: None,
            verbose_logging: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.verbose_logging {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}
