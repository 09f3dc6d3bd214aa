//! Farmer Game - collect crops on a farm field before the clock runs out
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, phase state machine, spawning)
//! - `input`: Held-key tracking behind an injected input source
//! - `renderer`: Draw-call surface abstraction and scene drawing
//! - `ui`: HUD text slots (score, time, goal, status)
//! - `game`: Controller tying simulation, input, HUD and rendering together
//! - `platform`: Browser bindings (canvas, DOM, requestAnimationFrame)
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use settings::{PauseTrigger, Settings};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (logical canvas units)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Grid unit for background lines and spawn alignment
    pub const TILE: f32 = 30.0;

    /// Round length in seconds
    pub const GAME_LEN: f32 = 60.0;
    /// Score that wins the round immediately
    pub const GOAL: u32 = 15;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Spawn interval at the start of a round (seconds)
    pub const SPAWN_EVERY_START: f32 = 0.8;
    /// How much the spawn interval shrinks by the end of a round
    pub const SPAWN_EVERY_RAMP: f32 = 0.5;

    /// Farmer defaults
    pub const FARMER_WIDTH: f32 = 34.0;
    pub const FARMER_HEIGHT: f32 = 40.0;
    pub const FARMER_SPEED: f32 = 160.0;
    /// Start position sits centered near the bottom edge
    pub const FARMER_START_X: f32 = FIELD_WIDTH / 2.0 - 17.0;
    pub const FARMER_START_Y: f32 = FIELD_HEIGHT - 80.0;

    /// Crop square side
    pub const CROP_SIZE: f32 = 24.0;

    /// Scarecrow size and fixed layout
    pub const SCARECROW_WIDTH: f32 = 30.0;
    pub const SCARECROW_HEIGHT: f32 = 40.0;
    pub const SCARECROW_LAYOUT: [(f32, f32); 2] = [(200.0, 220.0), (650.0, 160.0)];
}

/// Restrict `value` to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}
