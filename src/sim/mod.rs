//! Simulation module
//!
//! All gameplay logic lives here. No rendering, DOM or platform dependencies:
//! - Variable timestep driven by the frame clock
//! - Seeded RNG only
//! - Stable iteration order (crops kept in spawn order)

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect, aabb, overlaps};
pub use entity::{CROP_TYPES, Crop, CropType, Farmer, Scarecrow};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
