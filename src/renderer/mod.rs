//! Rendering module
//!
//! The scene is drawn through the small [`Surface`] capability set so the same
//! drawing code runs against a browser canvas or a headless recorder.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recorder;
pub mod scene;

use glam::Vec2;

use crate::sim::Rect;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recorder::{DrawCall, RecordingSurface};
pub use scene::{SceneOptions, banner_text, render};

/// Minimal 2D drawing capabilities the game needs
pub trait Surface {
    /// Clear a rectangle to transparent
    fn clear(&mut self, rect: Rect);
    /// Fill a rectangle with a CSS colour
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Stroke a straight line
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32);
    /// Draw text with its baseline starting at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}
