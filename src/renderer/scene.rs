//! Scene drawing: background grid, crops, scarecrows, farmer, phase banner

use glam::Vec2;

use super::Surface;
use crate::sim::entity::{Farmer, Scarecrow};
use crate::sim::{Bounded, GamePhase, GameState, Rect};

const BACKGROUND: &str = "#dff0d5";
const GRID_LINE: &str = "#c7e0bd";
const CROP_LABEL: &str = "#000";
const CROP_LABEL_FONT: &str = "12px sans-serif";
const BANNER: &str = "#333";
const BANNER_FONT: &str = "16px system-ui, sans-serif";
const BANNER_POS: Vec2 = Vec2::new(20.0, 28.0);

/// Presentation switches that do not affect play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    /// Label each crop with its point value
    pub crop_points: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { crop_points: true }
    }
}

/// Banner drawn over the field for each phase (none while playing)
pub fn banner_text(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Menu => Some("Press Start to Begin"),
        GamePhase::Paused => Some("Paused (press P to resume)"),
        GamePhase::GameOver => Some("Game Over! Press Reset to return to Menu."),
        GamePhase::Win => Some("You Win! Press Reset to play again."),
        GamePhase::Playing => None,
    }
}

/// Draw one full frame of `state`
pub fn render(state: &GameState, surface: &mut dyn Surface, options: SceneOptions) {
    let field = state.tuning.field_size();
    let full = Rect::new(Vec2::ZERO, field);

    surface.clear(full);
    surface.fill_rect(full, BACKGROUND);
    draw_grid(surface, field, state.tuning.tile);

    for crop in &state.crops {
        surface.fill_rect(crop.bounds(), crop.color());
        if options.crop_points {
            surface.fill_text(
                &crop.points().to_string(),
                crop.pos - Vec2::new(0.0, 4.0),
                CROP_LABEL_FONT,
                CROP_LABEL,
            );
        }
    }
    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle.bounds(), Scarecrow::COLOR);
    }
    surface.fill_rect(state.farmer.bounds(), Farmer::COLOR);

    if let Some(text) = banner_text(state.phase) {
        surface.fill_text(text, BANNER_POS, BANNER_FONT, BANNER);
    }
}

fn draw_grid(surface: &mut dyn Surface, field: Vec2, tile: f32) {
    let mut y = tile;
    while y < field.y {
        surface.stroke_line(Vec2::new(0.0, y), Vec2::new(field.x, y), GRID_LINE, 1.0);
        y += tile;
    }
    let mut x = tile;
    while x < field.x {
        surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, field.y), GRID_LINE, 1.0);
        x += tile;
    }
}
