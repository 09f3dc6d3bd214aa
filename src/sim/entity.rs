//! Field entities: the farmer, crops and scarecrows

use std::borrow::Cow;
use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use crate::clamp;
use crate::consts::*;

/// Kind of crop: how many points it is worth and how it is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropType {
    pub name: Cow<'static, str>,
    pub points: u32,
    /// CSS colour used to draw the crop
    pub color: Cow<'static, str>,
}

impl CropType {
    pub const fn new(name: &'static str, points: u32, color: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            points,
            color: Cow::Borrowed(color),
        }
    }
}

/// Fallback used when a crop is created without a type
impl Default for CropType {
    fn default() -> Self {
        Self::new("default", 1, "#4caf50")
    }
}

pub const WHEAT: CropType = CropType::new("wheat", 1, "#c2a679");
pub const PUMPKIN: CropType = CropType::new("pumpkin", 3, "#ff5722");
pub const GOLDEN_APPLE: CropType = CropType::new("golden_apple", 5, "#ffd700");

/// Built-in crop table, picked from uniformly when spawning
pub const CROP_TYPES: [CropType; 3] = [WHEAT, PUMPKIN, GOLDEN_APPLE];

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Farmer {
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per second
    pub speed: f32,
    /// Movement direction, each axis in {-1, 0, 1}
    pub dir: Vec2,
}

impl Farmer {
    pub const COLOR: &'static str = "#3b6ba5";

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(FARMER_WIDTH, FARMER_HEIGHT),
            speed: FARMER_SPEED,
            dir: Vec2::ZERO,
        }
    }

    /// Derive the movement direction from the held keys.
    /// Opposing keys cancel each other out.
    pub fn handle_input(&mut self, keys: &HashSet<String>) {
        let held = |a: &str, b: &str| keys.contains(a) || keys.contains(b);

        let mut dir = Vec2::ZERO;
        if held("ArrowLeft", "a") {
            dir.x -= 1.0;
        }
        if held("ArrowRight", "d") {
            dir.x += 1.0;
        }
        if held("ArrowUp", "w") {
            dir.y -= 1.0;
        }
        if held("ArrowDown", "s") {
            dir.y += 1.0;
        }
        self.dir = dir;
    }

    /// Move by `dir * speed * dt`, then keep the whole sprite inside `field`.
    pub fn update(&mut self, dt: f32, field: Vec2) {
        self.pos += self.dir * self.speed * dt;
        self.pos.x = clamp(self.pos.x, 0.0, field.x - self.size.x);
        self.pos.y = clamp(self.pos.y, 0.0, field.y - self.size.y);
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

impl Default for Farmer {
    fn default() -> Self {
        Self::new(Vec2::new(FARMER_START_X, FARMER_START_Y))
    }
}

impl Bounded for Farmer {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A collectible crop
#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: CropType,
    /// Set once collected; dead crops are dropped at the end of the tick
    pub dead: bool,
}

impl Crop {
    pub fn new(pos: Vec2, kind: Option<CropType>) -> Self {
        Self {
            pos,
            size: Vec2::splat(CROP_SIZE),
            kind: kind.unwrap_or_default(),
            dead: false,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points
    }

    pub fn color(&self) -> &str {
        &self.kind.color
    }

    /// Crops are static for now
    pub fn update(&mut self, _dt: f32) {}
}

impl Bounded for Crop {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Decorative obstacle. Drawn only; the farmer walks straight through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scarecrow {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Scarecrow {
    pub const COLOR: &'static str = "#8b5a2b";

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(SCARECROW_WIDTH, SCARECROW_HEIGHT),
        }
    }

    /// The fixed two-scarecrow field layout
    pub fn layout() -> Vec<Scarecrow> {
        SCARECROW_LAYOUT
            .iter()
            .map(|&(x, y)| Scarecrow::new(Vec2::new(x, y)))
            .collect()
    }
}

impl Bounded for Scarecrow {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
