//! Headless surface that records draw calls instead of painting

use glam::Vec2;

use super::Surface;
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: String,
        width: f32,
    },
    FillText {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Surface that keeps the calls of the most recent frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Frames started (a clear of the origin marks a new frame)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> impl Iterator<Item = (Rect, &str)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::FillRect { rect, color } => Some((*rect, color.as_str())),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::StrokeLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, rect: Rect) {
        if rect.pos == Vec2::ZERO {
            self.calls.clear();
            self.frames += 1;
        }
        self.calls.push(DrawCall::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32) {
        self.calls.push(DrawCall::StrokeLine {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}
