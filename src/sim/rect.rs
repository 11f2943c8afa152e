//! Axis-aligned bounding boxes
//!
//! Every collision test in the game is an AABB overlap check; this is the one
//! spatial primitive everything else builds on.

use glam::Vec2;

/// Axis-aligned box. Origin is the top-left corner; width/height are >= 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "negative rect extent");
        Self { x, y, w, h }
    }

    /// Open-interval overlap test: boxes that only touch at an edge do NOT
    /// collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}
