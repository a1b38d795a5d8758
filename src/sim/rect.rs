//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows to the right, y grows downward, origin at the
//! canvas top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanning `min..max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from a top-left corner and a size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Shrink every side inward by `amount`
    pub fn shrink(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    /// Closed-interval overlap on the x axis (touching edges count)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x && self.min.x <= other.max.x
    }

    /// Whether this rect's vertical extent lies within `[top, bottom]`
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y >= top && self.max.y <= bottom
    }
}
