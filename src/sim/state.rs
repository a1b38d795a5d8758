//! Run state and core simulation types
//!
//! Everything a single run mutates lives in [`RunState`]. It is replaced
//! wholesale on every reset; nothing carries over between runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::input::TickInput;

/// Lifecycle of the simulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// No run has been started yet
    Idle,
    /// Ticking
    Running,
    /// Crashed or left the canvas; stays here until the next reset
    Terminated,
}

/// Cosmetic skin for an obstacle's bottom barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TowerKind {
    #[default]
    Castle,
    Church,
    TvTower,
}

impl TowerKind {
    pub const ALL: [TowerKind; 3] = [TowerKind::Castle, TowerKind::Church, TowerKind::TvTower];
}

/// The player-controlled glider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glider {
    /// Top-left corner of the bounding square (x never changes)
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive = falling)
    pub velocity: f32,
    /// Display angle in degrees, derived from velocity
    pub rotation: f32,
}

impl Glider {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    /// Bounding square of side `size`
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_origin_size(self.pos, Vec2::splat(size))
    }
}

impl Default for Glider {
    fn default() -> Self {
        Self::new(GLIDER_START)
    }
}

/// A top/bottom barrier pair with a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// y of the gap's upper edge (bottom of the top barrier)
    pub gap_top: f32,
    /// Gap height
    pub gap: f32,
    pub width: f32,
    /// Set once the glider has cleared this obstacle and it has been scored
    pub passed: bool,
    pub tower: TowerKind,
}

impl Obstacle {
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Vertical centre of the gap
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap / 2.0
    }

    /// Top barrier: `(x, 0)..(x + width, gap_top)`
    pub fn top_rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, 0.0), Vec2::new(self.right_edge(), self.gap_top))
    }

    /// Bottom barrier: `(x, gap_top + gap)..(x + width, canvas_height)`
    pub fn bottom_rect(&self, canvas_height: f32) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.right_edge(), canvas_height),
        )
    }

    /// Fully scrolled out past the left margin
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() <= DESPAWN_X
    }
}

/// Complete per-run state, owned by the simulation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub glider: Glider,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Ticks completed this run
    pub tick: u64,
    /// Tick index of the most recent spawn
    pub last_spawn_tick: u64,
    /// Input sampled for the latest tick
    pub input: TickInput,
    /// Seconds of flight, in nominal frame units
    pub air_time: f32,
    /// Obstacles cleared this run
    pub score: u64,
    /// Coins accrued this run
    pub coins_earned: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            glider: Glider::default(),
            obstacles: Vec::new(),
            tick: 0,
            last_spawn_tick: 0,
            input: TickInput::default(),
            air_time: 0.0,
            score: 0,
            coins_earned: 0,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
