//! Per-tick output handed to the presentation layer
//!
//! A snapshot is an owned copy; renderers never see the live run state.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{RunState, SimPhase, TowerKind};
use crate::config::GameConfig;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Glider left the top or bottom of the canvas
    OutOfBounds,
    /// Glider touched a barrier
    Collision,
}

/// Events emitted by a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// An obstacle was cleared (+1 score)
    ScoreIncrement,
    /// Flight time earned a coin (+1 currency)
    CurrencyIncrement,
    /// Run over; emitted exactly once per run
    GameOver { final_score: u64, cause: CrashCause },
}

/// Render data for one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub top: Rect,
    pub bottom: Rect,
    pub tower: TowerKind,
    pub passed: bool,
}

/// Immutable picture of the simulation after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Ticks completed in this run
    pub tick: u64,
    pub phase: SimPhase,
    /// Glider bounding square
    pub glider: Rect,
    /// Glider display angle in degrees
    pub rotation: f32,
    /// Obstacles in spawn order
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub air_time: f32,
    pub events: Vec<SimEvent>,
}

impl FrameSnapshot {
    pub fn capture(
        state: &RunState,
        phase: SimPhase,
        config: &GameConfig,
        events: Vec<SimEvent>,
    ) -> Self {
        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                top: o.top_rect(),
                bottom: o.bottom_rect(config.canvas.height),
                tower: o.tower,
                passed: o.passed,
            })
            .collect();

        Self {
            tick: state.tick,
            phase,
            glider: state.glider.bounds(config.plane.size),
            rotation: state.glider.rotation,
            obstacles,
            score: state.score,
            air_time: state.air_time,
            events,
        }
    }

    /// Coins gained during this tick
    pub fn currency_delta(&self) -> u64 {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::CurrencyIncrement))
            .count() as u64
    }

    /// Final score if this tick ended the run
    pub fn game_over(&self) -> Option<u64> {
        self.events.iter().find_map(|e| match e {
            SimEvent::GameOver { final_score, .. } => Some(*final_score),
            _ => None,
        })
    }
}
