//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one frame)
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use rect::Rect;
pub use snapshot::{CrashCause, FrameSnapshot, ObstacleView, SimEvent};
pub use spawn::ObstacleGenerator;
pub use state::{Glider, Obstacle, RunState, SimPhase, TowerKind};
pub use tick::Simulation;
