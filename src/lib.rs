//! Sky Flyer - a side-scrolling glider arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `economy`: Upgrade costs and their effect on physics
//! - `controller`: Session state, screen flow and purchases
//! - `frame_loop`: Owned handle for the per-frame tick loop
//! - `config`: Data-driven game balance
//!
//! Rendering and UI are left to the host; they consume [`sim::FrameSnapshot`]s
//! and send [`controller::Intent`]s back.

pub mod autopilot;
pub mod config;
pub mod controller;
pub mod economy;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod sim;

pub use config::GameConfig;
pub use controller::{GameController, Intent, Screen, Session};
pub use economy::{UpgradeLevels, UpgradeTrack};
pub use error::ConfigError;
pub use input::{Control, TickInput};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Nominal frame duration (60 Hz); physics is expressed per tick
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Glider top-left corner at the start of every run
    pub const GLIDER_START: Vec2 = Vec2::new(100.0, 300.0);

    /// Gravity multiplier while diving
    pub const DIVE_GRAVITY_FACTOR: f32 = 1.5;
    /// Display degrees of tilt per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 3.0;

    /// Obstacles are dropped once their right edge is at or left of this x
    pub const DESPAWN_X: f32 = -50.0;
}
