//! Startup errors
//!
//! Only configuration can fail. Crashes, out-of-bounds and rejected
//! purchases are ordinary game outcomes and never show up here.

use std::fmt;

use crate::economy::UpgradeTrack;

/// Reasons a [`GameConfig`](crate::config::GameConfig) can be refused
#[derive(Debug)]
pub enum ConfigError {
    /// A dimension or rate that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// Glider does not fit vertically inside the canvas
    GliderTooLarge { size: f32, canvas_height: f32 },
    /// Lift must point upward (negative y)
    LiftNotUpward { lift: f32 },
    /// Gap bounds are inverted
    GapRangeInverted { min_gap: f32, max_gap: f32 },
    /// Largest gap leaves no room for the 50px margins above and below
    GapExceedsCanvas { max_gap: f32, canvas_height: f32 },
    /// Collision buffer is negative or swallows the whole glider
    BufferOutOfRange { buffer: f32, glider_size: f32 },
    /// Coins would be awarded every `0` ticks
    ZeroEarnInterval,
    /// An upgrade track has an unusable cost/effect curve
    UpgradeTrack { track: UpgradeTrack, reason: &'static str },
    /// Config JSON did not parse
    Parse(serde_json::Error),
    /// Config file could not be read
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::GliderTooLarge {
                size,
                canvas_height,
            } => write!(
                f,
                "glider size {size} does not fit in canvas height {canvas_height}"
            ),
            Self::LiftNotUpward { lift } => {
                write!(f, "plane.baseLift must be negative (upward), got {lift}")
            }
            Self::GapRangeInverted { min_gap, max_gap } => {
                write!(f, "obstacle.minGap {min_gap} exceeds obstacle.maxGap {max_gap}")
            }
            Self::GapExceedsCanvas {
                max_gap,
                canvas_height,
            } => write!(
                f,
                "obstacle.maxGap {max_gap} leaves no spawn range in canvas height {canvas_height}"
            ),
            Self::BufferOutOfRange {
                buffer,
                glider_size,
            } => write!(
                f,
                "collision.buffer {buffer} out of range for glider size {glider_size}"
            ),
            Self::ZeroEarnInterval => write!(f, "coins.earnInterval must be at least 1"),
            Self::UpgradeTrack { track, reason } => {
                write!(f, "upgrade track '{}': {reason}", track.as_str())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Io(err) => write!(f, "cannot read config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
