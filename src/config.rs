//! Static game configuration
//!
//! Loaded once at startup. JSON keys follow the camelCase option names
//! (`plane.baseGravity`, `obstacle.spawnInterval`, `upgrades.wing.costMultiplier`, ...).
//! Any section missing from the JSON falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::economy::UpgradeTrack;
use crate::error::ConfigError;

/// Margin kept clear above and below every obstacle gap
pub const GAP_MARGIN: f32 = 50.0;

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Glider body and flight constants (per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaneConfig {
    /// Side of the glider's square bounding box
    pub size: f32,
    /// Downward acceleration added every tick
    pub base_gravity: f32,
    /// Upward acceleration at level 0 (negative)
    pub base_lift: f32,
    /// Absolute velocity cap
    pub max_speed: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            size: 40.0,
            base_gravity: 0.12,
            base_lift: -0.2,
            max_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObstacleConfig {
    pub width: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Scroll speed before the fuel multiplier
    pub speed: f32,
    /// Ticks that must elapse (strictly more than) between spawns
    pub spawn_interval: u64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            min_gap: 250.0,
            max_gap: 350.0,
            speed: 2.0,
            spawn_interval: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollisionConfig {
    /// Pixels shaved off every side of the glider before testing
    pub buffer: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { buffer: 5.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoinsConfig {
    /// One coin every this many ticks (30 = 0.5s at 60fps)
    pub earn_interval: u64,
}

impl Default for CoinsConfig {
    fn default() -> Self {
        Self { earn_interval: 30 }
    }
}

/// Cost curve and effect of a single upgrade track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeTrackConfig {
    pub base_cost: u64,
    pub cost_multiplier: f64,
    pub effect_per_level: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpgradesConfig {
    pub wing: UpgradeTrackConfig,
    pub fuel: UpgradeTrackConfig,
}

impl Default for UpgradesConfig {
    fn default() -> Self {
        Self {
            wing: UpgradeTrackConfig {
                base_cost: 50,
                cost_multiplier: 1.25,
                effect_per_level: 0.15,
            },
            fuel: UpgradeTrackConfig {
                base_cost: 40,
                cost_multiplier: 1.25,
                effect_per_level: 0.2,
            },
        }
    }
}

impl UpgradesConfig {
    pub fn track(&self, track: UpgradeTrack) -> &UpgradeTrackConfig {
        match track {
            UpgradeTrack::Wing => &self.wing,
            UpgradeTrack::Fuel => &self.fuel,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub plane: PlaneConfig,
    pub obstacle: ObstacleConfig,
    pub collision: CollisionConfig,
    pub coins: CoinsConfig,
    pub upgrades: UpgradesConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written negated so NaN is refused too
    if !(value > 0.0) {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject any configuration the simulation cannot run safely.
    ///
    /// In particular the obstacle generator's gap-top range
    /// `[50, canvas.height - gap - 50]` must never invert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("plane.size", self.plane.size)?;
        positive("plane.baseGravity", self.plane.base_gravity)?;
        positive("plane.maxSpeed", self.plane.max_speed)?;
        positive("obstacle.width", self.obstacle.width)?;
        positive("obstacle.minGap", self.obstacle.min_gap)?;
        positive("obstacle.speed", self.obstacle.speed)?;

        if self.plane.size >= self.canvas.height {
            return Err(ConfigError::GliderTooLarge {
                size: self.plane.size,
                canvas_height: self.canvas.height,
            });
        }
        if !(self.plane.base_lift < 0.0) {
            return Err(ConfigError::LiftNotUpward {
                lift: self.plane.base_lift,
            });
        }
        if !(self.obstacle.min_gap <= self.obstacle.max_gap) {
            return Err(ConfigError::GapRangeInverted {
                min_gap: self.obstacle.min_gap,
                max_gap: self.obstacle.max_gap,
            });
        }
        if self.obstacle.max_gap + 2.0 * GAP_MARGIN > self.canvas.height {
            return Err(ConfigError::GapExceedsCanvas {
                max_gap: self.obstacle.max_gap,
                canvas_height: self.canvas.height,
            });
        }
        let buffer = self.collision.buffer;
        if !(buffer >= 0.0) || buffer * 2.0 >= self.plane.size {
            return Err(ConfigError::BufferOutOfRange {
                buffer,
                glider_size: self.plane.size,
            });
        }
        if self.coins.earn_interval == 0 {
            return Err(ConfigError::ZeroEarnInterval);
        }

        for track in UpgradeTrack::ALL {
            let cfg = self.upgrades.track(track);
            let reason = if cfg.base_cost == 0 {
                Some("baseCost must be at least 1")
            } else if !cfg.cost_multiplier.is_finite() || cfg.cost_multiplier < 1.0 {
                Some("costMultiplier must be finite and >= 1")
            } else if !(cfg.effect_per_level >= 0.0) {
                Some("effectPerLevel must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::UpgradeTrack { track, reason });
            }
        }

        Ok(())
    }
}
