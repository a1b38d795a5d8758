//! Upgrade economy
//!
//! Pure mappings from upgrade level to physics effect and purchase price.
//! Wing and fuel are independent tracks; nothing here holds state.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// An independently upgradable attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeTrack {
    /// Lift strength
    Wing,
    /// Scroll speed of the world
    Fuel,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 2] = [UpgradeTrack::Wing, UpgradeTrack::Fuel];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeTrack::Wing => "wing",
            UpgradeTrack::Fuel => "fuel",
        }
    }
}

/// Current level on each track (both start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub wing: u32,
    pub fuel: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self { wing: 1, fuel: 1 }
    }
}

impl UpgradeLevels {
    pub fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Wing => self.wing,
            UpgradeTrack::Fuel => self.fuel,
        }
    }

    pub fn increment(&mut self, track: UpgradeTrack) {
        match track {
            UpgradeTrack::Wing => self.wing += 1,
            UpgradeTrack::Fuel => self.fuel += 1,
        }
    }
}

/// Per-tick upward acceleration for a wing level: `baseLift * (1 + level * effect)`.
///
/// `baseLift` is negative, so higher levels give a stronger climb.
pub fn lift_for_level(config: &GameConfig, level: u32) -> f32 {
    let effect = config.upgrades.wing.effect_per_level;
    config.plane.base_lift * (1.0 + level as f32 * effect)
}

/// Obstacle scroll-speed multiplier for a fuel level: `1 + level * effect`
pub fn speed_multiplier_for_level(config: &GameConfig, level: u32) -> f32 {
    1.0 + level as f32 * config.upgrades.fuel.effect_per_level
}

/// Price of moving `track` from `level` to `level + 1`:
/// `floor(baseCost * costMultiplier^(level - 1))`
pub fn upgrade_cost(config: &GameConfig, track: UpgradeTrack, level: u32) -> u64 {
    let cfg = config.upgrades.track(track);
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    let cost = cfg.base_cost as f64 * cfg.cost_multiplier.powi(exponent);
    // `as` saturates, so runaway levels price at u64::MAX rather than wrapping
    cost.floor() as u64
}
