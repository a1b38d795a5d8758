//! Obstacle generation
//!
//! Seeded so a run can be replayed from its seed. Every random property of
//! an obstacle, including its cosmetic tower skin, is fixed here at spawn.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Obstacle, TowerKind};
use crate::config::{GAP_MARGIN, GameConfig};

/// Produces obstacles at the right edge of the canvas
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    rng: Pcg32,
}

impl ObstacleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw a new obstacle positioned at `x = canvas_width`.
    ///
    /// Gap height is uniform in `[minGap, maxGap)`; gap top is uniform in
    /// `[50, canvas.height - gap - 50)`, keeping 50px of barrier above and
    /// below. Relies on a validated config for a non-empty range.
    pub fn spawn(&mut self, config: &GameConfig, canvas_width: f32) -> Obstacle {
        let cfg = &config.obstacle;
        let gap = cfg.min_gap + self.rng.random::<f32>() * (cfg.max_gap - cfg.min_gap);
        let span = config.canvas.height - gap - 2.0 * GAP_MARGIN;
        let gap_top = GAP_MARGIN + self.rng.random::<f32>() * span;
        let tower = TowerKind::ALL[self.rng.random_range(0..TowerKind::ALL.len())];

        log::trace!("Spawned obstacle gap_top={gap_top:.1} gap={gap:.1} tower={tower:?}");

        Obstacle {
            x: canvas_width,
            gap_top,
            gap,
            width: cfg.width,
            passed: false,
            tower,
        }
    }
}
