//! Fixed timestep simulation tick
//!
//! One call to [`Simulation::tick`] is one frame at the nominal rate.
//! There is no `dt`: every constant is expressed per tick.

use super::collision::collides;
use super::snapshot::{CrashCause, FrameSnapshot, SimEvent};
use super::spawn::ObstacleGenerator;
use super::state::{RunState, SimPhase};
use crate::config::GameConfig;
use crate::consts::*;
use crate::economy::{UpgradeLevels, lift_for_level, speed_multiplier_for_level};
use crate::input::TickInput;

/// The simulation engine. Owns the run state exclusively.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    phase: SimPhase,
    state: RunState,
    generator: ObstacleGenerator,
    /// Wing lift for this run (negative)
    lift: f32,
    /// Fuel speed multiplier for this run
    speed_multiplier: f32,
}

impl Simulation {
    /// Create an idle engine. `config` must already be validated.
    pub fn new(config: GameConfig) -> Self {
        let levels = UpgradeLevels::default();
        Self {
            lift: lift_for_level(&config, levels.wing),
            speed_multiplier: speed_multiplier_for_level(&config, levels.fuel),
            config,
            phase: SimPhase::Idle,
            state: RunState::new(),
            generator: ObstacleGenerator::new(0),
        }
    }

    /// Replace the run state with a fresh one and start running.
    ///
    /// Upgrade effects are sampled here and stay fixed for the whole run.
    pub fn reset(&mut self, levels: UpgradeLevels, seed: u64) {
        self.state = RunState::new();
        self.generator = ObstacleGenerator::new(seed);
        self.lift = lift_for_level(&self.config, levels.wing);
        self.speed_multiplier = speed_multiplier_for_level(&self.config, levels.fuel);
        self.phase = SimPhase::Running;
        log::debug!(
            "Run reset: seed={seed} lift={:.3} speed_mult={:.2}",
            self.lift,
            self.speed_multiplier
        );
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Owned render data for the current state
    pub fn snapshot(&self, events: Vec<SimEvent>) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, self.phase, &self.config, events)
    }

    /// Advance one tick. Does nothing unless running.
    pub fn tick(&mut self, input: TickInput) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.phase != SimPhase::Running {
            return events;
        }

        let config = &self.config;
        let state = &mut self.state;
        state.input = input;

        // Vertical acceleration: ascend wins over descend
        let glider = &mut state.glider;
        let accel = if input.ascend {
            self.lift
        } else if input.descend {
            config.plane.base_gravity * DIVE_GRAVITY_FACTOR
        } else {
            config.plane.base_gravity
        };
        let max_speed = config.plane.max_speed;
        glider.velocity = (glider.velocity + accel).clamp(-max_speed, max_speed);
        glider.pos.y += glider.velocity;
        glider.rotation = glider.velocity * ROTATION_PER_VELOCITY;

        // Leaving the canvas ends the run before anything else moves
        if glider.pos.y < 0.0 || glider.pos.y + config.plane.size > config.canvas.height {
            self.phase = SimPhase::Terminated;
            events.push(game_over(state, CrashCause::OutOfBounds));
            return events;
        }

        // Spawn
        if state.tick - state.last_spawn_tick > config.obstacle.spawn_interval {
            let obstacle = self.generator.spawn(config, config.canvas.width);
            state.obstacles.push(obstacle);
            state.last_spawn_tick = state.tick;
        }

        // Scroll, collide, score, retire
        let scroll = config.obstacle.speed * self.speed_multiplier;
        let glider = state.glider;
        let (size, buffer) = (config.plane.size, config.collision.buffer);
        let mut crashed = false;
        let mut cleared = 0u64;
        state.obstacles.retain_mut(|obstacle| {
            if crashed {
                return true;
            }
            obstacle.x -= scroll;

            if collides(&glider, obstacle, size, buffer) {
                crashed = true;
                return false;
            }

            if !obstacle.passed && obstacle.right_edge() < glider.pos.x {
                obstacle.passed = true;
                cleared += 1;
            }

            !obstacle.is_offscreen()
        });

        state.score += cleared;
        events.extend((0..cleared).map(|_| SimEvent::ScoreIncrement));

        // A crash stops obstacle processing but the tick still completes
        if crashed {
            self.phase = SimPhase::Terminated;
            events.push(game_over(state, CrashCause::Collision));
        }

        state.air_time += SIM_DT;

        if state.tick.is_multiple_of(config.coins.earn_interval) {
            state.coins_earned += 1;
            events.push(SimEvent::CurrencyIncrement);
        }

        state.tick += 1;
        events
    }
}

fn game_over(state: &RunState, cause: CrashCause) -> SimEvent {
    log::info!(
        "Run over ({cause:?}): score={} ticks={} air_time={:.1}s coins={}",
        state.score,
        state.tick,
        state.air_time,
        state.coins_earned
    );
    SimEvent::GameOver {
        final_score: state.score,
        cause,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::{Obstacle, TowerKind};

    const NONE: TickInput = TickInput {
        ascend: false,
        descend: false,
    };
    const UP: TickInput = TickInput {
        ascend: true,
        descend: false,
    };
    const DOWN: TickInput = TickInput {
        ascend: false,
        descend: true,
    };

    fn running() -> Simulation {
        let mut sim = Simulation::new(GameConfig::default());
        sim.reset(UpgradeLevels::default(), 42);
        sim
    }

    /// Keep the glider roughly level so runs outlive the free-fall time
    fn hover(sim: &Simulation) -> TickInput {
        if sim.state().glider.velocity > 0.0 { UP } else { NONE }
    }

    fn obstacle(x: f32, gap_top: f32, gap: f32) -> Obstacle {
        Obstacle {
            x,
            gap_top,
            gap,
            width: 50.0,
            passed: false,
            tower: TowerKind::Castle,
        }
    }

    #[test]
    fn test_new_is_idle_and_inert() {
        let mut sim = Simulation::new(GameConfig::default());
        assert_eq!(sim.phase(), SimPhase::Idle);
        assert!(sim.tick(NONE).is_empty());
        assert_eq!(sim.state().tick, 0);
    }

    #[test]
    fn test_gravity_single_tick() {
        let mut sim = running();
        sim.tick(NONE);
        let glider = sim.state().glider;
        assert!((glider.velocity - 0.12).abs() < 1e-6);
        assert!((glider.pos.y - 300.12).abs() < 1e-4);
        assert!((glider.rotation - 0.36).abs() < 1e-5);
    }

    #[test]
    fn test_ascend_wins_over_descend() {
        let mut sim = running();
        sim.tick(TickInput {
            ascend: true,
            descend: true,
        });
        assert!((sim.state().glider.velocity - (-0.23)).abs() < 1e-6);
    }

    #[test]
    fn test_descend_is_stronger_gravity() {
        let mut sim = running();
        sim.tick(DOWN);
        assert!((sim.state().glider.velocity - 0.18).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_clamped_after_long_input() {
        let mut sim = running();
        for _ in 0..40 {
            sim.tick(UP);
        }
        assert_eq!(sim.state().glider.velocity, -3.0);
    }

    #[test]
    fn test_bottom_out_of_bounds() {
        let mut sim = running();
        sim.state.glider.pos.y = 558.0;
        sim.state.glider.velocity = 3.0;
        // A safe obstacle in the way must not matter
        sim.state.obstacles.push(obstacle(600.0, 100.0, 300.0));

        let events = sim.tick(NONE);
        assert_eq!(sim.state().glider.pos.y, 561.0);
        assert_eq!(
            events,
            vec![SimEvent::GameOver {
                final_score: 0,
                cause: CrashCause::OutOfBounds
            }]
        );
        assert_eq!(sim.phase(), SimPhase::Terminated);
        // Obstacles untouched on the terminating tick
        assert_eq!(sim.state().obstacles[0].x, 600.0);
    }

    #[test]
    fn test_top_out_of_bounds() {
        let mut sim = running();
        sim.state.glider.pos.y = 1.0;
        sim.state.glider.velocity = -3.0;
        let events = sim.tick(UP);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::GameOver {
                cause: CrashCause::OutOfBounds,
                ..
            }]
        ));
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut sim = running();
        sim.state.glider.pos.y = 599.0;
        assert_eq!(sim.tick(NONE).len(), 1);
        let before = sim.state().clone();
        for _ in 0..5 {
            assert!(sim.tick(UP).is_empty());
        }
        assert_eq!(sim.state(), &before);
        assert_eq!(sim.phase(), SimPhase::Terminated);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut sim = running();
        for _ in 0..=100 {
            let input = hover(&sim);
            sim.tick(input);
        }
        assert_eq!(sim.state().tick, 101);
        assert!(sim.state().obstacles.is_empty());

        let input = hover(&sim);
        sim.tick(input);
        assert_eq!(sim.state().obstacles.len(), 1);
        assert_eq!(sim.state().last_spawn_tick, 101);
        // Spawned at the right edge, then scrolled once at fuel level 1
        assert!((sim.state().obstacles[0].x - 797.6).abs() < 1e-3);
    }

    #[test]
    fn test_obstacle_retired_past_margin() {
        let mut sim = running();
        sim.state.obstacles.push(obstacle(-97.0, 100.0, 300.0));

        sim.tick(NONE);
        assert_eq!(sim.state().obstacles.len(), 1);
        assert!(sim.state().obstacles[0].x <= -99.0);

        sim.tick(NONE);
        assert!(sim.state().obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_scores_once() {
        let mut sim = running();
        // Right edge at 101 scrolls past the glider's x (100) on the first tick
        sim.state.obstacles.push(obstacle(51.0, 50.0, 500.0));

        let events = sim.tick(NONE);
        assert!(events.contains(&SimEvent::ScoreIncrement));
        assert!(sim.state().obstacles[0].passed);
        assert_eq!(sim.state().score, 1);

        for _ in 0..10 {
            let events = sim.tick(NONE);
            assert!(!events.contains(&SimEvent::ScoreIncrement));
        }
        assert_eq!(sim.state().score, 1);
    }

    #[test]
    fn test_collision_ends_run_with_current_score() {
        let mut sim = running();
        sim.state.score = 4;
        // Already-cleared obstacle ahead in order, then one the glider flies into
        let mut cleared = obstacle(-20.0, 50.0, 500.0);
        cleared.passed = true;
        sim.state.obstacles.push(cleared);
        sim.state.obstacles.push(obstacle(110.0, 400.0, 150.0));
        sim.state.obstacles.push(obstacle(700.0, 100.0, 300.0));

        let events = sim.tick(NONE);
        assert_eq!(
            events,
            vec![
                SimEvent::GameOver {
                    final_score: 4,
                    cause: CrashCause::Collision
                },
                SimEvent::CurrencyIncrement,
            ]
        );
        assert_eq!(sim.phase(), SimPhase::Terminated);
        // The crashed obstacle is dropped and later ones are left unprocessed
        assert_eq!(sim.state().obstacles.len(), 2);
        assert_eq!(sim.state().obstacles[1].x, 700.0);
        // The rest of the tick still runs
        assert_eq!(sim.state().tick, 1);
        assert_eq!(sim.state().coins_earned, 1);
        assert!((sim.state().air_time - SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_collision_off_coin_tick_still_advances() {
        let mut sim = running();
        sim.state.tick = 7;
        sim.state.last_spawn_tick = 7;
        sim.state.obstacles.push(obstacle(110.0, 400.0, 150.0));

        let events = sim.tick(NONE);
        assert_eq!(
            events,
            vec![SimEvent::GameOver {
                final_score: 0,
                cause: CrashCause::Collision
            }]
        );
        assert_eq!(sim.state().tick, 8);
        assert_eq!(sim.state().coins_earned, 0);
        assert!(sim.state().air_time > 0.0);

        // Nothing moves once terminated
        let frozen = sim.state().clone();
        assert!(sim.tick(UP).is_empty());
        assert_eq!(sim.state(), &frozen);
    }

    #[test]
    fn test_out_of_bounds_skips_rest_of_tick() {
        let mut sim = running();
        sim.state.glider.pos.y = 599.0;

        let events = sim.tick(NONE);
        assert_eq!(
            events,
            vec![SimEvent::GameOver {
                final_score: 0,
                cause: CrashCause::OutOfBounds
            }]
        );
        assert_eq!(sim.state().tick, 0);
        assert_eq!(sim.state().coins_earned, 0);
        assert_eq!(sim.state().air_time, 0.0);
    }

    #[test]
    fn test_coin_every_earn_interval() {
        let mut sim = running();
        let mut coin_ticks = Vec::new();
        for _ in 0..61 {
            let tick = sim.state().tick;
            let input = hover(&sim);
            if sim.tick(input).contains(&SimEvent::CurrencyIncrement) {
                coin_ticks.push(tick);
            }
        }
        assert_eq!(coin_ticks, vec![0, 30, 60]);
        assert_eq!(sim.state().coins_earned, 3);
    }

    #[test]
    fn test_air_time_accumulates() {
        let mut sim = running();
        for _ in 0..60 {
            let input = hover(&sim);
            sim.tick(input);
        }
        assert!((sim.state().air_time - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_twice_is_identical() {
        let mut sim = running();
        for _ in 0..150 {
            let input = hover(&sim);
            sim.tick(input);
        }

        sim.reset(UpgradeLevels::default(), 7);
        let first = sim.state().clone();
        sim.reset(UpgradeLevels::default(), 7);
        let second = sim.state().clone();

        assert_eq!(first, second);
        assert_eq!(first, RunState::new());
        assert_eq!(sim.phase(), SimPhase::Running);
    }

    #[test]
    fn test_upgrades_feed_physics() {
        let mut sim = Simulation::new(GameConfig::default());
        sim.reset(UpgradeLevels { wing: 3, fuel: 4 }, 1);
        sim.state.obstacles.push(obstacle(700.0, 100.0, 300.0));
        sim.tick(UP);
        // -0.2 * (1 + 3 * 0.15)
        assert!((sim.state().glider.velocity - (-0.29)).abs() < 1e-6);
        // 2 * (1 + 4 * 0.2)
        assert!((sim.state().obstacles[0].x - 696.4).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = running();
        let mut b = running();
        for i in 0..400 {
            let input = if i % 3 == 0 { UP } else { hover(&a) };
            let ea = a.tick(input);
            let eb = b.tick(input);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut sim = running();
        sim.state.obstacles.push(obstacle(700.0, 100.0, 300.0));
        let events = sim.tick(NONE);
        let snap = sim.snapshot(events);

        assert_eq!(snap.tick, 1);
        assert_eq!(snap.phase, SimPhase::Running);
        assert_eq!(snap.glider.min.x, 100.0);
        assert_eq!(snap.glider.max.x - snap.glider.min.x, 40.0);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].top.max.y, 100.0);
        assert_eq!(snap.obstacles[0].bottom.min.y, 400.0);
        assert_eq!(snap.obstacles[0].bottom.max.y, 600.0);
        assert_eq!(snap.currency_delta(), 1);
        assert_eq!(snap.game_over(), None);
        assert_eq!(snap.glider.min, Vec2::new(100.0, sim.state().glider.pos.y));
    }

    proptest! {
        #[test]
        fn prop_velocity_always_clamped(inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400)) {
            let mut sim = running();
            for (ascend, descend) in inputs {
                sim.tick(TickInput { ascend, descend });
                let v = sim.state().glider.velocity;
                prop_assert!((-3.0..=3.0).contains(&v), "velocity {}", v);
                if sim.phase() != SimPhase::Running {
                    break;
                }
            }
        }
    }
}
