//! Demo/idle mode: a simple pilot that steers for the next gap
//!
//! Looks a few ticks ahead using the current velocity and holds ascend or
//! descend to bring the glider's predicted position onto the target.

use crate::config::GameConfig;
use crate::input::TickInput;
use crate::sim::RunState;

/// Ticks of velocity to lead the target by
const LOOKAHEAD_TICKS: f32 = 8.0;
/// Tolerance below the target before lifting
const LIFT_SLACK: f32 = 4.0;
/// Tolerance above the target before diving
const DIVE_SLACK: f32 = 40.0;

/// Desired glider y (top edge) for the current state
pub fn target_y(state: &RunState, config: &GameConfig) -> f32 {
    let size = config.plane.size;
    let glider_x = state.glider.pos.x;

    // First obstacle we haven't flown past yet, or mid-canvas when clear
    let center = state
        .obstacles
        .iter()
        .find(|o| o.right_edge() >= glider_x)
        .map(|o| o.gap_center())
        .unwrap_or(config.canvas.height / 2.0);

    center - size / 2.0
}

/// Controls to hold for the next tick
pub fn steer(state: &RunState, config: &GameConfig) -> TickInput {
    let target = target_y(state, config);
    let glider = &state.glider;
    let predicted = glider.pos.y + glider.velocity * LOOKAHEAD_TICKS;

    if predicted > target + LIFT_SLACK {
        TickInput {
            ascend: true,
            descend: false,
        }
    } else if predicted < target - DIVE_SLACK {
        TickInput {
            ascend: false,
            descend: true,
        }
    } else {
        TickInput::default()
    }
}
