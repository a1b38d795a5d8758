//! Glider vs obstacle collision
//!
//! Discrete per-tick sampling only. The glider is a square shrunk by the
//! configured buffer on every side, which forgives grazing contacts that
//! a swept test would have caught.

use super::state::{Glider, Obstacle};

/// Whether the glider touches either barrier of `obstacle`.
///
/// Horizontal ranges are compared first (closed intervals). When they
/// overlap, any part of the buffered box outside `[gap_top, gap_top + gap]`
/// is a hit.
pub fn collides(glider: &Glider, obstacle: &Obstacle, glider_size: f32, buffer: f32) -> bool {
    let body = glider.bounds(glider_size).shrink(buffer);

    if !body.overlaps_x(&obstacle.top_rect()) {
        return false;
    }

    !body.within_y(obstacle.gap_top, obstacle.gap_bottom())
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::TowerKind;

    const SIZE: f32 = 40.0;
    const BUFFER: f32 = 5.0;

    fn glider_at(x: f32, y: f32) -> Glider {
        Glider::new(Vec2::new(x, y))
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
    fn test_no_horizontal_overlap_never_hits() {
        // Glider deep inside the top barrier's rows, but obstacle is far right
        let glider = glider_at(100.0, 10.0);
        assert!(!collides(&glider, &obstacle(400.0, 200.0, 250.0), SIZE, BUFFER));
    }

    #[test]
    fn test_buffer_forgives_horizontal_graze() {
        // Unbuffered right edge 140 overlaps obstacle at 137, buffered edge 135 does not
        let glider = glider_at(100.0, 10.0);
        assert!(!collides(&glider, &obstacle(137.0, 200.0, 250.0), SIZE, BUFFER));
        assert!(collides(&glider, &obstacle(135.0, 200.0, 250.0), SIZE, BUFFER));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let glider = glider_at(100.0, 300.0);
        assert!(!collides(&glider, &obstacle(90.0, 250.0, 300.0), SIZE, BUFFER));
    }

    #[test]
    fn test_top_barrier_hit() {
        // Buffered top at 252 is above gap top 260
        let glider = glider_at(100.0, 247.0);
        assert!(collides(&glider, &obstacle(90.0, 260.0, 300.0), SIZE, BUFFER));
    }

    #[test]
    fn test_bottom_barrier_hit() {
        // Buffered bottom at 336 is below gap bottom 330
        let glider = glider_at(100.0, 301.0);
        assert!(collides(&glider, &obstacle(90.0, 80.0, 250.0), SIZE, BUFFER));
    }

    #[test]
    fn test_buffer_forgives_vertical_graze() {
        // Raw box pokes 4px into the top barrier; buffer absorbs it
        let glider = glider_at(100.0, 256.0);
        assert!(!collides(&glider, &obstacle(90.0, 260.0, 300.0), SIZE, BUFFER));
    }

    proptest! {
        #[test]
        fn prop_fully_inside_gap_never_collides(
            ox in 0.0f32..200.0,
            gap_top in 50.0f32..200.0,
            gap in 250.0f32..350.0,
            t in 0.0f32..1.0,
        ) {
            let lo = gap_top - BUFFER + 0.01;
            let hi = gap_top + gap - SIZE + BUFFER - 0.01;
            let glider = glider_at(100.0, lo + (hi - lo) * t);
            prop_assert!(!collides(&glider, &obstacle(ox, gap_top, gap), SIZE, BUFFER));
        }

        #[test]
        fn prop_protrusion_into_barrier_collides(
            ox in 60.0f32..130.0,
            gap_top in 50.0f32..200.0,
            gap in 250.0f32..350.0,
            depth in 0.5f32..40.0,
            above in any::<bool>(),
        ) {
            let y = if above {
                gap_top - BUFFER - depth
            } else {
                gap_top + gap - SIZE + BUFFER + depth
            };
            let glider = glider_at(100.0, y);
            prop_assert!(collides(&glider, &obstacle(ox, gap_top, gap), SIZE, BUFFER));
        }
    }
}
