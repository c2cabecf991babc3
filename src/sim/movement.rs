//! Per-kind velocity policies
//!
//! Each policy is a pure function from positions and tuning to a desired
//! velocity. The tick driver applies them in a fixed order (zombies, then
//! allies) and integrates afterward.

use glam::Vec2;

use crate::tuning::{AllyTuning, ZombieTuning};
use crate::{bearing_between, unit_from_angle};

/// Zombie pull toward the player
///
/// Full speed within the attraction range; beyond it the magnitude falls
/// off as `speed * range / distance`, so the pull weakens but never
/// reaches zero.
pub fn zombie_velocity(zombie_pos: Vec2, player_pos: Vec2, t: &ZombieTuning) -> Vec2 {
    let dist = zombie_pos.distance(player_pos);
    let magnitude = if dist <= t.attraction_range {
        t.speed
    } else {
        t.speed * t.attraction_range / dist
    };
    unit_from_angle(bearing_between(zombie_pos, player_pos)) * magnitude
}

/// Ally guard behavior with crowd avoidance
///
/// Moves toward the player while outside the follow distance, holds
/// position inside it. If any other ally sits within the separation
/// threshold, the bearing is overridden to point directly away from it;
/// when several conflict, the last one checked wins.
pub fn ally_velocity(
    ally_pos: Vec2,
    player_pos: Vec2,
    others: &[(usize, Vec2)],
    self_idx: usize,
    t: &AllyTuning,
) -> Vec2 {
    let mut vel = if ally_pos.distance(player_pos) > t.follow_distance {
        unit_from_angle(bearing_between(ally_pos, player_pos)) * t.speed
    } else {
        Vec2::ZERO
    };

    for &(idx, other_pos) in others {
        if idx == self_idx {
            continue;
        }
        if ally_pos.distance(other_pos) < t.separation {
            vel = unit_from_angle(bearing_between(other_pos, ally_pos)) * t.speed;
        }
    }

    vel
}

/// Player velocity from held directional input
///
/// Left wins over right and up over down when both are held. Diagonal
/// movement is normalized to the same scalar speed as axis-aligned
/// movement (unit-vector scaling).
pub fn player_velocity(up: bool, down: bool, left: bool, right: bool, speed: f32) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if left {
        dir.x = -1.0;
    } else if right {
        dir.x = 1.0;
    }
    if up {
        dir.y = -1.0;
    } else if down {
        dir.y = 1.0;
    }

    if dir == Vec2::ZERO {
        Vec2::ZERO
    } else {
        dir.normalize() * speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zt() -> ZombieTuning {
        ZombieTuning::default()
    }

    fn at() -> AllyTuning {
        AllyTuning::default()
    }

    #[test]
    fn test_zombie_full_speed_within_range() {
        let t = zt();
        let v = zombie_velocity(Vec2::new(t.attraction_range, 0.0), Vec2::ZERO, &t);
        assert!((v.length() - t.speed).abs() < 0.001);
        // Pointed at the player
        assert!(v.x < 0.0);
        assert!(v.y.abs() < 0.001);
    }

    #[test]
    fn test_zombie_zero_distance_no_nan() {
        let t = zt();
        let v = zombie_velocity(Vec2::ZERO, Vec2::ZERO, &t);
        assert!(v.is_finite());
        // Bearing defined as 0 at zero distance
        assert!((v.length() - t.speed).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_attraction_falloff_exact(d in 301.0f32..5000.0) {
            let t = zt();
            let v = zombie_velocity(Vec2::new(d, 0.0), Vec2::ZERO, &t);
            let expected = t.speed * t.attraction_range / d;
            prop_assert!((v.length() - expected).abs() < 0.01);
        }

        #[test]
        fn prop_attraction_monotonically_decreasing(
            d in 301.0f32..4000.0,
            extra in 1.0f32..1000.0,
        ) {
            let t = zt();
            let near = zombie_velocity(Vec2::new(d, 0.0), Vec2::ZERO, &t).length();
            let far = zombie_velocity(Vec2::new(d + extra, 0.0), Vec2::ZERO, &t).length();
            prop_assert!(far < near);
        }

        #[test]
        fn prop_diagonal_speed_matches_axis_speed(
            up in any::<bool>(),
            down in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
        ) {
            let speed = 200.0;
            let v = player_velocity(up, down, left, right, speed);
            if v != Vec2::ZERO {
                prop_assert!((v.length() - speed).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_player_idle_when_nothing_held() {
        assert_eq!(player_velocity(false, false, false, false, 200.0), Vec2::ZERO);
    }

    #[test]
    fn test_player_left_wins_over_right() {
        let v = player_velocity(false, false, true, true, 200.0);
        assert!(v.x < 0.0);
    }

    #[test]
    fn test_ally_approaches_outside_follow_distance() {
        let t = at();
        let v = ally_velocity(Vec2::new(t.follow_distance + 50.0, 0.0), Vec2::ZERO, &[], 0, &t);
        assert!((v.length() - t.speed).abs() < 0.001);
        assert!(v.x < 0.0);
    }

    #[test]
    fn test_ally_holds_inside_follow_distance() {
        let t = at();
        let v = ally_velocity(Vec2::new(t.follow_distance - 10.0, 0.0), Vec2::ZERO, &[], 0, &t);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_ally_separation_overrides_guard() {
        let t = at();
        let pos = Vec2::new(t.follow_distance + 50.0, 0.0);
        // Crowding ally sits between us and the player
        let crowd = vec![(1, pos + Vec2::new(-10.0, 0.0))];
        let v = ally_velocity(pos, Vec2::ZERO, &crowd, 0, &t);
        // Pushed away from the crowding ally, so away from the player too
        assert!(v.x > 0.0);
        assert!((v.length() - t.speed).abs() < 0.001);
    }

    #[test]
    fn test_ally_separation_last_conflict_wins() {
        let t = at();
        let pos = Vec2::ZERO;
        let crowd = vec![
            (1, Vec2::new(-10.0, 0.0)),
            (2, Vec2::new(0.0, -10.0)),
        ];
        let v = ally_velocity(pos, Vec2::new(500.0, 0.0), &crowd, 0, &t);
        // Away from the last-checked ally (below it, +y)
        assert!(v.y > 0.0);
        assert!(v.x.abs() < 0.001);
    }

    #[test]
    fn test_ally_ignores_itself_in_crowd_list() {
        let t = at();
        let pos = Vec2::new(t.follow_distance - 10.0, 0.0);
        let crowd = vec![(0, pos)];
        let v = ally_velocity(pos, Vec2::ZERO, &crowd, 0, &t);
        assert_eq!(v, Vec2::ZERO);
    }
}
