//! Pure coordinate helpers
//!
//! Input coordinates have their origin at the top-left with y growing down.
//! World coordinates have their origin at the bottom-left with y growing up.

use tiltcatch_math::Vec2;

/// Landmark index of the wrist in a 21-point hand model
pub const WRIST: usize = 0;
/// Landmark index of the middle finger's MCP joint
pub const MIDDLE_MCP: usize = 9;

/// Map an input-frame point into world space
///
/// x scales linearly onto the world width; y is flipped and scaled onto the
/// world height.
pub fn map_input_to_world(
    x: f64,
    y: f64,
    input_width: f64,
    input_height: f64,
    world_width: f64,
    world_height: f64,
) -> Vec2 {
    let world_x = (x / input_width) * world_width;
    let world_y = world_height - (y / input_height) * world_height;
    Vec2::new(world_x, world_y)
}

/// One step of an exponential moving average toward `target`
#[inline]
pub fn smooth(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Bound `value` to `[lo, hi]`
///
/// Unlike `f64::clamp` this never panics: if `lo > hi` the result is `lo`.
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(value))
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    a.distance(b)
}

/// Hand orientation from the wrist to the middle-finger MCP joint
///
/// Returned in radians in `[-π, π]`, measured in whatever frame the two
/// points are given in.
pub fn hand_angle(wrist: Vec2, middle_mcp: Vec2) -> f64 {
    let v = middle_mcp - wrist;
    v.y.atan2(v.x)
}

/// Mean of a set of landmarks; `None` for an empty set
pub fn hand_center(landmarks: &[Vec2]) -> Option<Vec2> {
    if landmarks.is_empty() {
        return None;
    }
    let sum = landmarks.iter().fold(Vec2::ZERO, |acc, &p| acc + p);
    Some(sum / landmarks.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_map_corners() {
        let top_left = map_input_to_world(0.0, 0.0, 640.0, 480.0, 800.0, 600.0);
        assert_eq!(top_left, Vec2::new(0.0, 600.0));

        let bottom_right = map_input_to_world(640.0, 480.0, 640.0, 480.0, 800.0, 600.0);
        assert_eq!(bottom_right, Vec2::new(800.0, 0.0));

        let center = map_input_to_world(320.0, 240.0, 640.0, 480.0, 800.0, 600.0);
        assert_eq!(center, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_map_same_size_only_flips_y() {
        let p = map_input_to_world(100.0, 150.0, 800.0, 600.0, 800.0, 600.0);
        assert_eq!(p, Vec2::new(100.0, 450.0));
    }

    #[test]
    fn test_smooth() {
        assert_eq!(smooth(0.0, 100.0, 0.15), 15.0);
        assert_eq!(smooth(10.0, 10.0, 0.5), 10.0);
        assert_eq!(smooth(3.0, 7.0, 1.0), 7.0);
        assert_eq!(smooth(3.0, 7.0, 0.0), 3.0);
    }

    #[test]
    fn test_smooth_converges() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = smooth(value, 50.0, 0.1);
        }
        assert!((value - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        // Inverted bounds
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_hand_angle() {
        let wrist = Vec2::new(100.0, 100.0);
        assert!((hand_angle(wrist, Vec2::new(150.0, 100.0))).abs() < EPSILON);
        assert!((hand_angle(wrist, Vec2::new(100.0, 150.0)) - FRAC_PI_2).abs() < EPSILON);
        assert!((hand_angle(wrist, Vec2::new(50.0, 100.0)) - PI).abs() < EPSILON);
    }

    #[test]
    fn test_hand_center() {
        assert_eq!(hand_center(&[]), None);
        let landmarks = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(hand_center(&landmarks), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }
}
