//! Angle helpers

use std::f64::consts::{PI, TAU};

/// Wrap an angle into [-π, π]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() || (-PI..=PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +π to -π; keep +π as given
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Shortest signed rotation taking `from` to `to`, in [-π, π]
pub fn angle_difference(to: f64, from: f64) -> f64 {
    normalize_angle(to - from)
}
