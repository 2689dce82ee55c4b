//! Capture zone and per-ball fate classification

use crate::config::{StrandConfig, WorldConfig};
use tiltcatch_math::{Rect, Vec2};

/// The scoring rectangle near the floor
///
/// A classification predicate only. It has no body and never takes part in
/// collision response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureZone {
    pub rect: Rect,
    /// Balls with `|vy|` at or above this speed are passing through, not caught
    pub max_vertical_speed: f64,
}

impl CaptureZone {
    pub fn new(rect: Rect, max_vertical_speed: f64) -> Self {
        Self {
            rect,
            max_vertical_speed,
        }
    }

    /// Build the zone for a world of the configured size
    pub fn from_config(config: &WorldConfig) -> Self {
        let capture = &config.capture;
        let min = Vec2::new(config.width * capture.x_min_fraction, capture.y_min);
        let max = Vec2::new(config.width * capture.x_max_fraction, capture.y_max);
        Self::new(Rect::from_min_max(min, max), capture.max_vertical_speed)
    }

    /// Whether a ball at `position` moving with `velocity` counts as caught
    pub fn captures(&self, position: Vec2, velocity: Vec2) -> bool {
        self.rect.contains(position) && velocity.y.abs() < self.max_vertical_speed
    }
}

/// Terminal outcome of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallFate {
    /// Fell below the out-of-bounds line
    Reaped,
    /// Settled inside the capture zone
    Captured,
    /// Lay still on the floor outside the capture zone for too long
    Stranded,
}

/// Decide whether a ball leaves the world this step
///
/// Reaping is checked first, so a ball is never both reaped and captured.
/// `None` means the ball stays active.
pub fn classify_ball(position: Vec2, velocity: Vec2, out_of_bounds_y: f64, zone: &CaptureZone) -> Option<BallFate> {
    if position.y < out_of_bounds_y {
        Some(BallFate::Reaped)
    } else if zone.captures(position, velocity) {
        Some(BallFate::Captured)
    } else {
        None
    }
}

/// Whether a ball is lying still near the floor this frame
///
/// Only meaningful for balls [`classify_ball`] left active. The caller counts
/// consecutive frames and removes the ball once `config.frames` is reached.
pub fn lies_stranded(config: &StrandConfig, position: Vec2, velocity: Vec2) -> bool {
    config.frames > 0 && position.y <= config.max_height && velocity.length() < config.max_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> CaptureZone {
        CaptureZone::from_config(&WorldConfig::default())
    }

    #[test]
    fn test_zone_from_default_config() {
        let zone = zone();
        assert!((zone.rect.x - 280.0).abs() < 1e-9);
        assert!((zone.rect.width - 240.0).abs() < 1e-9);
        assert_eq!(zone.rect.y, 5.0);
        assert_eq!(zone.rect.height, 65.0);
    }

    #[test]
    fn test_ball_resting_on_floor_in_zone_is_captured() {
        let config = WorldConfig::default();
        let resting = Vec2::new(400.0, config.resting_height());
        assert!(zone().captures(resting, Vec2::ZERO));
        // Sunk slightly into the floor by a step of gravity
        assert!(zone().captures(resting - Vec2::new(0.0, 0.25), Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_lies_stranded() {
        let config = StrandConfig::default();
        assert!(lies_stranded(&config, Vec2::new(100.0, 17.0), Vec2::new(5.0, 0.0)));
        assert!(!lies_stranded(&config, Vec2::new(100.0, 17.0), Vec2::new(60.0, 0.0)));
        assert!(!lies_stranded(&config, Vec2::new(100.0, 300.0), Vec2::ZERO));

        let disabled = StrandConfig {
            frames: 0,
            ..StrandConfig::default()
        };
        assert!(!lies_stranded(&disabled, Vec2::new(100.0, 17.0), Vec2::ZERO));
    }

    #[test]
    fn test_slow_ball_inside_is_captured() {
        assert!(zone().captures(Vec2::new(400.0, 40.0), Vec2::new(50.0, -10.0)));
    }

    #[test]
    fn test_fast_ball_passes_through() {
        assert!(!zone().captures(Vec2::new(400.0, 40.0), Vec2::new(0.0, -500.0)));
        // Exactly at the threshold is still too fast
        assert!(!zone().captures(Vec2::new(400.0, 40.0), Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn test_ball_outside_is_not_captured() {
        assert!(!zone().captures(Vec2::new(100.0, 40.0), Vec2::ZERO));
        assert!(!zone().captures(Vec2::new(400.0, 200.0), Vec2::ZERO));
    }

    #[test]
    fn test_classify_boundary() {
        let zone = zone();
        assert_eq!(classify_ball(Vec2::new(10.0, -50.0), Vec2::ZERO, -50.0, &zone), None);
        assert_eq!(
            classify_ball(Vec2::new(10.0, -51.0), Vec2::ZERO, -50.0, &zone),
            Some(BallFate::Reaped)
        );
        assert_eq!(
            classify_ball(Vec2::new(400.0, 40.0), Vec2::ZERO, -50.0, &zone),
            Some(BallFate::Captured)
        );
    }

    #[test]
    fn test_reap_wins_over_capture() {
        // Zone dipping below the out-of-bounds line
        let zone = CaptureZone::new(Rect::new(0.0, -100.0, 100.0, 200.0), 100.0);
        assert_eq!(
            classify_ball(Vec2::new(50.0, -60.0), Vec2::ZERO, -50.0, &zone),
            Some(BallFate::Reaped)
        );
    }
}
