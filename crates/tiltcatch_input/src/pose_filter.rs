//! Temporal smoothing of hand poses

use crate::gesture::{clamp, map_input_to_world, smooth};
use serde::{Deserialize, Serialize};
use tiltcatch_math::{angle_difference, normalize_angle, Vec2};

/// A hand pose as reported by the tracker, in input-frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub position: Vec2,
    /// Radians
    pub angle: f64,
}

impl HandPose {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self { position, angle }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.angle.is_finite()
    }
}

/// Settings for [`PoseFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseFilterConfig {
    /// Width of the frame the tracker reports in
    pub frame_width: f64,
    /// Height of the frame the tracker reports in
    pub frame_height: f64,
    /// Smoothing factor for x and y, in (0, 1]
    pub position_factor: f64,
    /// Smoothing factor for the angle, in (0, 1]
    pub angle_factor: f64,
    /// How far inside the world edges the platform is kept
    pub clamp_margin: f64,
}

impl Default for PoseFilterConfig {
    fn default() -> Self {
        Self {
            frame_width: 800.0,
            frame_height: 600.0,
            position_factor: 0.15,
            angle_factor: 0.1,
            clamp_margin: 50.0,
        }
    }
}

/// Low-pass filter from raw hand poses to platform poses
///
/// Position is smoothed harder than angle, which keeps the platform steady
/// while still letting a tilt read quickly.
#[derive(Debug, Clone)]
pub struct PoseFilter {
    pub config: PoseFilterConfig,
    world_width: f64,
    world_height: f64,
    position: Vec2,
    angle: f64,
}

impl PoseFilter {
    /// Create a filter resting at the world center with zero tilt
    pub fn new(config: PoseFilterConfig, world_width: f64, world_height: f64) -> Self {
        Self {
            config,
            world_width,
            world_height,
            position: Vec2::new(world_width / 2.0, world_height / 2.0),
            angle: 0.0,
        }
    }

    /// Feed one raw pose and return the filtered platform pose
    ///
    /// Non-finite poses leave the filter untouched and return the last output.
    pub fn apply(&mut self, pose: &HandPose) -> (Vec2, f64) {
        if !pose.is_finite() {
            log::debug!("Dropping non-finite hand pose {:?}", pose);
            return self.current();
        }

        let target = map_input_to_world(
            pose.position.x,
            pose.position.y,
            self.config.frame_width,
            self.config.frame_height,
            self.world_width,
            self.world_height,
        );
        let factor = self.config.position_factor;
        let margin = self.config.clamp_margin;
        self.position = Vec2::new(
            clamp(
                smooth(self.position.x, target.x, factor),
                margin,
                self.world_width - margin,
            ),
            clamp(
                smooth(self.position.y, target.y, factor),
                margin,
                self.world_height - margin,
            ),
        );

        // Ease along the short way round so a ±π crossing does not spin the platform
        let delta = angle_difference(pose.angle, self.angle);
        self.angle = normalize_angle(self.angle + delta * self.config.angle_factor);

        self.current()
    }

    /// Last filtered pose
    pub fn current(&self) -> (Vec2, f64) {
        (self.position, self.angle)
    }

    /// Return to the world center with zero tilt
    pub fn reset(&mut self) {
        self.position = Vec2::new(self.world_width / 2.0, self.world_height / 2.0);
        self.angle = 0.0;
    }
}
