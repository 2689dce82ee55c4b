//! Scripted hand track
//!
//! Stands in for the camera and landmark tracker when running headless: a
//! hand sweeping side to side with a gentle tilt, dropping out for a few
//! frames now and then the way a real tracker loses the hand.

use std::f64::consts::TAU;
use tiltcatch_input::{HandPose, Vec2};

/// Deterministic source of hand poses in input-frame pixels
#[derive(Debug, Clone)]
pub struct HandScript {
    frame_width: f64,
    frame_height: f64,
    /// Frames per full left-right-left sweep
    pub period: u32,
    /// Peak tilt in radians
    pub max_tilt: f64,
    /// A dropout starts every this many frames; 0 disables dropouts
    pub dropout_every: u32,
    /// Length of each dropout in frames
    pub dropout_len: u32,
}

impl HandScript {
    pub fn new(frame_width: f64, frame_height: f64) -> Self {
        Self {
            frame_width,
            frame_height,
            period: 480,
            max_tilt: 0.35,
            dropout_every: 300,
            dropout_len: 12,
        }
    }

    /// Pose seen at `frame`, or `None` while the hand is lost
    pub fn pose_at(&self, frame: u32) -> Option<HandPose> {
        if self.dropout_every > 0 && frame % self.dropout_every < self.dropout_len {
            return None;
        }
        let phase = TAU * f64::from(frame % self.period.max(1)) / f64::from(self.period.max(1));
        let x = self.frame_width * (0.5 + 0.3 * phase.sin());
        // Hold the hand in the lower half of the frame
        let y = self.frame_height * 0.65;
        let angle = self.max_tilt * (2.0 * phase).cos();
        Some(HandPose::new(Vec2::new(x, y), angle))
    }
}
