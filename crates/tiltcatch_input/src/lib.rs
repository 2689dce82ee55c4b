//! Gesture-to-world adapter
//!
//! Turns hand poses reported in camera-frame pixels into platform poses in
//! world units: [`map_input_to_world`] flips and scales coordinates, and
//! [`PoseFilter`] low-pass filters and clamps them frame to frame.

mod gesture;
mod pose_filter;

pub use gesture::{clamp, distance, hand_angle, hand_center, map_input_to_world, smooth, MIDDLE_MCP, WRIST};
pub use pose_filter::{HandPose, PoseFilter, PoseFilterConfig};

pub use tiltcatch_math::{angle_difference, normalize_angle, Vec2};
