//! Read-only render state
//!
//! Drawing code consumes these plain values and never touches the physics
//! registry. Platform corners come from the same half-extents the collider
//! uses, so what is drawn is what collides.

use tiltcatch_math::{Rect, Vec2};

/// One active ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub position: Vec2,
    pub radius: f64,
    pub angle: f64,
}

/// The platform pose and outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformView {
    pub position: Vec2,
    pub angle: f64,
    pub half_extents: Vec2,
    /// Outline corners, counter-clockwise from the local bottom-left
    pub corners: [Vec2; 4],
}

/// A boundary wall as an axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallView {
    pub rect: Rect,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub width: f64,
    pub height: f64,
    pub platform: PlatformView,
    pub walls: Vec<WallView>,
    pub balls: Vec<BallView>,
    pub capture_zone: Rect,
    pub balls_caught: u64,
}
