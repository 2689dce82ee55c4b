//! 2D Mathematics Library
//!
//! This crate provides the small set of 2D geometry types used by the
//! TiltCatch physics world.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components (double precision)
//! - [`Rot2`] - 2D rotation stored as a cosine/sine pair
//! - [`Aabb2`] - Axis-aligned bounding box
//! - [`Rect`] - Axis-aligned rectangle in (x, y, width, height) form
//!
//! Angle wrapping lives in [`angle`].

mod vec2;
mod rot2;
pub mod aabb;
pub mod angle;

pub use vec2::Vec2;
pub use rot2::Rot2;
pub use aabb::{Aabb2, Rect};
pub use angle::{angle_difference, normalize_angle};
