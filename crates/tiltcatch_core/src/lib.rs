//! Core game world for TiltCatch
//!
//! This crate provides the session-level simulation:
//! - [`World`] - walls, the hand-driven platform and the falling balls
//! - [`WorldConfig`] - every tunable constant in one serializable place
//! - [`CaptureZone`] - the scoring rectangle near the floor
//! - [`SpawnScheduler`] - frame-counted ball spawning
//! - [`RenderSnapshot`] - read-only state for drawing code

mod capture;
mod config;
mod error;
mod snapshot;
mod spawner;
mod world;

pub use capture::{classify_ball, lies_stranded, BallFate, CaptureZone};
pub use config::{BallConfig, CaptureConfig, PlatformConfig, SpawnConfig, StrandConfig, WallConfig, WorldConfig};
pub use error::WorldError;
pub use snapshot::{BallView, PlatformView, RenderSnapshot, WallView};
pub use spawner::SpawnScheduler;
pub use world::{BallKey, StepReport, World, FIXED_DT};

// Re-export the physics and math types that appear in this crate's API
pub use tiltcatch_math::{Rect, Vec2};
pub use tiltcatch_physics::{PhysicsError, PhysicsMaterial};
