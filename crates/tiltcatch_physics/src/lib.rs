//! 2D Physics simulation for TiltCatch
//!
//! This crate provides a small, deterministic rigid-body simulation:
//! - Collision shapes (circles, oriented boxes) with materials
//! - Broad-phase pairing over bounding boxes
//! - Narrow-phase contact generation (circle/circle, circle/box, box/box)
//! - Impulse-based resolution with restitution, Coulomb friction and
//!   positional correction
//! - Static, kinematic and dynamic bodies in a generational arena

pub mod body;
pub mod broad_phase;
pub mod collision;
pub mod error;
pub mod material;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody};
pub use broad_phase::{find_candidate_pairs, BroadPhase, BruteForceBroadPhase};
pub use collision::{
    box_vs_box, circle_vs_box, circle_vs_circle, generate_contact, CollisionFilter, CollisionLayer, Contact,
};
pub use error::PhysicsError;
pub use material::PhysicsMaterial;
pub use shapes::{Circle, Collider, OrientedBox, PlacedShape, Shape};
pub use solver::{resolve, SolverSettings};
pub use world::{ContactRecord, PhysicsConfig, PhysicsWorld};
