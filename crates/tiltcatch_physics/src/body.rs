//! Rigid body types for 2D physics simulation

use crate::collision::CollisionFilter;
use crate::error::PhysicsError;
use crate::material::PhysicsMaterial;
use crate::shapes::{Collider, PlacedShape, Shape};
use tiltcatch_math::{Aabb2, Vec2};
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing so a key to a removed body never aliases
    /// a body that later reuses the slot.
    pub struct BodyKey;
}

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Never moves (walls, floor)
    Static,
    /// Moved by explicit commands; pushes dynamic bodies but never receives impulses
    Kinematic,
    /// Integrated under gravity and collision impulses
    Dynamic,
}

/// A 2D rigid body with a single attached collider
///
/// Mass and inertia are private so that a dynamic body can never hold a
/// zero or negative mass: every path that sets mass validates it.
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Position of the body origin (world coordinates)
    pub position: Vec2,
    /// Orientation in radians, counter-clockwise
    pub angle: f64,
    /// Linear velocity (units per second)
    pub velocity: Vec2,
    /// Angular velocity (radians per second)
    pub angular_velocity: f64,
    body_type: BodyType,
    mass: f64,
    inv_mass: f64,
    inv_inertia: f64,
    collider: Collider,
}

impl RigidBody {
    /// Create a dynamic body
    ///
    /// Fails if `mass` is not strictly positive and finite, or if the shape
    /// has degenerate dimensions.
    pub fn new_dynamic(shape: Shape, position: Vec2, mass: f64) -> Result<Self, PhysicsError> {
        shape.validate()?;
        let mut body = Self::with_type(BodyType::Dynamic, shape, position);
        body.set_mass(mass)?;
        Ok(body)
    }

    /// Create a kinematic body (infinite mass, externally driven)
    pub fn new_kinematic(shape: Shape, position: Vec2) -> Result<Self, PhysicsError> {
        shape.validate()?;
        Ok(Self::with_type(BodyType::Kinematic, shape, position))
    }

    /// Create a static body that never moves
    pub fn new_static(shape: Shape, position: Vec2) -> Result<Self, PhysicsError> {
        shape.validate()?;
        Ok(Self::with_type(BodyType::Static, shape, position))
    }

    fn with_type(body_type: BodyType, shape: Shape, position: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            body_type,
            mass: 0.0,
            inv_mass: 0.0,
            inv_inertia: 0.0,
            collider: Collider::new(shape),
        }
    }

    /// Set the orientation of this body
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the material of this body's collider
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.collider.material = material;
        self
    }

    /// Set the collision filter of this body's collider
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.collider.filter = filter;
        self
    }

    /// Change the mass of a dynamic body
    ///
    /// Static and kinematic bodies always have infinite mass, so for them this
    /// is a no-op that still rejects invalid input.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass { mass });
        }
        if self.body_type == BodyType::Dynamic {
            self.mass = mass;
            self.inv_mass = 1.0 / mass;
            let inertia = self.collider.shape.moment_of_inertia(mass);
            self.inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
        }
        Ok(())
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    pub fn is_kinematic(&self) -> bool {
        self.body_type == BodyType::Kinematic
    }

    /// Mass, or 0.0 for infinite-mass (static or kinematic) bodies
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Inverse mass, 0.0 for bodies that never receive impulses
    pub fn inverse_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Inverse moment of inertia, 0.0 for bodies that never receive impulses
    pub fn inverse_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn shape(&self) -> &Shape {
        &self.collider.shape
    }

    pub fn material(&self) -> PhysicsMaterial {
        self.collider.material
    }

    pub fn filter(&self) -> CollisionFilter {
        self.collider.filter
    }

    /// The collider placed at the body's current transform
    pub fn placed_shape(&self) -> PlacedShape {
        self.collider.shape.placed(self.position, self.angle)
    }

    /// World-space bounding box of the collider
    pub fn aabb(&self) -> Aabb2 {
        self.placed_shape().aabb()
    }

    /// Velocity of a world-space point rigidly attached to this body
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_velocity, point - self.position)
    }

    /// Apply an impulse at a world-space point
    ///
    /// Non-dynamic bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec2, point: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += (point - self.position).cross(impulse) * self.inv_inertia;
    }

    /// Apply a positional correction (e.g., from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        if self.is_dynamic() {
            self.position += correction;
        }
    }

    /// Advance a dynamic body by one semi-implicit Euler step
    pub fn integrate(&mut self, gravity: Vec2, dt: f64) {
        if !self.is_dynamic() {
            return;
        }
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }
}
