//! Physics world and simulation

use crate::body::{BodyKey, RigidBody};
use crate::broad_phase::{BroadPhase, BruteForceBroadPhase};
use crate::collision::{generate_contact, Contact};
use crate::solver::{resolve, SolverSettings};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tiltcatch_math::Vec2;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f64,
    /// Closing speed below which contacts do not bounce
    pub restitution_threshold: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -900.0,
            restitution_threshold: 30.0,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f64) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    pub fn gravity_vector(&self) -> Vec2 {
        Vec2::new(0.0, self.gravity)
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            restitution_threshold: self.restitution_threshold,
        }
    }
}

/// A contact resolved during the last step
#[derive(Clone, Copy, Debug)]
pub struct ContactRecord {
    pub body_a: BodyKey,
    pub body_b: BodyKey,
    /// Contact with the normal pointing from `body_a` toward `body_b`
    pub contact: Contact,
    /// Magnitude of the normal impulse applied (0.0 if the pair was separating)
    pub normal_impulse: f64,
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    broad_phase: Box<dyn BroadPhase>,
    /// Scratch buffer reused by the broad phase every step
    pairs: Vec<(BodyKey, BodyKey)>,
    contacts: Vec<ContactRecord>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            broad_phase: Box::new(BruteForceBroadPhase::new()),
            pairs: Vec::new(),
            contacts: Vec::new(),
            config,
        }
    }

    /// Replace the broad phase
    pub fn with_broad_phase(mut self, broad_phase: Box<dyn BroadPhase>) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body (and with it, its collider) from the world
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over all bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody)> + '_ {
        self.bodies.iter()
    }

    /// Contacts resolved during the most recent step
    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Gravity and velocity integration for dynamic bodies
    /// 2. Broad-phase pairing
    /// 3. Narrow-phase contact generation and impulse resolution
    ///
    /// A non-positive or non-finite `dt` leaves the world untouched.
    pub fn step(&mut self, dt: f64) {
        self.contacts.clear();
        if !(dt.is_finite() && dt > 0.0) {
            log::debug!("Ignoring physics step with dt = {}", dt);
            return;
        }

        // Phase 1: Apply gravity and integrate velocity
        let gravity = self.config.gravity_vector();
        for body in self.bodies.values_mut() {
            body.integrate(gravity, dt);
        }

        // Phase 2: Resolve collisions
        self.resolve_collisions();
    }

    fn resolve_collisions(&mut self) {
        self.broad_phase.candidate_pairs(&self.bodies, &mut self.pairs);
        let settings = self.config.solver_settings();

        for &(key_a, key_b) in &self.pairs {
            let Some(contact) = generate_contact(&self.bodies[key_a], &self.bodies[key_b]) else {
                continue;
            };
            let Some([body_a, body_b]) = self.bodies.get_disjoint_mut([key_a, key_b]) else {
                continue;
            };
            let normal_impulse = resolve(&contact, body_a, body_b, &settings);
            self.contacts.push(ContactRecord {
                body_a: key_a,
                body_b: key_b,
                contact,
                normal_impulse,
            });
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PhysicsMaterial;
    use crate::shapes::Shape;

    fn ball(position: Vec2) -> RigidBody {
        RigidBody::new_dynamic(Shape::circle(0.5).unwrap(), position, 1.0).unwrap()
    }

    /// Helper to create a world with a floor box whose top face sits at y = 0
    fn world_with_floor(gravity: f64, floor_material: PhysicsMaterial) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(gravity));
        let floor = RigidBody::new_static(Shape::oriented_box(100.0, 50.0).unwrap(), Vec2::new(0.0, -50.0))
            .unwrap()
            .with_material(floor_material);
        world.add_body(floor);
        world
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, -900.0);
        assert_eq!(config.gravity_vector(), Vec2::new(0.0, -900.0));
    }

    #[test]
    fn test_world_add_and_get_body() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(ball(Vec2::new(0.0, 5.0)));

        let retrieved = world.get_body(key).expect("Body should exist");
        assert_eq!(retrieved.position, Vec2::new(0.0, 5.0));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(ball(Vec2::new(0.0, 5.0)));

        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        // Slot reuse must not revive the old key
        let new_key = world.add_body(ball(Vec2::new(1.0, 5.0)));
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_gravity_application() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(ball(Vec2::new(0.0, 10.0)));

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        // 0 + (-900) * 0.1
        assert!((body.velocity.y + 90.0).abs() < 1e-9);
        assert!((body.position.y - (10.0 - 9.0)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(ball(Vec2::new(0.0, 10.0)));

        world.step(0.0);
        world.step(-1.0);
        world.step(f64::NAN);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.position, Vec2::new(0.0, 10.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_static_and_kinematic_bodies_do_not_move() {
        let mut world = PhysicsWorld::new();
        let shape = Shape::oriented_box(1.0, 1.0).unwrap();
        let wall = world.add_body(RigidBody::new_static(shape, Vec2::ZERO).unwrap());
        let platform = world.add_body(RigidBody::new_kinematic(shape, Vec2::new(10.0, 0.0)).unwrap());

        for _ in 0..100 {
            world.step(1.0 / 60.0);
        }

        assert_eq!(world.get_body(wall).unwrap().position, Vec2::ZERO);
        assert_eq!(world.get_body(platform).unwrap().position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_ball_comes_to_rest_on_floor() {
        let mut world = world_with_floor(-900.0, PhysicsMaterial::WALL);
        let key = world.add_body(ball(Vec2::new(0.0, 20.0)).with_material(PhysicsMaterial::BALL));

        for _ in 0..600 {
            world.step(1.0 / 60.0);
        }

        let body = world.get_body(key).unwrap();
        // Resting on top of the floor, slightly sunk by at most one step of gravity
        assert!(body.position.y > 0.4 && body.position.y < 0.6, "y = {}", body.position.y);
        assert!(body.velocity.y.abs() < 30.0);
    }

    #[test]
    fn test_floor_bounce_flips_velocity() {
        let mut world = world_with_floor(0.0, PhysicsMaterial::new(0.5, 1.0));
        let key = world.add_body(
            ball(Vec2::new(0.0, 0.6))
                .with_velocity(Vec2::new(0.0, -100.0))
                .with_material(PhysicsMaterial::new(0.5, 1.0)),
        );

        world.step(0.01);

        let body = world.get_body(key).unwrap();
        assert!(body.velocity.y > 0.0);
        assert_eq!(world.contacts().len(), 1);
        assert!(world.contacts()[0].normal_impulse > 0.0);
    }

    #[test]
    fn test_two_balls_do_not_interpenetrate() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let a = world.add_body(ball(Vec2::ZERO));
        let b = world.add_body(ball(Vec2::new(2.0, 0.0)).with_velocity(Vec2::new(-10.0, 0.0)));

        for _ in 0..30 {
            world.step(0.016);
        }

        let pa = world.get_body(a).unwrap().position;
        let pb = world.get_body(b).unwrap().position;
        assert!((pb - pa).length() >= 1.0 - 1e-6);
    }

    struct NoPairs;

    impl BroadPhase for NoPairs {
        fn candidate_pairs(&mut self, _bodies: &SlotMap<BodyKey, RigidBody>, pairs: &mut Vec<(BodyKey, BodyKey)>) {
            pairs.clear();
        }
    }

    #[test]
    fn test_custom_broad_phase_is_used() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0)).with_broad_phase(Box::new(NoPairs));
        let a = world.add_body(ball(Vec2::ZERO));
        world.add_body(ball(Vec2::new(0.5, 0.0)));

        world.step(0.016);

        assert!(world.contacts().is_empty());
        assert_eq!(world.get_body(a).unwrap().position, Vec2::ZERO);
    }
}
