//! Impulse-based contact resolution

use crate::body::RigidBody;
use crate::collision::Contact;
use tiltcatch_math::Vec2;

/// Tunables for contact resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    /// Closing speeds below this are treated as resting contact (no bounce)
    pub restitution_threshold: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            restitution_threshold: 30.0,
        }
    }
}

/// Resolve a contact between two bodies
///
/// `contact.normal` must point from `a` toward `b`. Applies, in order:
/// 1. A normal impulse using the smaller restitution of the pair, skipped
///    when the bodies are already separating
/// 2. A friction impulse along the contact tangent, capped by the Coulomb
///    bound using the smaller friction of the pair
/// 3. A positional correction that removes the full penetration, split by
///    inverse mass
///
/// Static and kinematic bodies have zero inverse mass, so they never move
/// here, but their velocity still enters the relative-velocity terms.
///
/// Returns the magnitude of the normal impulse that was applied.
pub fn resolve(contact: &Contact, a: &mut RigidBody, b: &mut RigidBody, settings: &SolverSettings) -> f64 {
    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let total_inv_mass = inv_mass_a + inv_mass_b;
    if total_inv_mass <= 0.0 {
        return 0.0;
    }

    let normal = contact.normal;
    let point = contact.point;
    let r_a = point - a.position;
    let r_b = point - b.position;

    let mut normal_impulse = 0.0;
    let relative = b.velocity_at(point) - a.velocity_at(point);
    let closing = relative.dot(normal);

    // Positive normal velocity means the bodies are already separating
    if closing < 0.0 {
        let material = a.material().combine(&b.material());
        let restitution = if -closing < settings.restitution_threshold {
            0.0
        } else {
            material.restitution
        };

        let denom = effective_mass_denominator(a, b, r_a, r_b, normal);
        normal_impulse = -(1.0 + restitution) * closing / denom;
        apply_pair_impulse(a, b, normal * normal_impulse, point);

        // Friction against the post-bounce relative velocity
        let relative = b.velocity_at(point) - a.velocity_at(point);
        let tangent_velocity = relative - normal * relative.dot(normal);
        let tangent_speed = tangent_velocity.length();
        if tangent_speed > 1e-9 {
            let tangent = tangent_velocity / tangent_speed;
            let denom_t = effective_mass_denominator(a, b, r_a, r_b, tangent);
            let max_friction = material.friction * normal_impulse;
            let friction_impulse = (-tangent_speed / denom_t).clamp(-max_friction, max_friction);
            apply_pair_impulse(a, b, tangent * friction_impulse, point);
        }
    }

    let correction = normal * (contact.penetration / total_inv_mass);
    a.apply_correction(-correction * inv_mass_a);
    b.apply_correction(correction * inv_mass_b);

    normal_impulse
}

/// `1/mA + 1/mB + (rA×d)²/IA + (rB×d)²/IB` along direction `d`
fn effective_mass_denominator(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2, direction: Vec2) -> f64 {
    let ra_cross = r_a.cross(direction);
    let rb_cross = r_b.cross(direction);
    a.inverse_mass()
        + b.inverse_mass()
        + ra_cross * ra_cross * a.inverse_inertia()
        + rb_cross * rb_cross * b.inverse_inertia()
}

/// Equal and opposite impulse: `-impulse` on `a`, `+impulse` on `b`
fn apply_pair_impulse(a: &mut RigidBody, b: &mut RigidBody, impulse: Vec2, point: Vec2) {
    a.apply_impulse(-impulse, point);
    b.apply_impulse(impulse, point);
}
