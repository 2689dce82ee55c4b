//! Physical material properties for collision response

use serde::{Deserialize, Serialize};

/// Physical material properties for collision response
///
/// Materials define how objects interact during collisions, including
/// friction (how much objects resist sliding) and restitution (bounciness).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Coulomb friction coefficient (>= 0)
    pub friction: f64,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f64,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Boundary walls and floor
    pub const WALL: Self = Self {
        friction: 0.7,
        restitution: 0.6,
    };

    /// The hand-driven platform: grippy and springy
    pub const PLATFORM: Self = Self {
        friction: 0.9,
        restitution: 0.85,
    };

    /// Falling balls
    pub const BALL: Self = Self {
        friction: 0.6,
        restitution: 0.7,
    };

    /// Create a new physics material with custom friction and restitution
    ///
    /// Friction is clamped to be non-negative, restitution to [0.0, 1.0].
    pub fn new(friction: f64, restitution: f64) -> Self {
        Self {
            friction: friction.max(0.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two materials for collision response
    ///
    /// Both coefficients take the minimum of the pair, so the less bouncy
    /// and less grippy surface decides the contact.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: self.friction.min(other.friction),
            restitution: self.restitution.min(other.restitution),
        }
    }
}
