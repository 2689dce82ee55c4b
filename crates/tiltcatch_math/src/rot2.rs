//! 2D rotation type

use crate::Vec2;

/// A 2D rotation stored as its cosine and sine
///
/// Caching the pair avoids recomputing trigonometry for every vertex when
/// a body's shape is transformed into world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rot2 {
    pub cos: f64,
    pub sin: f64,
}

impl Default for Rot2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rot2 {
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// Create a rotation from an angle in radians
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { cos, sin }
    }

    /// Angle of this rotation in radians, in (-π, π]
    #[inline]
    pub fn angle(self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// Rotate a vector from local space into world space
    #[inline]
    pub fn rotate(self, v: Vec2) -> Vec2 {
        Vec2::new(self.cos * v.x - self.sin * v.y, self.sin * v.x + self.cos * v.y)
    }

    /// Rotate a vector from world space into local space
    #[inline]
    pub fn inverse_rotate(self, v: Vec2) -> Vec2 {
        Vec2::new(self.cos * v.x + self.sin * v.y, -self.sin * v.x + self.cos * v.y)
    }

    /// Local X axis expressed in world space
    #[inline]
    pub fn x_axis(self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// Local Y axis expressed in world space
    #[inline]
    pub fn y_axis(self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }
}
