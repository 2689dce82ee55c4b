//! Collision shapes for 2D physics
//!
//! A [`Shape`] is local geometry attached to a body. Placing it at the
//! body's position and angle produces a world-space [`PlacedShape`], which
//! is what the narrow phase works on.

use crate::collision::CollisionFilter;
use crate::error::PhysicsError;
use crate::material::PhysicsMaterial;
use tiltcatch_math::{Aabb2, Rot2, Vec2};

/// Local collision geometry of a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Circle centered on the body origin
    Circle { radius: f64 },
    /// Box centered on the body origin, rotated with the body
    OrientedBox { half_extents: Vec2 },
}

impl Shape {
    /// Create a circle shape
    pub fn circle(radius: f64) -> Result<Self, PhysicsError> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Create an oriented box shape from its half-width and half-height
    pub fn oriented_box(half_width: f64, half_height: f64) -> Result<Self, PhysicsError> {
        let shape = Shape::OrientedBox {
            half_extents: Vec2::new(half_width, half_height),
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check that every dimension is positive and finite
    pub fn validate(&self) -> Result<(), PhysicsError> {
        match *self {
            Shape::Circle { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(PhysicsError::InvalidShape(format!("circle radius {}", radius)));
                }
            }
            Shape::OrientedBox { half_extents } => {
                if !(half_extents.is_finite() && half_extents.x > 0.0 && half_extents.y > 0.0) {
                    return Err(PhysicsError::InvalidShape(format!(
                        "box half-extents ({}, {})",
                        half_extents.x, half_extents.y
                    )));
                }
            }
        }
        Ok(())
    }

    /// Moment of inertia about the center for the given mass
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        match *self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::OrientedBox { half_extents } => {
                let w = 2.0 * half_extents.x;
                let h = 2.0 * half_extents.y;
                mass * (w * w + h * h) / 12.0
            }
        }
    }

    /// Place the shape in world space
    pub fn placed(&self, position: Vec2, angle: f64) -> PlacedShape {
        match *self {
            Shape::Circle { radius } => PlacedShape::Circle(Circle::new(position, radius)),
            Shape::OrientedBox { half_extents } => {
                PlacedShape::Box(OrientedBox::new(position, Rot2::from_angle(angle), half_extents))
            }
        }
    }
}

/// A shape together with its material and collision filter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub material: PhysicsMaterial,
    pub filter: CollisionFilter,
}

impl Collider {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            material: PhysicsMaterial::default(),
            filter: CollisionFilter::default(),
        }
    }
}

/// A world-space circle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Check if a point is inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    pub fn aabb(&self) -> Aabb2 {
        Aabb2::from_center_half_extents(self.center, Vec2::new(self.radius, self.radius))
    }
}

/// A world-space box with an arbitrary rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    pub center: Vec2,
    pub rotation: Rot2,
    pub half_extents: Vec2,
}

impl OrientedBox {
    pub fn new(center: Vec2, rotation: Rot2, half_extents: Vec2) -> Self {
        Self {
            center,
            rotation,
            half_extents,
        }
    }

    /// Convert a world point into the box's local frame
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        self.rotation.inverse_rotate(point - self.center)
    }

    /// Convert a local point into world space
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.center + self.rotation.rotate(local)
    }

    /// Check if a point is inside or on the box
    pub fn contains(&self, point: Vec2) -> bool {
        let local = self.to_local(point);
        local.x.abs() <= self.half_extents.x && local.y.abs() <= self.half_extents.y
    }

    /// The two face normals (local X and Y axes in world space)
    pub fn axes(&self) -> [Vec2; 2] {
        [self.rotation.x_axis(), self.rotation.y_axis()]
    }

    /// Corners in counter-clockwise order, starting bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            self.to_world(Vec2::new(-h.x, -h.y)),
            self.to_world(Vec2::new(h.x, -h.y)),
            self.to_world(Vec2::new(h.x, h.y)),
            self.to_world(Vec2::new(-h.x, h.y)),
        ]
    }

    /// Half the length of the box's projection onto a unit axis
    pub fn projected_radius(&self, axis: Vec2) -> f64 {
        let [ax, ay] = self.axes();
        self.half_extents.x * ax.dot(axis).abs() + self.half_extents.y * ay.dot(axis).abs()
    }

    /// Corner furthest along a direction
    pub fn support(&self, direction: Vec2) -> Vec2 {
        let local = self.rotation.inverse_rotate(direction);
        let h = self.half_extents;
        let corner = Vec2::new(
            if local.x >= 0.0 { h.x } else { -h.x },
            if local.y >= 0.0 { h.y } else { -h.y },
        );
        self.to_world(corner)
    }

    pub fn aabb(&self) -> Aabb2 {
        let extent = Vec2::new(self.projected_radius(Vec2::X), self.projected_radius(Vec2::Y));
        Aabb2::from_center_half_extents(self.center, extent)
    }
}

/// A shape placed in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacedShape {
    Circle(Circle),
    Box(OrientedBox),
}

impl PlacedShape {
    pub fn aabb(&self) -> Aabb2 {
        match self {
            PlacedShape::Circle(c) => c.aabb(),
            PlacedShape::Box(b) => b.aabb(),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            PlacedShape::Circle(c) => c.center,
            PlacedShape::Box(b) => b.center,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            PlacedShape::Circle(c) => c.contains(point),
            PlacedShape::Box(b) => b.contains(point),
        }
    }
}
