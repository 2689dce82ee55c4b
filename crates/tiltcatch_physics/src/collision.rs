//! Collision detection for 2D shapes
//!
//! Provides narrow-phase contact generation between circles and oriented
//! boxes, plus collision filtering via layer masks.

use bitflags::bitflags;

use crate::body::RigidBody;
use crate::shapes::{Circle, OrientedBox, PlacedShape};
use tiltcatch_math::Vec2;

/// Below this distance two centers are treated as coincident
const COINCIDENT_EPSILON: f64 = 1e-9;

bitflags! {
    /// Collision layers for filtering which objects can collide
    ///
    /// Each layer is a bit in a 32-bit mask. Objects can belong to multiple layers
    /// and can define which layers they collide with via a collision mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Walls and floor
        const STATIC = 1 << 1;
        /// The hand-driven platform
        const PLATFORM = 1 << 2;
        /// Falling balls
        const BALL = 1 << 3;
        /// All layers (collide with everything)
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision filter determining what an object collides with
///
/// Two objects A and B collide if:
/// - (A.layer & B.mask) != 0, AND
/// - (B.layer & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this object belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this object can collide with
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::DEFAULT,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified layer and mask
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if this filter allows collision with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for static world geometry
    pub fn static_world() -> Self {
        Self {
            layer: CollisionLayer::STATIC,
            mask: CollisionLayer::ALL,
        }
    }

    /// Filter for the platform
    ///
    /// The platform only ever needs to touch balls; it passes through walls.
    pub fn platform() -> Self {
        Self {
            layer: CollisionLayer::PLATFORM,
            mask: CollisionLayer::BALL | CollisionLayer::DEFAULT,
        }
    }

    /// Filter for balls, which collide with everything
    pub fn ball() -> Self {
        Self {
            layer: CollisionLayer::BALL,
            mask: CollisionLayer::ALL,
        }
    }
}

/// Contact information from a collision
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Point of contact in world space
    pub point: Vec2,
    /// Unit normal pointing from the first shape toward the second
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping)
    pub penetration: f64,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f64) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }

    /// The same contact seen from the other shape
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Test circle vs circle collision
///
/// The normal points from `a` toward `b`. Coincident centers have no
/// meaningful direction, so +Y is used to separate them.
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Option<Contact> {
    let delta = b.center - a.center;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > COINCIDENT_EPSILON { delta / dist } else { Vec2::Y };
    let penetration = min_dist - dist;
    // Midway through the overlap region
    let point = a.center + normal * (a.radius - penetration * 0.5);
    Some(Contact::new(point, normal, penetration))
}

/// Test circle vs oriented box collision
///
/// Works in the box's local frame: the circle center is clamped onto the box
/// to find the closest surface point, which gives the separating axis from
/// the box toward the circle. When the center is inside the box the face with
/// the shallowest exit is used instead.
///
/// The normal points from the box toward the circle; the contact point lies
/// on the box surface.
pub fn circle_vs_box(circle: &Circle, obox: &OrientedBox) -> Option<Contact> {
    let h = obox.half_extents;
    let local = obox.to_local(circle.center);
    let closest = local.clamp_components(-h, h);
    let delta = local - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > COINCIDENT_EPSILON * COINCIDENT_EPSILON {
        // Center outside the box
        if dist_sq >= circle.radius * circle.radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        let normal = obox.rotation.rotate(delta / dist);
        let point = obox.to_world(closest);
        return Some(Contact::new(point, normal, circle.radius - dist));
    }

    // Center inside (or on) the box: push out through the nearest face
    let to_x_face = h.x - local.x.abs();
    let to_y_face = h.y - local.y.abs();
    let (local_normal, surface, depth) = if to_x_face < to_y_face {
        let sign = if local.x >= 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(sign, 0.0), Vec2::new(sign * h.x, local.y), to_x_face)
    } else {
        let sign = if local.y >= 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(0.0, sign), Vec2::new(local.x, sign * h.y), to_y_face)
    };

    Some(Contact::new(
        obox.to_world(surface),
        obox.rotation.rotate(local_normal),
        circle.radius + depth,
    ))
}

/// Test oriented box vs oriented box collision with the separating axis test
///
/// The four face normals are the only candidate axes. The normal points from
/// `a` toward `b`, and the contact point is the deepest corner of the
/// incident box.
pub fn box_vs_box(a: &OrientedBox, b: &OrientedBox) -> Option<Contact> {
    let delta = b.center - a.center;
    let [a0, a1] = a.axes();
    let [b0, b1] = b.axes();

    let mut best: Option<(f64, Vec2, bool)> = None;
    for (axis, from_a) in [(a0, true), (a1, true), (b0, false), (b1, false)] {
        let distance = delta.dot(axis);
        let overlap = a.projected_radius(axis) + b.projected_radius(axis) - distance.abs();
        if overlap <= 0.0 {
            // Separating axis found
            return None;
        }
        if best.map_or(true, |(depth, _, _)| overlap < depth) {
            let normal = if distance < 0.0 { -axis } else { axis };
            best = Some((overlap, normal, from_a));
        }
    }

    let (penetration, normal, from_a) = best?;
    let point = if from_a {
        // A is the reference box, so B's corner digs in against the normal
        b.support(-normal)
    } else {
        a.support(normal)
    };
    Some(Contact::new(point, normal, penetration))
}

/// Generate a contact between two bodies
///
/// Returns `None` if they do not overlap. The normal always points from
/// `a` toward `b`.
pub fn generate_contact(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    let contact = match (a.placed_shape(), b.placed_shape()) {
        (PlacedShape::Circle(ca), PlacedShape::Circle(cb)) => circle_vs_circle(&ca, &cb),
        // circle_vs_box returns normal pointing from box toward circle
        (PlacedShape::Circle(circle), PlacedShape::Box(obox)) => {
            circle_vs_box(&circle, &obox).map(Contact::flipped)
        }
        (PlacedShape::Box(obox), PlacedShape::Circle(circle)) => circle_vs_box(&circle, &obox),
        (PlacedShape::Box(ba), PlacedShape::Box(bb)) => box_vs_box(&ba, &bb),
    };
    contact.filter(Contact::is_colliding)
}
