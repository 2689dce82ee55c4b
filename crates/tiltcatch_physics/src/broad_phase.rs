//! Broad-phase candidate pairing
//!
//! The broad phase hands the narrow phase every pair of bodies whose bounding
//! boxes overlap. Scenes here hold around ten bodies, so an all-pairs sweep is
//! plenty; the [`BroadPhase`] trait is the seam for a spatial grid later.

use crate::body::{BodyKey, RigidBody};
use slotmap::SlotMap;
use tiltcatch_math::Aabb2;

/// Produces candidate pairs for narrow-phase testing
pub trait BroadPhase: Send {
    /// Clear `pairs` and fill it with every pair that may be touching
    ///
    /// Pairs where neither body is dynamic, or whose filters reject each
    /// other, must be left out.
    fn candidate_pairs(&mut self, bodies: &SlotMap<BodyKey, RigidBody>, pairs: &mut Vec<(BodyKey, BodyKey)>);
}

/// O(n²) sweep over all body pairs
#[derive(Debug, Default)]
pub struct BruteForceBroadPhase {
    bounds: Vec<(BodyKey, Aabb2)>,
}

impl BruteForceBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn candidate_pairs(&mut self, bodies: &SlotMap<BodyKey, RigidBody>, pairs: &mut Vec<(BodyKey, BodyKey)>) {
        pairs.clear();
        self.bounds.clear();
        self.bounds.extend(bodies.iter().map(|(key, body)| (key, body.aabb())));

        for i in 0..self.bounds.len() {
            let (key_a, aabb_a) = self.bounds[i];
            let body_a = &bodies[key_a];
            for &(key_b, aabb_b) in &self.bounds[i + 1..] {
                let body_b = &bodies[key_b];

                // Skip pairs that can never receive an impulse
                if !body_a.is_dynamic() && !body_b.is_dynamic() {
                    continue;
                }
                if !body_a.filter().collides_with(&body_b.filter()) {
                    continue;
                }
                if aabb_a.overlaps(&aabb_b) {
                    pairs.push((key_a, key_b));
                }
            }
        }
    }
}

/// Return all body pairs whose bounding boxes overlap, using the all-pairs sweep
pub fn find_candidate_pairs(bodies: &SlotMap<BodyKey, RigidBody>) -> Vec<(BodyKey, BodyKey)> {
    let mut pairs = Vec::new();
    BruteForceBroadPhase::new().candidate_pairs(bodies, &mut pairs);
    pairs
}
