//! Collaborator interfaces the core calls into.
//!
//! The engine runtime (or a headless stand-in) implements these; the core
//! never assumes anything about how overlap tests or ray casts are done.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec3;

use crate::enums::DamageOutcome;
use crate::types::LayerMask;

/// Sphere overlap queries against the world's colliders.
pub trait SpatialQuery {
    /// Opaque identity of a collider owner.
    type Handle: Copy + Eq + Hash + Debug;

    /// All handles whose collider overlaps the sphere at `origin` with `radius`,
    /// restricted to colliders on a layer in `filter`.
    fn query_overlap(&self, origin: Vec3, radius: f32, filter: LayerMask) -> Vec<Self::Handle>;

    /// Whether anything on `filter` overlaps the sphere.
    fn check_sphere(&self, origin: Vec3, radius: f32, filter: LayerMask) -> bool {
        !self.query_overlap(origin, radius, filter).is_empty()
    }
}

/// Ray casts against walkable ground.
pub trait GroundProbe {
    /// First ground hit along the ray, if any, within `max_distance`.
    fn raycast_ground(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<Vec3>;

    fn probe_ground(&self, point: Vec3, direction: Vec3, max_distance: f32, filter: LayerMask) -> bool {
        self.raycast_ground(point, direction, max_distance, filter)
            .is_some()
    }
}

/// Anything that can receive damage: enemies from projectiles, the player from enemies.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome;
    fn is_alive(&self) -> bool;
}
