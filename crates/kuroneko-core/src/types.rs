//! Fundamental simulation types.

use std::ops::{BitOr, BitOrAssign};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Collision layer bit set used to filter spatial queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const PLAYER: LayerMask = LayerMask(1 << 0);
    pub const ENEMY: LayerMask = LayerMask(1 << 1);
    pub const GROUND: LayerMask = LayerMask(1 << 2);
    pub const PICKUP: LayerMask = LayerMask(1 << 3);
    pub const TRIGGER: LayerMask = LayerMask(1 << 4);
    pub const OBSTACLE: LayerMask = LayerMask(1 << 5);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True if any bit of `other` is set in `self`.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: LayerMask) {
        self.0 |= rhs.0;
    }
}

/// Axis-aligned walkable ground patch at a fixed height.
/// Covers `min.x..=max.x` on X and `min.z..=max.z` on Z (the `y` of both corners is ignored).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPatch {
    pub min: Vec3,
    pub max: Vec3,
    pub height: f32,
}

impl GroundPatch {
    pub fn new(min: Vec3, max: Vec3, height: f32) -> Self {
        Self { min, max, height }
    }

    /// Whether the horizontal footprint contains the point's X/Z.
    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// Yaw-only facing direction helper: flattens `to - from` onto the XZ plane.
/// Returns `None` when the two points are vertically aligned.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    delta.try_normalize()
}
