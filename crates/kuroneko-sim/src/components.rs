//! ECS components for the headless game world.

use std::sync::Arc;

use glam::Vec3;

use kuroneko_core::enums::AnimationCue;
use kuroneko_core::params::{AnimationSet, WeaponData};
use kuroneko_core::types::LayerMask;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Horizontal facing direction (unit length).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec3);

/// Sphere collider. Overlap queries test against `radius` on `layer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
    pub layer: LayerMask,
}

/// Straight-line steering toward a destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    pub speed: f32,
}

/// Current animation clip. Replaying the playing clip is a no-op.
#[derive(Debug, Clone)]
pub struct Animator {
    clips: AnimationSet,
    current: Option<String>,
}

impl Animator {
    pub fn new(clips: AnimationSet) -> Self {
        Self {
            clips,
            current: None,
        }
    }

    /// Start the clip for `cue`. Returns the clip name if it changed.
    pub fn play(&mut self, cue: AnimationCue) -> Option<&str> {
        let clip = self.clips.clip(cue);
        if self.current.as_deref() == Some(clip) {
            return None;
        }
        self.current = Some(clip.to_string());
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

/// Survives scene unloads.
#[derive(Debug, Clone, Copy)]
pub struct Persistent;

/// Component shared with a lifecycle cell (managed singletons).
pub struct Shared<T>(pub Arc<T>);

/// Marker for the player body.
#[derive(Debug, Clone, Copy)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub damage: f32,
    pub remaining_secs: f32,
}

/// A weapon lying in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponPickup {
    pub data: WeaponData,
}

#[derive(Debug, Clone, Copy)]
pub struct HealPickup;

/// Reaching this trigger ends the game.
#[derive(Debug, Clone, Copy)]
pub struct ExitZone;
