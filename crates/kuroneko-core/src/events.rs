//! Events emitted by the session for audio and UI feedback.
//!
//! Entity ids are the raw bits of the world handle; they are stable for the
//! lifetime of the entity and never reused while it is alive.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyState, WeaponKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemyStateChanged {
        enemy: u64,
        from: EnemyState,
        to: EnemyState,
    },
    /// An animation collaborator was asked to play a new clip.
    AnimationStarted { entity: u64, clip: String },
    EnemyAttacked { enemy: u64, damage: f32 },
    EnemyKilled { enemy: u64 },
    EnemyRemoved { enemy: u64 },
    PlayerDamaged { amount: f32, health: f32 },
    PlayerDied,
    PlayerHealed { health: f32, items_left: u32 },
    HealItemCollected { items: u32 },
    ShotFired { weapon: WeaponKind, ammo_left: u32 },
    ReloadStarted { duration_secs: f32 },
    ReloadFinished { ammo: u32 },
    WeaponPickedUp { name: String },
    WeaponDropped { name: String },
    ProjectileHit { target: u64, damage: f32 },
    ExitReached,
    GameRestarted,
}
