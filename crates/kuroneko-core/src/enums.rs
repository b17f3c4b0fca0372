//! Enumeration types used throughout the runtime.

use serde::{Deserialize, Serialize};

/// Behavioral state of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Stationary pause with the movement gate closed.
    #[default]
    Idle,
    /// Walking to a sampled point around the current position.
    Patrolling,
    /// Following the player, who is in sight but out of reach.
    Chasing,
    /// Player in reach: halted, facing and striking on cooldown.
    Attacking,
    /// Terminal. Awaiting removal.
    Dead,
}

/// Enemy archetype. Selects a preset parameter profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Baseline melee enemy.
    #[default]
    Grunt,
    /// Slow, tough, hits hard.
    Brute,
    /// Fast and fragile with a long sight radius.
    Stalker,
}

/// Visual cue requested from the animation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationCue {
    Idle,
    Patrol,
    Chase,
    Attack,
    Die,
}

/// Weapon family. Used by the UI to pick an icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Pistol,
    Shotgun,
    AssaultRifle,
    Smg,
    Sniper,
}

/// Result of delivering damage to a [`crate::collab::Damageable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    /// Health reduced, target still alive.
    Wounded,
    /// This hit crossed the death threshold. Reported exactly once per target.
    Killed,
}
