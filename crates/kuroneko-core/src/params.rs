//! Plain parameter structs handed to the core.
//!
//! Loaded from configuration by the integration layer; the core never reads
//! files itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AnimationCue, EnemyArchetype, WeaponKind};
use crate::types::{GroundPatch, LayerMask};

/// Animation clip names per cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSet {
    pub idle: String,
    pub patrol: String,
    pub chase: String,
    pub attack: String,
    pub die: String,
}

impl AnimationSet {
    pub fn clip(&self, cue: AnimationCue) -> &str {
        match cue {
            AnimationCue::Idle => &self.idle,
            AnimationCue::Patrol => &self.patrol,
            AnimationCue::Chase => &self.chase,
            AnimationCue::Attack => &self.attack,
            AnimationCue::Die => &self.die,
        }
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self {
            idle: "Idle".into(),
            patrol: "Walk".into(),
            chase: "Run".into(),
            attack: "Attack".into(),
            die: "Die".into(),
        }
    }
}

/// Enemy tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyParams {
    /// Starting health.
    pub health: f32,
    /// Damage dealt per successful attack.
    pub damage: f32,
    /// Seconds between attacks.
    pub attack_cooldown_secs: f32,
    /// Radius of the "player in sight" overlap test.
    pub sight_radius: f32,
    /// Radius of the "player in attack range" overlap test.
    pub attack_radius: f32,
    /// Half-extent of the square patrol targets are sampled from.
    pub walk_point_range: f32,
    /// Idle pause bounds (seconds).
    pub min_idle_secs: f32,
    pub max_idle_secs: f32,
    /// Navigation speed (units/s).
    pub move_speed: f32,
    /// Length of the death animation; removal waits this plus a grace period.
    pub death_animation_secs: f32,
    /// Layer the player's collider lives on.
    pub player_layer: LayerMask,
    /// Layer counted as walkable ground for patrol targets.
    pub ground_layer: LayerMask,
    pub animations: AnimationSet,
}

impl Default for EnemyParams {
    fn default() -> Self {
        Self {
            health: ENEMY_DEFAULT_HEALTH,
            damage: ENEMY_DEFAULT_DAMAGE,
            attack_cooldown_secs: ENEMY_DEFAULT_ATTACK_COOLDOWN_SECS,
            sight_radius: ENEMY_DEFAULT_SIGHT_RADIUS,
            attack_radius: ENEMY_DEFAULT_ATTACK_RADIUS,
            walk_point_range: ENEMY_DEFAULT_WALK_POINT_RANGE,
            min_idle_secs: ENEMY_DEFAULT_MIN_IDLE_SECS,
            max_idle_secs: ENEMY_DEFAULT_MAX_IDLE_SECS,
            move_speed: ENEMY_DEFAULT_MOVE_SPEED,
            death_animation_secs: ENEMY_DEFAULT_DEATH_ANIMATION_SECS,
            player_layer: LayerMask::PLAYER,
            ground_layer: LayerMask::GROUND,
            animations: AnimationSet::default(),
        }
    }
}

/// Static weapon stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponData {
    pub name: String,
    pub kind: WeaponKind,
    /// Damage carried by each projectile.
    pub damage: f32,
    /// Minimum seconds between shots.
    pub fire_rate: f32,
    pub magazine_size: u32,
    pub reload_secs: f32,
    /// Automatic weapons keep firing while the trigger is held.
    pub automatic: bool,
    pub projectile_speed: f32,
    pub projectile_lifetime_secs: f32,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self {
            name: "Pistol".into(),
            kind: WeaponKind::Pistol,
            damage: 10.0,
            fire_rate: 0.5,
            magazine_size: 10,
            reload_secs: 1.5,
            automatic: false,
            projectile_speed: PROJECTILE_DEFAULT_SPEED,
            projectile_lifetime_secs: PROJECTILE_DEFAULT_LIFETIME_SECS,
        }
    }
}

impl WeaponData {
    /// Stock automatic rifle used by the default level.
    pub fn assault_rifle() -> Self {
        Self {
            name: "Assault Rifle".into(),
            kind: WeaponKind::AssaultRifle,
            damage: 12.0,
            fire_rate: 0.1,
            magazine_size: 30,
            reload_secs: 2.0,
            automatic: true,
            ..Self::default()
        }
    }
}

/// Player tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParams {
    pub health: f32,
    /// Health restored per heal item. `None` restores to max.
    pub heal_amount: Option<f32>,
    /// Heal items the player starts a run with.
    pub starting_heal_items: u32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            health: PLAYER_DEFAULT_HEALTH,
            heal_amount: None,
            starting_heal_items: 0,
        }
    }
}

/// One enemy placed in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub position: Vec3,
    #[serde(default)]
    pub archetype: EnemyArchetype,
    /// Replaces the archetype preset entirely when present.
    #[serde(default)]
    pub params: Option<EnemyParams>,
}

/// One weapon lying in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponPickupSpawn {
    pub position: Vec3,
    pub weapon: WeaponData,
}

/// Everything a scene load places in the world.
///
/// A level given in configuration lists its contents explicitly; omitted
/// lists are empty rather than taken from the built-in arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub player_spawn: Vec3,
    #[serde(default)]
    pub ground: Vec<GroundPatch>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub weapon_pickups: Vec<WeaponPickupSpawn>,
    #[serde(default)]
    pub heal_pickups: Vec<Vec3>,
    /// Reaching this zone ends the game.
    #[serde(default)]
    pub exit: Option<Vec3>,
}

impl Default for LevelLayout {
    /// A flat 60x60 arena with two grunts, a brute, a pistol, a rifle and two heals.
    fn default() -> Self {
        Self {
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            ground: vec![GroundPatch::new(
                Vec3::new(-30.0, 0.0, -30.0),
                Vec3::new(30.0, 0.0, 30.0),
                0.0,
            )],
            enemies: vec![
                EnemySpawn {
                    position: Vec3::new(15.0, 1.0, 15.0),
                    archetype: EnemyArchetype::Grunt,
                    params: None,
                },
                EnemySpawn {
                    position: Vec3::new(-15.0, 1.0, 15.0),
                    archetype: EnemyArchetype::Grunt,
                    params: None,
                },
                EnemySpawn {
                    position: Vec3::new(0.0, 1.0, 25.0),
                    archetype: EnemyArchetype::Brute,
                    params: None,
                },
            ],
            weapon_pickups: vec![
                WeaponPickupSpawn {
                    position: Vec3::new(0.0, 1.0, 3.0),
                    weapon: WeaponData::default(),
                },
                WeaponPickupSpawn {
                    position: Vec3::new(3.0, 1.0, 0.0),
                    weapon: WeaponData::assault_rifle(),
                },
            ],
            heal_pickups: vec![Vec3::new(-3.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -3.0)],
            exit: Some(Vec3::new(0.0, 1.0, -28.0)),
        }
    }
}
