//! Entity spawn factories for setting up the game world.
//!
//! Creates the persistent player, the level's enemies, pickups and exit
//! zone, and transient entities (held weapons, projectiles) with the
//! appropriate component bundles.

use glam::Vec3;
use hecs::Entity;
use log::info;
use rand::Rng;

use kuroneko_core::config::GameConfig;
use kuroneko_core::constants::*;
use kuroneko_core::params::{EnemyParams, PlayerParams, WeaponData};
use kuroneko_core::types::LayerMask;
use kuroneko_enemy_ai::fsm::EnemyBrain;
use kuroneko_enemy_ai::profiles::resolve_params;

use crate::components::*;
use crate::loadout::{self, WeaponLoadout};
use crate::player::PlayerCombatState;
use crate::scene::SceneWorld;
use crate::weapon::WeaponState;

/// Populate the scene from the configured level layout.
pub fn load_level<R: Rng + ?Sized>(scene: &mut SceneWorld, config: &GameConfig, rng: &mut R) {
    let level = &config.level;
    scene.set_ground(level.ground.clone());

    for spawn in &level.enemies {
        let params = resolve_params(
            spawn.archetype,
            spawn.params.as_ref(),
            config.archetype_override(spawn.archetype),
        );
        spawn_enemy(scene, spawn.position, params, rng);
    }
    for pickup in &level.weapon_pickups {
        spawn_weapon_pickup(scene, pickup.position, pickup.weapon.clone());
    }
    for &position in &level.heal_pickups {
        spawn_heal_pickup(scene, position);
    }
    if let Some(exit) = level.exit {
        spawn_exit_zone(scene, exit);
    }

    info!(
        "level loaded: {} enemies, {} weapons, {} heal items",
        level.enemies.len(),
        level.weapon_pickups.len(),
        level.heal_pickups.len()
    );
}

/// Spawn the player body. Persistent: survives scene unloads.
pub fn spawn_player(scene: &mut SceneWorld, params: &PlayerParams, position: Vec3) -> Entity {
    scene.world_mut().spawn((
        Player,
        Name("Player".into()),
        Position(position),
        Facing(Vec3::Z),
        Collider {
            radius: PLAYER_COLLIDER_RADIUS,
            layer: LayerMask::PLAYER,
        },
        PlayerCombatState::new(params),
        WeaponLoadout::default(),
        Persistent,
    ))
}

/// Put the player back at the spawn point with full health, no weapon and
/// the starting heal items.
pub fn reset_player(scene: &mut SceneWorld, player: Entity, spawn: Vec3) {
    loadout::clear(scene, player);
    let world = scene.world();
    if let Ok(mut combat) = world.get::<&mut PlayerCombatState>(player) {
        combat.reset();
    }
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.0 = spawn;
    }
    if let Ok(mut facing) = world.get::<&mut Facing>(player) {
        facing.0 = Vec3::Z;
    }
}

pub fn spawn_enemy<R: Rng + ?Sized>(
    scene: &mut SceneWorld,
    position: Vec3,
    params: EnemyParams,
    rng: &mut R,
) -> Entity {
    let nav = NavAgent {
        destination: None,
        speed: params.move_speed,
    };
    let animator = Animator::new(params.animations.clone());
    let brain = EnemyBrain::new(params, rng);
    scene.world_mut().spawn((
        Name("Enemy".into()),
        Position(position),
        Facing(Vec3::Z),
        Collider {
            radius: ENEMY_COLLIDER_RADIUS,
            layer: LayerMask::ENEMY,
        },
        nav,
        animator,
        brain,
    ))
}

pub fn spawn_weapon_pickup(scene: &mut SceneWorld, position: Vec3, data: WeaponData) -> Entity {
    let name = Name(format!("{} Pickup", data.name));
    scene.world_mut().spawn((
        name,
        Position(position),
        Collider {
            radius: PICKUP_COLLIDER_RADIUS,
            layer: LayerMask::PICKUP,
        },
        WeaponPickup { data },
    ))
}

pub fn spawn_heal_pickup(scene: &mut SceneWorld, position: Vec3) -> Entity {
    scene.world_mut().spawn((
        Name("Heal".into()),
        Position(position),
        Collider {
            radius: PICKUP_COLLIDER_RADIUS,
            layer: LayerMask::PICKUP,
        },
        HealPickup,
    ))
}

pub fn spawn_exit_zone(scene: &mut SceneWorld, position: Vec3) -> Entity {
    scene.world_mut().spawn((
        Name("Exit".into()),
        Position(position),
        Collider {
            radius: PICKUP_COLLIDER_RADIUS,
            layer: LayerMask::TRIGGER,
        },
        ExitZone,
    ))
}

/// A weapon in the player's hands. Persistent like its holder.
pub fn spawn_held_weapon(scene: &mut SceneWorld, data: WeaponData) -> Entity {
    scene.world_mut().spawn((
        Name(data.name.clone()),
        WeaponState::new(data),
        Persistent,
    ))
}

/// A projectile flying along `direction` at the weapon's projectile speed.
pub fn spawn_projectile(
    scene: &mut SceneWorld,
    origin: Vec3,
    direction: Vec3,
    data: &WeaponData,
    damage: f32,
) -> Entity {
    let direction = direction.try_normalize().unwrap_or(Vec3::Z);
    scene.world_mut().spawn((
        Name("Projectile".into()),
        Position(origin),
        Velocity(direction * data.projectile_speed),
        Projectile {
            damage,
            remaining_secs: data.projectile_lifetime_secs,
        },
    ))
}
