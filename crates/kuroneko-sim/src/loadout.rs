//! The player's weapon slot: pickup, drop, and drop placement.

use glam::Vec3;
use hecs::Entity;
use log::{debug, warn};

use kuroneko_core::collab::GroundProbe;
use kuroneko_core::constants::*;
use kuroneko_core::events::GameEvent;
use kuroneko_core::types::LayerMask;

use crate::components::{Collider, Facing, Name, Persistent, Position, WeaponPickup};
use crate::scene::SceneWorld;
use crate::weapon::WeaponState;
use crate::world_setup;

/// Which weapon entity, if any, the player is holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponLoadout {
    held: Option<Entity>,
}

impl WeaponLoadout {
    pub fn held(&self) -> Option<Entity> {
        self.held
    }
}

pub fn held_weapon(scene: &SceneWorld, player: Entity) -> Option<Entity> {
    scene
        .world()
        .get::<&WeaponLoadout>(player)
        .ok()
        .and_then(|loadout| loadout.held)
}

/// Equip the weapon lying at `pickup`, dropping whatever was held.
///
/// The picked-up weapon starts with a full magazine. A pickup that is
/// already gone (claimed earlier this tick) is a no-op, as is a pickup
/// while the held weapon cannot be dropped.
pub fn pick_up(
    scene: &mut SceneWorld,
    player: Entity,
    pickup: Entity,
    events: &mut Vec<GameEvent>,
) -> bool {
    let data = match scene.world().get::<&WeaponPickup>(pickup) {
        Ok(lying) => lying.data.clone(),
        Err(_) => {
            debug!("pickup {pickup:?} already claimed");
            return false;
        }
    };

    if held_weapon(scene, player).is_some() && drop_weapon(scene, player, events).is_none() {
        warn!("could not drop the held weapon, leaving {pickup:?} where it is");
        return false;
    }
    scene.despawn(pickup);

    let name = data.name.clone();
    let weapon = world_setup::spawn_held_weapon(scene, data);
    if let Ok(mut loadout) = scene.world().get::<&mut WeaponLoadout>(player) {
        loadout.held = Some(weapon);
    }
    debug!("picked up {name}");
    events.push(GameEvent::WeaponPickedUp { name });
    true
}

/// Turn the held weapon back into a world pickup in front of the player.
/// Returns the pickup entity; `None` when nothing was held.
pub fn drop_weapon(
    scene: &mut SceneWorld,
    player: Entity,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    // The slot is only cleared once the weapon is a pickup again
    let held = held_weapon(scene, player)?;
    let (origin, forward) = {
        let world = scene.world();
        let origin = world.get::<&Position>(player).ok()?.0;
        let forward = world.get::<&Facing>(player).map(|f| f.0).unwrap_or(Vec3::Z);
        (origin, forward)
    };
    let position = drop_position(scene, origin, forward);

    let world = scene.world_mut();
    let data = match world.remove_one::<WeaponState>(held) {
        Ok(state) => state.into_data(),
        Err(_) => {
            warn!("held weapon {held:?} has no weapon state, keeping it equipped");
            return None;
        }
    };
    let _ = world.remove_one::<Persistent>(held);
    let name = data.name.clone();
    world
        .insert(
            held,
            (
                Name(format!("{name} Pickup")),
                Position(position),
                Collider {
                    radius: PICKUP_COLLIDER_RADIUS,
                    layer: LayerMask::PICKUP,
                },
                WeaponPickup { data },
            ),
        )
        .ok()?;
    if let Ok(mut loadout) = world.get::<&mut WeaponLoadout>(player) {
        loadout.held = None;
    }

    debug!("dropped {name} at {position}");
    events.push(GameEvent::WeaponDropped { name });
    Some(held)
}

/// Where a dropped weapon lands: just above the ground hit along the
/// player's forward ray if it is close, otherwise straight ahead.
pub fn drop_position<G: GroundProbe + ?Sized>(ground: &G, origin: Vec3, forward: Vec3) -> Vec3 {
    match ground.raycast_ground(origin, forward, WEAPON_DROP_DISTANCE, LayerMask::GROUND) {
        Some(hit) => hit + Vec3::Y * WEAPON_DROP_LIFT,
        None => origin + forward.normalize_or_zero() * WEAPON_DROP_DISTANCE,
    }
}

/// Destroy the held weapon outright (restart).
pub fn clear(scene: &mut SceneWorld, player: Entity) {
    let held = scene
        .world()
        .get::<&mut WeaponLoadout>(player)
        .ok()
        .and_then(|mut loadout| loadout.held.take());
    if let Some(weapon) = held {
        scene.despawn(weapon);
    }
}
