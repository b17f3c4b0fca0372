//! Player trigger volume: weapon pickups, heal items, the level exit.

use hecs::Entity;
use log::debug;

use kuroneko_core::events::GameEvent;

use crate::components::{ExitZone, HealPickup, Position, WeaponPickup};
use crate::loadout;
use crate::player::PlayerCombatState;
use crate::proximity::{ProximityEvent, ProximityWatcher};
use crate::scene::SceneWorld;
use crate::systems::enemy_ai::ActionSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerKind {
    Weapon,
    Heal,
    Exit,
}

fn classify(scene: &SceneWorld, entity: Entity) -> Option<TriggerKind> {
    let world = scene.world();
    if world.get::<&WeaponPickup>(entity).is_ok() {
        Some(TriggerKind::Weapon)
    } else if world.get::<&HealPickup>(entity).is_ok() {
        Some(TriggerKind::Heal)
    } else if world.get::<&ExitZone>(entity).is_ok() {
        Some(TriggerKind::Exit)
    } else {
        None
    }
}

/// Poll the watcher around the player and react to everything entering it.
pub fn run(
    scene: &mut SceneWorld,
    watcher: &mut ProximityWatcher<Entity>,
    player: Entity,
    sink: &mut ActionSink<'_>,
) {
    let Some(origin) = scene.world().get::<&Position>(player).ok().map(|p| p.0) else {
        return;
    };

    let events = watcher.detect(&*scene, origin);
    let entered: Vec<(Entity, TriggerKind)> = events
        .iter()
        .filter_map(|event| match event {
            ProximityEvent::Enter(entity) => classify(scene, *entity).map(|kind| (*entity, kind)),
            ProximityEvent::Exit(entity) => {
                debug!("left trigger {entity:?}");
                None
            }
            ProximityEvent::Stay(_) => None,
        })
        .collect();

    for (entity, kind) in entered {
        match kind {
            TriggerKind::Weapon => {
                loadout::pick_up(scene, player, entity, sink.events);
            }
            TriggerKind::Heal => {
                let items = scene
                    .world()
                    .get::<&mut PlayerCombatState>(player)
                    .ok()
                    .map(|mut combat| combat.add_heal_item());
                if let Some(items) = items {
                    scene.despawn(entity);
                    sink.events.push(GameEvent::HealItemCollected { items });
                }
            }
            TriggerKind::Exit => {
                sink.game.set_game_end();
                sink.events.push(GameEvent::ExitReached);
            }
        }
    }
}
