//! Snapshot system: builds a serializable GameStateSnapshot from the world.

use hecs::Entity;

use kuroneko_core::collab::Damageable;
use kuroneko_core::events::GameEvent;
use kuroneko_core::state::*;
use kuroneko_core::types::SimTime;
use kuroneko_enemy_ai::fsm::EnemyBrain;

use crate::components::{Facing, HealPickup, Position, WeaponPickup};
use crate::game_manager::GameManager;
use crate::loadout;
use crate::player::PlayerCombatState;
use crate::scene::SceneWorld;
use crate::systems::entity_id;
use crate::weapon::WeaponState;

/// Build a complete snapshot of the current game state.
pub fn build_snapshot(
    scene: &SceneWorld,
    time: &SimTime,
    player: Entity,
    game: &GameManager,
    stats: StatsView,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let world = scene.world();

    let player_view = {
        let position = world.get::<&Position>(player).map(|p| p.0).unwrap_or_default();
        let forward = world.get::<&Facing>(player).map(|f| f.0).unwrap_or(glam::Vec3::Z);
        match world.get::<&PlayerCombatState>(player) {
            Ok(combat) => PlayerView {
                position,
                forward,
                health: combat.health(),
                max_health: combat.max_health(),
                heal_items: combat.heal_items(),
                alive: combat.is_alive(),
            },
            Err(_) => PlayerView {
                position,
                forward,
                health: 0.0,
                max_health: 0.0,
                heal_items: 0,
                alive: false,
            },
        }
    };

    let weapon = loadout::held_weapon(scene, player)
        .and_then(|held| world.get::<&WeaponState>(held).ok().map(|state| state.view()));

    let mut enemies: Vec<EnemyView> = world
        .query::<(&Position, &EnemyBrain)>()
        .iter()
        .map(|(entity, (pos, brain))| EnemyView {
            id: entity_id(entity),
            position: pos.0,
            state: brain.state(),
            health: brain.health(),
            alive: brain.is_alive(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);

    let mut pickups: Vec<PickupView> = world
        .query::<(&Position, &WeaponPickup)>()
        .iter()
        .map(|(entity, (pos, pickup))| PickupView {
            id: entity_id(entity),
            position: pos.0,
            kind: PickupKind::Weapon {
                name: pickup.data.name.clone(),
            },
        })
        .collect();
    pickups.extend(
        world
            .query::<(&Position, &HealPickup)>()
            .iter()
            .map(|(entity, (pos, _))| PickupView {
                id: entity_id(entity),
                position: pos.0,
                kind: PickupKind::Heal,
            }),
    );
    pickups.sort_by_key(|p| p.id);

    GameStateSnapshot {
        time: *time,
        game_over: game.is_game_over(),
        game_end: game.is_game_end(),
        player: player_view,
        weapon,
        enemies,
        pickups,
        stats,
        events,
    }
}
