//! Projectile flight, hit detection and damage delivery.

use hecs::Entity;
use log::debug;

use kuroneko_core::collab::{Damageable, SpatialQuery};
use kuroneko_core::constants::PROJECTILE_RADIUS;
use kuroneko_core::enums::{DamageOutcome, EnemyState};
use kuroneko_core::events::GameEvent;
use kuroneko_core::types::LayerMask;
use kuroneko_enemy_ai::fsm::EnemyBrain;

use crate::components::{Position, Projectile, Velocity};
use crate::scene::SceneWorld;
use crate::systems::enemy_ai::{apply_actions, ActionSink};
use crate::systems::entity_id;

/// Advance projectiles, apply hits, despawn spent ones.
///
/// A projectile stops at the first collider it touches on the enemy or
/// obstacle layers. Enemies already dead absorb the hit without effect.
pub fn run(scene: &mut SceneWorld, dt: f32, sink: &mut ActionSink<'_>) {
    let mut spent: Vec<Entity> = Vec::new();
    let mut flying: Vec<(Entity, glam::Vec3, f32)> = Vec::new();

    for (entity, (pos, vel, projectile)) in scene
        .world_mut()
        .query_mut::<(&mut Position, &Velocity, &mut Projectile)>()
    {
        pos.0 += vel.0 * dt;
        projectile.remaining_secs -= dt;
        if projectile.remaining_secs <= 0.0 {
            spent.push(entity);
        } else {
            flying.push((entity, pos.0, projectile.damage));
        }
    }

    for (projectile, position, damage) in flying {
        let hits = scene.query_overlap(position, PROJECTILE_RADIUS, LayerMask::ENEMY | LayerMask::OBSTACLE);
        let Some(&target) = hits.first() else {
            continue;
        };
        spent.push(projectile);
        hit_enemy(scene, target, damage, sink);
    }

    for entity in spent {
        scene.despawn(entity);
    }
}

fn hit_enemy(scene: &SceneWorld, target: Entity, damage: f32, sink: &mut ActionSink<'_>) {
    let world = scene.world();
    let (outcome, before, death_actions) = {
        let Ok(mut brain) = world.get::<&mut EnemyBrain>(target) else {
            // Obstacle
            return;
        };
        let before = brain.state();
        let outcome = brain.take_damage(damage);
        let death_actions = (outcome == DamageOutcome::Killed).then(|| brain.death_actions());
        (outcome, before, death_actions)
    };

    if outcome == DamageOutcome::Ignored {
        return;
    }
    sink.events.push(GameEvent::ProjectileHit {
        target: entity_id(target),
        damage,
    });

    if let Some(actions) = death_actions {
        debug!("enemy {target:?} killed");
        sink.events.push(GameEvent::EnemyStateChanged {
            enemy: entity_id(target),
            from: before,
            to: EnemyState::Dead,
        });
        sink.events.push(GameEvent::EnemyKilled {
            enemy: entity_id(target),
        });
        sink.stats.record_kill();
        apply_actions(world, target, actions, sink);
    }
}
