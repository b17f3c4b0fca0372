//! Runs deferred tasks that have come due.

use log::debug;

use kuroneko_core::events::GameEvent;
use kuroneko_enemy_ai::fsm::EnemyBrain;

use crate::scene::SceneWorld;
use crate::scheduler::DeferredTask;
use crate::systems::enemy_ai::{apply_actions, ActionSink};
use crate::systems::entity_id;
use crate::weapon::WeaponState;

/// Drain and execute everything due at `sink.now`. Targets that no longer
/// exist are skipped.
pub fn run(scene: &mut SceneWorld, sink: &mut ActionSink<'_>) {
    for task in sink.scheduler.drain_due(sink.now) {
        match task {
            DeferredTask::ResetAttack(enemy) => {
                let action = match scene.world().get::<&mut EnemyBrain>(enemy) {
                    Ok(mut brain) => brain.reset_attack(),
                    Err(_) => {
                        debug!("attack reset for missing enemy {enemy:?}");
                        continue;
                    }
                };
                if let Some(action) = action {
                    apply_actions(scene.world(), enemy, vec![action], sink);
                }
            }
            DeferredTask::RemoveEnemy(enemy) => {
                if scene.despawn(enemy) {
                    sink.events.push(GameEvent::EnemyRemoved {
                        enemy: entity_id(enemy),
                    });
                } else {
                    debug!("removal of missing enemy {enemy:?}");
                }
            }
            DeferredTask::FinishReload(weapon) => {
                let ammo = scene
                    .world()
                    .get::<&mut WeaponState>(weapon)
                    .ok()
                    .and_then(|mut state| state.finish_reload());
                match ammo {
                    Some(ammo) => sink.events.push(GameEvent::ReloadFinished { ammo }),
                    None => debug!("reload finish for missing weapon {weapon:?}"),
                }
            }
        }
    }
}
