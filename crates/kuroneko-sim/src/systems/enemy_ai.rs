//! Enemy AI system: perception, FSM tick and action application.
//!
//! Calls the enemy FSM from kuroneko-enemy-ai for every living enemy, then
//! turns the returned actions into component updates, player damage and
//! deferred tasks.

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use kuroneko_core::collab::Damageable;
use kuroneko_core::enums::DamageOutcome;
use kuroneko_core::events::GameEvent;
use kuroneko_core::types::horizontal_direction;
use kuroneko_enemy_ai::fsm::{EnemyAction, EnemyBrain, EnemyContext};
use kuroneko_enemy_ai::perception::{perceive, Perception};

use crate::components::{Animator, Facing, NavAgent, Position};
use crate::game_manager::{GameManager, SessionStats};
use crate::player::PlayerCombatState;
use crate::scene::SceneWorld;
use crate::scheduler::{DeferredQueue, DeferredTask};
use crate::systems::entity_id;

/// Everything an action may touch outside the acting entity.
pub struct ActionSink<'a> {
    /// Session time at the start of this tick (seconds).
    pub now: f64,
    pub player: Entity,
    pub scheduler: &'a mut DeferredQueue<DeferredTask>,
    pub events: &'a mut Vec<GameEvent>,
    pub game: &'a GameManager,
    pub stats: &'a SessionStats,
}

/// Run the enemy AI: perceive, tick the FSM, apply actions.
pub fn run<R: Rng + ?Sized>(scene: &SceneWorld, dt: f32, rng: &mut R, sink: &mut ActionSink<'_>) {
    let Some(player_position) = scene.world().get::<&Position>(sink.player).ok().map(|p| p.0) else {
        return;
    };

    // Perception first, against positions at the start of the tick
    let inputs: Vec<(Entity, Vec3, Perception)> = {
        let mut query = scene.world().query::<(&Position, &EnemyBrain)>();
        query
            .iter()
            .filter(|(_, (_, brain))| brain.is_alive())
            .map(|(entity, (pos, brain))| (entity, pos.0, perceive(scene, pos.0, brain.params())))
            .collect()
    };

    for (entity, position, perception) in inputs {
        if sink.game.is_finished() {
            break;
        }
        let update = {
            let Ok(mut brain) = scene.world().get::<&mut EnemyBrain>(entity) else {
                continue;
            };
            let ctx = EnemyContext {
                position,
                player_position,
                player_in_sight: perception.player_in_sight,
                player_in_attack_range: perception.player_in_attack_range,
                dt,
                ground: scene,
            };
            brain.tick(&ctx, rng)
        };

        if update.state_changed {
            debug!("enemy {entity:?}: {:?} -> {:?}", update.previous, update.state);
            sink.events.push(GameEvent::EnemyStateChanged {
                enemy: entity_id(entity),
                from: update.previous,
                to: update.state,
            });
        }
        apply_actions(scene.world(), entity, update.actions, sink);
    }
}

/// Carry out FSM actions for `entity`.
pub fn apply_actions(world: &World, entity: Entity, actions: Vec<EnemyAction>, sink: &mut ActionSink<'_>) {
    for action in actions {
        match action {
            EnemyAction::NavigateTo(target) => {
                if let Ok(mut nav) = world.get::<&mut NavAgent>(entity) {
                    nav.destination = Some(target);
                }
            }
            EnemyAction::HaltNavigation => {
                if let Ok(mut nav) = world.get::<&mut NavAgent>(entity) {
                    nav.destination = None;
                }
            }
            EnemyAction::FaceTowards(target) => {
                let Ok(position) = world.get::<&Position>(entity).map(|p| p.0) else {
                    continue;
                };
                if let (Some(dir), Ok(mut facing)) = (
                    horizontal_direction(position, target),
                    world.get::<&mut Facing>(entity),
                ) {
                    facing.0 = dir;
                }
            }
            EnemyAction::PlayAnimation(cue) => {
                if let Ok(mut animator) = world.get::<&mut Animator>(entity) {
                    if let Some(clip) = animator.play(cue) {
                        sink.events.push(GameEvent::AnimationStarted {
                            entity: entity_id(entity),
                            clip: clip.to_string(),
                        });
                    }
                }
            }
            EnemyAction::DamagePlayer(amount) => {
                sink.events.push(GameEvent::EnemyAttacked {
                    enemy: entity_id(entity),
                    damage: amount,
                });
                damage_player(world, amount, sink);
            }
            EnemyAction::ScheduleAttackReset { after_secs } => {
                sink.scheduler
                    .schedule_after(sink.now, after_secs, DeferredTask::ResetAttack(entity));
            }
            EnemyAction::ScheduleRemoval { after_secs } => {
                sink.scheduler
                    .schedule_after(sink.now, after_secs, DeferredTask::RemoveEnemy(entity));
            }
        }
    }
}

/// Deliver damage to the player. The killing blow ends the game.
pub fn damage_player(world: &World, amount: f32, sink: &mut ActionSink<'_>) {
    let Ok(mut combat) = world.get::<&mut PlayerCombatState>(sink.player) else {
        return;
    };
    let outcome = combat.take_damage(amount);
    if outcome == DamageOutcome::Ignored {
        return;
    }
    sink.stats.record_damage_taken(amount);
    sink.events.push(GameEvent::PlayerDamaged {
        amount,
        health: combat.health(),
    });
    if outcome == DamageOutcome::Killed {
        sink.events.push(GameEvent::PlayerDied);
        sink.game.set_game_over();
    }
}
