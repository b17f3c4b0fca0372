//! ECS systems that operate on the game world each tick.
//!
//! Systems are plain functions over the scene. They do not own state; all
//! state lives in components, the deferred queue, or the singletons handed
//! to them through [`enemy_ai::ActionSink`].

pub mod deferred;
pub mod enemy_ai;
pub mod navigation;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;

use hecs::Entity;

/// Stable id of an entity as exposed to the UI and event stream.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
