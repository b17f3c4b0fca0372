//! Headless stand-in for the engine's object graph.
//!
//! `SceneWorld` wraps the hecs world with the services the core expects
//! from an engine: sphere overlap queries, ground ray casts, destroy hooks,
//! persistence across scene unloads, and component lookup for managed
//! singletons.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, warn};

use kuroneko_core::collab::{GroundProbe, SpatialQuery};
use kuroneko_core::types::{GroundPatch, LayerMask};
use kuroneko_registry::{DetachHook, ObjectGraph};

use crate::components::{Collider, Name, Persistent, Position, Shared};

#[derive(Default)]
pub struct SceneWorld {
    world: World,
    ground: Vec<GroundPatch>,
    detach_hooks: HashMap<Entity, Vec<DetachHook>>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn set_ground(&mut self, patches: Vec<GroundPatch>) {
        self.ground = patches;
    }

    pub fn ground(&self) -> &[GroundPatch] {
        &self.ground
    }

    /// Destroy an entity, running its detach hooks first.
    /// Returns `false` if it was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.world.contains(entity) {
            return false;
        }
        if let Some(hooks) = self.detach_hooks.remove(&entity) {
            for hook in hooks {
                hook();
            }
        }
        self.world.despawn(entity).is_ok()
    }

    /// Destroy every entity not marked [`Persistent`]. Returns how many went.
    pub fn unload_scene(&mut self) -> usize {
        let doomed: Vec<Entity> = self
            .world
            .query::<Option<&Persistent>>()
            .iter()
            .filter(|(_, persistent)| persistent.is_none())
            .map(|(entity, _)| entity)
            .collect();
        let count = doomed.len();
        for entity in doomed {
            self.despawn(entity);
        }
        self.ground.clear();
        debug!("scene unloaded, {count} entities destroyed");
        count
    }
}

impl ObjectGraph for SceneWorld {
    type Object = Entity;

    fn find_component<T: Send + Sync + 'static>(&self) -> Option<(Entity, Arc<T>)> {
        let mut query = self.world.query::<&Shared<T>>();
        let found = query
            .iter()
            .next()
            .map(|(entity, shared)| (entity, Arc::clone(&shared.0)));
        found
    }

    fn spawn_object<T: Send + Sync + 'static>(&mut self, name: &str, component: Arc<T>) -> Entity {
        self.world.spawn((Name(name.to_string()), Shared(component)))
    }

    fn destroy_object(&mut self, object: Entity) -> bool {
        self.despawn(object)
    }

    fn set_persistent(&mut self, object: Entity) {
        if self.world.insert_one(object, Persistent).is_err() {
            warn!("cannot mark {object:?} persistent, it is not in the scene");
        }
    }

    fn on_detach(&mut self, object: Entity, hook: DetachHook) {
        self.detach_hooks.entry(object).or_default().push(hook);
    }
}

impl SpatialQuery for SceneWorld {
    type Handle = Entity;

    /// Colliders whose sphere touches the query sphere, nearest first.
    fn query_overlap(&self, origin: Vec3, radius: f32, filter: LayerMask) -> Vec<Entity> {
        let mut hits: Vec<(Entity, f32)> = self
            .world
            .query::<(&Position, &Collider)>()
            .iter()
            .filter(|(_, (_, collider))| collider.layer.intersects(filter))
            .filter_map(|(entity, (pos, collider))| {
                let distance = pos.0.distance(origin);
                (distance <= radius + collider.radius).then_some((entity, distance))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(entity, _)| entity).collect()
    }
}

impl GroundProbe for SceneWorld {
    /// Intersects the ray with each horizontal ground patch; nearest hit wins.
    fn raycast_ground(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<Vec3> {
        if !filter.intersects(LayerMask::GROUND) {
            return None;
        }
        let dir = direction.try_normalize()?;
        if dir.y.abs() < f32::EPSILON {
            return None;
        }

        self.ground
            .iter()
            .filter_map(|patch| {
                let t = (patch.height - origin.y) / dir.y;
                if !(0.0..=max_distance).contains(&t) {
                    return None;
                }
                let hit = origin + dir * t;
                patch.contains_xz(hit).then_some((t, hit))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }
}
