//! Navigation system: straight-line steering on the ground plane.

use hecs::World;

use crate::components::{Facing, NavAgent, Position};

/// Within this horizontal distance the agent snaps onto its destination.
const ARRIVAL_EPSILON: f32 = 0.05;

/// Move every agent with a destination toward it at its speed.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, facing, nav)) in world.query_mut::<(&mut Position, &mut Facing, &mut NavAgent)>() {
        let Some(destination) = nav.destination else {
            continue;
        };
        let mut offset = destination - pos.0;
        offset.y = 0.0;
        let distance = offset.length();
        if distance <= ARRIVAL_EPSILON {
            pos.0.x = destination.x;
            pos.0.z = destination.z;
            nav.destination = None;
            continue;
        }

        let dir = offset / distance;
        facing.0 = dir;
        let step = nav.speed * dt;
        if step >= distance {
            pos.0.x = destination.x;
            pos.0.z = destination.z;
            nav.destination = None;
        } else {
            pos.0 += dir * step;
        }
    }
}
