//! Per-tick perception signals feeding the FSM.

use glam::Vec3;

use kuroneko_core::collab::SpatialQuery;
use kuroneko_core::params::EnemyParams;

/// The two boolean signals the FSM reacts to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Perception {
    pub player_in_sight: bool,
    pub player_in_attack_range: bool,
}

/// Sphere checks at sight and attack radius against the player layer,
/// recomputed from the enemy's current position.
pub fn perceive<S: SpatialQuery + ?Sized>(world: &S, position: Vec3, params: &EnemyParams) -> Perception {
    Perception {
        player_in_sight: world.check_sphere(position, params.sight_radius, params.player_layer),
        player_in_attack_range: world.check_sphere(position, params.attack_radius, params.player_layer),
    }
}
