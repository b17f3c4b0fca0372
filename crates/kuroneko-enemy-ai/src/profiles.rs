//! Archetype-specific parameter presets.

use log::debug;

use kuroneko_core::enums::EnemyArchetype;
use kuroneko_core::params::EnemyParams;

/// Get the parameter preset for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyParams {
    match archetype {
        EnemyArchetype::Grunt => EnemyParams::default(),
        EnemyArchetype::Brute => EnemyParams {
            health: 250.0,
            damage: 30.0,
            attack_cooldown_secs: 2.5,
            sight_radius: 10.0,
            attack_radius: 2.5,
            walk_point_range: 6.0,
            min_idle_secs: 4.0,
            max_idle_secs: 12.0,
            move_speed: 2.2,
            death_animation_secs: 1.8,
            ..EnemyParams::default()
        },
        EnemyArchetype::Stalker => EnemyParams {
            health: 60.0,
            damage: 10.0,
            attack_cooldown_secs: 1.0,
            sight_radius: 20.0,
            attack_radius: 1.8,
            walk_point_range: 12.0,
            min_idle_secs: 1.0,
            max_idle_secs: 4.0,
            move_speed: 5.5,
            death_animation_secs: 1.0,
            ..EnemyParams::default()
        },
    }
}

/// Parameters for a spawn: explicit per-spawn params win, then a configured
/// archetype override, then the built-in preset.
pub fn resolve_params(
    archetype: EnemyArchetype,
    spawn_params: Option<&EnemyParams>,
    archetype_override: Option<&EnemyParams>,
) -> EnemyParams {
    match (spawn_params, archetype_override) {
        (Some(params), _) => {
            debug!("{archetype:?} spawn carries its own parameters");
            params.clone()
        }
        (None, Some(params)) => {
            debug!("{archetype:?} preset replaced by configured override");
            params.clone()
        }
        (None, None) => get_profile(archetype),
    }
}
