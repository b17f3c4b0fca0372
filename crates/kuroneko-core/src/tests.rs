#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, GameConfig};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::params::{AnimationSet, EnemyParams, LevelLayout, WeaponData};
    use crate::state::GameStateSnapshot;
    use crate::types::{horizontal_direction, GroundPatch, LayerMask, SimTime};

    #[test]
    fn test_layer_mask_ops() {
        let mask = LayerMask::ENEMY | LayerMask::OBSTACLE;
        assert!(mask.intersects(LayerMask::ENEMY));
        assert!(mask.intersects(LayerMask::OBSTACLE));
        assert!(!mask.intersects(LayerMask::PLAYER));
        assert!(LayerMask::NONE.is_empty());
        assert!(LayerMask::ALL.intersects(LayerMask::TRIGGER));

        let mut grown = LayerMask::PICKUP;
        grown |= LayerMask::TRIGGER;
        assert_eq!(grown, LayerMask::PICKUP | LayerMask::TRIGGER);
    }

    #[test]
    fn test_ground_patch_footprint_ignores_height() {
        let patch = GroundPatch::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0), 0.0);
        assert!(patch.contains_xz(Vec3::new(0.5, 100.0, -0.5)));
        assert!(patch.contains_xz(Vec3::new(1.0, 0.0, 1.0)));
        assert!(!patch.contains_xz(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_horizontal_direction_flattens() {
        let dir = horizontal_direction(Vec3::ZERO, Vec3::new(3.0, 10.0, 4.0)).unwrap();
        assert!((dir - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-5);
        assert!(horizontal_direction(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).is_none());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..60 {
            t.advance();
        }
        assert_eq!(t.tick, 60);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_animation_set_maps_every_cue() {
        let set = AnimationSet::default();
        assert_eq!(set.clip(AnimationCue::Idle), "Idle");
        assert_eq!(set.clip(AnimationCue::Patrol), "Walk");
        assert_eq!(set.clip(AnimationCue::Chase), "Run");
        assert_eq!(set.clip(AnimationCue::Attack), "Attack");
        assert_eq!(set.clip(AnimationCue::Die), "Die");
    }

    #[test]
    fn test_command_serde_tagged() {
        let cmd = PlayerCommand::Shoot { held: true };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"Shoot\""));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);

        let pose = PlayerCommand::SetPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            forward: Vec3::Z,
        };
        let back: PlayerCommand =
            serde_json::from_str(&serde_json::to_string(&pose).unwrap()).unwrap();
        assert_eq!(back, pose);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut snap = GameStateSnapshot::default();
        snap.events.push(GameEvent::EnemyStateChanged {
            enemy: 7,
            from: EnemyState::Idle,
            to: EnemyState::Chasing,
        });
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_default_config_is_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.level, LevelLayout::default());
        assert!(!cfg.level.enemies.is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let text = r#"
            seed = 7
            log_level = "debug"

            [player]
            health = 150.0
            heal_amount = 40.0

            [[archetype_overrides]]
            archetype = "Brute"
            [archetype_overrides.params]
            health = 500.0
            damage = 40.0

            [level]
            player_spawn = [0.0, 1.0, 0.0]
            heal_pickups = [[2.0, 1.0, 2.0]]

            [[level.ground]]
            min = [-10.0, 0.0, -10.0]
            max = [10.0, 0.0, 10.0]
            height = 0.0

            [[level.enemies]]
            position = [5.0, 1.0, 5.0]
            archetype = "Stalker"
        "#;
        let cfg = GameConfig::from_toml_str(text).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.player.health, 150.0);
        assert_eq!(cfg.player.heal_amount, Some(40.0));
        assert_eq!(cfg.level.enemies.len(), 1);
        assert_eq!(cfg.level.enemies[0].archetype, EnemyArchetype::Stalker);
        assert!(cfg.level.weapon_pickups.is_empty());
        assert_eq!(cfg.level.heal_pickups, vec![Vec3::new(2.0, 1.0, 2.0)]);

        let brute = cfg.archetype_override(EnemyArchetype::Brute).unwrap();
        assert_eq!(brute.health, 500.0);
        // Unspecified fields fall back to defaults
        assert_eq!(brute.attack_cooldown_secs, EnemyParams::default().attack_cooldown_secs);
        assert!(cfg.archetype_override(EnemyArchetype::Grunt).is_none());
    }

    #[test]
    fn test_config_rejects_inverted_idle_range() {
        let mut cfg = GameConfig::default();
        cfg.level.enemies[0].params = Some(EnemyParams {
            min_idle_secs: 5.0,
            max_idle_secs: 1.0,
            ..EnemyParams::default()
        });
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_rejects_empty_magazine() {
        let mut cfg = GameConfig::default();
        cfg.level.weapon_pickups[0].weapon = WeaponData {
            magazine_size: 0,
            ..WeaponData::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_shipped_config_parses() {
        let text = include_str!("../../../data/config/kuroneko.toml");
        let cfg = GameConfig::from_toml_str(text).unwrap();
        assert_eq!(cfg.level.enemies.len(), 3);
        assert_eq!(cfg.level.weapon_pickups.len(), 2);
        assert_eq!(cfg.level.weapon_pickups[1].weapon.kind, WeaponKind::AssaultRifle);
        // Projectile stats omitted in the file fall back to defaults
        assert_eq!(
            cfg.level.weapon_pickups[1].weapon.projectile_speed,
            WeaponData::default().projectile_speed
        );
        assert!(cfg.archetype_override(EnemyArchetype::Brute).is_some());
        assert!(cfg.level.exit.is_some());
    }

    #[test]
    fn test_level_without_exit_has_none() {
        let text = r#"
            [level]
            player_spawn = [0.0, 1.0, 0.0]
        "#;
        let cfg = GameConfig::from_toml_str(text).unwrap();
        assert!(cfg.level.exit.is_none());
        assert!(cfg.level.enemies.is_empty());
        assert!(cfg.level.ground.is_empty());
    }

    #[test]
    fn test_config_parse_error_reported() {
        let err = GameConfig::from_toml_str("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
