#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use kuroneko_core::collab::{Damageable, GroundProbe, SpatialQuery};
    use kuroneko_core::constants::*;
    use kuroneko_core::enums::{AnimationCue, DamageOutcome, EnemyArchetype, EnemyState};
    use kuroneko_core::params::EnemyParams;
    use kuroneko_core::types::LayerMask;

    use crate::fsm::{EnemyAction, EnemyBrain, EnemyContext};
    use crate::perception::perceive;
    use crate::profiles::{get_profile, resolve_params};

    /// Ground probe with a fixed answer that counts calls. A non-zero
    /// `hole_radius` leaves a pit around the origin.
    struct ScriptedGround {
        hits: bool,
        hole_radius: f32,
        calls: Cell<u32>,
    }

    impl ScriptedGround {
        fn new(hits: bool) -> Self {
            Self {
                hits,
                hole_radius: 0.0,
                calls: Cell::new(0),
            }
        }

        fn with_pit(radius: f32) -> Self {
            Self {
                hole_radius: radius,
                ..Self::new(true)
            }
        }
    }

    impl GroundProbe for ScriptedGround {
        fn raycast_ground(&self, origin: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<Vec3> {
            self.calls.set(self.calls.get() + 1);
            let outside_pit = Vec3::new(origin.x, 0.0, origin.z).length() >= self.hole_radius;
            (self.hits && outside_pit).then_some(Vec3::new(origin.x, 0.0, origin.z))
        }
    }

    /// A single point-sized player on the player layer.
    struct LonePlayer(Vec3);

    impl SpatialQuery for LonePlayer {
        type Handle = u8;

        fn query_overlap(&self, origin: Vec3, radius: f32, filter: LayerMask) -> Vec<u8> {
            if filter.intersects(LayerMask::PLAYER) && origin.distance(self.0) <= radius {
                vec![1]
            } else {
                Vec::new()
            }
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn ctx<'a>(ground: &'a dyn GroundProbe, sight: bool, reach: bool) -> EnemyContext<'a> {
        EnemyContext {
            position: Vec3::ZERO,
            player_position: Vec3::new(0.0, 0.0, 5.0),
            player_in_sight: sight,
            player_in_attack_range: reach,
            dt: DT as f32,
            ground,
        }
    }

    /// Brain with its movement gate already open.
    fn walking_brain(params: EnemyParams, rng: &mut ChaCha8Rng) -> EnemyBrain {
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(params, rng);
        // Player in sight ends the initial idle pause immediately
        brain.tick(&ctx(&ground, true, false), rng);
        assert!(brain.can_walk());
        brain
    }

    /// Patrol from the origin until a target is accepted. The pit keeps the
    /// target at least 2 units away so the walk does not end on arrival.
    fn patrol_until_target(
        brain: &mut EnemyBrain,
        ground: &ScriptedGround,
        rng: &mut ChaCha8Rng,
    ) -> (Vec3, Vec<EnemyAction>) {
        for _ in 0..100 {
            let update = brain.tick(&ctx(ground, false, false), rng);
            if let Some(target) = brain.walk_target() {
                return (target, update.actions);
            }
        }
        panic!("no patrol target accepted in 100 samples");
    }

    fn damage_dealt(actions: &[EnemyAction]) -> f32 {
        actions
            .iter()
            .filter_map(|a| match a {
                EnemyAction::DamagePlayer(d) => Some(*d),
                _ => None,
            })
            .sum()
    }

    // ---- Damage and death ----

    #[test]
    fn test_seventh_hit_kills_exactly_once() {
        let mut rng = rng();
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);

        for i in 1..=6 {
            assert_eq!(brain.take_damage(15.0), DamageOutcome::Wounded);
            assert!(brain.is_alive());
            assert_eq!(brain.health(), 100.0 - 15.0 * i as f32);
        }
        assert_eq!(brain.health(), 10.0);

        assert_eq!(brain.take_damage(15.0), DamageOutcome::Killed);
        assert!(!brain.is_alive());
        assert_eq!(brain.state(), EnemyState::Dead);

        for _ in 0..5 {
            assert_eq!(brain.take_damage(15.0), DamageOutcome::Ignored);
        }
        assert!(!brain.is_alive());
    }

    #[test]
    fn test_dead_health_never_changes() {
        let mut rng = rng();
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);
        brain.take_damage(150.0);
        let health_at_death = brain.health();
        assert_eq!(health_at_death, -50.0);

        brain.take_damage(10.0);
        brain.take_damage(-500.0);
        assert_eq!(brain.health(), health_at_death);
        assert!(!brain.is_alive());
    }

    #[test]
    fn test_dead_enemy_ticks_do_nothing() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);
        brain.take_damage(1000.0);

        for (sight, reach) in [(true, true), (true, false), (false, false)] {
            let update = brain.tick(&ctx(&ground, sight, reach), &mut rng);
            assert!(update.actions.is_empty());
            assert_eq!(update.state, EnemyState::Dead);
            assert!(!update.state_changed);
        }
        assert_eq!(ground.calls.get(), 0);
    }

    #[test]
    fn test_death_actions_schedule_removal_after_animation_and_grace() {
        let mut rng = rng();
        let params = EnemyParams {
            death_animation_secs: 1.25,
            ..EnemyParams::default()
        };
        let brain = EnemyBrain::new(params, &mut rng);
        let actions = brain.death_actions();
        assert_eq!(actions[0], EnemyAction::HaltNavigation);
        assert_eq!(actions[1], EnemyAction::PlayAnimation(AnimationCue::Die));
        assert_eq!(
            actions[2],
            EnemyAction::ScheduleRemoval {
                after_secs: 1.25 + DEATH_REMOVAL_GRACE_SECS
            }
        );
    }

    // ---- Attacking ----

    #[test]
    fn test_one_hit_per_cooldown_window() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);

        // Attack range for 10 seconds at 60 Hz, cooldown resets delivered on time
        let cooldown = brain.params().attack_cooldown_secs as f64;
        let mut reset_due: Option<f64> = None;
        let mut hits = 0;
        let mut now = 0.0;
        for _ in 0..600 {
            if reset_due.is_some_and(|due| now >= due) {
                brain.reset_attack();
                reset_due = None;
            }
            let update = brain.tick(&ctx(&ground, true, true), &mut rng);
            assert_eq!(update.state, EnemyState::Attacking);
            let dealt = damage_dealt(&update.actions);
            if dealt > 0.0 {
                hits += 1;
                assert!(reset_due.is_none(), "hit while on cooldown");
                assert!(update.actions.contains(&EnemyAction::ScheduleAttackReset {
                    after_secs: cooldown as f32
                }));
                reset_due = Some(now + cooldown);
            }
            now += DT;
        }
        // t = 0, 1.5, 3.0, ... 9.0
        assert_eq!(hits, 7);
    }

    #[test]
    fn test_no_second_hit_without_reset() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);

        let first = brain.tick(&ctx(&ground, true, true), &mut rng);
        assert_eq!(damage_dealt(&first.actions), ENEMY_DEFAULT_DAMAGE);
        assert!(first.state_changed);
        assert!(first
            .actions
            .contains(&EnemyAction::PlayAnimation(AnimationCue::Attack)));

        for _ in 0..1000 {
            let update = brain.tick(&ctx(&ground, true, true), &mut rng);
            assert_eq!(damage_dealt(&update.actions), 0.0);
            assert!(update.actions.contains(&EnemyAction::HaltNavigation));
            assert!(update
                .actions
                .contains(&EnemyAction::FaceTowards(Vec3::new(0.0, 0.0, 5.0))));
        }
        assert!(brain.attack_on_cooldown());
    }

    #[test]
    fn test_reset_attack_plays_idle_only_when_alive() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);
        brain.tick(&ctx(&ground, true, true), &mut rng);

        assert_eq!(
            brain.reset_attack(),
            Some(EnemyAction::PlayAnimation(AnimationCue::Idle))
        );
        assert!(!brain.attack_on_cooldown());

        brain.tick(&ctx(&ground, true, true), &mut rng);
        brain.take_damage(1000.0);
        assert_eq!(brain.reset_attack(), None);
        assert!(!brain.attack_on_cooldown());
    }

    #[test]
    fn test_attack_during_idle_pause_opens_gate() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);
        assert!(!brain.can_walk());

        let update = brain.tick(&ctx(&ground, true, true), &mut rng);
        assert_eq!(update.state, EnemyState::Attacking);
        assert!(brain.can_walk());
    }

    // ---- Idle gate ----

    #[test]
    fn test_idle_pause_holds_until_timer_expires() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let params = EnemyParams {
            min_idle_secs: 0.45,
            max_idle_secs: 0.45,
            ..EnemyParams::default()
        };
        let mut brain = EnemyBrain::new(params, &mut rng);
        assert_eq!(brain.idle_pause(), 0.45);
        let mut idle = ctx(&ground, false, false);
        idle.dt = 0.1;

        for _ in 0..4 {
            let update = brain.tick(&idle, &mut rng);
            assert_eq!(update.state, EnemyState::Idle);
            assert_eq!(
                update.actions,
                vec![EnemyAction::PlayAnimation(AnimationCue::Idle)]
            );
            assert!(!brain.can_walk());
        }
        brain.tick(&idle, &mut rng);
        assert!(brain.can_walk());

        let update = brain.tick(&idle, &mut rng);
        assert_eq!(update.state, EnemyState::Patrolling);
        assert!(update.state_changed);
        assert_eq!(update.previous, EnemyState::Idle);
    }

    #[test]
    fn test_sight_ends_idle_pause() {
        let mut rng = rng();
        let ground = ScriptedGround::new(true);
        let mut brain = EnemyBrain::new(EnemyParams::default(), &mut rng);

        let update = brain.tick(&ctx(&ground, true, false), &mut rng);
        assert!(brain.can_walk());
        assert!(update.actions.is_empty());

        let update = brain.tick(&ctx(&ground, true, false), &mut rng);
        assert_eq!(update.state, EnemyState::Chasing);
    }

    #[test]
    fn test_idle_pause_within_configured_bounds() {
        let mut rng = rng();
        let params = EnemyParams::default();
        for _ in 0..200 {
            let brain = EnemyBrain::new(params.clone(), &mut rng);
            assert!(brain.idle_pause() >= params.min_idle_secs);
            assert!(brain.idle_pause() < params.max_idle_secs);
        }
    }

    // ---- Patrolling ----

    #[test]
    fn test_patrol_target_requires_ground() {
        let mut rng = rng();
        let mut brain = walking_brain(EnemyParams::default(), &mut rng);
        let void = ScriptedGround::new(false);

        for _ in 0..100 {
            let update = brain.tick(&ctx(&void, false, false), &mut rng);
            assert_eq!(update.state, EnemyState::Patrolling);
            assert!(brain.walk_target().is_none());
            assert!(!update
                .actions
                .iter()
                .any(|a| matches!(a, EnemyAction::NavigateTo(_))));
        }
        assert_eq!(void.calls.get(), 100);
    }

    #[test]
    fn test_patrol_target_sampled_within_range_at_same_height() {
        let mut rng = rng();
        let mut brain = walking_brain(EnemyParams::default(), &mut rng);
        let ground = ScriptedGround::with_pit(2.0);

        let (target, actions) = patrol_until_target(&mut brain, &ground, &mut rng);
        let range = ENEMY_DEFAULT_WALK_POINT_RANGE;
        assert!(target.x.abs() <= range && target.z.abs() <= range);
        assert_eq!(target.y, 0.0);
        assert!(actions.contains(&EnemyAction::NavigateTo(target)));
        assert!(actions.contains(&EnemyAction::PlayAnimation(AnimationCue::Patrol)));

        // Target is memoized while walking
        let probes = ground.calls.get();
        brain.tick(&ctx(&ground, false, false), &mut rng);
        assert_eq!(brain.walk_target(), Some(target));
        assert_eq!(ground.calls.get(), probes);
    }

    #[test]
    fn test_arrival_clears_target_and_closes_gate() {
        let mut rng = rng();
        let mut brain = walking_brain(EnemyParams::default(), &mut rng);
        let ground = ScriptedGround::with_pit(2.0);
        let (target, _) = patrol_until_target(&mut brain, &ground, &mut rng);

        let mut arrived = ctx(&ground, false, false);
        arrived.position = target + Vec3::new(0.5, 0.0, 0.0);
        brain.tick(&arrived, &mut rng);

        assert!(brain.walk_target().is_none());
        assert!(!brain.can_walk());

        let update = brain.tick(&arrived, &mut rng);
        assert_eq!(update.state, EnemyState::Idle);
    }

    // ---- Chasing ----

    #[test]
    fn test_chase_follows_current_player_position() {
        let mut rng = rng();
        let mut brain = walking_brain(EnemyParams::default(), &mut rng);
        let ground = ScriptedGround::new(true);

        for step in 0..5 {
            let mut c = ctx(&ground, true, false);
            c.player_position = Vec3::new(step as f32, 0.0, 6.0);
            let update = brain.tick(&c, &mut rng);
            assert_eq!(update.state, EnemyState::Chasing);
            assert!(update
                .actions
                .contains(&EnemyAction::NavigateTo(c.player_position)));
            assert!(update
                .actions
                .contains(&EnemyAction::PlayAnimation(AnimationCue::Chase)));
        }
    }

    #[test]
    fn test_reach_without_sight_holds_state() {
        let mut rng = rng();
        let mut brain = walking_brain(EnemyParams::default(), &mut rng);
        let ground = ScriptedGround::new(true);
        brain.tick(&ctx(&ground, true, false), &mut rng);
        assert_eq!(brain.state(), EnemyState::Chasing);

        let update = brain.tick(&ctx(&ground, false, true), &mut rng);
        assert_eq!(update.state, EnemyState::Chasing);
        assert!(!update.state_changed);
        assert!(update.actions.is_empty());
    }

    // ---- Perception and profiles ----

    #[test]
    fn test_perception_radii() {
        let params = EnemyParams::default();
        let near = LonePlayer(Vec3::new(0.0, 0.0, 1.5));
        let mid = LonePlayer(Vec3::new(0.0, 0.0, 8.0));
        let far = LonePlayer(Vec3::new(0.0, 0.0, 30.0));

        let p = perceive(&near, Vec3::ZERO, &params);
        assert!(p.player_in_sight && p.player_in_attack_range);
        let p = perceive(&mid, Vec3::ZERO, &params);
        assert!(p.player_in_sight && !p.player_in_attack_range);
        let p = perceive(&far, Vec3::ZERO, &params);
        assert!(!p.player_in_sight && !p.player_in_attack_range);

        let blind = EnemyParams {
            player_layer: LayerMask::ENEMY,
            ..EnemyParams::default()
        };
        assert!(!perceive(&near, Vec3::ZERO, &blind).player_in_sight);
    }

    #[test]
    fn test_grunt_profile_matches_defaults() {
        let grunt = get_profile(EnemyArchetype::Grunt);
        assert_eq!(grunt.health, 100.0);
        assert_eq!(grunt.damage, 15.0);
        assert_eq!(grunt.attack_cooldown_secs, 1.5);
        assert_eq!(grunt.min_idle_secs, 3.0);
        assert_eq!(grunt.max_idle_secs, 10.0);
    }

    #[test]
    fn test_profiles_are_distinct() {
        let brute = get_profile(EnemyArchetype::Brute);
        let stalker = get_profile(EnemyArchetype::Stalker);
        assert!(brute.health > stalker.health);
        assert!(stalker.move_speed > brute.move_speed);
        assert!(stalker.sight_radius > brute.sight_radius);
        for p in [&brute, &stalker] {
            assert!(p.max_idle_secs > p.min_idle_secs);
            assert!(p.sight_radius > p.attack_radius);
        }
    }

    #[test]
    fn test_resolve_params_precedence() {
        let spawn = EnemyParams {
            health: 1.0,
            ..EnemyParams::default()
        };
        let over = EnemyParams {
            health: 2.0,
            ..EnemyParams::default()
        };
        let a = EnemyArchetype::Brute;
        assert_eq!(resolve_params(a, Some(&spawn), Some(&over)).health, 1.0);
        assert_eq!(resolve_params(a, None, Some(&over)).health, 2.0);
        assert_eq!(resolve_params(a, None, None), get_profile(a));
    }
}
