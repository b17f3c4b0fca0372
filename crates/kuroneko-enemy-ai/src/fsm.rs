//! Enemy behavior finite state machine.
//!
//! `EnemyBrain` holds one enemy's mutable AI state. Each tick it takes the
//! current perception as an [`EnemyContext`] and returns an [`EnemyUpdate`]
//! listing the actions the integration layer must carry out (navigation,
//! facing, animation, damage, deferred callbacks). No ECS dependency.

use glam::Vec3;
use rand::Rng;

use kuroneko_core::collab::{Damageable, GroundProbe};
use kuroneko_core::constants::*;
use kuroneko_core::enums::{AnimationCue, DamageOutcome, EnemyState};
use kuroneko_core::params::EnemyParams;

/// Input to the enemy FSM for a single tick.
pub struct EnemyContext<'a> {
    pub position: Vec3,
    pub player_position: Vec3,
    pub player_in_sight: bool,
    pub player_in_attack_range: bool,
    /// Seconds since the previous tick.
    pub dt: f32,
    pub ground: &'a dyn GroundProbe,
}

/// Side effect requested by the FSM.
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyAction {
    NavigateTo(Vec3),
    HaltNavigation,
    FaceTowards(Vec3),
    PlayAnimation(AnimationCue),
    DamagePlayer(f32),
    /// Call [`EnemyBrain::reset_attack`] after the delay.
    ScheduleAttackReset { after_secs: f32 },
    /// Remove the enemy from the world after the delay.
    ScheduleRemoval { after_secs: f32 },
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyUpdate {
    pub previous: EnemyState,
    pub state: EnemyState,
    pub state_changed: bool,
    pub actions: Vec<EnemyAction>,
}

/// Per-enemy AI state.
#[derive(Debug, Clone)]
pub struct EnemyBrain {
    params: EnemyParams,
    state: EnemyState,
    health: f32,
    alive: bool,
    walk_target: Option<Vec3>,
    /// Movement gate; closed during idle pauses.
    can_walk: bool,
    idle_timer: f32,
    idle_pause: f32,
    attack_on_cooldown: bool,
}

impl EnemyBrain {
    /// A fresh enemy starts idle with the movement gate closed.
    pub fn new<R: Rng + ?Sized>(params: EnemyParams, rng: &mut R) -> Self {
        let idle_pause = roll_idle_pause(&params, rng);
        Self {
            health: params.health,
            params,
            state: EnemyState::Idle,
            alive: true,
            walk_target: None,
            can_walk: false,
            idle_timer: 0.0,
            idle_pause,
            attack_on_cooldown: false,
        }
    }

    pub fn params(&self) -> &EnemyParams {
        &self.params
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn walk_target(&self) -> Option<Vec3> {
        self.walk_target
    }

    pub fn can_walk(&self) -> bool {
        self.can_walk
    }

    pub fn attack_on_cooldown(&self) -> bool {
        self.attack_on_cooldown
    }

    /// Duration of the current idle pause.
    pub fn idle_pause(&self) -> f32 {
        self.idle_pause
    }

    /// Evaluate the FSM for one tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, ctx: &EnemyContext<'_>, rng: &mut R) -> EnemyUpdate {
        let previous = self.state;
        let mut actions = Vec::new();

        // Terminal state, no transitions
        if !self.alive {
            return self.finish(previous, actions);
        }

        let sight = ctx.player_in_sight;
        let reach = ctx.player_in_attack_range;

        if sight && reach {
            self.attack(ctx, &mut actions);
            // Being attacked out of an idle pause ends the pause
            if !self.can_walk {
                self.open_gate();
            }
            return self.finish(previous, actions);
        }

        if !self.can_walk {
            if sight {
                self.open_gate();
                return self.finish(previous, actions);
            }
            self.state = EnemyState::Idle;
            actions.push(EnemyAction::PlayAnimation(AnimationCue::Idle));
            self.idle_timer += ctx.dt;
            if self.idle_timer >= self.idle_pause {
                self.open_gate();
            }
            return self.finish(previous, actions);
        }

        match (sight, reach) {
            (false, false) => self.patrol(ctx, rng, &mut actions),
            (true, false) => self.chase(ctx, &mut actions),
            // Reach without sight: hold whatever we were doing
            _ => {}
        }

        self.finish(previous, actions)
    }

    /// Deferred attack-cooldown callback. Clears the cooldown; alive enemies
    /// also drop back to their idle animation.
    pub fn reset_attack(&mut self) -> Option<EnemyAction> {
        self.attack_on_cooldown = false;
        self.alive
            .then_some(EnemyAction::PlayAnimation(AnimationCue::Idle))
    }

    /// Actions to run on the tick an enemy dies.
    pub fn death_actions(&self) -> Vec<EnemyAction> {
        vec![
            EnemyAction::HaltNavigation,
            EnemyAction::PlayAnimation(AnimationCue::Die),
            EnemyAction::ScheduleRemoval {
                after_secs: self.params.death_animation_secs + DEATH_REMOVAL_GRACE_SECS,
            },
        ]
    }

    fn attack(&mut self, ctx: &EnemyContext<'_>, actions: &mut Vec<EnemyAction>) {
        self.state = EnemyState::Attacking;
        actions.push(EnemyAction::HaltNavigation);
        actions.push(EnemyAction::FaceTowards(ctx.player_position));

        if self.attack_on_cooldown {
            return;
        }
        actions.push(EnemyAction::PlayAnimation(AnimationCue::Attack));
        actions.push(EnemyAction::DamagePlayer(self.params.damage));
        self.attack_on_cooldown = true;
        actions.push(EnemyAction::ScheduleAttackReset {
            after_secs: self.params.attack_cooldown_secs,
        });
    }

    fn patrol<R: Rng + ?Sized>(
        &mut self,
        ctx: &EnemyContext<'_>,
        rng: &mut R,
        actions: &mut Vec<EnemyAction>,
    ) {
        self.state = EnemyState::Patrolling;

        if self.walk_target.is_none() {
            self.walk_target = self.sample_walk_point(ctx, rng);
        }

        actions.push(EnemyAction::PlayAnimation(AnimationCue::Patrol));

        let Some(target) = self.walk_target else {
            // Sample missed the ground; retry next tick
            return;
        };
        actions.push(EnemyAction::NavigateTo(target));

        if ctx.position.distance(target) < WALK_POINT_ARRIVAL_DISTANCE {
            self.walk_target = None;
            self.close_gate(rng);
        }
    }

    fn chase(&mut self, ctx: &EnemyContext<'_>, actions: &mut Vec<EnemyAction>) {
        self.state = EnemyState::Chasing;
        actions.push(EnemyAction::PlayAnimation(AnimationCue::Chase));
        actions.push(EnemyAction::NavigateTo(ctx.player_position));
    }

    /// Random point at the same height within `walk_point_range` on X and Z.
    /// Only returned if a short downward probe hits walkable ground.
    fn sample_walk_point<R: Rng + ?Sized>(&self, ctx: &EnemyContext<'_>, rng: &mut R) -> Option<Vec3> {
        let range = self.params.walk_point_range;
        let (dx, dz) = if range > 0.0 {
            (rng.gen_range(-range..range), rng.gen_range(-range..range))
        } else {
            (0.0, 0.0)
        };
        let candidate = Vec3::new(ctx.position.x + dx, ctx.position.y, ctx.position.z + dz);
        ctx.ground
            .probe_ground(candidate, Vec3::NEG_Y, GROUND_PROBE_DISTANCE, self.params.ground_layer)
            .then_some(candidate)
    }

    fn open_gate(&mut self) {
        self.can_walk = true;
        self.idle_timer = 0.0;
    }

    fn close_gate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.can_walk = false;
        self.idle_timer = 0.0;
        self.idle_pause = roll_idle_pause(&self.params, rng);
    }

    fn finish(&self, previous: EnemyState, actions: Vec<EnemyAction>) -> EnemyUpdate {
        EnemyUpdate {
            previous,
            state: self.state,
            state_changed: previous != self.state,
            actions,
        }
    }
}

impl Damageable for EnemyBrain {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            self.state = EnemyState::Dead;
            self.walk_target = None;
            return DamageOutcome::Killed;
        }
        DamageOutcome::Wounded
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

fn roll_idle_pause<R: Rng + ?Sized>(params: &EnemyParams, rng: &mut R) -> f32 {
    if params.max_idle_secs > params.min_idle_secs {
        rng.gen_range(params.min_idle_secs..params.max_idle_secs)
    } else {
        params.min_idle_secs
    }
}
