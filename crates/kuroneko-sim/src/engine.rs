//! Game session engine.
//!
//! `SimulationEngine` owns the hecs-backed scene, the singleton registry,
//! the deferred-task queue and the seeded RNG. It processes player commands,
//! runs all systems and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use kuroneko_core::commands::PlayerCommand;
use kuroneko_core::config::GameConfig;
use kuroneko_core::constants::*;
use kuroneko_core::events::GameEvent;
use kuroneko_core::state::GameStateSnapshot;
use kuroneko_core::types::{LayerMask, SimTime};
use kuroneko_registry::{
    ManagedSingleton, PlainSingleton, SingletonRegistry, TeardownReport, UnregisterMode,
};

use crate::components::{Facing, Position};
use crate::game_manager::{GameManager, SessionStats};
use crate::loadout;
use crate::player::PlayerCombatState;
use crate::proximity::ProximityWatcher;
use crate::scene::SceneWorld;
use crate::scheduler::{DeferredQueue, DeferredTask};
use crate::systems;
use crate::systems::enemy_ai::ActionSink;
use crate::weapon::{ShotOutcome, WeaponState};
use crate::world_setup;

/// The game session. Owns the world and all session state.
pub struct SimulationEngine {
    scene: SceneWorld,
    registry: Arc<SingletonRegistry<SceneWorld>>,
    game_manager: Arc<ManagedSingleton<GameManager, SceneWorld>>,
    stats: Arc<PlainSingleton<SessionStats, SceneWorld>>,
    scheduler: DeferredQueue<DeferredTask>,
    rng: ChaCha8Rng,
    time: SimTime,
    config: GameConfig,
    player: Entity,
    watcher: ProximityWatcher<Entity>,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a session and load the configured level.
    pub fn new(config: GameConfig) -> Self {
        let mut scene = SceneWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let registry: Arc<SingletonRegistry<SceneWorld>> = Arc::new(SingletonRegistry::new());
        let game_manager = ManagedSingleton::with_default(Arc::clone(&registry), true);
        let stats = PlainSingleton::with_default(Arc::clone(&registry));

        let player = world_setup::spawn_player(&mut scene, &config.player, config.level.player_spawn);
        world_setup::load_level(&mut scene, &config, &mut rng);
        game_manager.instance(&mut scene);
        stats.instance();
        info!("session started (seed {})", config.seed);

        Self {
            scene,
            registry,
            game_manager,
            stats,
            scheduler: DeferredQueue::new(),
            rng,
            time: SimTime::default(),
            config,
            player,
            watcher: ProximityWatcher::new(PLAYER_PICKUP_RADIUS, LayerMask::PICKUP | LayerMask::TRIGGER),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one tick and return the resulting snapshot.
    ///
    /// Deferred tasks run every tick; the gameplay systems are frozen while
    /// the game is over or ended.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        let game = self.game_manager.instance(&mut self.scene);
        let stats = self.stats.instance();
        let dt = self.time.dt() as f32;
        {
            let mut sink = ActionSink {
                now: self.time.elapsed_secs,
                player: self.player,
                scheduler: &mut self.scheduler,
                events: &mut self.events,
                game: &game,
                stats: &stats,
            };
            // 1. Deferred tasks (reload, attack reset, corpse removal)
            systems::deferred::run(&mut self.scene, &mut sink);
            if !game.is_finished() {
                // 2. Player triggers
                systems::pickups::run(&mut self.scene, &mut self.watcher, self.player, &mut sink);
                // 3. Enemy AI
                systems::enemy_ai::run(&self.scene, dt, &mut self.rng, &mut sink);
                // 4. Steering
                systems::navigation::run(self.scene.world_mut(), dt);
                // 5. Projectiles
                systems::projectiles::run(&mut self.scene, dt, &mut sink);
            }
        }
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.scene,
            &self.time,
            self.player,
            &game,
            stats.view(),
            events,
        )
    }

    /// Tear down every registered singleton, newest first.
    pub fn shutdown(&mut self) -> TeardownReport {
        info!("session shutting down");
        self.registry.destroy_all(&mut self.scene)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        self.scene.world()
    }

    pub fn scene(&self) -> &SceneWorld {
        &self.scene
    }

    pub fn registry(&self) -> &SingletonRegistry<SceneWorld> {
        &self.registry
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Deferred tasks not yet due.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Whether the game is over or ended.
    pub fn is_finished(&self) -> bool {
        self.game_manager.get().is_some_and(|game| game.is_finished())
    }

    /// Mutable scene access for tests that stage encounters by hand.
    #[cfg(test)]
    pub fn scene_mut(&mut self) -> &mut SceneWorld {
        &mut self.scene
    }

    #[cfg(test)]
    pub fn game_manager(&self) -> &Arc<ManagedSingleton<GameManager, SceneWorld>> {
        &self.game_manager
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Once the game is over or ended only
    /// `Restart` is honoured.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.is_finished() && command != PlayerCommand::Restart {
            debug!("ignoring {command:?}: game finished");
            return;
        }
        match command {
            PlayerCommand::SetPose { position, forward } => {
                let world = self.scene.world();
                if let Ok(mut pos) = world.get::<&mut Position>(self.player) {
                    pos.0 = position;
                }
                if let (Some(dir), Ok(mut facing)) =
                    (forward.try_normalize(), world.get::<&mut Facing>(self.player))
                {
                    facing.0 = dir;
                }
            }
            PlayerCommand::Shoot { held } => self.shoot(held),
            PlayerCommand::Reload => {
                if let Some(weapon) = loadout::held_weapon(&self.scene, self.player) {
                    let started = self
                        .scene
                        .world()
                        .get::<&mut WeaponState>(weapon)
                        .ok()
                        .and_then(|mut state| state.start_reload());
                    if let Some(duration_secs) = started {
                        self.begin_reload(weapon, duration_secs);
                    }
                }
            }
            PlayerCommand::DropWeapon => {
                loadout::drop_weapon(&mut self.scene, self.player, &mut self.events);
            }
            PlayerCommand::UseHealItem => {
                let healed = self
                    .scene
                    .world()
                    .get::<&mut PlayerCombatState>(self.player)
                    .ok()
                    .and_then(|mut combat| {
                        combat
                            .use_heal_item()
                            .map(|health| (health, combat.heal_items()))
                    });
                if let Some((health, items_left)) = healed {
                    self.events.push(GameEvent::PlayerHealed { health, items_left });
                }
            }
            PlayerCommand::Restart => {
                self.restart();
            }
        }
    }

    fn shoot(&mut self, held: bool) {
        let Some(weapon) = loadout::held_weapon(&self.scene, self.player) else {
            debug!("trigger pulled with empty hands");
            return;
        };
        let now = self.time.elapsed_secs;
        let (outcome, data, ammo_left) = {
            let Ok(mut state) = self.scene.world().get::<&mut WeaponState>(weapon) else {
                return;
            };
            if held && !state.data().automatic {
                return;
            }
            let outcome = state.shoot(now);
            (outcome, state.data().clone(), state.current_ammo())
        };

        match outcome {
            ShotOutcome::Fired { damage } => {
                let world = self.scene.world();
                let origin = world.get::<&Position>(self.player).map(|p| p.0).unwrap_or_default();
                let forward = world.get::<&Facing>(self.player).map(|f| f.0).unwrap_or(Vec3::Z);
                let muzzle = origin + Vec3::Y * PLAYER_MUZZLE_HEIGHT;
                world_setup::spawn_projectile(&mut self.scene, muzzle, forward, &data, damage);
                self.stats.instance().record_shot();
                self.events.push(GameEvent::ShotFired {
                    weapon: data.kind,
                    ammo_left,
                });
            }
            ShotOutcome::ReloadStarted { duration_secs } => self.begin_reload(weapon, duration_secs),
            ShotOutcome::Blocked(reason) => debug!("shot blocked: {reason:?}"),
        }
    }

    fn begin_reload(&mut self, weapon: Entity, duration_secs: f32) {
        self.scheduler.schedule_after(
            self.time.elapsed_secs,
            duration_secs,
            DeferredTask::FinishReload(weapon),
        );
        self.events.push(GameEvent::ReloadStarted { duration_secs });
    }

    /// Rebuild the run. Only allowed once the game is over or ended.
    /// Returns `false` (and changes nothing) otherwise.
    pub fn restart(&mut self) -> bool {
        if !self.is_finished() {
            warn!("restart ignored: game still running");
            return false;
        }

        if let Err(err) = self
            .registry
            .unregister::<GameManager>(UnregisterMode::DestroyInstance, &mut self.scene)
        {
            warn!("game manager teardown on restart: {err}");
        }
        self.scene.unload_scene();
        self.scheduler = DeferredQueue::new();
        world_setup::reset_player(&mut self.scene, self.player, self.config.level.player_spawn);
        self.watcher.clear();
        world_setup::load_level(&mut self.scene, &self.config, &mut self.rng);
        self.game_manager.instance(&mut self.scene);

        info!("session restarted");
        self.events.push(GameEvent::GameRestarted);
        true
    }
}
