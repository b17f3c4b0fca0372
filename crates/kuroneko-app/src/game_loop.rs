//! Game loop thread. Runs the session at the fixed tick rate.
//!
//! The engine is created inside the thread so it never crosses threads.
//! Commands arrive via an `mpsc` channel and from an optional input source
//! polled once per tick. The latest snapshot is stored in shared state for
//! synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::info;

use kuroneko_core::commands::PlayerCommand;
use kuroneko_core::config::GameConfig;
use kuroneko_core::constants::TICK_RATE;
use kuroneko_core::state::GameStateSnapshot;
use kuroneko_registry::TeardownReport;
use kuroneko_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Produces player commands from what the player can see.
pub trait InputSource: Send {
    /// Called before each tick with the previous tick's snapshot.
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between ticks to hold the tick rate.
    RealTime,
    /// Tick as fast as possible.
    Unthrottled,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub pacing: Pacing,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Stop on the first tick where the game is over or ended.
    pub stop_when_finished: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            pacing: Pacing::RealTime,
            max_ticks: None,
            stop_when_finished: true,
        }
    }
}

/// What the loop hands back when it stops.
#[derive(Debug)]
pub struct LoopOutcome {
    pub ticks: u64,
    pub final_snapshot: Option<GameStateSnapshot>,
    pub teardown: TeardownReport,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop's outcome.
pub fn spawn_game_loop(
    config: GameConfig,
    settings: LoopSettings,
    input: Option<Box<dyn InputSource>>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopOutcome>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("kuroneko-game-loop".into())
        .spawn(move || run_game_loop(config, settings, input, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until a stop condition, a Shutdown command or
/// channel disconnect, then tears the session down.
fn run_game_loop(
    config: GameConfig,
    settings: LoopSettings,
    mut input: Option<Box<dyn InputSource>>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopOutcome {
    let mut engine = SimulationEngine::new(config);
    let mut last: Option<GameStateSnapshot> = None;
    let mut ticks = 0u64;
    let mut next_tick_time = Instant::now();

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Input source reacts to the previous tick
        if let (Some(source), Some(snapshot)) = (input.as_mut(), last.as_ref()) {
            engine.queue_commands(source.poll(snapshot));
        }

        // 3. Advance one tick
        let snapshot = engine.tick();
        ticks += 1;

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        let finished = snapshot.game_over || snapshot.game_end;
        last = Some(snapshot);

        if settings.stop_when_finished && finished {
            break;
        }
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        // 5. Sleep until next tick
        if settings.pacing == Pacing::RealTime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    info!("game loop stopped after {ticks} ticks");
    let teardown = engine.shutdown();
    LoopOutcome {
        ticks,
        final_snapshot: last,
        teardown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use glam::Vec3;
    use kuroneko_core::params::LevelLayout;
    use kuroneko_core::types::GroundPatch;

    /// Replays a fixed list, one command per tick.
    struct Script(Vec<PlayerCommand>);

    impl InputSource for Script {
        fn poll(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
            if self.0.is_empty() {
                Vec::new()
            } else {
                vec![self.0.remove(0)]
            }
        }
    }

    fn fast(max_ticks: u64) -> LoopSettings {
        LoopSettings {
            pacing: Pacing::Unthrottled,
            max_ticks: Some(max_ticks),
            stop_when_finished: true,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Reload))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Shoot { held: true }))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Reload)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Shoot { held: true })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_stops_at_tick_limit_and_tears_down() {
        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(GameConfig::default(), fast(50), None, Arc::clone(&latest)).unwrap();
        let outcome = handle.join().unwrap();

        assert_eq!(outcome.ticks, 50);
        assert_eq!(outcome.final_snapshot.unwrap().time.tick, 50);
        assert_eq!(outcome.teardown.destroyed.len(), 2);
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_loop_stops_when_game_ends() {
        let mut config = GameConfig::default();
        config.level = LevelLayout {
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            ground: vec![GroundPatch::new(
                Vec3::new(-10.0, 0.0, -10.0),
                Vec3::new(10.0, 0.0, 10.0),
                0.0,
            )],
            enemies: Vec::new(),
            weapon_pickups: Vec::new(),
            heal_pickups: Vec::new(),
            exit: Some(Vec3::new(0.0, 1.0, 3.0)),
        };
        // Step onto the exit on the second tick
        let script = Script(vec![PlayerCommand::SetPose {
            position: Vec3::new(0.0, 1.0, 3.0),
            forward: Vec3::Z,
        }]);

        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(config, fast(100), Some(Box::new(script)), latest).unwrap();
        let outcome = handle.join().unwrap();

        assert_eq!(outcome.ticks, 2);
        assert!(outcome.final_snapshot.unwrap().game_end);
    }

    #[test]
    fn test_shutdown_command_stops_loop() {
        let latest = Arc::new(Mutex::new(None));
        let settings = LoopSettings {
            pacing: Pacing::RealTime,
            max_ticks: None,
            stop_when_finished: true,
        };
        let (tx, handle) =
            spawn_game_loop(GameConfig::default(), settings, None, Arc::clone(&latest)).unwrap();
        std::thread::sleep(TICK_DURATION * 5);
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let outcome = handle.join().unwrap();
        assert!(outcome.ticks >= 1);
        assert!(outcome.teardown.failures.is_empty());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(GameConfig::default());
        for _ in 0..50 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
