//! kuroneko: run a headless KURONEKO session driven by the autopilot.
//!
//! Usage:
//!   kuroneko [CONFIG.toml] [--fast] [--ticks N]

use std::error::Error;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use env_logger::Env;
use log::info;

use kuroneko_app::autopilot::Autopilot;
use kuroneko_app::game_loop::{spawn_game_loop, LoopSettings, Pacing};
use kuroneko_app::state::AppState;
use kuroneko_core::config::GameConfig;
use kuroneko_core::constants::TICK_RATE;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Two minutes of game time.
const DEFAULT_MAX_TICKS: u64 = 120 * TICK_RATE as u64;

struct Args {
    config: Option<String>,
    fast: bool,
    max_ticks: u64,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        fast: false,
        max_ticks: DEFAULT_MAX_TICKS,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => parsed.fast = true,
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                parsed.max_ticks = value
                    .parse()
                    .map_err(|_| format!("invalid tick count: {value}"))?;
            }
            "help" | "--help" | "-h" => return Err(usage()),
            other if other.starts_with("--") => return Err(format!("unknown flag: {other}")),
            path => parsed.config = Some(path.to_string()),
        }
    }
    Ok(parsed)
}

fn usage() -> String {
    "kuroneko: headless KURONEKO session\n\
     \n\
     Usage: kuroneko [CONFIG.toml] [--fast] [--ticks N]\n\
     \n\
       CONFIG.toml  Game configuration (default: data/config/kuroneko.toml)\n\
       --fast       Run unthrottled instead of at the tick rate\n\
       --ticks N    Stop after N ticks\n"
        .to_string()
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("kuroneko: {err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let args = parse_args(args)?;
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_default()?,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .format_timestamp_secs()
        .try_init()?;

    let settings = LoopSettings {
        pacing: if args.fast {
            Pacing::Unthrottled
        } else {
            Pacing::RealTime
        },
        max_ticks: Some(args.max_ticks),
        stop_when_finished: true,
    };
    let autopilot = Autopilot::new(config.level.exit);
    info!("starting session (seed {}, up to {} ticks)", config.seed, args.max_ticks);

    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(
        config,
        settings,
        Some(Box::new(autopilot)),
        Arc::clone(&state.latest_snapshot),
    )?;
    state.attach(tx);

    // Report progress until the loop stops on its own
    let mut reported = Instant::now();
    while !handle.is_finished() {
        thread::sleep(POLL_INTERVAL);
        if reported.elapsed() < PROGRESS_INTERVAL {
            continue;
        }
        reported = Instant::now();
        if let Some(snap) = state.snapshot() {
            info!(
                "t={:.1}s health={:.0} enemies left={}",
                snap.time.elapsed_secs,
                snap.player.health,
                snap.enemies.iter().filter(|e| e.alive).count()
            );
        }
    }

    let outcome = handle.join().map_err(|_| "game loop thread panicked")?;
    for (name, err) in &outcome.teardown.failures {
        eprintln!("kuroneko: teardown of {name} failed: {err}");
    }

    let Some(last) = outcome.final_snapshot else {
        return Err("session produced no snapshot".into());
    };
    let result = if last.game_end {
        "exit reached"
    } else if last.game_over {
        "game over"
    } else {
        "time limit"
    };
    let summary = serde_json::json!({
        "result": result,
        "ticks": outcome.ticks,
        "elapsed_secs": last.time.elapsed_secs,
        "player": last.player,
        "weapon": last.weapon,
        "enemies_left": last.enemies.iter().filter(|e| e.alive).count(),
        "stats": last.stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
