//! Game-wide services living in the singleton registry.

use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use parking_lot::Mutex;

use kuroneko_core::state::StatsView;
use kuroneko_registry::Singleton;

/// Game-over / game-end flags. Managed singleton on a persistent object.
#[derive(Debug, Default)]
pub struct GameManager {
    game_over: AtomicBool,
    game_end: AtomicBool,
}

impl GameManager {
    pub fn is_game_over(&self) -> bool {
        self.game_over.load(Ordering::Acquire)
    }

    pub fn set_game_over(&self) {
        if !self.game_over.swap(true, Ordering::AcqRel) {
            info!("game over");
        }
    }

    pub fn is_game_end(&self) -> bool {
        self.game_end.load(Ordering::Acquire)
    }

    pub fn set_game_end(&self) {
        if !self.game_end.swap(true, Ordering::AcqRel) {
            info!("exit reached, game end");
        }
    }

    /// Either flag set. Gameplay freezes until a restart.
    pub fn is_finished(&self) -> bool {
        self.is_game_over() || self.is_game_end()
    }
}

impl Singleton for GameManager {
    fn on_initialize(&self) {
        info!("game manager ready");
    }
}

/// Per-session counters. Plain singleton; survives restarts.
#[derive(Debug, Default)]
pub struct SessionStats {
    counters: Mutex<StatsView>,
}

impl SessionStats {
    pub fn record_shot(&self) {
        self.counters.lock().shots_fired += 1;
    }

    pub fn record_kill(&self) {
        self.counters.lock().enemies_killed += 1;
    }

    pub fn record_damage_taken(&self, amount: f32) {
        self.counters.lock().damage_taken += amount;
    }

    pub fn view(&self) -> StatsView {
        *self.counters.lock()
    }
}

impl Singleton for SessionStats {
    fn on_cleanup(&self) {
        let stats = self.view();
        info!(
            "session stats: {} shots, {} kills, {:.1} damage taken",
            stats.shots_fired, stats.enemies_killed, stats.damage_taken
        );
    }
}
