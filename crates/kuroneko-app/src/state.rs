//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use kuroneko_core::commands::PlayerCommand;
use kuroneko_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the session.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles to a running game loop.
///
/// - `mpsc::Sender` wrapped in `Mutex` so the state can be shared by reference
/// - `Arc<Mutex<Option<...>>>` for the latest snapshot (written by the loop thread)
pub struct AppState {
    /// `None` until a loop has been attached.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the loop's command sender. The loop stops once every sender
    /// is gone, so the caller keeps one here for the session's lifetime.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = Some(tx);
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
