//! KURONEKO headless runner.
//!
//! Wires the game session to a fixed-rate game-loop thread and an input
//! source (the scripted autopilot when run from the command line).

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use kuroneko_core as core;
