//! Headless game session for KURONEKO.
//!
//! Owns a hecs world standing in for the engine's object graph, runs the
//! per-tick systems and produces GameStateSnapshots for the UI layer.

pub mod components;
pub mod engine;
pub mod game_manager;
pub mod loadout;
pub mod player;
pub mod proximity;
pub mod scene;
pub mod scheduler;
pub mod systems;
pub mod weapon;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use kuroneko_core as core;
