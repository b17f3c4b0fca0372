//! Core types and definitions for the KURONEKO game runtime.
//!
//! This crate defines the vocabulary shared across all other crates:
//! parameter structs, collaborator traits, commands, events, UI snapshots,
//! constants and configuration loading. It has no dependency on the ECS
//! or on any engine runtime.

pub mod collab;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod params;
pub mod state;
pub mod types;

pub use glam::Vec3;

#[cfg(test)]
mod tests;
