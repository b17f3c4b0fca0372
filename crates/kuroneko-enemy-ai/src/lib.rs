//! Enemy AI for KURONEKO.
//!
//! Implements the per-enemy perception + idle/patrol/chase/attack state
//! machine and archetype-driven parameter presets.

pub mod fsm;
pub mod perception;
pub mod profiles;

pub use kuroneko_core as core;

#[cfg(test)]
mod tests;
