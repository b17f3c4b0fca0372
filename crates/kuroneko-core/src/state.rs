//! Game state snapshot types for the UI layer.
//!
//! Produced once per tick. The UI only ever reads these; it never reaches
//! into the session directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyState, WeaponKind};
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete view of the session after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub game_over: bool,
    pub game_end: bool,
    pub player: PlayerView,
    pub weapon: Option<WeaponView>,
    pub enemies: Vec<EnemyView>,
    pub pickups: Vec<PickupView>,
    pub stats: StatsView,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub forward: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub heal_items: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub kind: WeaponKind,
    pub ammo: u32,
    pub magazine_size: u32,
    pub reloading: bool,
    pub automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Vec3,
    pub state: EnemyState,
    pub health: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    Weapon { name: String },
    Heal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub position: Vec3,
    pub kind: PickupKind,
}

/// Counters from the session statistics singleton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub shots_fired: u32,
    pub enemies_killed: u32,
    pub damage_taken: f32,
}
