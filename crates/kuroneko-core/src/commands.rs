//! Player commands sent from the input layer to the session.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Move the player body and set its aim direction.
    SetPose { position: Vec3, forward: Vec3 },
    /// Trigger input. `held` is a continued hold rather than a fresh press;
    /// holds only fire automatic weapons.
    Shoot { held: bool },
    /// Reload the held weapon.
    Reload,
    /// Drop the held weapon as a world pickup.
    DropWeapon,
    /// Consume one heal item.
    UseHealItem,
    /// Restart the run. Only honoured once the game is over or ended.
    Restart,
}
