//! Scripted player input for headless runs.
//!
//! Walks to the nearest weapon, then fights: faces the nearest living enemy
//! in range and keeps the trigger down, reloading on an empty magazine and
//! healing below half health. With no enemy in range it heads for the next
//! enemy, or the exit once the level is clear.

use glam::Vec3;

use kuroneko_core::commands::PlayerCommand;
use kuroneko_core::constants::{DT, PLAYER_MUZZLE_HEIGHT};
use kuroneko_core::state::{GameStateSnapshot, PickupKind, PlayerView};

use crate::game_loop::InputSource;

/// Walking speed of the scripted player (units/s).
const WALK_SPEED: f32 = 5.0;
/// Enemies closer than this are shot at.
const ENGAGE_RANGE: f32 = 14.0;
/// Heal below this fraction of max health.
const HEAL_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    exit: Option<Vec3>,
    trigger_down: bool,
}

impl Autopilot {
    pub fn new(exit: Option<Vec3>) -> Self {
        Self {
            exit,
            trigger_down: false,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if snapshot.game_over || snapshot.game_end {
            return commands;
        }
        let player = &snapshot.player;

        if player.heal_items > 0 && player.health < player.max_health * HEAL_THRESHOLD {
            commands.push(PlayerCommand::UseHealItem);
        }

        let Some(weapon) = &snapshot.weapon else {
            self.trigger_down = false;
            let pickup = nearest(
                player.position,
                snapshot
                    .pickups
                    .iter()
                    .filter(|p| matches!(p.kind, PickupKind::Weapon { .. }))
                    .map(|p| p.position),
            );
            if let Some(target) = pickup {
                commands.push(walk_toward(player, target));
            }
            return commands;
        };

        let enemy = nearest(
            player.position,
            snapshot.enemies.iter().filter(|e| e.alive).map(|e| e.position),
        );
        match enemy {
            Some(target) if target.distance(player.position) <= ENGAGE_RANGE => {
                let muzzle = player.position + Vec3::Y * PLAYER_MUZZLE_HEIGHT;
                let aim = (target - muzzle).try_normalize().unwrap_or(player.forward);
                commands.push(PlayerCommand::SetPose {
                    position: player.position,
                    forward: aim,
                });
                if weapon.ammo == 0 && !weapon.reloading {
                    self.trigger_down = false;
                    commands.push(PlayerCommand::Reload);
                } else {
                    commands.push(PlayerCommand::Shoot {
                        held: self.trigger_down && weapon.automatic,
                    });
                    self.trigger_down = true;
                }
            }
            Some(target) => {
                self.trigger_down = false;
                commands.push(walk_toward(player, target));
            }
            None => {
                self.trigger_down = false;
                if let Some(exit) = self.exit {
                    commands.push(walk_toward(player, exit));
                }
            }
        }
        commands
    }
}

fn nearest(from: Vec3, points: impl Iterator<Item = Vec3>) -> Option<Vec3> {
    points.min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// One tick of walking on the ground plane toward `target`.
fn walk_toward(player: &PlayerView, target: Vec3) -> PlayerCommand {
    let mut offset = target - player.position;
    offset.y = 0.0;
    let distance = offset.length();
    let step = WALK_SPEED * DT as f32;
    let (position, forward) = match offset.try_normalize() {
        Some(dir) => (player.position + dir * step.min(distance), dir),
        None => (player.position, player.forward),
    };
    PlayerCommand::SetPose { position, forward }
}
