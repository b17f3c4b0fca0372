//! Player combat state: health, heal items, damage intake.

use kuroneko_core::collab::Damageable;
use kuroneko_core::enums::DamageOutcome;
use kuroneko_core::params::PlayerParams;

/// Health and healing inventory of the player.
///
/// `max_health` is fixed at creation. Health never exceeds it and the heal
/// item count never goes negative. Lives on the persistent player entity,
/// so it survives scene unloads; a restart resets it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCombatState {
    health: f32,
    max_health: f32,
    heal_items: u32,
    heal_amount: Option<f32>,
    starting_heal_items: u32,
}

impl PlayerCombatState {
    pub fn new(params: &PlayerParams) -> Self {
        Self {
            health: params.health,
            max_health: params.health,
            heal_items: params.starting_heal_items,
            heal_amount: params.heal_amount,
            starting_heal_items: params.starting_heal_items,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn heal_items(&self) -> u32 {
        self.heal_items
    }

    /// Consume one heal item. No-op at full health or with an empty
    /// inventory. Returns the new health when an item was used.
    pub fn use_heal_item(&mut self) -> Option<f32> {
        if self.health >= self.max_health || self.heal_items == 0 {
            return None;
        }
        self.heal_items -= 1;
        let restored = match self.heal_amount {
            Some(amount) => self.health + amount,
            None => self.max_health,
        };
        self.health = restored.min(self.max_health);
        Some(self.health)
    }

    /// Returns the new item count.
    pub fn add_heal_item(&mut self) -> u32 {
        self.heal_items += 1;
        self.heal_items
    }

    /// Back to the state of a fresh run.
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.heal_items = self.starting_heal_items;
    }
}

impl Damageable for PlayerCombatState {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
