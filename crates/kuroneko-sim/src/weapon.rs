//! Held weapon state: ammo, fire-rate gating, reload.

use kuroneko_core::params::WeaponData;
use kuroneko_core::state::WeaponView;

/// Why a trigger pull did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotBlock {
    Reloading,
    /// Less than `fire_rate` seconds since the last shot.
    Cooldown,
    /// Empty and unable to reload.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// One projectile leaves the muzzle carrying `damage`.
    Fired { damage: f32 },
    /// Magazine was empty; a reload started instead.
    ReloadStarted { duration_secs: f32 },
    Blocked(ShotBlock),
}

/// Runtime state of a held weapon.
///
/// `current_ammo` stays within `0..=magazine_size`. Reload completion is
/// driven from outside through [`WeaponState::finish_reload`] once the
/// reload delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponState {
    data: WeaponData,
    current_ammo: u32,
    reloading: bool,
    last_shot_at: Option<f64>,
}

impl WeaponState {
    /// A freshly picked-up weapon with a full magazine.
    pub fn new(data: WeaponData) -> Self {
        Self {
            current_ammo: data.magazine_size,
            data,
            reloading: false,
            last_shot_at: None,
        }
    }

    pub fn data(&self) -> &WeaponData {
        &self.data
    }

    /// Static stats only; ammo and reload state are discarded.
    pub fn into_data(self) -> WeaponData {
        self.data
    }

    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Pull the trigger at time `now` (seconds).
    pub fn shoot(&mut self, now: f64) -> ShotOutcome {
        if self.reloading {
            return ShotOutcome::Blocked(ShotBlock::Reloading);
        }
        if self
            .last_shot_at
            .is_some_and(|last| now - last < f64::from(self.data.fire_rate))
        {
            return ShotOutcome::Blocked(ShotBlock::Cooldown);
        }
        if self.current_ammo == 0 {
            return match self.start_reload() {
                Some(duration_secs) => ShotOutcome::ReloadStarted { duration_secs },
                None => ShotOutcome::Blocked(ShotBlock::Empty),
            };
        }

        self.current_ammo -= 1;
        self.last_shot_at = Some(now);
        ShotOutcome::Fired {
            damage: self.data.damage,
        }
    }

    /// Enter the reloading state. Returns the reload duration, or `None`
    /// when already reloading or the magazine is full.
    pub fn start_reload(&mut self) -> Option<f32> {
        if self.reloading || self.current_ammo >= self.data.magazine_size {
            return None;
        }
        self.reloading = true;
        Some(self.data.reload_secs)
    }

    /// Refill to capacity and leave the reloading state. Returns the new
    /// ammo count, or `None` if no reload was in progress.
    pub fn finish_reload(&mut self) -> Option<u32> {
        if !self.reloading {
            return None;
        }
        self.current_ammo = self.data.magazine_size;
        self.reloading = false;
        Some(self.current_ammo)
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            name: self.data.name.clone(),
            kind: self.data.kind,
            ammo: self.current_ammo,
            magazine_size: self.data.magazine_size,
            reloading: self.reloading,
            automatic: self.data.automatic,
        }
    }
}
