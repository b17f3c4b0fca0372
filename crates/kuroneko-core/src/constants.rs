//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Enemy AI ---

/// Distance at which a patrol walk target counts as reached.
pub const WALK_POINT_ARRIVAL_DISTANCE: f32 = 1.0;

/// Length of the downward probe validating a patrol walk target.
pub const GROUND_PROBE_DISTANCE: f32 = 2.0;

/// Extra time a dead enemy lingers after its death animation.
pub const DEATH_REMOVAL_GRACE_SECS: f32 = 2.0;

/// Collider radius of enemy bodies.
pub const ENEMY_COLLIDER_RADIUS: f32 = 0.5;

/// Default enemy stats (the "Grunt" profile).
pub const ENEMY_DEFAULT_HEALTH: f32 = 100.0;
pub const ENEMY_DEFAULT_DAMAGE: f32 = 15.0;
pub const ENEMY_DEFAULT_ATTACK_COOLDOWN_SECS: f32 = 1.5;
pub const ENEMY_DEFAULT_SIGHT_RADIUS: f32 = 12.0;
pub const ENEMY_DEFAULT_ATTACK_RADIUS: f32 = 2.0;
pub const ENEMY_DEFAULT_WALK_POINT_RANGE: f32 = 8.0;
pub const ENEMY_DEFAULT_MIN_IDLE_SECS: f32 = 3.0;
pub const ENEMY_DEFAULT_MAX_IDLE_SECS: f32 = 10.0;
pub const ENEMY_DEFAULT_MOVE_SPEED: f32 = 3.5;
pub const ENEMY_DEFAULT_DEATH_ANIMATION_SECS: f32 = 1.2;

// --- Player ---

pub const PLAYER_DEFAULT_HEALTH: f32 = 100.0;

/// Collider radius of the player body.
pub const PLAYER_COLLIDER_RADIUS: f32 = 0.5;

/// Radius of the player's pickup/trigger watcher.
pub const PLAYER_PICKUP_RADIUS: f32 = 1.0;

/// Height of the muzzle above the player's position.
pub const PLAYER_MUZZLE_HEIGHT: f32 = 0.3;

// --- Weapons ---

/// Distance ahead of the player at which a dropped weapon lands.
pub const WEAPON_DROP_DISTANCE: f32 = 2.0;

/// Height above the ground hit point at which a dropped weapon rests.
pub const WEAPON_DROP_LIFT: f32 = 0.5;

/// Radius of a projectile's hit sphere.
pub const PROJECTILE_RADIUS: f32 = 0.1;

pub const PROJECTILE_DEFAULT_SPEED: f32 = 30.0;
pub const PROJECTILE_DEFAULT_LIFETIME_SECS: f32 = 3.0;

// --- Proximity ---

/// Maximum overlap results a proximity watcher considers per tick.
pub const PROXIMITY_MAX_RESULTS: usize = 20;

/// Collider radius of pickups and trigger zones.
pub const PICKUP_COLLIDER_RADIUS: f32 = 0.5;
