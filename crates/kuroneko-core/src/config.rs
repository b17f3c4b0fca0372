//! Game configuration loaded from `data/config/kuroneko.toml` with env overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::EnemyArchetype;
use crate::params::{EnemyParams, LevelLayout, PlayerParams, WeaponData};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Replaces the preset of one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeOverride {
    pub archetype: EnemyArchetype,
    pub params: EnemyParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed + same commands = same session.
    pub seed: u64,
    /// Default log filter (`RUST_LOG` still wins).
    pub log_level: String,
    pub player: PlayerParams,
    pub archetype_overrides: Vec<ArchetypeOverride>,
    pub level: LevelLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            log_level: "info".into(),
            player: PlayerParams::default(),
            archetype_overrides: Vec::new(),
            level: LevelLayout::default(),
        }
    }
}

fn data_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}

impl GameConfig {
    /// Load from the default location, falling back to built-in defaults when
    /// the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = data_root().join("config/kuroneko.toml");
        let cfg = if path.is_file() {
            Self::read(&path)?
        } else {
            log::info!("no config at {}, using built-in defaults", path.display());
            Self::default()
        };
        cfg.finish()
    }

    /// Load from an explicit path. The file must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::read(path.as_ref())?.finish()
    }

    /// Parse from TOML text (no env overrides).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn finish(mut self) -> Result<Self, ConfigError> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(self)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("KURONEKO_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.seed = seed;
        }
        if let Ok(level) = std::env::var("KURONEKO_LOG") {
            self.log_level = level;
        }
    }

    /// Preset override for an archetype, if configured.
    pub fn archetype_override(&self, archetype: EnemyArchetype) -> Option<&EnemyParams> {
        self.archetype_overrides
            .iter()
            .find(|o| o.archetype == archetype)
            .map(|o| &o.params)
    }

    /// Reject parameter combinations the runtime cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.health <= 0.0 {
            return Err(ConfigError::Invalid("player.health must be positive".into()));
        }
        if let Some(amount) = self.player.heal_amount {
            if amount <= 0.0 {
                return Err(ConfigError::Invalid("player.heal_amount must be positive".into()));
            }
        }
        for o in &self.archetype_overrides {
            validate_enemy(&o.params, &format!("override {:?}", o.archetype))?;
        }
        for (i, spawn) in self.level.enemies.iter().enumerate() {
            if let Some(params) = &spawn.params {
                validate_enemy(params, &format!("level.enemies[{i}]"))?;
            }
        }
        for (i, pickup) in self.level.weapon_pickups.iter().enumerate() {
            validate_weapon(&pickup.weapon, &format!("level.weapon_pickups[{i}]"))?;
        }
        Ok(())
    }
}

/// Checks shared by configured and preset enemy parameters.
pub fn validate_enemy(params: &EnemyParams, at: &str) -> Result<(), ConfigError> {
    if params.min_idle_secs < 0.0 || params.max_idle_secs < params.min_idle_secs {
        return Err(ConfigError::Invalid(format!(
            "{at}: idle range {}..{} is inverted or negative",
            params.min_idle_secs, params.max_idle_secs
        )));
    }
    if params.sight_radius < 0.0 || params.attack_radius < 0.0 || params.walk_point_range < 0.0 {
        return Err(ConfigError::Invalid(format!("{at}: radii must be non-negative")));
    }
    if params.attack_cooldown_secs <= 0.0 {
        return Err(ConfigError::Invalid(format!("{at}: attack cooldown must be positive")));
    }
    if params.health <= 0.0 {
        return Err(ConfigError::Invalid(format!("{at}: health must be positive")));
    }
    Ok(())
}

pub fn validate_weapon(weapon: &WeaponData, at: &str) -> Result<(), ConfigError> {
    if weapon.magazine_size == 0 {
        return Err(ConfigError::Invalid(format!("{at}: magazine_size must be at least 1")));
    }
    if weapon.fire_rate < 0.0 || weapon.reload_secs <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{at}: fire_rate must be non-negative and reload_secs positive"
        )));
    }
    if weapon.projectile_speed <= 0.0 || weapon.projectile_lifetime_secs <= 0.0 {
        return Err(ConfigError::Invalid(format!("{at}: projectile speed and lifetime must be positive")));
    }
    Ok(())
}
