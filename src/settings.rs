use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_SEED, TREE_CHANCE, UPDATE_DISTANCE, WATER_LEVEL};

/// Errors raised while loading a world configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_seed")]
    pub seed: u32,
    /// Radius, in chunks, of the cube kept around the focus point.
    #[serde(default = "default_update_distance")]
    pub update_distance: i32,
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    #[serde(default = "default_tree_chance")]
    pub tree_chance: f32,
    #[serde(default = "default_water_level")]
    pub water_level: i32,
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

fn default_update_distance() -> i32 {
    UPDATE_DISTANCE
}

fn default_worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

fn default_tree_chance() -> f32 {
    TREE_CHANCE
}

fn default_water_level() -> i32 {
    WATER_LEVEL
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            update_distance: default_update_distance(),
            worker_count: default_worker_count(),
            tree_chance: default_tree_chance(),
            water_level: default_water_level(),
        }
    }
}

impl WorldConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Platform config location, e.g. `~/.config/terravox/world.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "terravox")
            .map(|dirs| dirs.config_dir().join("world.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_distance < 1 {
            return Err(ConfigError::Invalid(format!(
                "update_distance must be at least 1, got {}",
                self.update_distance
            )));
        }
        if !(0.0..=1.0).contains(&self.tree_chance) {
            return Err(ConfigError::Invalid(format!(
                "tree_chance must be within [0, 1], got {}",
                self.tree_chance
            )));
        }
        Ok(())
    }
}
