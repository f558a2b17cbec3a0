//! Runtime configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the values in
//! [`crate::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DEFAULT_ASSET_DIR, DEFAULT_MAP_PATH, DEFAULT_SCALE, PAN_STEP};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Map file loaded at startup
    pub map_path: PathBuf,
    /// Directory with the tile images named by map layers
    pub asset_dir: PathBuf,
    /// Tile size in pixels when the app starts
    pub initial_scale: u32,
    /// Pixels moved per pan command
    pub pan_step: i32,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            initial_scale: DEFAULT_SCALE,
            pan_step: PAN_STEP,
        }
    }
}

impl FrontierConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
