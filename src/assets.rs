//! Tile images and the zoom level they are drawn at
//!
//! [`AssetScale`] tracks the current linear tile size in pixels. [`TileImages`] holds the
//! source images named by tile layers and hands them out resized and masked to a hexagon.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;

use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SCALE_STEP};
use crate::map::hex_math::HexOrientation;
use crate::rendering::hex_mask;

/// Anything that knows the current tile size.
///
/// The map only ever reads the scale; changing it is up to whoever owns the source.
pub trait ScaleSource {
    fn scale(&self) -> u32;
    fn min_scale(&self) -> u32;
    fn max_scale(&self) -> u32;
}

/// Current tile size in pixels, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`]
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetScale {
    scale: u32,
}

impl Default for AssetScale {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl AssetScale {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Set the scale, clamped to the bounds. Returns whether it changed.
    pub fn set_scale(&mut self, scale: u32) -> bool {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        if scale == self.scale {
            return false;
        }
        debug!("Asset scale {} -> {}", self.scale, scale);
        self.scale = scale;
        true
    }

    pub fn scale_up(&mut self) -> bool {
        self.set_scale(self.scale.saturating_add(SCALE_STEP))
    }

    pub fn scale_down(&mut self) -> bool {
        self.set_scale(self.scale.saturating_sub(SCALE_STEP))
    }
}

impl ScaleSource for AssetScale {
    fn scale(&self) -> u32 {
        self.scale
    }

    fn min_scale(&self) -> u32 {
        MIN_SCALE
    }

    fn max_scale(&self) -> u32 {
        MAX_SCALE
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Image {0} does not exist")]
    UnknownImage(String),
    #[error("Failed to read asset directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Source images for tile layers, keyed by the name used in map files
#[derive(Resource, Debug, Default, Clone)]
pub struct TileImages {
    images: HashMap<String, RgbaImage>,
}

impl TileImages {
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), image);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load every `.png` in `dir`, named after the file stem
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let io_error = |source| AssetError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut images = Self::default();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_png {
                continue;
            }

            let image = image::open(&path)
                .map_err(|source| AssetError::Decode {
                    path: path.clone(),
                    source,
                })?
                .to_rgba8();
            images.insert(name, image);
        }

        info!("Loaded {} tile images from {}", images.len(), dir.display());
        Ok(images)
    }

    /// The named image resized to `scale`×`scale` with everything outside the hexagon cleared
    pub fn scaled(
        &self,
        name: &str,
        scale: u32,
        orientation: HexOrientation,
    ) -> Result<RgbaImage, AssetError> {
        let source = self
            .images
            .get(name)
            .ok_or_else(|| AssetError::UnknownImage(name.to_string()))?;

        let mut scaled = if source.dimensions() == (scale, scale) {
            source.clone()
        } else {
            imageops::resize(source, scale, scale, FilterType::Triangle)
        };
        hex_mask(&mut scaled, orientation);
        Ok(scaled)
    }
}
