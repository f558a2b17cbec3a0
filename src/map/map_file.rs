//! Map files (`.ffm`): JSON Lines with a header line followed by one tile record per line.
//!
//! ```text
//! {"orientation": true}
//! {"coordinates": [0, 0], "layers": [{"image": "grass"}], "border": 1, "color": "#40a040"}
//! {"coordinates": [1, 0]}
//! ```
//!
//! Records are checked once here, at the load boundary. Everything downstream works with
//! [`Tile`] and [`TileMap`] values that are already valid.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use hexx::Hex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_LAYER_ALPHA, DEFAULT_TILE_COLOR};
use crate::map::error::MapError;
use crate::map::hex_cell::{HexCell, HexColor};
use crate::map::hex_math::HexOrientation;
use crate::map::tile::{Layer, Tile};
use crate::map::tile_map::{TileMap, TileMapBuilder, check_coordinate};

#[derive(Debug, Error)]
pub enum MapFileError {
    #[error("Error loading map file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Map file is missing orientation and data")]
    MissingData,
    #[error("Malformed map line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("Failed to serialize map: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid tile on map line {line}: {source}")]
    Record { line: usize, source: MapError },
    #[error(transparent)]
    Map(#[from] MapError),
}

/// First line of a map file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHeader {
    pub orientation: HexOrientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<i64>,
}

impl LayerRecord {
    pub fn to_layer(&self) -> Result<Layer, MapError> {
        Layer::new(self.image.clone(), self.alpha.unwrap_or(DEFAULT_LAYER_ALPHA))
    }
}

impl From<&Layer> for LayerRecord {
    fn from(layer: &Layer) -> Self {
        Self {
            image: layer.image.clone(),
            alpha: (layer.alpha != u8::MAX).then_some(layer.alpha as i64),
        }
    }
}

/// One tile as it appears in a map file, with every optional field defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub coordinates: [i32; 2],
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub border: u32,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_TILE_COLOR.to_string()
}

impl Default for TileRecord {
    fn default() -> Self {
        Self {
            coordinates: [0, 0],
            layers: Vec::new(),
            features: Vec::new(),
            border: 0,
            color: default_color(),
        }
    }
}

impl TileRecord {
    pub fn coordinate(&self) -> Hex {
        let [q, r] = self.coordinates;
        Hex::new(q, r)
    }

    /// Build the tile this record describes. Color and layers are checked before the tile exists.
    pub fn to_tile(&self, orientation: HexOrientation) -> Result<Tile, MapError> {
        check_coordinate(self.coordinate())?;
        let color: HexColor = self.color.parse()?;
        let layers = self
            .layers
            .iter()
            .map(LayerRecord::to_layer)
            .collect::<Result<Vec<_>, _>>()?;

        let cell = HexCell::new(self.coordinate(), orientation)
            .with_border(self.border)
            .with_color(color);
        Ok(Tile::new(cell, layers).with_features(self.features.clone()))
    }
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        let coordinate = tile.coordinates();
        Self {
            coordinates: [coordinate.x, coordinate.y],
            layers: tile.layers.iter().map(LayerRecord::from).collect(),
            features: tile.features.clone(),
            border: tile.cell.border,
            color: tile.cell.color.to_string(),
        }
    }
}

/// Parsed contents of a map file, not yet turned into a [`TileMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    pub header: MapHeader,
    /// Each record with its file line number (1-based), for diagnostics
    entries: Vec<(usize, TileRecord)>,
}

impl MapFile {
    pub fn new(orientation: HexOrientation, records: Vec<TileRecord>) -> Self {
        // Header on line 1, records follow
        let entries = (2..).zip(records).collect();
        Self {
            header: MapHeader { orientation },
            entries,
        }
    }

    /// Append a record on the line after the last one
    pub fn push_record(&mut self, record: TileRecord) {
        let line = self.entries.last().map_or(2, |(line, _)| line + 1);
        self.entries.push((line, record));
    }

    pub fn records(&self) -> impl Iterator<Item = &TileRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn orientation(&self) -> HexOrientation {
        self.header.orientation
    }

    pub fn parse(text: &str) -> Result<Self, MapFileError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((header_line, header_text)) = lines.next() else {
            return Err(MapFileError::MissingData);
        };
        let header: MapHeader = serde_json::from_str(header_text).map_err(|source| {
            MapFileError::Json {
                line: header_line,
                source,
            }
        })?;

        let mut entries = Vec::new();
        for (line, record_text) in lines {
            let record: TileRecord = serde_json::from_str(record_text)
                .map_err(|source| MapFileError::Json { line, source })?;
            entries.push((line, record));
        }

        if entries.is_empty() {
            return Err(MapFileError::MissingData);
        }

        Ok(Self {
            header,
            entries,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let map_file = Self::parse(&text)?;
        info!(
            "Loaded map file {} ({} tiles, {:?})",
            path.display(),
            map_file.len(),
            map_file.orientation()
        );
        Ok(map_file)
    }

    /// Serialize back into the map file format
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string(&self.header)?;
        out.push('\n');
        for record in self.records() {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), MapFileError> {
        let path = path.as_ref();
        let text = self.to_jsonl().map_err(MapFileError::Serialize)?;
        fs::write(path, text).map_err(|source| MapFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Convert every record and build a validated map.
    ///
    /// Malformed records fail with their line number before any tile is inserted for them.
    pub fn to_tile_map(&self) -> Result<TileMap, MapFileError> {
        let orientation = self.orientation();
        let mut builder = TileMapBuilder::new(orientation);

        for (line, record) in &self.entries {
            let tile = record
                .to_tile(orientation)
                .map_err(|source| MapFileError::Record {
                    line: *line,
                    source,
                })?;
            builder = builder.add_tile(tile)?;
        }

        Ok(builder.build()?)
    }
}

impl From<&TileMap> for MapFile {
    fn from(map: &TileMap) -> Self {
        MapFile::new(map.orientation(), map.tiles().map(TileRecord::from).collect())
    }
}
