use bevy::math::IVec2;
use hexx::Hex;

use crate::assets::ScaleSource;
use crate::map::error::MapError;
use crate::map::hex_cell::HexCell;
use crate::map::hex_math::CubeCoord;

/// One image drawn on a tile, with its own transparency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub image: String,
    pub alpha: u8,
}

impl Layer {
    /// Create a layer, rejecting alpha values outside 0..=255
    pub fn new(image: impl Into<String>, alpha: i64) -> Result<Self, MapError> {
        let image = image.into();
        match u8::try_from(alpha) {
            Ok(alpha) => Ok(Self { image, alpha }),
            Err(_) => Err(MapError::InvalidAlpha { image, alpha }),
        }
    }

    pub fn opaque(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            alpha: u8::MAX,
        }
    }
}

/// A hex cell together with the image layers drawn on it.
///
/// Geometry that depends on the current zoom level is computed on demand from a
/// [`ScaleSource`]; the tile itself never stores a scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub cell: HexCell,
    /// Bottom layer first
    pub layers: Vec<Layer>,
    /// Free-form feature tags carried over from the map file
    pub features: Vec<String>,
}

impl Tile {
    pub fn new(cell: HexCell, layers: Vec<Layer>) -> Self {
        Self {
            cell,
            layers,
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn coordinates(&self) -> Hex {
        self.cell.coordinate
    }

    pub fn cube_coordinates(&self) -> CubeCoord {
        self.cell.cube()
    }

    /// Hex radius in pixels: half the current scale
    pub fn radius(&self, scale: &impl ScaleSource) -> u32 {
        scale.scale() / 2
    }

    /// Pixel center relative to the map origin
    pub fn center(&self, scale: &impl ScaleSource) -> IVec2 {
        self.cell.pixel_center(self.radius(scale), IVec2::ZERO)
    }

    /// Whether `point` falls inside this tile's hexagon drawn with `radius` at `offset`
    pub fn collides(&self, point: IVec2, radius: u32, offset: IVec2) -> bool {
        self.cell.collides(point, radius, offset)
    }
}
