use std::collections::HashMap;

use bevy::math::{IVec2, UVec2};
use bevy::prelude::*;
use hexx::Hex;

use crate::assets::ScaleSource;
use crate::constants::MAX_MAP_RADIUS;
use crate::map::error::MapError;
use crate::map::hex_math::{self, CubeCoord, HexOrientation};
use crate::map::tile::Tile;

/// All tiles of a map, keyed by axial coordinate.
///
/// Built once through [`TileMapBuilder`] or [`TileMap::from_tiles`]; the shape never changes
/// afterwards. Iteration follows insertion order.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    orientation: HexOrientation,
    tiles: Vec<Tile>,
    index: HashMap<Hex, usize>,
}

/// Collects tiles for a [`TileMap`], rejecting duplicate coordinates as they arrive.
#[derive(Debug)]
pub struct TileMapBuilder {
    map: TileMap,
}

impl TileMapBuilder {
    pub fn new(orientation: HexOrientation) -> Self {
        Self {
            map: TileMap {
                orientation,
                tiles: Vec::new(),
                index: HashMap::new(),
            },
        }
    }

    /// Insert a tile, stamping it with the map orientation.
    ///
    /// An error consumes the builder; a rejected map cannot be built.
    pub fn add_tile(mut self, mut tile: Tile) -> Result<Self, MapError> {
        let coordinate = tile.coordinates();
        check_coordinate(coordinate)?;
        if self.map.index.contains_key(&coordinate) {
            return Err(MapError::DuplicateTile { coordinate });
        }
        tile.cell.orientation = self.map.orientation;
        self.map.index.insert(coordinate, self.map.tiles.len());
        self.map.tiles.push(tile);
        Ok(self)
    }

    /// Validate and hand out the finished map
    pub fn build(self) -> Result<TileMap, MapError> {
        self.map.validate()?;
        debug!(
            "Built tile map with {} tiles (radius {})",
            self.map.len(),
            self.map.radius()
        );
        Ok(self.map)
    }
}

impl TileMap {
    /// Insert every tile, then check the grid has no holes.
    ///
    /// Fails on the first duplicate coordinate, before validation runs. Nothing is
    /// returned unless the whole map is valid.
    pub fn from_tiles(
        orientation: HexOrientation,
        tiles: impl IntoIterator<Item = Tile>,
    ) -> Result<Self, MapError> {
        tiles
            .into_iter()
            .try_fold(TileMapBuilder::new(orientation), TileMapBuilder::add_tile)?
            .build()
    }

    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coordinate: Hex) -> bool {
        self.index.contains_key(&coordinate)
    }

    pub fn get_tile(&self, coordinate: Hex) -> Result<&Tile, MapError> {
        self.index
            .get(&coordinate)
            .map(|&i| &self.tiles[i])
            .ok_or(MapError::TileNotFound(coordinate))
    }

    /// Tiles in insertion order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Hex> + '_ {
        self.tiles.iter().map(Tile::coordinates)
    }

    /// Coordinate of the first tile (in insertion order) whose hexagon contains `point`
    pub fn check_collision(
        &self,
        point: IVec2,
        offset: IVec2,
        scale: &impl ScaleSource,
    ) -> Option<Hex> {
        let radius = scale.scale() / 2;
        self.tiles
            .iter()
            .find(|tile| tile.collides(point, radius, offset))
            .map(Tile::coordinates)
    }

    /// Largest distance from the origin of any tile
    pub fn radius(&self) -> u32 {
        self.tiles
            .iter()
            .map(|tile| hex_math::cube_distance(CubeCoord::ORIGIN, tile.cube_coordinates()))
            .max()
            .unwrap_or(0)
    }

    /// Check the map fills the whole hexagon of its radius around the origin.
    ///
    /// Maps are always a filled hexagonal region centered at (0, 0); any other shape is
    /// reported as incomplete.
    pub fn validate(&self) -> Result<(), MapError> {
        let radius = self.radius() as i32;
        // Tiles are unique and all lie within the radius, so a full count means no holes
        if self.len() == hexagon_cell_count(radius) {
            return Ok(());
        }

        let mut missing: Vec<Hex> = hexagon_coordinates(radius)
            .filter(|hex| !self.index.contains_key(hex))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        missing.sort_by_key(|hex| (hex.x, hex.y));
        warn!("Tile map has {} holes within radius {}", missing.len(), radius);
        Err(MapError::IncompleteGrid { missing })
    }

    /// Bounding box of the tile coordinates, in cells
    pub fn get_map_size(&self) -> UVec2 {
        let Some(first) = self.tiles.first().map(Tile::coordinates) else {
            return UVec2::ZERO;
        };

        let (min, max) = self.coordinates().fold((first, first), |(min, max), hex| {
            (
                Hex::new(min.x.min(hex.x), min.y.min(hex.y)),
                Hex::new(max.x.max(hex.x), max.y.max(hex.y)),
            )
        });

        UVec2::new(
            (max.x - min.x + 1) as u32,
            (max.y - min.y + 1) as u32,
        )
    }
}

/// Reject coordinates further than [`MAX_MAP_RADIUS`] steps from the origin
pub fn check_coordinate(coordinate: Hex) -> Result<(), MapError> {
    let q = i64::from(coordinate.x);
    let r = i64::from(coordinate.y);
    let distance = (q.abs() + r.abs() + (q + r).abs()) / 2;
    if distance > i64::from(MAX_MAP_RADIUS) {
        return Err(MapError::CoordinateOutOfRange {
            coordinate,
            max: MAX_MAP_RADIUS,
        });
    }
    Ok(())
}

/// Number of cells in a filled hexagon of the given radius
pub fn hexagon_cell_count(radius: i32) -> usize {
    let radius = radius.max(0) as usize;
    3 * radius * (radius + 1) + 1
}

/// Every axial coordinate within `radius` steps of the origin
pub fn hexagon_coordinates(radius: i32) -> impl Iterator<Item = Hex> {
    (-radius..=radius).flat_map(move |q| {
        let low = (-radius).max(-q - radius);
        let high = radius.min(-q + radius);
        (low..=high).map(move |r| Hex::new(q, r))
    })
}
