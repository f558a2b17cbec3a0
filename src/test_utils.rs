//! Testing utilities for Fantasy Frontier
//!
//! Helpers for building tiles, records and maps without going through files.

use hexx::Hex;

use crate::map::hex_cell::HexCell;
use crate::map::hex_math::HexOrientation;
use crate::map::map_file::{LayerRecord, TileRecord};
use crate::map::tile::{Layer, Tile};
use crate::map::tile_map::{TileMap, hexagon_coordinates};

/// Plain tile with no layers
pub fn tile_at(q: i32, r: i32) -> Tile {
    Tile::new(HexCell::new(Hex::new(q, r), HexOrientation::Flat), vec![])
}

/// Every tile of a filled hexagon of the given radius, grass on each
pub fn filled_hexagon_tiles(radius: i32) -> Vec<Tile> {
    hexagon_coordinates(radius)
        .map(|hex| {
            Tile::new(
                HexCell::new(hex, HexOrientation::Flat),
                vec![Layer::opaque("grass")],
            )
        })
        .collect()
}

pub fn filled_hexagon_map(radius: i32, orientation: HexOrientation) -> TileMap {
    TileMap::from_tiles(orientation, filled_hexagon_tiles(radius))
        .expect("a filled hexagon is always a valid map")
}

/// Minimal record at the given coordinate
pub fn record_at(q: i32, r: i32) -> TileRecord {
    TileRecord {
        coordinates: [q, r],
        ..TileRecord::default()
    }
}

pub fn layered_record(q: i32, r: i32, layers: &[(&str, Option<i64>)]) -> TileRecord {
    TileRecord {
        coordinates: [q, r],
        layers: layers
            .iter()
            .map(|(image, alpha)| LayerRecord {
                image: image.to_string(),
                alpha: *alpha,
            })
            .collect(),
        ..TileRecord::default()
    }
}

/// Records covering a filled hexagon of the given radius
pub fn filled_hexagon_records(radius: i32) -> Vec<TileRecord> {
    hexagon_coordinates(radius)
        .map(|hex| record_at(hex.x, hex.y))
        .collect()
}
