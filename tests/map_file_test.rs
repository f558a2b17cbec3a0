mod common;

use bevy::math::UVec2;
use common::fixture_path;
use fantasy_frontier::map::{
    HexColor, HexOrientation, MapError, MapFile, MapFileError, TileMap,
};
use hexx::Hex;

fn load(name: &str) -> Result<TileMap, MapFileError> {
    MapFile::load(fixture_path(name))?.to_tile_map()
}

#[test]
fn test_radius_two_fixture_loads() {
    let map = load("radius2.ffm").unwrap();

    assert_eq!(map.orientation(), HexOrientation::Flat);
    assert_eq!(map.len(), 19);
    assert_eq!(map.radius(), 2);
    assert_eq!(map.get_map_size(), UVec2::new(5, 5));
    assert!(map.validate().is_ok());

    let center = map.get_tile(Hex::ZERO).unwrap();
    assert_eq!(center.layers.len(), 2);
    assert_eq!(center.layers[1].alpha, 128);
    assert_eq!(center.features, vec!["tree".to_string()]);
    assert_eq!(center.cell.border, 0);
    assert_eq!(center.cell.color, HexColor::rgba(0x40, 0xa0, 0x40, 0x80));
}

#[test]
fn test_every_loaded_tile_uses_the_map_orientation() {
    let map = load("radius2.ffm").unwrap();
    assert!(
        map.tiles()
            .all(|tile| tile.cell.orientation == HexOrientation::Flat)
    );
}

#[test]
fn test_hole_is_reported_by_coordinate() {
    let err = load("hole.ffm").unwrap_err();
    match err {
        MapFileError::Map(MapError::IncompleteGrid { missing }) => {
            assert_eq!(missing, vec![Hex::new(0, -1)]);
        }
        other => panic!("expected incomplete grid, got {other:?}"),
    }
}

#[test]
fn test_duplicate_coordinate_is_rejected() {
    let err = load("duplicate.ffm").unwrap_err();
    assert!(matches!(
        err,
        MapFileError::Map(MapError::DuplicateTile { coordinate }) if coordinate == Hex::new(1, 0)
    ));
}

#[test]
fn test_bad_color_names_the_line() {
    let err = load("bad_color.ffm").unwrap_err();
    match err {
        MapFileError::Record { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(source, MapError::InvalidColor("green".to_string()));
        }
        other => panic!("expected record error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        MapFile::load(fixture_path("nope.ffm")),
        Err(MapFileError::Io { .. })
    ));
}

#[test]
fn test_written_map_loads_back_identically() {
    let original = MapFile::load(fixture_path("radius2.ffm")).unwrap();
    let map = original.to_tile_map().unwrap();

    let path = std::env::temp_dir().join(format!("frontier_roundtrip_{}.ffm", std::process::id()));
    MapFile::from(&map).write(&path).unwrap();
    let reloaded = MapFile::load(&path).unwrap().to_tile_map().unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.len(), map.len());
    for tile in map.tiles() {
        assert_eq!(reloaded.get_tile(tile.coordinates()).unwrap(), tile);
    }
}
