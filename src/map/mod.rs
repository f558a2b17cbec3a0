use bevy::prelude::*;

use crate::assets::AssetScale;
use crate::config::FrontierConfig;
use crate::helpers::viewport::MapViewport;

// Map-related modules
pub mod error;
pub mod hex_cell;
pub mod hex_math;
pub mod map_file;
pub mod tile;
pub mod tile_map;

// Re-exports for convenience
pub use error::MapError;
pub use hex_cell::{HexCell, HexColor};
pub use hex_math::{CubeCoord, HexOrientation};
pub use map_file::{LayerRecord, MapFile, MapFileError, TileRecord};
pub use tile::{Layer, Tile};
pub use tile_map::{TileMap, TileMapBuilder, hexagon_coordinates};

/// Outcome of loading the configured map
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum MapLoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// Plugin that loads the configured map into a [`TileMap`] resource at startup
pub struct HexMapPlugin;

impl Plugin for HexMapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrontierConfig>()
            .init_resource::<MapLoadState>()
            .add_systems(Startup, load_configured_map);
    }
}

/// Load the map named in the config, then size the assets and center the view on it
pub fn load_configured_map(
    mut commands: Commands,
    config: Res<FrontierConfig>,
    mut state: ResMut<MapLoadState>,
) {
    commands.insert_resource(AssetScale::new(config.initial_scale));

    let loaded = MapFile::load(&config.map_path).and_then(|file| file.to_tile_map());
    match loaded {
        Ok(map) => {
            let size = map.get_map_size();
            info!(
                "Map ready: {} tiles, {}x{} cells",
                map.len(),
                size.x,
                size.y
            );
            commands.insert_resource(MapViewport::centered_on(size));
            commands.insert_resource(map);
            *state = MapLoadState::Loaded;
        }
        Err(err) => {
            error!("Failed to load map {}: {err}", config.map_path.display());
            *state = MapLoadState::Failed(err.to_string());
        }
    }
}
