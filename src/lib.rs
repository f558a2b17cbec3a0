//! Fantasy Frontier - hexagonal tile maps
//!
//! Hex grid geometry, validated tile maps loaded from `.ffm` files, software rendering of
//! tiles and the Bevy plugins that keep a map, its scale and the viewport as resources.

use bevy::app::PluginGroup;
use bevy::prelude::*;

use crate::config::FrontierConfig;
use crate::input::ViewportPlugin;
use crate::map::HexMapPlugin;

pub mod assets;
pub mod config;
pub mod constants;
pub mod helpers;
pub mod input;
pub mod map;
pub mod rendering;

/// Map loading plus viewport input, no window required
pub struct FrontierPlugins;

impl PluginGroup for FrontierPlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(HexMapPlugin)
            .add(ViewportPlugin)
    }
}

/// App with [`MinimalPlugins`] and [`FrontierPlugins`], driven by `config`
pub fn headless_app(config: FrontierConfig) -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(FrontierPlugins);

    app
}

#[cfg(test)]
pub mod test_utils;
