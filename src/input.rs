use bevy::math::IVec2;
use bevy::prelude::*;

use crate::assets::{AssetScale, ScaleSource};
use crate::config::FrontierConfig;
use crate::helpers::viewport::{MapViewport, PanDirection};
use crate::map::TileMap;

/// Pointer position in screen pixels
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMoved {
    pub position: IVec2,
}

/// Camera commands bound to keys by the frontend
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportCommand {
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
}

/// Plugin that turns pointer and camera messages into viewport state
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerMoved>()
            .add_message::<ViewportCommand>()
            .init_resource::<MapViewport>()
            .init_resource::<AssetScale>()
            .add_systems(
                Update,
                (apply_viewport_commands, update_hovered_tile).chain(),
            );
    }
}

/// Pan and zoom the view
pub fn apply_viewport_commands(
    mut commands: MessageReader<ViewportCommand>,
    mut viewport: ResMut<MapViewport>,
    mut scale: ResMut<AssetScale>,
    config: Option<Res<FrontierConfig>>,
) {
    let step = config
        .map(|config| config.pan_step)
        .unwrap_or(crate::constants::PAN_STEP);

    for command in commands.read() {
        match *command {
            ViewportCommand::Pan(direction) => viewport.pan(direction, step),
            ViewportCommand::ZoomIn => {
                if scale.scale_up() {
                    info!("Zoomed in to scale {}", scale.scale());
                }
            }
            ViewportCommand::ZoomOut => {
                if scale.scale_down() {
                    info!("Zoomed out to scale {}", scale.scale());
                }
            }
        }
    }
}

/// Track which tile sits under the latest pointer position
pub fn update_hovered_tile(
    mut moves: MessageReader<PointerMoved>,
    mut viewport: ResMut<MapViewport>,
    scale: Res<AssetScale>,
    map: Option<Res<TileMap>>,
) {
    let Some(last) = moves.read().last() else {
        return;
    };
    let Some(map) = map else {
        return;
    };

    if viewport.hover(last.position, &map, &*scale) {
        debug!("Hovered tile: {:?}", viewport.hovered);
    }
}
