use bevy::math::{IVec2, UVec2};
use bevy::prelude::*;
use hexx::Hex;

use crate::assets::ScaleSource;
use crate::constants::MAX_TILE_SIZE;
use crate::map::TileMap;

/// Direction of a single pan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    fn delta(self) -> IVec2 {
        match self {
            PanDirection::Up => IVec2::new(0, -1),
            PanDirection::Down => IVec2::new(0, 1),
            PanDirection::Left => IVec2::new(-1, 0),
            PanDirection::Right => IVec2::new(1, 0),
        }
    }
}

/// Where the map is drawn on screen and which tile the pointer is over
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapViewport {
    /// Screen position of the map origin
    pub offset: IVec2,
    pub hovered: Option<Hex>,
}

impl MapViewport {
    /// Viewport with the map origin in the middle of a canvas big enough for the largest zoom
    pub fn centered_on(map_size: UVec2) -> Self {
        Self {
            offset: Self::canvas_size(map_size).as_ivec2() / 2,
            hovered: None,
        }
    }

    /// Canvas needed to draw a map of `map_size` cells at the largest tile size
    pub fn canvas_size(map_size: UVec2) -> UVec2 {
        map_size * MAX_TILE_SIZE as u32
    }

    /// Move the view. Panning up moves the map origin down the screen.
    pub fn pan(&mut self, direction: PanDirection, step: i32) {
        self.offset -= direction.delta() * step;
    }

    /// Update the hovered tile for a pointer position. Returns whether it changed.
    pub fn hover(&mut self, point: IVec2, map: &TileMap, scale: &impl ScaleSource) -> bool {
        let hovered = map.check_collision(point, self.offset, scale);
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    /// Screen position of a map-space pixel
    pub fn to_screen(&self, map_point: IVec2) -> IVec2 {
        map_point + self.offset
    }

    /// Map-space pixel under a screen position
    pub fn to_map(&self, screen_point: IVec2) -> IVec2 {
        screen_point - self.offset
    }
}
