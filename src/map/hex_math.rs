//! Hex grid geometry: axial, cube and pixel coordinates for flat-top and pointy-top hexagons.
//!
//! Everything here is pure. Pixel positions are integers, collision math is `f64`.

use bevy::math::{DVec2, IVec2};
use hexx::Hex;
use serde::{Deserialize, Serialize};

/// Which way the hexagons of a map are laid out.
///
/// Map files store this as a boolean where `true` means flat-top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum HexOrientation {
    /// Two horizontal edges, corners pointing left and right
    #[default]
    Flat,
    /// Corners pointing up and down
    Pointy,
}

impl HexOrientation {
    /// Angle offset of the first vertex, in degrees
    fn vertex_angle_offset(self) -> f64 {
        match self {
            HexOrientation::Flat => 0.0,
            HexOrientation::Pointy => -30.0,
        }
    }

    pub fn is_flat(self) -> bool {
        self == HexOrientation::Flat
    }
}

impl From<bool> for HexOrientation {
    fn from(flat: bool) -> Self {
        if flat {
            HexOrientation::Flat
        } else {
            HexOrientation::Pointy
        }
    }
}

impl From<HexOrientation> for bool {
    fn from(orientation: HexOrientation) -> Self {
        orientation.is_flat()
    }
}

/// Cube coordinate of a hex cell. `x + y + z == 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub const ORIGIN: CubeCoord = CubeCoord { x: 0, y: 0, z: 0 };
}

/// Project an axial coordinate to the pixel center of its hexagon.
///
/// Both components are rounded half-to-even before the offset is added, so a value
/// sitting exactly between two pixels lands on the even one.
pub fn axial_to_pixel(coord: Hex, orientation: HexOrientation, radius: u32, offset: IVec2) -> IVec2 {
    let q = coord.x as f64;
    let r = coord.y as f64;
    let radius = radius as f64;
    let sqrt3 = 3f64.sqrt();

    let (x, y) = match orientation {
        HexOrientation::Flat => (radius * 3.0 / 2.0 * q, radius * sqrt3 * (r + q / 2.0)),
        HexOrientation::Pointy => (radius * sqrt3 * (q + r / 2.0), radius * 3.0 / 2.0 * r),
    };

    IVec2::new(x.round_ties_even() as i32, y.round_ties_even() as i32) + offset
}

/// Cube form of an axial coordinate. Map tiles are range-checked on insertion, so `-q - r`
/// always fits in an `i32` for them.
pub fn axial_to_cube(coord: Hex) -> CubeCoord {
    CubeCoord {
        x: coord.x,
        y: coord.y,
        z: -coord.x - coord.y,
    }
}

/// Number of steps between two cells on the grid.
pub fn cube_distance(a: CubeCoord, b: CubeCoord) -> u32 {
    (a.x.abs_diff(b.x) + a.y.abs_diff(b.y) + a.z.abs_diff(b.z)) / 2
}

/// Corner positions of a hexagon, in a fixed order starting at angle 0 (flat) or -30 (pointy)
/// and increasing by 60 degrees. On a y-down screen that order runs clockwise.
pub fn hex_vertices(center: DVec2, radius: f64, orientation: HexOrientation) -> [DVec2; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 + orientation.vertex_angle_offset()).to_radians();
        DVec2::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

/// Whether `point` lies inside (or on the edge of) the hexagon around `center`.
pub fn point_in_hex(point: DVec2, center: DVec2, radius: f64, orientation: HexOrientation) -> bool {
    // Outside the circumscribed circle can never be inside the hexagon
    if point.distance(center) > radius {
        return false;
    }

    let vertices = hex_vertices(center, radius, orientation);
    (0..vertices.len()).all(|i| {
        let start = vertices[i];
        let end = vertices[(i + 1) % vertices.len()];
        (end - start).perp_dot(point - start) >= 0.0
    })
}
