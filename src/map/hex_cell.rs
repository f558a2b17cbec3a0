use std::fmt;
use std::str::FromStr;

use bevy::color::Color;
use bevy::math::{DVec2, IVec2};
use hexx::Hex;

use crate::map::error::MapError;
use crate::map::hex_math::{self, CubeCoord, HexOrientation};

/// RGBA fill color of a hex cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 4]);

impl HexColor {
    pub const WHITE: HexColor = HexColor([255, 255, 255, 255]);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        HexColor([r, g, b, a])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor::WHITE
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
impl FromStr for HexColor {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidColor(s.to_string()));
        }

        let mut channels = [255u8; 4];
        for (i, channel) in channels.iter_mut().take(digits.len() / 2).enumerate() {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| MapError::InvalidColor(s.to_string()))?;
        }
        Ok(HexColor(channels))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        let [r, g, b, a] = color.0;
        Color::srgba_u8(r, g, b, a)
    }
}

/// Position and look of a single hexagon on the map.
///
/// The orientation is the same for every cell of a map; it is copied in when the map is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCell {
    pub coordinate: Hex,
    pub orientation: HexOrientation,
    pub border: u32,
    pub color: HexColor,
}

impl HexCell {
    pub fn new(coordinate: Hex, orientation: HexOrientation) -> Self {
        Self {
            coordinate,
            orientation,
            border: 0,
            color: HexColor::WHITE,
        }
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_color(mut self, color: HexColor) -> Self {
        self.color = color;
        self
    }

    pub fn q(&self) -> i32 {
        self.coordinate.x
    }

    pub fn r(&self) -> i32 {
        self.coordinate.y
    }

    pub fn cube(&self) -> CubeCoord {
        hex_math::axial_to_cube(self.coordinate)
    }

    /// Pixel center of this cell for the given hex radius
    pub fn pixel_center(&self, radius: u32, offset: IVec2) -> IVec2 {
        hex_math::axial_to_pixel(self.coordinate, self.orientation, radius, offset)
    }

    /// Corners of this cell, in the winding order the collision test expects
    pub fn vertices(&self, radius: u32, offset: IVec2) -> [DVec2; 6] {
        hex_math::hex_vertices(
            self.pixel_center(radius, offset).as_dvec2(),
            radius as f64,
            self.orientation,
        )
    }

    pub fn collides(&self, point: IVec2, radius: u32, offset: IVec2) -> bool {
        hex_math::point_in_hex(
            point.as_dvec2(),
            self.pixel_center(radius, offset).as_dvec2(),
            radius as f64,
            self.orientation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_six_digit_colors_as_opaque() {
        assert_eq!("#ffffff".parse::<HexColor>().unwrap(), HexColor::WHITE);
        assert_eq!(
            "#1a2B3c".parse::<HexColor>().unwrap(),
            HexColor::rgba(0x1a, 0x2b, 0x3c, 255)
        );
        assert_eq!(
            "00ff00".parse::<HexColor>().unwrap(),
            HexColor::rgba(0, 255, 0, 255)
        );
    }

    #[test]
    fn test_parses_eight_digit_colors_with_alpha() {
        assert_eq!(
            "#0000ff80".parse::<HexColor>().unwrap(),
            HexColor::rgba(0, 0, 255, 0x80)
        );
    }

    #[test]
    fn test_rejects_malformed_colors() {
        for bad in ["#fff", "#fffffff", "#gggggg", "", "#", "#12345678a", "#12 456"] {
            assert!(
                matches!(bad.parse::<HexColor>(), Err(MapError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_color_display_roundtrips() {
        for text in ["#ffffff", "#0a0b0c80"] {
            let color: HexColor = text.parse().unwrap();
            assert_eq!(color.to_string(), text);
        }
    }

    #[test]
    fn test_converts_to_bevy_color() {
        let color: Color = HexColor::rgba(255, 0, 0, 255).into();
        let srgba = color.to_srgba();
        assert!((srgba.red - 1.0).abs() < 1e-6);
        assert!(srgba.green.abs() < 1e-6);
        assert!((srgba.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_defaults() {
        let cell = HexCell::new(Hex::new(2, -1), HexOrientation::Pointy);
        assert_eq!(cell.border, 0);
        assert_eq!(cell.color, HexColor::WHITE);
        assert_eq!((cell.q(), cell.r()), (2, -1));
        assert_eq!(cell.cube(), CubeCoord { x: 2, y: -1, z: -1 });
    }

    #[test]
    fn test_cell_collision_follows_offset() {
        let cell = HexCell::new(Hex::ZERO, HexOrientation::Flat);
        let offset = IVec2::new(100, 100);
        assert!(cell.collides(IVec2::new(109, 100), 10, offset));
        assert!(!cell.collides(IVec2::new(9, 0), 10, offset));
        assert!(!cell.collides(IVec2::new(100, 109), 10, offset));
    }
}
