//! Software rendering of tiles into `image` buffers
//!
//! Layers are combined with a per-channel maximum, hexagon fills and outlines are blended
//! over whatever is already on the canvas.

use bevy::math::{DVec2, IVec2, UVec2};
use hexx::Hex;
use image::{Rgba, RgbaImage};

use crate::assets::{AssetError, ScaleSource, TileImages};
use crate::map::hex_cell::HexColor;
use crate::map::hex_math::{HexOrientation, point_in_hex};
use crate::map::tile::Tile;
use crate::map::tile_map::TileMap;

/// Fill used to mark the hovered tile
pub const HIGHLIGHT_STYLE: DrawStyle = DrawStyle {
    color: Some(HexColor::rgba(0, 0, 255, 128)),
    border: Some(0),
};

/// Per-call overrides for how a tile's hexagon is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStyle {
    pub color: Option<HexColor>,
    /// 0 fills the hexagon, anything larger draws an outline that wide
    pub border: Option<u32>,
}

fn pixel_center(x: u32, y: u32) -> DVec2 {
    DVec2::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Clear the alpha of every pixel outside the hexagon inscribed in the image
pub fn hex_mask(image: &mut RgbaImage, orientation: HexOrientation) {
    let (width, height) = image.dimensions();
    let center = DVec2::new((width / 2) as f64, (height / 2) as f64);
    let radius = match orientation {
        HexOrientation::Flat => (width / 2) as f64,
        HexOrientation::Pointy => (height / 2) as f64,
    };

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if !point_in_hex(pixel_center(x, y), center, radius, orientation) {
            pixel[3] = 0;
        }
    }
}

/// Stack a tile's layers, bottom first, onto a transparent `scale`×`scale` image.
///
/// Each layer's alpha channel is scaled by the layer alpha before the channels are combined
/// with a per-channel maximum.
pub fn compose_layers(
    tile: &Tile,
    images: &TileImages,
    scale: u32,
) -> Result<RgbaImage, AssetError> {
    let mut canvas = RgbaImage::new(scale, scale);

    for layer in &tile.layers {
        let image = images.scaled(&layer.image, scale, tile.cell.orientation)?;
        for (dst, src) in canvas.pixels_mut().zip(image.pixels()) {
            let alpha = (src[3] as u32 * layer.alpha as u32 / 255) as u8;
            let src = Rgba([src[0], src[1], src[2], alpha]);
            for channel in 0..4 {
                dst[channel] = dst[channel].max(src[channel]);
            }
        }
    }

    Ok(canvas)
}

/// Source-over blend of `src` onto `dst`
fn blend_over(dst: &mut Rgba<u8>, src: HexColor) {
    let [r, g, b, a] = src.0;
    let alpha = a as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }

    let mix = |s: u8, d: u8| {
        ((s as f32 * alpha + d as f32 * dst_alpha * (1.0 - alpha)) / out_alpha).round() as u8
    };
    *dst = Rgba([
        mix(r, dst[0]),
        mix(g, dst[1]),
        mix(b, dst[2]),
        (out_alpha * 255.0).round() as u8,
    ]);
}

/// Draw one tile: its layers centered on the hexagon, then the hexagon itself
pub fn draw_tile(
    canvas: &mut RgbaImage,
    tile: &Tile,
    images: &TileImages,
    scale: &impl ScaleSource,
    offset: IVec2,
    style: DrawStyle,
) -> Result<(), AssetError> {
    let size = scale.scale();
    let radius = size / 2;
    let center = tile.cell.pixel_center(radius, offset);

    if !tile.layers.is_empty() {
        let composed = compose_layers(tile, images, size)?;
        let top_left = center - IVec2::splat(radius as i32);
        for (x, y, src) in composed.enumerate_pixels() {
            let target = top_left + IVec2::new(x as i32, y as i32);
            let Some(dst) = pixel_mut(canvas, target) else {
                continue;
            };
            for channel in 0..4 {
                dst[channel] = dst[channel].max(src[channel]);
            }
        }
    }

    let color = style.color.unwrap_or(tile.cell.color);
    let border = style.border.unwrap_or(tile.cell.border);
    let center = center.as_dvec2();
    let outer = radius as f64;
    let inner = outer - border as f64;

    let min = (center - outer).floor().max(DVec2::ZERO);
    let max = (center + outer).ceil();
    for y in min.y as u32..(max.y.max(0.0) as u32).min(canvas.height()) {
        for x in min.x as u32..(max.x.max(0.0) as u32).min(canvas.width()) {
            let point = pixel_center(x, y);
            if !point_in_hex(point, center, outer, tile.cell.orientation) {
                continue;
            }
            if border > 0 && inner > 0.0 && point_in_hex(point, center, inner, tile.cell.orientation)
            {
                continue;
            }
            blend_over(canvas.get_pixel_mut(x, y), color);
        }
    }

    Ok(())
}

fn pixel_mut(canvas: &mut RgbaImage, position: IVec2) -> Option<&mut Rgba<u8>> {
    let (width, height) = canvas.dimensions();
    if position.x < 0 || position.y < 0 || position.x as u32 >= width || position.y as u32 >= height
    {
        return None;
    }
    Some(canvas.get_pixel_mut(position.x as u32, position.y as u32))
}

/// Render a whole map onto a fresh transparent canvas of `size` pixels
pub fn render_map(
    map: &TileMap,
    images: &TileImages,
    scale: &impl ScaleSource,
    offset: IVec2,
    size: UVec2,
    highlighted: Option<Hex>,
) -> Result<RgbaImage, AssetError> {
    let mut canvas = RgbaImage::new(size.x, size.y);
    for tile in map.tiles() {
        draw_tile(&mut canvas, tile, images, scale, offset, DrawStyle::default())?;
        if highlighted == Some(tile.coordinates()) {
            draw_tile(&mut canvas, tile, images, scale, offset, HIGHLIGHT_STYLE)?;
        }
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetScale;
    use crate::map::hex_cell::HexCell;
    use crate::map::tile::Layer;
    use crate::test_utils::filled_hexagon_map;

    fn solid(color: [u8; 4], size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba(color))
    }

    #[test]
    fn test_mask_clears_corners_only() {
        let mut image = solid([10, 20, 30, 255], 40);
        hex_mask(&mut image, HexOrientation::Pointy);

        assert_eq!(image.get_pixel(20, 20)[3], 255);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(39, 39)[3], 0);
        // Colors are kept, only alpha changes
        assert_eq!(image.get_pixel(0, 0)[0], 10);
    }

    #[test]
    fn test_layers_combine_with_channel_max() {
        let mut images = TileImages::default();
        images.insert("red", solid([200, 0, 0, 255], 20));
        images.insert("blue", solid([0, 0, 150, 255], 20));

        let tile = Tile::new(
            HexCell::new(Hex::ZERO, HexOrientation::Flat),
            vec![Layer::opaque("red"), Layer::new("blue", 51).unwrap()],
        );
        let composed = compose_layers(&tile, &images, 20).unwrap();
        assert_eq!(*composed.get_pixel(10, 10), Rgba([200, 0, 150, 255]));
    }

    #[test]
    fn test_layer_alpha_scales_source_alpha() {
        let mut images = TileImages::default();
        images.insert("blue", solid([0, 0, 150, 255], 20));

        let tile = Tile::new(
            HexCell::new(Hex::ZERO, HexOrientation::Flat),
            vec![Layer::new("blue", 51).unwrap()],
        );
        let composed = compose_layers(&tile, &images, 20).unwrap();
        assert_eq!(composed.get_pixel(10, 10)[3], 51);
    }

    #[test]
    fn test_missing_layer_image_fails() {
        let tile = Tile::new(
            HexCell::new(Hex::ZERO, HexOrientation::Flat),
            vec![Layer::opaque("nowhere")],
        );
        assert!(compose_layers(&tile, &TileImages::default(), 20).is_err());
    }

    #[test]
    fn test_zero_border_fills_hexagon() {
        let map = filled_hexagon_map(0, HexOrientation::Flat);
        let scale = AssetScale::new(40);
        let canvas = render_map(
            &map,
            &TileImages::default(),
            &scale,
            IVec2::new(50, 50),
            UVec2::new(100, 100),
            None,
        )
        .unwrap();

        assert_eq!(*canvas.get_pixel(50, 50), Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_border_draws_outline_only() {
        let mut canvas = RgbaImage::new(100, 100);
        let tile = Tile::new(
            HexCell::new(Hex::ZERO, HexOrientation::Flat)
                .with_border(3)
                .with_color(HexColor::rgba(255, 0, 0, 255)),
            vec![],
        );
        let scale = AssetScale::new(40);
        draw_tile(
            &mut canvas,
            &tile,
            &TileImages::default(),
            &scale,
            IVec2::new(50, 50),
            DrawStyle::default(),
        )
        .unwrap();

        assert_eq!(canvas.get_pixel(50, 50)[3], 0);
        // Just inside the right corner
        assert_eq!(*canvas.get_pixel(68, 50), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_highlight_blends_over_fill() {
        let map = filled_hexagon_map(1, HexOrientation::Pointy);
        let scale = AssetScale::new(40);
        let offset = IVec2::new(100, 100);
        let canvas = render_map(
            &map,
            &TileImages::default(),
            &scale,
            offset,
            UVec2::new(200, 200),
            Some(Hex::ZERO),
        )
        .unwrap();

        let highlighted = canvas.get_pixel(100, 100);
        assert!(highlighted[2] > highlighted[0]);
        assert_eq!(highlighted[3], 255);

        let neighbour = map.get_tile(Hex::new(1, 0)).unwrap().center(&scale) + offset;
        assert_eq!(
            *canvas.get_pixel(neighbour.x as u32, neighbour.y as u32),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn test_layers_are_drawn_under_outline() {
        let mut images = TileImages::default();
        images.insert("green", solid([0, 180, 0, 255], 40));

        let mut canvas = RgbaImage::new(100, 100);
        let tile = Tile::new(
            HexCell::new(Hex::ZERO, HexOrientation::Flat).with_border(2),
            vec![Layer::opaque("green")],
        );
        draw_tile(
            &mut canvas,
            &tile,
            &images,
            &AssetScale::new(40),
            IVec2::new(50, 50),
            DrawStyle::default(),
        )
        .unwrap();

        assert_eq!(*canvas.get_pixel(50, 50), Rgba([0, 180, 0, 255]));
    }
}
