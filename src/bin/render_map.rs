//! Render a map file to a PNG.
//! Run with: cargo run --bin render_map -- assets/maps/city/basic1.ffm --out map.png

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::math::UVec2;
use clap::Parser;
use fantasy_frontier::assets::{AssetScale, ScaleSource, TileImages};
use fantasy_frontier::config::FrontierConfig;
use fantasy_frontier::helpers::viewport::MapViewport;
use fantasy_frontier::map::MapFile;
use fantasy_frontier::rendering::render_map;
use hexx::Hex;

#[derive(Parser, Debug)]
#[command(name = "render_map")]
#[command(about = "Draw every tile of a map into a PNG")]
struct Args {
    /// Map file to render (defaults to the configured map)
    map: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with the layer images (defaults to the configured one)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Tile size in pixels
    #[arg(short, long)]
    scale: Option<u32>,

    /// Highlight the tile at Q,R
    #[arg(long, value_delimiter = ',', num_args = 2)]
    highlight: Option<Vec<i32>>,

    /// Output image
    #[arg(short, long, default_value = "map.png")]
    out: PathBuf,
}

fn run(args: Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => FrontierConfig::load(path).map_err(|err| err.to_string())?,
        None => FrontierConfig::default(),
    };
    let map_path = args.map.unwrap_or(config.map_path);
    let asset_dir = args.assets.unwrap_or(config.asset_dir);
    let scale = AssetScale::new(args.scale.unwrap_or(config.initial_scale));

    let map = MapFile::load(&map_path)
        .and_then(|file| file.to_tile_map())
        .map_err(|err| err.to_string())?;

    // Maps without layers still render as plain hexagons
    let images = if asset_dir.is_dir() {
        TileImages::load_dir(&asset_dir).map_err(|err| err.to_string())?
    } else {
        TileImages::default()
    };

    let highlighted = args
        .highlight
        .as_deref()
        .and_then(|qr| match qr {
            [q, r] => Some(Hex::new(*q, *r)),
            _ => None,
        });

    let map_size = map.get_map_size();
    let viewport = MapViewport::centered_on(map_size);
    let canvas_size = MapViewport::canvas_size(map_size).max(UVec2::splat(scale.scale()));

    let canvas = render_map(&map, &images, &scale, viewport.offset, canvas_size, highlighted)
        .map_err(|err| err.to_string())?;
    canvas
        .save(&args.out)
        .map_err(|err| format!("Failed to write {}: {err}", args.out.display()))?;

    println!(
        "Rendered {} tiles at scale {} to {}",
        map.len(),
        scale.scale(),
        args.out.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
