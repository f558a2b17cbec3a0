//! Inspect a map file or find the tile under a screen position.
//! Run with: cargo run -- inspect assets/maps/city/basic1.ffm

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::math::IVec2;
use bevy::prelude::*;
use clap::{Parser, Subcommand};
use fantasy_frontier::assets::{AssetScale, ScaleSource};
use fantasy_frontier::config::FrontierConfig;
use fantasy_frontier::headless_app;
use fantasy_frontier::helpers::viewport::MapViewport;
use fantasy_frontier::input::PointerMoved;
use fantasy_frontier::map::{MapLoadState, TileMap};

#[derive(Parser, Debug)]
#[command(name = "frontier")]
#[command(about = "Load hexagonal tile maps and query them")]
struct Args {
    /// JSON config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a map and print a summary
    Inspect {
        /// Map file to load
        map: PathBuf,
    },
    /// Print the tile under a screen position
    Pick {
        /// Map file to load
        map: PathBuf,
        #[arg(short, long)]
        x: i32,
        #[arg(short, long)]
        y: i32,
        /// Tile size in pixels
        #[arg(short, long)]
        scale: Option<u32>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match FrontierConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => FrontierConfig::default(),
    };

    let (map_path, pick) = match args.command {
        Command::Inspect { map } => (map, None),
        Command::Pick { map, x, y, scale } => {
            if let Some(scale) = scale {
                config.initial_scale = scale;
            }
            (map, Some(IVec2::new(x, y)))
        }
    };
    config.map_path = map_path;

    let mut app = headless_app(config);
    app.add_plugins(LogPlugin::default());
    app.update();

    if let MapLoadState::Failed(message) = app.world().resource::<MapLoadState>() {
        eprintln!("{message}");
        return ExitCode::FAILURE;
    }

    match pick {
        None => print_summary(app.world()),
        Some(position) => {
            app.world_mut().write_message(PointerMoved { position });
            app.update();
            let viewport = app.world().resource::<MapViewport>();
            match viewport.hovered {
                Some(hex) => println!("({}, {})", hex.x, hex.y),
                None => println!("No tile at ({}, {})", position.x, position.y),
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(world: &World) {
    let map = world.resource::<TileMap>();
    let size = map.get_map_size();
    let scale = world.resource::<AssetScale>();

    println!("Orientation: {:?}", map.orientation());
    println!("Tiles: {}", map.len());
    println!("Radius: {}", map.radius());
    println!("Size: {}x{} cells", size.x, size.y);
    println!("Tile size: {}px", scale.scale());
    println!(
        "Viewport origin: {:?}",
        world.resource::<MapViewport>().offset
    );
}
