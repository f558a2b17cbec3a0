//! Generate a filled hexagonal map with random terrain layers.
//! Run with: cargo run --bin generate_test_map -- --radius 4 --out tests/fixtures/generated.ffm

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fantasy_frontier::map::{
    HexOrientation, LayerRecord, MapFile, TileRecord, hexagon_coordinates,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TERRAIN: [&str; 4] = ["grass", "forest", "hills", "water"];
const FEATURES: [&str; 3] = ["tree", "rock", "ruin"];

#[derive(Parser, Debug)]
#[command(name = "generate_test_map")]
#[command(about = "Write a filled hexagonal map with random terrain")]
struct Args {
    /// Number of rings around the center tile
    #[arg(short, long, default_value = "3")]
    radius: u32,

    /// Use pointy-topped hexagons instead of flat-topped ones
    #[arg(long)]
    pointy: bool,

    /// Output map file
    #[arg(short, long, default_value = "generated.ffm")]
    out: PathBuf,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn random_record(rng: &mut impl Rng, q: i32, r: i32) -> TileRecord {
    let mut layers = vec![LayerRecord {
        image: TERRAIN[rng.random_range(0..TERRAIN.len())].to_string(),
        alpha: None,
    }];
    let mut features = Vec::new();

    // Roughly one tile in four gets a feature on top
    if rng.random_range(0..4) == 0 {
        let feature = FEATURES[rng.random_range(0..FEATURES.len())];
        layers.push(LayerRecord {
            image: feature.to_string(),
            alpha: Some(rng.random_range(128..=255)),
        });
        features.push(feature.to_string());
    }

    TileRecord {
        coordinates: [q, r],
        layers,
        features,
        border: 1,
        color: "#000000".to_string(),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let orientation = if args.pointy {
        HexOrientation::Pointy
    } else {
        HexOrientation::Flat
    };

    let records: Vec<TileRecord> = hexagon_coordinates(args.radius as i32)
        .map(|hex| random_record(&mut rng, hex.x, hex.y))
        .collect();
    let map_file = MapFile::new(orientation, records);

    // Refuse to write anything that would not load back
    if let Err(err) = map_file.to_tile_map() {
        eprintln!("Generated map is invalid: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = map_file.write(&args.out) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} tiles (radius {}, seed {}) to {}",
        map_file.len(),
        args.radius,
        seed,
        args.out.display()
    );
    ExitCode::SUCCESS
}
