//! Game constants and configuration values
//!
//! This module centralizes the numeric defaults used by the map, asset and viewport code.

// ============================================================================
// ASSET SCALE
// ============================================================================

/// Smallest linear tile size (pixels) the asset scale can shrink to
pub const MIN_SCALE: u32 = 20;

/// Largest linear tile size (pixels) the asset scale can grow to
pub const MAX_SCALE: u32 = 400;

/// Tile size used when nothing else is configured
pub const DEFAULT_SCALE: u32 = 50;

/// Amount a single zoom step changes the scale by
pub const SCALE_STEP: u32 = 5;

// ============================================================================
// VIEWPORT
// ============================================================================

/// Upper bound on tile size used to size the drawing canvas
pub const MAX_TILE_SIZE: i32 = 100;

/// Pixels the viewport moves per pan command
pub const PAN_STEP: i32 = 10;

// ============================================================================
// MAP FILES
// ============================================================================

/// Map loaded when no path is configured
pub const DEFAULT_MAP_PATH: &str = "assets/maps/city/basic1.ffm";

/// Directory scanned for tile images when no path is configured
pub const DEFAULT_ASSET_DIR: &str = "assets/images";

/// Furthest a tile may sit from the origin, in steps
pub const MAX_MAP_RADIUS: i32 = 1024;

/// Fill color of a tile record without an explicit color
pub const DEFAULT_TILE_COLOR: &str = "#ffffff";

/// Alpha of a layer record without an explicit alpha
pub const DEFAULT_LAYER_ALPHA: i64 = 255;
