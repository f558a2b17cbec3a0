use std::path::PathBuf;

use fantasy_frontier::config::FrontierConfig;

/// Path of a map file under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Default config pointing at a fixture map
#[allow(dead_code)]
pub fn fixture_config(name: &str) -> FrontierConfig {
    FrontierConfig {
        map_path: fixture_path(name),
        ..FrontierConfig::default()
    }
}
