use hexx::Hex;
use thiserror::Error;

/// Structural and content errors raised while building or querying a tile map
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Tile ({}, {}) already exists", .coordinate.x, .coordinate.y)]
    DuplicateTile { coordinate: Hex },
    #[error(
        "Tile ({}, {}) is more than {max} steps from the origin",
        .coordinate.x,
        .coordinate.y
    )]
    CoordinateOutOfRange { coordinate: Hex, max: i32 },
    #[error("Holes detected: missing coordinates {}", format_coordinates(.missing))]
    IncompleteGrid { missing: Vec<Hex> },
    #[error("Alpha of layer '{image}' must be between 0 and 255, got {alpha}")]
    InvalidAlpha { image: String, alpha: i64 },
    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),
    #[error("No tile at ({}, {})", .0.x, .0.y)]
    TileNotFound(Hex),
}

/// Coordinates listed in error messages before the rest are summarized
const MAX_LISTED_COORDINATES: usize = 16;

fn format_coordinates(coordinates: &[Hex]) -> String {
    let mut listed = coordinates
        .iter()
        .take(MAX_LISTED_COORDINATES)
        .map(|hex| format!("({}, {})", hex.x, hex.y))
        .collect::<Vec<_>>()
        .join(", ");
    if coordinates.len() > MAX_LISTED_COORDINATES {
        listed.push_str(&format!(
            " and {} more",
            coordinates.len() - MAX_LISTED_COORDINATES
        ));
    }
    listed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_missing_list_is_printed_in_full() {
        let err = MapError::IncompleteGrid {
            missing: vec![Hex::new(0, -1), Hex::new(1, -1)],
        };
        assert_eq!(
            err.to_string(),
            "Holes detected: missing coordinates (0, -1), (1, -1)"
        );
    }

    #[test]
    fn test_long_missing_list_is_summarized() {
        let missing: Vec<Hex> = (0..100).map(|q| Hex::new(q, 0)).collect();
        let message = MapError::IncompleteGrid { missing }.to_string();

        assert!(message.contains("(15, 0)"), "{message}");
        assert!(!message.contains("(16, 0)"), "{message}");
        assert!(message.ends_with("and 84 more"), "{message}");
    }
}
