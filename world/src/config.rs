//! Board configuration documents and the errors raised while loading them.

use ring_board_core::{BoardConfig, CellType, GridPosition};
use thiserror::Error;

/// Configuration schema version understood by this crate.
pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

const REFERENCE_BOARD: &str = include_str!("../assets/reference_board.toml");

/// Reasons a board configuration is refused.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The document is not valid TOML or does not match the schema.
    #[error("failed to parse board configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The document declares a schema version this crate does not understand.
    #[error("unsupported board configuration version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version declared by the document.
        found: u32,
        /// Version understood by this crate.
        expected: u32,
    },
    /// The board cannot hold an inner ring.
    #[error("board size {size} is too small; at least {minimum} cells per side are required")]
    BoardTooSmall {
        /// Requested board size.
        size: u32,
        /// Smallest supported board size.
        minimum: u32,
    },
    /// A special cell lies outside the board.
    #[error("{cell_type:?} cell at {position} lies outside the {size}x{size} board")]
    OutOfBounds {
        /// Offending position.
        position: GridPosition,
        /// Type configured for the position.
        cell_type: CellType,
        /// Board size the position was checked against.
        size: u32,
    },
    /// A special cell lies inside the board but off the track.
    #[error("{cell_type:?} cell at {position} is not on the track")]
    OffTrack {
        /// Offending position.
        position: GridPosition,
        /// Type configured for the position.
        cell_type: CellType,
    },
    /// The configured start cell is not on the track.
    #[error("start cell {position} is not on the track")]
    StartOffTrack {
        /// Offending position.
        position: GridPosition,
    },
}

/// Parses a TOML board configuration and checks its schema version.
///
/// Geometry and cell placement are validated when the configuration is
/// turned into a topology.
pub fn parse_config(contents: &str) -> Result<BoardConfig, ConfigurationError> {
    let config: BoardConfig = toml::from_str(contents)?;
    if config.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigurationError::UnsupportedVersion {
            found: config.version,
            expected: SUPPORTED_CONFIG_VERSION,
        });
    }
    Ok(config)
}

/// Reference 19x19 board shipped with the crate.
pub fn reference_config() -> Result<BoardConfig, ConfigurationError> {
    parse_config(REFERENCE_BOARD)
}
