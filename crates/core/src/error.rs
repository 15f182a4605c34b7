use std::path::PathBuf;

use crate::types::CellIndex;

/// Errors raised while building or validating a [`GameConfig`](crate::GameConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board width must be at least 1")]
    ZeroWidth,

    #[error("board width {width} is too large, its cell count overflows")]
    TooWide { width: usize },

    #[error("alphabet of {kinds} tokens is too small, need at least {min}")]
    TooFewKinds { kinds: u8, min: u8 },

    #[error("alphabet of {kinds} tokens is too large, at most {max} are supported")]
    TooManyKinds { kinds: u8, max: u8 },

    #[error("a game needs at least one move")]
    ZeroMoves,

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Precondition violations on board operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("cell index {index} out of range for board of {len} cells")]
    OutOfBounds { index: CellIndex, len: usize },

    #[error("expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid board text at row {row}: {reason}")]
    Parse { row: usize, reason: String },

    #[error("invalid board configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from driving a [`Session`](crate::Session).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: CellIndex, b: CellIndex },

    #[error("a move is already in progress")]
    MoveInProgress,

    #[error("the game is over")]
    GameOver,

    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}
