use std::path::Path;

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_BOARD_WIDTH, DEFAULT_MOVES, DEFAULT_TOKEN_KINDS, MATCH_POINTS, MAX_TOKEN_KINDS,
    MIN_TOKEN_KINDS,
};

/// Rules of one game, loadable from TOML.
///
/// Missing keys fall back to the reference game (6x6 board, 6 tokens,
/// 35 moves, 10 points per clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length
    pub width: usize,
    /// Alphabet size
    pub kinds: u8,
    /// Moves granted per game
    pub moves: u32,
    /// Points per clear before the streak multiplier
    pub match_points: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            kinds: DEFAULT_TOKEN_KINDS,
            moves: DEFAULT_MOVES,
            match_points: MATCH_POINTS,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_board(self.width, self.kinds)?;
        if self.moves == 0 {
            return Err(ConfigError::ZeroMoves);
        }
        Ok(())
    }
}

/// Number of cells on a `width` x `width` board.
pub(crate) fn cell_count(width: usize) -> Result<usize, ConfigError> {
    if width == 0 {
        return Err(ConfigError::ZeroWidth);
    }
    width
        .checked_mul(width)
        .ok_or(ConfigError::TooWide { width })
}

/// Board-level checks shared by generation and sessions.
pub(crate) fn validate_board(width: usize, kinds: u8) -> Result<(), ConfigError> {
    cell_count(width)?;
    if kinds < MIN_TOKEN_KINDS {
        return Err(ConfigError::TooFewKinds {
            kinds,
            min: MIN_TOKEN_KINDS,
        });
    }
    if kinds > MAX_TOKEN_KINDS {
        return Err(ConfigError::TooManyKinds {
            kinds,
            max: MAX_TOKEN_KINDS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 6);
        assert_eq!(config.kinds, 6);
        assert_eq!(config.moves, 35);
    }

    #[test]
    fn test_rejects_small_alphabet() {
        let config = GameConfig {
            kinds: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewKinds { kinds: 2, min: 3 })
        ));
    }

    #[test]
    fn test_rejects_zero_width_and_zero_moves() {
        let zero_width = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(matches!(zero_width.validate(), Err(ConfigError::ZeroWidth)));

        let zero_moves = GameConfig {
            moves: 0,
            ..GameConfig::default()
        };
        assert!(matches!(zero_moves.validate(), Err(ConfigError::ZeroMoves)));
    }

    #[test]
    fn test_rejects_overflowing_width() {
        let width = 1usize << (usize::BITS / 2);
        let config = GameConfig {
            width,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooWide { width: w }) if w == width
        ));
        assert!(matches!(
            cell_count(usize::MAX),
            Err(ConfigError::TooWide { .. })
        ));
        assert_eq!(cell_count(width - 1).unwrap(), (width - 1) * (width - 1));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml("width = 8\nkinds = 4\n").unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.kinds, 4);
        assert_eq!(config.moves, 35);
        assert_eq!(config.match_points, 10);
    }

    #[test]
    fn test_invalid_toml_values_are_rejected() {
        let err = GameConfig::from_toml("kinds = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::TooFewKinds { .. }));

        let err = GameConfig::from_toml("width = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/star-crush.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
