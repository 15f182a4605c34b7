//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic attached, so they can be used
//! from the board engine, the session controller, and any presentation layer.
//!
//! # Board Dimensions
//!
//! The board is a square grid of side N, addressed by a linear index:
//!
//! - **Index**: `p = x + y * N`, with `0 <= p < N * N`
//! - **x**: column, 0 at the left edge
//! - **y**: row, 0 at the top edge (gravity pulls toward larger `y`)
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 6 | Side length of the reference board |
//! | `DEFAULT_TOKEN_KINDS` | 6 | Alphabet size of the reference board |
//! | `MIN_TOKEN_KINDS` | 3 | Smallest alphabet that can be filled match-free |
//! | `MIN_RUN` | 3 | Shortest line of identical tokens that counts as a match |
//! | `DEFAULT_MOVES` | 35 | Swaps granted per game |
//! | `MATCH_POINTS` | 10 | Points per clear, multiplied by the streak |
//!
//! # Examples
//!
//! ```
//! use star_crush_types::{Token, DEFAULT_BOARD_WIDTH};
//!
//! let token = Token::from_char('c').unwrap();
//! assert_eq!(token, Token::new(2));
//! assert_eq!(token.as_char(), 'C');
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Board side length of the reference game (6x6)
pub const DEFAULT_BOARD_WIDTH: usize = 6;

/// Number of distinct tokens in the reference game
pub const DEFAULT_TOKEN_KINDS: u8 = 6;

/// Smallest alphabet for which a match-free fill always exists
pub const MIN_TOKEN_KINDS: u8 = 3;

/// Largest alphabet expressible in the letter notation (`A`..=`Z`)
pub const MAX_TOKEN_KINDS: u8 = 26;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Moves granted at the start of a game
pub const DEFAULT_MOVES: u32 = 35;

/// Base points for a single clear
pub const MATCH_POINTS: u32 = 10;

/// Linear cell address, `x + y * width`
pub type CellIndex = usize;

/// A symbol drawn from the board's alphabet.
///
/// Tokens only carry identity; there is no ordering between kinds beyond the
/// index used to name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(u8);

impl Token {
    pub const fn new(kind: u8) -> Self {
        Self(kind)
    }

    /// Alphabet index of this token
    pub const fn kind(self) -> u8 {
        self.0
    }

    /// Parse token from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use star_crush_types::Token;
    ///
    /// assert_eq!(Token::from_char('A'), Some(Token::new(0)));
    /// assert_eq!(Token::from_char('b'), Some(Token::new(1)));
    /// assert_eq!(Token::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u8 - b'A'))
        } else {
            None
        }
    }

    /// Uppercase letter for this token, `?` past `Z`
    pub fn as_char(self) -> char {
        if self.0 < MAX_TOKEN_KINDS {
            (b'A' + self.0) as char
        } else {
            '?'
        }
    }
}

/// An occupied cell as seen by a renderer.
///
/// This is the only board data a presentation layer needs: where the token
/// is, which token it is, and whether it is part of a just-detected run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellView {
    pub position: CellIndex,
    pub token: Token,
    pub matched: bool,
}
