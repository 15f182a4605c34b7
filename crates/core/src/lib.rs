//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the match-3 board engine and a session controller on top
//! of it. It has **no dependencies** on rendering, input devices, or I/O
//! beyond optional config loading, which makes it:
//!
//! - **Deterministic**: Same seed produces identical boards and games
//! - **Testable**: Every primitive is a plain synchronous call
//! - **Portable**: Runs headless in any environment
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid, swap, adjacency, match flags, removal and gravity
//! - [`matches`]: Row and column run detection
//! - [`hints`]: Adjacent swaps that would produce a match
//! - [`session`]: Move sequencing with moves, score, streak and best score
//! - [`snapshot`]: Render-facing copy of a session
//! - [`rng`]: Injectable random source with a seeded LCG
//! - [`scoring`]: Streak scoring for cascades
//! - [`config`]: Game rules and TOML loading
//! - [`error`]: Error types
//!
//! # Game Rules
//!
//! - A fresh board never contains a run of three
//! - Only adjacent cells (no diagonals) may be swapped in a move
//! - A swap that makes no run is undone and costs nothing
//! - Runs of three or more in a row or column are removed together
//! - Gravity pulls tokens down one row per step; emptied cells are not refilled
//! - Each cascade within a move multiplies the clear points by a growing streak
//!
//! # Example
//!
//! ```
//! use star_crush_core::{Board, Session, GameConfig};
//!
//! let board: Board = "AAB/CDA/DCD".parse().unwrap();
//! let mut game = Session::with_board(GameConfig::default(), board).unwrap();
//!
//! let outcome = game.play(2, 5).unwrap();
//! assert!(outcome.accepted);
//! assert_eq!(game.score(), 10);
//! assert_eq!(game.board().occupied_count(), 6);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod hints;
pub mod matches;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use star_crush_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{BoardError, ConfigError, SessionError};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{clear_points, move_points};
pub use session::{MoveOutcome, Phase, Session, StepEvent, TapOutcome};
pub use snapshot::SessionSnapshot;
