//! Session module - one game on top of the board engine
//!
//! The board only knows primitives (swap, detect, clear, collapse). A session
//! sequences them for a move the way the game plays it:
//!
//! 1. swap the two cells and spend a move;
//! 2. without a match, swap back and refund the move;
//! 3. otherwise clear, score `match_points * streak`, bump the streak, collapse
//!    one step at a time until settled, and clear again while runs remain.
//!
//! [`Session::advance`] performs exactly one primitive per call so an embedder
//! can pace animation between calls. [`Session::play`] runs a whole move.
//! Neither form knows about time; results are identical either way.

use tracing::{debug, trace};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::SessionError;
use crate::rng::SimpleRng;
use crate::scoring::{clear_points, STREAK_START};
use crate::types::CellIndex;

/// Where the session is inside a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a move
    #[default]
    Idle,
    /// Swap queued, not yet applied
    Swap { a: CellIndex, b: CellIndex },
    /// Swap applied, waiting for the match check
    Check { a: CellIndex, b: CellIndex },
    /// Cells cleared, gravity pending
    Collapse,
}

/// What a single [`Session::advance`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    Swapped { a: CellIndex, b: CellIndex },
    /// No match: swap undone and move refunded
    Reverted { a: CellIndex, b: CellIndex },
    Cleared { cells: usize, points: u32, streak: u32 },
    Collapsed,
    /// Move finished
    Settled,
}

/// Result of a tap on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Selected(CellIndex),
    Deselected,
    /// Busy, over, or not adjacent to the selection
    Ignored,
    MoveStarted { a: CellIndex, b: CellIndex },
}

/// Summary of a complete move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// False when the swap made no match and was reverted
    pub accepted: bool,
    pub cascades: u32,
    pub cleared: usize,
    pub points: u32,
    pub collapse_steps: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    rng: SimpleRng,
    board: Board,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    best_score: u32,
    moves_left: u32,
    streak: u32,
    selected: Option<CellIndex>,
    phase: Phase,
    game_over: bool,
}

impl Session {
    /// Start a game with a freshly generated board
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, SessionError> {
        config.validate()?;
        let mut rng = SimpleRng::new(seed);
        let board = Board::generate(config.width, config.kinds, &mut rng)?;
        Ok(Self::assemble(config, rng, board))
    }

    /// Start a game on a given board; its width overrides `config.width`.
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self, SessionError> {
        let config = GameConfig {
            width: board.width(),
            ..config
        };
        config.validate()?;
        Ok(Self::assemble(config, SimpleRng::default(), board))
    }

    fn assemble(config: GameConfig, rng: SimpleRng, board: Board) -> Self {
        Self {
            config,
            rng,
            board,
            episode_id: 0,
            score: 0,
            best_score: 0,
            moves_left: config.moves,
            streak: STREAK_START,
            selected: None,
            phase: Phase::Idle,
            game_over: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Seed the best score from the embedder's own storage
    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = best;
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn selected(&self) -> Option<CellIndex> {
        self.selected
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True when no move is in flight
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// New board, full moves, zero score. The finished score counts toward the best.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.best_score = self.best_score.max(self.score);
        self.board = Board::generate(self.config.width, self.config.kinds, &mut self.rng)?;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.moves_left = self.config.moves;
        self.streak = STREAK_START;
        self.selected = None;
        self.phase = Phase::Idle;
        self.game_over = false;
        debug!(episode_id = self.episode_id, "session restarted");
        Ok(())
    }

    /// Select, deselect, or complete a swap with a tap on `index`.
    pub fn tap(&mut self, index: CellIndex) -> Result<TapOutcome, SessionError> {
        self.board.coords(index)?;
        if self.game_over || !self.is_idle() {
            return Ok(TapOutcome::Ignored);
        }

        match self.selected {
            Some(selected) if selected == index => {
                self.selected = None;
                Ok(TapOutcome::Deselected)
            }
            None => {
                self.selected = Some(index);
                Ok(TapOutcome::Selected(index))
            }
            Some(selected) => {
                if !self.board.is_adjacent(selected, index)? {
                    return Ok(TapOutcome::Ignored);
                }
                self.begin_move(selected, index)?;
                Ok(TapOutcome::MoveStarted {
                    a: selected,
                    b: index,
                })
            }
        }
    }

    /// Queue a swap of two adjacent cells; drive it with [`Session::advance`].
    pub fn begin_move(&mut self, a: CellIndex, b: CellIndex) -> Result<(), SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        if !self.is_idle() {
            return Err(SessionError::MoveInProgress);
        }
        if !self.board.is_adjacent(a, b)? {
            return Err(SessionError::NotAdjacent { a, b });
        }

        self.selected = None;
        self.streak = STREAK_START;
        self.phase = Phase::Swap { a, b };
        Ok(())
    }

    /// Perform the next primitive of the current move.
    ///
    /// Returns `Ok(None)` when idle.
    pub fn advance(&mut self) -> Result<Option<StepEvent>, SessionError> {
        let event = match self.phase {
            Phase::Idle => return Ok(None),
            Phase::Swap { a, b } => {
                self.board.exchange(a, b)?;
                self.moves_left = self.moves_left.saturating_sub(1);
                self.phase = Phase::Check { a, b };
                debug!(a, b, moves_left = self.moves_left, "swapped");
                StepEvent::Swapped { a, b }
            }
            Phase::Check { a, b } => {
                if self.board.has_matches() {
                    self.clear()
                } else {
                    self.board.exchange(a, b)?;
                    self.moves_left += 1;
                    debug!(a, b, "no match, swap reverted");
                    self.finish_move();
                    StepEvent::Reverted { a, b }
                }
            }
            Phase::Collapse => {
                if self.board.collapse() {
                    trace!("collapse step");
                    StepEvent::Collapsed
                } else if self.board.has_matches() {
                    self.clear()
                } else {
                    self.finish_move();
                    StepEvent::Settled
                }
            }
        };
        Ok(Some(event))
    }

    /// Run a whole move from swap to settle.
    pub fn play(&mut self, a: CellIndex, b: CellIndex) -> Result<MoveOutcome, SessionError> {
        self.begin_move(a, b)?;

        let mut outcome = MoveOutcome::default();
        while let Some(event) = self.advance()? {
            match event {
                StepEvent::Cleared { cells, points, .. } => {
                    outcome.cascades += 1;
                    outcome.cleared += cells;
                    outcome.points += points;
                }
                StepEvent::Collapsed => outcome.collapse_steps += 1,
                StepEvent::Settled => outcome.accepted = true,
                StepEvent::Swapped { .. } | StepEvent::Reverted { .. } => {}
            }
        }
        Ok(outcome)
    }

    fn clear(&mut self) -> StepEvent {
        let streak = self.streak;
        let points = clear_points(self.config.match_points, streak);
        let cells = self.board.remove_matches();
        self.score = self.score.saturating_add(points);
        self.streak += 1;
        self.phase = Phase::Collapse;
        debug!(cells, points, streak, score = self.score, "cleared");
        StepEvent::Cleared {
            cells,
            points,
            streak,
        }
    }

    fn finish_move(&mut self) {
        self.phase = Phase::Idle;
        self.streak = STREAK_START;
        if self.moves_left == 0 {
            self.game_over = true;
            self.best_score = self.best_score.max(self.score);
            debug!(score = self.score, best = self.best_score, "game over");
        }
    }
}
