//! Board module - manages the match-3 grid
//!
//! The board is an N x N grid where each cell is either empty or holds a token.
//! Uses a flat vector in row-major order (`x + y * N`).
//! Coordinates: (x, y) where x grows to the right and y grows downward; gravity
//! pulls tokens toward larger y.
//!
//! Match flags are derived data. Every mutating call recomputes them from the
//! current tokens before returning, so [`Board::has_matches`] is never stale.

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::{cell_count, validate_board};
use crate::error::BoardError;
use crate::matches;
use crate::rng::RandomSource;
use crate::types::{CellIndex, CellView, Token, MAX_TOKEN_KINDS};

/// A token resting in a cell, with its transient match flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Piece {
    token: Token,
    matched: bool,
}

/// The game board - `width x width` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    /// Flat vector of cells, row-major order (y * width + x)
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Create a new empty board
    pub fn empty(width: usize) -> Result<Self, BoardError> {
        let len = cell_count(width)?;
        Self::from_tokens(width, vec![None; len])
    }

    /// Fill a fresh board so that no run exists.
    ///
    /// Cells are filled in row-major order. Each cell draws uniformly from the
    /// alphabet minus any token that would complete a run with the two cells
    /// to its left or the two cells above it. With at most two exclusions and
    /// an alphabet of three or more, a choice always exists.
    pub fn generate<R: RandomSource>(
        width: usize,
        kinds: u8,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        validate_board(width, kinds)?;

        let mut tokens: Vec<Option<Token>> = Vec::with_capacity(width * width);
        let mut excluded_total = 0usize;

        for index in 0..width * width {
            let (x, y) = (index % width, index / width);
            let left = (x >= 2)
                .then(|| same_pair(tokens[index - 1], tokens[index - 2]))
                .flatten();
            let above = (y >= 2)
                .then(|| same_pair(tokens[index - width], tokens[index - 2 * width]))
                .flatten();

            let candidates: ArrayVec<Token, { MAX_TOKEN_KINDS as usize }> = (0..kinds)
                .map(Token::new)
                .filter(|token| Some(*token) != left && Some(*token) != above)
                .collect();
            excluded_total += kinds as usize - candidates.len();

            let pick = rng.next_range(candidates.len() as u32) as usize;
            tokens.push(Some(candidates[pick]));
        }

        debug!(width, kinds, excluded_total, "generated board");
        Self::from_tokens(width, tokens)
    }

    /// Build a board from explicit cell contents.
    pub fn from_tokens(width: usize, tokens: Vec<Option<Token>>) -> Result<Self, BoardError> {
        let len = cell_count(width)?;
        if tokens.len() != len {
            return Err(BoardError::LengthMismatch {
                expected: len,
                actual: tokens.len(),
            });
        }

        let mut board = Self {
            width,
            cells: tokens
                .into_iter()
                .map(|token| {
                    token.map(|token| Piece {
                        token,
                        matched: false,
                    })
                })
                .collect(),
        };
        board.refresh_matches();
        Ok(board)
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells (`width * width`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; boards have at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn check(&self, index: CellIndex) -> Result<(), BoardError> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                index,
                len: self.cells.len(),
            })
        }
    }

    /// Calculate flat index from (x, y) coordinates
    /// Returns None if out of bounds
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Option<CellIndex> {
        (x < self.width && y < self.width).then_some(y * self.width + x)
    }

    /// Split a flat index into (x, y)
    pub fn coords(&self, index: CellIndex) -> Result<(usize, usize), BoardError> {
        self.check(index)?;
        Ok((index % self.width, index / self.width))
    }

    /// Get the token at `index`, `None` for an empty cell
    pub fn get(&self, index: CellIndex) -> Result<Option<Token>, BoardError> {
        self.check(index)?;
        Ok(self.cells[index].map(|piece| piece.token))
    }

    /// Whether the cell at `index` is part of a current run
    pub fn is_matched(&self, index: CellIndex) -> Result<bool, BoardError> {
        self.check(index)?;
        Ok(self.cells[index].is_some_and(|piece| piece.matched))
    }

    /// Overwrite a single cell.
    pub fn set(&mut self, index: CellIndex, token: Option<Token>) -> Result<(), BoardError> {
        self.check(index)?;
        self.cells[index] = token.map(|token| Piece {
            token,
            matched: false,
        });
        self.refresh_matches();
        Ok(())
    }

    /// The 4-neighbourhood of `index`, in up/left/right/down order
    pub fn neighbors(&self, index: CellIndex) -> Result<ArrayVec<CellIndex, 4>, BoardError> {
        let (x, y) = self.coords(index)?;
        let mut out = ArrayVec::new();
        if y > 0 {
            out.push(index - self.width);
        }
        if x > 0 {
            out.push(index - 1);
        }
        if x + 1 < self.width {
            out.push(index + 1);
        }
        if y + 1 < self.width {
            out.push(index + self.width);
        }
        Ok(out)
    }

    /// Whether `a` and `b` are 4-neighbours (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, a: CellIndex, b: CellIndex) -> Result<bool, BoardError> {
        let (ax, ay) = self.coords(a)?;
        let (bx, by) = self.coords(b)?;
        Ok(ax.abs_diff(bx) + ay.abs_diff(by) == 1)
    }

    /// Exchange the contents of two cells.
    ///
    /// Adjacency is not checked here: undoing a swap goes through the same call.
    pub fn exchange(&mut self, a: CellIndex, b: CellIndex) -> Result<(), BoardError> {
        self.check(a)?;
        self.check(b)?;
        self.cells.swap(a, b);
        self.refresh_matches();
        Ok(())
    }

    /// Recompute every match flag from the current tokens.
    fn refresh_matches(&mut self) {
        let mut marks = vec![false; self.cells.len()];
        let cells = &self.cells;
        matches::mark_runs(self.width, |i| cells[i].map(|piece| piece.token), &mut marks);
        for (cell, marked) in self.cells.iter_mut().zip(marks) {
            if let Some(piece) = cell {
                piece.matched = marked;
            }
        }
    }

    /// True iff at least one cell is part of a run
    pub fn has_matches(&self) -> bool {
        self.cells.iter().flatten().any(|piece| piece.matched)
    }

    /// Number of cells currently marked as matched
    pub fn matched_count(&self) -> usize {
        self.cells.iter().flatten().filter(|piece| piece.matched).count()
    }

    /// Indices of matched cells in ascending order
    pub fn matched_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some_and(|piece| piece.matched))
            .map(|(index, _)| index)
    }

    /// Empty every matched cell and return how many were removed.
    ///
    /// Without matches this is a no-op returning 0.
    pub fn remove_matches(&mut self) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if cell.is_some_and(|piece| piece.matched) {
                *cell = None;
                removed += 1;
            }
        }
        if removed > 0 {
            self.refresh_matches();
        }
        removed
    }

    /// True iff some token has an empty cell directly beneath it
    pub fn can_collapse(&self) -> bool {
        (self.width..self.cells.len())
            .any(|below| self.cells[below].is_none() && self.cells[below - self.width].is_some())
    }

    /// Apply one gravity step and report whether anything moved.
    ///
    /// Each column is walked from the bottom up; a token sitting above an empty
    /// cell drops one row. Walking upward lets a whole stack shift together
    /// while every token still moves at most once per call.
    pub fn collapse(&mut self) -> bool {
        let width = self.width;
        let mut moved = false;

        for x in 0..width {
            for y in (0..width.saturating_sub(1)).rev() {
                let here = y * width + x;
                let below = here + width;
                if self.cells[here].is_some() && self.cells[below].is_none() {
                    self.cells.swap(here, below);
                    moved = true;
                }
            }
        }

        if moved {
            self.refresh_matches();
        }
        moved
    }

    /// Collapse until settled and return the number of steps taken.
    ///
    /// Never exceeds `width - 1` steps.
    pub fn settle(&mut self) -> usize {
        let mut steps = 0;
        while self.collapse() {
            steps += 1;
        }
        steps
    }

    /// Occupied cells with their position, token and match flag
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.cells.iter().enumerate().filter_map(|(position, cell)| {
            cell.map(|piece| CellView {
                position,
                token: piece.token,
                matched: piece.matched,
            })
        })
    }

    /// Copy of the raw cell contents in index order
    pub fn tokens(&self) -> Vec<Option<Token>> {
        self.cells.iter().map(|cell| cell.map(|piece| piece.token)).collect()
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Tokens of column `x`, top to bottom, skipping empty cells
    pub fn column_tokens(&self, x: usize) -> Vec<Token> {
        (0..self.width)
            .filter_map(|y| self.index_of(x, y))
            .filter_map(|index| self.cells[index].map(|piece| piece.token))
            .collect()
    }
}

fn same_pair(a: Option<Token>, b: Option<Token>) -> Option<Token> {
    if a == b {
        a
    } else {
        None
    }
}

/// Letter grid, one row per line: `.` for empty cells, lowercase for matched.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = match cell {
                    None => '.',
                    Some(piece) if piece.matched => piece.token.as_char().to_ascii_lowercase(),
                    Some(piece) => piece.token.as_char(),
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Parse the letter grid format.
///
/// Rows are separated by `/` or newlines; `A`..`Z` (either case) are tokens and
/// `.` is an empty cell. Whitespace inside a row is ignored.
///
/// ```
/// use star_crush_core::Board;
///
/// let board: Board = "AAB/ABB/BAA".parse().unwrap();
/// assert_eq!(board.width(), 3);
/// assert!(!board.has_matches());
/// ```
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let width = rows.len();

        let mut tokens = Vec::with_capacity(width * width);
        for (row, line) in rows.iter().enumerate() {
            let before = tokens.len();
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                match c {
                    '.' => tokens.push(None),
                    c => match Token::from_char(c) {
                        Some(token) => tokens.push(Some(token)),
                        None => {
                            return Err(BoardError::Parse {
                                row,
                                reason: format!("unexpected character {c:?}"),
                            })
                        }
                    },
                }
            }
            let found = tokens.len() - before;
            if found != width {
                return Err(BoardError::Parse {
                    row,
                    reason: format!("expected {width} cells, found {found}"),
                });
            }
        }

        Self::from_tokens(width, tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn rows(b: &Board) -> String {
        b.to_string().replace('\n', "/")
    }

    #[test]
    fn test_board_index_calculation() {
        let b = Board::empty(6).unwrap();
        assert_eq!(b.index_of(0, 0), Some(0));
        assert_eq!(b.index_of(5, 0), Some(5));
        assert_eq!(b.index_of(0, 1), Some(6));
        assert_eq!(b.index_of(5, 5), Some(35));
        assert_eq!(b.index_of(6, 0), None);
        assert_eq!(b.index_of(0, 6), None);
        assert_eq!(b.coords(14).unwrap(), (2, 2));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut b = Board::empty(3).unwrap();
        assert!(matches!(
            b.get(9),
            Err(BoardError::OutOfBounds { index: 9, len: 9 })
        ));
        assert!(b.exchange(0, 9).is_err());
        assert!(b.is_adjacent(9, 8).is_err());
        assert!(b.set(100, None).is_err());
        assert!(b.neighbors(9).is_err());
    }

    #[test]
    fn test_neighbors_at_corner_edge_and_centre() {
        let b = Board::empty(3).unwrap();
        assert_eq!(b.neighbors(0).unwrap().as_slice(), &[1, 3]);
        assert_eq!(b.neighbors(1).unwrap().as_slice(), &[0, 2, 4]);
        assert_eq!(b.neighbors(4).unwrap().as_slice(), &[1, 3, 5, 7]);
        assert_eq!(b.neighbors(8).unwrap().as_slice(), &[5, 7]);
    }

    #[test]
    fn test_adjacency_does_not_wrap_rows() {
        let b = Board::empty(3).unwrap();
        assert!(b.is_adjacent(0, 1).unwrap());
        assert!(b.is_adjacent(1, 4).unwrap());
        // 2 is the end of row 0, 3 the start of row 1
        assert!(!b.is_adjacent(2, 3).unwrap());
        assert!(!b.is_adjacent(0, 4).unwrap());
        assert!(!b.is_adjacent(4, 4).unwrap());
    }

    #[test]
    fn test_exchange_touches_only_two_cells() {
        let mut b = board("ABC/CAB/BCA");
        let before = b.tokens();
        b.exchange(0, 5).unwrap();
        let after = b.tokens();
        for i in (0..9).filter(|i| *i != 0 && *i != 5) {
            assert_eq!(before[i], after[i]);
        }
        assert_eq!(after[0], before[5]);
        assert_eq!(after[5], before[0]);
        assert_ne!(after[0], after[5]);
    }

    #[test]
    fn test_set_refreshes_matches() {
        let mut b = board("AAB/ABB/BAA");
        assert!(!b.has_matches());
        b.set(2, Token::from_char('A')).unwrap();
        assert!(b.has_matches());
        assert_eq!(b.matched_cells().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(b.is_matched(0).unwrap());
        assert!(!b.is_matched(3).unwrap());
        assert!(matches!(
            b.is_matched(9),
            Err(BoardError::OutOfBounds { index: 9, len: 9 })
        ));
    }

    #[test]
    fn test_collapse_moves_each_token_one_row() {
        let mut b = board("A../.../...");
        assert!(b.can_collapse());
        assert!(b.collapse());
        assert_eq!(rows(&b), ".../A../...");
        assert!(b.collapse());
        assert_eq!(rows(&b), ".../.../A..");
        assert!(!b.can_collapse());
        assert!(!b.collapse());
    }

    #[test]
    fn test_collapse_shifts_stack_together() {
        let mut b = board("A../B../...");
        b.collapse();
        assert_eq!(rows(&b), ".../A../B..");
    }

    #[test]
    fn test_settle_fills_gap_from_above() {
        let mut b = board("AB./C../.DE");
        let steps = b.settle();
        assert_eq!(rows(&b), ".../AB./CDE");
        assert_eq!(steps, 1);
        assert!(!b.can_collapse());
    }

    #[test]
    fn test_display_lowercases_matched() {
        let b = board("AAA/BCB/CBC");
        assert_eq!(b.to_string(), "aaa\nBCB\nCBC");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "AB/A".parse::<Board>(),
            Err(BoardError::Parse { row: 1, .. })
        ));
        assert!(matches!(
            "A1/BB".parse::<Board>(),
            Err(BoardError::Parse { row: 0, .. })
        ));
        assert!("".parse::<Board>().is_err());
    }

    #[test]
    fn test_from_tokens_length_mismatch() {
        assert!(matches!(
            Board::from_tokens(3, vec![None; 8]),
            Err(BoardError::LengthMismatch {
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_overflowing_width_is_rejected() {
        use crate::error::ConfigError;

        let width = 1usize << (usize::BITS / 2);
        assert!(matches!(
            Board::from_tokens(width, Vec::new()),
            Err(BoardError::Config(ConfigError::TooWide { .. }))
        ));
        assert!(matches!(
            Board::empty(usize::MAX),
            Err(BoardError::Config(ConfigError::TooWide { .. }))
        ));
        assert!(matches!(
            Board::generate(width, 6, &mut SimpleRng::new(1)),
            Err(BoardError::Config(ConfigError::TooWide { .. }))
        ));
    }

    #[test]
    fn test_generate_rejects_small_alphabet() {
        let mut rng = SimpleRng::new(1);
        assert!(matches!(
            Board::generate(6, 2, &mut rng),
            Err(BoardError::Config(crate::error::ConfigError::TooFewKinds { .. }))
        ));
    }

    #[test]
    fn test_generate_is_full_and_match_free() {
        let mut rng = SimpleRng::new(42);
        let b = Board::generate(6, 6, &mut rng).unwrap();
        assert_eq!(b.len(), 36);
        assert_eq!(b.occupied_count(), 36);
        assert!(!b.has_matches());
        assert!(b.cells().all(|cell| cell.token.kind() < 6));
    }
}
