//! Run detection over a square grid of optional tokens.
//!
//! Every row is scanned left to right and every column top to bottom. A run
//! is a maximal stretch of identical, non-empty tokens; runs of at least
//! [`MIN_RUN`] cells mark all of their cells. A cell covered by both a
//! horizontal and a vertical run is marked once.

use crate::types::{CellIndex, Token, MIN_RUN};

/// Mark every cell that belongs to a run, returning the number of marked cells.
///
/// `marks` is overwritten, not accumulated into.
pub fn mark_runs<F>(width: usize, token_at: F, marks: &mut [bool]) -> usize
where
    F: Fn(CellIndex) -> Option<Token>,
{
    debug_assert_eq!(marks.len(), width * width);
    marks.fill(false);

    for line in 0..width {
        // Row `line`, then column `line`.
        mark_line(width, |i| line * width + i, &token_at, marks);
        mark_line(width, |i| i * width + line, &token_at, marks);
    }

    marks.iter().filter(|marked| **marked).count()
}

/// Whether any run exists, without recording which cells form it.
pub fn has_run<F>(width: usize, token_at: F) -> bool
where
    F: Fn(CellIndex) -> Option<Token>,
{
    (0..width).any(|line| {
        line_has_run(width, |i| line * width + i, &token_at)
            || line_has_run(width, |i| i * width + line, &token_at)
    })
}

fn mark_line<L, F>(width: usize, cell: L, token_at: &F, marks: &mut [bool])
where
    L: Fn(usize) -> CellIndex,
    F: Fn(CellIndex) -> Option<Token>,
{
    let mut run_start = 0;
    let mut run_token: Option<Token> = None;

    // One step past the end flushes the final run.
    for i in 0..=width {
        let token = if i < width { token_at(cell(i)) } else { None };
        if token.is_some() && token == run_token {
            continue;
        }
        if run_token.is_some() && i - run_start >= MIN_RUN {
            for j in run_start..i {
                marks[cell(j)] = true;
            }
        }
        run_start = i;
        run_token = token;
    }
}

fn line_has_run<L, F>(width: usize, cell: L, token_at: &F) -> bool
where
    L: Fn(usize) -> CellIndex,
    F: Fn(CellIndex) -> Option<Token>,
{
    let mut run_len = 0;
    let mut run_token: Option<Token> = None;

    for i in 0..width {
        let token = token_at(cell(i));
        if token.is_some() && token == run_token {
            run_len += 1;
            if run_len >= MIN_RUN {
                return true;
            }
        } else {
            run_len = 1;
            run_token = token;
        }
    }
    false
}
