//! Move hints - which adjacent swaps would produce a match
//!
//! Works on a scratch copy of the tokens, so the board itself is never
//! touched and no match flags flicker.

use crate::board::Board;
use crate::matches;
use crate::types::CellIndex;

impl Board {
    /// Every adjacent pair `(a, b)` with `a < b` whose exchange creates a run.
    ///
    /// Pairs are listed in ascending order of `a`, right neighbour before the
    /// one below.
    pub fn valid_swaps(&self) -> Vec<(CellIndex, CellIndex)> {
        let width = self.width();
        let mut scratch = self.tokens();
        let mut out = Vec::new();

        for a in 0..scratch.len() {
            let (x, y) = (a % width, a / width);
            let right = (x + 1 < width).then_some(a + 1);
            let down = (y + 1 < width).then_some(a + width);

            for b in [right, down].into_iter().flatten() {
                if scratch[a] == scratch[b] {
                    continue;
                }
                scratch.swap(a, b);
                if matches::has_run(width, |i| scratch[i]) {
                    out.push((a, b));
                }
                scratch.swap(a, b);
            }
        }
        out
    }

    /// Whether at least one adjacent swap would produce a match
    pub fn has_valid_swap(&self) -> bool {
        !self.valid_swaps().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;

    #[test]
    fn test_checkerboard_has_no_valid_swap() {
        let board: Board = "ABA/BAB/ABA".parse().unwrap();
        assert!(board.valid_swaps().is_empty());
        assert!(!board.has_valid_swap());
    }

    #[test]
    fn test_finds_swap_completing_a_row() {
        // Swapping cells 2 and 5 lifts the A into row 0.
        let board: Board = "AAB/CDA/DCD".parse().unwrap();
        let swaps = board.valid_swaps();
        assert!(swaps.contains(&(2, 5)), "swaps: {:?}", swaps);
        for (a, b) in swaps {
            assert!(board.is_adjacent(a, b).unwrap());
            let mut probe = board.clone();
            probe.exchange(a, b).unwrap();
            assert!(probe.has_matches());
        }
    }

    #[test]
    fn test_hint_search_leaves_board_untouched() {
        let board: Board = "AAB/CDA/DCD".parse().unwrap();
        let before = board.clone();
        let _ = board.valid_swaps();
        assert_eq!(board, before);
    }
}
