use crate::session::{Phase, Session};
use crate::types::{CellIndex, CellView};

/// Everything a renderer or external observer needs after a step.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct SessionSnapshot {
    pub episode_id: u32,
    pub width: usize,
    /// Occupied cells only, in index order
    pub cells: Vec<CellView>,
    pub score: u32,
    pub best_score: u32,
    pub moves_left: u32,
    pub streak: u32,
    pub selected: Option<CellIndex>,
    /// No move in flight
    pub idle: bool,
    /// Step of the move in flight, `Idle` between moves
    pub phase: Phase,
    pub game_over: bool,
}

impl SessionSnapshot {
    /// Whether taps would currently be accepted
    pub fn playable(&self) -> bool {
        self.idle && !self.game_over
    }
}

impl Session {
    /// Fill `out` in place, reusing its cell buffer.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.episode_id = self.episode_id();
        out.width = self.board().width();
        out.cells.clear();
        out.cells.extend(self.board().cells());
        out.score = self.score();
        out.best_score = self.best_score();
        out.moves_left = self.moves_left();
        out.streak = self.streak();
        out.selected = self.selected();
        out.phase = self.phase();
        out.idle = out.phase == Phase::Idle;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
