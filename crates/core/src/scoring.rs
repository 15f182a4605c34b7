//! Scoring module - streak scoring for cascades
//!
//! Every clear inside one move scores `match_points * streak`. The streak is 1
//! for the first clear of a move and grows by one with each cascade, so a move
//! that clears three times with the reference 10 points scores 10 + 20 + 30.
//! The number of cells removed does not change the points.

/// First streak value of every move
pub const STREAK_START: u32 = 1;

/// Points for one clear at the given streak
pub fn clear_points(match_points: u32, streak: u32) -> u32 {
    match_points.saturating_mul(streak)
}

/// Total points for a move that cleared `cascades` times
pub fn move_points(match_points: u32, cascades: u32) -> u32 {
    (0..cascades)
        .map(|i| clear_points(match_points, STREAK_START + i))
        .fold(0u32, u32::saturating_add)
}
