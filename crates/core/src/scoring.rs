//! Scoring module - classic line-clear scoring
//!
//! A clearing event for a contiguous run of `n` rows is worth
//! `LINE_SCORES[n - 1] * (level + 1)`. Separate runs cleared by the same lock
//! are scored separately.

use crate::types::LINE_SCORES;

/// Points for clearing one run of `lines` rows at `level`.
///
/// `0` lines scores nothing; runs longer than 4 rows (only reachable on
/// hand-built boards) score as 4.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = LINE_SCORES[(lines.min(4) - 1) as usize];
    base.saturating_mul(level.saturating_add(1))
}

/// Line counter, point accumulator and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    lines: u32,
    points: u32,
    level: u32,
}

impl Score {
    pub fn new(level: u32) -> Self {
        Self {
            lines: 0,
            points: 0,
            level,
        }
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Record one clearing event of `n` rows and return the points it earned.
    pub fn add_lines(&mut self, n: u32) -> u32 {
        let gained = line_clear_points(n, self.level);
        self.lines = self.lines.saturating_add(n);
        self.points = self.points.saturating_add(gained);
        gained
    }

    /// Raise the level by one
    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// Move the level up to `level`; never lowers it
    pub fn raise_level_to(&mut self, level: u32) -> bool {
        if level > self.level {
            self.level = level;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points_table() {
        assert_eq!(line_clear_points(0, 0), 0);
        assert_eq!(line_clear_points(1, 0), 40);
        assert_eq!(line_clear_points(2, 0), 100);
        assert_eq!(line_clear_points(3, 0), 300);
        assert_eq!(line_clear_points(4, 0), 1200);
    }

    #[test]
    fn test_level_multiplier() {
        assert_eq!(line_clear_points(1, 2), 120);
        assert_eq!(line_clear_points(4, 2), 3600);
        assert_eq!(line_clear_points(2, 9), 1000);
    }

    #[test]
    fn test_oversized_run_scores_as_four() {
        assert_eq!(line_clear_points(6, 0), 1200);
    }

    #[test]
    fn test_huge_level_saturates() {
        assert_eq!(line_clear_points(1, u32::MAX), u32::MAX);

        let mut score = Score::new(u32::MAX);
        assert_eq!(score.add_lines(4), u32::MAX);
        assert_eq!(score.add_lines(1), u32::MAX);
        assert_eq!(score.points(), u32::MAX);
        score.advance_level();
        assert_eq!(score.level(), u32::MAX);
    }

    #[test]
    fn test_add_lines_accumulates() {
        let mut score = Score::default();
        assert_eq!(score.add_lines(2), 100);
        assert_eq!(score.add_lines(1), 40);
        assert_eq!(score.lines(), 3);
        assert_eq!(score.points(), 140);
        assert_eq!(score.level(), 0);
    }

    #[test]
    fn test_add_zero_lines_is_noop() {
        let mut score = Score::new(3);
        assert_eq!(score.add_lines(0), 0);
        assert_eq!(score, Score::new(3));
    }

    #[test]
    fn test_level_changes() {
        let mut score = Score::new(1);
        score.advance_level();
        assert_eq!(score.level(), 2);
        assert!(!score.raise_level_to(1));
        assert!(score.raise_level_to(5));
        assert_eq!(score.level(), 5);
    }
}
