//! Board module - manages the game grid
//!
//! The board is a 10x24 grid (20 visible rows under a 4-row buffer zone) where
//! each cell is empty or holds the kind of a locked piece fragment.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..23 (top to bottom).
//!
//! Cells change only through [`Board::merge`] and [`Board::clear_completed_lines`]
//! once a board exists.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{cell_color_id, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on separate complete runs in one scan (alternating rows)
pub const MAX_RUNS: usize = (BOARD_HEIGHT as usize + 1) / 2;

/// Color-id view of the whole grid, row-major
pub type ColorGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Result of one line-clear scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    runs: ArrayVec<u8, MAX_RUNS>,
}

impl ClearedLines {
    /// Sizes of each contiguous run that was collapsed, bottom-most first
    pub fn runs(&self) -> &[u8] {
        &self.runs
    }

    /// Total number of rows removed
    pub fn total(&self) -> u32 {
        self.runs.iter().map(|&n| n as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// The game board - 10 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from an ASCII picture.
    ///
    /// Rows are listed top to bottom and aligned to the bottom of the board;
    /// each must be exactly [`BOARD_WIDTH`] characters of `.` (empty) or a
    /// piece letter. Returns `None` for malformed input.
    ///
    /// ```
    /// use blockdrop_core::Board;
    ///
    /// let board = Board::from_ascii(&[
    ///     "....T.....",
    ///     "IIIIIIIII.",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.color_at(0, 23), 1);
    /// assert_eq!(board.color_at(9, 23), 0);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() > BOARD_HEIGHT as usize {
            return None;
        }
        let mut board = Self::new();
        let first_row = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_WIDTH as usize {
                return None;
            }
            let y = first_row + i;
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    c => Some(PieceKind::from_char(c)?),
                };
                board.cells[y * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Color id at (x, y); 0 for empty or out of bounds
    pub fn color_at(&self, x: i8, y: i8) -> u8 {
        self.get(x, y).map_or(0, cell_color_id)
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Whether `piece` may exist where it is: every mark in bounds and on an
    /// empty cell.
    ///
    /// Movement, rotation and spawn checks all go through here.
    pub fn is_placement_valid(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Copy every mark of `piece` into the grid with its kind.
    ///
    /// # Panics
    ///
    /// Panics if a mark lies outside the grid. Callers only merge a piece
    /// that passed [`Board::is_placement_valid`].
    pub fn merge(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            let Some(idx) = Self::index(x, y) else {
                panic!("merge outside the grid at ({}, {}) for {:?}", x, y, piece);
            };
            self.cells[idx] = Some(piece.kind);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every complete row and compact the rows above.
    ///
    /// Scans bottom to top. Adjacent complete rows form one run and are
    /// collapsed together in a single block copy; after a collapse the scan
    /// resumes at the row that now sits directly above the collapsed run, so
    /// separate runs further up are still found.
    pub fn clear_completed_lines(&mut self) -> ClearedLines {
        let mut cleared = ClearedLines::default();
        let mut run_start = 0usize;
        let mut run_len = 0usize;
        let mut y = BOARD_HEIGHT as isize - 1;

        while y >= 0 {
            let row = y as usize;
            if self.is_row_complete(row) {
                if run_len == 0 {
                    run_start = row;
                }
                run_len += 1;
                y -= 1;
                continue;
            }

            if run_len > 0 {
                self.collapse(run_start, run_len);
                cleared.runs.push(run_len as u8);
                // Row `row` now sits at `run_start`; continue just above it.
                y = run_start as isize - 1;
                run_len = 0;
            } else {
                y -= 1;
            }
        }

        if run_len > 0 {
            self.collapse(run_start, run_len);
            cleared.runs.push(run_len as u8);
        }

        cleared
    }

    /// Shift rows `[0, start - n]` down to `[n, start]` and empty the top `n` rows.
    fn collapse(&mut self, start: usize, n: usize) {
        let width = BOARD_WIDTH as usize;
        let kept_rows = start + 1 - n;
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..kept_rows * width, n * width);
        self.cells[..n * width].fill(None);
    }

    /// Write every cell as a color id (0 = empty)
    pub fn write_color_grid(&self, out: &mut ColorGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = cell_color_id(self.cells[start + x]);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Rows as fixture strings, top to bottom (inverse of [`Board::from_ascii`])
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |kind| kind.as_char()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
