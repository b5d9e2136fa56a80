//! Plain-data view of a game for renderers and drivers.

use crate::board::ColorGrid;
use crate::types::{GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_HEIGHT};
use crate::Tetromino;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute cells, `(x, y)`
    pub cells: [(i8, i8); 4],
    pub color_id: u8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
            color_id: value.color_id(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Color ids for the whole grid, buffer rows included
    pub board: ColorGrid,
    pub active: ActiveSnapshot,
    pub ghost_y: i8,
    pub status: GameStatus,
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Rows below the buffer zone, top to bottom
    pub fn visible_rows(&self) -> &[[u8; BOARD_WIDTH as usize]] {
        &self.board[BUFFER_HEIGHT as usize..]
    }

    /// Color id a renderer should draw at (x, y): the locked cell if any,
    /// otherwise the active piece's color where it covers the cell.
    pub fn composed_color_at(&self, x: i8, y: i8) -> u8 {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return 0;
        }
        let locked = self.board[y as usize][x as usize];
        if locked != 0 {
            return locked;
        }
        if self.active.cells.contains(&(x, y)) {
            self.active.color_id
        } else {
            0
        }
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: ActiveSnapshot::from(Tetromino::new(PieceKind::I)),
            ghost_y: 0,
            status: GameStatus::Playing,
            points: 0,
            lines: 0,
            level: 0,
            pieces_locked: 0,
        }
    }
}
