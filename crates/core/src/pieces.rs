//! Pieces module - piece catalog and live piece instances
//!
//! Every kind carries four pre-authored rotation states. Rotating is a table
//! lookup, never a geometric transform, so there is no rotation-center
//! ambiguity and no kick search.
//!
//! Shapes are stored as the four marked cells of the piece's local matrix,
//! `(dx, dy)` with `dx` the column and `dy` the row, in row-major order.

use crate::types::{PieceKind, Rotation, SPAWN_POSITION};

/// Offset of a single mark relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mark offsets from the piece origin
pub type PieceShape = [MinoOffset; 4];

/// Rotation tables indexed by `[kind.index()][rotation.index()]`
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O: the same 2x2 block in all four states
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
];

/// Get the shape for a piece kind and rotation
pub fn shape_of(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Movement directions accepted by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Origin delta `(dx, dy)` for one step
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new piece at the spawn position in rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Shape for the current rotation
    pub fn shape(&self) -> &'static PieceShape {
        shape_of(self.kind, self.rotation)
    }

    /// Absolute board cells `(x, y)` the piece covers
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece shifted by one step
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same piece one rotation state further, at the same origin
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }
}
