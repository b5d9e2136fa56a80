//! Shared types and constants for the blockdrop engine.
//!
//! Everything here is plain data with no dependencies, so the core, the
//! terminal input sampler and any front-end can agree on piece kinds, keys and
//! playfield geometry.
//!
//! # Playfield
//!
//! The grid is [`BOARD_WIDTH`] columns by [`BOARD_HEIGHT`] rows. The top
//! [`BUFFER_HEIGHT`] rows are a hidden buffer zone used for spawning and
//! rotation headroom; renderers should only draw rows
//! `BUFFER_HEIGHT..BOARD_HEIGHT`.
//!
//! - **Width**: 10 columns (x = 0..9, left to right)
//! - **Height**: 24 rows (y = 0..23, top to bottom), 20 of them visible
//! - **Spawn**: origin (3, 0), rotation 0
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_REPEAT_MS` | 100 | Cooldown between repeated manual moves |
//! | `BASE_TICK_MS` | 100 | Base gravity tick |
//! | `SPEED_FACTOR` | 2.0 | Gravity interval = base tick x speed factor |
//! | `TARGET_FPS` | 60 | Suggested driver frame rate |
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Key, KeySnapshot, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_id(), 6);
//! assert_eq!(Rotation::R3.rotate_cw(), Rotation::R0);
//!
//! let keys = KeySnapshot::from_keys(&[Key::Left, Key::Rotate]);
//! assert!(keys.is_down(Key::Left));
//! assert!(!keys.is_down(Key::Right));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Rows shown to the player
pub const VISIBLE_HEIGHT: u8 = 20;

/// Hidden rows above the visible playfield
pub const BUFFER_HEIGHT: u8 = 4;

/// Total board height including the buffer zone
pub const BOARD_HEIGHT: u8 = VISIBLE_HEIGHT + BUFFER_HEIGHT;

/// Spawn origin (x, y) for every new piece
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Minimum time between repeated manual moves while a key is held
pub const MOVE_REPEAT_MS: u32 = 100;

/// Base gravity tick; the fall interval is this times the speed factor
pub const BASE_TICK_MS: u32 = 100;

/// Default gravity speed factor (200ms per row)
pub const SPEED_FACTOR: f32 = 2.0;

/// Frame rate a driver should aim for. The core never paces itself.
pub const TARGET_FPS: u32 = 60;

/// Gravity curve used by the optional leveling rule, in permille of the
/// level-0 fall interval.
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const GRAVITY_CURVE_PERMILLE: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Fall interval never drops below this, whatever the level
pub const FALL_INTERVAL_MIN_MS: u32 = 20;

/// Line clear scoring table for runs of 1..=4 rows at level 0.
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];


/// The seven piece kinds
///
/// Each kind has a fixed color id used on the board and at the renderer
/// boundary:
/// - **I**: 1, cyan
/// - **J**: 2, blue
/// - **L**: 3, orange
/// - **O**: 4, yellow
/// - **S**: 5, green
/// - **T**: 6, magenta
/// - **Z**: 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in color-id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Parse from a single fixture letter (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(PieceKind::I),
            'j' => Some(PieceKind::J),
            'l' => Some(PieceKind::L),
            'o' => Some(PieceKind::O),
            's' => Some(PieceKind::S),
            't' => Some(PieceKind::T),
            'z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase letter used in board fixtures
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Color id in 1..=7 (0 is reserved for empty cells)
    pub fn color_id(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Index into per-kind tables
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// One of the four pre-authored rotation states.
///
/// The cycle is `R0 → R1 → R2 → R3 → R0`; `R0` is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// Advance one step clockwise
    ///
    /// ```
    /// use blockdrop_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R1);
    /// assert_eq!(Rotation::R3.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Rotation for an index, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked fragment of that kind
pub type Cell = Option<PieceKind>;

/// Color id for a cell: 0 for empty, otherwise the kind's id
pub fn cell_color_id(cell: Cell) -> u8 {
    cell.map_or(0, |kind| kind.color_id())
}

/// Game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::Lost => "lost",
        }
    }
}

/// Keys the engine recognizes.
///
/// `Pause` doubles as reset once the game is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Rotate,
    Left,
    Right,
    Down,
    HardDrop,
    Pause,
}

impl Key {
    pub const COUNT: usize = 6;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Rotate,
        Key::Left,
        Key::Right,
        Key::Down,
        Key::HardDrop,
        Key::Pause,
    ];

    pub fn index(&self) -> usize {
        match self {
            Key::Rotate => 0,
            Key::Left => 1,
            Key::Right => 2,
            Key::Down => 3,
            Key::HardDrop => 4,
            Key::Pause => 5,
        }
    }

    /// Parse key from string (case-insensitive, camelCase or snake_case)
    ///
    /// ```
    /// use blockdrop_types::Key;
    ///
    /// assert_eq!(Key::from_str("hardDrop"), Some(Key::HardDrop));
    /// assert_eq!(Key::from_str("hard_drop"), Some(Key::HardDrop));
    /// assert_eq!(Key::from_str("reset"), Some(Key::Pause));
    /// assert_eq!(Key::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "rotate" => Some(Key::Rotate),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "down" => Some(Key::Down),
            "harddrop" => Some(Key::HardDrop),
            "pause" | "reset" => Some(Key::Pause),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Rotate => "rotate",
            Key::Left => "left",
            Key::Right => "right",
            Key::Down => "down",
            Key::HardDrop => "hardDrop",
            Key::Pause => "pause",
        }
    }
}

/// Raw key-down sample for one tick: one bit per [`Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeySnapshot {
    bits: u8,
}

impl KeySnapshot {
    /// Snapshot with every key released
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn from_keys(keys: &[Key]) -> Self {
        let mut snapshot = Self::new();
        for &key in keys {
            snapshot.set(key, true);
        }
        snapshot
    }

    pub fn set(&mut self, key: Key, down: bool) {
        let mask = 1u8 << key.index();
        if down {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    /// Builder-style [`KeySnapshot::set`]
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.bits & (1u8 << key.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}
