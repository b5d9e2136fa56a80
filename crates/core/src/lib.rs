//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and no I/O: no clock, no terminal, no
//! files. A driver samples keys, measures elapsed time and calls
//! [`GameState::tick`]; renderers read [`GameState::snapshot`].
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven kinds with four pre-authored rotation states each, and live pieces
//! - [`board`]: 10x24 grid with placement validation, merging and line clears
//! - [`scoring`]: classic 40/100/300/1200 scoring with a level multiplier
//! - [`latch`]: just-pressed vs. held key state from raw samples
//! - [`rng`]: seeded piece queues (uniform, 7-bag, scripted)
//! - [`config`]: timings, leveling rule and randomizer choice
//! - [`game_state`]: the Playing/Paused/Lost state machine driven once per tick
//! - [`snapshot`]: copyable state for renderers
//!
//! # Game Rules
//!
//! - Rotation is a table lookup validated in place; there are no wall kicks.
//! - Held left/right/down repeat every `move_repeat_ms`; rotate and hard drop
//!   act once per press.
//! - Gravity moves the piece down every `base_tick_ms * speed_factor`. A
//!   failed gravity step locks the piece.
//! - Hard drop only moves the piece; it locks on the next gravity step.
//! - A piece that cannot spawn ends the game. Pause resets a lost game.
//!
//! # Example
//!
//! ```
//! use blockdrop_core::{GameConfig, GameState, PieceQueue};
//! use blockdrop_core::types::{GameStatus, Key, KeySnapshot, PieceKind};
//!
//! let queue = PieceQueue::scripted(vec![PieceKind::O]).unwrap();
//! let mut game = GameState::with_queue(GameConfig::default(), queue);
//!
//! // Hard drop, then let gravity lock the piece.
//! game.tick(KeySnapshot::from_keys(&[Key::HardDrop]), 16);
//! let event = game.tick(KeySnapshot::new(), 200).expect("locked");
//! assert_eq!(event.lines_cleared, 0);
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.board().color_at(4, 23), PieceKind::O.color_id());
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod latch;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedLines, ColorGrid};
pub use config::{ConfigError, GameConfig, MAX_START_LEVEL};
pub use game_state::{GameState, LockEvent};
pub use latch::{InputLatch, KeyState};
pub use pieces::{shape_of, Direction, PieceShape, Tetromino};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::{line_clear_points, Score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
