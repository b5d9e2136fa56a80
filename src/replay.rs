//! Headless replay of scripted input.
//!
//! A replay script is JSON:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "randomizer": "seven-bag",
//!   "pieces": ["o", "i"],
//!   "board": ["ZZZZ..ZZZZ"],
//!   "frames": [
//!     { "keys": ["hardDrop"], "elapsed_ms": 16 },
//!     { "keys": [], "elapsed_ms": 200, "repeat": 3 }
//!   ]
//! }
//! ```
//!
//! Every field but `frames` is optional. `pieces` replaces the randomizer with
//! a looping fixed sequence; `board` is a bottom-aligned fixture. Each frame is
//! one tick with those keys down, repeated `repeat` times (default 1).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Board, GameConfig, GameState, LockEvent, PieceQueue, Randomizer};
use crate::types::{Key, KeySnapshot, PieceKind, BUFFER_HEIGHT, TARGET_FPS};

/// Upper bound on the ticks one script may expand to
pub const MAX_REPLAY_TICKS: u64 = 1_000_000;

fn default_elapsed_ms() -> u32 {
    1000 / TARGET_FPS
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_elapsed_ms")]
    pub elapsed_ms: u32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub randomizer: Option<String>,
    #[serde(default)]
    pub pieces: Option<Vec<String>>,
    #[serde(default)]
    pub board: Option<Vec<String>>,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    UnknownKey(String),
    UnknownPiece(String),
    UnknownRandomizer(String),
    EmptyPieces,
    BadBoard,
    TooManyTicks(u64),
}

impl ScriptError {
    pub fn code(&self) -> &'static str {
        match self {
            ScriptError::UnknownKey(_) => "unknown_key",
            ScriptError::UnknownPiece(_) => "unknown_piece",
            ScriptError::UnknownRandomizer(_) => "unknown_randomizer",
            ScriptError::EmptyPieces => "empty_pieces",
            ScriptError::BadBoard => "bad_board",
            ScriptError::TooManyTicks(_) => "too_many_ticks",
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownKey(k) => write!(f, "unknown key name: {:?}", k),
            ScriptError::UnknownPiece(p) => write!(f, "unknown piece letter: {:?}", p),
            ScriptError::UnknownRandomizer(r) => write!(f, "unknown randomizer: {:?}", r),
            ScriptError::EmptyPieces => f.write_str("pieces list must not be empty"),
            ScriptError::BadBoard => {
                f.write_str("board rows must be 10 characters of '.' or piece letters, at most 24 rows")
            }
            ScriptError::TooManyTicks(n) => {
                write!(f, "script expands to {} ticks, limit is {}", n, MAX_REPLAY_TICKS)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// A compiled script: a ready game plus the ticks to feed it
#[derive(Debug, Clone)]
pub struct ReplayPlan {
    pub game: GameState,
    pub ticks: Vec<(KeySnapshot, u32)>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolve names and build the game. Script settings win over `base`.
    pub fn compile(&self, base: GameConfig) -> Result<ReplayPlan, ScriptError> {
        let mut config = base;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(name) = &self.randomizer {
            config.randomizer = Randomizer::from_str(name)
                .ok_or_else(|| ScriptError::UnknownRandomizer(name.clone()))?;
        }

        let queue = match &self.pieces {
            Some(letters) => {
                let kinds = letters
                    .iter()
                    .map(|l| PieceKind::from_str(l).ok_or_else(|| ScriptError::UnknownPiece(l.clone())))
                    .collect::<Result<Vec<_>, _>>()?;
                PieceQueue::scripted(kinds).ok_or(ScriptError::EmptyPieces)?
            }
            None => PieceQueue::new(config.randomizer, config.seed),
        };

        let board = match &self.board {
            Some(rows) => {
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                Board::from_ascii(&rows).ok_or(ScriptError::BadBoard)?
            }
            None => Board::new(),
        };

        let total: u64 = self.frames.iter().map(|f| f.repeat as u64).sum();
        if total > MAX_REPLAY_TICKS {
            return Err(ScriptError::TooManyTicks(total));
        }

        let mut ticks = Vec::with_capacity(total as usize);
        for frame in &self.frames {
            let mut keys = KeySnapshot::new();
            for name in &frame.keys {
                let key = Key::from_str(name).ok_or_else(|| ScriptError::UnknownKey(name.clone()))?;
                keys.set(key, true);
            }
            for _ in 0..frame.repeat {
                ticks.push((keys, frame.elapsed_ms));
            }
        }

        Ok(ReplayPlan {
            game: GameState::with_board(config, queue, board),
            ticks,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockSummary {
    pub tick: usize,
    pub piece: &'static str,
    pub runs: Vec<u8>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSummary {
    pub piece: &'static str,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

/// Final state of a replay, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub status: &'static str,
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub pieces_locked: u32,
    pub ticks: usize,
    pub elapsed_ms: u64,
    pub locks: Vec<LockSummary>,
    pub active: ActiveSummary,
    /// Visible rows, top to bottom, locked cells only
    pub board: Vec<String>,
}

impl ReplayPlan {
    /// Feed every tick and report the end state.
    pub fn run(mut self) -> ReplayReport {
        let mut locks = Vec::new();
        let mut elapsed_ms = 0u64;

        for (i, &(keys, elapsed)) in self.ticks.iter().enumerate() {
            elapsed_ms += elapsed as u64;
            if let Some(event) = self.game.tick(keys, elapsed) {
                tracing::debug!(tick = i, piece = event.kind.as_str(), lost = event.lost, "lock");
                locks.push(summarize(i, &event));
            }
        }

        let active = self.game.active();
        ReplayReport {
            status: self.game.status().as_str(),
            points: self.game.points(),
            lines: self.game.lines(),
            level: self.game.level(),
            pieces_locked: self.game.pieces_locked(),
            ticks: self.ticks.len(),
            elapsed_ms,
            locks,
            active: ActiveSummary {
                piece: active.kind.as_str(),
                rotation: active.rotation.index(),
                x: active.x,
                y: active.y,
            },
            board: self
                .game
                .board()
                .to_ascii()
                .into_iter()
                .skip(BUFFER_HEIGHT as usize)
                .collect(),
        }
    }
}

fn summarize(tick: usize, event: &LockEvent) -> LockSummary {
    LockSummary {
        tick,
        piece: event.kind.as_str(),
        runs: event.runs.to_vec(),
        points: event.points_gained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_default_to_one_tick_at_target_rate() {
        let script = ReplayScript::from_json(r#"{ "frames": [ {} ] }"#).unwrap();
        assert_eq!(
            script.frames[0],
            Frame {
                keys: vec![],
                elapsed_ms: 16,
                repeat: 1
            }
        );
    }

    #[test]
    fn compile_expands_repeats() {
        let script = ReplayScript::from_json(
            r#"{ "pieces": ["t"], "frames": [ { "keys": ["left", "rotate"], "repeat": 3 } ] }"#,
        )
        .unwrap();
        let plan = script.compile(GameConfig::default()).unwrap();
        assert_eq!(plan.ticks.len(), 3);
        assert!(plan.ticks[0].0.is_down(Key::Left));
        assert!(plan.ticks[0].0.is_down(Key::Rotate));
        assert_eq!(plan.game.active().kind, PieceKind::T);
    }

    #[test]
    fn compile_reports_bad_names() {
        let bad_key = ReplayScript::from_json(r#"{ "frames": [ { "keys": ["hold"] } ] }"#).unwrap();
        assert_eq!(
            bad_key.compile(GameConfig::default()).unwrap_err(),
            ScriptError::UnknownKey("hold".into())
        );

        let bad_piece = ReplayScript::from_json(r#"{ "pieces": ["q"], "frames": [] }"#).unwrap();
        assert_eq!(
            bad_piece.compile(GameConfig::default()).unwrap_err().code(),
            "unknown_piece"
        );

        let empty = ReplayScript::from_json(r#"{ "pieces": [], "frames": [] }"#).unwrap();
        assert_eq!(
            empty.compile(GameConfig::default()).unwrap_err(),
            ScriptError::EmptyPieces
        );

        let board = ReplayScript::from_json(r#"{ "board": ["..."], "frames": [] }"#).unwrap();
        assert_eq!(
            board.compile(GameConfig::default()).unwrap_err(),
            ScriptError::BadBoard
        );

        let rnd = ReplayScript::from_json(r#"{ "randomizer": "fair", "frames": [] }"#).unwrap();
        assert_eq!(
            rnd.compile(GameConfig::default()).unwrap_err().code(),
            "unknown_randomizer"
        );
    }

    #[test]
    fn compile_rejects_oversized_repeat() {
        let script =
            ReplayScript::from_json(r#"{ "frames": [ { "repeat": 4000000000 } ] }"#).unwrap();
        let err = script.compile(GameConfig::default()).unwrap_err();
        assert_eq!(err, ScriptError::TooManyTicks(4_000_000_000));
        assert_eq!(err.code(), "too_many_ticks");

        let split = ReplayScript::from_json(
            r#"{ "frames": [ { "repeat": 600000 }, { "keys": ["left"], "repeat": 400001 } ] }"#,
        )
        .unwrap();
        assert_eq!(
            split.compile(GameConfig::default()).unwrap_err(),
            ScriptError::TooManyTicks(MAX_REPLAY_TICKS + 1)
        );

        let at_limit =
            ReplayScript::from_json(r#"{ "pieces": ["o"], "frames": [ { "repeat": 1000000 } ] }"#)
                .unwrap();
        assert_eq!(
            at_limit.compile(GameConfig::default()).unwrap().ticks.len(),
            MAX_REPLAY_TICKS as usize
        );
    }

    #[test]
    fn script_seed_overrides_base() {
        let script = ReplayScript::from_json(r#"{ "seed": 99, "frames": [] }"#).unwrap();
        let plan = script.compile(GameConfig::default()).unwrap();
        assert_eq!(plan.game.config().seed, 99);
    }
}
