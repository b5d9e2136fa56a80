//! Game state module - the tick-driven state machine
//!
//! Ties the board, the active piece, the piece queue, scoring, the input
//! latch and the two timing gates together. A driver calls
//! [`GameState::tick`] once per frame with the raw keys that are down and
//! the milliseconds elapsed since the previous tick; nothing in here reads a
//! clock or sleeps.

use arrayvec::ArrayVec;

use crate::board::MAX_RUNS;
use crate::types::*;
use crate::{
    pieces::Direction, snapshot::ActiveSnapshot, Board, GameConfig, GameSnapshot, InputLatch,
    PieceQueue, Score, Tetromino,
};

/// What happened when a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Size of each cleared run, bottom-most first
    pub runs: ArrayVec<u8, MAX_RUNS>,
    pub lines_cleared: u32,
    pub points_gained: u32,
    /// The replacement piece could not spawn
    pub lost: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Tetromino,
    queue: PieceQueue,
    score: Score,
    latch: InputLatch,
    status: GameStatus,
    /// Milliseconds since the last manual move (or since it was reset)
    move_timer_ms: u32,
    /// Milliseconds since the last gravity step
    fall_timer_ms: u32,
    pieces_locked: u32,
}

impl GameState {
    /// Create a new game from `config`, drawing pieces from its randomizer
    pub fn new(config: GameConfig) -> Self {
        let queue = PieceQueue::new(config.randomizer, config.seed);
        Self::with_queue(config, queue)
    }

    /// Create a new game drawing from an explicit queue
    pub fn with_queue(config: GameConfig, queue: PieceQueue) -> Self {
        Self::with_board(config, queue, Board::new())
    }

    /// Create a game on a prepared board. The first piece spawns immediately,
    /// so a board already blocked at the spawn rows starts out `Lost`.
    pub fn with_board(config: GameConfig, mut queue: PieceQueue, board: Board) -> Self {
        let active = Tetromino::new(queue.draw());
        let mut state = Self {
            config,
            board,
            active,
            queue,
            score: Score::new(config.start_level),
            latch: InputLatch::new(),
            status: GameStatus::Playing,
            move_timer_ms: 0,
            fall_timer_ms: 0,
            pieces_locked: 0,
        };
        if !state.board.is_placement_valid(&state.active) {
            state.status = GameStatus::Lost;
        }
        tracing::debug!(kind = active.kind.as_str(), "game started");
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> [(i8, i8); 4] {
        self.active.cells()
    }

    pub fn active_color_id(&self) -> u8 {
        self.active.color_id()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn points(&self) -> u32 {
        self.score.points()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Current gravity interval
    pub fn fall_interval_ms(&self) -> u32 {
        self.config.fall_interval_ms(self.score.level())
    }

    /// Raise the level by one and keep it there
    pub fn advance_level(&mut self) {
        self.score.advance_level();
        tracing::info!(level = self.score.level(), "level advanced");
    }

    /// Row the active piece would come to rest on if hard dropped
    pub fn ghost_y(&self) -> i8 {
        let mut ghost = self.active;
        loop {
            let next = ghost.moved(Direction::Down);
            if !self.board.is_placement_valid(&next) {
                return ghost.y;
            }
            ghost = next;
        }
    }

    /// Try to move the active piece one step.
    ///
    /// For [`Direction::Down`] a `false` return means the piece has landed.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let candidate = self.active.moved(direction);
        if self.board.is_placement_valid(&candidate) {
            self.active = candidate;
            true
        } else {
            false
        }
    }

    /// Advance the rotation state in place. No kicks: a rotation that would
    /// overlap or leave the grid is simply refused.
    pub fn try_rotate(&mut self) -> bool {
        let candidate = self.active.rotated();
        if self.board.is_placement_valid(&candidate) {
            self.active = candidate;
            true
        } else {
            false
        }
    }

    /// Drop the active piece as far as it goes. Returns the rows travelled.
    ///
    /// The piece is not locked here; the next gravity step does that.
    pub fn hard_drop(&mut self) -> u8 {
        let mut distance = 0u8;
        while self.try_move(Direction::Down) {
            distance += 1;
        }
        debug_assert!(distance < BOARD_HEIGHT);
        distance
    }

    /// Merge the active piece, clear lines, score, and spawn the next piece.
    fn lock_piece(&mut self) -> LockEvent {
        let locked = self.active;
        self.board.merge(&locked);
        self.pieces_locked += 1;

        let cleared = self.board.clear_completed_lines();
        let mut points_gained = 0;
        for &run in cleared.runs() {
            points_gained += self.score.add_lines(run as u32);
        }

        if !cleared.is_empty() {
            tracing::debug!(
                runs = ?cleared.runs(),
                lines = cleared.total(),
                points = points_gained,
                "lines cleared"
            );
            let target = self.config.level_for_lines(self.score.lines());
            if self.score.raise_level_to(target) {
                tracing::info!(level = self.score.level(), "level up");
            }
        }

        let lost = !self.spawn_piece();

        LockEvent {
            kind: locked.kind,
            runs: cleared.runs().iter().copied().collect(),
            lines_cleared: cleared.total(),
            points_gained,
            lost,
        }
    }

    /// Replace the active piece with the next one from the queue.
    /// Returns false (and enters `Lost`) when the spawn position is blocked.
    fn spawn_piece(&mut self) -> bool {
        self.active = Tetromino::new(self.queue.draw());
        if self.board.is_placement_valid(&self.active) {
            return true;
        }
        self.status = GameStatus::Lost;
        tracing::info!(
            points = self.score.points(),
            lines = self.score.lines(),
            "spawn blocked, game lost"
        );
        false
    }

    /// Start over: empty board, fresh score, new piece, cleared timers.
    /// The queue restarts from its seed so a reset game replays the same pieces.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = Score::new(self.config.start_level);
        self.queue = self.queue.restarted();
        self.status = GameStatus::Playing;
        self.move_timer_ms = 0;
        self.fall_timer_ms = 0;
        self.pieces_locked = 0;
        self.spawn_piece();
        tracing::info!("game reset");
    }

    /// Advance the game by one frame.
    ///
    /// `keys` is the raw set of keys down right now; `elapsed_ms` is the time
    /// since the previous tick. Returns the lock event when a piece locked.
    pub fn tick(&mut self, keys: KeySnapshot, elapsed_ms: u32) -> Option<LockEvent> {
        self.latch.update(keys);
        self.move_timer_ms = self.move_timer_ms.saturating_add(elapsed_ms);
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);

        if self.latch.just_pressed(Key::Pause) {
            match self.status {
                GameStatus::Lost => self.reset(),
                GameStatus::Playing => {
                    self.status = GameStatus::Paused;
                    tracing::debug!("paused");
                }
                GameStatus::Paused => {
                    self.status = GameStatus::Playing;
                    tracing::debug!("resumed");
                }
            }
        }

        if self.status != GameStatus::Playing {
            return None;
        }

        if self.latch.just_pressed(Key::Rotate) {
            self.try_rotate();
            self.move_timer_ms = 0;
        }

        if self.latch.just_pressed(Key::HardDrop) {
            self.hard_drop();
            self.move_timer_ms = 0;
        }

        if self.move_timer_ms >= self.config.move_repeat_ms {
            for (key, direction) in [
                (Key::Left, Direction::Left),
                (Key::Right, Direction::Right),
                (Key::Down, Direction::Down),
            ] {
                if self.latch.pressed(key) {
                    self.try_move(direction);
                    self.move_timer_ms = 0;
                }
            }
        }

        let mut event = None;
        if self.fall_timer_ms >= self.fall_interval_ms() {
            if !self.try_move(Direction::Down) {
                event = Some(self.lock_piece());
            }
            self.fall_timer_ms = 0;
        }
        event
    }

    /// Fill `out` with the current state (no allocation)
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.ghost_y();
        out.status = self.status;
        out.points = self.score.points();
        out.lines = self.score.lines();
        out.level = self.score.level();
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
