//! Game configuration
//!
//! Defaults come from the constants in `blockdrop-types`. Drivers may layer
//! their own sources on top and call [`GameConfig::validate`] before building
//! a game.

use std::fmt;

use crate::rng::Randomizer;
use crate::types::{
    BASE_TICK_MS, FALL_INTERVAL_MIN_MS, GRAVITY_CURVE_PERMILLE, MOVE_REPEAT_MS, SPEED_FACTOR,
};

/// Highest accepted [`GameConfig::start_level`]
pub const MAX_START_LEVEL: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Cooldown between repeated manual moves while a key is held
    pub move_repeat_ms: u32,
    /// Base gravity tick
    pub base_tick_ms: u32,
    /// Fall interval = `base_tick_ms * speed_factor`
    pub speed_factor: f32,
    /// Level the score starts at
    pub start_level: u32,
    /// Automatic leveling: one level per this many cleared lines. `None` keeps
    /// level and gravity fixed.
    pub lines_per_level: Option<u32>,
    pub randomizer: Randomizer,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_repeat_ms: MOVE_REPEAT_MS,
            base_tick_ms: BASE_TICK_MS,
            speed_factor: SPEED_FACTOR,
            start_level: 0,
            lines_per_level: None,
            randomizer: Randomizer::Uniform,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    ZeroBaseTick,
    InvalidSpeedFactor(f32),
    ZeroLinesPerLevel,
    StartLevelTooHigh(u32),
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroBaseTick => "zero_base_tick",
            ConfigError::InvalidSpeedFactor(_) => "invalid_speed_factor",
            ConfigError::ZeroLinesPerLevel => "zero_lines_per_level",
            ConfigError::StartLevelTooHigh(_) => "start_level_too_high",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroBaseTick => "base tick must be at least 1ms",
            ConfigError::InvalidSpeedFactor(_) => "speed factor must be a positive finite number",
            ConfigError::ZeroLinesPerLevel => "lines per level must be at least 1",
            ConfigError::StartLevelTooHigh(_) => "start level must be at most 999",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeedFactor(v) => write!(f, "{} (got {})", self.message(), v),
            ConfigError::StartLevelTooHigh(v) => write!(f, "{} (got {})", self.message(), v),
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_tick_ms == 0 {
            return Err(ConfigError::ZeroBaseTick);
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ConfigError::InvalidSpeedFactor(self.speed_factor));
        }
        if self.lines_per_level == Some(0) {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.start_level > MAX_START_LEVEL {
            return Err(ConfigError::StartLevelTooHigh(self.start_level));
        }
        Ok(())
    }

    /// Gravity interval at `level`.
    ///
    /// Without a leveling rule this is always `base_tick_ms * speed_factor`.
    /// With one, the level-0 interval is scaled by the gravity curve and
    /// floored at [`FALL_INTERVAL_MIN_MS`].
    pub fn fall_interval_ms(&self, level: u32) -> u32 {
        let base = ((self.base_tick_ms as f32) * self.speed_factor).round().max(1.0) as u32;
        if self.lines_per_level.is_none() {
            return base;
        }
        let idx = (level as usize).min(GRAVITY_CURVE_PERMILLE.len() - 1);
        let scaled = (base as u64 * GRAVITY_CURVE_PERMILLE[idx] as u64 / 1000) as u32;
        scaled.max(FALL_INTERVAL_MIN_MS.min(base))
    }

    /// Level implied by `lines` under the leveling rule
    pub fn level_for_lines(&self, lines: u32) -> u32 {
        match self.lines_per_level {
            Some(per) if per > 0 => self.start_level.saturating_add(lines / per),
            _ => self.start_level,
        }
    }
}
