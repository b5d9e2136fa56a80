//! Raw key-down sampling for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::key_for_code;
use crate::types::{Key, KeySnapshot};

// In terminals without key-release events, auto-repeat keeps re-sending the
// press while a key is held. A key with no event for this long counts as up.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, Default)]
struct KeyTrack {
    down: bool,
    /// A sample has reported this press at least once
    sampled: bool,
    /// Release arrived before the press was ever sampled
    release_pending: bool,
    /// Time since the last press/repeat event
    idle_ms: u32,
}

/// Collects terminal key events between ticks and produces one
/// [`KeySnapshot`] per tick.
#[derive(Debug, Clone)]
pub struct KeySampler {
    keys: [KeyTrack; Key::COUNT],
    key_release_timeout_ms: u32,
}

impl KeySampler {
    pub fn new() -> Self {
        Self {
            keys: [KeyTrack::default(); Key::COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the engine key it mapped to.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Option<Key> {
        let key = key_for_code(event.code)?;
        let track = &mut self.keys[key.index()];
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !track.down {
                    track.down = true;
                    track.sampled = false;
                }
                track.release_pending = false;
                track.idle_ms = 0;
            }
            KeyEventKind::Release => {
                if track.sampled {
                    track.down = false;
                } else {
                    // Keep a tap visible for one sample.
                    track.release_pending = true;
                }
            }
        }
        Some(key)
    }

    /// Produce the key-down snapshot for a tick that spans `elapsed_ms`.
    pub fn sample(&mut self, elapsed_ms: u32) -> KeySnapshot {
        let mut snapshot = KeySnapshot::new();
        for key in Key::ALL {
            let track = &mut self.keys[key.index()];
            if !track.down {
                continue;
            }

            // A sampled key that has gone quiet is treated as released.
            track.idle_ms = track.idle_ms.saturating_add(elapsed_ms);
            if track.sampled && track.idle_ms > self.key_release_timeout_ms {
                *track = KeyTrack::default();
                continue;
            }

            snapshot.set(key, true);
            track.sampled = true;
            if track.release_pending {
                *track = KeyTrack::default();
            }
        }
        snapshot
    }

    /// Release every key (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.keys = [KeyTrack::default(); Key::COUNT];
    }
}

impl Default for KeySampler {
    fn default() -> Self {
        Self::new()
    }
}
