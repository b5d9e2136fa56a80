//! Input latch - edge detection over raw key samples
//!
//! Each tick the driver hands over which keys are down right now. The latch
//! turns that into a per-key state that distinguishes the first tick of a
//! press from a key that is being held.

use crate::types::{Key, KeySnapshot};

/// Per-key latch state. Discriminants match the classic 0/1/2 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    #[default]
    Released = 0,
    /// Went down this tick
    JustPressed = 1,
    /// Down on a previous tick and still down
    Held = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputLatch {
    states: [KeyState; Key::COUNT],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw sample into the latch.
    pub fn update(&mut self, sample: KeySnapshot) {
        for key in Key::ALL {
            let down = sample.is_down(key);
            let slot = &mut self.states[key.index()];
            *slot = match (*slot, down) {
                (_, false) => KeyState::Released,
                (KeyState::Released, true) => KeyState::JustPressed,
                (_, true) => KeyState::Held,
            };
        }
    }

    pub fn state(&self, key: Key) -> KeyState {
        self.states[key.index()]
    }

    /// Edge trigger: true only on the first tick of a press
    pub fn just_pressed(&self, key: Key) -> bool {
        self.state(key) == KeyState::JustPressed
    }

    /// Level trigger: true while the key is down at all
    pub fn pressed(&self, key: Key) -> bool {
        self.state(key) != KeyState::Released
    }

    /// Forget everything (all keys released)
    pub fn clear(&mut self) {
        self.states = [KeyState::Released; Key::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_cycle() {
        let mut latch = InputLatch::new();
        let down = KeySnapshot::from_keys(&[Key::Left]);

        latch.update(down);
        assert_eq!(latch.state(Key::Left), KeyState::JustPressed);
        assert!(latch.just_pressed(Key::Left));
        assert!(latch.pressed(Key::Left));

        latch.update(down);
        assert_eq!(latch.state(Key::Left), KeyState::Held);
        assert!(!latch.just_pressed(Key::Left));
        assert!(latch.pressed(Key::Left));

        latch.update(KeySnapshot::new());
        assert_eq!(latch.state(Key::Left), KeyState::Released);
        assert!(!latch.pressed(Key::Left));
    }

    #[test]
    fn release_then_press_is_a_new_edge() {
        let mut latch = InputLatch::new();
        let down = KeySnapshot::from_keys(&[Key::Rotate]);
        latch.update(down);
        latch.update(KeySnapshot::new());
        latch.update(down);
        assert!(latch.just_pressed(Key::Rotate));
    }

    #[test]
    fn keys_are_independent() {
        let mut latch = InputLatch::new();
        latch.update(KeySnapshot::from_keys(&[Key::Left]));
        latch.update(KeySnapshot::from_keys(&[Key::Left, Key::HardDrop]));
        assert_eq!(latch.state(Key::Left), KeyState::Held);
        assert_eq!(latch.state(Key::HardDrop), KeyState::JustPressed);
        assert_eq!(latch.state(Key::Right), KeyState::Released);
    }

    #[test]
    fn discriminants_follow_zero_one_two() {
        assert_eq!(KeyState::Released as u8, 0);
        assert_eq!(KeyState::JustPressed as u8, 1);
        assert_eq!(KeyState::Held as u8, 2);
    }

    #[test]
    fn clear_releases_everything() {
        let mut latch = InputLatch::new();
        latch.update(KeySnapshot::from_keys(&Key::ALL));
        latch.clear();
        for key in Key::ALL {
            assert!(!latch.pressed(key));
        }
    }
}
