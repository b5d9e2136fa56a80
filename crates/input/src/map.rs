//! Key mapping from terminal events to engine keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to an engine key.
pub fn key_for_code(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Key::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Key::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Key::Down)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Key::Rotate),

        KeyCode::Char(' ') => Some(Key::HardDrop),

        // Pause, or reset after a loss
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),

        _ => None,
    }
}

/// Check if key should quit the driver.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(key_for_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(key_for_code(KeyCode::Right), Some(Key::Right));
        assert_eq!(key_for_code(KeyCode::Down), Some(Key::Down));

        assert_eq!(key_for_code(KeyCode::Char('H')), Some(Key::Left));
        assert_eq!(key_for_code(KeyCode::Char('d')), Some(Key::Right));
        assert_eq!(key_for_code(KeyCode::Char('J')), Some(Key::Down));
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(key_for_code(KeyCode::Up), Some(Key::Rotate));
        assert_eq!(key_for_code(KeyCode::Char('w')), Some(Key::Rotate));
        assert_eq!(key_for_code(KeyCode::Char(' ')), Some(Key::HardDrop));
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(key_for_code(KeyCode::Esc), Some(Key::Pause));
        assert_eq!(key_for_code(KeyCode::Char('P')), Some(Key::Pause));
        assert_eq!(key_for_code(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
