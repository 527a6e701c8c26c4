//! Key interpreters. Each one recognises its own disjoint key set; the event
//! loop hands every key to all of them and routes the results to separate
//! pieces of state.

use crossterm::event::KeyCode;

use crate::maze::Dir;
use crate::tilt::Nudge;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Space: restart after a win.
    Resume,
    Quit,
}

fn lower(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Arrows and WASD.
pub fn movement_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up => return Some(Dir::Up),
        KeyCode::Down => return Some(Dir::Down),
        KeyCode::Left => return Some(Dir::Left),
        KeyCode::Right => return Some(Dir::Right),
        _ => {}
    }
    match lower(code)? {
        'w' => Some(Dir::Up),
        's' => Some(Dir::Down),
        'a' => Some(Dir::Left),
        'd' => Some(Dir::Right),
        _ => None,
    }
}

/// IJKL.
pub fn tilt_key(code: KeyCode) -> Option<Nudge> {
    match lower(code)? {
        'i' => Some(Nudge::Up),
        'k' => Some(Nudge::Down),
        'j' => Some(Nudge::Left),
        'l' => Some(Nudge::Right),
        _ => None,
    }
}

pub fn control_key(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Char(' ') => Some(Control::Resume),
        KeyCode::Esc => Some(Control::Quit),
        _ => match lower(code)? {
            'q' => Some(Control::Quit),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_key() -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = (' '..='~').map(KeyCode::Char).collect();
        keys.extend([
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Tab,
        ]);
        keys
    }

    #[test]
    fn movement_keys() {
        assert_eq!(movement_key(KeyCode::Up), Some(Dir::Up));
        assert_eq!(movement_key(KeyCode::Char('W')), Some(Dir::Up));
        assert_eq!(movement_key(KeyCode::Char('a')), Some(Dir::Left));
        assert_eq!(movement_key(KeyCode::Char('s')), Some(Dir::Down));
        assert_eq!(movement_key(KeyCode::Char('D')), Some(Dir::Right));
        assert_eq!(movement_key(KeyCode::Char('i')), None);
    }

    #[test]
    fn tilt_keys() {
        assert_eq!(tilt_key(KeyCode::Char('i')), Some(Nudge::Up));
        assert_eq!(tilt_key(KeyCode::Char('K')), Some(Nudge::Down));
        assert_eq!(tilt_key(KeyCode::Char('j')), Some(Nudge::Left));
        assert_eq!(tilt_key(KeyCode::Char('l')), Some(Nudge::Right));
        assert_eq!(tilt_key(KeyCode::Up), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(control_key(KeyCode::Char(' ')), Some(Control::Resume));
        assert_eq!(control_key(KeyCode::Char('q')), Some(Control::Quit));
        assert_eq!(control_key(KeyCode::Esc), Some(Control::Quit));
        assert_eq!(control_key(KeyCode::Char('w')), None);
    }

    #[test]
    fn interpreters_never_share_a_key() {
        for key in every_key() {
            let claims = [
                movement_key(key).is_some(),
                tilt_key(key).is_some(),
                control_key(key).is_some(),
            ];
            let count = claims.iter().filter(|c| **c).count();
            assert!(count <= 1, "{key:?} claimed by {count} interpreters");
        }
    }
}
