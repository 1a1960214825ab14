//! Keyboard to command mapping.
//!
//! A host translates its native key events into [`KeyEvent`]s; [`command_for_key`] turns them
//! into engine [`Command`]s. The modifier is whatever the platform uses for word and paragraph
//! jumps (Cmd on macOS, Ctrl or Alt elsewhere); the engine does not care which.

use crate::commands::Command;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Backspace.
    Backspace,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Any key the editor ignores.
    Other,
}

/// A key press plus whether the jump modifier was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Pressed key.
    pub key: Key,
    /// Jump modifier held.
    pub modifier: bool,
}

impl KeyEvent {
    /// Key press without the modifier.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifier: false,
        }
    }

    /// Key press with the modifier.
    pub fn with_modifier(key: Key) -> Self {
        Self {
            key,
            modifier: true,
        }
    }
}

/// Map a key event to a command.
///
/// Characters typed with the modifier held are shortcuts, not text, and map to nothing.
pub fn command_for_key(event: KeyEvent) -> Option<Command> {
    let command = match (event.modifier, event.key) {
        (false, Key::Char(ch)) => Command::InsertChar(ch),
        (false, Key::Tab) => Command::InsertChar('\t'),
        (false, Key::Backspace) => Command::DeleteBackward,
        (true, Key::Backspace) => Command::DeleteWordBackward,
        (_, Key::Enter) => Command::InsertNewline,
        (false, Key::Up) => Command::MoveLineUp,
        (false, Key::Down) => Command::MoveLineDown,
        (false, Key::Left) => Command::MoveCharLeft,
        (false, Key::Right) => Command::MoveCharRight,
        (true, Key::Up) => Command::MoveParagraphUp,
        (true, Key::Down) => Command::MoveParagraphDown,
        (true, Key::Left) => Command::MoveWordLeft,
        (true, Key::Right) => Command::MoveWordRight,
        (true, Key::Char(_)) | (true, Key::Tab) | (_, Key::Other) => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys() {
        assert_eq!(
            command_for_key(KeyEvent::plain(Key::Char('a'))),
            Some(Command::InsertChar('a'))
        );
        assert_eq!(
            command_for_key(KeyEvent::plain(Key::Backspace)),
            Some(Command::DeleteBackward)
        );
        assert_eq!(
            command_for_key(KeyEvent::plain(Key::Enter)),
            Some(Command::InsertNewline)
        );
        assert_eq!(
            command_for_key(KeyEvent::plain(Key::Up)),
            Some(Command::MoveLineUp)
        );
        assert_eq!(
            command_for_key(KeyEvent::plain(Key::Right)),
            Some(Command::MoveCharRight)
        );
    }

    #[test]
    fn test_modifier_keys() {
        assert_eq!(
            command_for_key(KeyEvent::with_modifier(Key::Backspace)),
            Some(Command::DeleteWordBackward)
        );
        assert_eq!(
            command_for_key(KeyEvent::with_modifier(Key::Left)),
            Some(Command::MoveWordLeft)
        );
        assert_eq!(
            command_for_key(KeyEvent::with_modifier(Key::Down)),
            Some(Command::MoveParagraphDown)
        );
    }

    #[test]
    fn test_shortcuts_and_unknown_keys_are_ignored() {
        assert_eq!(command_for_key(KeyEvent::with_modifier(Key::Char('s'))), None);
        assert_eq!(command_for_key(KeyEvent::plain(Key::Other)), None);
    }
}
