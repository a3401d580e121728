use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Keys the app binds; tests construct these directly instead of crossterm events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Anything without a binding
    Unsupported,
}

/// A key press, with Ctrl as the only modifier the bindings look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    /// Ctrl-C. Raw mode turns it into a key press instead of SIGINT.
    pub fn is_interrupt(&self) -> bool {
        self.ctrl && self.key == Key::Char('c')
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Unsupported,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: event.code.into(),
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        }
    }
}
