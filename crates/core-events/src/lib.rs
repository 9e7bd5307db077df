//! Host-to-engine input events.
//!
//! The host widget translates its native key-press and selection-change
//! notifications into these types. Only the fields the engine inspects are
//! modelled: the logical key, the modifier set, and for selection changes the
//! new caret/selection offsets.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified printable key.
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    /// `Ctrl` + printable key (e.g. `<C-v>`).
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub const fn esc() -> Self {
        Self::new(KeyCode::Esc, KeyModifiers::empty())
    }

    pub fn is_ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    /// The printable character when no Ctrl/Alt modifier is held.
    pub fn plain_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
                Some(c)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Normalized logical keys. Shifted letters arrive as their uppercase `Char`.
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(c) => {
                if self.is_ctrl() {
                    return write!(f, "<C-{c}>");
                }
                return write!(f, "{c}");
            }
            KeyCode::Enter => "CR",
            KeyCode::Esc => "Esc",
            KeyCode::Backspace => "BS",
            KeyCode::Tab => "Tab",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
        };
        write!(f, "<{name}>")
    }
}

/// One discrete event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// The host caret/selection moved to `[start, end)`.
    SelectionChanged { start: usize, end: usize },
}
