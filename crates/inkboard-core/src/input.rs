//! Input event types for pointer and keyboard handling.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on Linux/Windows, Cmd on macOS. Either counts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
}

impl Key {
    /// Map a DOM/winit-style key name ("a", "Enter", "Delete", ...) to a key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" | "Return" => Some(Key::Enter),
            "Escape" | "Esc" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            "Delete" | "Del" => Some(Key::Delete),
            "Tab" => Some(Key::Tab),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// The character, lowercased, if this is a character key.
    pub fn lowercase_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => c.to_lowercase().next(),
            _ => None,
        }
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Set when the event originated in a focused text field, so global
    /// shortcuts must not fire.
    #[serde(default)]
    pub from_text_field: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            from_text_field: false,
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.from_text_field = true;
        self
    }
}
