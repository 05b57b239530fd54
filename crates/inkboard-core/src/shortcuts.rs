//! Keyboard shortcut table and resolution.

use crate::input::{Key, KeyPress};
use crate::tools::ToolKind;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTool(ToolKind),
    DeleteSelected,
    Undo,
    Redo,
    ResetView,
    /// Abandon the gesture in progress.
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub action: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        action: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        let key = if self.key.len() == 1 {
            self.key.to_uppercase()
        } else {
            self.key.to_string()
        };
        parts.push(key.as_str());
        parts.join("+")
    }

    fn matches(&self, press: &KeyPress) -> bool {
        let key_matches = match &press.key {
            Key::Char(_) => press
                .key
                .lowercase_char()
                .is_some_and(|c| self.key.len() == 1 && self.key.starts_with(c)),
            Key::Delete => self.key == "Delete",
            Key::Backspace => self.key == "Backspace",
            Key::Escape => self.key == "Escape",
            Key::Enter | Key::Tab => false,
        };
        if !key_matches || press.modifiers.command() != self.command {
            return false;
        }
        // Shift only matters for chords; plain letters match either case.
        !self.command || press.modifiers.shift == self.shift
    }
}

/// Every shortcut the editor understands.
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("v", false, false, Command::SetTool(ToolKind::Select), "Select tool"),
    Shortcut::new("r", false, false, Command::SetTool(ToolKind::Rectangle), "Rectangle tool"),
    Shortcut::new("p", false, false, Command::SetTool(ToolKind::Pen), "Pen tool"),
    Shortcut::new("t", false, false, Command::SetTool(ToolKind::Text), "Text tool"),
    Shortcut::new("h", false, false, Command::SetTool(ToolKind::Hand), "Hand tool"),
    Shortcut::new("Delete", false, false, Command::DeleteSelected, "Delete selected elements"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelected, "Delete selected elements"),
    Shortcut::new("z", true, false, Command::Undo, "Undo"),
    Shortcut::new("z", true, true, Command::Redo, "Redo"),
    Shortcut::new("y", true, false, Command::Redo, "Redo"),
    Shortcut::new("0", true, false, Command::ResetView, "Reset view"),
    Shortcut::new("Escape", false, false, Command::Cancel, "Cancel current action"),
];

/// Look up the command bound to a key press.
pub fn resolve(press: &KeyPress) -> Option<Command> {
    SHORTCUTS
        .iter()
        .find(|shortcut| shortcut.matches(press))
        .map(|shortcut| shortcut.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn test_tool_letters_any_case() {
        assert_eq!(
            resolve(&KeyPress::char('r')),
            Some(Command::SetTool(ToolKind::Rectangle))
        );
        assert_eq!(
            resolve(&KeyPress::char('P').with_modifiers(Modifiers::SHIFT)),
            Some(Command::SetTool(ToolKind::Pen))
        );
        assert_eq!(resolve(&KeyPress::char('q')), None);
    }

    #[test]
    fn test_undo_redo_chords() {
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        };
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(resolve(&KeyPress::char('z').with_modifiers(Modifiers::CTRL)), Some(Command::Undo));
        assert_eq!(resolve(&KeyPress::char('z').with_modifiers(cmd)), Some(Command::Undo));
        assert_eq!(resolve(&KeyPress::char('Z').with_modifiers(ctrl_shift)), Some(Command::Redo));
        assert_eq!(resolve(&KeyPress::char('y').with_modifiers(Modifiers::CTRL)), Some(Command::Redo));
    }

    #[test]
    fn test_ctrl_letters_do_not_switch_tools() {
        assert_eq!(resolve(&KeyPress::char('v').with_modifiers(Modifiers::CTRL)), None);
        // Plain z is not undo.
        assert_eq!(resolve(&KeyPress::char('z')), None);
    }

    #[test]
    fn test_reset_view_and_delete() {
        assert_eq!(
            resolve(&KeyPress::char('0').with_modifiers(Modifiers::CTRL)),
            Some(Command::ResetView)
        );
        assert_eq!(resolve(&KeyPress::new(Key::Delete)), Some(Command::DeleteSelected));
        assert_eq!(resolve(&KeyPress::new(Key::Backspace)), Some(Command::DeleteSelected));
        assert_eq!(resolve(&KeyPress::new(Key::Escape)), Some(Command::Cancel));
    }

    #[test]
    fn test_format() {
        assert_eq!(SHORTCUTS[8].format(), "Ctrl+Shift+Z");
        assert_eq!(SHORTCUTS[0].format(), "V");
    }
}
