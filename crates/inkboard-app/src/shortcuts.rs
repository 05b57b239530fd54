//! Keyboard shortcut listing.

use inkboard_core::{SHORTCUTS, Shortcut};

/// Host-side view of the editor's shortcut table.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// One line per shortcut, key chord padded to a column.
    pub fn lines() -> Vec<String> {
        Self::all()
            .iter()
            .map(|shortcut| format!("  {:20} {}", shortcut.format(), shortcut.description))
            .collect()
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for line in Self::lines() {
            println!("{}", line);
        }
        println!();
    }
}
