//! Recorded input scripts.
//!
//! A script is a JSON array of events in screen coordinates, replayed in
//! order through an [`EditorSession`].

use crate::error::AppError;
use inkboard_core::{Action, EditorSession, Key, KeyPress, Modifiers, MouseButton, ToolKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    /// A key by name, e.g. "r", "Delete", "Escape".
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        from_text_field: bool,
    },
    /// Submit the open text entry with this value.
    Text {
        value: String,
    },
    CancelText,
    FocusLost,
    SetTool {
        tool: ToolKind,
    },
    ZoomIn,
    ZoomOut,
    ResetView,
    Undo,
    Redo,
    DeleteSelected,
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> Result<Vec<ScriptEvent>, AppError> {
    serde_json::from_str(json).map_err(AppError::Script)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, AppError> {
    let json = std::fs::read_to_string(path)?;
    parse_script(&json)
}

/// Feed one event to the session and return what it asked the host to do.
pub fn apply_event(session: &mut EditorSession, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::PointerDown {
            x,
            y,
            button,
            modifiers,
        } => session.pointer_down(Point::new(*x, *y), *button, *modifiers),
        ScriptEvent::PointerMove { x, y } => session.pointer_move(Point::new(*x, *y)),
        ScriptEvent::PointerUp { x, y } => session.pointer_up(Point::new(*x, *y)),
        ScriptEvent::Wheel { x, y, delta_y } => session.wheel(Point::new(*x, *y), *delta_y),
        ScriptEvent::Key {
            key,
            modifiers,
            from_text_field,
        } => match Key::from_name(key) {
            Some(key) => session.key_down(&KeyPress {
                key,
                modifiers: *modifiers,
                from_text_field: *from_text_field,
            }),
            None => {
                log::warn!("Skipping unknown key {:?}", key);
                Vec::new()
            }
        },
        ScriptEvent::Text { value } => session.submit_text(value),
        ScriptEvent::CancelText => session.cancel_text(),
        ScriptEvent::FocusLost => session.focus_lost(),
        ScriptEvent::SetTool { tool } => session.set_tool(*tool),
        ScriptEvent::ZoomIn => {
            session.zoom_in();
            vec![Action::RenderNeeded]
        }
        ScriptEvent::ZoomOut => {
            session.zoom_out();
            vec![Action::RenderNeeded]
        }
        ScriptEvent::ResetView => {
            session.reset_view();
            vec![Action::RenderNeeded]
        }
        ScriptEvent::Undo => session.undo(),
        ScriptEvent::Redo => session.redo(),
        ScriptEvent::DeleteSelected => session.delete_selected(),
    }
}
