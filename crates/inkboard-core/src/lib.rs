//! Inkboard Core Library
//!
//! Platform-agnostic canvas editing engine: elements, tools, pan/zoom,
//! hit-testing and snapshot undo/redo.

pub mod board;
pub mod config;
pub mod elements;
pub mod history;
pub mod input;
pub mod mirror;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod tools;
pub mod viewport;

pub use board::{Board, BoardError};
pub use config::EditorConfig;
pub use elements::{Element, ElementId, ElementKind, ElementPatch, ElementStyle, SerializableColor};
pub use hit_test::{hit_test, hit_test_all};
pub use history::History;
pub use input::{Key, KeyPress, Modifiers, MouseButton};
pub use mirror::{ElementMirror, MemoryMirror, MirrorError, MirrorResult};
pub use selection::Selection;
pub use session::{Action, EditorSession};
pub use shortcuts::{Command, SHORTCUTS, Shortcut};
pub use store::ElementStore;
pub use tools::{CursorIcon, TextEntry, ToolKind, ToolState};
pub use viewport::Viewport;
