//! Inkboard Application
//!
//! Headless host for the editor: loads config and boards, replays recorded
//! input scripts, renders a display list and saves the result.

pub mod app;
pub mod config;
pub mod error;
pub mod script;
pub mod shortcuts;

pub use app::{App, RunOptions, RunReport, run};
pub use config::AppConfig;
pub use error::AppError;
pub use script::{ScriptEvent, apply_event, load_script, parse_script};
pub use shortcuts::ShortcutRegistry;
