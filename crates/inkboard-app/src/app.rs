//! Headless host: load a board, replay a script, render, save.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::script::{ScriptEvent, apply_event};
use inkboard_core::{Action, Board, EditorSession, MemoryMirror};
use inkboard_render::{DisplayListRenderer, RenderContext, Renderer, SceneSummary};
use std::path::PathBuf;

/// Inputs for one replay run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub board: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub out: Option<PathBuf>,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub events: usize,
    pub renders: usize,
    pub text_prompts: usize,
    pub elements: usize,
    pub mirrored: usize,
    pub zoom_percent: u32,
    pub scene: SceneSummary,
    /// Serialized board, present when no output path was given.
    pub board_json: Option<String>,
}

pub struct App {
    config: AppConfig,
    board: Board,
    session: EditorSession,
    mirror: MemoryMirror,
    renderer: DisplayListRenderer,
}

impl App {
    /// The mirror is seeded from the session's store, not the raw board, so
    /// ids the store reassigned (nil or duplicate) match on both sides.
    pub fn new(config: AppConfig, board: Board) -> Self {
        let session = EditorSession::from_board(config.editor.clone(), &board);
        let mirror = MemoryMirror::with_elements(session.elements().to_vec());
        let session = session.with_mirror(mirror.clone());
        Self {
            config,
            board,
            session,
            mirror,
            renderer: DisplayListRenderer::new(),
        }
    }

    /// Build an app from the files named in `options`.
    pub fn load(options: &RunOptions) -> Result<Self, AppError> {
        let config = AppConfig::load_or_default(options.config.as_deref())?;
        let board = match &options.board {
            Some(path) => {
                log::info!("Loading board from {}", path.display());
                Board::load(path)?
            }
            None => Board::new(config.title.clone()),
        };
        Ok(Self::new(config, board))
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn mirror(&self) -> &MemoryMirror {
        &self.mirror
    }

    /// Replay `events` and render once at the end.
    pub fn run(&mut self, events: &[ScriptEvent]) -> Result<RunReport, AppError> {
        let mut renders = 0;
        let mut text_prompts = 0;
        for event in events {
            log::debug!("Event: {:?}", event);
            for action in apply_event(&mut self.session, event) {
                match action {
                    Action::RenderNeeded => renders += 1,
                    Action::TextEntryRequested { screen, .. } => {
                        log::debug!("Text entry requested at {:?}", screen);
                        text_prompts += 1;
                    }
                    Action::TextEntryClosed => {}
                }
            }
        }

        let scene = self.render()?;
        log::info!(
            "Replayed {} events: {} elements, {}",
            events.len(),
            self.session.elements().len(),
            scene
        );

        Ok(RunReport {
            events: events.len(),
            renders,
            text_prompts,
            elements: self.session.elements().len(),
            mirrored: self.mirror.elements().len(),
            zoom_percent: self.session.viewport().zoom_percent(),
            scene,
            board_json: None,
        })
    }

    fn render(&mut self) -> Result<SceneSummary, AppError> {
        let ctx =
            RenderContext::from_session(&self.session).with_background(self.config.background());
        self.renderer.build_scene(&ctx)?;
        Ok(self.renderer.scene().summary())
    }

    /// The loaded board with the session's current elements.
    pub fn board(&self) -> Board {
        self.session.to_board(&self.board)
    }
}

/// Load, replay, render, and write the board to `out` (or into the report).
pub fn run(options: &RunOptions) -> Result<RunReport, AppError> {
    let mut app = App::load(options)?;
    let events = match &options.script {
        Some(path) => crate::script::load_script(path)?,
        None => Vec::new(),
    };
    let mut report = app.run(&events)?;

    let board = app.board();
    match &options.out {
        Some(path) => {
            board.save(path)?;
            log::info!("Saved board to {}", path.display());
        }
        None => report.board_json = Some(board.to_json()?),
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use inkboard_core::ElementKind;
    use inkboard_core::elements::{ElementStyle, Rectangle};
    use std::io::Write;

    const SCRIPT: &str = r#"[
        {"event": "key", "key": "r"},
        {"event": "pointer_down", "x": 10, "y": 10},
        {"event": "pointer_move", "x": 60, "y": 50},
        {"event": "pointer_up", "x": 60, "y": 50},
        {"event": "key", "key": "t"},
        {"event": "pointer_down", "x": 100, "y": 100},
        {"event": "text", "value": "Note"},
        {"event": "wheel", "x": 0, "y": 0, "delta_y": -1}
    ]"#;

    #[test]
    fn test_run_report() {
        let mut app = App::new(AppConfig::default(), Board::new("Test"));
        let report = app.run(&parse_script(SCRIPT).unwrap()).unwrap();

        assert_eq!(report.events, 8);
        assert_eq!(report.elements, 2);
        assert_eq!(report.mirrored, 2);
        assert_eq!(report.text_prompts, 1);
        assert_eq!(report.zoom_percent, 110);
        assert_eq!(report.scene.fills, 1);
        assert_eq!(report.scene.texts, 1);
        assert!(report.renders > 0);
    }

    #[test]
    fn test_board_keeps_identity() {
        let board = Board::new("Keep");
        let mut app = App::new(AppConfig::default(), board.clone());
        app.run(&parse_script(SCRIPT).unwrap()).unwrap();
        let saved = app.board();
        assert_eq!(saved.id, board.id);
        assert_eq!(saved.title, "Keep");
        assert_eq!(saved.elements[0].kind(), ElementKind::Rectangle);
    }

    #[test]
    fn test_run_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("script.json");
        let mut file = std::fs::File::create(&script_path).unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();
        let out = dir.path().join("board.json");

        let report = run(&RunOptions {
            script: Some(script_path),
            out: Some(out.clone()),
            ..Default::default()
        })
        .unwrap();
        assert!(report.board_json.is_none());

        let board = Board::load(&out).unwrap();
        assert_eq!(board.elements.len(), 2);

        // Replaying onto the saved board starts from its elements.
        let report = run(&RunOptions {
            board: Some(out),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(report.elements, 2);
        assert!(report.board_json.unwrap().contains("\"Note\""));
    }

    #[test]
    fn test_mirror_matches_reassigned_seed_ids() {
        let rect: inkboard_core::Element = Rectangle::new(
            kurbo::Point::new(0.0, 0.0),
            40.0,
            30.0,
            ElementStyle::rectangle(),
        )
        .into();
        let mut board = Board::new("Dupes");
        board.set_elements(vec![rect.clone(), rect]);

        let mut app = App::new(AppConfig::default(), board);
        let session_ids: Vec<_> = app.session().elements().iter().map(|e| e.id()).collect();
        assert_eq!(session_ids.len(), 2);
        assert_ne!(session_ids[0], session_ids[1]);
        assert_eq!(app.mirror().ids(), session_ids);

        // Click hits the topmost copy, which carries the reassigned id.
        let script = r#"[
            {"event": "pointer_down", "x": 10, "y": 10},
            {"event": "pointer_up", "x": 10, "y": 10},
            {"event": "key", "key": "Delete"}
        ]"#;
        let report = app.run(&parse_script(script).unwrap()).unwrap();
        assert_eq!(report.elements, 1);
        assert_eq!(report.mirrored, 1);
        assert_eq!(app.mirror().ids(), vec![session_ids[0]]);
    }

    #[test]
    fn test_missing_script_is_io_error() {
        let result = run(&RunOptions {
            script: Some(PathBuf::from("/nonexistent/script.json")),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
