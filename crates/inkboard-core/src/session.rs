//! Editor session: the single owner of canvas editing state.
//!
//! Hosts feed pointer, wheel and key events in and get back a list of
//! [`Action`]s describing what they should do next (repaint, show or hide a
//! text field). Everything runs to completion on the caller's thread.

use crate::board::Board;
use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, ElementPatch, Text};
use crate::hit_test::hit_test;
use crate::history::History;
use crate::input::{Key, KeyPress, Modifiers, MouseButton};
use crate::mirror::{ElementMirror, MirrorResult};
use crate::selection::Selection;
use crate::shortcuts::{self, Command};
use crate::store::ElementStore;
use crate::tools::{CursorIcon, TextEntry, ToolKind, ToolManager, ToolState};
use crate::viewport::Viewport;
use kurbo::Point;

/// Host-facing side effects of handling an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Visible state changed; repaint.
    RenderNeeded,
    /// Show a text field at `screen`; the label will be anchored at `world`.
    TextEntryRequested { screen: Point, world: Point },
    /// Hide the text field.
    TextEntryClosed,
}

/// Canvas editing state and the event handlers that drive it.
pub struct EditorSession {
    store: ElementStore,
    selection: Selection,
    viewport: Viewport,
    tools: ToolManager,
    history: History,
    config: EditorConfig,
    mirror: Option<Box<dyn ElementMirror>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Vec::new())
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("elements", &self.store.len())
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .field("tool", &self.tools.current_tool())
            .field("state", &self.tools.state)
            .field("history", &self.history.len())
            .field("mirrored", &self.mirror.is_some())
            .finish()
    }
}

impl EditorSession {
    /// Create a session seeded with `elements`. The seed becomes the history
    /// baseline, so the first committed change can be undone.
    pub fn new(config: EditorConfig, elements: Vec<Element>) -> Self {
        let store = ElementStore::from_elements(elements);
        let mut history = History::with_limit(config.history_limit);
        history.record(store.list());
        Self {
            store,
            selection: Selection::new(),
            viewport: Viewport::new(),
            tools: ToolManager::new(),
            history,
            config,
            mirror: None,
        }
    }

    /// Create a session seeded from a board's elements.
    pub fn from_board(config: EditorConfig, board: &Board) -> Self {
        Self::new(config, board.elements.clone())
    }

    /// Attach the collaborator that mirrors every local mutation.
    pub fn with_mirror(mut self, mirror: impl ElementMirror + 'static) -> Self {
        self.mirror = Some(Box::new(mirror));
        self
    }

    // --- Queries -----------------------------------------------------------

    /// Committed elements in paint order.
    pub fn elements(&self) -> &[Element] {
        self.store.list()
    }

    /// Get a committed element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Current pan and zoom.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport for host-driven pan/zoom. Zoom stays clamped.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    /// Gesture state of the active tool.
    pub fn state(&self) -> &ToolState {
        &self.tools.state
    }

    /// The element being drawn, if a drag is in progress.
    pub fn in_progress(&self) -> Option<Element> {
        self.tools.preview()
    }

    /// The pending text entry, while the text tool awaits input.
    pub fn text_entry(&self) -> Option<&TextEntry> {
        match &self.tools.state {
            ToolState::AwaitingTextInput(entry) => Some(entry),
            _ => None,
        }
    }

    /// Cursor the host should show for the current tool and gesture.
    pub fn cursor(&self) -> CursorIcon {
        self.tools.cursor()
    }

    /// Check if there is a change to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if there is an undone change to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Snapshot history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Editor configuration the session was built with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Copy of `board` carrying the session's current elements.
    pub fn to_board(&self, board: &Board) -> Board {
        let mut board = board.clone();
        board.set_elements(self.store.list().to_vec());
        board
    }

    // --- Pointer and wheel -------------------------------------------------

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        let world = self.viewport.to_world(screen);
        let tool = self.tools.current_tool();
        let mut actions = Vec::new();

        match &mut self.tools.state {
            ToolState::Idle => {}
            ToolState::AwaitingTextInput(entry)
                if button == MouseButton::Left && tool == ToolKind::Text =>
            {
                entry.world = world;
                entry.screen = screen;
                log::debug!("Text entry re-anchored at {:?}", world);
                return vec![Action::TextEntryRequested { screen, world }];
            }
            ToolState::AwaitingTextInput(_) => actions.push(Action::TextEntryClosed),
            // A gesture already owns the pointer.
            _ => return actions,
        }
        if !actions.is_empty() {
            self.tools.cancel();
        }

        if button == MouseButton::Middle || (button == MouseButton::Left && tool == ToolKind::Hand)
        {
            self.tools.state = ToolState::DraggingPan { last_screen: screen };
            log::debug!("Pan started at {:?}", screen);
            return actions;
        }
        if button != MouseButton::Left {
            return actions;
        }

        match tool {
            ToolKind::Select => {
                let before = self.selection.clone();
                match hit_test(world, self.store.list()) {
                    Some(id) if modifiers.shift => self.selection.toggle(id),
                    Some(id) => self.selection.select_only(id),
                    None if modifiers.shift => {}
                    None => self.selection.clear(),
                }
                self.tools.state = ToolState::Selecting;
                if self.selection != before {
                    actions.push(Action::RenderNeeded);
                }
            }
            ToolKind::Rectangle => {
                self.tools.begin(world, self.config.rectangle_style);
                actions.push(Action::RenderNeeded);
            }
            ToolKind::Pen => {
                self.tools.begin(world, self.config.pen_style);
                actions.push(Action::RenderNeeded);
            }
            ToolKind::Text => {
                self.tools.state = ToolState::AwaitingTextInput(TextEntry {
                    world,
                    screen,
                    buffer: String::new(),
                });
                actions.push(Action::TextEntryRequested { screen, world });
            }
            ToolKind::Hand => {}
        }
        actions
    }

    /// Handle pointer motion at a screen position.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match &mut self.tools.state {
            ToolState::DraggingPan { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.viewport.pan_by(delta);
                vec![Action::RenderNeeded]
            }
            ToolState::DrawingRectangle { .. } | ToolState::DrawingPen { .. } => {
                let world = self.viewport.to_world(screen);
                self.tools.update(world);
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    /// Finish the current gesture. Handled the same wherever the pointer is:
    /// the draft commits as the last move left it.
    pub fn pointer_up(&mut self, _screen: Point) -> Vec<Action> {
        match &self.tools.state {
            ToolState::DraggingPan { .. } | ToolState::Selecting => {
                self.tools.state = ToolState::Idle;
                Vec::new()
            }
            ToolState::DrawingRectangle { .. } | ToolState::DrawingPen { .. } => {
                if let Some(element) = self.tools.end() {
                    self.commit_add(element);
                }
                vec![Action::RenderNeeded]
            }
            ToolState::Idle | ToolState::AwaitingTextInput(_) => Vec::new(),
        }
    }

    /// Wheel zoom anchored at the pointer. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> Vec<Action> {
        if self.viewport.wheel_zoom(screen, delta_y) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Keyboard ----------------------------------------------------------

    /// Handle a key press: text entry first, then shortcuts.
    pub fn key_down(&mut self, press: &KeyPress) -> Vec<Action> {
        // The host's own text field owns this key.
        if press.from_text_field {
            return Vec::new();
        }

        if let ToolState::AwaitingTextInput(entry) = &mut self.tools.state {
            return match &press.key {
                Key::Enter => {
                    let text = std::mem::take(&mut entry.buffer);
                    self.submit_text(&text)
                }
                Key::Escape => self.cancel_text(),
                Key::Backspace => {
                    entry.buffer.pop();
                    Vec::new()
                }
                Key::Char(c) if !press.modifiers.command() => {
                    entry.buffer.push(*c);
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        match shortcuts::resolve(press) {
            Some(Command::SetTool(tool)) => self.set_tool(tool),
            Some(Command::DeleteSelected) => self.delete_selected(),
            Some(Command::Undo) => self.undo(),
            Some(Command::Redo) => self.redo(),
            Some(Command::ResetView) => {
                self.reset_view();
                vec![Action::RenderNeeded]
            }
            Some(Command::Cancel) => self.cancel_gesture(),
            None => Vec::new(),
        }
    }

    /// Drop any gesture in progress, e.g. when the window loses focus.
    pub fn focus_lost(&mut self) -> Vec<Action> {
        self.cancel_gesture()
    }

    // --- Tools and text ----------------------------------------------------

    /// Switch tools, discarding any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        if self.tools.current_tool() != tool {
            log::debug!("Tool changed to {}", tool.name());
            self.tools.set_tool(tool);
            if actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    /// Commit the pending text entry. Blank text commits nothing.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        if self.text_entry().is_none() {
            return Vec::new();
        }
        let ToolState::AwaitingTextInput(entry) = std::mem::take(&mut self.tools.state) else {
            return Vec::new();
        };
        if text.trim().is_empty() {
            log::debug!("Discarded blank text entry");
            return vec![Action::TextEntryClosed];
        }
        let label = Text::new(
            entry.world,
            text,
            self.config.text_font_size,
            self.config.text_style,
        );
        self.commit_add(label.into());
        vec![Action::TextEntryClosed, Action::RenderNeeded]
    }

    /// Close the pending text entry without committing.
    pub fn cancel_text(&mut self) -> Vec<Action> {
        if self.text_entry().is_none() {
            return Vec::new();
        }
        self.tools.state = ToolState::Idle;
        vec![Action::TextEntryClosed]
    }

    fn cancel_gesture(&mut self) -> Vec<Action> {
        let actions = match &self.tools.state {
            ToolState::Idle => return Vec::new(),
            ToolState::AwaitingTextInput(_) => vec![Action::TextEntryClosed],
            ToolState::DrawingRectangle { .. } | ToolState::DrawingPen { .. } => {
                log::debug!("Discarded in-progress drawing");
                vec![Action::RenderNeeded]
            }
            ToolState::Selecting | ToolState::DraggingPan { .. } => Vec::new(),
        };
        self.tools.cancel();
        actions
    }

    // --- Viewport ------------------------------------------------------------

    /// Zoom in one step, keeping pan.
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    /// Zoom out one step, keeping pan.
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Back to 100% zoom with no pan.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        log::info!("View reset");
    }

    // --- Mutations -----------------------------------------------------------

    /// Append an element as one undoable change. Returns its id.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        self.commit_add(element)
    }

    /// Apply a partial update as one undoable change. Unknown ids are a no-op,
    /// and an empty patch changes nothing.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        if patch.is_empty() || !self.store.update(id, patch) {
            return false;
        }
        self.history.record(self.store.list());
        self.notify(|mirror| mirror.update_element(id, patch));
        true
    }

    /// Remove one element as one undoable change. Unknown ids are a no-op.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        self.selection.remove(id);
        self.history.record(self.store.list());
        self.notify(|mirror| mirror.delete_element(id));
        log::info!("Removed element {}", id);
        true
    }

    /// Remove every selected element and clear the selection, recording a
    /// single history entry.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.selection.ids().to_vec();
        let removed = self.store.remove_many(&ids);
        self.selection.clear();
        if removed.is_empty() {
            return vec![Action::RenderNeeded];
        }

        self.history.record(self.store.list());
        for element in &removed {
            let id = element.id();
            self.notify(|mirror| mirror.delete_element(id));
        }
        log::info!("Deleted {} selected element(s)", removed.len());
        vec![Action::RenderNeeded]
    }

    /// Restore the previous snapshot. No-op at the baseline.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(snapshot) = self.history.undo().map(<[Element]>::to_vec) else {
            log::debug!("Nothing to undo");
            return Vec::new();
        };
        self.restore(snapshot);
        log::info!("Undo");
        vec![Action::RenderNeeded]
    }

    /// Restore the next snapshot. No-op at the newest one.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(snapshot) = self.history.redo().map(<[Element]>::to_vec) else {
            log::debug!("Nothing to redo");
            return Vec::new();
        };
        self.restore(snapshot);
        log::info!("Redo");
        vec![Action::RenderNeeded]
    }

    fn commit_add(&mut self, element: Element) -> ElementId {
        let kind = element.kind();
        let id = self.store.add(element);
        self.history.record(self.store.list());
        if let Some(element) = self.store.get(id) {
            self.notify(|mirror| mirror.add_element(element));
        }
        log::info!("Committed {:?} {}", kind, id);
        id
    }

    /// Replace the live collection with a snapshot, mirroring each removal and
    /// addition, then drop selected ids that no longer exist.
    fn restore(&mut self, snapshot: Vec<Element>) {
        let old_ids: Vec<ElementId> = self.store.ids().collect();
        self.store.clear();
        for id in old_ids {
            self.notify(|mirror| mirror.delete_element(id));
        }

        for element in snapshot {
            let id = self.store.add(element);
            if let Some(element) = self.store.get(id) {
                self.notify(|mirror| mirror.add_element(element));
            }
        }

        let store = &self.store;
        self.selection.retain(|id| store.contains(id));
    }

    fn notify(&self, call: impl FnOnce(&dyn ElementMirror) -> MirrorResult<()>) {
        if let Some(mirror) = &self.mirror {
            if let Err(e) = call(mirror.as_ref()) {
                log::warn!("Mirror update failed: {}", e);
            }
        }
    }
}
