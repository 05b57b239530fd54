//! Tool system for the canvas.

use crate::elements::{Element, ElementStyle, PenStroke, Rectangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Rectangle,
    Text,
    Hand,
}

impl ToolKind {
    /// Lowercase name, as used in logs and scripts.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pen => "pen",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Text => "text",
            ToolKind::Hand => "hand",
        }
    }
}

/// Pointer cursor a host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorIcon {
    Default,
    Crosshair,
    Text,
    Grab,
    Grabbing,
}

/// Pending text entry opened by a text-tool click.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    /// Baseline anchor of the label to create.
    pub world: Point,
    /// Where the host should place its input field.
    pub screen: Point,
    /// Characters typed so far, for hosts that route keys through the session.
    pub buffer: String,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    #[default]
    Idle,
    /// Select-tool click in progress.
    Selecting,
    /// Panning; `last_screen` is the previous pointer position.
    DraggingPan { last_screen: Point },
    /// Rectangle being dragged out.
    DrawingRectangle { draft: Rectangle },
    /// Pen stroke being sampled.
    DrawingPen { draft: PenStroke },
    /// Waiting for the host to submit or cancel a label.
    AwaitingTextInput(TextEntry),
}

impl ToolState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ToolState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            ToolState::DrawingRectangle { .. } | ToolState::DrawingPen { .. }
        )
    }
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    current_tool: ToolKind,
    pub state: ToolState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Switch tools. Any gesture in flight is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a draft for the current drawing tool at a world point.
    /// Does nothing for tools that do not draw.
    pub fn begin(&mut self, world: Point, style: ElementStyle) {
        self.state = match self.current_tool {
            ToolKind::Rectangle => ToolState::DrawingRectangle {
                draft: Rectangle::new(world, 0.0, 0.0, style),
            },
            ToolKind::Pen => ToolState::DrawingPen {
                draft: PenStroke::new(world, style),
            },
            _ => return,
        };
    }

    /// Extend the draft to a world point.
    pub fn update(&mut self, world: Point) {
        match &mut self.state {
            ToolState::DrawingRectangle { draft } => draft.drag_to(world),
            ToolState::DrawingPen { draft } => draft.add_point(world),
            _ => {}
        }
    }

    /// Finish the draft. Returns the element to commit, or `None` when there
    /// was no draft or it fell below the commit threshold.
    pub fn end(&mut self) -> Option<Element> {
        let element = match std::mem::take(&mut self.state) {
            ToolState::DrawingRectangle { mut draft } => {
                draft.normalize();
                Element::Rectangle(draft)
            }
            ToolState::DrawingPen { draft } => Element::Pen(draft),
            other => {
                self.state = other;
                return None;
            }
        };
        if element.is_committable() {
            Some(element)
        } else {
            log::debug!("Discarded {:?} draft below commit threshold", element.kind());
            None
        }
    }

    /// Abandon whatever is in progress.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// The draft element, if a drawing gesture is active.
    pub fn preview(&self) -> Option<Element> {
        match &self.state {
            ToolState::DrawingRectangle { draft } => Some(Element::Rectangle(draft.clone())),
            ToolState::DrawingPen { draft } => Some(Element::Pen(draft.clone())),
            _ => None,
        }
    }

    pub fn cursor(&self) -> CursorIcon {
        match (&self.state, self.current_tool) {
            (ToolState::DraggingPan { .. }, _) => CursorIcon::Grabbing,
            (_, ToolKind::Select) => CursorIcon::Default,
            (_, ToolKind::Pen | ToolKind::Rectangle) => CursorIcon::Crosshair,
            (_, ToolKind::Text) => CursorIcon::Text,
            (_, ToolKind::Hand) => CursorIcon::Grab,
        }
    }
}
