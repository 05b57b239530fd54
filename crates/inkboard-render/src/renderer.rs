//! Renderer trait abstraction.

use crate::scene::Scene;
use inkboard_core::elements::{Element, ElementId};
use inkboard_core::selection::Selection;
use inkboard_core::session::EditorSession;
use inkboard_core::viewport::Viewport;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid view transform: {0}")]
    InvalidTransform(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything a renderer reads for one frame. Rendering never mutates it.
pub struct RenderContext<'a> {
    /// Committed elements in paint order.
    pub elements: &'a [Element],
    /// The element being drawn, painted above everything else.
    pub in_progress: Option<Element>,
    pub selection: &'a Selection,
    pub viewport: Viewport,
    pub background_color: Color,
    /// Selection outline color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(elements: &'a [Element], selection: &'a Selection, viewport: Viewport) -> Self {
        Self {
            elements,
            in_progress: None,
            selection,
            viewport,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(0x25, 0x63, 0xeb, 255),
        }
    }

    /// Context for the session's current state.
    pub fn from_session(session: &'a EditorSession) -> Self {
        Self::new(session.elements(), session.selection(), *session.viewport())
            .with_in_progress(session.in_progress())
    }

    pub fn with_in_progress(mut self, element: Option<Element>) -> Self {
        self.in_progress = element;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(id)
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the frame's scene from the context.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// The most recently built scene.
    fn scene(&self) -> &Scene;

    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
