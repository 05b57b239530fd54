//! Backend-neutral display list.

use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Color;

/// One drawing operation, in the coordinate space set by the most recent
/// [`DrawCommand::SetTransform`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Color),
    /// Replace the current world-to-screen transform.
    SetTransform(Affine),
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        color: Color,
    },
    /// A single line of text whose baseline starts at `origin`.
    Text {
        origin: Point,
        content: String,
        font_size: f64,
        color: Color,
    },
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    pub fn fill(&mut self, path: BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill { path, color });
    }

    pub fn stroke(&mut self, path: BezPath, stroke: Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path,
            stroke,
            color,
        });
    }

    pub fn text(&mut self, origin: Point, content: impl Into<String>, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin,
            content: content.into(),
            font_size,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Count of (fills, strokes, texts), for logging and tests.
    pub fn summary(&self) -> SceneSummary {
        let mut summary = SceneSummary::default();
        for command in &self.commands {
            match command {
                DrawCommand::Fill { .. } => summary.fills += 1,
                DrawCommand::Stroke { .. } => summary.strokes += 1,
                DrawCommand::Text { .. } => summary.texts += 1,
                DrawCommand::Clear(_) | DrawCommand::SetTransform(_) => {}
            }
        }
        summary
    }
}

/// Per-kind command counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneSummary {
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} fills, {} strokes, {} texts",
            self.fills, self.strokes, self.texts
        )
    }
}
