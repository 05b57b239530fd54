//! Display-list renderer.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::Scene;
use inkboard_core::elements::{Element, ElementTrait, PenStroke, Rectangle, Text};
use kurbo::{Cap, Join, Shape, Stroke};
use peniko::Color;

/// Outline width around selected rectangles and text.
const SELECTION_WIDTH: f64 = 2.0;
/// Gap between a rectangle or label and its selection outline.
const SELECTION_PADDING: f64 = 2.0;
/// Gap between a pen stroke's bounds and its dashed outline.
const PEN_SELECTION_PADDING: f64 = 5.0;
const PEN_SELECTION_DASH: f64 = 5.0;

/// Render the context into a fresh scene.
///
/// Order: clear, set the view transform once, paint each committed element
/// (with its selection outline when selected), then the in-progress element.
pub fn render(ctx: &RenderContext) -> Scene {
    let mut scene = Scene::new();
    render_into(&mut scene, ctx);
    scene
}

fn render_into(scene: &mut Scene, ctx: &RenderContext) {
    scene.clear(ctx.background_color);
    scene.set_transform(ctx.viewport.transform());

    for element in ctx.elements {
        paint_element(scene, element);
        if ctx.is_selected(element.id()) {
            paint_selection(scene, element, ctx.selection_color);
        }
    }

    if let Some(draft) = &ctx.in_progress {
        paint_element(scene, draft);
    }
}

fn paint_element(scene: &mut Scene, element: &Element) {
    match element {
        Element::Rectangle(rect) => paint_rectangle(scene, rect),
        Element::Text(text) => paint_text(scene, text),
        Element::Pen(pen) => paint_pen(scene, pen),
    }
}

fn paint_rectangle(scene: &mut Scene, rect: &Rectangle) {
    let path = rect.as_rect().to_path(0.1);
    match rect.style.fill() {
        Some(fill) => scene.fill(path, fill),
        // Unfilled rectangles still need to be visible.
        None => scene.stroke(path, Stroke::new(rect.style.stroke_width), rect.style.stroke()),
    }
}

fn paint_text(scene: &mut Scene, text: &Text) {
    let color = text.style.fill().unwrap_or_else(|| text.style.stroke());
    scene.text(text.position, text.content.as_str(), text.font_size, color);
}

fn paint_pen(scene: &mut Scene, pen: &PenStroke) {
    if pen.len() < 2 {
        return;
    }
    let stroke = Stroke::new(pen.style.stroke_width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    scene.stroke(pen.to_path(), stroke, pen.style.stroke());
}

fn paint_selection(scene: &mut Scene, element: &Element, color: Color) {
    match element {
        Element::Rectangle(_) | Element::Text(_) => {
            let outline = element
                .bounds()
                .inflate(SELECTION_PADDING, SELECTION_PADDING);
            scene.stroke(outline.to_path(0.1), Stroke::new(SELECTION_WIDTH), color);
        }
        Element::Pen(pen) => {
            let outline = pen
                .bounds()
                .inflate(PEN_SELECTION_PADDING, PEN_SELECTION_PADDING);
            let stroke = Stroke::new(1.0).with_dashes(0.0, [PEN_SELECTION_DASH, PEN_SELECTION_DASH]);
            scene.stroke(outline.to_path(0.1), stroke, color);
        }
    }
}

/// Renderer that keeps its scene between frames.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    scene: Scene,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the built scene to the caller.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let transform = ctx.viewport.transform();
        if !transform.as_coeffs().iter().all(|c| c.is_finite()) {
            return Err(RendererError::InvalidTransform(format!("{:?}", transform)));
        }
        self.scene.reset();
        render_into(&mut self.scene, ctx);
        log::trace!("Built scene: {}", self.scene.summary());
        Ok(())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCommand;
    use inkboard_core::elements::ElementStyle;
    use inkboard_core::selection::Selection;
    use inkboard_core::session::EditorSession;
    use inkboard_core::tools::ToolKind;
    use inkboard_core::viewport::Viewport;
    use inkboard_core::{Modifiers, MouseButton};
    use kurbo::{Point, Rect, Vec2};

    fn rect_element(x: f64, y: f64) -> Element {
        Rectangle::new(Point::new(x, y), 40.0, 30.0, ElementStyle::rectangle()).into()
    }

    #[test]
    fn test_order_clear_transform_elements() {
        let elements = vec![rect_element(0.0, 0.0), rect_element(10.0, 10.0)];
        let selection = Selection::new();
        let viewport = Viewport::with_pan_zoom(Vec2::new(5.0, 6.0), 2.0);
        let scene = render(&RenderContext::new(&elements, &selection, viewport));

        let commands = scene.commands();
        assert!(matches!(commands[0], DrawCommand::Clear(c) if c == Color::WHITE));
        assert!(matches!(commands[1], DrawCommand::SetTransform(t) if t == viewport.transform()));
        assert_eq!(commands.len(), 4);
        let transforms = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::SetTransform(_)))
            .count();
        assert_eq!(transforms, 1);
    }

    #[test]
    fn test_rectangle_fill_and_selection_outline() {
        let elements = vec![rect_element(10.0, 10.0)];
        let mut selection = Selection::new();
        selection.insert(elements[0].id());
        let ctx = RenderContext::new(&elements, &selection, Viewport::new());
        let scene = render(&ctx);

        match &scene.commands()[2] {
            DrawCommand::Fill { path, color } => {
                assert_eq!(path.bounding_box(), Rect::new(10.0, 10.0, 50.0, 40.0));
                assert_eq!(*color, Color::from_rgba8(0x3b, 0x82, 0xf6, 255));
            }
            other => panic!("expected fill, got {:?}", other),
        }
        match &scene.commands()[3] {
            DrawCommand::Stroke {
                path,
                stroke,
                color,
            } => {
                assert_eq!(path.bounding_box(), Rect::new(8.0, 8.0, 52.0, 42.0));
                assert!((stroke.width - 2.0).abs() < f64::EPSILON);
                assert!(stroke.dash_pattern.is_empty());
                assert_eq!(*color, ctx.selection_color);
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rectangle_renders_normalized() {
        let elements: Vec<Element> =
            vec![Rectangle::new(Point::new(50.0, 40.0), -40.0, -30.0, ElementStyle::rectangle()).into()];
        let selection = Selection::new();
        let scene = render(&RenderContext::new(&elements, &selection, Viewport::new()));
        match &scene.commands()[2] {
            DrawCommand::Fill { path, .. } => {
                assert_eq!(path.bounding_box(), Rect::new(10.0, 10.0, 50.0, 40.0));
            }
            other => panic!("expected fill, got {:?}", other),
        }
    }

    #[test]
    fn test_text_and_selection_box() {
        let elements: Vec<Element> =
            vec![Text::new(Point::new(0.0, 20.0), "Hello", 16.0, ElementStyle::text()).into()];
        let mut selection = Selection::new();
        selection.insert(elements[0].id());
        let scene = render(&RenderContext::new(&elements, &selection, Viewport::new()));

        assert!(matches!(
            &scene.commands()[2],
            DrawCommand::Text { origin, content, font_size, .. }
                if *origin == Point::new(0.0, 20.0) && content == "Hello" && (*font_size - 16.0).abs() < f64::EPSILON
        ));
        match &scene.commands()[3] {
            DrawCommand::Stroke { path, .. } => {
                assert_eq!(path.bounding_box(), Rect::new(-2.0, 2.0, 102.0, 26.0));
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_pen_selection_is_dashed() {
        let elements: Vec<Element> = vec![
            PenStroke::from_points(
                vec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
                ElementStyle::pen(),
            )
            .into(),
        ];
        let mut selection = Selection::new();
        selection.insert(elements[0].id());
        let scene = render(&RenderContext::new(&elements, &selection, Viewport::new()));
        assert_eq!(scene.summary().strokes, 2);
        match &scene.commands()[3] {
            DrawCommand::Stroke { path, stroke, .. } => {
                assert_eq!(path.bounding_box(), Rect::new(-5.0, -5.0, 15.0, 25.0));
                assert_eq!(stroke.dash_pattern.as_slice(), &[5.0, 5.0]);
                assert!((stroke.width - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_single_point_pen_is_not_painted() {
        let elements: Vec<Element> = vec![PenStroke::new(Point::ZERO, ElementStyle::pen()).into()];
        let selection = Selection::new();
        let scene = render(&RenderContext::new(&elements, &selection, Viewport::new()));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_in_progress_painted_last() {
        let mut session = EditorSession::new(Default::default(), vec![rect_element(0.0, 0.0)]);
        session.set_tool(ToolKind::Rectangle);
        session.pointer_down(Point::new(100.0, 100.0), MouseButton::Left, Modifiers::NONE);
        session.pointer_move(Point::new(200.0, 150.0));

        let scene = render(&RenderContext::from_session(&session));
        match scene.commands().last() {
            Some(DrawCommand::Fill { path, .. }) => {
                assert_eq!(path.bounding_box(), Rect::new(100.0, 100.0, 200.0, 150.0));
            }
            other => panic!("expected draft fill last, got {:?}", other),
        }
        assert_eq!(session.elements().len(), 1);
    }

    #[test]
    fn test_renderer_rejects_non_finite_transform() {
        let elements = Vec::new();
        let selection = Selection::new();
        let viewport = Viewport::with_pan_zoom(Vec2::new(f64::NAN, 0.0), 1.0);
        let mut renderer = DisplayListRenderer::new();
        let result = renderer.build_scene(&RenderContext::new(&elements, &selection, viewport));
        assert!(matches!(result, Err(RendererError::InvalidTransform(_))));
    }

    #[test]
    fn test_renderer_rebuilds_scene() {
        let elements = vec![rect_element(0.0, 0.0)];
        let selection = Selection::new();
        let ctx = RenderContext::new(&elements, &selection, Viewport::new());
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&ctx).unwrap();
        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.scene(), &render(&ctx));
        assert_eq!(renderer.background_color(&ctx), Color::WHITE);
        assert_eq!(renderer.take_scene().len(), 3);
        assert!(renderer.scene().is_empty());
    }
}
