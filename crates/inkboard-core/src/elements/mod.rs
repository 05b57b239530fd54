//! Element definitions for the canvas.

mod pen;
mod rectangle;
mod text;

pub use pen::{PEN_HIT_RADIUS, PenStroke};
pub use rectangle::{MIN_DRAW_SIZE, Rectangle};
pub use text::{DEFAULT_FONT_SIZE, TEXT_ASCENT, TEXT_BOX_WIDTH, TEXT_DESCENT, Text};

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Returns `None` for anything else.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(
                byte(0..1)? * 17,
                byte(1..2)? * 17,
                byte(2..3)? * 17,
            )),
            6 => Some(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Some(Self::new(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Blue used for rectangle fills and pen strokes.
pub const ACCENT_BLUE: SerializableColor = SerializableColor::rgb(0x3b, 0x82, 0xf6);
/// Dark gray used for text and outlines.
pub const INK_GRAY: SerializableColor = SerializableColor::rgb(0x1f, 0x29, 0x37);

/// Style properties for elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
}

impl ElementStyle {
    /// Default style for new rectangles.
    pub fn rectangle() -> Self {
        Self {
            fill_color: Some(ACCENT_BLUE),
            stroke_color: INK_GRAY,
            stroke_width: 2.0,
        }
    }

    /// Default style for new pen strokes.
    pub fn pen() -> Self {
        Self {
            fill_color: None,
            stroke_color: ACCENT_BLUE,
            stroke_width: 2.0,
        }
    }

    /// Default style for new text labels.
    pub fn text() -> Self {
        Self {
            fill_color: Some(INK_GRAY),
            stroke_color: INK_GRAY,
            stroke_width: 2.0,
        }
    }

    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

/// Creation and last-modification times, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: u64,
    pub updated_at: u64,
}

impl Timestamps {
    pub fn now() -> Self {
        let now = now_millis();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`, never moving it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::now()
    }
}

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Element discriminant, for hosts that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Rectangle,
    Text,
    Pen,
}

/// Common trait for all elements.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Bounding box in world coordinates, with non-negative extents.
    fn bounds(&self) -> Rect;

    /// Check if a world-space point hits this element.
    fn hit_test(&self, point: Point) -> bool;

    /// Path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ElementStyle;

    fn style_mut(&mut self) -> &mut ElementStyle;

    /// Move the element by a world-space delta.
    fn translate(&mut self, delta: Vec2);
}

/// Partial update for an element. `None` fields are left untouched and
/// fields that do not apply to the element's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// `Some(None)` clears the fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Option<SerializableColor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that moves an element's origin.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_style(&self, style: &mut ElementStyle) {
        if let Some(fill) = self.fill_color {
            style.fill_color = fill;
        }
        if let Some(stroke) = self.stroke_color {
            style.stroke_color = stroke;
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
    }
}

/// Enum wrapper for all element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Rectangle(Rectangle),
    Text(Text),
    Pen(PenStroke),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Rectangle(e) => e.id(),
            Element::Text(e) => e.id(),
            Element::Pen(e) => e.id(),
        }
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        match self {
            Element::Rectangle(e) => e.id = id,
            Element::Text(e) => e.id = id,
            Element::Pen(e) => e.id = id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Text(_) => ElementKind::Text,
            Element::Pen(_) => ElementKind::Pen,
        }
    }

    /// The element's origin: rectangle corner, text baseline anchor or first
    /// pen point.
    pub fn origin(&self) -> Point {
        match self {
            Element::Rectangle(e) => e.position,
            Element::Text(e) => e.position,
            Element::Pen(e) => e.origin(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Rectangle(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
            Element::Pen(e) => e.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Element::Rectangle(e) => e.hit_test(point),
            Element::Text(e) => e.hit_test(point),
            Element::Pen(e) => e.hit_test(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Element::Rectangle(e) => e.to_path(),
            Element::Text(e) => e.to_path(),
            Element::Pen(e) => e.to_path(),
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Rectangle(e) => e.style(),
            Element::Text(e) => e.style(),
            Element::Pen(e) => e.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            Element::Rectangle(e) => e.style_mut(),
            Element::Text(e) => e.style_mut(),
            Element::Pen(e) => e.style_mut(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Rectangle(e) => e.translate(delta),
            Element::Text(e) => e.translate(delta),
            Element::Pen(e) => e.translate(delta),
        }
    }

    pub fn timestamps(&self) -> &Timestamps {
        match self {
            Element::Rectangle(e) => &e.timestamps,
            Element::Text(e) => &e.timestamps,
            Element::Pen(e) => &e.timestamps,
        }
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        match self {
            Element::Rectangle(e) => &mut e.timestamps,
            Element::Text(e) => &mut e.timestamps,
            Element::Pen(e) => &mut e.timestamps,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    ///
    /// Kind-specific fields apply first; `x`/`y` then move the element so its
    /// origin lands on the requested coordinate.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        match self {
            Element::Rectangle(rect) => {
                if let Some(width) = patch.width {
                    rect.width = width;
                }
                if let Some(height) = patch.height {
                    rect.height = height;
                }
            }
            Element::Text(text) => {
                if let Some(content) = &patch.text {
                    text.content = content.clone();
                }
                if let Some(size) = patch.font_size {
                    text.font_size = size;
                }
            }
            Element::Pen(pen) => {
                if let Some(points) = &patch.points {
                    pen.points = points.clone();
                }
            }
        }

        if patch.x.is_some() || patch.y.is_some() {
            let origin = self.origin();
            let target = Point::new(patch.x.unwrap_or(origin.x), patch.y.unwrap_or(origin.y));
            self.translate(target - origin);
        }

        patch.apply_style(self.style_mut());
        self.timestamps_mut().touch();
    }

    /// Whether this element is worth committing: rectangles past the draw
    /// threshold on either axis, pen strokes with more than one point, and
    /// text with non-blank content.
    pub fn is_committable(&self) -> bool {
        match self {
            Element::Rectangle(rect) => rect.exceeds_draw_threshold(),
            Element::Text(text) => !text.content.trim().is_empty(),
            Element::Pen(pen) => pen.points.len() > 1,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Element::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_pen(&self) -> Option<&PenStroke> {
        match self {
            Element::Pen(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Rectangle> for Element {
    fn from(rect: Rectangle) -> Self {
        Element::Rectangle(rect)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

impl From<PenStroke> for Element {
    fn from(pen: PenStroke) -> Self {
        Element::Pen(pen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(SerializableColor::from_hex("#3b82f6"), Some(ACCENT_BLUE));
        assert_eq!(
            SerializableColor::from_hex("#fff"),
            Some(SerializableColor::white())
        );
        assert_eq!(
            SerializableColor::from_hex("#11223380"),
            Some(SerializableColor::new(0x11, 0x22, 0x33, 0x80))
        );
        assert_eq!(SerializableColor::from_hex("3b82f6"), None);
        assert_eq!(SerializableColor::from_hex("#zzzzzz"), None);
        assert_eq!(SerializableColor::from_hex("#12345"), None);
    }

    #[test]
    fn test_color_hex_roundtrip() {
        assert_eq!(INK_GRAY.to_hex(), "#1f2937");
        let translucent = SerializableColor::new(1, 2, 3, 4);
        assert_eq!(
            SerializableColor::from_hex(&translucent.to_hex()),
            Some(translucent)
        );
    }

    #[test]
    fn test_color_peniko_conversion() {
        let color: Color = ACCENT_BLUE.into();
        assert_eq!(SerializableColor::from(color), ACCENT_BLUE);
    }

    #[test]
    fn test_patch_moves_rectangle_and_resizes() {
        let mut element: Element =
            Rectangle::new(Point::new(10.0, 10.0), 40.0, 30.0, ElementStyle::rectangle()).into();
        let before = element.timestamps().updated_at;
        element.apply_patch(&ElementPatch {
            x: Some(20.0),
            width: Some(5.0),
            ..ElementPatch::default()
        });
        let rect = element.as_rectangle().unwrap();
        assert!((rect.position.x - 20.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 10.0).abs() < f64::EPSILON);
        assert!((rect.width - 5.0).abs() < f64::EPSILON);
        assert!(element.timestamps().updated_at >= before);
    }

    #[test]
    fn test_patch_moves_pen_points_with_origin() {
        let mut pen = PenStroke::new(Point::new(0.0, 0.0), ElementStyle::pen());
        pen.add_point(Point::new(10.0, 5.0));
        let mut element: Element = pen.into();
        element.apply_patch(&ElementPatch::position(100.0, 100.0));
        let pen = element.as_pen().unwrap();
        assert_eq!(pen.points, vec![Point::new(100.0, 100.0), Point::new(110.0, 105.0)]);
    }

    #[test]
    fn test_patch_ignores_foreign_fields() {
        let mut element: Element =
            Text::new(Point::new(0.0, 0.0), "hi", 16.0, ElementStyle::text()).into();
        element.apply_patch(&ElementPatch {
            width: Some(500.0),
            points: Some(vec![Point::ZERO]),
            text: Some("hello".to_string()),
            fill_color: Some(None),
            ..ElementPatch::default()
        });
        let text = element.as_text().unwrap();
        assert_eq!(text.content, "hello");
        assert_eq!(text.style.fill_color, None);
        assert!((text.bounds().width() - TEXT_BOX_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_committable() {
        let small: Element =
            Rectangle::new(Point::ZERO, 3.0, -4.0, ElementStyle::rectangle()).into();
        assert!(!small.is_committable());
        let wide: Element = Rectangle::new(Point::ZERO, 6.0, 0.0, ElementStyle::rectangle()).into();
        assert!(wide.is_committable());

        let blank: Element = Text::new(Point::ZERO, "  \t", 16.0, ElementStyle::text()).into();
        assert!(!blank.is_committable());

        let dot: Element = PenStroke::new(Point::ZERO, ElementStyle::pen()).into();
        assert!(!dot.is_committable());
    }

    #[test]
    fn test_element_json_is_tagged() {
        let element: Element =
            Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0, ElementStyle::rectangle()).into();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "rectangle");
        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }
}
