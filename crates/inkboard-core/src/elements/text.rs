//! Text element.

use super::{ElementId, ElementStyle, ElementTrait, Timestamps};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size for new labels.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Approximate label width used for hit-testing and selection.
pub const TEXT_BOX_WIDTH: f64 = 100.0;
/// Extent of the label box above the baseline.
pub const TEXT_ASCENT: f64 = 16.0;
/// Extent of the label box below the baseline.
pub const TEXT_DESCENT: f64 = 4.0;

/// A single-line text label anchored at its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Left end of the baseline.
    pub position: Point,
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    pub style: ElementStyle,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

impl Text {
    pub fn new(position: Point, content: impl Into<String>, font_size: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_size,
            style,
            timestamps: Timestamps::now(),
        }
    }

    /// The fixed label box. Text is not measured; every label gets the same
    /// 100 x 20 box around its baseline.
    pub fn text_box(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - TEXT_ASCENT,
            self.position.x + TEXT_BOX_WIDTH,
            self.position.y + TEXT_DESCENT,
        )
    }
}

impl ElementTrait for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.text_box()
    }

    fn hit_test(&self, point: Point) -> bool {
        let rect = self.text_box();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    fn to_path(&self) -> BezPath {
        // No glyph outlines; the box stands in for selection purposes.
        self.text_box().to_path(0.1)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_around_baseline() {
        let text = Text::new(Point::new(10.0, 50.0), "Hello", DEFAULT_FONT_SIZE, ElementStyle::text());
        assert_eq!(text.bounds(), Rect::new(10.0, 34.0, 110.0, 54.0));
    }

    #[test]
    fn test_hit_test() {
        let text = Text::new(Point::new(0.0, 20.0), "x", DEFAULT_FONT_SIZE, ElementStyle::text());
        assert!(text.hit_test(Point::new(0.0, 4.0)));
        assert!(text.hit_test(Point::new(100.0, 24.0)));
        assert!(text.hit_test(Point::new(50.0, 20.0)));
        assert!(!text.hit_test(Point::new(50.0, 3.9)));
        assert!(!text.hit_test(Point::new(100.1, 20.0)));
    }

    #[test]
    fn test_missing_font_size_defaults() {
        let text = Text::new(Point::ZERO, "x", 22.0, ElementStyle::text());
        let mut json = serde_json::to_value(&text).unwrap();
        json.as_object_mut().unwrap().remove("font_size");
        let back: Text = serde_json::from_value(json).unwrap();
        assert!((back.font_size - DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
    }
}
