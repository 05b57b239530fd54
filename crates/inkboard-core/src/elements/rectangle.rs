//! Rectangle element.

use super::{ElementId, ElementStyle, ElementTrait, Timestamps};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A draw gesture must exceed this many world units on at least one axis to
/// produce a rectangle.
pub const MIN_DRAW_SIZE: f64 = 5.0;

/// An axis-aligned rectangle.
///
/// `width` and `height` are signed while a rectangle is being dragged out;
/// committed rectangles are normalized. Anything geometric goes through
/// [`Rectangle::as_rect`], which normalizes either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Origin corner (where the drag started).
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub style: ElementStyle,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style,
            timestamps: Timestamps::now(),
        }
    }

    /// Drag the free corner to `corner`, keeping the origin fixed.
    pub fn drag_to(&mut self, corner: Point) {
        self.width = corner.x - self.position.x;
        self.height = corner.y - self.position.y;
    }

    /// Rewrite negative extents so the origin is the top-left corner.
    pub fn normalize(&mut self) {
        let rect = self.as_rect();
        self.position = Point::new(rect.x0, rect.y0);
        self.width = rect.width();
        self.height = rect.height();
    }

    /// The rectangle as a kurbo `Rect` with non-negative extents.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
        .abs()
    }

    pub fn exceeds_draw_threshold(&self) -> bool {
        self.width.abs() > MIN_DRAW_SIZE || self.height.abs() > MIN_DRAW_SIZE
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point) -> bool {
        // Inclusive on every edge.
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
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
