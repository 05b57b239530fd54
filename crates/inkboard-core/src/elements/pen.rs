//! Freehand pen stroke element.

use super::{ElementId, ElementStyle, ElementTrait, Timestamps};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point hits a stroke when it is strictly closer than this to one of the
/// stroke's sample points. The distance is Euclidean, so the hit area around
/// each sample is a circle rather than a 20×20 box: a point 8 units off on
/// both axes (about 11.3 away) misses.
pub const PEN_HIT_RADIUS: f64 = 10.0;

/// A freehand stroke, stored as its sampled world-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenStroke {
    pub(crate) id: ElementId,
    pub points: Vec<Point>,
    pub style: ElementStyle,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl PenStroke {
    /// Start a stroke with a single point.
    pub fn new(start: Point, style: ElementStyle) -> Self {
        Self::from_points(vec![start], style)
    }

    pub fn from_points(points: Vec<Point>, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
            timestamps: Timestamps::now(),
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First sample, or the world origin for an empty stroke.
    pub fn origin(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }
}

impl ElementTrait for PenStroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point) -> bool {
        // Sample points only, not the segments between them.
        self.points
            .iter()
            .any(|p| p.distance(point) < PEN_HIT_RADIUS)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for point in points {
                path.line_to(*point);
            }
        }
        path
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
