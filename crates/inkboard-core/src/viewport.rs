//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom the viewport accepts.
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplier used by the zoom in/out buttons.
pub const ZOOM_STEP: f64 = 1.2;
/// Wheel factor when scrolling down (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Wheel factor when scrolling up (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Viewport manages the view transform for the canvas.
///
/// `pan` is a screen-pixel offset and `zoom` a uniform scale, so that
/// `screen = world * zoom + pan`. Zoom is clamped to [`MIN_ZOOM`, `MAX_ZOOM`]
/// on every mutation; the fields are private so nothing can bypass that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewport")]
pub struct Viewport {
    pan: Vec2,
    zoom: f64,
}

/// Unchecked wire form; converted through the clamp on deserialize.
#[derive(Deserialize)]
struct RawViewport {
    pan: Vec2,
    zoom: f64,
}

impl From<RawViewport> for Viewport {
    fn from(raw: RawViewport) -> Self {
        Self::with_pan_zoom(raw.pan, raw.zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport at 100% with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with an explicit pan and zoom. Zoom is clamped.
    pub fn with_pan_zoom(pan: Vec2, zoom: f64) -> Self {
        Self {
            pan,
            zoom: clamp_zoom(zoom),
        }
    }

    /// Current zoom factor, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen pixels.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Affine transform from world to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Affine transform from screen to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan)
    }

    /// Convert a screen point to world coordinates.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Set zoom directly, leaving pan untouched.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor` fixed.
    ///
    /// Uses `pan' = anchor - (anchor - pan) * (z' / z)` directly so repeated
    /// gestures do not accumulate error. Returns false when the clamp leaves
    /// zoom unchanged.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        let new_zoom = clamp_zoom(self.zoom * factor);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let ratio = new_zoom / self.zoom;
        let anchor = anchor.to_vec2();
        self.pan = anchor - (anchor - self.pan) * ratio;
        self.zoom = new_zoom;
        true
    }

    /// Wheel zoom anchored at the pointer. Positive `delta_y` zooms out.
    pub fn wheel_zoom(&mut self, anchor: Point, delta_y: f64) -> bool {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_at(anchor, factor)
    }

    /// Step zoom up by [`ZOOM_STEP`]. Pan is unchanged.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Step zoom down by [`ZOOM_STEP`]. Pan is unchanged.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
