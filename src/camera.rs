#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{EXTENTS_PADDING, MAX_ZOOM, MIN_EXTENT, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`] by every mutation.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    ///
    /// Hit and snap tolerances are fixed in pixels; dividing by the zoom keeps
    /// the apparent radius constant at every zoom level.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the zoom by `factor`, anchored at the screen point `center`.
    ///
    /// The world point under `center` before the call is still under `center`
    /// afterwards, unless the zoom clamps at [`MIN_ZOOM`] or [`MAX_ZOOM`].
    pub fn zoom_at(&mut self, factor: f64, center: Point) {
        let anchor = self.screen_to_world(center);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = center.x - anchor.x * self.zoom;
        self.pan_y = center.y - anchor.y * self.zoom;
    }

    /// Fit the world-space box `(min, max)` into a viewport of
    /// `viewport_w` x `viewport_h` CSS pixels.
    ///
    /// The box is padded by [`EXTENTS_PADDING`] world units per side and its
    /// top-left corner ends up at the screen origin. Degenerate boxes (a
    /// single node, or all nodes collinear) are widened to [`MIN_EXTENT`]
    /// before the scale division.
    pub fn zoom_extents(&mut self, min: Point, max: Point, viewport_w: f64, viewport_h: f64) {
        let left = min.x - EXTENTS_PADDING;
        let top = min.y - EXTENTS_PADDING;
        let width = (max.x - min.x + 2.0 * EXTENTS_PADDING).max(MIN_EXTENT);
        let height = (max.y - min.y + 2.0 * EXTENTS_PADDING).max(MIN_EXTENT);

        self.zoom = (viewport_w / width).min(viewport_h / height).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = -left * self.zoom;
        self.pan_y = -top * self.zoom;
    }

    /// Current zoom as a whole percentage, rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}
