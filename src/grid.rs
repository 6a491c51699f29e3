#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::Point;
use crate::consts::{GRID_MAJOR_EVERY, GRID_SIZE};

/// Grid configuration.
///
/// `enabled` gates the grid as a whole (drawing and labels); `visible` is the
/// user-facing show/hide toggle. Snapping consults neither — the snap layer
/// has its own grid flag — so the grid can be hidden while grid snap stays
/// active.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub enabled: bool,
    pub visible: bool,
    /// Spacing between grid lines in world units.
    pub size: f64,
    /// Every n-th line is drawn as a major line.
    pub major_every: u32,
    /// Draw coordinate labels on major lines.
    pub show_labels: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            size: GRID_SIZE,
            major_every: GRID_MAJOR_EVERY,
            show_labels: true,
        }
    }
}

impl Grid {
    /// Round a world point to the nearest grid intersection, independently
    /// per axis. Halfway values round away from zero.
    #[must_use]
    pub fn snap_to(&self, world: Point) -> Point {
        Point {
            x: (world.x / self.size).round() * self.size,
            y: (world.y / self.size).round() * self.size,
        }
    }

    /// Flip visibility. Enablement is unaffected.
    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }
}
