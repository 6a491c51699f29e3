//! Snap-point resolution.
//!
//! Given a raw screen-space pointer position, [`resolve`] produces the
//! position the cursor should act at, preferring semantically meaningful
//! points nearby. Rules run in a fixed priority order and the first enabled
//! rule that matches wins:
//!
//! 1. node
//! 2. beam endpoint (start before end, beams in insertion order)
//! 3. beam midpoint
//! 4. grid intersection (always matches when enabled)
//!
//! When nothing matches the raw input point passes through unchanged.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::camera::{Camera, Point};
use crate::consts::SNAP_TOLERANCE_PX;
use crate::doc::Document;
use crate::grid::Grid;

/// What a resolved snap point locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    Node,
    Endpoint,
    Midpoint,
    Grid,
}

/// A resolved snap target in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub x: f64,
    pub y: f64,
    pub kind: SnapKind,
}

/// Which snap rules are active.
///
/// `intersection`, `perpendicular`, and `nearest` are accepted configuration
/// with no resolution rule behind them: they can be toggled and round-trip
/// through the engine, but [`resolve`] never consults them.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy)]
pub struct SnapConfig {
    pub node: bool,
    pub endpoint: bool,
    pub midpoint: bool,
    pub grid: bool,
    pub intersection: bool,
    pub perpendicular: bool,
    pub nearest: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            node: true,
            endpoint: true,
            midpoint: true,
            grid: true,
            intersection: false,
            perpendicular: false,
            nearest: false,
        }
    }
}

/// Outcome of a snap query: the screen point to act at, and what (if
/// anything) it locked onto.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub screen: Point,
    pub active: Option<SnapPoint>,
}

/// Resolve a raw screen point against the document.
///
/// Tolerance for the node/endpoint/midpoint rules is [`SNAP_TOLERANCE_PX`]
/// converted to world units; the node rule is inclusive at the boundary while
/// endpoint/midpoint are strict, matching the hit-test conventions.
#[must_use]
pub fn resolve(
    screen_pt: Point,
    doc: &Document,
    camera: &Camera,
    config: &SnapConfig,
    grid: &Grid,
) -> Resolution {
    let world = camera.screen_to_world(screen_pt);
    let tolerance = camera.screen_dist_to_world(SNAP_TOLERANCE_PX);

    if config.node {
        if let Some(node) = doc.find_node_at(world.x, world.y, tolerance) {
            return locked(camera, node.x, node.y, SnapKind::Node);
        }
    }

    if config.endpoint {
        for beam in &doc.beams {
            for end in [beam.start, beam.end] {
                let Some(node) = doc.node(end) else {
                    continue;
                };
                if dist(world, node.position()) < tolerance {
                    return locked(camera, node.x, node.y, SnapKind::Endpoint);
                }
            }
        }
    }

    if config.midpoint {
        for beam in &doc.beams {
            let Some((a, b)) = doc.beam_endpoints(beam) else {
                continue;
            };
            let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            if dist(world, mid) < tolerance {
                return locked(camera, mid.x, mid.y, SnapKind::Midpoint);
            }
        }
    }

    if config.grid {
        let snapped = grid.snap_to(world);
        return locked(camera, snapped.x, snapped.y, SnapKind::Grid);
    }

    Resolution { screen: screen_pt, active: None }
}

fn locked(camera: &Camera, x: f64, y: f64, kind: SnapKind) -> Resolution {
    Resolution {
        screen: camera.world_to_screen(Point::new(x, y)),
        active: Some(SnapPoint { x, y, kind }),
    }
}

fn dist(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
