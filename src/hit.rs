//! Hit-testing against document elements.
//!
//! All queries work in world space with a world-unit tolerance; callers
//! convert their fixed pixel slop through
//! [`crate::camera::Camera::screen_dist_to_world`] first. Nodes always win
//! over beams at the same point, and within each collection the first match
//! in insertion order wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{BeamId, Document, NodeId};

/// Which element a hit test resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Node(NodeId),
    Beam(BeamId),
}

/// Distance from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment; a degenerate segment
/// (`a == b`) falls back to the distance to `a`.
#[must_use]
pub fn dist_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let cx = a.x + t * dx;
    let cy = a.y + t * dy;
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Test which element (if any) is under `world_pt`.
///
/// Node distance uses an inclusive bound (`<= tolerance`); beam-segment
/// distance a strict one (`< tolerance`). Beams with a missing endpoint are
/// skipped.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &Document, tolerance: f64) -> Option<HitTarget> {
    if let Some(node) = doc.find_node_at(world_pt.x, world_pt.y, tolerance) {
        return Some(HitTarget::Node(node.id));
    }

    for beam in &doc.beams {
        let Some((a, b)) = doc.beam_endpoints(beam) else {
            continue;
        };
        if dist_point_to_segment(world_pt, a, b) < tolerance {
            return Some(HitTarget::Beam(beam.id));
        }
    }

    None
}
