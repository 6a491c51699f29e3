//! Document model: nodes, beams, supports, forces, and the aggregate that
//! owns them.
//!
//! Nodes are the only owning collection; beams, supports, and forces refer to
//! nodes by id and must re-resolve through a lookup every time they are used,
//! tolerating misses. Deleting a node cascades to everything referencing it.
//! Collections are insertion-ordered `Vec`s on purpose: hit-testing and snap
//! resolution return the *first* match in iteration order, so the order is
//! part of the observable contract.
//!
//! Ids are assigned as `max existing id + 1` (starting at 1). They are not
//! monotonic counters: delete the highest-numbered element and the next
//! creation reuses its id.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Unique identifier for a node.
pub type NodeId = u32;

/// Unique identifier for a beam.
pub type BeamId = u32;

/// The structural kind of a member between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamKind {
    /// Rigid member, drawn solid.
    Beam,
    /// Pin-jointed member, drawn dashed; placement chains member-to-member.
    Truss,
}

/// A joint in the structure, positioned in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// World-space position as a [`Point`].
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A member connecting two nodes, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beam {
    pub id: BeamId,
    pub start: NodeId,
    pub end: NodeId,
    pub kind: BeamKind,
}

/// A support marker attached to a node. Only the attachment is stored;
/// nothing is ever solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub node: NodeId,
}

/// A force marker attached to a node. Position only, like [`Support`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Force {
    pub node: NodeId,
}

/// The in-memory document: every element on the canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub beams: Vec<Beam>,
    pub supports: Vec<Support>,
    pub forces: Vec<Force>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a beam by id.
    #[must_use]
    pub fn beam(&self, id: BeamId) -> Option<&Beam> {
        self.beams.iter().find(|b| b.id == id)
    }

    /// Resolve both endpoints of a beam, or `None` if either node is gone.
    #[must_use]
    pub fn beam_endpoints(&self, beam: &Beam) -> Option<(Point, Point)> {
        let start = self.node(beam.start)?;
        let end = self.node(beam.end)?;
        Some((start.position(), end.position()))
    }

    /// The first node (in insertion order) within `tolerance` world units of
    /// `(x, y)`. Deliberately *not* the nearest: ties and overlaps resolve to
    /// whichever node was created first.
    #[must_use]
    pub fn find_node_at(&self, x: f64, y: f64, tolerance: f64) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| ((n.x - x).powi(2) + (n.y - y).powi(2)).sqrt() <= tolerance)
    }

    /// Add a node at the given world position, returning its id.
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = self.nodes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        self.nodes.push(Node { id, x, y });
        id
    }

    /// Add a beam between two existing nodes.
    ///
    /// Returns `None` without mutating when `start == end` (zero-length
    /// members are rejected) or when either node does not exist. Duplicate
    /// members between the same pair are allowed.
    pub fn add_beam(&mut self, start: NodeId, end: NodeId, kind: BeamKind) -> Option<BeamId> {
        if start == end || self.node(start).is_none() || self.node(end).is_none() {
            return None;
        }
        let id = self.beams.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        self.beams.push(Beam { id, start, end, kind });
        Some(id)
    }

    /// Attach a support to an existing node. Returns false if the node is
    /// missing.
    pub fn add_support(&mut self, node: NodeId) -> bool {
        if self.node(node).is_none() {
            return false;
        }
        self.supports.push(Support { node });
        true
    }

    /// Attach a force to an existing node. Returns false if the node is
    /// missing.
    pub fn add_force(&mut self, node: NodeId) -> bool {
        if self.node(node).is_none() {
            return false;
        }
        self.forces.push(Force { node });
        true
    }

    /// Remove a node and everything referencing it: beams with it as an
    /// endpoint, and supports/forces attached to it. Returns false if the
    /// node was not present (in which case nothing changes).
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.beams.retain(|b| b.start != id && b.end != id);
        self.supports.retain(|s| s.node != id);
        self.forces.retain(|f| f.node != id);
        self.nodes.retain(|n| n.id != id);
        true
    }

    /// Remove a beam by id, leaving its nodes in place. Returns false if the
    /// beam was not present.
    pub fn remove_beam(&mut self, id: BeamId) -> bool {
        let before = self.beams.len();
        self.beams.retain(|b| b.id != id);
        self.beams.len() != before
    }

    /// Axis-aligned bounding box over all node positions, or `None` when the
    /// document has no nodes.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.nodes.first()?;
        let mut min = first.position();
        let mut max = min;
        for n in &self.nodes[1..] {
            min.x = min.x.min(n.x);
            min.y = min.y.min(n.y);
            max.x = max.x.max(n.x);
            max.y = max.y.max(n.y);
        }
        Some((min, max))
    }

    /// Replace every collection with the given snapshot.
    pub fn load_snapshot(&mut self, snapshot: Document) {
        *self = snapshot;
    }

    /// Returns `true` if the document holds no elements of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.beams.is_empty()
            && self.supports.is_empty()
            && self.forces.is_empty()
    }
}
