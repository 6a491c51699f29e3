//! The multi-selection set and the two ways of filling it.
//!
//! Point selection toggles membership of the element under the cursor; nodes
//! take priority over beams. Rectangle selection is add-only: nodes whose
//! position lies inside the rectangle and beams with *both* endpoints inside.
//! The toggle/add asymmetry between the two paths is deliberate.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::camera::Point;
use crate::doc::Document;
use crate::hit::{self, HitTarget};

/// Which collection a selection entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Beam,
}

/// A reference to a selected element. A node and a beam may share a numeric
/// id without conflict; the kind disambiguates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: u32,
}

impl ElementRef {
    #[must_use]
    pub fn node(id: u32) -> Self {
        Self { kind: ElementKind::Node, id }
    }

    #[must_use]
    pub fn beam(id: u32) -> Self {
        Self { kind: ElementKind::Beam, id }
    }
}

/// The current selection: semantically a set keyed by `(kind, id)`, stored
/// in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<ElementRef>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, entry: ElementRef) -> bool {
        self.entries.contains(&entry)
    }

    /// Add an entry unless it is already present.
    pub fn insert(&mut self, entry: ElementRef) {
        if !self.contains(entry) {
            self.entries.push(entry);
        }
    }

    /// Remove an entry if present.
    pub fn remove(&mut self, entry: ElementRef) {
        self.entries.retain(|e| *e != entry);
    }

    /// Flip membership of an entry.
    pub fn toggle(&mut self, entry: ElementRef) {
        if self.contains(entry) {
            self.remove(entry);
        } else {
            self.entries.push(entry);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementRef> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select or deselect whatever lies under `world_pt`.
    ///
    /// Unless `additive`, the selection is cleared first. A node hit toggles
    /// that node and stops — beams underneath are never considered. With no
    /// node hit, the first beam within `tolerance` toggles. A miss leaves a
    /// non-additive selection empty.
    pub fn select_at(&mut self, doc: &Document, world_pt: Point, tolerance: f64, additive: bool) {
        if !additive {
            self.clear();
        }
        match hit::hit_test(world_pt, doc, tolerance) {
            Some(HitTarget::Node(id)) => self.toggle(ElementRef::node(id)),
            Some(HitTarget::Beam(id)) => self.toggle(ElementRef::beam(id)),
            None => {}
        }
    }

    /// Select every element inside the closed world-space rectangle.
    ///
    /// Nodes qualify by position; beams only when both endpoints are inside
    /// (a beam crossing the boundary is excluded). Entries are added, never
    /// toggled off, and never duplicated.
    pub fn select_in_rect(
        &mut self,
        doc: &Document,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        additive: bool,
    ) {
        if !additive {
            self.clear();
        }

        let inside =
            |p: Point| p.x >= left && p.x <= right && p.y >= top && p.y <= bottom;

        for node in &doc.nodes {
            if inside(node.position()) {
                self.insert(ElementRef::node(node.id));
            }
        }

        for beam in &doc.beams {
            let Some((a, b)) = doc.beam_endpoints(beam) else {
                continue;
            };
            if inside(a) && inside(b) {
                self.insert(ElementRef::beam(beam.id));
            }
        }
    }
}
