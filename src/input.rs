//! Input model: tool modes, modifier keys, mouse buttons, and the gesture
//! state machine.
//!
//! `Mode` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active press gesture being tracked between
//! pointer-down and pointer-up. `UiState` is the persistent editor state the
//! renderer consumes: the armed beam, the selection, the marquee, and the
//! currently resolved snap point.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::NodeId;
use crate::selection::Selection;
use crate::snap::SnapPoint;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No tool; pointer events are ignored.
    None,
    /// Place a node on each click (default).
    #[default]
    AddNode,
    /// Two-click member placement: arm on a start node, complete on an end
    /// node.
    AddBeam,
    /// Attach a support marker to the clicked node.
    AddSupport,
    /// Attach a force marker to the clicked node.
    AddForce,
    /// Point selection with shift-additive toggling.
    Select,
    /// Drag a rectangle; everything inside is selected on release.
    WindowSelect,
    /// Delete the element under each click (nodes cascade).
    Delete,
    /// Drag to pan the viewport.
    Pan,
}

impl Mode {
    /// Whether this tool places elements and therefore wants the crosshair
    /// cursor and snap resolution on pointer-down.
    #[must_use]
    pub fn is_placement(self) -> bool {
        matches!(
            self,
            Self::AddNode | Self::AddBeam | Self::AddSupport | Self::AddForce | Self::WindowSelect
        )
    }
}

/// Sub-mode of [`Mode::AddBeam`]: what kind of member gets created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawKind {
    /// One member per arm/complete cycle.
    #[default]
    Beam,
    /// Chained members: completing one re-arms at its end node.
    Truss,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key code as reported by the browser
/// (e.g. `"Delete"`, `"Escape"`, `"KeyG"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Screen-space marquee rectangle, for rendering an in-progress window
/// selection.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    /// Normalized rectangle spanning two corner points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}

/// Persistent editor state visible to the renderer.
#[derive(Debug, Default)]
pub struct UiState {
    /// Currently active tool.
    pub mode: Mode,
    /// Member kind produced by the beam tool.
    pub draw_kind: DrawKind,
    /// Start node of an in-progress member, once armed.
    pub beam_start: Option<NodeId>,
    /// Screen-space endpoint of the in-progress member preview.
    pub beam_preview: Option<Point>,
    /// The most recently placed or connected node.
    pub active_node: Option<NodeId>,
    /// Current multi-selection.
    pub selection: Selection,
    /// In-progress window-selection rectangle.
    pub marquee: Option<SelectionRect>,
    /// Snap point resolved by the latest pointer event.
    pub snap_active: Option<SnapPoint>,
}

impl UiState {
    /// Drop all transient per-gesture state: the armed beam, its preview,
    /// and the marquee. Runs on every mode switch and on `Escape`.
    pub fn clear_transient(&mut self) {
        self.beam_start = None;
        self.beam_preview = None;
        self.marquee = None;
    }
}

/// Internal state for the press-gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the previous pointer event, used to
        /// compute the pan delta.
        last_screen: Point,
    },
    /// The user is dragging a window-selection rectangle.
    Marquee {
        /// Screen-space corner where the drag started.
        start_screen: Point,
    },
}
