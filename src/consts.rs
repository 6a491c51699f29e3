//! Shared numeric constants for the engine.

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom clamp (10%).
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom clamp (1000%).
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom multiplier per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Zoom multiplier for the +/- shortcuts and toolbar buttons.
pub const KEY_ZOOM_STEP: f64 = 1.2;

/// Padding around the node bounding box for zoom-extents, in world units.
pub const EXTENTS_PADDING: f64 = 50.0;

/// Minimum bounding-box extent for zoom-extents; guards the scale division
/// when every node shares an x or y coordinate.
pub const MIN_EXTENT: f64 = 1e-9;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for selecting and deleting elements.
pub const HIT_TOLERANCE_PX: f64 = 10.0;

/// Screen-space radius in pixels within which snap rules engage. Wider than
/// the hit tolerance; the two are not interchangeable.
pub const SNAP_TOLERANCE_PX: f64 = 15.0;

// ── Grid ────────────────────────────────────────────────────────

/// Default grid spacing in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Every n-th grid line is drawn as a major line.
pub const GRID_MAJOR_EVERY: u32 = 5;
