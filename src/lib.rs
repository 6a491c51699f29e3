//! Canvas engine for a 2D structural-diagram editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing surface: translating raw DOM input events
//! into document mutations (nodes, beams, supports, forces), maintaining
//! camera state for pan/zoom, resolving snap points, hit-testing elements for
//! selection and deletion, and rendering the scene. The host JavaScript layer
//! is responsible only for wiring DOM events to the engine and reflecting the
//! returned [`engine::Action`]s (redraw scheduling, cursor changes,
//! status-bar text).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Document aggregate: nodes, beams, supports, forces |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`grid`] | Grid configuration and nearest-grid-point rounding |
//! | [`snap`] | Priority-ordered snap-point resolution |
//! | [`hit`] | Hit-testing nodes and beams |
//! | [`selection`] | Toggle-based multi-selection set |
//! | [`input`] | Input event types, tool modes, and the gesture state machine |
//! | [`render`] | Scene and grid rendering |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod snap;
