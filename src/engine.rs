use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{HIT_TOLERANCE_PX, KEY_ZOOM_STEP, WHEEL_ZOOM_STEP};
use crate::doc::{BeamKind, Document, NodeId};
use crate::grid::Grid;
use crate::hit;
use crate::input::{
    Button, DrawKind, InputState, Key, Mode, Modifiers, SelectionRect, UiState, WheelDelta,
};
use crate::render;
use crate::selection::{ElementKind, Selection};
use crate::snap::{self, SnapConfig};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The structure layer must be repainted.
    RenderNeeded,
    /// The grid layer must be repainted (pan, zoom, viewport, visibility).
    GridChanged,
    /// Set the CSS cursor on the canvas element.
    SetCursor(String),
    /// World coordinates for the status-bar readout, post-snap.
    CoordsUpdated(Point),
    /// Zoom as a rounded percentage for the status-bar readout.
    ScaleUpdated(u32),
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub doc: Document,
    pub camera: Camera,
    pub grid: Grid,
    pub snap: SnapConfig,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: Document::new(),
            camera: Camera::default(),
            grid: Grid::default(),
            snap: SnapConfig::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the document from a host-provided snapshot.
    pub fn load_snapshot(&mut self, snapshot: Document) {
        self.doc.load_snapshot(snapshot);
        self.ui.selection.clear();
        self.ui.clear_transient();
        self.ui.active_node = None;
    }

    /// Hydrate the document from a JSON snapshot. Returns false (leaving the
    /// document untouched) when the JSON does not parse.
    pub fn load_snapshot_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Document>(json) {
            Ok(snapshot) => {
                self.load_snapshot(snapshot);
                true
            }
            Err(_) => false,
        }
    }

    /// The current document as a JSON snapshot for the host.
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.doc).unwrap_or_default()
    }

    // --- Tool state ---

    /// Switch the active tool.
    ///
    /// Any in-progress gesture, armed beam, marquee, and the selection are
    /// dropped; the cursor for the new mode is emitted.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.ui.mode = mode;
        self.ui.clear_transient();
        self.ui.selection.clear();
        self.input = InputState::Idle;
        vec![Action::SetCursor(cursor_for(mode).to_owned()), Action::RenderNeeded]
    }

    /// Choose what kind of member the beam tool creates.
    pub fn set_draw_kind(&mut self, kind: DrawKind) {
        self.ui.draw_kind = kind;
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        vec![Action::GridChanged, Action::RenderNeeded]
    }

    // --- Zoom controls ---

    /// Zoom in one step about the viewport center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_about_center(KEY_ZOOM_STEP)
    }

    /// Zoom out one step about the viewport center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_about_center(1.0 / KEY_ZOOM_STEP)
    }

    fn zoom_about_center(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.camera.zoom_at(factor, center);
        self.view_changed()
    }

    /// Fit every node into the viewport. No-op when the document has no
    /// nodes.
    pub fn zoom_extents(&mut self) -> Vec<Action> {
        let Some((min, max)) = self.doc.bounds() else {
            return Vec::new();
        };
        self.camera
            .zoom_extents(min, max, self.viewport_width, self.viewport_height);
        self.view_changed()
    }

    fn view_changed(&self) -> Vec<Action> {
        vec![
            Action::GridChanged,
            Action::RenderNeeded,
            Action::ScaleUpdated(self.camera.zoom_percent()),
        ]
    }

    /// Show or hide the grid layer.
    pub fn toggle_grid(&mut self) -> Vec<Action> {
        self.grid.toggle_visible();
        vec![Action::GridChanged]
    }

    // --- Pointer events ---

    pub fn on_pointer_down(
        &mut self,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        match self.ui.mode {
            Mode::None => Vec::new(),
            Mode::Pan => {
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".to_owned())]
            }
            Mode::WindowSelect => {
                self.input = InputState::Marquee { start_screen: screen_pt };
                self.ui.marquee = Some(SelectionRect::from_corners(screen_pt, screen_pt));
                vec![Action::RenderNeeded]
            }
            Mode::AddNode
            | Mode::AddBeam
            | Mode::AddSupport
            | Mode::AddForce
            | Mode::Select
            | Mode::Delete => self.tool_pointer_down(screen_pt, modifiers),
        }
    }

    fn tool_pointer_down(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let resolved = snap::resolve(screen_pt, &self.doc, &self.camera, &self.snap, &self.grid);
        self.ui.snap_active = resolved.active;
        let world = self.camera.screen_to_world(resolved.screen);
        let tolerance = self.camera.screen_dist_to_world(HIT_TOLERANCE_PX);

        match self.ui.mode {
            Mode::AddNode => {
                let id = self.doc.add_node(world.x, world.y);
                self.ui.active_node = Some(id);
                vec![Action::RenderNeeded]
            }
            Mode::AddBeam => {
                if let Some(id) = self.node_id_at(world, tolerance) {
                    self.ui.active_node = Some(id);
                    self.ui.beam_start = Some(id);
                }
                Vec::new()
            }
            Mode::AddSupport => {
                let attached = self
                    .node_id_at(world, tolerance)
                    .is_some_and(|id| self.doc.add_support(id));
                if attached { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            Mode::AddForce => {
                let attached = self
                    .node_id_at(world, tolerance)
                    .is_some_and(|id| self.doc.add_force(id));
                if attached { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            Mode::Select => {
                self.ui
                    .selection
                    .select_at(&self.doc, world, tolerance, modifiers.shift);
                vec![Action::RenderNeeded]
            }
            Mode::Delete => self.delete_at(world, tolerance),
            Mode::None | Mode::WindowSelect | Mode::Pan => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let resolved = snap::resolve(screen_pt, &self.doc, &self.camera, &self.snap, &self.grid);
        self.ui.snap_active = resolved.active;
        let world = self.camera.screen_to_world(resolved.screen);

        let mut actions = vec![Action::CoordsUpdated(world)];

        match self.input {
            InputState::Panning { last_screen } => {
                self.camera
                    .pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                actions.push(Action::GridChanged);
            }
            InputState::Marquee { start_screen } => {
                self.ui.marquee = Some(SelectionRect::from_corners(start_screen, screen_pt));
            }
            InputState::Idle => {
                if self.ui.mode == Mode::AddBeam && self.ui.beam_start.is_some() {
                    self.ui.beam_preview = Some(resolved.screen);
                }
            }
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_up(
        &mut self,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        match self.input {
            InputState::Panning { .. } => {
                self.input = InputState::Idle;
                let cursor = if self.ui.mode == Mode::Pan { "grab" } else { "default" };
                vec![Action::SetCursor(cursor.to_owned())]
            }
            InputState::Marquee { start_screen } => {
                self.input = InputState::Idle;
                self.ui.marquee = None;

                let a = self.camera.screen_to_world(start_screen);
                let b = self.camera.screen_to_world(screen_pt);
                self.ui.selection.select_in_rect(
                    &self.doc,
                    a.x.min(b.x),
                    a.x.max(b.x),
                    a.y.min(b.y),
                    a.y.max(b.y),
                    modifiers.shift,
                );
                vec![Action::RenderNeeded]
            }
            InputState::Idle => self.complete_beam(screen_pt),
        }
    }

    /// Finish an armed member if the pointer was released over a node.
    ///
    /// The arm survives a release that lands on nothing or back on the start
    /// node; only completion, `Escape`, or a mode switch ends it. Truss
    /// placement re-arms at the new endpoint so members chain.
    fn complete_beam(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.ui.mode != Mode::AddBeam {
            return Vec::new();
        }
        let Some(start) = self.ui.beam_start else {
            return Vec::new();
        };

        let resolved = snap::resolve(screen_pt, &self.doc, &self.camera, &self.snap, &self.grid);
        self.ui.snap_active = resolved.active;
        let world = self.camera.screen_to_world(resolved.screen);
        let tolerance = self.camera.screen_dist_to_world(HIT_TOLERANCE_PX);

        let Some(end) = self.node_id_at(world, tolerance) else {
            return Vec::new();
        };

        let kind = match self.ui.draw_kind {
            DrawKind::Beam => BeamKind::Beam,
            DrawKind::Truss => BeamKind::Truss,
        };
        if self.doc.add_beam(start, end, kind).is_none() {
            return Vec::new();
        }

        self.ui.active_node = Some(end);
        if self.ui.draw_kind == DrawKind::Truss {
            self.ui.beam_start = Some(end);
            self.ui.beam_preview = self
                .doc
                .node(end)
                .map(|n| self.camera.world_to_screen(n.position()));
        } else {
            self.ui.beam_start = None;
            self.ui.beam_preview = None;
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_wheel(
        &mut self,
        screen_pt: Point,
        delta: WheelDelta,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        let factor = if delta.dy < 0.0 { WHEEL_ZOOM_STEP } else { 1.0 / WHEEL_ZOOM_STEP };
        self.camera.zoom_at(factor, screen_pt);
        self.view_changed()
    }

    // --- Keyboard events ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            // Key repeat keeps firing while Space is held; only the first
            // press switches, so an in-progress pan drag survives.
            "Space" if self.ui.mode != Mode::Pan => self.set_mode(Mode::Pan),
            "Delete" => self.delete_selected(),
            "Equal" if modifiers.shift => self.zoom_in(),
            "Minus" => self.zoom_out(),
            "KeyG" => self.toggle_grid(),
            "Escape" => {
                self.ui.clear_transient();
                self.input = InputState::Idle;
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.0 == "Space" && self.ui.mode == Mode::Pan {
            return self.set_mode(Mode::Select);
        }
        Vec::new()
    }

    // --- Deletion ---

    /// Delete whatever lies at `world`, nodes before beams. Node deletion
    /// cascades. Beams are scanned newest-first so overlapping members
    /// delete in reverse creation order.
    fn delete_at(&mut self, world: Point, tolerance: f64) -> Vec<Action> {
        if let Some(id) = self.node_id_at(world, tolerance) {
            self.doc.remove_node(id);
            self.forget_missing_active_node();
            return vec![Action::RenderNeeded];
        }

        let hit_beam = self.doc.beams.iter().rev().find_map(|beam| {
            let (a, b) = self.doc.beam_endpoints(beam)?;
            (hit::dist_point_to_segment(world, a, b) < tolerance).then_some(beam.id)
        });
        if let Some(id) = hit_beam {
            self.doc.remove_beam(id);
            return vec![Action::RenderNeeded];
        }

        Vec::new()
    }

    /// Delete the current selection: beams first, then node cascades (which
    /// re-filter beams — harmless when one was already removed), then clear.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let entries: Vec<_> = self.ui.selection.iter().collect();
        if entries.is_empty() {
            return Vec::new();
        }

        for entry in entries.iter().filter(|e| e.kind == ElementKind::Beam) {
            self.doc.remove_beam(entry.id);
        }
        for entry in entries.iter().filter(|e| e.kind == ElementKind::Node) {
            self.doc.remove_node(entry.id);
        }

        self.ui.selection.clear();
        self.forget_missing_active_node();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.ui.selection
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    // --- Helpers ---

    fn node_id_at(&self, world: Point, tolerance: f64) -> Option<NodeId> {
        self.doc.find_node_at(world.x, world.y, tolerance).map(|n| n.id)
    }

    fn forget_missing_active_node(&mut self) {
        if let Some(id) = self.ui.active_node {
            if self.doc.node(id).is_none() {
                self.ui.active_node = None;
            }
        }
        if let Some(id) = self.ui.beam_start {
            if self.doc.node(id).is_none() {
                self.ui.beam_start = None;
                self.ui.beam_preview = None;
            }
        }
    }
}

/// Cursor for a tool mode, as a CSS cursor keyword.
fn cursor_for(mode: Mode) -> &'static str {
    match mode {
        Mode::Pan => "grab",
        mode if mode.is_placement() => "crosshair",
        _ => "default",
    }
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot_json(&mut self, json: &str) -> bool {
        self.core.load_snapshot_json(json)
    }

    #[must_use]
    pub fn snapshot_json(&self) -> String {
        self.core.snapshot_json()
    }

    // --- Delegated tool state ---

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.core.set_mode(mode)
    }

    pub fn set_draw_kind(&mut self, kind: DrawKind) {
        self.core.set_draw_kind(kind);
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.core.set_viewport(width_css, height_css, dpr)
    }

    // --- Delegated zoom controls ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn zoom_extents(&mut self) -> Vec<Action> {
        self.core.zoom_extents()
    }

    pub fn toggle_grid(&mut self) -> Vec<Action> {
        self.core.toggle_grid()
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    // --- Render ---

    /// Draw the grid and the current structure to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D` call
    /// fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        render::draw_grid(
            &ctx,
            &self.core.camera,
            &self.core.grid,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )?;
        render::draw_scene(
            &ctx,
            &self.core.doc,
            &self.core.camera,
            &self.core.ui,
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
