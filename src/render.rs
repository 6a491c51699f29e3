//! Rendering: draws the grid and the structure to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of
//! document, camera, and ui state and produces pixels — it does not mutate
//! any application state. Everything is drawn in screen space; world
//! positions go through the camera per element rather than through the
//! context transform stack.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::doc::{BeamKind, Document};
use crate::grid::Grid;
use crate::input::{Mode, UiState};
use crate::selection::ElementRef;

/// Node disc radius in screen pixels at zoom 1.
const NODE_RADIUS: f64 = 5.0;

/// Selection halo radius around a selected node, pixels at zoom 1.
const NODE_HALO_RADIUS: f64 = 8.0;

/// Snap indicator radius in screen pixels (zoom-independent).
const SNAP_INDICATOR_RADIUS: f64 = 6.0;

/// Support triangle half-width in pixels at zoom 1.
const SUPPORT_SIZE: f64 = 8.0;

/// Force arrow length in pixels at zoom 1.
const FORCE_LENGTH: f64 = 24.0;

const BEAM_COLOR: &str = "#333";
const TRUSS_COLOR: &str = "#FFD700";
const SELECTION_COLOR: &str = "#0066ff";
const NODE_COLOR: &str = "#0000ff";
const ACTIVE_NODE_COLOR: &str = "#ff0000";

/// Draw the grid layer: minor/major lines, origin axes, and labels.
///
/// Clears the surface first, so this runs before [`draw_scene`] on a shared
/// canvas. A disabled or hidden grid leaves the surface blank.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    grid: &Grid,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    if !grid.enabled || !grid.visible {
        return Ok(());
    }

    let scaled = grid.size * camera.zoom;
    let major = scaled * f64::from(grid.major_every);

    // Minor lines.
    ctx.set_stroke_style_str("#e0e0e0");
    ctx.set_line_width(0.5);
    stroke_vertical_lines(ctx, camera.pan_x % scaled, scaled, viewport_w, viewport_h);
    stroke_horizontal_lines(ctx, camera.pan_y % scaled, scaled, viewport_w, viewport_h);

    // Major lines.
    ctx.set_stroke_style_str("#c0c0c0");
    ctx.set_line_width(1.0);
    stroke_vertical_lines(ctx, camera.pan_x % major, major, viewport_w, viewport_h);
    stroke_horizontal_lines(ctx, camera.pan_y % major, major, viewport_w, viewport_h);

    // Axes through the world origin.
    let origin = camera.world_to_screen(Point::new(0.0, 0.0));
    ctx.set_stroke_style_str("#999999");
    ctx.set_line_width(1.5);
    ctx.begin_path();
    ctx.move_to(0.0, origin.y);
    ctx.line_to(viewport_w, origin.y);
    ctx.stroke();
    ctx.begin_path();
    ctx.move_to(origin.x, 0.0);
    ctx.line_to(origin.x, viewport_h);
    ctx.stroke();

    if grid.show_labels {
        draw_axis_labels(ctx, camera, grid, viewport_w, viewport_h, origin)?;
    }

    Ok(())
}

fn stroke_vertical_lines(
    ctx: &CanvasRenderingContext2d,
    start: f64,
    step: f64,
    viewport_w: f64,
    viewport_h: f64,
) {
    let mut x = start;
    while x < viewport_w {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, viewport_h);
        ctx.stroke();
        x += step;
    }
}

fn stroke_horizontal_lines(
    ctx: &CanvasRenderingContext2d,
    start: f64,
    step: f64,
    viewport_w: f64,
    viewport_h: f64,
) {
    let mut y = start;
    while y < viewport_h {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(viewport_w, y);
        ctx.stroke();
        y += step;
    }
}

/// Coordinate labels along both axes at every major grid line.
fn draw_axis_labels(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    grid: &Grid,
    viewport_w: f64,
    viewport_h: f64,
    origin: Point,
) -> Result<(), JsValue> {
    let step = grid.size * f64::from(grid.major_every);

    ctx.set_fill_style_str("#666666");
    ctx.set_font("10px sans-serif");

    let world_left = camera.screen_to_world(Point::new(0.0, 0.0)).x;
    let world_right = camera.screen_to_world(Point::new(viewport_w, 0.0)).x;
    let mut x = (world_left / step).floor() * step;
    while x <= world_right {
        let label = if x.abs() < 1e-3 { 0.0 } else { x };
        let sx = camera.world_to_screen(Point::new(x, 0.0)).x;
        if (0.0..=viewport_w).contains(&sx) {
            ctx.fill_text(&format!("{label}"), sx - 10.0, origin.y + 12.0)?;
        }
        x += step;
    }

    let world_top = camera.screen_to_world(Point::new(0.0, 0.0)).y;
    let world_bottom = camera.screen_to_world(Point::new(0.0, viewport_h)).y;
    let mut y = (world_top / step).floor() * step;
    while y <= world_bottom {
        // Zero already appears on the x axis.
        if y.abs() >= 1e-3 {
            let sy = camera.world_to_screen(Point::new(0.0, y)).y;
            if (0.0..=viewport_h).contains(&sy) {
                ctx.fill_text(&format!("{y}"), origin.x + 5.0, sy - 3.0)?;
            }
        }
        y += step;
    }

    Ok(())
}

/// Draw the structure layer: beams, nodes, supports, forces, selection
/// accents, the armed-member preview, the marquee, and the snap indicator.
///
/// Assumes the surface was just cleared (by [`draw_grid`] on a shared
/// canvas, or by the host on a layered one).
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_scene(
    ctx: &CanvasRenderingContext2d,
    doc: &Document,
    camera: &Camera,
    ui: &UiState,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    draw_beams(ctx, doc, camera, ui)?;
    draw_supports(ctx, doc, camera);
    draw_forces(ctx, doc, camera);
    draw_nodes(ctx, doc, camera, ui)?;
    draw_beam_preview(ctx, doc, camera, ui)?;

    if let Some(marquee) = ui.marquee {
        draw_marquee(ctx, marquee)?;
    }
    if let Some(snap) = ui.snap_active {
        draw_snap_indicator(ctx, camera, Point::new(snap.x, snap.y))?;
    }

    Ok(())
}

// =============================================================
// Structure
// =============================================================

fn draw_beams(
    ctx: &CanvasRenderingContext2d,
    doc: &Document,
    camera: &Camera,
    ui: &UiState,
) -> Result<(), JsValue> {
    for beam in &doc.beams {
        let Some((a, b)) = doc.beam_endpoints(beam) else {
            continue;
        };
        let start = camera.world_to_screen(a);
        let end = camera.world_to_screen(b);

        if ui.selection.contains(ElementRef::beam(beam.id)) {
            ctx.set_stroke_style_str(SELECTION_COLOR);
            ctx.set_line_width(5.0 * camera.zoom);
            ctx.begin_path();
            ctx.move_to(start.x, start.y);
            ctx.line_to(end.x, end.y);
            ctx.stroke();
        }

        match beam.kind {
            BeamKind::Truss => {
                ctx.set_stroke_style_str(TRUSS_COLOR);
                set_dash(ctx, 10.0 * camera.zoom, 5.0 * camera.zoom)?;
            }
            BeamKind::Beam => {
                ctx.set_stroke_style_str(BEAM_COLOR);
            }
        }
        ctx.set_line_width(3.0 * camera.zoom);
        ctx.begin_path();
        ctx.move_to(start.x, start.y);
        ctx.line_to(end.x, end.y);
        ctx.stroke();
        clear_dash(ctx)?;
    }
    Ok(())
}

fn draw_nodes(
    ctx: &CanvasRenderingContext2d,
    doc: &Document,
    camera: &Camera,
    ui: &UiState,
) -> Result<(), JsValue> {
    for node in &doc.nodes {
        let pos = camera.world_to_screen(node.position());

        if ui.selection.contains(ElementRef::node(node.id)) {
            ctx.set_fill_style_str(SELECTION_COLOR);
            ctx.begin_path();
            ctx.arc(pos.x, pos.y, NODE_HALO_RADIUS * camera.zoom, 0.0, 2.0 * PI)?;
            ctx.fill();
        }

        let color = if ui.active_node == Some(node.id) { ACTIVE_NODE_COLOR } else { NODE_COLOR };
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.arc(pos.x, pos.y, NODE_RADIUS * camera.zoom, 0.0, 2.0 * PI)?;
        ctx.fill();

        ctx.set_fill_style_str("#000");
        ctx.set_font(&format!("{}px Arial", 12.0 * camera.zoom));
        ctx.fill_text(
            &format!("N{}", node.id),
            pos.x + 10.0 * camera.zoom,
            pos.y - 10.0 * camera.zoom,
        )?;
    }
    Ok(())
}

fn draw_supports(ctx: &CanvasRenderingContext2d, doc: &Document, camera: &Camera) {
    ctx.set_fill_style_str("#2e7d32");
    for support in &doc.supports {
        let Some(node) = doc.node(support.node) else {
            continue;
        };
        let pos = camera.world_to_screen(node.position());
        let s = SUPPORT_SIZE * camera.zoom;

        ctx.begin_path();
        ctx.move_to(pos.x, pos.y);
        ctx.line_to(pos.x - s, pos.y + 1.5 * s);
        ctx.line_to(pos.x + s, pos.y + 1.5 * s);
        ctx.close_path();
        ctx.fill();
    }
}

fn draw_forces(ctx: &CanvasRenderingContext2d, doc: &Document, camera: &Camera) {
    ctx.set_stroke_style_str("#c62828");
    ctx.set_fill_style_str("#c62828");
    for force in &doc.forces {
        let Some(node) = doc.node(force.node) else {
            continue;
        };
        let pos = camera.world_to_screen(node.position());
        let len = FORCE_LENGTH * camera.zoom;
        let head = 4.0 * camera.zoom;

        ctx.set_line_width(2.0 * camera.zoom);
        ctx.begin_path();
        ctx.move_to(pos.x, pos.y - len);
        ctx.line_to(pos.x, pos.y - head);
        ctx.stroke();

        ctx.begin_path();
        ctx.move_to(pos.x, pos.y);
        ctx.line_to(pos.x - head, pos.y - 2.0 * head);
        ctx.line_to(pos.x + head, pos.y - 2.0 * head);
        ctx.close_path();
        ctx.fill();
    }
}

// =============================================================
// Overlays
// =============================================================

fn draw_beam_preview(
    ctx: &CanvasRenderingContext2d,
    doc: &Document,
    camera: &Camera,
    ui: &UiState,
) -> Result<(), JsValue> {
    if ui.mode != Mode::AddBeam {
        return Ok(());
    }
    let (Some(start_id), Some(preview)) = (ui.beam_start, ui.beam_preview) else {
        return Ok(());
    };
    let Some(start) = doc.node(start_id) else {
        return Ok(());
    };

    let from = camera.world_to_screen(start.position());
    ctx.set_stroke_style_str("rgba(0, 0, 255, 0.5)");
    ctx.set_line_width(2.0 * camera.zoom);
    set_dash(ctx, 5.0 * camera.zoom, 5.0 * camera.zoom)?;
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(preview.x, preview.y);
    ctx.stroke();
    clear_dash(ctx)
}

fn draw_marquee(
    ctx: &CanvasRenderingContext2d,
    marquee: crate::input::SelectionRect,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str("rgba(0, 102, 255, 0.12)");
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    set_dash(ctx, 4.0, 4.0)?;
    ctx.fill_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    ctx.stroke_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    clear_dash(ctx)
}

fn draw_snap_indicator(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    world: Point,
) -> Result<(), JsValue> {
    let pos = camera.world_to_screen(world);
    ctx.set_stroke_style_str("#ff8800");
    ctx.set_line_width(1.5);
    ctx.begin_path();
    ctx.arc(pos.x, pos.y, SNAP_INDICATOR_RADIUS, 0.0, 2.0 * PI)?;
    ctx.stroke();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn set_dash(ctx: &CanvasRenderingContext2d, on: f64, off: f64) -> Result<(), JsValue> {
    let dash = js_sys::Array::new();
    dash.push(&on.into());
    dash.push(&off.into());
    ctx.set_line_dash(&dash)
}

fn clear_dash(ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
    ctx.set_line_dash(&js_sys::Array::new())
}
