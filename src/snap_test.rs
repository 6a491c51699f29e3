#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::BeamKind;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Two nodes on grid intersections with a beam between them.
fn structure() -> Document {
    let mut doc = Document::new();
    doc.add_node(0.0, 0.0);
    doc.add_node(100.0, 0.0);
    doc.add_beam(1, 2, BeamKind::Beam);
    doc
}

fn all_off() -> SnapConfig {
    SnapConfig {
        node: false,
        endpoint: false,
        midpoint: false,
        grid: false,
        intersection: false,
        perpendicular: false,
        nearest: false,
    }
}

fn resolve_default(screen: Point, doc: &Document, config: &SnapConfig) -> Resolution {
    resolve(screen, doc, &Camera::default(), config, &Grid::default())
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_config_enables_first_four_rules() {
    let config = SnapConfig::default();
    assert!(config.node);
    assert!(config.endpoint);
    assert!(config.midpoint);
    assert!(config.grid);
}

#[test]
fn default_config_disables_unimplemented_rules() {
    let config = SnapConfig::default();
    assert!(!config.intersection);
    assert!(!config.perpendicular);
    assert!(!config.nearest);
}

// =============================================================
// Priority
// =============================================================

#[test]
fn node_beats_grid() {
    // (3, 4) is within node tolerance of node 1 at (0, 0) and also near the
    // grid origin; the node rule runs first, so the kind is Node.
    let doc = structure();
    let res = resolve_default(pt(3.0, 4.0), &doc, &SnapConfig::default());
    let active = res.active.expect("snapped");
    assert_eq!(active.kind, SnapKind::Node);
    assert!(approx_eq(active.x, 0.0));
    assert!(approx_eq(active.y, 0.0));
}

#[test]
fn endpoint_beats_midpoint_and_grid() {
    let doc = structure();
    let config = SnapConfig { node: false, ..SnapConfig::default() };
    let res = resolve_default(pt(98.0, 4.0), &doc, &config);
    let active = res.active.expect("snapped");
    assert_eq!(active.kind, SnapKind::Endpoint);
    assert!(approx_eq(active.x, 100.0));
}

#[test]
fn midpoint_beats_grid() {
    let doc = structure();
    let config = SnapConfig { node: false, endpoint: false, ..SnapConfig::default() };
    let res = resolve_default(pt(52.0, 4.0), &doc, &config);
    let active = res.active.expect("snapped");
    assert_eq!(active.kind, SnapKind::Midpoint);
    assert!(approx_eq(active.x, 50.0));
    assert!(approx_eq(active.y, 0.0));
}

#[test]
fn grid_catches_everything_else() {
    let doc = structure();
    let res = resolve_default(pt(29.0, 51.0), &doc, &SnapConfig::default());
    let active = res.active.expect("snapped");
    assert_eq!(active.kind, SnapKind::Grid);
    assert_eq!((active.x, active.y), (20.0, 60.0));
}

#[test]
fn grid_snap_works_on_empty_document() {
    let doc = Document::new();
    let res = resolve_default(pt(29.0, 11.0), &doc, &SnapConfig::default());
    let active = res.active.expect("snapped");
    assert_eq!(active.kind, SnapKind::Grid);
    assert_eq!((active.x, active.y), (20.0, 20.0));
}

// =============================================================
// Disabled rules
// =============================================================

#[test]
fn disabled_node_rule_falls_through_to_endpoint() {
    let doc = structure();
    let config = SnapConfig { node: false, ..SnapConfig::default() };
    // Right on node 1, which is also beam 1's start endpoint.
    let res = resolve_default(pt(1.0, 1.0), &doc, &config);
    assert_eq!(res.active.map(|a| a.kind), Some(SnapKind::Endpoint));
}

#[test]
fn all_rules_disabled_passes_raw_point_through() {
    let doc = structure();
    let res = resolve_default(pt(3.0, 4.0), &doc, &all_off());
    assert!(res.active.is_none());
    assert_eq!(res.screen, pt(3.0, 4.0));
}

#[test]
fn no_match_with_grid_disabled_passes_through() {
    let doc = structure();
    let config = SnapConfig { grid: false, ..SnapConfig::default() };
    let res = resolve_default(pt(50.0, 400.0), &doc, &config);
    assert!(res.active.is_none());
    assert_eq!(res.screen, pt(50.0, 400.0));
}

#[test]
fn unimplemented_flags_change_nothing() {
    let doc = structure();
    let mut config = all_off();
    config.intersection = true;
    config.perpendicular = true;
    config.nearest = true;
    let res = resolve_default(pt(3.0, 4.0), &doc, &config);
    assert!(res.active.is_none());
    assert_eq!(res.screen, pt(3.0, 4.0));
}

// =============================================================
// Tolerances
// =============================================================

#[test]
fn node_rule_is_inclusive_at_tolerance() {
    let doc = structure();
    let config = SnapConfig { grid: false, endpoint: false, midpoint: false, ..SnapConfig::default() };
    // Exactly 15 px from node 1 at zoom 1.
    let res = resolve_default(pt(15.0, 0.0), &doc, &config);
    assert_eq!(res.active.map(|a| a.kind), Some(SnapKind::Node));
}

#[test]
fn endpoint_rule_is_strict_at_tolerance() {
    let doc = structure();
    let config = SnapConfig { node: false, grid: false, midpoint: false, ..SnapConfig::default() };
    // Exactly 15 px from the endpoint: no snap.
    let res = resolve_default(pt(115.0, 0.0), &doc, &config);
    assert!(res.active.is_none());

    // Just inside: snaps.
    let res = resolve_default(pt(114.9, 0.0), &doc, &config);
    assert_eq!(res.active.map(|a| a.kind), Some(SnapKind::Endpoint));
}

#[test]
fn tolerance_scales_with_zoom() {
    let doc = structure();
    let config = SnapConfig { grid: false, endpoint: false, midpoint: false, ..SnapConfig::default() };

    // At zoom 0.1 the 15 px radius covers 150 world units, so a pointer 100
    // world units away (10 screen px) still snaps to the node.
    let camera = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.1 };
    let res = resolve(pt(10.0, 0.0), &doc, &camera, &config, &Grid::default());
    assert_eq!(res.active.map(|a| a.kind), Some(SnapKind::Node));
    assert!(approx_eq(res.active.map(|a| a.x).unwrap_or(f64::NAN), 0.0));

    // At zoom 10 the radius covers only 1.5 world units; the same screen
    // offset is 1 world unit from node 1 and still snaps, but 5 screen px
    // (0.5 world units) past that misses.
    let camera = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 10.0 };
    let res = resolve(pt(10.0, 0.0), &doc, &camera, &config, &Grid::default());
    assert_eq!(res.active.map(|a| a.kind), Some(SnapKind::Node));
    let res = resolve(pt(20.0, 0.0), &doc, &camera, &config, &Grid::default());
    assert!(res.active.is_none());
}

// =============================================================
// Resolution output
// =============================================================

#[test]
fn resolution_screen_point_reflects_camera() {
    let doc = structure();
    let camera = Camera { pan_x: 50.0, pan_y: 20.0, zoom: 2.0 };
    let config = SnapConfig { grid: false, endpoint: false, midpoint: false, ..SnapConfig::default() };

    // Node 1 at world (0,0) sits at screen (50,20); a pointer nearby snaps
    // back to exactly that screen position.
    let res = resolve(pt(55.0, 25.0), &doc, &camera, &config, &Grid::default());
    assert!(approx_eq(res.screen.x, 50.0));
    assert!(approx_eq(res.screen.y, 20.0));
}

#[test]
fn endpoint_skips_dangling_nodes() {
    let mut doc = structure();
    doc.nodes.retain(|n| n.id != 2);
    let config = SnapConfig { node: false, grid: false, midpoint: false, ..SnapConfig::default() };
    // Near the vanished endpoint: nothing to snap to.
    let res = resolve_default(pt(100.0, 0.0), &doc, &config);
    assert!(res.active.is_none());
}

#[test]
fn midpoint_requires_both_endpoints() {
    let mut doc = structure();
    doc.nodes.retain(|n| n.id != 2);
    let config = SnapConfig { node: false, endpoint: false, grid: false, ..SnapConfig::default() };
    let res = resolve_default(pt(50.0, 0.0), &doc, &config);
    assert!(res.active.is_none());
}
