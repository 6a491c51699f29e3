#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_pan_is_zero() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
}

#[test]
fn camera_default_zoom_is_one() {
    let cam = Camera::default();
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let world = cam.screen_to_world(Point::new(40.0, 80.0));
    assert!(approx_eq(world.x, 10.0));
    assert!(approx_eq(world.y, 20.0));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(20.0, 10.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

// --- world_to_screen ---

#[test]
fn world_to_screen_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let screen = cam.world_to_screen(Point::new(10.0, 20.0));
    assert!(approx_eq(screen.x, 20.0));
    assert!(approx_eq(screen.y, 40.0));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    assert!(approx_eq(screen.x, 35.0));
    assert!(approx_eq(screen.y, 25.0));
}

// --- Round trips ---

#[test]
fn round_trip_with_pan_and_zoom() {
    let cam = Camera { pan_x: 50.0, pan_y: -30.0, zoom: 2.0 };
    let world = Point::new(100.0, 200.0);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn round_trip_fractional_zoom() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let world = Point::new(333.3, -999.9);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn round_trip_screen_first() {
    let cam = Camera { pan_x: 10.0, pan_y: 20.0, zoom: 1.5 };
    let screen = Point::new(400.0, 300.0);
    let back = cam.world_to_screen(cam.screen_to_world(screen));
    assert!(point_approx_eq(screen, back));
}

// --- screen_dist_to_world ---

#[test]
fn screen_dist_to_world_identity_at_zoom_one() {
    let cam = Camera::default();
    assert!(approx_eq(cam.screen_dist_to_world(42.0), 42.0));
}

#[test]
fn screen_dist_to_world_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

// --- pan_by ---

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.0, 3.0);
    assert!(approx_eq(cam.pan_x, 12.0));
    assert!(approx_eq(cam.pan_y, -2.0));
}

// --- zoom_at ---

#[test]
fn zoom_at_multiplies_zoom() {
    let mut cam = Camera::default();
    cam.zoom_at(2.0, Point::new(0.0, 0.0));
    assert!(approx_eq(cam.zoom, 2.0));
}

#[test]
fn zoom_at_keeps_anchor_under_cursor() {
    let mut cam = Camera { pan_x: 30.0, pan_y: -10.0, zoom: 1.5 };
    let center = Point::new(200.0, 150.0);
    let anchor = cam.screen_to_world(center);

    cam.zoom_at(2.0, center);

    let after = cam.world_to_screen(anchor);
    assert!(point_approx_eq(after, center));
}

#[test]
fn zoom_at_keeps_anchor_under_cursor_when_shrinking() {
    let mut cam = Camera { pan_x: -7.0, pan_y: 12.0, zoom: 3.0 };
    let center = Point::new(64.0, 48.0);
    let anchor = cam.screen_to_world(center);

    cam.zoom_at(0.5, center);

    assert!(point_approx_eq(cam.world_to_screen(anchor), center));
}

#[test]
fn zoom_at_clamps_to_max() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 8.0 };
    cam.zoom_at(4.0, Point::new(100.0, 100.0));
    assert!(approx_eq(cam.zoom, MAX_ZOOM));
}

#[test]
fn zoom_at_clamps_to_min() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.2 };
    cam.zoom_at(0.1, Point::new(100.0, 100.0));
    assert!(approx_eq(cam.zoom, MIN_ZOOM));
}

#[test]
fn zoom_at_anchor_holds_even_when_clamped() {
    // The pan is recomputed from the post-clamp zoom, so the anchor stays
    // put regardless of clamping.
    let mut cam = Camera { pan_x: 5.0, pan_y: 5.0, zoom: 9.0 };
    let center = Point::new(320.0, 240.0);
    let anchor = cam.screen_to_world(center);

    cam.zoom_at(10.0, center);

    assert!(approx_eq(cam.zoom, MAX_ZOOM));
    assert!(point_approx_eq(cam.world_to_screen(anchor), center));
}

// --- zoom_extents ---

#[test]
fn zoom_extents_fits_padded_box() {
    let mut cam = Camera::default();
    // Nodes spanning (0,0)..(100,0); padded box is 200 x 100 at (-50,-50).
    cam.zoom_extents(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 400.0, 300.0);

    assert!(approx_eq(cam.zoom, 2.0));
    // Padded top-left maps to the screen origin.
    let tl = cam.world_to_screen(Point::new(-50.0, -50.0));
    assert!(point_approx_eq(tl, Point::new(0.0, 0.0)));
}

#[test]
fn zoom_extents_single_node_is_finite() {
    let mut cam = Camera::default();
    cam.zoom_extents(Point::new(10.0, 10.0), Point::new(10.0, 10.0), 800.0, 600.0);

    assert!(cam.zoom.is_finite());
    assert!(approx_eq(cam.zoom, 6.0));
}

#[test]
fn zoom_extents_collinear_nodes_is_finite() {
    let mut cam = Camera::default();
    // Zero height before padding.
    cam.zoom_extents(Point::new(0.0, 5.0), Point::new(300.0, 5.0), 800.0, 600.0);
    assert!(cam.zoom.is_finite());
    assert!(cam.zoom > 0.0);
}

#[test]
fn zoom_extents_clamps_into_zoom_range() {
    let mut cam = Camera::default();
    // A tiny cluster would want an enormous zoom; it clamps instead.
    cam.zoom_extents(Point::new(0.0, 0.0), Point::new(0.001, 0.001), 100_000.0, 100_000.0);
    assert!(cam.zoom <= MAX_ZOOM);

    // A huge span would want a minuscule zoom; it clamps instead.
    cam.zoom_extents(Point::new(0.0, 0.0), Point::new(1e9, 1e9), 100.0, 100.0);
    assert!(cam.zoom >= MIN_ZOOM);
}

// --- zoom_percent ---

#[test]
fn zoom_percent_rounds() {
    assert_eq!(Camera::default().zoom_percent(), 100);
    assert_eq!(Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.1 }.zoom_percent(), 10);
    assert_eq!(Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.256 }.zoom_percent(), 126);
    assert_eq!(Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.254 }.zoom_percent(), 125);
}
