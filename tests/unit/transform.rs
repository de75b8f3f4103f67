use super::*;
use crate::foundation::core::Point;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn close_pt(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn zoom_clamps_over_any_sequence() {
    let deltas = [0.1, 5.0, -0.1, -12.0, 0.3, 0.3, 100.0, -0.05, -3.3, 0.1];
    let mut t = ImageTransform::default();
    for _ in 0..50 {
        for d in deltas {
            t = apply_zoom(t, d);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&t.scale), "scale {}", t.scale);
        }
    }
    assert_eq!(apply_zoom(t, 1e9).scale, MAX_SCALE);
    assert_eq!(apply_zoom(t, -1e9).scale, MIN_SCALE);
}

#[test]
fn zoom_keeps_other_fields() {
    let t = ImageTransform {
        scale: 1.0,
        offset_x: 3.0,
        offset_y: -4.0,
        rotation_deg: 90.0,
    };
    let z = apply_zoom(t, ZOOM_STEP);
    assert!(close(z.scale, 1.1));
    assert_eq!((z.offset_x, z.offset_y, z.rotation_deg), (3.0, -4.0, 90.0));
}

#[test]
fn rotation_accumulates_unbounded() {
    let mut t = ImageTransform::default();
    for _ in 0..9 {
        t = apply_rotation(t, ROTATE_STEP_DEG);
    }
    assert_eq!(t.rotation_deg, -810.0);
    assert_eq!(apply_rotation(t, 1e6).rotation_deg, 1e6 - 810.0);
}

#[test]
fn auto_fit_wider_image_fits_height() {
    let area = Rect::new(60.0, 75.0, 340.0, 425.0);
    let t = auto_fit(Size::new(1000.0, 800.0), area);
    assert!(close(t.scale, 350.0 / 800.0 * 1.1));
    assert!(close(t.scale, 0.48125));
    assert_eq!(t.offset(), Vec2::ZERO);
    assert_eq!(t.rotation_deg, 0.0);
}

#[test]
fn auto_fit_taller_image_fits_width() {
    let area = Rect::new(0.0, 0.0, 300.0, 400.0);
    let t = auto_fit(Size::new(600.0, 1200.0), area);
    assert!(close(t.scale, 300.0 / 600.0 * 1.1));

    // Equal aspect takes the width branch.
    let t = auto_fit(Size::new(30.0, 40.0), area);
    assert!(close(t.scale, 10.0 * 1.1));
}

#[test]
fn placement_centers_image_on_print_area() {
    let area = Rect::new(60.0, 75.0, 340.0, 425.0);
    let img = Size::new(1000.0, 800.0);
    let t = auto_fit(img, area);
    let a = t.placement(area, img);
    assert!(close_pt(a * Point::new(500.0, 400.0), Point::new(200.0, 250.0)));
    let corner = a * Point::new(0.0, 0.0);
    assert!(close_pt(
        corner,
        Point::new(200.0 - 500.0 * 0.48125, 250.0 - 400.0 * 0.48125)
    ));
}

#[test]
fn placement_applies_offset_and_rotation_about_center() {
    let area = Rect::new(0.0, 0.0, 100.0, 100.0);
    let img = Size::new(20.0, 10.0);
    let t = ImageTransform {
        scale: 2.0,
        offset_x: 5.0,
        offset_y: -5.0,
        rotation_deg: 90.0,
    };
    let a = t.placement(area, img);
    assert!(close_pt(a * Point::new(10.0, 5.0), Point::new(55.0, 45.0)));
    // Image right-middle edge rotates to below the anchor.
    assert!(close_pt(a * Point::new(20.0, 5.0), Point::new(55.0, 65.0)));
}

#[test]
fn cover_fit_fills_cell() {
    let cell = Rect::new(15.0, 15.0, 195.0, 245.0);
    let img = Size::new(100.0, 100.0);
    let a = cover_fit(img, cell);
    let scale = 230.0 / 100.0;
    assert!(close_pt(a * Point::new(50.0, 50.0), cell.center()));
    assert!(close_pt(
        a * Point::new(0.0, 0.0),
        Point::new(105.0 - 50.0 * scale, 15.0)
    ));
}
