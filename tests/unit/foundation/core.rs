use super::*;

#[test]
fn canvas_defaults_to_preview_resolution() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (400, 500));
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 400.0, 500.0));
}

#[test]
fn canvas_new_rejects_zero_and_oversize() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert_eq!(Canvas::new(64, 32).unwrap().size(), Size::new(64.0, 32.0));
}

#[test]
fn premul_rounds_half_up() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::new(255, 0, 128, 0).to_premul(), [0, 0, 0, 0]);
    let c = Rgba8::with_alpha_f32(0, 0, 0, 0.2);
    assert_eq!(c.a, 51);
    let c = Rgba8::with_alpha_f32(200, 200, 200, 0.3);
    assert_eq!(c.to_premul(), [60, 60, 60, 77]);
}
