use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgba8};
use crate::render::engine::Scene;
use crate::render::paint::{color, draw_image_clipped, fill_rect, stroke};

pub(crate) const BACKDROP_COLOR: Rgba8 = Rgba8::opaque(0xf0, 0xf0, 0xf0);

/// Mug body outline, clockwise from the top-left rim.
pub const BODY: [(f64, f64); 4] = [(100.0, 100.0), (300.0, 100.0), (320.0, 400.0), (80.0, 400.0)];
/// Body gradient axis.
pub const GRADIENT_FROM: Point = Point::new(50.0, 100.0);
pub const GRADIENT_TO: Point = Point::new(350.0, 400.0);

const HANDLE_CENTER: (f64, f64) = (320.0, 200.0);
const HANDLE_RADIUS: f64 = 40.0;
const HANDLE_START: f64 = -0.5;
const HANDLE_END: f64 = 0.5;
const HANDLE_WIDTH: f64 = 15.0;

const SHINE_CENTER: (f64, f64) = (200.0, 150.0);
const SHINE_RADII: (f64, f64) = (60.0, 120.0);
const SHINE_ROTATION: f64 = 0.3;

fn body_path() -> vello_cpu::kurbo::BezPath {
    let mut p = vello_cpu::kurbo::BezPath::new();
    let [first, rest @ ..] = BODY;
    p.move_to(first);
    for pt in rest {
        p.line_to(pt);
    }
    p.close_path();
    p
}

pub(crate) fn draw(
    ctx: &mut vello_cpu::RenderContext,
    body_paint: Option<&vello_cpu::Image>,
    scene: &Scene<'_>,
) {
    let t = scene.template;
    fill_rect(ctx, scene.canvas.rect(), BACKDROP_COLOR);

    let style = t.mug_style;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    match body_paint {
        Some(img) => ctx.set_paint(img.clone()),
        None => ctx.set_paint(color(style.body_gradient().0)),
    }
    ctx.fill_path(&body_path());

    let handle = vello_cpu::kurbo::Arc {
        center: HANDLE_CENTER.into(),
        radii: vello_cpu::kurbo::Vec2::new(HANDLE_RADIUS, HANDLE_RADIUS),
        start_angle: HANDLE_START,
        sweep_angle: HANDLE_END - HANDLE_START,
        x_rotation: 0.0,
    };
    ctx.set_stroke(stroke(HANDLE_WIDTH));
    ctx.set_paint(color(style.handle_color()));
    ctx.stroke_path(&handle.to_path(0.1));

    let area = t.print_area;
    if scene.images.is_empty() {
        fill_rect(ctx, area, Rgba8::with_alpha_f32(200, 200, 200, 0.3));
    } else if let Some(img) = scene.images.get(scene.active_index) {
        let size = img.size();
        let placement = scene.transform.placement(area, size);
        draw_image_clipped(ctx, img.paint(), (size.width, size.height), placement, area);
    }

    let shine = vello_cpu::kurbo::Ellipse::new(SHINE_CENTER, SHINE_RADII, SHINE_ROTATION);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(Rgba8::with_alpha_f32(255, 255, 255, 0.3)));
    ctx.fill_path(&shine.to_path(0.1));
}
