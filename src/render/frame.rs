use crate::foundation::core::{Rect, Rgba8};
use crate::render::engine::Scene;
use crate::render::paint::{draw_image_clipped, fill_rect, stroke_rect};
use crate::render::text::LabelPainter;

pub(crate) const MAT_COLOR: Rgba8 = Rgba8::WHITE;
pub(crate) const PLACEHOLDER_COLOR: Rgba8 = Rgba8::opaque(0xe0, 0xe0, 0xe0);
pub(crate) const LABEL_COLOR: Rgba8 = Rgba8::opaque(0x99, 0x99, 0x99);
const MAT_SHADOW_WIDTH: f64 = 2.0;

/// Mat rectangle: the canvas inset by the border width on every side.
pub fn mat_rect(canvas: Rect, border_width: f64) -> Rect {
    Rect::new(
        canvas.x0 + border_width,
        canvas.y0 + border_width,
        canvas.x1 - border_width,
        canvas.y1 - border_width,
    )
}

pub(crate) fn draw(
    ctx: &mut vello_cpu::RenderContext,
    labels: Option<&mut LabelPainter>,
    scene: &Scene<'_>,
) {
    let t = scene.template;
    let bounds = scene.canvas.rect();

    fill_rect(ctx, bounds, t.frame_color);
    let mat = mat_rect(bounds, t.border_width);
    fill_rect(ctx, mat, MAT_COLOR);
    stroke_rect(
        ctx,
        mat.inset(-MAT_SHADOW_WIDTH),
        Rgba8::with_alpha_f32(0, 0, 0, 0.2),
        MAT_SHADOW_WIDTH,
    );

    let area = t.print_area;
    if scene.images.is_empty() {
        fill_rect(ctx, area, PLACEHOLDER_COLOR);
        if let Some(labels) = labels {
            labels.draw_centered(ctx, "Upload Photo", area.center(), 16.0, LABEL_COLOR);
        }
        return;
    }

    if let Some(img) = scene.images.get(scene.active_index) {
        let size = img.size();
        let placement = scene.transform.placement(area, size);
        draw_image_clipped(ctx, img.paint(), (size.width, size.height), placement, area);
    }
}
