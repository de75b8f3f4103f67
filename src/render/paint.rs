use std::sync::Arc;

use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::foundation::error::{PrintfitError, PrintfitResult};

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        let un = |c: u8| -> u8 { ((c as u16 * 255 + a / 2) / a).min(255) as u8 };
        px[0] = un(px[0]);
        px[1] = un(px[1]);
        px[2] = un(px[2]);
    }
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PrintfitResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PrintfitError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PrintfitError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PrintfitError::validation("pixmap byte len mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn image_paint_from_premul(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> PrintfitResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Rasterize a two-stop linear gradient covering a `width`x`height` surface.
///
/// Each pixel center is projected onto the `p0 -> p1` axis; positions before `p0` or past `p1`
/// take the end colors.
pub(crate) fn linear_gradient_paint(
    width: u32,
    height: u32,
    p0: Point,
    p1: Point,
    start: Rgba8,
    end: Rgba8,
) -> PrintfitResult<vello_cpu::Image> {
    let axis = p1 - p0;
    let len2 = axis.hypot2();
    let mut bytes = vec![0u8; (width as usize).saturating_mul(height as usize).saturating_mul(4)];
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 > 0.0 {
                ((p - p0).dot(axis) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lerp = |a: u8, b: u8| -> u8 {
                let af = f64::from(a);
                let bf = f64::from(b);
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            let c = Rgba8::new(
                lerp(start.r, end.r),
                lerp(start.g, end.g),
                lerp(start.b, end.b),
                lerp(start.a, end.a),
            );
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c.to_premul());
        }
    }
    image_paint_from_premul(&bytes, width, height)
}

pub(crate) fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    let r = r.abs();
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn rect_path(r: Rect) -> vello_cpu::kurbo::BezPath {
    use vello_cpu::kurbo::Shape as _;
    rect_to_cpu(r).to_path(0.1)
}

/// Canvas-style stroke: butt caps, miter joins.
pub(crate) fn stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_caps(vello_cpu::kurbo::Cap::Butt)
        .with_join(vello_cpu::kurbo::Join::Miter)
}

/// Draw an image through `placement` (image pixels -> canvas), clipped to `clip`.
pub(crate) fn draw_image_clipped(
    ctx: &mut vello_cpu::RenderContext,
    image: &vello_cpu::Image,
    size: (f64, f64),
    placement: Affine,
    clip: Rect,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.push_clip_layer(&rect_path(clip));
    ctx.set_transform(affine_to_cpu(placement));
    ctx.set_paint(image.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, size.0, size.1));
    ctx.pop_layer();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

pub(crate) fn fill_rect(ctx: &mut vello_cpu::RenderContext, r: Rect, c: Rgba8) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(c));
    ctx.fill_rect(&rect_to_cpu(r));
}

pub(crate) fn stroke_rect(ctx: &mut vello_cpu::RenderContext, r: Rect, c: Rgba8, width: f64) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(stroke(width));
    ctx.set_paint(color(c));
    ctx.stroke_rect(&rect_to_cpu(r));
}
