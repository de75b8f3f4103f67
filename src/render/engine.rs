use std::collections::HashMap;

use crate::foundation::core::Canvas;
use crate::foundation::error::PrintfitResult;
use crate::render::paint::linear_gradient_paint;
use crate::render::surface::Surface;
use crate::render::text::LabelPainter;
use crate::render::{collage, frame, mug};
use crate::template::resolve::{MugStyle, Template, TemplateKind};
use crate::transform::ImageTransform;
use crate::upload::decode::UploadedImage;

const LAYOUT_CACHE_MAX: usize = 64;

/// Everything one redraw reads.
pub(crate) struct Scene<'a> {
    pub(crate) canvas: Canvas,
    pub(crate) template: &'a Template,
    pub(crate) images: &'a [UploadedImage],
    pub(crate) transform: ImageTransform,
    pub(crate) active_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    w: u32,
    h: u32,
    style: MugStyle,
}

/// Draws template previews onto a [`Surface`].
///
/// Holds the caches that survive between redraws: the shaped label text and the rasterized
/// mug body gradients.
#[derive(Default)]
pub struct CompositionEngine {
    labels: Option<LabelPainter>,
    gradients: HashMap<GradientKey, vello_cpu::Image>,
}

impl CompositionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable placeholder labels, shaped with the given TTF/OTF bytes.
    pub fn with_label_font(mut self, font_bytes: Vec<u8>) -> PrintfitResult<Self> {
        self.labels = Some(LabelPainter::new(font_bytes)?);
        Ok(self)
    }

    pub fn has_label_font(&self) -> bool {
        self.labels.is_some()
    }

    /// Decode an uploaded file into a drawable image.
    pub fn load_image(&self, bytes: &[u8]) -> PrintfitResult<UploadedImage> {
        UploadedImage::decode(bytes)
    }

    /// Clear `surface` and draw `template` with `images`.
    ///
    /// Frame and Mug show `images[active_index]` under `transform`; Collage fills grid cells in
    /// list order and ignores both.
    #[tracing::instrument(skip_all, fields(kind = ?template.kind, images = images.len()))]
    pub fn render(
        &mut self,
        surface: &mut Surface,
        template: &Template,
        images: &[UploadedImage],
        transform: &ImageTransform,
        active_index: usize,
    ) {
        let scene = Scene {
            canvas: surface.canvas(),
            template,
            images,
            transform: *transform,
            active_index,
        };

        let body = match template.kind {
            TemplateKind::Mug => self.mug_body(scene.canvas, template.mug_style),
            _ => None,
        };
        let labels = self.labels.as_mut();

        surface.redraw(|ctx| match template.kind {
            TemplateKind::Frame => frame::draw(ctx, labels, &scene),
            TemplateKind::Mug => mug::draw(ctx, body.as_ref(), &scene),
            TemplateKind::Collage => collage::draw(ctx, labels, &scene),
        });

        if let Some(labels) = self.labels.as_mut() {
            labels.trim_layout_cache(LAYOUT_CACHE_MAX);
        }
    }

    fn mug_body(&mut self, canvas: Canvas, style: MugStyle) -> Option<vello_cpu::Image> {
        let key = GradientKey {
            w: canvas.width,
            h: canvas.height,
            style,
        };
        if let Some(img) = self.gradients.get(&key) {
            return Some(img.clone());
        }
        let (start, end) = style.body_gradient();
        match linear_gradient_paint(
            canvas.width,
            canvas.height,
            mug::GRADIENT_FROM,
            mug::GRADIENT_TO,
            start,
            end,
        ) {
            Ok(img) => {
                self.gradients.insert(key, img.clone());
                Some(img)
            }
            Err(e) => {
                tracing::warn!(error = %e, "mug gradient unavailable, using solid body");
                None
            }
        }
    }
}
