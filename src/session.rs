//! Host-facing preview state: one template, its uploads, and the live transform.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, Point, Size};
use crate::foundation::error::PrintfitResult;
use crate::interact::{DisplayMapping, DragState, begin_drag, continue_drag, end_drag};
use crate::render::{CompositionEngine, FrameRGBA, Surface};
use crate::template::{ProductContext, Template, TemplateConfig, TemplateKind};
use crate::transform::{ImageTransform, ROTATE_STEP_DEG, ZOOM_STEP, apply_rotation, apply_zoom, auto_fit};
use crate::upload::ImageList;

/// Options for a [`PreviewSession`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewOpts {
    pub canvas: Canvas,
    /// TTF/OTF used for placeholder labels. Labels are skipped when unset.
    pub label_font: Option<PathBuf>,
}

impl PreviewOpts {
    /// Defaults overridden by `PRINTFIT_CANVAS_WIDTH`, `PRINTFIT_CANVAS_HEIGHT` and
    /// `PRINTFIT_LABEL_FONT`. Unparsable or zero values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let dim = |key: &str, fallback: u32| {
            get(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(fallback)
        };
        Self {
            canvas: Canvas {
                width: dim("PRINTFIT_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
                height: dim("PRINTFIT_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
            },
            label_font: get("PRINTFIT_LABEL_FONT")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Live preview for one product.
///
/// Every mutating call redraws the surface before returning, so [`PreviewSession::frame`] always
/// reflects the current state.
pub struct PreviewSession {
    template: Template,
    engine: CompositionEngine,
    surface: Surface,
    images: ImageList,
    transform: ImageTransform,
    drag: Option<DragState>,
    active_index: usize,
}

impl PreviewSession {
    /// Resolve the template and draw the empty preview.
    pub fn new(
        product: &ProductContext,
        config: Option<&TemplateConfig>,
        opts: &PreviewOpts,
    ) -> PrintfitResult<Self> {
        let surface = Surface::new(opts.canvas)?;
        let mut engine = CompositionEngine::new();
        if let Some(path) = &opts.label_font {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read label font '{}'", path.display()))?;
            engine = engine.with_label_font(bytes)?;
        }

        let mut session = Self {
            template: Template::resolve(config, product),
            engine,
            surface,
            images: ImageList::new(),
            transform: ImageTransform::IDENTITY,
            drag: None,
            active_index: 0,
        };
        session.redraw();
        Ok(session)
    }

    /// Decode and insert one upload. A decode failure leaves the session untouched.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn load_image(&mut self, bytes: &[u8]) -> PrintfitResult<usize> {
        let image = self.engine.load_image(bytes)?;
        let size = image.size();
        let was_empty = self.images.is_empty();
        let index = self.images.insert(self.template.kind, image);

        if self.template.kind != TemplateKind::Collage || was_empty {
            self.transform = auto_fit(size, self.template.fit_area);
            self.active_index = index;
            tracing::debug!(index, scale = self.transform.scale, "auto-fit after upload");
        }
        self.redraw();
        Ok(index)
    }

    /// Load uploads in order, stopping at the first one that fails to decode.
    pub fn load_images<I, B>(&mut self, uploads: I) -> PrintfitResult<usize>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut loaded = 0;
        for bytes in uploads {
            self.load_image(bytes.as_ref())?;
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.transform = apply_zoom(self.transform, delta);
        self.redraw();
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate(&mut self) {
        self.rotate_by(ROTATE_STEP_DEG);
    }

    pub fn rotate_by(&mut self, delta_deg: f64) {
        self.transform = apply_rotation(self.transform, delta_deg);
        self.redraw();
    }

    /// Re-run auto-fit against the first image. Does nothing without images.
    pub fn reset(&mut self) {
        let Some(first) = self.images.get(0) else {
            return;
        };
        self.transform = auto_fit(first.size(), self.template.fit_area);
        self.redraw();
    }

    /// Start dragging at `pos`, given in the host's display space of size `displayed`.
    pub fn pointer_down(&mut self, pos: Point, displayed: Size) {
        let map = DisplayMapping::new(self.surface.canvas(), displayed);
        self.drag = Some(begin_drag(pos, self.transform, map));
        self.redraw();
    }

    /// Follow the pointer while a drag is active.
    pub fn pointer_move(&mut self, pos: Point, displayed: Size) {
        let Some(drag) = self.drag else {
            return;
        };
        let map = DisplayMapping::new(self.surface.canvas(), displayed);
        self.transform = continue_drag(pos, drag, self.transform, map);
        self.redraw();
    }

    /// End the drag. Also used when the pointer leaves the surface.
    pub fn pointer_up(&mut self) {
        end_drag(&mut self.drag);
        self.redraw();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn frame(&self) -> FrameRGBA {
        self.surface.frame()
    }

    fn redraw(&mut self) {
        self.engine.render(
            &mut self.surface,
            &self.template,
            self.images.as_slice(),
            &self.transform,
            self.active_index,
        );
    }
}

impl std::fmt::Debug for PreviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSession")
            .field("template", &self.template)
            .field("images", &self.images.len())
            .field("transform", &self.transform)
            .field("dragging", &self.drag.is_some())
            .finish_non_exhaustive()
    }
}
