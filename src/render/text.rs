use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{PrintfitError, PrintfitResult};
use crate::render::paint::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    size_bits: u32,
    brush: [u8; 4],
}

/// Placeholder label renderer: shapes short strings with Parley and fills them with `vello_cpu`.
pub(crate) struct LabelPainter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    layouts: HashMap<(String, LayoutKey), Arc<parley::Layout<TextBrushRgba8>>>,
}

impl LabelPainter {
    /// Register `font_bytes` (TTF/OTF) as the label face.
    pub(crate) fn new(font_bytes: Vec<u8>) -> PrintfitResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PrintfitError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PrintfitError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            layouts: HashMap::new(),
        })
    }

    fn layout_for(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> Arc<parley::Layout<TextBrushRgba8>> {
        let key = (
            text.to_owned(),
            LayoutKey {
                size_bits: size_px.to_bits(),
                brush: [brush.r, brush.g, brush.b, brush.a],
            },
        );
        if let Some(layout) = self.layouts.get(&key) {
            return layout.clone();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let layout = Arc::new(layout);
        self.layouts.insert(key, layout.clone());
        layout
    }

    /// Fill `text` horizontally centered on `anchor`, with its first baseline at `anchor.y`.
    pub(crate) fn draw_centered(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        size_px: f32,
        fill: Rgba8,
    ) {
        let layout = self.layout_for(text, size_px, fill.into());
        let baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(0.0);
        let origin_x = anchor.x - f64::from(layout.width()) / 2.0;
        let origin_y = anchor.y - f64::from(baseline);

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
        ctx.set_paint(color(fill));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Drop all cached layouts once more than `max_entries` have accumulated.
    pub(crate) fn trim_layout_cache(&mut self, max_entries: usize) {
        if self.layouts.len() > max_entries {
            self.layouts.clear();
        }
    }
}
