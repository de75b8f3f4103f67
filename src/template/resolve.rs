use serde::Serialize;

use crate::foundation::core::{Rect, Rgba8};
use crate::template::config::{GridLayout, PrintArea, ProductContext, TemplateConfig};

/// Print area used by frames when the config carries none.
pub const FRAME_DEFAULT_PRINT_AREA: PrintArea = PrintArea::new(60.0, 75.0, 280.0, 350.0);
/// Print area used by mugs when the config carries none.
pub const MUG_DEFAULT_PRINT_AREA: PrintArea = PrintArea::new(100.0, 125.0, 200.0, 150.0);
/// Print area used by collages when the config carries none.
pub const COLLAGE_DEFAULT_PRINT_AREA: PrintArea = PrintArea::new(10.0, 10.0, 380.0, 480.0);
/// Target rectangle for auto-fit when the config has no print area.
pub const AUTO_FIT_FALLBACK_AREA: PrintArea = PrintArea::new(50.0, 50.0, 300.0, 400.0);

/// Frame border inset applied when the config has none (or zero).
pub const DEFAULT_BORDER_WIDTH: f64 = 40.0;
/// Frame color applied when the config has none.
pub const DEFAULT_FRAME_COLOR: Rgba8 = Rgba8::BLACK;

/// Largest collage grid (`rows * cols`) a config may request.
pub const MAX_GRID_CELLS: u64 = 256;

/// Category titles for which the storefront offers a customization preview.
pub const CUSTOMIZABLE_CATEGORIES: [&str; 3] = ["Frames", "Mugs", "Collages"];

/// Product family determining the rendering strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Frame,
    Mug,
    Collage,
}

impl TemplateKind {
    /// Interpret a stored category tag.
    ///
    /// Empty tags count as absent. Unknown non-empty tags render as frames.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let t = tag.trim();
        if t.is_empty() {
            return None;
        }
        Some(match t.to_ascii_lowercase().as_str() {
            "frame" => Self::Frame,
            "mug" => Self::Mug,
            "collage" => Self::Collage,
            other => {
                tracing::debug!(tag = other, "unknown template category, rendering as frame");
                Self::Frame
            }
        })
    }

    /// Pick the kind: explicit config kind first, then category-title inference, then Frame.
    pub fn resolve(explicit: Option<Self>, category_title: Option<&str>) -> Self {
        if let Some(kind) = explicit {
            return kind;
        }
        match category_title {
            Some("Mugs") => Self::Mug,
            _ => Self::Frame,
        }
    }

    /// Whether uploads for this kind append to the image list rather than replace it.
    pub fn is_multi_image(self) -> bool {
        matches!(self, Self::Collage)
    }

    fn default_print_area(self) -> PrintArea {
        match self {
            Self::Frame => FRAME_DEFAULT_PRINT_AREA,
            Self::Mug => MUG_DEFAULT_PRINT_AREA,
            Self::Collage => COLLAGE_DEFAULT_PRINT_AREA,
        }
    }
}

/// Whether the storefront mounts a customization preview for this category title.
pub fn is_customizable_category(category_title: &str) -> bool {
    CUSTOMIZABLE_CATEGORIES.contains(&category_title)
}

/// Mug body variant, sniffed from the product title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MugStyle {
    Light,
    Dark,
}

impl MugStyle {
    pub fn from_title(title: &str) -> Self {
        let t = title.to_lowercase();
        if t.contains("magic") || t.contains("black") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Body gradient endpoints (top-left to bottom-right).
    pub fn body_gradient(self) -> (Rgba8, Rgba8) {
        match self {
            Self::Dark => (Rgba8::opaque(0x00, 0x00, 0x00), Rgba8::opaque(0x33, 0x33, 0x33)),
            Self::Light => (Rgba8::opaque(0xff, 0xff, 0xff), Rgba8::opaque(0xe0, 0xe0, 0xe0)),
        }
    }

    pub fn handle_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::opaque(0x22, 0x22, 0x22),
            Self::Light => Rgba8::opaque(0xdd, 0xdd, 0xdd),
        }
    }
}

/// Fully defaulted template geometry for one preview session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Template {
    pub kind: TemplateKind,
    pub frame_color: Rgba8,
    pub border_width: f64,
    /// Region the single image is clipped to.
    #[serde(serialize_with = "ser_rect")]
    pub print_area: Rect,
    /// Region auto-fit scales against.
    #[serde(serialize_with = "ser_rect")]
    pub fit_area: Rect,
    pub grid: GridLayout,
    pub mug_style: MugStyle,
}

impl Template {
    /// Resolve a (possibly absent or partial) config against the product it belongs to.
    pub fn resolve(config: Option<&TemplateConfig>, product: &ProductContext) -> Self {
        let explicit = config.and_then(|c| c.kind);
        let kind = TemplateKind::resolve(explicit, product.category.as_deref());

        let frame_color = config
            .and_then(|c| c.frame_color)
            .map(|c| c.to_rgba8())
            .unwrap_or(DEFAULT_FRAME_COLOR);
        let border_width = config
            .and_then(|c| c.border_width)
            .filter(|w| w.is_finite() && *w != 0.0)
            .unwrap_or(DEFAULT_BORDER_WIDTH);
        let configured_area = config.and_then(|c| c.print_area).filter(|a| {
            a.x.is_finite() && a.y.is_finite() && a.width.is_finite() && a.height.is_finite()
        });
        let print_area = configured_area
            .unwrap_or_else(|| kind.default_print_area())
            .to_rect();
        let fit_area = configured_area.unwrap_or(AUTO_FIT_FALLBACK_AREA).to_rect();
        let grid = match config.and_then(|c| c.grid_layout) {
            Some(g) if u64::from(g.rows) * u64::from(g.cols) > MAX_GRID_CELLS => {
                tracing::warn!(
                    rows = g.rows,
                    cols = g.cols,
                    max = MAX_GRID_CELLS,
                    "gridLayout too large, using default"
                );
                GridLayout::default()
            }
            Some(g) => g,
            None => GridLayout::default(),
        };

        tracing::debug!(?kind, ?explicit, category = ?product.category, "resolved template");
        Self {
            kind,
            frame_color,
            border_width,
            print_area,
            fit_area,
            grid,
            mug_style: MugStyle::from_title(&product.title),
        }
    }
}

fn ser_rect<S>(r: &Rect, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    PrintArea::new(r.x0, r.y0, r.width(), r.height()).serialize(serializer)
}

#[cfg(test)]
#[path = "../../tests/unit/template/resolve.rs"]
mod tests;
