use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::core::Rect;
use crate::foundation::error::{PrintfitError, PrintfitResult};
use crate::template::color::ColorDef;
use crate::template::resolve::TemplateKind;

/// Product customization record as stored alongside a catalog product.
///
/// Every field is optional. Values that cannot be interpreted are dropped (and logged) so that a
/// damaged record still resolves to the kind defaults instead of failing the preview. The record
/// itself must be a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Explicit template kind. Stored under `category` by the catalog.
    #[serde(rename = "category", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TemplateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_color: Option<ColorDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_area: Option<PrintArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_layout: Option<GridLayout>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateConfigFields {
    #[serde(default, rename = "category", alias = "kind", deserialize_with = "de_kind")]
    kind: Option<TemplateKind>,
    #[serde(default, deserialize_with = "lenient")]
    frame_color: Option<ColorDef>,
    #[serde(default, deserialize_with = "lenient")]
    border_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    print_area: Option<PrintArea>,
    #[serde(default, deserialize_with = "lenient")]
    grid_layout: Option<GridLayout>,
}

impl<'de> Deserialize<'de> for TemplateConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Derived struct visitors also accept sequences; only objects are configs.
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let f: TemplateConfigFields = serde_json::from_value(serde_json::Value::Object(map))
            .map_err(serde::de::Error::custom)?;
        Ok(Self {
            kind: f.kind,
            frame_color: f.frame_color,
            border_width: f.border_width,
            print_area: f.print_area,
            grid_layout: f.grid_layout,
        })
    }
}

impl TemplateConfig {
    /// Parse a config from JSON text. Only non-object or syntactically broken input fails.
    pub fn from_json_str(s: &str) -> PrintfitResult<Self> {
        serde_json::from_str(s).map_err(|e| PrintfitError::serde(e.to_string()))
    }

    /// Interpret an already-parsed JSON value (e.g. a mixed-type database field).
    pub fn from_json_value(v: serde_json::Value) -> PrintfitResult<Self> {
        serde_json::from_value(v).map_err(|e| PrintfitError::serde(e.to_string()))
    }
}

/// Rectangle in canvas space, as authored (`x`, `y`, `width`, `height`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PrintArea {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Collage grid subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { rows: 2, cols: 2 }
    }
}

impl GridLayout {
    /// Number of cells rendered by the grid.
    pub fn cell_count(self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }
}

/// The product facts the preview depends on besides its customization record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductContext {
    /// Product title; drives the mug body styling.
    pub title: String,
    /// Category title (e.g. "Mugs"); used when the config has no explicit kind.
    pub category: Option<String>,
}

impl ProductContext {
    pub fn new(title: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            title: title.into(),
            category: category.map(str::to_owned),
        }
    }
}

/// Catalog product document: the subset needed to build a preview.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub customization_config: Option<TemplateConfig>,
}

/// A product's category, either as a bare title or a populated category document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Title(String),
    Doc { title: String },
}

impl CategoryRef {
    pub fn title(&self) -> &str {
        match self {
            Self::Title(t) | Self::Doc { title: t } => t,
        }
    }
}

impl ProductRecord {
    pub fn from_json_str(s: &str) -> PrintfitResult<Self> {
        serde_json::from_str(s).map_err(|e| PrintfitError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> PrintfitResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PrintfitError::Other(anyhow::anyhow!(
                "failed to read product '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }

    pub fn context(&self) -> ProductContext {
        ProductContext::new(
            self.title.clone(),
            self.category.as_ref().map(CategoryRef::title),
        )
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_value::<T>(raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable template config field");
            Ok(None)
        }
    }
}

fn de_kind<'de, D>(deserializer: D) -> Result<Option<TemplateKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(TemplateKind::from_tag(&s)),
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-string template category");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/config.rs"]
mod tests;
