//! Product template configuration and its resolution into render geometry.

pub mod color;
pub mod config;
pub mod resolve;

pub use color::ColorDef;
pub use config::{CategoryRef, GridLayout, PrintArea, ProductContext, ProductRecord, TemplateConfig};
pub use resolve::{MAX_GRID_CELLS, MugStyle, Template, TemplateKind, is_customizable_category};
