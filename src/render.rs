//! Raster backend: template drawing on top of `vello_cpu`.

pub mod collage;
pub mod engine;
pub mod frame;
pub mod mug;
pub(crate) mod paint;
pub mod surface;
pub(crate) mod text;

pub use collage::{CollageCell, collage_cells};
pub use engine::CompositionEngine;
pub use frame::mat_rect;
pub use surface::{FrameRGBA, Surface};
