//! `printfit` renders live customization previews for print products.
//!
//! A [`Template`] (Frame, Mug or Collage) is resolved from a product's customization config,
//! customer photos are decoded into [`UploadedImage`]s, and a [`CompositionEngine`] draws the
//! product mock-up with the photos placed under a user-controlled [`ImageTransform`].
//! [`PreviewSession`] ties these together for interactive hosts.
#![forbid(unsafe_code)]

pub mod export;
pub mod foundation;
pub mod interact;
pub mod render;
pub mod session;
pub mod template;
pub mod transform;
pub mod upload;

pub use export::{ExportFormat, encode_jpeg, encode_png, to_data_url};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{PrintfitError, PrintfitResult};
pub use interact::{DisplayMapping, DragState, begin_drag, continue_drag, end_drag};
pub use render::{CollageCell, CompositionEngine, FrameRGBA, Surface, collage_cells, mat_rect};
pub use session::{PreviewOpts, PreviewSession};
pub use template::{
    ColorDef, GridLayout, MugStyle, PrintArea, ProductContext, ProductRecord, Template,
    TemplateConfig, TemplateKind, is_customizable_category,
};
pub use transform::{ImageTransform, apply_rotation, apply_zoom, auto_fit, cover_fit};
pub use upload::{ImageId, ImageList, UploadedImage};
