//! Customer uploads: decoding and the per-session image list.

pub mod decode;
pub mod list;

pub use decode::{ImageId, UploadedImage};
pub use list::ImageList;
