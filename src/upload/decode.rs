use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Size;
use crate::foundation::error::{PrintfitError, PrintfitResult};
use crate::render::paint::{image_paint_from_premul, premultiply_rgba8_in_place};

/// Process-unique, monotonically increasing upload identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u64);

impl ImageId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A customer photo decoded into a ready-to-draw raster.
#[derive(Clone)]
pub struct UploadedImage {
    id: ImageId,
    width: u32,
    height: u32,
    paint: vello_cpu::Image,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl UploadedImage {
    /// Decode encoded image bytes (PNG, JPEG, WebP, ... as supported by `image`).
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> PrintfitResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| PrintfitError::decode(format!("unreadable image: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let img = Self::from_rgba8(width, height, rgba.into_raw())?;
        tracing::debug!(id = img.id.0, width, height, "decoded upload");
        Ok(img)
    }

    /// Wrap already-decoded straight-alpha RGBA8 pixels (row-major, tightly packed).
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> PrintfitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PrintfitError::decode("image has no pixels"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(PrintfitError::decode(format!(
                "image {width}x{height} exceeds the 65535 px raster limit"
            )));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(PrintfitError::decode("rgba byte length does not match dimensions"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        let paint = image_paint_from_premul(&rgba, width, height)
            .map_err(|e| PrintfitError::decode(e.to_string()))?;
        Ok(Self {
            id: ImageId::next(),
            width,
            height,
            paint,
        })
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel dimensions as geometry.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub(crate) fn paint(&self) -> &vello_cpu::Image {
        &self.paint
    }
}
