//! User-controlled image placement inside a print area.
//!
//! A transform is an offset from the print-area center, a rotation about that center, and a
//! uniform scale. Auto-fit computes the starting transform for a fresh upload.

use crate::foundation::core::{Affine, Rect, Size, Vec2};

/// Smallest scale reachable through zoom.
pub const MIN_SCALE: f64 = 0.1;
/// Largest scale reachable through zoom.
pub const MAX_SCALE: f64 = 3.0;
/// Scale change of one zoom button press.
pub const ZOOM_STEP: f64 = 0.1;
/// Rotation of one rotate button press, in degrees.
pub const ROTATE_STEP_DEG: f64 = -90.0;
/// Overscan applied on top of the contain-fit scale.
pub const AUTO_FIT_OVERSCAN: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Degrees, accumulated without wrapping.
    pub rotation_deg: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        rotation_deg: 0.0,
    };

    pub fn offset(self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn with_offset(self, offset: Vec2) -> Self {
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            ..self
        }
    }

    /// Map image pixel space into canvas space.
    ///
    /// The image center lands on the print-area center plus the offset, rotated and scaled
    /// about that point.
    pub fn placement(self, print_area: Rect, image: Size) -> Affine {
        let anchor = print_area.center().to_vec2() + self.offset();
        Affine::translate(anchor)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate((-image.width / 2.0, -image.height / 2.0))
    }
}

/// Contain-fit the image into `area`, then overscan by 10%. Offsets and rotation reset.
pub fn auto_fit(image: Size, area: Rect) -> ImageTransform {
    let image_aspect = image.width / image.height;
    let area_aspect = area.width() / area.height();
    let scale = if image_aspect > area_aspect {
        area.height() / image.height
    } else {
        area.width() / image.width
    };
    ImageTransform {
        scale: scale * AUTO_FIT_OVERSCAN,
        ..ImageTransform::IDENTITY
    }
}

pub fn apply_zoom(t: ImageTransform, delta: f64) -> ImageTransform {
    ImageTransform {
        scale: (t.scale + delta).clamp(MIN_SCALE, MAX_SCALE),
        ..t
    }
}

pub fn apply_rotation(t: ImageTransform, delta_deg: f64) -> ImageTransform {
    ImageTransform {
        rotation_deg: t.rotation_deg + delta_deg,
        ..t
    }
}

/// Cover-fit placement for collage cells: fill the cell, centered, overflow clipped by the caller.
pub fn cover_fit(image: Size, cell: Rect) -> Affine {
    let scale = (cell.width() / image.width).max(cell.height() / image.height);
    let x = cell.x0 + (cell.width() - image.width * scale) / 2.0;
    let y = cell.y0 + (cell.height() - image.height * scale) / 2.0;
    Affine::translate((x, y)) * Affine::scale(scale)
}

#[cfg(test)]
#[path = "../tests/unit/transform.rs"]
mod tests;
