//! Encoding rendered previews for hand-off (files, `<img src>` data URLs).

use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::error::{PrintfitError, PrintfitResult};
use crate::render::FrameRGBA;
use crate::render::paint::premultiply_rgba8_in_place;

/// Default JPEG quality for exports.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg { quality: u8 },
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`; case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => None,
        }
    }
}

fn check_len(frame: &FrameRGBA) -> PrintfitResult<()> {
    let need = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != need {
        return Err(PrintfitError::export(format!(
            "frame data is {} bytes, expected {need} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    Ok(())
}

/// PNG bytes with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> PrintfitResult<Vec<u8>> {
    check_len(frame)?;
    let rgba = frame.to_straight_rgba8();
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PrintfitError::export(format!("png encoding failed: {e}")))?;
    Ok(out.into_inner())
}

/// JPEG bytes. Translucent pixels are flattened onto white.
pub fn encode_jpeg(frame: &FrameRGBA, quality: u8) -> PrintfitResult<Vec<u8>> {
    check_len(frame)?;
    let rgb = flatten_on_white(frame);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| PrintfitError::export(format!("jpeg encoding failed: {e}")))?;
    Ok(out)
}

pub fn encode(frame: &FrameRGBA, format: ExportFormat) -> PrintfitResult<Vec<u8>> {
    match format {
        ExportFormat::Png => encode_png(frame),
        ExportFormat::Jpeg { quality } => encode_jpeg(frame, quality),
    }
}

/// `data:<mime>;base64,...` URL for the encoded frame.
pub fn to_data_url(frame: &FrameRGBA, format: ExportFormat) -> PrintfitResult<String> {
    let bytes = encode(frame, format)?;
    Ok(format!(
        "data:{};base64,{}",
        format.mime(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

fn flatten_on_white(frame: &FrameRGBA) -> Vec<u8> {
    let mut premul = frame.data.clone();
    if !frame.premultiplied {
        premultiply_rgba8_in_place(&mut premul);
    }

    let mut rgb = Vec::with_capacity(premul.len() / 4 * 3);
    for px in premul.chunks_exact(4) {
        // Premultiplied source-over on opaque white: c + (255 - a).
        let bg = 255 - px[3];
        rgb.extend_from_slice(&[
            px[0].saturating_add(bg),
            px[1].saturating_add(bg),
            px[2].saturating_add(bg),
        ]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
        FrameRGBA {
            width: w,
            height: h,
            data: px.repeat((w * h) as usize),
            premultiplied: true,
        }
    }

    #[test]
    fn png_decodes_back_to_same_size() {
        let bytes = encode_png(&solid(3, 2, [255, 0, 0, 255])).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn jpeg_flattens_transparency_to_white() {
        let f = solid(8, 8, [0, 0, 0, 0]);
        let bytes = encode_jpeg(&f, 95).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert!(img.get_pixel(4, 4).0.iter().all(|&c| c > 245));
    }

    #[test]
    fn data_url_prefix_follows_format() {
        let f = solid(1, 1, [0, 0, 0, 255]);
        assert!(
            to_data_url(&f, ExportFormat::Png)
                .unwrap()
                .starts_with("data:image/png;base64,iVBOR")
        );
        assert!(
            to_data_url(&f, ExportFormat::Jpeg { quality: 80 })
                .unwrap()
                .starts_with("data:image/jpeg;base64,/9j/")
        );
    }

    #[test]
    fn short_buffer_is_an_export_error() {
        let mut f = solid(2, 2, [0, 0, 0, 255]);
        f.data.truncate(3);
        let err = encode_png(&f).unwrap_err();
        assert!(err.to_string().starts_with("export error:"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_extension("PNG"), Some(ExportFormat::Png));
        assert!(matches!(
            ExportFormat::from_extension("jpeg"),
            Some(ExportFormat::Jpeg { .. })
        ));
        assert_eq!(ExportFormat::from_extension("gif"), None);
    }
}
