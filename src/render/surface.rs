use crate::foundation::core::Canvas;
use crate::foundation::error::PrintfitResult;
use crate::render::paint::unpremultiply_rgba8_in_place;

/// A rendered preview as RGBA8 pixels.
///
/// Surfaces produce **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, ready for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        pixel_at(&self.data, self.width, self.height, x, y)
    }
}

/// Fixed-size raster target. Every draw clears and repaints the whole surface.
pub struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Surface {
    pub fn new(canvas: Canvas) -> PrintfitResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let (w, h) = dims(canvas);
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            ctx: None,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        pixel_at(self.data(), self.canvas.width, self.canvas.height, x, y)
    }

    /// Snapshot the current pixels.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }

    /// Record drawing commands into a fresh context, then replace the surface contents.
    pub(crate) fn redraw(&mut self, f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let (w, h) = dims(self.canvas);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        f(&mut ctx);
        ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx = Some(ctx);
    }
}

fn dims(canvas: Canvas) -> (u16, u16) {
    // `Canvas::new` bounds both sides to u16.
    (canvas.width as u16, canvas.height as u16)
}

fn pixel_at(data: &[u8], width: u32, height: u32, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= width || y >= height {
        return None;
    }
    let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
    let px = data.get(idx..idx + 4)?;
    Some([px[0], px[1], px[2], px[3]])
}
