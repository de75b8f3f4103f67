use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::render::engine::Scene;
use crate::render::frame::LABEL_COLOR;
use crate::render::paint::{draw_image_clipped, fill_rect, stroke_rect};
use crate::render::text::LabelPainter;
use crate::template::config::GridLayout;
use crate::template::resolve::MAX_GRID_CELLS;
use crate::transform::cover_fit;

/// Outer margin around the whole grid.
pub const GRID_MARGIN: f64 = 10.0;
/// Padding on each side of every cell.
pub const CELL_PADDING: f64 = 5.0;

const CELL_PLACEHOLDER: Rgba8 = Rgba8::opaque(0xf5, 0xf5, 0xf5);
const CELL_BORDER: Rgba8 = Rgba8::opaque(0xdd, 0xdd, 0xdd);

/// One grid slot. `index` is the image list index rendered into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollageCell {
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub rect: Rect,
}

/// Row-major cell geometry for `grid` on `canvas`. Empty when either dimension is zero.
pub fn collage_cells(canvas: Canvas, grid: GridLayout) -> impl Iterator<Item = CollageCell> {
    let cols = grid.cols;
    let rows = if grid.cols == 0 { 0 } else { grid.rows };
    let cell_w = (f64::from(canvas.width) - 2.0 * GRID_MARGIN) / f64::from(cols.max(1));
    let cell_h = (f64::from(canvas.height) - 2.0 * GRID_MARGIN) / f64::from(rows.max(1));

    (0..rows).flat_map(move |row| {
        (0..cols).map(move |col| {
            let x = GRID_MARGIN + f64::from(col) * cell_w + CELL_PADDING;
            let y = GRID_MARGIN + f64::from(row) * cell_h + CELL_PADDING;
            CollageCell {
                index: (row as usize) * (cols as usize) + (col as usize),
                row,
                col,
                rect: Rect::new(
                    x,
                    y,
                    x + cell_w - 2.0 * CELL_PADDING,
                    y + cell_h - 2.0 * CELL_PADDING,
                ),
            }
        })
    })
}

pub(crate) fn draw(
    ctx: &mut vello_cpu::RenderContext,
    mut labels: Option<&mut LabelPainter>,
    scene: &Scene<'_>,
) {
    fill_rect(ctx, scene.canvas.rect(), Rgba8::WHITE);

    let cells = collage_cells(scene.canvas, scene.template.grid).take(MAX_GRID_CELLS as usize);
    for cell in cells {
        match scene.images.get(cell.index) {
            Some(img) => {
                let size = img.size();
                draw_image_clipped(
                    ctx,
                    img.paint(),
                    (size.width, size.height),
                    cover_fit(size, cell.rect),
                    cell.rect,
                );
                stroke_rect(ctx, cell.rect, CELL_BORDER, 1.0);
            }
            None => {
                fill_rect(ctx, cell.rect, CELL_PLACEHOLDER);
                stroke_rect(ctx, cell.rect, CELL_BORDER, 1.0);
                if let Some(labels) = labels.as_deref_mut() {
                    let text = format!("Photo {}", cell.index + 1);
                    labels.draw_centered(ctx, &text, cell.rect.center(), 14.0, LABEL_COLOR);
                }
            }
        }
    }
}
