//! Spritesheet compositing - places scaled frames into a fixed grid

use crate::error::SheetError;
use crate::layout::LayoutConfig;
use crate::scale::ScaledFrame;
use image::{Rgba, RgbaImage};

/// Transparent color used for the canvas background
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Allocate an empty, fully transparent canvas for `layout`.
pub fn blank_canvas(layout: &LayoutConfig) -> Result<RgbaImage, SheetError> {
    let (width, height) = layout.canvas_size()?;
    Ok(RgbaImage::from_pixel(width, height, TRANSPARENT))
}

/// Composite scaled frames into a grid canvas.
///
/// Frame `i` goes to row `i / columns`, column `i % columns`, centered in its
/// cell. Frames past the grid capacity are skipped. Fails only when the
/// layout describes a canvas that cannot be allocated.
///
/// # Examples
///
/// ```
/// use gifsheet::layout::LayoutConfig;
/// use gifsheet::scale::{scale_frame, target_size};
/// use gifsheet::spritesheet::render_spritesheet;
/// use image::{Rgba, RgbaImage};
///
/// let layout = LayoutConfig { columns: 2, rows: 2, cell_size: 4 };
/// let frame = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
/// let scaled = scale_frame(&frame, target_size(0, 4, 4, 4).unwrap());
///
/// let sheet = render_spritesheet(&layout, &[scaled]).unwrap();
/// assert_eq!(sheet.dimensions(), (8, 8));
/// assert_eq!(sheet.get_pixel(0, 0)[0], 255);
/// assert_eq!(sheet.get_pixel(4, 0)[3], 0);
/// ```
pub fn render_spritesheet(
    layout: &LayoutConfig,
    frames: &[ScaledFrame],
) -> Result<RgbaImage, SheetError> {
    let mut sheet = blank_canvas(layout)?;
    for (i, frame) in frames.iter().take(layout.capacity()).enumerate() {
        place_frame(&mut sheet, layout, i, frame);
    }
    Ok(sheet)
}

/// Copy one scaled frame into cell `index`, overwriting what was there.
///
/// Cells never overlap, so a straight copy is enough; alpha is carried over
/// as-is rather than blended.
pub fn place_frame(sheet: &mut RgbaImage, layout: &LayoutConfig, index: usize, frame: &ScaledFrame) {
    if index >= layout.capacity() {
        return;
    }
    let (cell_x, cell_y) = layout.cell_origin(index);
    let (off_x, off_y) = frame.size.offset();
    let dest_x = cell_x + off_x;
    let dest_y = cell_y + off_y;

    // Clip to the cell in case the frame is larger than advertised
    let width = frame.image.width().min(layout.cell_size.saturating_sub(off_x));
    let height = frame.image.height().min(layout.cell_size.saturating_sub(off_y));

    for y in 0..height {
        for x in 0..width {
            let pixel = *frame.image.get_pixel(x, y);
            sheet.put_pixel(dest_x + x, dest_y + y, pixel);
        }
    }
}
