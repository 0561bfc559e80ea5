//! Flood fill for the bucket tool
//!
//! 4-connected (no diagonals), exact RGBA match, no tolerance. Regions drawn
//! with anti-aliased edges (for example a generated coloring page) will keep
//! a seam of unfilled edge pixels; that is a property of exact matching and
//! is left as-is.

use tracing::debug;

use crate::error::PaintError;
use crate::surface::PixelBuffer;
use crate::types::Rgba;

/// Replace the 4-connected region of pixels matching the seed pixel's color.
///
/// The seed pixel's color is the target. When it already equals `new_color`
/// nothing happens. Otherwise every pixel reachable from the seed through
/// pixels exactly equal to the target is set to `new_color`.
///
/// Uses an explicit stack, so region size is bounded by memory rather than
/// call depth. Pixels are recolored as they are pushed, which doubles as the
/// visited mark: each coordinate enters the stack at most once.
///
/// Returns the number of pixels changed. A seed outside the buffer fails with
/// [`PaintError::OutOfBounds`] and changes nothing.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    seed_x: i32,
    seed_y: i32,
    new_color: Rgba,
) -> Result<usize, PaintError> {
    let target = buffer.get_pixel(seed_x, seed_y)?;
    if target == new_color {
        debug!(
            "flood_fill: seed ({}, {}) already {:?}, nothing to do",
            seed_x, seed_y, new_color
        );
        return Ok(0);
    }

    let width = buffer.width();
    let height = buffer.height();
    let seed_index = buffer.index(seed_x as u32, seed_y as u32);
    let pixels = buffer.pixels_mut();

    let mut stack: Vec<(u32, u32)> = Vec::new();
    pixels[seed_index] = new_color;
    stack.push((seed_x as u32, seed_y as u32));
    let mut filled = 1usize;

    let row = width as usize;
    while let Some((x, y)) = stack.pop() {
        let index = (y as usize) * row + (x as usize);

        let mut visit = |nx: u32, ny: u32, n_index: usize| {
            if pixels[n_index] == target {
                pixels[n_index] = new_color;
                stack.push((nx, ny));
                filled += 1;
            }
        };

        if x > 0 {
            visit(x - 1, y, index - 1);
        }
        if x + 1 < width {
            visit(x + 1, y, index + 1);
        }
        if y > 0 {
            visit(x, y - 1, index - row);
        }
        if y + 1 < height {
            visit(x, y + 1, index + row);
        }
    }

    debug!(
        "flood_fill: seed ({}, {}) recolored {} pixels",
        seed_x, seed_y, filled
    );
    Ok(filled)
}
