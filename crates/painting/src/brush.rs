//! Stroke rasterizer for the brush and eraser
//!
//! Each segment between consecutive points is drawn as a capsule: every
//! pixel whose center lies within half the brush size of the segment is
//! written. A capsule is a line with round caps, and consecutive capsules
//! share their endpoint discs, which gives round joins, so fast pointer
//! movement still produces one unbroken band.
//!
//! Pixels are written hard-edged (no anti-aliasing). Strokes therefore never
//! introduce near-miss colors that would stop an exact-match flood fill.

use tracing::debug;

use crate::surface::PixelBuffer;
use crate::types::Rgba;

/// Point in buffer space. Integer coordinates sit on pixel corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for StrokePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// Turns a sequence of points into pixel writes
#[derive(Debug, Default)]
pub struct StrokeRasterizer {
    /// Previous point (None if no stroke is open)
    last: Option<StrokePoint>,
    /// Color for the open stroke
    color: Rgba,
    /// Line width (diameter) for the open stroke
    size: f32,
    /// Segments drawn in the open stroke
    segments: usize,
}

impl StrokeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a path at `point`. Nothing is drawn until the first segment.
    pub fn begin(&mut self, point: StrokePoint, color: Rgba, size: u32) {
        self.last = Some(point);
        self.color = color;
        self.size = size.max(1) as f32;
        self.segments = 0;
    }

    /// Draw a segment from the previous point to `point`
    ///
    /// Returns the bounding box of written pixels (x, y, width, height), or
    /// None when no stroke is open or the segment misses the buffer.
    pub fn continue_to(
        &mut self,
        buffer: &mut PixelBuffer,
        point: StrokePoint,
    ) -> Option<(u32, u32, u32, u32)> {
        let Some(from) = self.last else {
            debug!("continue_to: no open stroke, ignoring");
            return None;
        };
        self.last = Some(point);
        self.segments += 1;
        draw_segment(buffer, from, point, self.size / 2.0, self.color)
    }

    /// Close the path. Returns the number of segments drawn.
    pub fn end(&mut self) -> usize {
        self.last = None;
        std::mem::take(&mut self.segments)
    }

    /// Whether a path is open
    pub fn is_open(&self) -> bool {
        self.last.is_some()
    }
}

/// Write every pixel whose center is within `radius` of segment `a`-`b`
pub fn draw_segment(
    buffer: &mut PixelBuffer,
    a: StrokePoint,
    b: StrokePoint,
    radius: f32,
    color: Rgba,
) -> Option<(u32, u32, u32, u32)> {
    if !(radius > 0.0) {
        return None;
    }

    let width = buffer.width();
    let height = buffer.height();

    // Bounding box of the capsule, clamped to the buffer
    let x_min = ((a.x.min(b.x) - radius).floor().max(0.0) as u32).min(width);
    let y_min = ((a.y.min(b.y) - radius).floor().max(0.0) as u32).min(height);
    let x_max = ((a.x.max(b.x) + radius).ceil().max(0.0) as u32).min(width);
    let y_max = ((a.y.max(b.y) + radius).ceil().max(0.0) as u32).min(height);

    if x_min >= x_max || y_min >= y_max {
        return None;
    }

    let seg_x = b.x - a.x;
    let seg_y = b.y - a.y;
    let seg_len_sq = seg_x * seg_x + seg_y * seg_y;
    let radius_sq = radius * radius;

    let pixels = buffer.pixels_mut();
    let row = width as usize;
    for py in y_min..y_max {
        let cy = py as f32 + 0.5;
        for px in x_min..x_max {
            let cx = px as f32 + 0.5;

            // Closest point on the segment to the pixel center
            let t = if seg_len_sq > 0.0 {
                (((cx - a.x) * seg_x + (cy - a.y) * seg_y) / seg_len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dx = cx - (a.x + seg_x * t);
            let dy = cy - (a.y + seg_y * t);

            if dx * dx + dy * dy <= radius_sq {
                pixels[(py as usize) * row + (px as usize)] = color;
            }
        }
    }

    Some((x_min, y_min, x_max - x_min, y_max - y_min))
}
