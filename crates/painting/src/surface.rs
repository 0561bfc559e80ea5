//! CPU pixel buffer for painting - 8-bit RGBA storage

use image::RgbaImage;
use tracing::debug;

use crate::constants::BACKGROUND;
use crate::error::PaintError;
use crate::types::Rgba;

/// An 8-bit RGBA pixel buffer
/// Pixels are stored row-major, (0, 0) is the top-left corner
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

/// Immutable copy of a buffer's pixels at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Box<[Rgba]>,
}

impl Snapshot {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), or None when out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_rgba_image(&self) -> RgbaImage {
        rgba_image_from(self.width, self.height, self.as_bytes())
    }

    /// Heap size of the pixel data in bytes
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Rgba>()
    }
}

impl PixelBuffer {
    /// Create a new buffer filled with opaque white
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        let pixel_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            pixels: vec![BACKGROUND; pixel_count],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether (x, y) names a pixel of this buffer
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<usize, PaintError> {
        if !self.contains(x, y) {
            return Err(PaintError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x as u32, y as u32))
    }

    /// Get the pixel at the given coordinates
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Rgba, PaintError> {
        let index = self.check_bounds(x, y)?;
        Ok(self.pixels[index])
    }

    /// Set the pixel at the given coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) -> Result<(), PaintError> {
        let index = self.check_bounds(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }

    /// Fill the half-open rectangle [x0, x1) x [y0, y1), clipped to the buffer.
    /// Corners may be given in either order.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        let x_min = x0.clamp(0, self.width as i32) as u32;
        let x_max = x1.clamp(0, self.width as i32) as u32;
        let y_min = y0.clamp(0, self.height as i32) as u32;
        let y_max = y1.clamp(0, self.height as i32) as u32;

        if x_min >= x_max || y_min >= y_max {
            return;
        }

        for y in y_min..y_max {
            let start = self.index(x_min, y);
            let end = self.index(x_max - 1, y) + 1;
            self.pixels[start..end].fill(color);
        }
    }

    /// Fill the whole buffer with one color
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Scale `source` to `dest_w` x `dest_h` and composite it with its
    /// top-left at (`dest_x`, `dest_y`).
    ///
    /// Sampling is nearest-neighbour at pixel centers. Source alpha is
    /// composited over the existing pixels. Anything outside the buffer is
    /// clipped. Returns the affected region as (x, y, width, height), or
    /// None when nothing landed on the buffer.
    pub fn draw_image(
        &mut self,
        source: &RgbaImage,
        dest_x: f32,
        dest_y: f32,
        dest_w: f32,
        dest_h: f32,
    ) -> Option<(u32, u32, u32, u32)> {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 || !(dest_w > 0.0) || !(dest_h > 0.0) {
            debug!("draw_image: skipped empty source or destination");
            return None;
        }

        // Pixels whose centers fall inside the destination rectangle
        let x_min = ((dest_x - 0.5).ceil().max(0.0) as u32).min(self.width);
        let y_min = ((dest_y - 0.5).ceil().max(0.0) as u32).min(self.height);
        let x_max = ((dest_x + dest_w - 0.5).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((dest_y + dest_h - 0.5).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        let scale_x = src_w as f32 / dest_w;
        let scale_y = src_h as f32 / dest_h;

        for py in y_min..y_max {
            let v = (((py as f32 + 0.5 - dest_y) * scale_y) as u32).min(src_h - 1);
            for px in x_min..x_max {
                let u = (((px as f32 + 0.5 - dest_x) * scale_x) as u32).min(src_w - 1);
                let src = Rgba::from(source.get_pixel(u, v).0);
                let index = self.index(px, py);
                self.pixels[index] = src.over(self.pixels[index]);
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Take an immutable copy of the current pixels
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Overwrite every pixel from a snapshot of the same size
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), PaintError> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(PaintError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: snapshot.width,
                actual_height: snapshot.height,
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }

    /// Change the buffer size. The only way to resize; the result is all white.
    pub fn resize_and_clear(&mut self, width: u32, height: u32) -> Result<(), PaintError> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        let pixel_count = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(pixel_count, BACKGROUND);
        Ok(())
    }

    /// Get direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_rgba_image(&self) -> RgbaImage {
        rgba_image_from(self.width, self.height, self.as_bytes())
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

fn rgba_image_from(width: u32, height: u32, bytes: &[u8]) -> RgbaImage {
    // Length always matches width * height * 4
    RgbaImage::from_vec(width, height, bytes.to_vec())
        .unwrap_or_else(|| RgbaImage::new(width, height))
}

/// Aspect-preserving fit of a `src_w` x `src_h` image, centered in a
/// `dst_w` x `dst_h` area. Returns (x, y, width, height).
pub fn fit_centered(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (f32, f32, f32, f32) {
    if src_w == 0 || src_h == 0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let width = src_w as f32 * scale;
    let height = src_h as f32 * scale;
    let x = (dst_w as f32 - width) / 2.0;
    let y = (dst_h as f32 - height) / 2.0;
    (x, y, width, height)
}
