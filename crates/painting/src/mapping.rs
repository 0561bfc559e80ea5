//! Pointer/touch coordinates to buffer pixel coordinates
//!
//! The surface may be displayed at a different size than its pixel
//! resolution (CSS scaling, HiDPI). Client coordinates are offset by the
//! surface rectangle and scaled by buffer size over displayed size.

use doodle_ipc::{PointerSource, SurfaceRect};

/// Pixel coordinate in buffer space. May lie outside the buffer when the
/// pointer is outside the surface rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferPoint {
    pub x: i32,
    pub y: i32,
}

impl BufferPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Maps client-space input to a buffer of fixed pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    buffer_width: u32,
    buffer_height: u32,
}

impl CoordinateMapper {
    pub fn new(buffer_width: u32, buffer_height: u32) -> Self {
        Self {
            buffer_width,
            buffer_height,
        }
    }

    /// `buffer_x = floor((client_x - rect.left) * buffer_width / rect.width)`,
    /// likewise for y. Returns None for a degenerate (zero or non-finite)
    /// rectangle.
    pub fn map(&self, client_x: f32, client_y: f32, rect: &SurfaceRect) -> Option<BufferPoint> {
        if !(rect.width > 0.0) || !(rect.height > 0.0) {
            return None;
        }
        let scale_x = self.buffer_width as f32 / rect.width;
        let scale_y = self.buffer_height as f32 / rect.height;

        let x = ((client_x - rect.left) * scale_x).floor();
        let y = ((client_y - rect.top) * scale_y).floor();
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(BufferPoint::new(x as i32, y as i32))
    }

    /// Map a mouse position or the first touch point. Extra touch points
    /// are ignored; a touch event with no points maps to nothing.
    pub fn map_source(&self, source: &PointerSource, rect: &SurfaceRect) -> Option<BufferPoint> {
        let (x, y) = source.primary()?;
        self.map(x, y, rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_two() {
        let mapper = CoordinateMapper::new(1000, 1000);
        let rect = SurfaceRect::new(100.0, 50.0, 500.0, 500.0);
        assert_eq!(mapper.map(110.0, 50.0, &rect), Some(BufferPoint::new(20, 0)));
    }

    #[test]
    fn test_identity_mapping() {
        let mapper = CoordinateMapper::new(400, 300);
        let rect = SurfaceRect::new(0.0, 0.0, 400.0, 300.0);
        assert_eq!(mapper.map(12.7, 299.9, &rect), Some(BufferPoint::new(12, 299)));
    }

    #[test]
    fn test_downscaled_display() {
        // Buffer shown at twice its resolution
        let mapper = CoordinateMapper::new(100, 100);
        let rect = SurfaceRect::new(0.0, 0.0, 200.0, 200.0);
        assert_eq!(mapper.map(199.0, 3.0, &rect), Some(BufferPoint::new(99, 1)));
    }

    #[test]
    fn test_outside_rect_maps_outside_buffer() {
        let mapper = CoordinateMapper::new(100, 100);
        let rect = SurfaceRect::new(10.0, 10.0, 100.0, 100.0);
        assert_eq!(mapper.map(5.0, 200.0, &rect), Some(BufferPoint::new(-5, 190)));
    }

    #[test]
    fn test_degenerate_rect() {
        let mapper = CoordinateMapper::new(100, 100);
        let rect = SurfaceRect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(mapper.map(5.0, 5.0, &rect), None);
    }

    #[test]
    fn test_mouse_and_touch_uniform() {
        let mapper = CoordinateMapper::new(1000, 1000);
        let rect = SurfaceRect::new(0.0, 0.0, 500.0, 500.0);

        let mouse = PointerSource::Mouse { x: 10.0, y: 20.0 };
        let touch = PointerSource::Touch {
            points: vec![[10.0, 20.0], [400.0, 400.0]],
        };
        assert_eq!(mapper.map_source(&mouse, &rect), Some(BufferPoint::new(20, 40)));
        assert_eq!(mapper.map_source(&touch, &rect), mapper.map_source(&mouse, &rect));

        let no_touch = PointerSource::Touch { points: vec![] };
        assert_eq!(mapper.map_source(&no_touch, &rect), None);
    }
}
