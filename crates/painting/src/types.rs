use serde::{Deserialize, Serialize};

use crate::error::PaintError;

/// An 8-bit RGBA pixel.
///
/// Layout is `#[repr(C)]` so a pixel slice can be viewed as raw bytes with
/// bytemuck, matching what image encoders and texture uploads expect.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composite `self` over `dst` (straight alpha, source-over)
    /// Formula: out = src * alpha + dst * (1 - alpha)
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }
        let src_alpha = self.a as u32;
        let inv_src_alpha = 255 - src_alpha;
        let out_alpha = src_alpha + (dst.a as u32 * inv_src_alpha) / 255;
        if out_alpha == 0 {
            return Rgba::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            let premul = s as u32 * src_alpha + (d as u32 * dst.a as u32 * inv_src_alpha) / 255;
            ((premul + out_alpha / 2) / out_alpha).min(255) as u8
        };

        Rgba {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: out_alpha.min(255) as u8,
        }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// An opaque brush color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, PaintError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaintError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PaintError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Fully opaque pixel of this color
    pub const fn to_rgba(self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, 255)
    }
}

/// Drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    /// Flood fill; fires on pointer-down, no drag phase
    Bucket,
    /// Brush that paints the background color
    Eraser,
}

impl Tool {
    /// Whether this tool drags out a stroke
    pub fn is_stroking(self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }
}

impl From<doodle_ipc::ToolKind> for Tool {
    fn from(kind: doodle_ipc::ToolKind) -> Self {
        match kind {
            doodle_ipc::ToolKind::Brush => Tool::Brush,
            doodle_ipc::ToolKind::Bucket => Tool::Bucket,
            doodle_ipc::ToolKind::Eraser => Tool::Eraser,
        }
    }
}

impl From<Tool> for doodle_ipc::ToolKind {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Brush => doodle_ipc::ToolKind::Brush,
            Tool::Bucket => doodle_ipc::ToolKind::Bucket,
            Tool::Eraser => doodle_ipc::ToolKind::Eraser,
        }
    }
}

/// Current tool, color and brush size.
///
/// Only changed through explicit selection. The drawing algorithms read it
/// but never write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    tool: Tool,
    color: Rgb,
    brush_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Rgb::from_hex(doodle_config::DEFAULT_COLOR).unwrap_or(Rgb::BLACK),
            brush_size: doodle_config::DEFAULT_BRUSH_SIZE,
        }
    }
}

impl ToolState {
    pub fn new(tool: Tool, color: Rgb, brush_size: u32) -> Self {
        Self {
            tool,
            color,
            brush_size: brush_size.max(1),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Pick a color. Picking a color while erasing switches back to the brush.
    pub fn select_color(&mut self, color: Rgb) {
        self.color = color;
        if self.tool == Tool::Eraser {
            self.tool = Tool::Brush;
        }
    }

    /// Set the brush diameter. The UI offers 5..=50; the engine only refuses 0.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.max(1);
    }

    /// Color the active tool actually lays down
    pub fn draw_color(&self) -> Rgba {
        match self.tool {
            Tool::Eraser => crate::constants::BACKGROUND,
            Tool::Brush | Tool::Bucket => self.color.to_rgba(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_palette() {
        for hex in doodle_config::DEFAULT_PALETTE {
            let color = Rgb::from_hex(hex).unwrap();
            assert_eq!(color.to_hex(), hex.to_uppercase());
        }
    }

    #[test]
    fn test_hex_without_hash_and_lowercase() {
        assert_eq!(Rgb::from_hex("cf6a87").unwrap(), Rgb::new(0xCF, 0x6A, 0x87));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(Rgb::from_hex("#FFF"), Err(PaintError::InvalidColor(_))));
        assert!(matches!(Rgb::from_hex("#GG0000"), Err(PaintError::InvalidColor(_))));
        assert!(matches!(Rgb::from_hex("#ÿÿÿ"), Err(PaintError::InvalidColor(_))));
        assert!(matches!(Rgb::from_hex("#+F+F+F"), Err(PaintError::InvalidColor(_))));
        assert!(matches!(Rgb::from_hex("+F0000"), Err(PaintError::InvalidColor(_))));
    }

    #[test]
    fn test_default_color_from_config() {
        let state = ToolState::default();
        assert_eq!(state.color().to_hex(), doodle_config::DEFAULT_COLOR);
        assert_eq!(state.tool(), Tool::Brush);
    }

    #[test]
    fn test_select_color_while_erasing_switches_to_brush() {
        let mut state = ToolState::default();
        state.select_tool(Tool::Eraser);
        state.select_color(Rgb::BLACK);
        assert_eq!(state.tool(), Tool::Brush);
        assert_eq!(state.color(), Rgb::BLACK);
    }

    #[test]
    fn test_select_color_keeps_bucket() {
        let mut state = ToolState::default();
        state.select_tool(Tool::Bucket);
        state.select_color(Rgb::BLACK);
        assert_eq!(state.tool(), Tool::Bucket);
    }

    #[test]
    fn test_eraser_draws_white() {
        let mut state = ToolState::new(Tool::Eraser, Rgb::BLACK, 10);
        assert_eq!(state.draw_color(), Rgba::WHITE);
        state.select_tool(Tool::Brush);
        assert_eq!(state.draw_color(), Rgba::BLACK);
    }

    #[test]
    fn test_brush_size_never_zero() {
        let mut state = ToolState::default();
        state.set_brush_size(0);
        assert_eq!(state.brush_size(), 1);
    }

    #[test]
    fn test_over_opaque_and_transparent() {
        let red = Rgba::new(255, 0, 0, 255);
        assert_eq!(red.over(Rgba::WHITE), red);
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
    }

    #[test]
    fn test_over_half_alpha_on_white() {
        let half_red = Rgba::new(255, 0, 0, 128);
        let out = half_red.over(Rgba::WHITE);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 255);
        // 127/255 of white survives
        assert!((out.g as i32 - 127).abs() <= 1);
        assert!((out.b as i32 - 127).abs() <= 1);
    }
}
