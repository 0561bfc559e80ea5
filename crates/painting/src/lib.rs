//! DoodleDream paint engine - raster canvas, tools and history
//!
//! This crate provides the core of the coloring app:
//! - [`surface::PixelBuffer`] - 8-bit RGBA canvas with snapshots
//! - [`fill`] - 4-connected exact-match flood fill (bucket tool)
//! - [`brush`] - Stroke rasterizer with round caps and joins
//! - [`mapping`] - Pointer/touch coordinates to buffer pixels
//! - [`history`] - Bounded snapshot history for undo
//! - [`session`] - Paint session tying the above together

pub mod brush;
pub mod constants;
pub mod error;
pub mod fill;
pub mod history;
pub mod mapping;
pub mod session;
pub mod surface;
pub mod types;

pub use brush::*;
pub use constants::*;
pub use error::*;
pub use fill::*;
pub use history::*;
pub use mapping::*;
pub use session::*;
pub use surface::*;
pub use types::*;
