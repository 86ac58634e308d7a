//! 2D drawing surfaces
//!
//! Everything draws in a simple grid where both axes run from -1 to 1. The
//! `Stage` keeps the surface sized to the viewport and its transform mapping
//! that grid onto physical pixels.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod raster;
pub mod recording;
pub mod stage;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use raster::{Pixel, RasterSurface};
pub use recording::{FillOp, RecordingSurface};
pub use stage::{Stage, simplify_grid};

use glam::DAffine2;
use thiserror::Error;

use crate::sim::Hsla;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no 2d context: {0}")]
    Context(String),
    #[error("failed to set transform: {0}")]
    Transform(String),
}

/// A drawing surface that accepts axis-aligned fills in logical coordinates
pub trait Surface {
    /// Fill the rectangle with top-left `(x, y)` in logical coordinates
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Hsla);

    /// Replace the logical-to-physical transform
    fn set_transform(&mut self, transform: &DAffine2) -> Result<(), SurfaceError>;

    /// Physical size in pixels
    fn size(&self) -> (u32, u32);

    /// Resize the backing store; implementations may reset the transform
    fn set_size(&mut self, width: u32, height: u32);
}
