//! Surface that records draw calls instead of rasterizing them

use glam::DAffine2;

use super::{Surface, SurfaceError};
use crate::sim::Hsla;

/// One recorded `fill_rect` call in logical coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct FillOp {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Hsla,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub transform: DAffine2,
    /// Number of `set_transform` calls
    pub transform_resets: u32,
    pub fills: Vec<FillOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: DAffine2::IDENTITY,
            transform_resets: 0,
            fills: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Hsla) {
        self.fills.push(FillOp {
            x,
            y,
            width,
            height,
            color: *color,
        });
    }

    fn set_transform(&mut self, transform: &DAffine2) -> Result<(), SurfaceError> {
        self.transform = *transform;
        self.transform_resets += 1;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        // Like a canvas, resizing drops the current transform
        self.transform = DAffine2::IDENTITY;
    }
}
