//! Browser `<canvas>` 2D context surface

use glam::DAffine2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, SurfaceError};
use crate::sim::Hsla;

pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Acquire the 2D context eagerly; fails if the canvas cannot provide one
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Context(format!("{e:?}")))?
            .ok_or_else(|| SurfaceError::Context("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Context("not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for Canvas2d {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Hsla) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn set_transform(&mut self, t: &DAffine2) -> Result<(), SurfaceError> {
        self.ctx
            .set_transform(
                t.matrix2.x_axis.x,
                t.matrix2.x_axis.y,
                t.matrix2.y_axis.x,
                t.matrix2.y_axis.y,
                t.translation.x,
                t.translation.y,
            )
            .map_err(|e| SurfaceError::Transform(format!("{e:?}")))
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}
