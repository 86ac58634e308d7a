//! Resize-aware stage: owns the surface and keeps its grid at [-1, 1]

use glam::{DAffine2, DVec2};

use super::{Surface, SurfaceError};
use crate::consts::VIEWPORT_SCALE;

/// Transform mapping the default pixel grid ((0, 0) to (width, height)) to a
/// simple grid ((-1, -1) to (1, 1))
pub fn simplify_grid(width: u32, height: u32) -> DAffine2 {
    let half = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
    DAffine2::from_scale(half) * DAffine2::from_translation(DVec2::ONE)
}

/// A surface plus the viewport fraction it occupies
#[derive(Debug)]
pub struct Stage<S: Surface> {
    surface: S,
    scale: DVec2,
}

impl<S: Surface> Stage<S> {
    /// Wrap `surface` and size it for the initial viewport
    pub fn new(surface: S, viewport: (f64, f64)) -> Result<Self, SurfaceError> {
        Self::with_scale(surface, viewport, DVec2::splat(VIEWPORT_SCALE))
    }

    pub fn with_scale(surface: S, viewport: (f64, f64), scale: DVec2) -> Result<Self, SurfaceError> {
        let mut stage = Self { surface, scale };
        stage.resize(viewport.0, viewport.1)?;
        Ok(stage)
    }

    /// Resize to the new viewport and reset the transform; call on every resize
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> Result<(), SurfaceError> {
        let width = (self.scale.x * viewport_width).max(0.0) as u32;
        let height = (self.scale.y * viewport_height).max(0.0) as u32;
        self.surface.set_size(width, height);
        self.surface.set_transform(&simplify_grid(width, height))?;
        log::debug!("Stage resized to {}x{}", width, height);
        Ok(())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
