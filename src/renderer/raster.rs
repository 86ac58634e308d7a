//! Software RGBA surface for headless rendering
//!
//! Fills are snapped to whole pixels and alpha-blended (source over). Like a
//! canvas, nothing is cleared between frames unless `clear` is called.

use bytemuck::{Pod, Zeroable};
use glam::{DAffine2, DVec2};

use super::{Surface, SurfaceError};
use crate::sim::Hsla;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

    /// Blend `src` over `self`
    fn blend(self, src: [u8; 4]) -> Pixel {
        let sa = src[3] as u32;
        if sa == 255 {
            return Pixel { r: src[0], g: src[1], b: src[2], a: 255 };
        }
        let inv = 255 - sa;
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
        Pixel {
            r: mix(src[0], self.r),
            g: mix(src[1], self.g),
            b: mix(src[2], self.b),
            a: (sa + (self.a as u32 * inv + 127) / 255) as u8,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    transform: DAffine2,
    pixels: Vec<Pixel>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: DAffine2::IDENTITY,
            pixels: vec![Pixel::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    /// Number of pixels with any coverage
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Snap a physical span to the pixel columns/rows whose centers it covers
    fn span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
        let start = lo.round().clamp(0.0, limit as f64) as u32;
        let end = hi.round().clamp(0.0, limit as f64) as u32;
        start..end.max(start)
    }
}

impl Surface for RasterSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Hsla) {
        let a = self.transform.transform_point2(DVec2::new(x, y));
        let b = self.transform.transform_point2(DVec2::new(x + width, y + height));
        let (min, max) = (a.min(b), a.max(b));
        let src = color.to_rgba8();
        if src[3] == 0 {
            return;
        }
        for py in Self::span(min.y, max.y, self.height) {
            let row = (py * self.width) as usize;
            for px in Self::span(min.x, max.x, self.width) {
                let idx = row + px as usize;
                self.pixels[idx] = self.pixels[idx].blend(src);
            }
        }
    }

    fn set_transform(&mut self, transform: &DAffine2) -> Result<(), SurfaceError> {
        if !transform.is_finite() {
            return Err(SurfaceError::Transform(format!("non-finite matrix {transform:?}")));
        }
        self.transform = *transform;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.transform = DAffine2::IDENTITY;
        self.pixels = vec![Pixel::TRANSPARENT; width as usize * height as usize];
    }
}
