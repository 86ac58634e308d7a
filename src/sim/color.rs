//! HSLA colors and two-stop gradients

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color in the HSL cylindrical-coordinate system plus alpha
///
/// Hue is in degrees and is never wrapped; saturation and lightness are
/// percentages; alpha is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Linear interpolation per channel, exact at `t = 0` and `t = 1`
    pub fn lerp(&self, other: &Hsla, t: f64) -> Hsla {
        let mix = |from: f64, to: f64| (1.0 - t) * from + t * to;
        Hsla {
            h: mix(self.h, other.h),
            s: mix(self.s, other.s),
            l: mix(self.l, other.l),
            a: mix(self.a, other.a),
        }
    }

    /// Convert to 8-bit RGBA (hue taken modulo 360)
    pub fn to_rgba8(&self) -> [u8; 4] {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(r), to_u8(g), to_u8(b), (self.a.clamp(0.0, 1.0) * 255.0).round() as u8]
    }
}

/// CSS `fillStyle` form: `hsl(<h>deg <s>% <l>% / <a>)`
impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}deg {}% {}% / {})", self.h, self.s, self.l, self.a)
    }
}

/// Two color stops interpolated by expansion progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Hsla,
    pub end: Hsla,
}

impl Gradient {
    pub fn new(start: Hsla, end: Hsla) -> Self {
        Self { start, end }
    }

    /// Color at `degree` along the gradient line
    pub fn color_at(&self, degree: f64) -> Hsla {
        self.start.lerp(&self.end, degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gradient_midpoint() {
        let grad = Gradient::new(Hsla::new(0.0, 100.0, 60.0, 0.8), Hsla::new(360.0, 100.0, 40.0, 0.6));
        let mid = grad.color_at(0.5);
        assert_eq!(mid.h, 180.0);
        assert_eq!(mid.s, 100.0);
        assert_eq!(mid.l, 50.0);
        assert!((mid.a - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_hue_not_clamped() {
        let grad = Gradient::new(Hsla::new(700.0, 0.0, 0.0, 1.0), Hsla::new(1060.0, 0.0, 0.0, 1.0));
        assert_eq!(grad.color_at(1.0).h, 1060.0);
    }

    #[test]
    fn test_css_string() {
        let c = Hsla::new(120.0, 100.0, 60.0, 0.8);
        assert_eq!(c.to_string(), "hsl(120deg 100% 60% / 0.8)");
    }

    #[test]
    fn test_to_rgba8_primaries() {
        assert_eq!(Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Hsla::new(120.0, 100.0, 50.0, 1.0).to_rgba8(), [0, 255, 0, 255]);
        // Hue wraps for display
        assert_eq!(Hsla::new(600.0, 100.0, 50.0, 0.0).to_rgba8(), [0, 0, 255, 0]);
        assert_eq!(Hsla::new(42.0, 0.0, 100.0, 1.0).to_rgba8(), [255, 255, 255, 255]);
    }

    fn channel() -> impl Strategy<Value = f64> {
        -1.0e4..1.0e4f64
    }

    proptest! {
        #[test]
        fn prop_endpoints_exact(
            h0 in channel(), s0 in channel(), l0 in channel(), a0 in channel(),
            h1 in channel(), s1 in channel(), l1 in channel(), a1 in channel(),
        ) {
            let grad = Gradient::new(Hsla::new(h0, s0, l0, a0), Hsla::new(h1, s1, l1, a1));
            prop_assert_eq!(grad.color_at(0.0), grad.start);
            prop_assert_eq!(grad.color_at(1.0), grad.end);
        }
    }
}
