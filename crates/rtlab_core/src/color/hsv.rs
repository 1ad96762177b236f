use std::ops::{Add, Mul, MulAssign};

use super::{channel_to_u8, clamp01, ColorModel, ColorSpace, Pixel};

/// Hue/saturation/value color. Hue is a fraction of a full turn in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
}

impl Hsv {
    pub const WHITE: Hsv = Hsv::opaque(0.0, 0.0, 1.0);
    pub const BLACK: Hsv = Hsv::opaque(0.0, 0.0, 0.0);
    pub const RED: Hsv = Hsv::opaque(0.0, 0.4, 0.6);
    pub const GREEN: Hsv = Hsv::opaque(0.3, 0.8, 0.4);
    pub const BLUE: Hsv = Hsv::opaque(0.6, 0.2, 0.2);

    const fn opaque(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v, a: 1.0 }
    }

    /// Create an opaque color. Channels are clamped to `[0, 1]`.
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self::with_alpha(h, s, v, 1.0)
    }

    /// Create a color with alpha. Channels are clamped to `[0, 1]`.
    pub fn with_alpha(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self {
            h: clamp01(h),
            s: clamp01(s),
            v: clamp01(v),
            a: clamp01(a),
        }
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn v(&self) -> f64 {
        self.v
    }

    /// Six-sector HSV to RGB conversion.
    ///
    /// A hue of exactly 1.0 is a full turn and lands in the first sector.
    pub fn to_rgb(&self) -> [f64; 3] {
        let hue = (self.h * 360.0) % 360.0;
        let chroma = self.v * self.s;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = self.v - chroma;

        let (r0, g0, b0) = match (hue / 60.0) as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        [r0 + m, g0 + m, b0 + m]
    }
}

impl Default for Hsv {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Hsv {
    type Output = Hsv;

    fn add(self, other: Hsv) -> Hsv {
        Hsv::with_alpha(self.h + other.h, self.s + other.s, self.v + other.v, self.a)
    }
}

impl Mul<f64> for Hsv {
    type Output = Hsv;

    fn mul(self, f: f64) -> Hsv {
        Hsv::with_alpha(self.h * f, self.s * f, self.v * f, self.a)
    }
}

impl MulAssign<f64> for Hsv {
    fn mul_assign(&mut self, f: f64) {
        *self = *self * f;
    }
}

impl ColorModel for Hsv {
    const SPACE: ColorSpace = ColorSpace::Hsv;
    const WHITE: Self = Hsv::WHITE;
    const BLACK: Self = Hsv::BLACK;

    fn from_channels(channels: [f64; 3], alpha: f64) -> Self {
        let [h, s, v] = channels;
        Hsv::with_alpha(h, s, v, alpha)
    }

    fn channels(&self) -> [f64; 3] {
        [self.h, self.s, self.v]
    }

    fn alpha(&self) -> f64 {
        self.a
    }

    fn to_pixel(&self) -> Pixel {
        let [r, g, b] = self.to_rgb();
        Pixel::new(
            channel_to_u8(r),
            channel_to_u8(g),
            channel_to_u8(b),
            channel_to_u8(self.a),
        )
    }
}
