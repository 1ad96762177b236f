use std::ops::{Add, Mul, MulAssign};

use super::{channel_to_u8, clamp01, ColorModel, ColorSpace, Pixel};

/// Hue/saturation/lightness color. Hue is a fraction of a full turn in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    h: f64,
    s: f64,
    l: f64,
    a: f64,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl::opaque(0.0, 0.0, 1.0);
    pub const BLACK: Hsl = Hsl::opaque(0.0, 0.0, 0.0);
    pub const RED: Hsl = Hsl::opaque(0.0, 0.4, 0.5);
    pub const GREEN: Hsl = Hsl::opaque(0.4, 0.4, 0.5);
    pub const BLUE: Hsl = Hsl::opaque(0.65, 0.4, 0.5);

    const fn opaque(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l, a: 1.0 }
    }

    /// Create an opaque color. Channels are clamped to `[0, 1]`.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self::with_alpha(h, s, l, 1.0)
    }

    /// Create a color with alpha. Channels are clamped to `[0, 1]`.
    pub fn with_alpha(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self {
            h: clamp01(h),
            s: clamp01(s),
            l: clamp01(l),
            a: clamp01(a),
        }
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    /// HSL to RGB conversion: gray when unsaturated, otherwise the
    /// hue-to-rgb ramp evaluated at three phase-shifted hues.
    pub fn to_rgb(&self) -> [f64; 3] {
        if self.s == 0.0 {
            return [self.l, self.l, self.l];
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        [
            hue_to_rgb(p, q, self.h + 1.0 / 3.0),
            hue_to_rgb(p, q, self.h),
            hue_to_rgb(p, q, self.h - 1.0 / 3.0),
        ]
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Hsl {
    type Output = Hsl;

    fn add(self, other: Hsl) -> Hsl {
        Hsl::with_alpha(self.h + other.h, self.s + other.s, self.l + other.l, self.a)
    }
}

impl Mul<f64> for Hsl {
    type Output = Hsl;

    fn mul(self, f: f64) -> Hsl {
        Hsl::with_alpha(self.h * f, self.s * f, self.l * f, self.a)
    }
}

impl MulAssign<f64> for Hsl {
    fn mul_assign(&mut self, f: f64) {
        *self = *self * f;
    }
}

impl ColorModel for Hsl {
    const SPACE: ColorSpace = ColorSpace::Hsl;
    const WHITE: Self = Hsl::WHITE;
    const BLACK: Self = Hsl::BLACK;

    fn from_channels(channels: [f64; 3], alpha: f64) -> Self {
        let [h, s, l] = channels;
        Hsl::with_alpha(h, s, l, alpha)
    }

    fn channels(&self) -> [f64; 3] {
        [self.h, self.s, self.l]
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
