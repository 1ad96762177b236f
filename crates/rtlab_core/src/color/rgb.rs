use std::ops::{Add, Mul, MulAssign};

use super::{channel_to_u8, clamp01, ColorModel, ColorSpace, Pixel};

/// Linear RGB color, every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::opaque(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::opaque(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb::opaque(0.8, 0.4, 0.6);
    pub const GREEN: Rgb = Rgb::opaque(0.6, 0.8, 0.4);
    pub const BLUE: Rgb = Rgb::opaque(0.4, 0.6, 0.8);

    // Only for constants that are already in range.
    const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color. Channels are clamped to `[0, 1]`.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self::with_alpha(r, g, b, 1.0)
    }

    /// Create a color with alpha. Channels are clamped to `[0, 1]`.
    pub fn with_alpha(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp01(r),
            g: clamp01(g),
            b: clamp01(b),
            a: clamp01(a),
        }
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, other: Rgb) -> Rgb {
        Rgb::with_alpha(self.r + other.r, self.g + other.g, self.b + other.b, self.a)
    }
}

impl Mul<f64> for Rgb {
    type Output = Rgb;

    fn mul(self, f: f64) -> Rgb {
        Rgb::with_alpha(self.r * f, self.g * f, self.b * f, self.a)
    }
}

impl MulAssign<f64> for Rgb {
    fn mul_assign(&mut self, f: f64) {
        *self = *self * f;
    }
}

impl ColorModel for Rgb {
    const SPACE: ColorSpace = ColorSpace::Rgb;
    const WHITE: Self = Rgb::WHITE;
    const BLACK: Self = Rgb::BLACK;

    fn from_channels(channels: [f64; 3], alpha: f64) -> Self {
        let [r, g, b] = channels;
        Rgb::with_alpha(r, g, b, alpha)
    }

    fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    fn alpha(&self) -> f64 {
        self.a
    }

    fn to_pixel(&self) -> Pixel {
        Pixel::new(
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_clamps_on_construction() {
        let c = Rgb::with_alpha(-0.5, 0.25, 3.0, 2.0);
        assert_eq!(c.channels(), [0.0, 0.25, 1.0]);
        assert_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn test_rgb_clamps_on_mutation() {
        let mut c = Rgb::new(0.6, 0.2, 0.0);
        c *= 2.0;
        assert_eq!(c.channels(), [1.0, 0.4, 0.0]);

        let sum = Rgb::new(0.7, 0.7, 0.7) + Rgb::new(0.5, 0.1, 0.0);
        assert_eq!(sum.r(), 1.0);
        assert!((sum.g() - 0.8).abs() < 1e-12);
        assert!((sum.b() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_rgb_scaling_keeps_alpha() {
        let c = Rgb::with_alpha(1.0, 1.0, 1.0, 0.5) * 0.25;
        assert_eq!(c.alpha(), 0.5);
        assert_eq!(c.r(), 0.25);
    }

    #[test]
    fn test_rgb_to_pixel() {
        assert_eq!(Rgb::WHITE.to_pixel(), Pixel::new(255, 255, 255, 255));
        assert_eq!(Rgb::BLACK.to_pixel(), Pixel::new(0, 0, 0, 255));
        assert_eq!(Rgb::new(0.5, 0.25, 0.1).to_pixel(), Pixel::new(127, 63, 25, 255));
    }

    #[test]
    fn test_rgb_weighted_add() {
        let blended = Rgb::RED.weighted_add(0.5, Rgb::BLUE, 0.5);
        assert!((blended.r() - 0.6).abs() < 1e-12);
        assert!((blended.g() - 0.5).abs() < 1e-12);
        assert!((blended.b() - 0.7).abs() < 1e-12);
    }
}
