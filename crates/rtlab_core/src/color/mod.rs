//! Color representations used for shading.
//!
//! Three interchangeable models are supported:
//!
//! - [`Rgb`] - linear red/green/blue
//! - [`Hsv`] - hue/saturation/value
//! - [`Hsl`] - hue/saturation/lightness
//!
//! Every model clamps its channels to `[0, 1]` on construction and after each
//! arithmetic operation, and converts one way to an 8-bit [`Pixel`]. There is
//! no conversion between models: a scene is built and shaded in exactly one
//! of them, selected through the [`ColorModel`] type parameter.

mod hsl;
mod hsv;
mod rgb;

use std::fmt;
use std::ops::{Add, Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

pub use hsl::Hsl;
pub use hsv::Hsv;
pub use rgb::Rgb;

/// Clamp a channel value to `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Scale a `[0, 1]` channel to 8 bits, truncating.
#[inline]
pub(crate) fn channel_to_u8(x: f64) -> u8 {
    (x * 255.0) as u8
}

/// An 8-bit RGBA pixel, laid out so a pixel slice can be viewed as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Opaque black.
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 255);

    /// Create a new pixel.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pixel as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Tag identifying a color model, used by scene configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Rgb,
    Hsv,
    Hsl,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Hsl => "hsl",
        };
        f.write_str(name)
    }
}

/// Common contract of the three color representations.
///
/// Addition and scalar multiplication act channel-wise on the three color
/// channels and clamp the result; the alpha of the left operand is kept.
pub trait ColorModel:
    Copy
    + fmt::Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Mul<f64, Output = Self>
    + MulAssign<f64>
{
    /// Which model this is.
    const SPACE: ColorSpace;

    /// Full-intensity white, the default light color.
    const WHITE: Self;

    /// Black.
    const BLACK: Self;

    /// Build a color from three channels and an alpha, clamping each.
    fn from_channels(channels: [f64; 3], alpha: f64) -> Self;

    /// The three color channels in model order.
    fn channels(&self) -> [f64; 3];

    /// Alpha channel.
    fn alpha(&self) -> f64;

    /// Convert to an 8-bit pixel (multiply by 255, truncate).
    fn to_pixel(&self) -> Pixel;

    /// `self * w1 + other * w2`, used to blend a surface with its reflection.
    fn weighted_add(self, w1: f64, other: Self, w2: f64) -> Self {
        self * w1 + other * w2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_bytes_layout() {
        let pixels = [Pixel::new(1, 2, 3, 4), Pixel::new(5, 6, 7, 8)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_channel_to_u8_truncates() {
        assert_eq!(channel_to_u8(0.0), 0);
        assert_eq!(channel_to_u8(0.5), 127);
        assert_eq!(channel_to_u8(0.999), 254);
        assert_eq!(channel_to_u8(1.0), 255);
    }

    #[test]
    fn test_color_space_serde() {
        let space: ColorSpace = serde_json::from_str("\"hsl\"").unwrap();
        assert_eq!(space, ColorSpace::Hsl);
        assert_eq!(serde_json::to_string(&ColorSpace::Hsv).unwrap(), "\"hsv\"");
        assert_eq!(ColorSpace::Rgb.to_string(), "rgb");
    }

    #[test]
    fn test_weighted_add_is_model_agnostic() {
        fn blend<C: ColorModel>(a: C, b: C) -> C {
            a.weighted_add(0.5, b, 0.5)
        }

        let rgb = blend(Rgb::WHITE, Rgb::BLACK);
        assert_eq!(rgb.channels(), [0.5, 0.5, 0.5]);

        let hsv = blend(Hsv::new(0.2, 0.4, 1.0), Hsv::new(0.4, 0.0, 0.0));
        let [h, s, v] = hsv.channels();
        assert!((h - 0.3).abs() < 1e-12);
        assert!((s - 0.2).abs() < 1e-12);
        assert!((v - 0.5).abs() < 1e-12);
    }
}
