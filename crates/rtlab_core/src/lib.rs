//! RTLab Core - Scene description for the recursive raytracer.
//!
//! This crate provides:
//!
//! - **Color model**: `Rgb`, `Hsv`, `Hsl` behind the `ColorModel` trait
//! - **Primitives**: `Sphere` and the checkerboard ground `Plane`
//! - **Scene**: primitives plus a point light, with closest-hit queries
//! - **Configuration**: JSON scene descriptions via `SceneConfig`
//!
//! # Example
//!
//! ```ignore
//! use rtlab_core::{Rgb, SceneConfig};
//!
//! let scene = SceneConfig::default().build::<Rgb>()?;
//! println!("{} primitives", scene.len());
//! ```

pub mod color;
pub mod config;
pub mod material;
pub mod plane;
pub mod scene;
pub mod sphere;
pub mod surface;

// Re-export commonly used types
pub use color::{ColorModel, ColorSpace, Hsl, Hsv, Pixel, Rgb};
pub use config::{ConfigError, ConfigResult, SceneConfig};
pub use material::Material;
pub use plane::{Checkerboard, Plane};
pub use scene::{PointLight, Scene};
pub use sphere::Sphere;
pub use surface::{Hit, Intersection, Primitive, Surface};
