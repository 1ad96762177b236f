//! Scene configuration.
//!
//! A [`SceneConfig`] is plain serializable data (JSON via `serde_json`). It is
//! validated and turned into a [`Scene`] for one color model with
//! [`SceneConfig::build`].
//!
//! # Example
//!
//! ```ignore
//! use rtlab_core::{Rgb, SceneConfig};
//!
//! let config = SceneConfig::load("scene.json")?;
//! let scene = config.build::<Rgb>()?;
//! ```

use std::path::Path;

use rtlab_math::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ColorModel, ColorSpace, Hsl, Hsv, Rgb};
use crate::material::Material;
use crate::plane::{Checkerboard, Plane, DEFAULT_CELL_SIZE};
use crate::scene::{PointLight, Scene};
use crate::sphere::Sphere;

/// Errors that can occur while loading or validating a scene configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {id}: radius must be positive, got {radius}")]
    InvalidRadius { id: u32, radius: f64 },

    #[error("{0} has a non-finite component")]
    NonFinite(String),

    #[error("Ground normal must be non-zero")]
    ZeroGroundNormal,

    #[error("Checker cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    #[error("Ground extent must be positive, got {0}")]
    InvalidExtent(f64),

    #[error("{what} is an {found} color, but the scene is built in {expected}")]
    ColorSpaceMismatch {
        what: String,
        expected: ColorSpace,
        found: ColorSpace,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Color channels, with or without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channels {
    Opaque([f64; 3]),
    WithAlpha([f64; 4]),
}

impl Channels {
    fn split(self) -> ([f64; 3], f64) {
        match self {
            Channels::Opaque(c) => (c, 1.0),
            Channels::WithAlpha([a, b, c, alpha]) => ([a, b, c], alpha),
        }
    }
}

/// A color tagged with its model, e.g. `{"rgb": [0.8, 0.4, 0.6]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorConfig {
    Rgb(Channels),
    Hsv(Channels),
    Hsl(Channels),
}

impl ColorConfig {
    /// Tag an existing color.
    pub fn from_color<C: ColorModel>(color: C) -> Self {
        let channels = if color.alpha() < 1.0 {
            let [a, b, c] = color.channels();
            Channels::WithAlpha([a, b, c, color.alpha()])
        } else {
            Channels::Opaque(color.channels())
        };

        match C::SPACE {
            ColorSpace::Rgb => ColorConfig::Rgb(channels),
            ColorSpace::Hsv => ColorConfig::Hsv(channels),
            ColorSpace::Hsl => ColorConfig::Hsl(channels),
        }
    }

    /// The model this color is expressed in.
    pub fn space(&self) -> ColorSpace {
        match self {
            ColorConfig::Rgb(_) => ColorSpace::Rgb,
            ColorConfig::Hsv(_) => ColorSpace::Hsv,
            ColorConfig::Hsl(_) => ColorSpace::Hsl,
        }
    }

    /// Build the color in model `C`. Colors are never converted between
    /// models, so a tag other than `C::SPACE` is an error.
    pub fn resolve<C: ColorModel>(&self, what: &str) -> ConfigResult<C> {
        let (ColorConfig::Rgb(channels) | ColorConfig::Hsv(channels) | ColorConfig::Hsl(channels)) =
            *self;

        if self.space() != C::SPACE {
            return Err(ConfigError::ColorSpaceMismatch {
                what: what.to_string(),
                expected: C::SPACE,
                found: self.space(),
            });
        }

        let (rgb, alpha) = channels.split();
        if rgb.iter().chain(std::iter::once(&alpha)).any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFinite(what.to_string()));
        }

        Ok(C::from_channels(rgb, alpha))
    }
}

/// Point light settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f64; 3],
    /// Defaults to white in the scene's color model
    pub color: Option<ColorConfig>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 4.0, 0.0],
            color: None,
        }
    }
}

/// One sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    /// Defaults to the sphere's 1-based position in the list
    #[serde(default)]
    pub id: Option<u32>,
    pub center: [f64; 3],
    pub radius: f64,
    pub color: ColorConfig,
}

/// The checkerboard ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub enabled: bool,
    pub point: [f64; 3],
    pub normal: [f64; 3],
    pub cell_size: f64,
    /// Draw distance from `point`; `None` is an infinite plane
    pub extent: Option<f64>,
    /// Defaults to white
    pub even: Option<ColorConfig>,
    /// Defaults to black
    pub odd: Option<ColorConfig>,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            point: [0.0, -1.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            cell_size: DEFAULT_CELL_SIZE,
            extent: Some(20.0),
            even: None,
            odd: None,
        }
    }
}

/// Complete scene description.
///
/// The default is the reference scene: three unit spheres in a row five
/// units ahead of the camera, a light above the origin and a checkerboard
/// floor one unit below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub color_space: ColorSpace,
    pub light: LightConfig,
    pub spheres: Vec<SphereConfig>,
    pub ground: GroundConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::reference(ColorSpace::Rgb)
    }
}

impl SceneConfig {
    /// The reference scene colored with the palette of `space`.
    pub fn reference(space: ColorSpace) -> Self {
        let [red, blue, green] = match space {
            ColorSpace::Rgb => palette(Rgb::RED, Rgb::BLUE, Rgb::GREEN),
            ColorSpace::Hsv => palette(Hsv::RED, Hsv::BLUE, Hsv::GREEN),
            ColorSpace::Hsl => palette(Hsl::RED, Hsl::BLUE, Hsl::GREEN),
        };
        let sphere = |id, x, color| SphereConfig {
            id: Some(id),
            center: [x, 0.0, -5.0],
            radius: 1.0,
            color,
        };

        Self {
            color_space: space,
            light: LightConfig::default(),
            spheres: vec![sphere(1, -2.5, red), sphere(2, 0.0, blue), sphere(3, 2.5, green)],
            ground: GroundConfig::default(),
        }
    }

    /// Load a scene configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        log::info!(
            "Loaded scene config from {:?}: {} spheres, ground {}",
            path,
            config.spheres.len(),
            if config.ground.enabled { "on" } else { "off" }
        );
        Ok(config)
    }

    /// Parse a scene configuration from a JSON string.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate and build the scene in color model `C`.
    ///
    /// Spheres are added in list order, the ground plane (if enabled) last.
    pub fn build<C: ColorModel>(&self) -> ConfigResult<Scene<C>> {
        if self.color_space != C::SPACE {
            return Err(ConfigError::ColorSpaceMismatch {
                what: "scene".to_string(),
                expected: C::SPACE,
                found: self.color_space,
            });
        }

        let mut light = PointLight::new(finite_vec(self.light.position, "light position")?);
        if let Some(color) = &self.light.color {
            light = light.with_color(color.resolve("light color")?);
        }

        let mut scene = Scene::new(light);

        for (index, sphere) in self.spheres.iter().enumerate() {
            let id = sphere.id.unwrap_or(index as u32 + 1);
            let what = format!("sphere {id}");
            let center = finite_vec(sphere.center, &what)?;
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(ConfigError::InvalidRadius {
                    id,
                    radius: sphere.radius,
                });
            }
            let color = sphere.color.resolve(&what)?;
            scene.add(Sphere::new(id, center, sphere.radius, Material::new(color)));
        }

        if self.ground.enabled {
            scene.add(self.build_ground()?);
        }

        log::info!(
            "Built {} scene: {} primitives, light at {:?}",
            C::SPACE,
            scene.len(),
            scene.light().position
        );

        Ok(scene)
    }

    fn build_ground<C: ColorModel>(&self) -> ConfigResult<Plane<C>> {
        let ground = &self.ground;
        let point = finite_vec(ground.point, "ground point")?;
        let normal = finite_vec(ground.normal, "ground normal")?;
        if normal.length_squared() == 0.0 {
            return Err(ConfigError::ZeroGroundNormal);
        }
        if !(ground.cell_size.is_finite() && ground.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(ground.cell_size));
        }

        let even = match &ground.even {
            Some(color) => color.resolve("ground even color")?,
            None => C::WHITE,
        };
        let odd = match &ground.odd {
            Some(color) => color.resolve("ground odd color")?,
            None => C::BLACK,
        };

        let plane = Plane::new(point, normal, Checkerboard::new(even, odd, ground.cell_size));

        match ground.extent {
            Some(extent) if !(extent.is_finite() && extent > 0.0) => {
                Err(ConfigError::InvalidExtent(extent))
            }
            Some(extent) => Ok(plane.with_extent(extent)),
            None => Ok(plane),
        }
    }
}

fn palette<C: ColorModel>(red: C, blue: C, green: C) -> [ColorConfig; 3] {
    [red, blue, green].map(ColorConfig::from_color)
}

fn finite_vec(v: [f64; 3], what: &str) -> ConfigResult<DVec3> {
    let v = DVec3::from_array(v);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::NonFinite(what.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Primitive;

    #[test]
    fn test_default_builds_reference_scene() {
        let scene = SceneConfig::default().build::<Rgb>().unwrap();

        assert_eq!(scene.len(), 4);
        assert!(scene.has_ground());
        assert_eq!(scene.light().position, DVec3::new(0.0, 4.0, 0.0));
        assert_eq!(scene.light().color, Rgb::WHITE);

        let spheres: Vec<_> = scene.spheres().collect();
        assert_eq!(spheres[0].id(), 1);
        assert_eq!(spheres[0].center(), DVec3::new(-2.5, 0.0, -5.0));
        assert_eq!(spheres[1].material().color, Rgb::BLUE);
        assert_eq!(spheres[2].radius(), 1.0);

        // Ground is last and keeps the reference draw distance
        match scene.primitives().last() {
            Some(Primitive::Plane(plane)) => {
                assert_eq!(plane.extent(), Some(20.0));
                assert_eq!(plane.offset(), -1.0);
            }
            other => panic!("expected ground plane last, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_scene_in_each_space() {
        let hsv = SceneConfig::reference(ColorSpace::Hsv).build::<Hsv>().unwrap();
        let colors: Vec<_> = hsv.spheres().map(|s| s.material().color).collect();
        assert_eq!(colors, vec![Hsv::RED, Hsv::BLUE, Hsv::GREEN]);

        let hsl = SceneConfig::reference(ColorSpace::Hsl).build::<Hsl>().unwrap();
        assert_eq!(hsl.len(), 4);

        // The palette follows the space, so building elsewhere fails
        assert!(SceneConfig::reference(ColorSpace::Hsl).build::<Rgb>().is_err());
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "color_space": "hsv",
            "light": { "position": [1.0, 2.0, 3.0] },
            "spheres": [
                { "center": [0.0, 0.0, -5.0], "radius": 2.0, "color": { "hsv": [0.6, 0.2, 0.2] } }
            ],
            "ground": { "enabled": false }
        }"#;

        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.color_space, ColorSpace::Hsv);
        assert_eq!(config.ground.cell_size, DEFAULT_CELL_SIZE);

        let scene = config.build::<Hsv>().unwrap();
        assert_eq!(scene.len(), 1);
        assert!(!scene.has_ground());
        assert_eq!(scene.light().color, Hsv::WHITE);

        let sphere = scene.spheres().next().unwrap();
        assert_eq!(sphere.id(), 1);
        assert_eq!(sphere.material().color, Hsv::BLUE);
    }

    #[test]
    fn test_alpha_channel_parses() {
        let json = r#"{ "hsl": [0.0, 0.4, 0.5, 0.25] }"#;
        let color: ColorConfig = serde_json::from_str(json).unwrap();
        let hsl: Hsl = color.resolve("test").unwrap();
        assert_eq!(hsl.alpha(), 0.25);
        assert_eq!(hsl.channels(), Hsl::RED.channels());
    }

    #[test]
    fn test_color_space_mismatch() {
        let config = SceneConfig::default();
        let err = config.build::<Hsv>().unwrap_err();
        assert!(matches!(err, ConfigError::ColorSpaceMismatch { found: ColorSpace::Rgb, .. }));

        let mut config = SceneConfig::default();
        config.spheres[1].color = ColorConfig::from_color(Hsl::BLUE);
        let err = config.build::<Rgb>().unwrap_err();
        match err {
            ConfigError::ColorSpaceMismatch { what, expected, found } => {
                assert_eq!(what, "sphere 2");
                assert_eq!(expected, ColorSpace::Rgb);
                assert_eq!(found, ColorSpace::Hsl);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = SceneConfig::default();
        config.spheres[0].radius = 0.0;
        assert!(matches!(
            config.build::<Rgb>(),
            Err(ConfigError::InvalidRadius { id: 1, .. })
        ));

        let mut config = SceneConfig::default();
        config.light.position = [0.0, f64::NAN, 0.0];
        assert!(matches!(config.build::<Rgb>(), Err(ConfigError::NonFinite(_))));

        let mut config = SceneConfig::default();
        config.ground.normal = [0.0, 0.0, 0.0];
        assert!(matches!(config.build::<Rgb>(), Err(ConfigError::ZeroGroundNormal)));

        let mut config = SceneConfig::default();
        config.ground.cell_size = -2.0;
        assert!(matches!(config.build::<Rgb>(), Err(ConfigError::InvalidCellSize(_))));

        let mut config = SceneConfig::default();
        config.ground.extent = Some(0.0);
        assert!(matches!(config.build::<Rgb>(), Err(ConfigError::InvalidExtent(_))));

        // A disabled ground is not validated
        config.ground.enabled = false;
        assert!(config.build::<Rgb>().is_ok());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = SceneConfig::from_json_str("{ \"spheres\": 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load("/nonexistent/rtlab/scene.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip_of_default() {
        let config = SceneConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(SceneConfig::from_json_str(&json).unwrap(), config);
    }
}
