use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use rtlab_core::{ColorSpace, SceneConfig};
use rtlab_renderer::RenderConfig;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Color models selectable for the built-in scene
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorSpaceArg {
    Rgb,
    Hsv,
    Hsl,
}

impl From<ColorSpaceArg> for ColorSpace {
    fn from(space: ColorSpaceArg) -> Self {
        match space {
            ColorSpaceArg::Rgb => ColorSpace::Rgb,
            ColorSpaceArg::Hsv => ColorSpace::Hsv,
            ColorSpaceArg::Hsl => ColorSpace::Hsl,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rtlab")]
#[command(about = "Recursive raytracer with an orbit camera")]
pub struct Args {
    /// JSON file with `scene` and `render` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output PNG; numbered per frame when rendering more than one
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Color model of the built-in scene (ignored with --config)
    #[arg(long, value_enum)]
    pub color_space: Option<ColorSpaceArg>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Deepest ray generation traced (primary rays count as 1)
    #[arg(short, long)]
    pub bounces: Option<u32>,

    /// Tiles per side of the tile grid
    #[arg(short, long)]
    pub tiles: Option<u32>,

    /// Number of frames in the orbit sequence
    #[arg(short, long, default_value = "1")]
    pub frames: u32,

    /// Horizontal orbit input applied before every frame after the first
    #[arg(long, default_value = "-0.75", allow_hyphen_values = true)]
    pub orbit_step: f64,

    /// Move the camera along its forward axis before rendering
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub dolly: f64,

    /// Move the camera along its up axis before rendering
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub elevate: f64,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Everything a run needs, as read from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

impl LabConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config file (or the built-in scene) with command-line overrides applied.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self {
                scene: SceneConfig::reference(args.color_space.map_or(ColorSpace::Rgb, Into::into)),
                render: RenderConfig::default(),
            },
        };

        let render = &mut config.render;
        if let Some(width) = args.width {
            render.width = width;
        }
        if let Some(height) = args.height {
            render.height = height;
        }
        if let Some(bounces) = args.bounces {
            render.bounce_limit = bounces;
        }
        if let Some(tiles) = args.tiles {
            render.tiles = tiles;
        }

        Ok(config)
    }
}
