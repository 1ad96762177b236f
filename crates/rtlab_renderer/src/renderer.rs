//! Render pass orchestration.
//!
//! A [`Renderer`] owns the scene, the camera, the render settings and the
//! frame buffer. [`Renderer::render`] runs one blocking full-frame pass that
//! fans tiles out over rayon's pool. Passes never overlap: a request made
//! while one is in flight is rejected, and so is camera or settings input.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rtlab_core::{ColorModel, Pixel, Scene};

use crate::camera::Camera;
use crate::frame::FrameBuffer;
use crate::tile::{render_tile, TileGrid, TileStats, DEFAULT_TILE_GRID};
use crate::tracer::Tracer;

/// Smallest bounce limit a live renderer accepts.
pub const MIN_BOUNCE_LIMIT: u32 = 1;

/// Largest bounce limit a live renderer accepts.
pub const MAX_BOUNCE_LIMIT: u32 = 20;

/// Errors raised when a renderer is set up with unusable settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Frame must be at least 1x1, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    #[error("Tile grid must have at least one tile per side")]
    ZeroTiles,

    #[error("A {tiles}x{tiles} tile grid does not fit a {width}x{height} frame")]
    TooManyTiles { tiles: u32, width: u32, height: u32 },

    #[error("Bounce limit must be at least 1")]
    ZeroBounceLimit,

    #[error("Reflectivity must be within [0, 1], got {0}")]
    InvalidReflectivity(f64),
}

/// Result type for renderer setup.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Tiles per side of the tile grid
    pub tiles: u32,
    /// Deepest ray generation traced, primary rays being generation 1
    pub bounce_limit: u32,
    /// Weight of the reflected color when blending a bounce
    pub reflectivity: f64,
    /// Specular factor above which the light color is added
    pub specular_threshold: f64,
    /// RGBA written where nothing is hit
    pub background: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            tiles: DEFAULT_TILE_GRID,
            bounce_limit: 3,
            reflectivity: 0.5,
            specular_threshold: 0.99,
            background: Pixel::BLACK.to_array(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        if self.tiles == 0 {
            return Err(RenderError::ZeroTiles);
        }
        if self.tiles > self.width || self.tiles > self.height {
            return Err(RenderError::TooManyTiles {
                tiles: self.tiles,
                width: self.width,
                height: self.height,
            });
        }
        if self.bounce_limit == 0 {
            return Err(RenderError::ZeroBounceLimit);
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(RenderError::InvalidReflectivity(self.reflectivity));
        }
        Ok(())
    }

    pub fn background_pixel(&self) -> Pixel {
        Pixel::from(self.background)
    }
}

/// Summary of a finished render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Wall-clock time of the pass
    pub elapsed: Duration,
    /// Number of tiles rendered
    pub tiles: usize,
    /// Pixels whose camera ray was traced
    pub traced: usize,
    /// Pixels skipped because their camera ray was degenerate
    pub skipped: usize,
}

/// What a call to [`Renderer::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The pass ran to completion.
    Completed(FrameStats),
    /// Another pass was in flight; nothing was done.
    Busy,
}

/// Invoked after every completed pass.
pub type FrameCallback = Box<dyn Fn(&FrameStats) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the rendering flag for the duration of a pass.
struct RenderGuard<'a>(&'a AtomicBool);

impl<'a> RenderGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns everything a render pass touches.
pub struct Renderer<C: ColorModel> {
    scene: Scene<C>,
    camera: Mutex<Camera>,
    config: Mutex<RenderConfig>,
    grid: TileGrid,
    frame: Mutex<FrameBuffer>,
    rendering: AtomicBool,
    last_render_time: Mutex<Option<Duration>>,
    on_frame: Option<FrameCallback>,
}

impl<C: ColorModel> Renderer<C> {
    /// Validate the settings and allocate the frame buffer.
    pub fn new(scene: Scene<C>, camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let grid = TileGrid::new(config.width, config.height, config.tiles);
        let frame = FrameBuffer::new(config.width, config.height, config.background_pixel());

        log::info!(
            "Renderer ready: {}x{} frame, {} tiles, {} primitives, {} color",
            config.width,
            config.height,
            grid.len(),
            scene.len(),
            C::SPACE
        );

        Ok(Self {
            scene,
            camera: Mutex::new(camera),
            config: Mutex::new(config),
            grid,
            frame: Mutex::new(frame),
            rendering: AtomicBool::new(false),
            last_render_time: Mutex::new(None),
            on_frame: None,
        })
    }

    /// Call `callback` after every completed pass, while the pass still
    /// counts as in flight.
    pub fn with_frame_callback(mut self, callback: impl Fn(&FrameStats) + Send + Sync + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }

    /// Render one full frame, blocking until every tile is done.
    pub fn render(&self) -> RenderOutcome {
        let Some(_guard) = RenderGuard::acquire(&self.rendering) else {
            log::debug!("Render requested while a pass is in flight, ignoring");
            return RenderOutcome::Busy;
        };

        let start = Instant::now();
        let camera = *lock(&self.camera);
        let config = lock(&self.config).clone();
        let tracer = Tracer::new(&self.scene, &config);
        let background = config.background_pixel();
        let (width, height) = (self.grid.width(), self.grid.height());

        let totals = {
            let mut frame = lock(&self.frame);
            self.grid
                .split(frame.pixels_mut())
                .into_par_iter()
                .map(|mut view| render_tile(&mut view, &camera, &tracer, width, height, background))
                .reduce(TileStats::default, |a, b| a + b)
        };

        let elapsed = start.elapsed();
        *lock(&self.last_render_time) = Some(elapsed);

        let stats = FrameStats {
            elapsed,
            tiles: self.grid.len(),
            traced: totals.traced,
            skipped: totals.skipped,
        };

        if stats.skipped > 0 {
            log::warn!("{} pixels had degenerate camera rays and were left at the background", stats.skipped);
        }
        log::debug!(
            "Rendered {} tiles in {:.2?} ({} pixels traced, bounce limit {})",
            stats.tiles,
            stats.elapsed,
            stats.traced,
            tracer.bounce_limit()
        );

        if let Some(callback) = &self.on_frame {
            callback(&stats);
        }

        RenderOutcome::Completed(stats)
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering.load(Ordering::Acquire)
    }

    /// Read access to the last rendered frame.
    pub fn frame(&self) -> impl Deref<Target = FrameBuffer> + '_ {
        lock(&self.frame)
    }

    /// Duration of the last completed pass.
    pub fn last_render_time(&self) -> Option<Duration> {
        *lock(&self.last_render_time)
    }

    pub fn scene(&self) -> &Scene<C> {
        &self.scene
    }

    pub fn camera(&self) -> Camera {
        *lock(&self.camera)
    }

    pub fn config(&self) -> RenderConfig {
        lock(&self.config).clone()
    }

    /// Set the bounce limit, clamped to `[1, 20]`. Ignored while rendering.
    pub fn set_bounce_limit(&self, limit: u32) -> bool {
        if self.is_rendering() {
            log::debug!("Bounce limit change ignored while rendering");
            return false;
        }
        lock(&self.config).bounce_limit = limit.clamp(MIN_BOUNCE_LIMIT, MAX_BOUNCE_LIMIT);
        true
    }

    /// Orbit around the pivot; inputs are clamped to `[-1, 1]`.
    pub fn orbit(&self, dx: f64, dy: f64) -> bool {
        self.update_camera(|camera| camera.rotate_around_look_at_pivot(dx, dy))
    }

    /// Slide pivot and camera over the ground plane.
    pub fn pan(&self, dx: f64, dy: f64) -> bool {
        self.update_camera(|camera| camera.move_pivot(dx, dy))
    }

    pub fn dolly(&self, distance: f64) -> bool {
        self.update_camera(|camera| camera.move_forward(distance))
    }

    pub fn strafe(&self, distance: f64) -> bool {
        self.update_camera(|camera| camera.move_right(distance))
    }

    pub fn elevate(&self, distance: f64) -> bool {
        self.update_camera(|camera| camera.move_up(distance))
    }

    pub fn yaw(&self, radians: f64) -> bool {
        self.update_camera(|camera| camera.rotate_lr(radians))
    }

    pub fn pitch(&self, radians: f64) -> bool {
        self.update_camera(|camera| camera.rotate_ud(radians))
    }

    fn update_camera(&self, update: impl FnOnce(&mut Camera)) -> bool {
        if self.is_rendering() {
            log::debug!("Camera input ignored while rendering");
            return false;
        }
        update(&mut lock(&self.camera));
        true
    }
}
