//! RTLab renderer - tiled CPU raytracing
//!
//! A Whitted-style recursive raytracer: one point light, hard shadows,
//! mirror bounces, and a movable orbit camera. Frames are split into a
//! grid of tiles rendered in parallel with rayon.

mod camera;
mod frame;
mod renderer;
mod tile;
mod tracer;

pub use camera::{Camera, DEFAULT_NEAR_PLANE_DISTANCE};
pub use frame::FrameBuffer;
pub use renderer::{
    FrameCallback, FrameStats, RenderConfig, RenderError, RenderOutcome, RenderResult, Renderer,
    MAX_BOUNCE_LIMIT, MIN_BOUNCE_LIMIT,
};
pub use tile::{render_tile, Tile, TileGrid, TileStats, TileView, DEFAULT_TILE_GRID};
pub use tracer::{Tracer, PRIMARY_DEPTH, SURFACE_EPSILON};
