//! Tile-based frame partitioning.
//!
//! The frame is cut into an `N x N` grid of tiles that are rendered
//! independently and in parallel with rayon. Each tile gets its own mutable
//! row slices of the frame buffer, so workers never share a pixel.

use std::ops::Add;

use rtlab_core::{ColorModel, Pixel};

use crate::camera::Camera;
use crate::tracer::Tracer;

/// Default number of tiles along each side of the frame.
pub const DEFAULT_TILE_GRID: u32 = 8;

/// A rectangular region of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Row-major position in the grid
    pub index: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// `(start, length)` spans splitting `length` into `count` parts. Every span
/// is `length / count` long except the last, which takes the remainder.
fn spans(length: u32, count: u32) -> Vec<(u32, u32)> {
    let base = length / count;
    (0..count)
        .map(|i| {
            let start = i * base;
            let len = if i + 1 == count { length - start } else { base };
            (start, len)
        })
        .collect()
}

/// Fixed tile layout for one frame size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    columns: Vec<(u32, u32)>,
    rows: Vec<(u32, u32)>,
}

impl TileGrid {
    /// Lay out `tiles_per_side x tiles_per_side` tiles over the frame.
    /// A zero grid is treated as a single tile.
    pub fn new(width: u32, height: u32, tiles_per_side: u32) -> Self {
        let count = tiles_per_side.max(1);
        Self {
            width,
            height,
            columns: spans(width, count),
            rows: spans(height, count),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.columns.len() * self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.len());
        for &(y, height) in &self.rows {
            for &(x, width) in &self.columns {
                tiles.push(Tile::new(x, y, width, height, tiles.len()));
            }
        }
        tiles
    }

    /// Borrow a row-major `width * height` pixel buffer as one view per tile.
    ///
    /// The views are disjoint, so they can be handed to different threads.
    pub fn split<'a>(&self, pixels: &'a mut [Pixel]) -> Vec<TileView<'a>> {
        let width = self.width as usize;
        debug_assert_eq!(pixels.len(), width * self.height as usize);

        let mut views: Vec<TileView<'a>> = self
            .tiles()
            .into_iter()
            .map(|tile| TileView {
                tile,
                rows: Vec::with_capacity(tile.height as usize),
            })
            .collect();
        if width == 0 {
            return views;
        }

        let mut remaining = pixels;
        for (band_index, &(_, band_height)) in self.rows.iter().enumerate() {
            let taken = std::mem::take(&mut remaining);
            let (band, rest) = taken.split_at_mut(band_height as usize * width);
            remaining = rest;

            let band_views = &mut views[band_index * self.columns.len()..][..self.columns.len()];
            for row in band.chunks_mut(width) {
                let mut row_rest = row;
                for view in band_views.iter_mut() {
                    let taken = std::mem::take(&mut row_rest);
                    let (segment, tail) = taken.split_at_mut(view.tile.width as usize);
                    view.rows.push(segment);
                    row_rest = tail;
                }
            }
        }

        views
    }
}

/// Mutable access to the pixels of one tile.
#[derive(Debug)]
pub struct TileView<'a> {
    tile: Tile,
    rows: Vec<&'a mut [Pixel]>,
}

impl<'a> TileView<'a> {
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Write a pixel at tile-local coordinates.
    pub fn set(&mut self, local_x: u32, local_y: u32, pixel: Pixel) {
        self.rows[local_y as usize][local_x as usize] = pixel;
    }

    pub fn fill(&mut self, pixel: Pixel) {
        for row in &mut self.rows {
            row.fill(pixel);
        }
    }
}

/// Pixel counts reported by a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStats {
    /// Pixels whose camera ray was traced
    pub traced: usize,
    /// Pixels left at the background because their camera ray was degenerate
    pub skipped: usize,
}

impl Add for TileStats {
    type Output = TileStats;

    fn add(self, other: TileStats) -> TileStats {
        TileStats {
            traced: self.traced + other.traced,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Render every pixel of a tile into its view.
///
/// Pixels that miss everything, or whose camera ray is degenerate, get the
/// background.
pub fn render_tile<C: ColorModel>(
    view: &mut TileView<'_>,
    camera: &Camera,
    tracer: &Tracer<'_, C>,
    frame_width: u32,
    frame_height: u32,
    background: Pixel,
) -> TileStats {
    let tile = view.tile;
    let mut stats = TileStats::default();

    for (local_y, row) in view.rows.iter_mut().enumerate() {
        let y = tile.y + local_y as u32;
        for (local_x, slot) in row.iter_mut().enumerate() {
            let x = tile.x + local_x as u32;
            let ray = camera.create_viewer_ray(x, y, frame_width, frame_height);

            if !ray.is_finite() {
                *slot = background;
                stats.skipped += 1;
                continue;
            }

            *slot = tracer
                .trace_primary(&ray)
                .map_or(background, |color| color.to_pixel());
            stats.traced += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: Pixel = Pixel::new(1, 2, 3, 0);

    fn index_pixel(index: usize) -> Pixel {
        Pixel::new(index as u8, 0, 0, 255)
    }

    #[test]
    fn test_grid_exact_fit() {
        let grid = TileGrid::new(600, 400, 8);
        let tiles = grid.tiles();
        assert_eq!(tiles.len(), 64);
        assert!(tiles.iter().all(|t| t.width == 75 && t.height == 50));

        let total: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total, 600 * 400);
    }

    #[test]
    fn test_tiles_cover_every_pixel_once() {
        let (width, height) = (600, 400);
        let tiles = TileGrid::new(width, height, 8).tiles();

        let mut coverage = vec![0u8; (width * height) as usize];
        for tile in &tiles {
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    coverage[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_last_tile_absorbs_remainder() {
        let tiles = TileGrid::new(603, 401, 8).tiles();
        let last = tiles.last().unwrap();
        assert_eq!((last.x, last.width), (525, 78));
        assert_eq!((last.y, last.height), (350, 51));
        assert_eq!(tiles[0].width, 75);
        assert_eq!(tiles[0].height, 50);

        let total: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total, 603 * 401);
    }

    #[test]
    fn test_split_views_are_disjoint_and_complete() {
        let (width, height) = (37u32, 23u32);
        let grid = TileGrid::new(width, height, 4);
        let mut pixels = vec![SENTINEL; (width * height) as usize];

        for mut view in grid.split(&mut pixels) {
            let index = view.tile().index;
            view.fill(index_pixel(index));
        }

        let tiles = grid.tiles();
        for y in 0..height {
            for x in 0..width {
                let owner = tiles.iter().find(|t| t.contains(x, y)).unwrap();
                assert_eq!(pixels[(y * width + x) as usize], index_pixel(owner.index));
            }
        }
    }

    #[test]
    fn test_split_set_uses_local_coordinates() {
        let grid = TileGrid::new(4, 4, 2);
        let mut pixels = vec![SENTINEL; 16];

        let mut views = grid.split(&mut pixels);
        let bottom_right = views.iter_mut().find(|v| v.tile().index == 3).unwrap();
        bottom_right.set(1, 0, Pixel::BLACK);
        drop(views);

        // Tile 3 starts at (2, 2); local (1, 0) is global (3, 2)
        assert_eq!(pixels[2 * 4 + 3], Pixel::BLACK);
        assert_eq!(pixels.iter().filter(|&&p| p == Pixel::BLACK).count(), 1);
    }

    #[test]
    fn test_more_tiles_than_pixels() {
        let grid = TileGrid::new(2, 2, 8);
        let total: u32 = grid.tiles().iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total, 4);

        let mut pixels = vec![SENTINEL; 4];
        for mut view in grid.split(&mut pixels) {
            view.fill(Pixel::BLACK);
        }
        assert!(pixels.iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn test_stats_add() {
        let a = TileStats { traced: 3, skipped: 1 };
        let b = TileStats { traced: 4, skipped: 0 };
        assert_eq!(a + b, TileStats { traced: 7, skipped: 1 });
    }
}
