//! Infinite checkerboard ground plane.

use rtlab_math::{DVec3, Ray};

use crate::color::ColorModel;
use crate::surface::{Intersection, Surface};

/// Reference checkerboard cell size in world units.
pub const DEFAULT_CELL_SIZE: f64 = 2.0;

/// Procedural two-color checkerboard over the world X/Z axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkerboard<C: ColorModel> {
    /// Color of cells whose quantized coordinates share parity
    pub even: C,
    /// Color of the remaining cells
    pub odd: C,
    cell_size: f64,
}

impl<C: ColorModel> Checkerboard<C> {
    pub fn new(even: C, odd: C, cell_size: f64) -> Self {
        Self { even, odd, cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Quantize a coordinate to its cell index.
    ///
    /// Negative coordinates are shifted by one cell before truncating toward
    /// zero, otherwise the cells on both sides of zero would merge into one
    /// double-width cell and the four quadrants around the origin misalign.
    pub fn cell(&self, coord: f64) -> i64 {
        let shifted = if coord < 0.0 { coord - self.cell_size } else { coord };
        (shifted / self.cell_size) as i64
    }

    /// Checkerboard color at world point `p` (only x and z matter).
    pub fn color_at(&self, p: DVec3) -> C {
        let x_even = self.cell(p.x).rem_euclid(2) == 0;
        let z_even = self.cell(p.z).rem_euclid(2) == 0;

        if x_even == z_even {
            self.even
        } else {
            self.odd
        }
    }
}

impl<C: ColorModel> Default for Checkerboard<C> {
    fn default() -> Self {
        Self::new(C::WHITE, C::BLACK, DEFAULT_CELL_SIZE)
    }
}

/// A plane given by a point and a normal, with the plane equation constant
/// `offset = dot(point, normal)` computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<C: ColorModel> {
    point: DVec3,
    normal: DVec3,
    offset: f64,
    checker: Checkerboard<C>,
    extent: Option<f64>,
}

impl<C: ColorModel> Plane<C> {
    /// Create an infinite plane. The normal is normalized here.
    pub fn new(point: DVec3, normal: DVec3, checker: Checkerboard<C>) -> Self {
        let normal = normal.normalize();
        Self {
            point,
            normal,
            offset: point.dot(normal),
            checker,
            extent: None,
        }
    }

    /// Limit the plane to hits within `extent` of its anchor point.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn extent(&self) -> Option<f64> {
        self.extent
    }

    pub fn checker(&self) -> &Checkerboard<C> {
        &self.checker
    }
}

impl<C: ColorModel> Surface<C> for Plane<C> {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let point = ray_plane_intersection(ray, self.normal, self.offset)?;

        if let Some(extent) = self.extent {
            if (point - self.point).length() >= extent {
                return None;
            }
        }

        Some(Intersection {
            point,
            normal: self.normal,
        })
    }

    fn color_at(&self, point: DVec3) -> C {
        self.checker.color_at(point)
    }
}

/// Ray-plane test against the plane equation `dot(p, normal) = offset`.
///
/// Only rays travelling against the normal can hit: parallel rays and rays
/// reaching the plane from its back side are culled, so the plane is one
/// sided and cannot be seen from below.
pub fn ray_plane_intersection(ray: &Ray, normal: DVec3, offset: f64) -> Option<DVec3> {
    let denom = ray.direction.dot(normal);
    if denom.is_nan() || denom >= 0.0 {
        return None;
    }

    let t = (offset - ray.origin.dot(normal)) / denom;
    Some(ray.at(t))
}
