//! Shared surface contract for the closed set of scene primitives.

use rtlab_math::{DVec3, Ray};

use crate::color::ColorModel;
use crate::plane::Plane;
use crate::sphere::Sphere;

/// Where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: DVec3,
    /// Unit surface normal, pointing away from the primitive's interior
    pub normal: DVec3,
}

/// A ray hit: the surface color at the intersection and the intersection
/// itself. Produced per traced ray and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<C: ColorModel> {
    pub color: C,
    pub intersection: Intersection,
}

/// Anything a ray can hit and that has a color at its surface.
pub trait Surface<C: ColorModel>: Send + Sync {
    /// Intersect the ray with this surface. `None` is a miss.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    /// Surface color at a point on the surface.
    fn color_at(&self, point: DVec3) -> C;

    /// Intersect and look up the color at the intersection.
    fn hit(&self, ray: &Ray) -> Option<Hit<C>> {
        let intersection = self.intersect(ray)?;
        Some(Hit {
            color: self.color_at(intersection.point),
            intersection,
        })
    }
}

/// The primitive kinds a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<C: ColorModel> {
    Sphere(Sphere<C>),
    Plane(Plane<C>),
}

impl<C: ColorModel> Surface<C> for Primitive<C> {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Plane(plane) => plane.intersect(ray),
        }
    }

    fn color_at(&self, point: DVec3) -> C {
        match self {
            Primitive::Sphere(sphere) => sphere.color_at(point),
            Primitive::Plane(plane) => plane.color_at(point),
        }
    }
}

impl<C: ColorModel> From<Sphere<C>> for Primitive<C> {
    fn from(sphere: Sphere<C>) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl<C: ColorModel> From<Plane<C>> for Primitive<C> {
    fn from(plane: Plane<C>) -> Self {
        Primitive::Plane(plane)
    }
}
