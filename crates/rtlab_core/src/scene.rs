//! Scene container: primitives plus a single point light.
//!
//! The scene is built once and then only read, so a render pass can share it
//! across all tile workers without synchronization.

use rtlab_math::{DVec3, Ray};

use crate::color::ColorModel;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::surface::{Hit, Primitive, Surface};

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight<C: ColorModel> {
    pub position: DVec3,
    pub color: C,
}

impl<C: ColorModel> PointLight<C> {
    /// Create a white light at the given position.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            color: C::WHITE,
        }
    }

    /// Set the light color.
    pub fn with_color(mut self, color: C) -> Self {
        self.color = color;
        self
    }
}

/// The objects a renderer traces against.
#[derive(Debug, Clone)]
pub struct Scene<C: ColorModel> {
    primitives: Vec<Primitive<C>>,
    light: PointLight<C>,
}

impl<C: ColorModel> Scene<C> {
    /// Create an empty scene lit by `light`.
    pub fn new(light: PointLight<C>) -> Self {
        Self {
            primitives: Vec::new(),
            light,
        }
    }

    /// Add a primitive. Iteration order is insertion order, which also
    /// breaks distance ties in [`Scene::closest_hit`].
    pub fn add(&mut self, primitive: impl Into<Primitive<C>>) {
        self.primitives.push(primitive.into());
    }

    /// Builder form of [`Scene::add`] for spheres.
    pub fn with_sphere(mut self, sphere: Sphere<C>) -> Self {
        self.add(sphere);
        self
    }

    /// Builder form of [`Scene::add`] for the ground plane.
    pub fn with_ground(mut self, plane: Plane<C>) -> Self {
        self.add(plane);
        self
    }

    pub fn light(&self) -> &PointLight<C> {
        &self.light
    }

    pub fn primitives(&self) -> &[Primitive<C>] {
        &self.primitives
    }

    /// Spheres in insertion order.
    pub fn spheres(&self) -> impl Iterator<Item = &Sphere<C>> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Sphere(sphere) => Some(sphere),
            Primitive::Plane(_) => None,
        })
    }

    /// True if the scene holds a ground plane.
    pub fn has_ground(&self) -> bool {
        self.primitives
            .iter()
            .any(|p| matches!(p, Primitive::Plane(_)))
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Closest hit along the ray, by distance from the ray origin.
    ///
    /// On equal distances the primitive added first wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<C>> {
        let mut closest: Option<(f64, &Primitive<C>, _)> = None;

        for primitive in &self.primitives {
            let Some(intersection) = primitive.intersect(ray) else {
                continue;
            };

            let distance_sq = (intersection.point - ray.origin).length_squared();
            match closest {
                Some((closest_sq, _, _)) if distance_sq >= closest_sq => {}
                _ => closest = Some((distance_sq, primitive, intersection)),
            }
        }

        // Color lookup only for the winner
        closest.map(|(_, primitive, intersection)| Hit {
            color: primitive.color_at(intersection.point),
            intersection,
        })
    }

    /// True if anything lies along the ray closer than `max_distance`.
    pub fn occluded(&self, ray: &Ray, max_distance: f64) -> bool {
        let max_sq = max_distance * max_distance;
        self.primitives.iter().any(|primitive| {
            primitive
                .intersect(ray)
                .is_some_and(|its| (its.point - ray.origin).length_squared() < max_sq)
        })
    }
}
