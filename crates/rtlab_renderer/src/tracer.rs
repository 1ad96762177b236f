//! Recursive Whitted-style tracer.
//!
//! One point light, Lambert diffuse, a hard specular highlight above a
//! threshold, hard shadows, and mirror bounces blended with the lit color.

use rtlab_core::{ColorModel, Intersection, Scene};
use rtlab_math::{DVec3, Ray};

use crate::renderer::RenderConfig;

/// Depth of a primary ray.
pub const PRIMARY_DEPTH: u32 = 1;

/// Offset along the normal for rays leaving a surface.
pub const SURFACE_EPSILON: f64 = 1e-7;

/// Shades rays against a scene with fixed settings for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a, C: ColorModel> {
    scene: &'a Scene<C>,
    bounce_limit: u32,
    reflectivity: f64,
    specular_threshold: f64,
}

impl<'a, C: ColorModel> Tracer<'a, C> {
    pub fn new(scene: &'a Scene<C>, config: &RenderConfig) -> Self {
        Self {
            scene,
            bounce_limit: config.bounce_limit,
            reflectivity: config.reflectivity,
            specular_threshold: config.specular_threshold,
        }
    }

    pub fn bounce_limit(&self) -> u32 {
        self.bounce_limit
    }

    /// Trace a camera ray.
    pub fn trace_primary(&self, ray: &Ray) -> Option<C> {
        self.trace(ray, PRIMARY_DEPTH)
    }

    /// Color seen along `ray`, or `None` when nothing is hit or `depth`
    /// exceeds the bounce limit.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Option<C> {
        if depth > self.bounce_limit {
            return None;
        }

        let hit = self.scene.closest_hit(ray)?;
        let Intersection { point, normal } = hit.intersection;

        let reflected = ray.direction - normal * ray.direction.dot(normal) * 2.0;
        let surface_point = point + normal * SURFACE_EPSILON;

        let (diffuse, specular) = self.direct_light(surface_point, normal, reflected);
        let mut color = hit.color * diffuse;
        if specular > self.specular_threshold {
            color = color + self.scene.light().color * specular;
        }

        let bounce = self.trace(&Ray::new(surface_point, reflected), depth + 1);
        Some(match bounce {
            Some(bounce) => color.weighted_add(1.0 - self.reflectivity, bounce, self.reflectivity),
            None => color,
        })
    }

    /// Diffuse and specular factors at `origin`, both zero when the light is
    /// blocked.
    fn direct_light(&self, origin: DVec3, normal: DVec3, reflected: DVec3) -> (f64, f64) {
        let to_light = self.scene.light().position - origin;
        let distance = to_light.length();
        let direction = to_light / distance;
        if !direction.is_finite() {
            return (0.0, 0.0);
        }

        if self.scene.occluded(&Ray::new(origin, direction), distance) {
            return (0.0, 0.0);
        }

        (normal.dot(direction).max(0.0), reflected.dot(direction).max(0.0))
    }
}
