//! Sphere primitive.

use rtlab_math::{DVec3, Ray};

use crate::color::ColorModel;
use crate::material::Material;
use crate::surface::{Intersection, Surface};

/// A sphere primitive. Immutable once the scene is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere<C: ColorModel> {
    id: u32,
    center: DVec3,
    radius: f64,
    material: Material<C>,
}

impl<C: ColorModel> Sphere<C> {
    /// Create a new sphere.
    pub fn new(id: u32, center: DVec3, radius: f64, material: Material<C>) -> Self {
        Self {
            id,
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material<C> {
        &self.material
    }
}

impl<C: ColorModel> Surface<C> for Sphere<C> {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        ray_sphere_intersection(ray, self.center, self.radius)
    }

    fn color_at(&self, _point: DVec3) -> C {
        self.material.color
    }
}

/// Geometric ray-sphere test returning the nearest intersection.
///
/// Works from the angle between the ray and the direction to the center:
/// a sphere behind the origin (cosine <= 0) is rejected outright, then the
/// chord midpoint along the ray gives the closest approach. The hit lies half
/// a chord before the midpoint. `ray.direction` must be unit length.
pub fn ray_sphere_intersection(ray: &Ray, center: DVec3, radius: f64) -> Option<Intersection> {
    let to_center = center - ray.origin;
    let center_distance = to_center.length();
    let cosine = ray.direction.dot(to_center / center_distance);
    if cosine.is_nan() || cosine <= 0.0 {
        return None;
    }

    let offset_to_middle = center_distance * cosine;
    let middle_distance_sq = center_distance * center_distance - offset_to_middle * offset_to_middle;
    let offset_from_middle_sq = radius * radius - middle_distance_sq;
    if offset_from_middle_sq < 0.0 {
        return None;
    }

    let t = offset_to_middle - offset_from_middle_sq.sqrt();
    let point = ray.at(t);
    let normal = (point - center).normalize();

    Some(Intersection { point, normal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    const EPS: f64 = 1e-9;

    fn unit_sphere_at(center: DVec3) -> Sphere<Rgb> {
        Sphere::new(1, center, 1.0, Material::new(Rgb::BLUE))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z);

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.point - DVec3::new(0.0, 0.0, -4.0)).length() < EPS);
        assert!((hit.normal - DVec3::Z).length() < EPS);
    }

    #[test]
    fn test_hit_distance_toward_center() {
        // Origin outside, aimed straight at the center: distance is |d - r|
        let origins = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, -2.0, 1.0),
            DVec3::new(-7.5, 4.0, 10.0),
        ];
        let center = DVec3::new(1.0, 2.0, -3.0);
        let radius = 1.5;

        for origin in origins {
            let direction = (center - origin).normalize();
            let ray = Ray::new(origin, direction);
            let hit = ray_sphere_intersection(&ray, center, radius).unwrap();

            let expected = ((center - origin).length() - radius).abs();
            assert!(((hit.point - origin).length() - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));

        // Ray pointing away from sphere
        let away = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(sphere.intersect(&away).is_none());

        // Ray passing beside the sphere
        let beside = Ray::new(DVec3::new(1.5, 0.0, 0.0), DVec3::NEG_Z);
        assert!(sphere.intersect(&beside).is_none());

        // Perpendicular to the center direction
        let sideways = Ray::new(DVec3::ZERO, DVec3::X);
        assert!(sphere.intersect(&sideways).is_none());
    }

    #[test]
    fn test_off_axis_ray_hits_nearest_side() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(DVec3::new(0.6, 0.0, 0.0), DVec3::NEG_Z);

        // x^2 + (z + 5)^2 = 1 at x = 0.6 gives z = -5 + 0.8
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.point - DVec3::new(0.6, 0.0, -4.2)).length() < 1e-9);
    }

    #[test]
    fn test_normal_is_unit_and_outward() {
        let center = DVec3::new(0.0, 0.0, -5.0);
        let sphere = Sphere::new(2, center, 2.0, Material::new(Rgb::RED));
        let ray = Ray::new(DVec3::new(0.5, 0.5, 0.0), DVec3::NEG_Z);

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.normal.length() - 1.0).abs() < EPS);
        assert!(hit.normal.dot(hit.point - center) > 0.0);
    }

    #[test]
    fn test_color_is_material_color() {
        let sphere = unit_sphere_at(DVec3::ZERO);
        assert_eq!(sphere.color_at(DVec3::X), Rgb::BLUE);
        assert_eq!(sphere.id(), 1);
    }
}
