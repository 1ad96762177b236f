use crate::DVec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is expected to be unit length. Nothing enforces this, but
/// every intersection routine assumes it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// True when both origin and direction are free of NaN and infinities.
    ///
    /// Degenerate camera states produce non-finite rays; the tile renderer
    /// skips those pixels instead of tracing them.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let direction = DVec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_finite() {
        assert!(Ray::new(DVec3::ZERO, DVec3::NEG_Z).is_finite());

        let nan_dir = Ray::new(DVec3::ZERO, DVec3::ZERO.normalize());
        assert!(!nan_dir.is_finite());

        let inf_origin = Ray::new(DVec3::new(f64::INFINITY, 0.0, 0.0), DVec3::X);
        assert!(!inf_origin.is_finite());
    }
}
