// Re-export glam for convenience
pub use glam::*;

// RTLab math types
mod ray;
mod rotation;

pub use ray::Ray;
pub use rotation::{rotation_xyz, DVec3Ext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_cross_is_right_handed() {
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
        // Camera convention: forward x world up = right
        assert_eq!(DVec3::NEG_Z.cross(DVec3::Y), DVec3::X);
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        // Callers are expected to check for this
        assert!(DVec3::ZERO.normalize().is_nan());
    }
}
