// Rotation utilities for DVec3
//
// Rodrigues' axis-angle rotation plus the combined Euler matrix the orbit
// camera uses.

use glam::{DMat3, DVec3};

/// Extension trait for DVec3 to provide rotation helpers
pub trait DVec3Ext {
    /// Rotate around `axis` by `radians` using Rodrigues' rotation formula:
    /// `v*cos(t) + (axis x v)*sin(t) + axis*(axis . v)*(1 - cos(t))`.
    ///
    /// `axis` must be unit length. A non-unit axis gives a silently wrong
    /// result, so callers normalize first.
    fn rotated(self, axis: DVec3, radians: f64) -> DVec3;

    /// True if any component is NaN or infinite.
    fn is_degenerate(self) -> bool;
}

impl DVec3Ext for DVec3 {
    fn rotated(self, axis: DVec3, radians: f64) -> DVec3 {
        let (sin, cos) = radians.sin_cos();
        let term1 = self * cos;
        let term2 = axis.cross(self) * sin;
        let term3 = axis * axis.dot(self) * (1.0 - cos);
        term1 + term2 + term3
    }

    fn is_degenerate(self) -> bool {
        !self.is_finite()
    }
}

/// Combined rotation about X, Y and Z (radians), laid out for row vectors:
///
/// ```text
/// | cy*cz   sx*sy*cz - cx*sz   cx*sy*cz + sx*sz |
/// | cy*sz   sx*sy*sz + cx*cz   cx*sy*sz - sx*cz |
/// | -sy     sx*cy              cx*cy            |
/// ```
///
/// glam multiplies column vectors, so the rows above become the columns of
/// the returned matrix and `m * v` equals the row-vector product `v * M`.
pub fn rotation_xyz(x: f64, y: f64, z: f64) -> DMat3 {
    let (sx, cx) = x.sin_cos();
    let (sy, cy) = y.sin_cos();
    let (sz, cz) = z.sin_cos();

    let row1 = DVec3::new(cy * cz, sx * sy * cz - cx * sz, cx * sy * cz + sx * sz);
    let row2 = DVec3::new(cy * sz, sx * sy * sz + cx * cz, cx * sy * sz - sx * cz);
    let row3 = DVec3::new(-sy, sx * cy, cx * cy);

    DMat3::from_cols(row1, row2, row3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    const EPS: f64 = 1e-9;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let axes = [DVec3::X, DVec3::Y, DVec3::Z, DVec3::new(1.0, 1.0, 1.0).normalize()];
        let vectors = [
            DVec3::X,
            DVec3::new(0.0, 0.6, 0.8),
            DVec3::new(-1.0, 2.0, 0.5).normalize(),
        ];

        for axis in axes {
            for v in vectors {
                assert_eq!(v.rotated(axis, 0.0), v);
            }
        }
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let axis = DVec3::new(0.3, -0.4, 0.5).normalize();
        let v = DVec3::new(-1.0, 2.0, 0.5).normalize();
        assert!(approx(v.rotated(axis, TAU), v));
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let rotated = DVec3::X.rotated(DVec3::Z, FRAC_PI_2);
        assert!(approx(rotated, DVec3::Y));

        let half = DVec3::Y.rotated(DVec3::Z, PI);
        assert!(approx(half, DVec3::NEG_Y));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let axis = DVec3::Y;
        let v = DVec3::new(3.0, 1.0, -2.0);
        let rotated = v.rotated(axis, 1.234);
        assert!((rotated.length() - v.length()).abs() < EPS);
        // Component along the axis is untouched
        assert!((rotated.y - v.y).abs() < EPS);
    }

    #[test]
    fn test_is_degenerate() {
        assert!(!DVec3::ONE.is_degenerate());
        assert!(DVec3::new(f64::NAN, 0.0, 0.0).is_degenerate());
        assert!(DVec3::new(0.0, f64::NEG_INFINITY, 0.0).is_degenerate());
    }

    #[test]
    fn test_rotation_xyz_identity() {
        let m = rotation_xyz(0.0, 0.0, 0.0);
        assert!(approx(m * DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_rotation_xyz_yaw_matches_row_vector_product() {
        // (0,0,-5) * M picks -5 times the third row: (5*sin(y), 0, -5*cos(y))
        let y = 0.3;
        let v = DVec3::new(0.0, 0.0, -5.0);
        let rotated = rotation_xyz(0.0, y, 0.0) * v;
        let expected = DVec3::new(5.0 * y.sin(), 0.0, -5.0 * y.cos());
        assert!(approx(rotated, expected));
    }

    #[test]
    fn test_rotation_xyz_is_orthonormal() {
        let m = rotation_xyz(0.2, -0.7, 1.1);
        let product = m * m.transpose();
        assert!(product.abs_diff_eq(DMat3::IDENTITY, EPS));
        assert!((m.determinant() - 1.0).abs() < EPS);
    }
}
