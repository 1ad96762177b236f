//! Orbit camera for primary ray generation.

use rtlab_math::{rotation_xyz, DVec3, DVec3Ext, Ray};

/// World up direction used to rebuild the view basis.
const WORLD_UP: DVec3 = DVec3::Y;

/// Orbit input is scaled by this factor and read as degrees.
const ORBIT_DEGREES_PER_UNIT: f64 = 0.75;

/// Pan input is scaled by this factor and read as world units.
const PAN_UNITS_PER_UNIT: f64 = -0.1;

/// Default distance from the camera origin to the image plane.
pub const DEFAULT_NEAR_PLANE_DISTANCE: f64 = 1.0;

/// Camera with an explicit view basis and a look-at pivot.
///
/// `right`, `up` and `forward` are kept orthonormal by every mutator that
/// rebuilds the basis. Free-look rotations (`rotate_lr`, `rotate_ud`) turn the
/// basis without moving the pivot; the next orbit or pan re-aims at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: DVec3,
    right: DVec3,
    up: DVec3,
    forward: DVec3,
    look_at: DVec3,
    near_plane_distance: f64,
}

impl Camera {
    /// Camera at the world origin looking down -Z at `(0, 0, -5)`.
    pub fn new() -> Self {
        Self {
            origin: DVec3::ZERO,
            right: DVec3::X,
            up: DVec3::Y,
            forward: DVec3::NEG_Z,
            look_at: DVec3::new(0.0, 0.0, -5.0),
            near_plane_distance: DEFAULT_NEAR_PLANE_DISTANCE,
        }
    }

    /// Place the camera and aim it at `look_at`.
    pub fn with_position(mut self, origin: DVec3, look_at: DVec3) -> Self {
        self.origin = origin;
        self.look_at = look_at;
        self.update_orientation();
        self
    }

    /// Set the image plane distance.
    pub fn with_near_plane(mut self, distance: f64) -> Self {
        self.near_plane_distance = distance;
        self
    }

    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    pub fn look_at(&self) -> DVec3 {
        self.look_at
    }

    pub fn near_plane_distance(&self) -> f64 {
        self.near_plane_distance
    }

    /// True when the basis or origin has gone non-finite, for example after
    /// aiming straight along the world up axis.
    pub fn is_degenerate(&self) -> bool {
        [self.origin, self.right, self.up, self.forward]
            .iter()
            .any(|v| v.is_degenerate())
    }

    /// Primary ray through pixel `(x, y)` of a `width x height` image.
    ///
    /// Pixel coordinates map to `[-1, 1]` with y pointing up; the horizontal
    /// axis is stretched by the aspect ratio. The ray starts at the camera
    /// origin and passes through the matching point on the near plane.
    pub fn create_viewer_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let width = f64::from(width);
        let height = f64::from(height);
        let aspect = width / height;

        let canvas_x = (f64::from(x) / width * 2.0 - 1.0) * aspect;
        let canvas_y = -(f64::from(y) / height * 2.0 - 1.0);

        let target = self.origin
            + self.forward * self.near_plane_distance
            + self.right * canvas_x
            + self.up * canvas_y;

        Ray::new(self.origin, (target - self.origin).normalize())
    }

    /// Orbit around the look-at pivot.
    ///
    /// Inputs are clamped to `[-1, 1]`; `dx` yaws and `dy` pitches by at most
    /// 0.75 degrees per call.
    pub fn rotate_around_look_at_pivot(&mut self, dx: f64, dy: f64) {
        let yaw = (dx.clamp(-1.0, 1.0) * ORBIT_DEGREES_PER_UNIT).to_radians();
        let pitch = (dy.clamp(-1.0, 1.0) * ORBIT_DEGREES_PER_UNIT).to_radians();

        let relative = self.origin - self.look_at;
        self.origin = rotation_xyz(pitch, yaw, 0.0) * relative + self.look_at;
        self.update_orientation();
    }

    /// Slide pivot and camera together over the XZ plane.
    pub fn move_pivot(&mut self, dx: f64, dy: f64) {
        let offset = DVec3::new(dx.clamp(-1.0, 1.0), 0.0, dy.clamp(-1.0, 1.0)) * PAN_UNITS_PER_UNIT;
        self.look_at += offset;
        self.origin += offset;
        self.update_orientation();
    }

    pub fn move_forward(&mut self, distance: f64) {
        self.origin += self.forward * distance;
    }

    pub fn move_right(&mut self, distance: f64) {
        self.origin += self.right * distance;
    }

    pub fn move_up(&mut self, distance: f64) {
        self.origin += self.up * distance;
    }

    /// Turn left/right about the current up vector.
    pub fn rotate_lr(&mut self, radians: f64) {
        self.right = self.right.rotated(self.up, radians).normalize();
        self.forward = self.forward.rotated(self.up, radians).normalize();
    }

    /// Tilt up/down about the current right vector.
    pub fn rotate_ud(&mut self, radians: f64) {
        self.up = self.up.rotated(self.right, radians).normalize();
        self.forward = self.forward.rotated(self.right, radians).normalize();
    }

    pub fn rotate_lr_degrees(&mut self, degrees: f64) {
        self.rotate_lr(degrees.to_radians());
    }

    pub fn rotate_ud_degrees(&mut self, degrees: f64) {
        self.rotate_ud(degrees.to_radians());
    }

    fn update_orientation(&mut self) {
        self.forward = (self.look_at - self.origin).normalize();
        self.right = self.forward.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
