use super::{Vec2, Vec3};

/// Normalized device coordinates. `x`/`y` are in `[-1, 1]` inside the view,
/// `z` in `[-1, 1]` between the near and far planes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ndc {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ndc {
    /// Map to pixel coordinates with `y` pointing down.
    pub fn to_screen(self, width: f64, height: f64) -> Vec2 {
        Vec2::new(
            (self.x * 0.5 + 0.5) * width,
            (-self.y * 0.5 + 0.5) * height,
        )
    }
}

/// Perspective camera on the `+z` axis looking at the origin, `+y` up.
///
/// Camera space is world space translated by the eye, so the view direction
/// is `-z` and points in front of the camera have negative camera-space z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub distance: f64,
    pub fov_y_rad: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    /// Returns `None` for a degenerate frustum (zero/negative aspect, bad planes).
    pub fn new(distance: f64, fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Option<Self> {
        let ok = distance.is_finite()
            && aspect.is_finite()
            && aspect > 0.0
            && fov_y_rad > 0.0
            && fov_y_rad < std::f64::consts::PI
            && near > 0.0
            && far > near;
        ok.then_some(Self {
            distance,
            fov_y_rad,
            aspect,
            near,
            far,
        })
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// `1 / tan(fov_y / 2)`.
    pub fn focal(&self) -> f64 {
        1.0 / (0.5 * self.fov_y_rad).tan()
    }

    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        world - self.eye()
    }

    /// Perspective projection. Returns `None` for points at or behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Ndc> {
        let cam = self.to_camera_space(world);
        let w = -cam.z;
        if w <= 0.0 {
            return None;
        }
        let f = self.focal();
        let (n, fa) = (self.near, self.far);
        let clip_z = -(fa + n) / (fa - n) * cam.z - 2.0 * fa * n / (fa - n);
        Some(Ndc {
            x: f / self.aspect * cam.x / w,
            y: f * cam.y / w,
            z: clip_z / w,
        })
    }
}
