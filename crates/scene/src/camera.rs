use foundation::math::{Mat3, PerspectiveCamera};
use gpu::View;
use serde::{Deserialize, Serialize};

/// Extra yaw applied under the user rotation so that rotation `(0, 0)` puts
/// longitude 0 in front of the camera.
pub const FRONT_MERIDIAN_YAW: f64 = std::f64::consts::FRAC_PI_2;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Limit on `|rotation_x|` in radians.
    pub max_tilt: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 45.0,
            near: 1.0,
            far: 2000.0,
            initial_zoom: 750.0,
            min_zoom: 400.0,
            max_zoom: 1200.0,
            max_tilt: 0.6,
        }
    }
}

/// Drawable area in CSS pixels. Always strictly positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let ok = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        ok.then_some(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub target_zoom: f64,
    pub current_zoom: f64,
}

impl CameraState {
    pub fn new(config: &CameraConfig) -> Self {
        let zoom = config.initial_zoom.clamp(config.min_zoom, config.max_zoom);
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            target_zoom: zoom,
            current_zoom: zoom,
        }
    }

    /// Globe orientation, `Rx(rotation_x) * Ry(rotation_y + FRONT_MERIDIAN_YAW)`.
    pub fn rotation(&self) -> Mat3 {
        Mat3::euler_xy(self.rotation_x, self.rotation_y + FRONT_MERIDIAN_YAW)
    }

    /// Yaw freely, tilt within `±max_tilt`.
    pub fn rotate_by(&mut self, yaw_rad: f64, tilt_rad: f64, max_tilt: f64) {
        self.rotation_y += yaw_rad;
        self.rotation_x = (self.rotation_x + tilt_rad).clamp(-max_tilt, max_tilt);
    }

    /// Move `current_zoom` a fraction of the way toward `target_zoom`.
    pub fn ease_zoom(&mut self, easing: f64, config: &CameraConfig) {
        self.current_zoom += (self.target_zoom - self.current_zoom) * easing;
        self.current_zoom = self.current_zoom.clamp(config.min_zoom, config.max_zoom);
    }

    pub fn perspective(&self, viewport: Viewport, config: &CameraConfig) -> Option<PerspectiveCamera> {
        PerspectiveCamera::new(
            self.current_zoom,
            config.fov_y_deg.to_radians(),
            viewport.aspect(),
            config.near,
            config.far,
        )
    }

    pub fn view(&self, viewport: Viewport, config: &CameraConfig) -> Option<View> {
        Some(View {
            rotation: self.rotation(),
            camera: self.perspective(viewport, config)?,
        })
    }
}
