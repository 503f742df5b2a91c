use gpu::PointStyles;
use scene::{AnimationConfig, CameraConfig, InteractionConfig, ProjectorConfig, SceneConfig};
use serde::{Deserialize, Serialize};
use surface::{DotFieldConfig, LandMaskConfig};

/// Default drawable size in CSS pixels, used when the host gives none.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 700.0,
            pixel_ratio: 1.0,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub dots: DotFieldConfig,
    pub land_mask: LandMaskConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub animation: AnimationConfig,
    pub projector: ProjectorConfig,
    pub styles: PointStyles,
    pub surface: SurfaceConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn check(ok: bool, field: &'static str, reason: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: reason() })
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl GlobeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.dots.radius;
        check(positive(radius), "dots.radius", || format!("{radius} is not a positive radius"))?;
        check(
            self.projector.globe_radius == radius,
            "projector.globe_radius",
            || format!("{} differs from dots.radius {radius}", self.projector.globe_radius),
        )?;
        check(
            self.land_mask.width > 0 && self.land_mask.height > 0,
            "land_mask",
            || format!("{}x{} grid is empty", self.land_mask.width, self.land_mask.height),
        )?;

        let cam = &self.camera;
        check(
            positive(cam.fov_y_deg) && cam.fov_y_deg < 180.0,
            "camera.fov_y_deg",
            || format!("{} is outside (0, 180)", cam.fov_y_deg),
        )?;
        check(positive(cam.near) && cam.far > cam.near, "camera.far", || {
            format!("near {} / far {} do not form a frustum", cam.near, cam.far)
        })?;
        check(
            cam.min_zoom > radius && cam.min_zoom <= cam.max_zoom && cam.max_zoom.is_finite(),
            "camera.min_zoom",
            || format!("zoom range [{}, {}] must lie outside the globe", cam.min_zoom, cam.max_zoom),
        )?;
        check(
            (cam.min_zoom..=cam.max_zoom).contains(&cam.initial_zoom),
            "camera.initial_zoom",
            || format!("{} is outside [{}, {}]", cam.initial_zoom, cam.min_zoom, cam.max_zoom),
        )?;
        check(
            cam.max_tilt >= 0.0 && cam.max_tilt < std::f64::consts::FRAC_PI_2,
            "camera.max_tilt",
            || format!("{} is outside [0, pi/2)", cam.max_tilt),
        )?;

        let easing = self.animation.zoom_easing;
        check(easing > 0.0 && easing <= 1.0, "animation.zoom_easing", || {
            format!("{easing} is outside (0, 1]")
        })?;
        check(
            self.animation.idle_rotation_speed.is_finite(),
            "animation.idle_rotation_speed",
            || "must be finite".to_string(),
        )?;
        check(
            self.interaction.drag_sensitivity.is_finite() && self.interaction.zoom_sensitivity.is_finite(),
            "interaction",
            || "sensitivities must be finite".to_string(),
        )?;

        let [card_w, card_h] = self.projector.card_size;
        check(positive(card_w) && positive(card_h), "projector.card_size", || {
            format!("{card_w}x{card_h} is not a card size")
        })?;
        check(
            self.projector.facing_margin.is_finite() && self.projector.facing_margin >= 0.0,
            "projector.facing_margin",
            || format!("{} is negative", self.projector.facing_margin),
        )?;

        let styles = &self.styles;
        let sizes = [
            styles.land.size,
            styles.ocean.size,
            styles.marker_core_radius,
            styles.marker_halo_radius,
        ];
        check(sizes.iter().all(|s| s.is_finite() && *s >= 0.0), "styles", || {
            format!("sizes {sizes:?} must be non-negative")
        })?;
        check(
            positive(self.surface.width) && positive(self.surface.height),
            "surface",
            || format!("{}x{} is not a surface size", self.surface.width, self.surface.height),
        )?;
        Ok(())
    }

    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            camera: self.camera,
            projector: self.projector,
            styles: self.styles,
        }
    }
}
