use foundation::math::{Vec3, lat_lng_to_3d};
use gpu::{DrawStats, PointPalette, PointStyles, RenderDevice, RenderError, RenderResources, SceneGeometry, SurfaceSize, View};
use serde::{Deserialize, Serialize};
use surface::DotField;

use crate::camera::{CameraConfig, CameraState, Viewport};
use crate::marker::{Marker, RankedVisibleMarker};
use crate::projector::{ProjectorConfig, project};

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub projector: ProjectorConfig,
    pub styles: PointStyles,
}

/// Everything one mounted globe owns once it has a usable surface. The
/// allocations live on the device passed to each call.
#[derive(Debug)]
pub struct SceneState {
    pub camera: CameraState,
    config: SceneConfig,
    viewport: Viewport,
    size: SurfaceSize,
    resources: Option<RenderResources>,
}

fn glyph_positions(markers: &[Marker], config: &ProjectorConfig) -> Vec<Vec3> {
    let radius = config.globe_radius + config.glyph_lift;
    markers
        .iter()
        .map(|m| {
            let geo = m.position();
            lat_lng_to_3d(geo.lat_deg, geo.lng_deg, radius)
        })
        .collect()
}

impl SceneState {
    /// Size the render target and upload the dot field and marker glyphs.
    /// `None` when the viewport and pixel ratio cannot back a render target.
    pub fn new(
        device: &mut dyn RenderDevice,
        dots: &DotField,
        markers: &[Marker],
        viewport: Viewport,
        pixel_ratio: f64,
        config: SceneConfig,
        palette: &PointPalette,
    ) -> Option<Self> {
        let size = SurfaceSize::new(viewport.width(), viewport.height(), pixel_ratio)?;
        device.resize_target(size);
        let glyphs = glyph_positions(markers, &config.projector);
        let geometry = SceneGeometry {
            land: &dots.land,
            ocean: &dots.ocean,
            markers: &glyphs,
        };
        let resources = RenderResources::create(device, &geometry, &config.styles, palette);
        tracing::debug!(
            width = size.width,
            height = size.height,
            pixel_ratio = size.pixel_ratio,
            "scene constructed"
        );
        Some(Self {
            camera: CameraState::new(&config.camera),
            config,
            viewport,
            size,
            resources: Some(resources),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Render target size in device pixels.
    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    pub fn resize(&mut self, device: &mut dyn RenderDevice, viewport: Viewport, pixel_ratio: f64) -> bool {
        let Some(size) = SurfaceSize::new(viewport.width(), viewport.height(), pixel_ratio) else {
            return false;
        };
        if size != self.size {
            device.resize_target(size);
            self.size = size;
        }
        self.viewport = viewport;
        true
    }

    pub fn view(&self) -> Option<View> {
        self.camera.view(self.viewport, &self.config.camera)
    }

    pub fn project(&self, markers: &[Marker]) -> Vec<RankedVisibleMarker> {
        match self.view() {
            Some(view) => project(markers, &view, self.viewport, &self.config.projector),
            None => Vec::new(),
        }
    }

    /// Submit one frame. Draws nothing once resources are released.
    pub fn render(&self, device: &mut dyn RenderDevice) -> Result<DrawStats, RenderError> {
        let (Some(resources), Some(view)) = (&self.resources, self.view()) else {
            return Ok(DrawStats::default());
        };
        resources.draw(device, &view)
    }

    /// Recolor existing materials. Returns the number updated.
    pub fn recolor(&self, device: &mut dyn RenderDevice, palette: &PointPalette) -> usize {
        match &self.resources {
            Some(resources) => resources.recolor(device, palette),
            None => 0,
        }
    }

    pub fn set_markers(&mut self, device: &mut dyn RenderDevice, markers: &[Marker]) {
        let glyphs = glyph_positions(markers, &self.config.projector);
        if let Some(resources) = &mut self.resources {
            resources.replace_markers(device, &glyphs);
        }
    }

    pub fn is_released(&self) -> bool {
        self.resources.is_none()
    }

    /// Free every device allocation. Safe to call more than once.
    pub fn release(&mut self, device: &mut dyn RenderDevice) -> usize {
        match self.resources.take() {
            Some(resources) => resources.release(device),
            None => 0,
        }
    }
}
