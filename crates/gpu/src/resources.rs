use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::device::{
    BufferHandle, DrawCall, GlyphShape, Material, MaterialHandle, PointVertex, RenderDevice, RenderError,
};
use crate::view::View;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub size: f32,
    pub opacity: f32,
}

/// Sizes and opacities of everything drawn on the globe. Colors come from the
/// palette and are the only thing that changes with the theme.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyles {
    pub land: PointStyle,
    pub ocean: PointStyle,
    pub marker_core_radius: f32,
    pub marker_halo_radius: f32,
    pub marker_halo_opacity: f32,
}

impl Default for PointStyles {
    fn default() -> Self {
        Self {
            land: PointStyle {
                size: 2.2,
                opacity: 0.92,
            },
            ocean: PointStyle {
                size: 1.4,
                opacity: 0.18,
            },
            marker_core_radius: 3.0,
            marker_halo_radius: 7.0,
            marker_halo_opacity: 0.18,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPalette {
    pub land: Rgba,
    pub ocean: Rgba,
    pub marker: Rgba,
}

/// Unrotated world positions to upload.
#[derive(Debug, Copy, Clone)]
pub struct SceneGeometry<'a> {
    pub land: &'a [Vec3],
    pub ocean: &'a [Vec3],
    /// Marker glyph centers, already lifted off the sphere surface.
    pub markers: &'a [Vec3],
}

/// What one frame submitted. Counts are instances, not pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: usize,
    pub points: usize,
    pub glyphs: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointLayer {
    pub buffer: BufferHandle,
    pub material: MaterialHandle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MarkerGlyphs {
    pub buffer: BufferHandle,
    pub core: MaterialHandle,
    pub halo: MaterialHandle,
}

fn to_vertices(points: &[Vec3]) -> Vec<PointVertex> {
    points
        .iter()
        .map(|p| PointVertex {
            position: p.to_f32(),
        })
        .collect()
}

/// Every device allocation one globe owns.
///
/// Created once per surface. A theme switch goes through [`recolor`] and
/// touches materials only; [`release`] frees everything and must be called
/// before the value is dropped.
///
/// [`recolor`]: RenderResources::recolor
/// [`release`]: RenderResources::release
#[derive(Debug)]
pub struct RenderResources {
    land: PointLayer,
    ocean: PointLayer,
    markers: MarkerGlyphs,
    released: bool,
}

impl RenderResources {
    pub fn create(
        device: &mut dyn RenderDevice,
        geometry: &SceneGeometry<'_>,
        styles: &PointStyles,
        palette: &PointPalette,
    ) -> Self {
        let mut layer = |name: &str, points: &[Vec3], style: PointStyle, color: Rgba| PointLayer {
            buffer: device.create_vertex_buffer(name, &to_vertices(points)),
            material: device.create_material(
                name,
                Material {
                    color,
                    size: style.size,
                    opacity: style.opacity,
                    shape: GlyphShape::Square,
                },
            ),
        };
        let land = layer("globe-land", geometry.land, styles.land, palette.land);
        let ocean = layer("globe-ocean", geometry.ocean, styles.ocean, palette.ocean);

        let markers = MarkerGlyphs {
            buffer: device.create_vertex_buffer("globe-markers", &to_vertices(geometry.markers)),
            core: device.create_material(
                "globe-marker-core",
                Material {
                    color: palette.marker,
                    size: styles.marker_core_radius,
                    opacity: 1.0,
                    shape: GlyphShape::Disc,
                },
            ),
            halo: device.create_material(
                "globe-marker-halo",
                Material {
                    color: palette.marker,
                    size: styles.marker_halo_radius,
                    opacity: styles.marker_halo_opacity,
                    shape: GlyphShape::Disc,
                },
            ),
        };
        tracing::debug!(
            land = geometry.land.len(),
            ocean = geometry.ocean.len(),
            markers = geometry.markers.len(),
            "created render resources"
        );
        Self {
            land,
            ocean,
            markers,
            released: false,
        }
    }

    pub fn land(&self) -> PointLayer {
        self.land
    }

    pub fn ocean(&self) -> PointLayer {
        self.ocean
    }

    pub fn markers(&self) -> MarkerGlyphs {
        self.markers
    }

    /// Swap colors in place. Returns the number of materials updated.
    pub fn recolor(&self, device: &mut dyn RenderDevice, palette: &PointPalette) -> usize {
        let targets = [
            (self.land.material, palette.land),
            (self.ocean.material, palette.ocean),
            (self.markers.core, palette.marker),
            (self.markers.halo, palette.marker),
        ];
        let mut updated = 0;
        for (handle, color) in targets {
            if let Some(material) = device.material(handle) {
                updated += usize::from(device.write_material(handle, Material { color, ..material }));
            }
        }
        updated
    }

    /// Submit one frame: land dots, ocean dots, then marker halos and cores.
    pub fn draw(&self, device: &mut dyn RenderDevice, view: &View) -> Result<DrawStats, RenderError> {
        let calls = [
            DrawCall {
                buffer: self.land.buffer,
                material: self.land.material,
            },
            DrawCall {
                buffer: self.ocean.buffer,
                material: self.ocean.material,
            },
            DrawCall {
                buffer: self.markers.buffer,
                material: self.markers.halo,
            },
            DrawCall {
                buffer: self.markers.buffer,
                material: self.markers.core,
            },
        ];
        device.draw(view, &calls)?;
        let mut stats = DrawStats {
            draw_calls: calls.len(),
            ..DrawStats::default()
        };
        for call in calls {
            let count = device.vertex_count(call.buffer).unwrap_or(0) as usize;
            match device.material(call.material).map(|m| m.shape) {
                Some(GlyphShape::Square) => stats.points += count,
                Some(GlyphShape::Disc) => stats.glyphs += count,
                None => {}
            }
        }
        Ok(stats)
    }

    /// Replace the marker glyph positions. The materials are kept.
    pub fn replace_markers(&mut self, device: &mut dyn RenderDevice, positions: &[Vec3]) {
        device.release_buffer(self.markers.buffer);
        self.markers.buffer = device.create_vertex_buffer("globe-markers", &to_vertices(positions));
    }

    /// Free every allocation. Returns how many device objects were released.
    pub fn release(mut self, device: &mut dyn RenderDevice) -> usize {
        self.released = true;
        let buffers = [self.land.buffer, self.ocean.buffer, self.markers.buffer];
        let materials = [
            self.land.material,
            self.ocean.material,
            self.markers.core,
            self.markers.halo,
        ];
        let mut freed = 0;
        for buffer in buffers {
            freed += usize::from(device.release_buffer(buffer));
        }
        for material in materials {
            freed += usize::from(device.release_material(material));
        }
        tracing::debug!(freed, "released render resources");
        freed
    }
}

impl Drop for RenderResources {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!("render resources dropped without release; device memory leaked");
        }
    }
}
