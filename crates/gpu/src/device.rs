use bytemuck::{Pod, Zeroable};
use foundation::Handle;

use crate::color::Rgba;
use crate::surface::SurfaceSize;
use crate::view::View;

/// One point in a vertex buffer, laid out as it is uploaded.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) Handle);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub(crate) Handle);

/// How one point is splatted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlyphShape {
    /// Size-attenuated square sprite, at least one pixel wide.
    Square,
    /// Disc standing in for a small sphere; `size` is its world radius.
    Disc,
}

/// Point or glyph material. `size` is the point size for dot layers and the
/// sphere radius for marker glyphs, both in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Rgba,
    pub size: f32,
    pub opacity: f32,
    pub shape: GlyphShape,
}

/// Material as bound at group 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Straight-alpha color with the opacity folded into alpha.
    pub color: [f32; 4],
    pub size: f32,
    pub shape: u32,
    pub _pad: [f32; 2],
}

impl Material {
    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b, a] = self.color.to_f32();
        MaterialUniform {
            color: [r, g, b, a * self.opacity.clamp(0.0, 1.0)],
            size: self.size,
            shape: match self.shape {
                GlyphShape::Square => 0,
                GlyphShape::Disc => 1,
            },
            _pad: [0.0; 2],
        }
    }
}

/// One instanced draw: every vertex of `buffer` splatted with `material`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub buffer: BufferHandle,
    pub material: MaterialHandle,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DeviceStats {
    pub live_buffers: usize,
    pub live_materials: usize,
    /// Buffers created over the device lifetime.
    pub buffer_allocations: u64,
    /// Materials created over the device lifetime.
    pub material_allocations: u64,
    pub resident_bytes: usize,
    /// Frames submitted.
    pub frames: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Adapter(String),
    Device(String),
    Surface(String),
    Readback(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Adapter(msg) => write!(f, "no usable GPU adapter: {msg}"),
            RenderError::Device(msg) => write!(f, "device request failed: {msg}"),
            RenderError::Surface(msg) => write!(f, "surface error: {msg}"),
            RenderError::Readback(msg) => write!(f, "pixel readback failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Owner of every render allocation.
///
/// Buffers and materials are addressed by handles so every allocation and
/// release is explicit. Updating a material never touches its buffers.
pub trait RenderDevice: std::fmt::Debug {
    fn create_vertex_buffer(&mut self, label: &str, vertices: &[PointVertex]) -> BufferHandle;

    fn vertex_count(&self, handle: BufferHandle) -> Option<u32>;

    /// Returns `false` for a stale handle.
    fn release_buffer(&mut self, handle: BufferHandle) -> bool;

    fn create_material(&mut self, label: &str, material: Material) -> MaterialHandle;

    fn material(&self, handle: MaterialHandle) -> Option<Material>;

    /// Overwrite a material in place. Returns `false` for a stale handle.
    fn write_material(&mut self, handle: MaterialHandle, material: Material) -> bool;

    fn release_material(&mut self, handle: MaterialHandle) -> bool;

    fn resize_target(&mut self, size: SurfaceSize);

    /// Clear the target and issue `calls` in order.
    fn draw(&mut self, view: &View, calls: &[DrawCall]) -> Result<(), RenderError>;

    /// Row-major premultiplied RGBA8 of the last frame, when the target can
    /// be read back.
    fn read_pixels(&mut self) -> Result<Option<Vec<u8>>, RenderError> {
        Ok(None)
    }

    fn stats(&self) -> DeviceStats;

    /// Drop pipelines and the render target. Live buffers stay counted.
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::{GlyphShape, Material};
    use crate::color::Rgba;
    use pretty_assertions::assert_eq;

    #[test]
    fn uniform_folds_opacity_into_alpha() {
        let halo = Material {
            color: Rgba::rgb(255, 0, 51),
            size: 7.0,
            opacity: 0.18,
            shape: GlyphShape::Disc,
        };
        let u = halo.uniform();
        assert_eq!(u.color, [1.0, 0.0, 0.2, 0.18]);
        assert_eq!((u.size, u.shape), (7.0, 1));
        assert_eq!(std::mem::size_of_val(&u), 32);
    }
}
