use foundation::HandleArena;

use crate::device::{
    BufferHandle, DeviceStats, DrawCall, Material, MaterialHandle, PointVertex, RenderDevice, RenderError,
};
use crate::surface::SurfaceSize;
use crate::view::View;

/// Device that keeps uploads in memory and records draws instead of
/// submitting them. Used where no adapter is available.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    buffers: HandleArena<Vec<PointVertex>>,
    materials: HandleArena<Material>,
    buffer_allocations: u64,
    material_allocations: u64,
    resident_bytes: usize,
    frames: u64,
    target: Option<SurfaceSize>,
    last_frame: Vec<DrawCall>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self, handle: BufferHandle) -> Option<&[PointVertex]> {
        self.buffers.get(handle.0).map(Vec::as_slice)
    }

    /// Calls of the most recent [`RenderDevice::draw`].
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn target(&self) -> Option<SurfaceSize> {
        self.target
    }
}

impl RenderDevice for RecordingDevice {
    fn create_vertex_buffer(&mut self, _label: &str, vertices: &[PointVertex]) -> BufferHandle {
        self.buffer_allocations += 1;
        self.resident_bytes += bytemuck::cast_slice::<PointVertex, u8>(vertices).len();
        BufferHandle(self.buffers.insert(vertices.to_vec()))
    }

    fn vertex_count(&self, handle: BufferHandle) -> Option<u32> {
        self.buffers.get(handle.0).map(|v| v.len() as u32)
    }

    fn release_buffer(&mut self, handle: BufferHandle) -> bool {
        match self.buffers.remove(handle.0) {
            Some(vertices) => {
                self.resident_bytes -= std::mem::size_of_val(vertices.as_slice());
                true
            }
            None => false,
        }
    }

    fn create_material(&mut self, _label: &str, material: Material) -> MaterialHandle {
        self.material_allocations += 1;
        MaterialHandle(self.materials.insert(material))
    }

    fn material(&self, handle: MaterialHandle) -> Option<Material> {
        self.materials.get(handle.0).copied()
    }

    fn write_material(&mut self, handle: MaterialHandle, material: Material) -> bool {
        match self.materials.get_mut(handle.0) {
            Some(slot) => {
                *slot = material;
                true
            }
            None => false,
        }
    }

    fn release_material(&mut self, handle: MaterialHandle) -> bool {
        self.materials.remove(handle.0).is_some()
    }

    fn resize_target(&mut self, size: SurfaceSize) {
        self.target = Some(size);
    }

    fn draw(&mut self, _view: &View, calls: &[DrawCall]) -> Result<(), RenderError> {
        if self.target.is_none() {
            return Err(RenderError::Surface("no render target".into()));
        }
        self.last_frame = calls.to_vec();
        self.frames += 1;
        Ok(())
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats {
            live_buffers: self.buffers.len(),
            live_materials: self.materials.len(),
            buffer_allocations: self.buffer_allocations,
            material_allocations: self.material_allocations,
            resident_bytes: self.resident_bytes,
            frames: self.frames,
        }
    }

    fn shutdown(&mut self) {
        self.target = None;
        self.last_frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingDevice;
    use crate::color::Rgba;
    use crate::device::{GlyphShape, Material, PointVertex, RenderDevice};
    use pretty_assertions::assert_eq;

    fn verts(n: usize) -> Vec<PointVertex> {
        (0..n)
            .map(|i| PointVertex {
                position: [i as f32, 0.0, 0.0],
            })
            .collect()
    }

    #[test]
    fn tracks_resident_bytes() {
        let mut device = RecordingDevice::new();
        let a = device.create_vertex_buffer("a", &verts(10));
        let b = device.create_vertex_buffer("b", &verts(5));
        assert_eq!(device.stats().resident_bytes, 15 * 12);
        assert!(device.release_buffer(a));
        assert_eq!(device.stats().resident_bytes, 5 * 12);
        assert!(!device.release_buffer(a));
        assert_eq!(device.vertex_count(b), Some(5));
        assert_eq!(device.vertices(b).map(|v| v[4].position), Some([4.0, 0.0, 0.0]));
        assert_eq!(device.stats().buffer_allocations, 2);
        assert_eq!(device.stats().live_buffers, 1);
    }

    #[test]
    fn materials_are_written_in_place() {
        let mut device = RecordingDevice::new();
        let land = Material {
            color: Rgba::rgb(1, 2, 3),
            size: 2.2,
            opacity: 0.92,
            shape: GlyphShape::Square,
        };
        let m = device.create_material("land", land);
        assert!(device.write_material(
            m,
            Material {
                color: Rgba::rgb(4, 5, 6),
                ..land
            }
        ));
        assert_eq!(device.material(m).map(|m| m.color), Some(Rgba::rgb(4, 5, 6)));
        assert_eq!(device.stats().material_allocations, 1);
        assert!(device.release_material(m));
        assert!(device.material(m).is_none());
        assert!(!device.write_material(m, land));
    }
}
