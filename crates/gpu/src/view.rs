use bytemuck::{Pod, Zeroable};
use foundation::math::{Mat3, PerspectiveCamera, Vec3};

use crate::surface::SurfaceSize;

/// Globe orientation and camera for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub rotation: Mat3,
    pub camera: PerspectiveCamera,
}

/// Per-frame uniform block, bound at group 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    /// Color target size in device pixels.
    pub viewport: [f32; 2],
    pub focal: f32,
    pub _pad: f32,
}

impl Globals {
    pub fn new(view: &View, size: SurfaceSize) -> Self {
        Self {
            view_proj: view_proj(view),
            viewport: [size.width as f32, size.height as f32],
            focal: view.camera.focal() as f32,
            _pad: 0.0,
        }
    }
}

/// Column-major `projection * translate(-eye) * rotation`, with clip z in
/// `[0, w]` as wgpu expects.
pub fn view_proj(view: &View) -> [[f32; 4]; 4] {
    let cam = &view.camera;
    let f = cam.focal();
    let a = cam.far / (cam.near - cam.far);
    let b = cam.near * cam.far / (cam.near - cam.far);
    let clip = |v: Vec3, w: f64| [f / cam.aspect * v.x, f * v.y, a * v.z + b * w, -v.z].map(|c| c as f32);
    let r = |axis: Vec3| view.rotation.transform(axis);
    [
        clip(r(Vec3::new(1.0, 0.0, 0.0)), 0.0),
        clip(r(Vec3::new(0.0, 1.0, 0.0)), 0.0),
        clip(r(Vec3::new(0.0, 0.0, 1.0)), 0.0),
        clip(Vec3::new(0.0, 0.0, -cam.distance), 1.0),
    ]
}
