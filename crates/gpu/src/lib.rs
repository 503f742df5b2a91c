//! Render-side resources for the globe.
//!
//! A [`RenderDevice`] owns vertex buffers and point materials addressed by
//! handles, so every allocation and release is explicit and observable.
//! [`WgpuDevice`] draws them with wgpu, either to a canvas surface or to an
//! offscreen texture; [`RecordingDevice`] keeps them in memory and records
//! the draw calls instead.

pub mod color;
pub mod device;
pub mod recording;
pub mod resources;
pub mod surface;
pub mod view;
pub mod wgpu_device;

pub use color::*;
pub use device::*;
pub use recording::*;
pub use resources::*;
pub use surface::*;
pub use view::*;
pub use wgpu_device::*;
