#[cfg(target_arch = "wasm32")]
mod imp {
    use std::cell::OnceCell;

    use gpu::{RenderError, SurfaceSize, WgpuDevice};
    use web_sys::HtmlCanvasElement;

    thread_local! {
        static INSTANCE: OnceCell<&'static ::wgpu::Instance> = const { OnceCell::new() };
    }

    /// A `wgpu::Surface` must not outlive its instance, so one instance is
    /// leaked and shared by every view on the page.
    fn instance() -> &'static ::wgpu::Instance {
        INSTANCE.with(|cell| {
            *cell.get_or_init(|| {
                Box::leak(Box::new(::wgpu::Instance::new(&::wgpu::InstanceDescriptor {
                    backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                    ..Default::default()
                })))
            })
        })
    }

    /// WebGPU when the browser has it, WebGL2 otherwise.
    pub async fn canvas_device(canvas: &HtmlCanvasElement, size: SurfaceSize) -> Result<WgpuDevice, RenderError> {
        let instance = instance();
        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        WgpuDevice::for_surface(instance, surface, size).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{RenderError, SurfaceSize, WgpuDevice};
    use web_sys::HtmlCanvasElement;

    pub async fn canvas_device(_canvas: &HtmlCanvasElement, _size: SurfaceSize) -> Result<WgpuDevice, RenderError> {
        Err(RenderError::Surface("canvas surfaces need a wasm32 target".into()))
    }
}

pub use imp::canvas_device;
