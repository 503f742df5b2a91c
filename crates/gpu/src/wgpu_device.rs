use std::borrow::Cow;

use foundation::HandleArena;
use wgpu::util::DeviceExt;

use crate::device::{
    BufferHandle, DeviceStats, DrawCall, Material, MaterialHandle, PointVertex, RenderDevice, RenderError,
};
use crate::surface::SurfaceSize;
use crate::view::{Globals, View};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Every point is an instanced quad. Squares are size-attenuated sprites at
/// least one pixel wide; discs are clipped to the unit circle and sized by
/// their world radius.
const POINT_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    viewport: vec2<f32>,
    focal: f32,
    _pad: f32,
};

struct Material {
    color: vec4<f32>,
    size: f32,
    shape: u32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> material: Material;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) corner: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vid: u32, @location(0) center: vec3<f32>) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let corner = corners[vid];
    let clip = globals.view_proj * vec4<f32>(center, 1.0);
    let depth = max(clip.w, 1e-6);

    var half_px: f32;
    if material.shape == 1u {
        half_px = material.size * globals.focal * 0.5 * globals.viewport.y / depth;
    } else {
        half_px = max(material.size * 0.5 * globals.viewport.y / depth, 1.0) * 0.5;
    }
    let offset = corner * half_px * 2.0 / globals.viewport;
    return VsOut(vec4<f32>(clip.xy + offset * clip.w, clip.z, clip.w), corner);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    if material.shape == 1u && dot(fs_in.corner, fs_in.corner) > 1.0 {
        discard;
    }
    return vec4<f32>(material.color.rgb * material.color.a, material.color.a);
}
"#;

#[derive(Debug)]
struct GpuBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    bytes: usize,
}

#[derive(Debug)]
struct GpuMaterial {
    material: Material,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

#[derive(Debug)]
struct Pipelines {
    points: wgpu::RenderPipeline,
    globals: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
}

#[derive(Debug)]
struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

/// [`RenderDevice`] backed by wgpu: a presentable surface in the browser, or
/// an offscreen texture that can be read back.
#[derive(Debug)]
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    material_layout: wgpu::BindGroupLayout,
    pipelines: Option<Pipelines>,
    surface: Option<SurfaceTarget>,
    offscreen: Option<wgpu::Texture>,
    depth: Option<wgpu::TextureView>,
    size: Option<SurfaceSize>,
    buffers: HandleArena<GpuBuffer>,
    materials: HandleArena<GpuMaterial>,
    buffer_allocations: u64,
    material_allocations: u64,
    resident_bytes: usize,
    frames: u64,
}

async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("globe-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
            ..Default::default()
        })
        .await
        .map_err(|e| RenderError::Device(e.to_string()))
}

fn uniform_layout(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_pipelines(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    material_layout: &wgpu::BindGroupLayout,
) -> Pipelines {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("globe-points-shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(POINT_SHADER)),
    });
    let globals_layout = uniform_layout(device, "globe-globals-bgl", wgpu::ShaderStages::VERTEX);
    let globals = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("globe-globals"),
        size: std::mem::size_of::<Globals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globe-globals-bg"),
        layout: &globals_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("globe-points-layout"),
        bind_group_layouts: &[&globals_layout, material_layout],
        immediate_size: 0,
    });
    let points = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("globe-points"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                }],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        // Halo and core share a center, so the second one must pass at equal depth.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });
    Pipelines {
        points,
        globals,
        globals_bind_group,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("globe-depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

impl WgpuDevice {
    fn new(device: wgpu::Device, queue: wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let material_layout = uniform_layout(&device, "globe-material-bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let pipelines = create_pipelines(&device, format, &material_layout);
        Self {
            device,
            queue,
            format,
            material_layout,
            pipelines: Some(pipelines),
            surface: None,
            offscreen: None,
            depth: None,
            size: None,
            buffers: HandleArena::new(),
            materials: HandleArena::new(),
            buffer_allocations: 0,
            material_allocations: 0,
            resident_bytes: 0,
            frames: 0,
        }
    }

    /// Device rendering into a texture that [`RenderDevice::read_pixels`] can copy out.
    pub async fn offscreen(instance: &wgpu::Instance) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::Adapter(e.to_string()))?;
        let (device, queue) = request_device(&adapter).await?;
        tracing::debug!(adapter = ?adapter.get_info().name, "offscreen device ready");
        Ok(Self::new(device, queue, OFFSCREEN_FORMAT))
    }

    /// Device presenting to `surface`, configured for `size`.
    pub async fn for_surface(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        size: SurfaceSize,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::Adapter(e.to_string()))?;
        let (device, queue) = request_device(&adapter).await?;

        let caps = surface.get_capabilities(&adapter);
        // Palette colors are already sRGB-encoded.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        tracing::debug!(?format, ?alpha_mode, "surface device ready");

        let mut this = Self::new(device, queue, format);
        this.surface = Some(SurfaceTarget { surface, config });
        this.resize_target(size);
        Ok(this)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl RenderDevice for WgpuDevice {
    fn create_vertex_buffer(&mut self, label: &str, vertices: &[PointVertex]) -> BufferHandle {
        let contents: &[u8] = bytemuck::cast_slice(vertices);
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.buffer_allocations += 1;
        self.resident_bytes += contents.len();
        BufferHandle(self.buffers.insert(GpuBuffer {
            buffer,
            count: vertices.len() as u32,
            bytes: contents.len(),
        }))
    }

    fn vertex_count(&self, handle: BufferHandle) -> Option<u32> {
        self.buffers.get(handle.0).map(|b| b.count)
    }

    fn release_buffer(&mut self, handle: BufferHandle) -> bool {
        match self.buffers.remove(handle.0) {
            Some(gpu) => {
                gpu.buffer.destroy();
                self.resident_bytes -= gpu.bytes;
                true
            }
            None => false,
        }
    }

    fn create_material(&mut self, label: &str, material: Material) -> MaterialHandle {
        let uniform = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&material.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        self.material_allocations += 1;
        MaterialHandle(self.materials.insert(GpuMaterial {
            material,
            uniform,
            bind_group,
        }))
    }

    fn material(&self, handle: MaterialHandle) -> Option<Material> {
        self.materials.get(handle.0).map(|m| m.material)
    }

    fn write_material(&mut self, handle: MaterialHandle, material: Material) -> bool {
        let Some(slot) = self.materials.get_mut(handle.0) else {
            return false;
        };
        slot.material = material;
        self.queue
            .write_buffer(&slot.uniform, 0, bytemuck::bytes_of(&material.uniform()));
        true
    }

    fn release_material(&mut self, handle: MaterialHandle) -> bool {
        match self.materials.remove(handle.0) {
            Some(gpu) => {
                gpu.uniform.destroy();
                true
            }
            None => false,
        }
    }

    fn resize_target(&mut self, size: SurfaceSize) {
        if self.pipelines.is_none() {
            return;
        }
        let max = self.device.limits().max_texture_dimension_2d;
        let (width, height) = (size.width.clamp(1, max), size.height.clamp(1, max));
        if self.size.is_some_and(|s| (s.width, s.height) == (width, height)) {
            return;
        }
        match &mut self.surface {
            Some(target) => {
                target.config.width = width;
                target.config.height = height;
                target.surface.configure(&self.device, &target.config);
            }
            None => {
                if let Some(old) = self.offscreen.take() {
                    old.destroy();
                }
                self.offscreen = Some(self.device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("globe-color"),
                    size: wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                    view_formats: &[],
                }));
            }
        }
        self.depth = Some(create_depth_view(&self.device, width, height));
        self.size = Some(SurfaceSize {
            width,
            height,
            pixel_ratio: size.pixel_ratio,
        });
    }

    fn draw(&mut self, view: &View, calls: &[DrawCall]) -> Result<(), RenderError> {
        let (Some(pipelines), Some(depth), Some(size)) = (&self.pipelines, &self.depth, self.size) else {
            return Err(RenderError::Surface("no render target".into()));
        };
        let frame = match &self.surface {
            Some(target) => match target.surface.get_current_texture() {
                Ok(frame) => Some(frame),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    target.surface.configure(&self.device, &target.config);
                    tracing::debug!("surface reconfigured; frame skipped");
                    return Ok(());
                }
                Err(err) => return Err(RenderError::Surface(err.to_string())),
            },
            None => None,
        };
        let color_view = match (&frame, &self.offscreen) {
            (Some(frame), _) => frame.texture.create_view(&wgpu::TextureViewDescriptor::default()),
            (None, Some(texture)) => texture.create_view(&wgpu::TextureViewDescriptor::default()),
            (None, None) => return Err(RenderError::Surface("no render target".into())),
        };

        self.queue
            .write_buffer(&pipelines.globals, 0, bytemuck::bytes_of(&Globals::new(view, size)));
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("globe-frame"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe-points-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&pipelines.points);
            pass.set_bind_group(0, &pipelines.globals_bind_group, &[]);
            for call in calls {
                let (Some(buffer), Some(material)) = (self.buffers.get(call.buffer.0), self.materials.get(call.material.0))
                else {
                    continue;
                };
                if buffer.count == 0 {
                    continue;
                }
                pass.set_bind_group(1, &material.bind_group, &[]);
                pass.set_vertex_buffer(0, buffer.buffer.slice(..));
                pass.draw(0..6, 0..buffer.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        if let Some(frame) = frame {
            frame.present();
        }
        self.frames += 1;
        Ok(())
    }

    fn read_pixels(&mut self) -> Result<Option<Vec<u8>>, RenderError> {
        let (Some(texture), Some(size)) = (&self.offscreen, self.size) else {
            return Ok(None);
        };
        let row = size.width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = row.div_ceil(align) * align;
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globe-readback"),
            size: padded_row as u64 * size.height as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("globe-readback"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(size.height),
                },
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            if tx.send(result).is_err() {
                tracing::debug!("readback receiver gone");
            }
        });
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| RenderError::Readback(e.to_string()))?;
        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(RenderError::Readback(err.to_string())),
            Err(err) => return Err(RenderError::Readback(err.to_string())),
        }

        let mut pixels = Vec::with_capacity(row as usize * size.height as usize);
        {
            let mapped = slice.get_mapped_range();
            for padded in mapped.chunks(padded_row as usize) {
                pixels.extend_from_slice(&padded[..row as usize]);
            }
        }
        staging.unmap();
        staging.destroy();
        Ok(Some(pixels))
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
        self.pipelines = None;
        self.depth = None;
        if let Some(texture) = self.offscreen.take() {
            texture.destroy();
        }
        self.surface = None;
        self.size = None;
        tracing::debug!(
            live_buffers = self.buffers.len(),
            live_materials = self.materials.len(),
            "wgpu device shut down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::WgpuDevice;
    use crate::color::Rgba;
    use crate::device::RenderDevice;
    use crate::resources::{PointPalette, PointStyles, RenderResources, SceneGeometry};
    use crate::surface::SurfaceSize;
    use crate::view::View;
    use foundation::math::{Mat3, PerspectiveCamera, Vec3};
    use pretty_assertions::assert_eq;

    fn noop_device() -> Option<WgpuDevice> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::NOOP,
            backend_options: wgpu::BackendOptions {
                noop: wgpu::NoopBackendOptions { enable: true },
                ..Default::default()
            },
            ..Default::default()
        });
        match pollster::block_on(WgpuDevice::offscreen(&instance)) {
            Ok(device) => Some(device),
            Err(err) => {
                eprintln!("skipping: {err}");
                None
            }
        }
    }

    fn palette(land: Rgba) -> PointPalette {
        PointPalette {
            land,
            ocean: Rgba::rgb(0xa0, 0xb8, 0xd0),
            marker: Rgba::rgb(0x63, 0x66, 0xf1),
        }
    }

    fn resources(device: &mut WgpuDevice) -> RenderResources {
        let land = [Vec3::new(0.0, 0.0, 260.0)];
        let ocean = [Vec3::new(0.0, 0.0, -260.0)];
        let markers = [Vec3::new(0.0, 0.0, 263.0)];
        let geometry = SceneGeometry {
            land: &land,
            ocean: &ocean,
            markers: &markers,
        };
        RenderResources::create(
            device,
            &geometry,
            &PointStyles::default(),
            &palette(Rgba::rgb(0x1a, 0x1a, 0x2e)),
        )
    }

    fn view() -> View {
        View {
            rotation: Mat3::IDENTITY,
            camera: PerspectiveCamera::new(750.0, 45f64.to_radians(), 1.0, 1.0, 2000.0).unwrap(),
        }
    }

    #[test]
    fn each_layer_gets_its_own_buffer() {
        let Some(mut device) = noop_device() else {
            return;
        };
        let res = resources(&mut device);
        let stats = device.stats();
        assert_eq!((stats.live_buffers, stats.live_materials), (3, 4));
        assert_eq!(stats.resident_bytes, 3 * 12);
        assert_ne!(res.land().buffer, res.ocean().buffer);
        assert_eq!(device.vertex_count(res.markers().buffer), Some(1));
        res.release(&mut device);
    }

    #[test]
    fn recolor_writes_uniforms_without_allocating() {
        let Some(mut device) = noop_device() else {
            return;
        };
        let res = resources(&mut device);
        let before = device.stats();
        assert_eq!(res.recolor(&mut device, &palette(Rgba::rgb(0xe8, 0xe8, 0xf0))), 4);
        assert_eq!(device.stats(), before);
        assert_eq!(
            device.material(res.land().material).map(|m| m.color),
            Some(Rgba::rgb(0xe8, 0xe8, 0xf0))
        );
        res.release(&mut device);
    }

    #[test]
    fn frame_reads_back_at_target_size() {
        let Some(mut device) = noop_device() else {
            return;
        };
        device.resize_target(SurfaceSize::new(70.0, 30.0, 1.0).unwrap());
        let res = resources(&mut device);
        let drawn = res.draw(&mut device, &view()).unwrap();
        assert_eq!((drawn.points, drawn.glyphs), (2, 2));
        let pixels = device.read_pixels().unwrap().unwrap();
        assert_eq!(pixels.len(), 70 * 30 * 4);
        assert_eq!(device.stats().frames, 1);
        res.release(&mut device);
    }

    #[test]
    fn release_and_shutdown_leave_nothing_live() {
        let Some(mut device) = noop_device() else {
            return;
        };
        device.resize_target(SurfaceSize::new(10.0, 10.0, 1.0).unwrap());
        let res = resources(&mut device);
        assert_eq!(res.release(&mut device), 7);
        device.shutdown();
        let stats = device.stats();
        assert_eq!((stats.live_buffers, stats.live_materials, stats.resident_bytes), (0, 0, 0));
        assert!(device.draw(&view(), &[]).is_err());
        assert_eq!(device.read_pixels(), Ok(None));
    }
}
