//! wgpu renderer shared by the native and web frontends.
//!
//! Consumes `FrameOutput` and never touches animation state. Draw order:
//! ornaments and photo panels (opaque, depth write), then lights and foliage
//! (blended, depth test only).

use crate::buffers::{FoliagePoint, InstanceRaw, SceneUniforms};
use crate::constants::{srgb_to_linear, BACKGROUND};
use crate::frame::FrameOutput;
use crate::scene::Scene;
use thiserror::Error;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const QUAD_VERTICES: u32 = 6;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no usable format or alpha mode")]
    UnsupportedSurface,
    #[error("failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

impl RenderError {
    /// Lost or outdated surfaces recover with `Renderer::reconfigure`.
    pub fn needs_reconfigure(&self) -> bool {
        matches!(
            self,
            RenderError::Frame(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
        )
    }

    /// Anything but a per-frame hiccup ends the render loop.
    pub fn is_fatal(&self) -> bool {
        match self {
            RenderError::Frame(e) => matches!(e, wgpu::SurfaceError::OutOfMemory),
            _ => true,
        }
    }
}

/// First sRGB format the surface offers, else whatever it lists first.
pub fn preferred_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
            )
        })
        .or_else(|| formats.first().copied())
}

/// Fixed per-category instance counts; they never change during a session.
#[derive(Clone, Copy, Debug)]
pub struct InstanceCapacity {
    pub ornaments: usize,
    pub lights: usize,
    pub photos: usize,
}

impl InstanceCapacity {
    pub fn for_scene(scene: &Scene) -> Self {
        Self {
            ornaments: scene.ornaments.len(),
            lights: scene.lights.len(),
            photos: scene.photos.len(),
        }
    }
}

struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<InstanceRaw>() * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    /// Uploads up to `capacity` instances and returns how many to draw.
    fn upload(&self, queue: &wgpu::Queue, instances: &[InstanceRaw]) -> u32 {
        let n = instances.len().min(self.capacity);
        if n > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances[..n]));
        }
        n as u32
    }
}

pub struct Renderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    foliage_pipeline: wgpu::RenderPipeline,
    foliage_vb: wgpu::Buffer,
    foliage_count: u32,

    ornament_pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    panel_pipeline: wgpu::RenderPipeline,
    ornament_vb: InstanceBuffer,
    light_vb: InstanceBuffer,
    photo_vb: InstanceBuffer,

    clear_color: wgpu::Color,
}

impl<'w> Renderer<'w> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        foliage: &[FoliagePoint],
        capacity: InstanceCapacity,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps.formats).ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let foliage_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("foliage_shader"),
            source: wgpu::ShaderSource::Wgsl(
                format!("{}\n{}", crate::COMMON_WGSL, crate::FOLIAGE_WGSL).into(),
            ),
        });
        let instance_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("instance_shader"),
            source: wgpu::ShaderSource::Wgsl(
                format!("{}\n{}", crate::COMMON_WGSL, crate::INSTANCE_WGSL).into(),
            ),
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let foliage_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FoliagePoint>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };
        let foliage_pipeline = create_pipeline(
            &device,
            PipelineSpec {
                label: "foliage_pipeline",
                layout: &layout,
                module: &foliage_shader,
                vs: "vs_main",
                fs: "fs_main",
                buffer: foliage_layout,
                format,
                blend: additive,
                depth_write: false,
            },
        );
        let ornament_pipeline = create_pipeline(
            &device,
            PipelineSpec {
                label: "ornament_pipeline",
                layout: &layout,
                module: &instance_shader,
                vs: "vs_sphere",
                fs: "fs_sphere_lit",
                buffer: instance_layout(),
                format,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let light_pipeline = create_pipeline(
            &device,
            PipelineSpec {
                label: "light_pipeline",
                layout: &layout,
                module: &instance_shader,
                vs: "vs_sphere",
                fs: "fs_sphere_glow",
                buffer: instance_layout(),
                format,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
            },
        );
        let panel_pipeline = create_pipeline(
            &device,
            PipelineSpec {
                label: "panel_pipeline",
                layout: &layout,
                module: &instance_shader,
                vs: "vs_panel",
                fs: "fs_panel",
                buffer: instance_layout(),
                format,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );

        // Foliage positions are uploaded once and never rewritten.
        let foliage_placeholder = FoliagePoint::default();
        let foliage_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("foliage_vb"),
            contents: if foliage.is_empty() {
                bytemuck::bytes_of(&foliage_placeholder)
            } else {
                bytemuck::cast_slice(foliage)
            },
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ornament_vb = InstanceBuffer::new(&device, "ornament_vb", capacity.ornaments);
        let light_vb = InstanceBuffer::new(&device, "light_vb", capacity.lights);
        let photo_vb = InstanceBuffer::new(&device, "photo_vb", capacity.photos);

        let [r, g, b] = srgb_to_linear(BACKGROUND);
        log::info!(
            "[gpu] renderer ready: {}x{} {:?}, {} foliage points",
            config.width,
            config.height,
            format,
            foliage.len()
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            uniform_buffer,
            bind_group,
            foliage_pipeline,
            foliage_vb,
            foliage_count: foliage.len() as u32,
            ornament_pipeline,
            light_pipeline,
            panel_pipeline,
            ornament_vb,
            light_vb,
            photo_vb,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Reconfigure after a frame error where `needs_reconfigure` holds.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameOutput<'_>) -> Result<(), RenderError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.uniforms));
        let ornaments = self.ornament_vb.upload(&self.queue, frame.ornaments);
        let lights = self.light_vb.upload(&self.queue, frame.lights);
        let photos = self.photo_vb.upload(&self.queue, frame.photos);
        let foliage = frame.foliage_count.min(self.foliage_count);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            let passes = [
                (&self.ornament_pipeline, &self.ornament_vb.buffer, ornaments),
                (&self.panel_pipeline, &self.photo_vb.buffer, photos),
                (&self.light_pipeline, &self.light_vb.buffer, lights),
                (&self.foliage_pipeline, &self.foliage_vb, foliage),
            ];
            for (pipeline, buffer, count) in passes {
                if count == 0 {
                    continue;
                }
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..QUAD_VERTICES, 0..count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x4,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    module: &'a wgpu::ShaderModule,
    vs: &'a str,
    fs: &'a str,
    buffer: wgpu::VertexBufferLayout<'a>,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
    depth_write: bool,
}

fn create_pipeline(device: &wgpu::Device, spec: PipelineSpec<'_>) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(spec.layout),
        vertex: wgpu::VertexState {
            module: spec.module,
            entry_point: Some(spec.vs),
            buffers: &[spec.buffer],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: spec.module,
            entry_point: Some(spec.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
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
