#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use starfield::{PointField, PointMaterial};
    use std::borrow::Cow;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    #[derive(Debug)]
    pub struct StarContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub _canvas: web_sys::HtmlCanvasElement,
        pub pipeline: ::wgpu::RenderPipeline,
        pub globals_buffer: ::wgpu::Buffer,
        pub globals_bind_group: ::wgpu::BindGroup,
        pub star_buffer: Option<::wgpu::Buffer>,
        pub star_count: u32,
        pub size_scale: f32,
    }

    // One screen-aligned quad per star, expanded in the vertex shader from
    // the instance center. WebGPU points are always one pixel, so point
    // sprites have to be quads.
    const STARS_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    resolution: vec2<f32>,
    size_scale: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<storage, read> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) color: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vid: u32,
    @location(0) center: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec3<f32>,
) -> VsOut {
    var corners = array<vec2<f32>, 4>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, 1.0),
    );
    let corner = corners[vid];

    var clip = globals.view_proj * vec4<f32>(center, 1.0);
    // Size attenuation against the reference camera distance.
    let dist = max(clip.w, 1.0);
    let size_px = size * globals.size_scale * (130.0 / dist);
    let ndc_offset = corner * size_px / globals.resolution;
    clip = vec4<f32>(clip.xy + ndc_offset * clip.w, clip.zw);

    return VsOut(clip, corner, color);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    // Circular sprite with a softened rim; blending is additive so
    // overlapping stars brighten instead of occluding.
    let d = length(in.corner);
    let alpha = 1.0 - smoothstep(0.55, 1.0, d);
    if alpha <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color * alpha, alpha);
}
"#;

    #[repr(C)]
    #[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct StarInstance {
        center: [f32; 3],
        size: f32,
        color: [f32; 3],
        _pad: f32,
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Globals {
        view_proj: [[f32; 4]; 4],
        resolution: [f32; 2],
        size_scale: f32,
        _pad: f32,
    }

    const ADDITIVE_BLEND: ::wgpu::BlendState = ::wgpu::BlendState {
        color: ::wgpu::BlendComponent {
            src_factor: ::wgpu::BlendFactor::One,
            dst_factor: ::wgpu::BlendFactor::One,
            operation: ::wgpu::BlendOperation::Add,
        },
        alpha: ::wgpu::BlendComponent {
            src_factor: ::wgpu::BlendFactor::One,
            dst_factor: ::wgpu::BlendFactor::One,
            operation: ::wgpu::BlendOperation::Add,
        },
    };

    pub async fn init_stars_from_canvas_id(canvas_id: &str) -> Result<StarContext, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document missing"))?;
        let canvas_elem = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas missing"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let width = canvas_elem.width();
        let height = canvas_elem.height();

        // IMPORTANT: `wgpu::Surface` must not outlive its `wgpu::Instance`.
        // To avoid UB, we leak the instance for the lifetime of the app.
        //
        // Prefer WebGPU when available, but allow WebGL as a fallback.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("starglobe-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .cloned()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("starglobe-stars-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(STARS_SHADER)),
        });

        let globals_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("starglobe-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::STORAGE | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group_layout =
            device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                label: Some("starglobe-globals-bgl"),
                entries: &[::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let globals_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("starglobe-globals-bg"),
            layout: &globals_bind_group_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("starglobe-pipeline-layout"),
            bind_group_layouts: &[&globals_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("starglobe-stars-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StarInstance>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Instance,
                    attributes: &[
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32,
                            offset: 12,
                            shader_location: 1,
                        },
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 16,
                            shader_location: 2,
                        },
                    ],
                }],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(ADDITIVE_BLEND),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Depthless: the sky is painted back to front by construction and
            // additive blending makes ordering irrelevant.
            depth_stencil: None,
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(StarContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas_elem,
            pipeline,
            globals_buffer,
            globals_bind_group,
            star_buffer: None,
            star_count: 0,
            size_scale: 1.0,
        })
    }

    /// Replaces the instance buffer with a freshly packed field. The previous
    /// buffer is destroyed first so rebuilds never double GPU memory.
    pub fn set_star_field(ctx: &mut StarContext, field: &PointField, material: &PointMaterial) {
        if let Some(old) = ctx.star_buffer.take() {
            old.destroy();
        }
        ctx.size_scale = material.inflated_size(1.0);

        if field.is_empty() {
            ctx.star_count = 0;
            return;
        }

        let mut instances = Vec::with_capacity(field.len());
        for i in 0..field.len() {
            instances.push(StarInstance {
                center: [
                    field.positions[i * 3],
                    field.positions[i * 3 + 1],
                    field.positions[i * 3 + 2],
                ],
                size: field.sizes[i],
                color: [
                    field.colors[i * 3],
                    field.colors[i * 3 + 1],
                    field.colors[i * 3 + 2],
                ],
                _pad: 0.0,
            });
        }

        ctx.star_buffer = Some(ctx.device.create_buffer_init(
            &::wgpu::util::BufferInitDescriptor {
                label: Some("starglobe-instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: ::wgpu::BufferUsages::VERTEX,
            },
        ));
        ctx.star_count = field.len() as u32;
    }

    pub fn resize_stars(ctx: &mut StarContext, width: u32, height: u32) {
        ctx.config.width = width.max(1);
        ctx.config.height = height.max(1);
        ctx.surface.configure(&ctx.device, &ctx.config);
    }

    pub fn render_stars(ctx: &StarContext, view_proj: [[f32; 4]; 4]) -> Result<(), JsValue> {
        let frame = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        let globals = Globals {
            view_proj,
            resolution: [ctx.config.width.max(1) as f32, ctx.config.height.max(1) as f32],
            size_scale: ctx.size_scale,
            _pad: 0.0,
        };
        ctx.queue
            .write_buffer(&ctx.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("starglobe-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("starglobe-stars-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &ctx.star_buffer
                && ctx.star_count > 0
            {
                rpass.set_pipeline(&ctx.pipeline);
                rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..4, 0..ctx.star_count);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use starfield::{PointField, PointMaterial};
    use wasm_bindgen::prelude::JsValue;

    #[derive(Debug, Default)]
    pub struct StarContext;

    pub async fn init_stars_from_canvas_id(_canvas_id: &str) -> Result<StarContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn set_star_field(_ctx: &mut StarContext, _field: &PointField, _material: &PointMaterial) {}

    pub fn resize_stars(_ctx: &mut StarContext, _width: u32, _height: u32) {}

    pub fn render_stars(_ctx: &StarContext, _view_proj: [[f32; 4]; 4]) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{StarContext, init_stars_from_canvas_id, render_stars, resize_stars, set_star_field};
