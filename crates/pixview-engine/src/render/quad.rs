use anyhow::anyhow;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::loader::ImageData;

use super::surface::{Color, PaintSurface, ProgramError, TextureFilter};

/// Uniform block shared by both shader stages.
///
/// Matrix is column-major; the trailing pad keeps the struct at a 16-byte
/// multiple as WGSL uniform layout requires.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadUniforms {
    model_view_projection_matrix: [f32; 16],
    image_aspect_ratio: f32,
    _pad: [f32; 3],
}

impl QuadUniforms {
    fn identity() -> Self {
        let mut matrix = [0.0; 16];
        for i in 0..4 {
            matrix[i * 4 + i] = 1.0;
        }
        Self {
            model_view_projection_matrix: matrix,
            image_aspect_ratio: 1.0,
            _pad: [0.0; 3],
        }
    }
}

/// wgpu implementation of [`PaintSurface`]: one pipeline, one quad vertex
/// buffer, one bound texture, one uniform buffer.
///
/// Uniform writes are shadowed on the CPU and flushed lazily at draw time so
/// repeated state changes between frames cost one buffer write.
pub struct QuadSurface<'w> {
    gpu: Gpu<'w>,

    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    uniform_buffer: Option<wgpu::Buffer>,

    vertex_buffer: Option<wgpu::Buffer>,

    /// Bound image texture. Replaced wholesale on upload; the previous
    /// texture is dropped, not cached.
    texture: Option<wgpu::Texture>,
    texture_view: Option<wgpu::TextureView>,

    sampler_nearest: wgpu::Sampler,
    sampler_linear: wgpu::Sampler,
    filter: TextureFilter,

    bind_group: Option<wgpu::BindGroup>,

    uniforms: QuadUniforms,
    uniforms_dirty: bool,
    clear_color: Color,
}

impl<'w> QuadSurface<'w> {
    pub fn new(gpu: Gpu<'w>) -> Self {
        let sampler_nearest = create_sampler(gpu.device(), wgpu::FilterMode::Nearest);
        let sampler_linear = create_sampler(gpu.device(), wgpu::FilterMode::Linear);

        Self {
            gpu,
            pipeline: None,
            bind_group_layout: None,
            uniform_buffer: None,
            vertex_buffer: None,
            texture: None,
            texture_view: None,
            sampler_nearest,
            sampler_linear,
            filter: TextureFilter::default(),
            bind_group: None,
            uniforms: QuadUniforms::identity(),
            uniforms_dirty: true,
            clear_color: Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Rebuilds the bind group from the current texture + sampler selection.
    ///
    /// A bind group exists only once both the program and a texture do.
    fn rebuild_bind_group(&mut self) {
        let (Some(layout), Some(ubo), Some(view)) = (
            self.bind_group_layout.as_ref(),
            self.uniform_buffer.as_ref(),
            self.texture_view.as_ref(),
        ) else {
            self.bind_group = None;
            return;
        };

        let sampler = match self.filter {
            TextureFilter::Nearest => &self.sampler_nearest,
            TextureFilter::Linear => &self.sampler_linear,
        };

        self.bind_group = Some(self.gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixview quad bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    /// Runs `build` inside a wgpu validation error scope and returns the
    /// captured diagnostic, if any.
    fn validation_scope<T>(&self, build: impl FnOnce(&wgpu::Device) -> T) -> (T, Option<String>) {
        let device = self.gpu.device();
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = build(device);
        let error = pollster::block_on(scope.pop());
        (value, error.map(|e| e.to_string()))
    }
}

impl PaintSurface for QuadSurface<'_> {
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<(), ProgramError> {
        // Stage 1: shader modules. wgpu reports WGSL rejection through the
        // validation error scope, not the create call.
        let ((vertex_module, fragment_module), compile_error) =
            self.validation_scope(|device| {
                let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("pixview quad vs"),
                    source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
                });
                let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("pixview quad fs"),
                    source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
                });
                (vs, fs)
            });
        if let Some(diagnostic) = compile_error {
            return Err(ProgramError::Compile { diagnostic });
        }

        // Stage 2: layout + pipeline ("link").
        let surface_format = self.gpu.surface_format();
        let ((bind_group_layout, pipeline), link_error) = self.validation_scope(|device| {
            let bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("pixview quad bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<QuadUniforms>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

            let pipeline_layout =
                device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("pixview quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("pixview quad pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vertex_module,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: (2 * std::mem::size_of::<f32>()) as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                    }],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment_module,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        // Opaque quad over a cleared backdrop: no blending.
                        blend: None,
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

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

            (bind_group_layout, pipeline)
        });
        if let Some(diagnostic) = link_error {
            return Err(ProgramError::Link { diagnostic });
        }

        let uniform_buffer = self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixview quad ubo"),
            size: std::mem::size_of::<QuadUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.uniform_buffer = Some(uniform_buffer);
        self.uniforms_dirty = true;
        self.rebuild_bind_group();
        Ok(())
    }

    fn upload_vertices(&mut self, vertices: &[f32]) {
        self.vertex_buffer = Some(self.gpu.device().create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("pixview quad vbo"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
    }

    fn upload_image(&mut self, image: &ImageData) {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("pixview image texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.gpu.queue().write_texture(
            texture.as_image_copy(),
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Replacing the Options drops the previous texture handle.
        self.texture = Some(texture);
        self.texture_view = Some(view);
        self.rebuild_bind_group();
    }

    fn set_magnification_filter(&mut self, filter: TextureFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.rebuild_bind_group();
    }

    fn set_transform(&mut self, matrix: [f32; 16]) {
        self.uniforms.model_view_projection_matrix = matrix;
        self.uniforms_dirty = true;
    }

    fn set_image_aspect_ratio(&mut self, ratio: f32) {
        self.uniforms.image_aspect_ratio = ratio;
        self.uniforms_dirty = true;
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> anyhow::Result<()> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        Err(anyhow!("GPU surface is out of memory"))
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("skipping frame after transient surface error");
                        Ok(())
                    }
                };
            }
        };

        if self.uniforms_dirty {
            if let Some(ubo) = self.uniform_buffer.as_ref() {
                self.gpu
                    .queue()
                    .write_buffer(ubo, 0, bytemuck::bytes_of(&self.uniforms));
                self.uniforms_dirty = false;
            }
        }

        // Render pass is scoped so the encoder is free again for submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pixview quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.clear_color.r,
                            g: self.clear_color.g,
                            b: self.clear_color.b,
                            a: self.clear_color.a,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let (Some(pipeline), Some(bind_group), Some(vbo)) = (
                self.pipeline.as_ref(),
                self.bind_group.as_ref(),
                self.vertex_buffer.as_ref(),
            ) {
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, bind_group, &[]);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..vertex_count, 0..1);
            }
        }

        self.gpu.submit(frame);
        Ok(())
    }

    fn viewport_size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(PhysicalSize::new(width, height));
    }
}

fn create_sampler(device: &wgpu::Device, mag_filter: wgpu::FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("pixview image sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}
