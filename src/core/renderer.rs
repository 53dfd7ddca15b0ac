//! wgpu scene drawer: one shared unit line segment, one draw call per
//! grid line with a per-line model/color uniform slot.

use std::mem;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::core::grid::{self, LineInstance};
use crate::core::interaction::InputController;
use crate::core::view::ViewState;
use crate::gpu::shaders;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertex of the shared line segment, already in model space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
}

impl LineVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Horizontal unit segment; every line on screen is this geometry under a
/// different model matrix.
const UNIT_SEGMENT: [LineVertex; 2] = [
    LineVertex { position: [-1.0, 0.0] },
    LineVertex { position: [1.0, 0.0] },
];

/// Per-line uniform block, layout shared with the WGSL shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Owns the line pipeline, the shared segment buffer and a growable
/// dynamic-offset uniform buffer with one aligned slot per line, plus the
/// view state and input controller driving what gets drawn.
pub struct GridRenderer {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub surface_config: wgpu::SurfaceConfiguration,
    view: ViewState,
    controller: InputController,
    pipeline: wgpu::RenderPipeline,
    segment_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_stride: u32,
    uniform_capacity: u32,
    staging: Vec<u8>,
}

impl GridRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        surface_config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::line::LINE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        mem::size_of::<LineUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[LineVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let segment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Unit Segment Buffer"),
            contents: bytemuck::cast_slice(&UNIT_SEGMENT),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_stride = aligned_stride(
            mem::size_of::<LineUniforms>() as u32,
            device.limits().min_uniform_buffer_offset_alignment,
        );
        let uniform_capacity = 256;
        let (uniform_buffer, uniform_bind_group) = create_uniform_buffer(
            &device,
            &bind_group_layout,
            uniform_stride,
            uniform_capacity,
        );

        Self {
            device,
            queue,
            surface_config,
            view: ViewState::new(),
            controller: InputController::new(),
            pipeline,
            segment_buffer,
            uniform_buffer,
            uniform_bind_group,
            bind_group_layout,
            uniform_stride,
            uniform_capacity,
            staging: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Start a drag at `screen` pixels from the viewport center (y down).
    pub fn pointer_down(&mut self, screen: glam::Vec2) {
        self.controller.begin_drag(&self.view, screen);
    }

    /// Returns true when the view moved and a redraw is needed.
    pub fn pointer_move(&mut self, screen: glam::Vec2) -> bool {
        self.controller.drag_to(&mut self.view, screen)
    }

    pub fn pointer_up(&mut self) {
        self.controller.end_drag();
    }

    /// Returns true when the zoom changed and a redraw is needed.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.controller.wheel(&mut self.view, delta_y)
    }

    /// Record the new surface size. The caller reconfigures the surface
    /// and depth texture; zero-area sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
    }

    /// Draw one frame: regenerate the line list for the current view and
    /// issue one draw per line against the shared segment buffer.
    pub fn render(&mut self, target: &wgpu::TextureView, depth_view: &wgpu::TextureView) {
        let viewport = (self.surface_config.width, self.surface_config.height);
        let lines = grid::generate_lines(&self.view, viewport);
        log::debug!(target: "gridplane", "draw {} lines", lines.len());

        self.ensure_uniform_capacity(lines.len() as u32);
        self.write_uniforms(&lines);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Grid Render Encoder"),
            });

        {
            let gray = grid::BACKGROUND_GRAYSCALE as f64;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: gray,
                            g: gray,
                            b: gray,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.segment_buffer.slice(..));
            for i in 0..lines.len() as u32 {
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[i * self.uniform_stride]);
                render_pass.draw(0..2, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_uniform_capacity(&mut self, line_count: u32) {
        if line_count <= self.uniform_capacity {
            return;
        }
        let mut capacity = self.uniform_capacity;
        while capacity < line_count {
            capacity *= 2;
        }
        log::trace!(target: "gridplane", "grow uniform buffer to {} slots", capacity);
        let (buffer, bind_group) =
            create_uniform_buffer(&self.device, &self.bind_group_layout, self.uniform_stride, capacity);
        self.uniform_buffer = buffer;
        self.uniform_bind_group = bind_group;
        self.uniform_capacity = capacity;
    }

    fn write_uniforms(&mut self, lines: &[LineInstance]) {
        let stride = self.uniform_stride as usize;
        self.staging.clear();
        self.staging.resize(lines.len() * stride, 0);
        for (i, line) in lines.iter().enumerate() {
            let uniforms = LineUniforms {
                model: line.model.to_cols_array_2d(),
                color: [line.color.x, line.color.y, line.color.z, 1.0],
            };
            let offset = i * stride;
            self.staging[offset..offset + mem::size_of::<LineUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&uniforms));
        }
        self.queue.write_buffer(&self.uniform_buffer, 0, &self.staging);
    }
}

fn create_uniform_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u32,
    capacity: u32,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Line Uniform Buffer"),
        size: stride as u64 * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Line Uniform Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(mem::size_of::<LineUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

/// Round `size` up to the next multiple of `alignment`.
fn aligned_stride(size: u32, alignment: u32) -> u32 {
    let alignment = alignment.max(1);
    (size + alignment - 1) / alignment * alignment
}
