use glam::Mat4;
use halo_core::{
    build_icosahedron, BallInstance, Camera, LeafInstance, Lights, MeshBatch, MeshVertex,
    BALL_COLOR, BALL_SHININESS, SPHERE_DETAIL, WIRE_COLOR, WIRE_EDGE_WIDTH,
};
use std::ops::Range;
use wgpu::util::DeviceExt;

use super::helpers::{self, DEPTH_FORMAT};

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];
const LEAF_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4];
const SPHERE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const BALL_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    ball_color: [f32; 4],
    wire_color: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn new(camera: &Camera, lights: &Lights) -> Self {
        let view_proj: Mat4 = camera.view_projection();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light: lights.direction.extend(lights.intensity).to_array(),
            ambient: [lights.ambient[0], lights.ambient[1], lights.ambient[2], 1.0],
            ball_color: [BALL_COLOR[0], BALL_COLOR[1], BALL_COLOR[2], BALL_SHININESS],
            wire_color: [WIRE_COLOR[0], WIRE_COLOR[1], WIRE_COLOR[2], WIRE_EDGE_WIDTH],
        }
    }
}

/// Pipelines and buffers of the scene pass: instanced vertex balls plus the
/// edge-marker wireframe of every mesh leaf.
pub(crate) struct SceneResources {
    mesh_pipeline: wgpu::RenderPipeline,
    ball_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    sphere_vb: wgpu::Buffer,
    sphere_vertices: u32,
    mesh_vb: Option<wgpu::Buffer>,
    mesh_ranges: Vec<Range<u32>>,
    leaf_ib: wgpu::Buffer,
    leaf_count: u32,
    ball_ib: wgpu::Buffer,
    ball_count: u32,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(halo_core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [
            // slot 0: triangle soup
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &MESH_ATTRS,
            },
            // slot 1: per-leaf model matrix
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LeafInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &LEAF_ATTRS,
            },
        ];
        // Transparent wireframe: depth-tested against the balls, never writes depth.
        let mesh_pipeline = make_scene_pipeline(
            device,
            &layout,
            &shader,
            ("vs_mesh", "fs_mesh"),
            &mesh_buffers,
            color_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        let ball_buffers = [
            // slot 0: unit sphere
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &SPHERE_ATTRS,
            },
            // slot 1: instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BallInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &BALL_ATTRS,
            },
        ];
        let ball_pipeline = make_scene_pipeline(
            device,
            &layout,
            &shader,
            ("vs_ball", "fs_ball"),
            &ball_buffers,
            color_format,
            None,
            true,
        );

        // Smooth normals: on a unit sphere the normal is the position.
        let sphere: Vec<MeshVertex> = build_icosahedron(1.0, SPHERE_DETAIL)
            .vertices()
            .into_iter()
            .map(|v| MeshVertex {
                normal: v.position,
                ..v
            })
            .collect();
        let sphere_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_vb"),
            contents: bytemuck::cast_slice(&sphere),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            mesh_pipeline,
            ball_pipeline,
            uniform_buffer,
            bind_group,
            sphere_vb,
            sphere_vertices: sphere.len() as u32,
            mesh_vb: None,
            mesh_ranges: Vec::new(),
            leaf_ib: empty_vertex_buffer(device, "leaf_ib"),
            leaf_count: 0,
            ball_ib: empty_vertex_buffer(device, "ball_ib"),
            ball_count: 0,
        }
    }

    /// Replace the uploaded geometry after the scene's model changed.
    pub(crate) fn upload_mesh(&mut self, device: &wgpu::Device, batch: &MeshBatch) {
        self.mesh_vb = (!batch.vertices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vb"),
                contents: bytemuck::cast_slice(&batch.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        self.mesh_ranges = batch.ranges.clone();
        log::info!(
            "[gpu] uploaded {} mesh vertices in {} leaves",
            batch.vertices.len(),
            batch.ranges.len()
        );
    }

    pub(crate) fn write_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniforms: &SceneUniforms,
        leaves: &[LeafInstance],
        balls: &[BallInstance],
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        helpers::write_growable(device, queue, &mut self.leaf_ib, "leaf_ib", bytemuck::cast_slice(leaves));
        helpers::write_growable(device, queue, &mut self.ball_ib, "ball_ib", bytemuck::cast_slice(balls));
        self.leaf_count = leaves.len() as u32;
        self.ball_count = balls.len() as u32;
    }

    /// Balls first so the blended wireframe can depth-test against them.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.bind_group, &[]);
        if self.ball_count > 0 {
            rpass.set_pipeline(&self.ball_pipeline);
            rpass.set_vertex_buffer(0, self.sphere_vb.slice(..));
            rpass.set_vertex_buffer(1, self.ball_ib.slice(..));
            rpass.draw(0..self.sphere_vertices, 0..self.ball_count);
        }
        if let Some(vb) = &self.mesh_vb {
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_vertex_buffer(0, vb.slice(..));
            rpass.set_vertex_buffer(1, self.leaf_ib.slice(..));
            let leaves = (self.leaf_count as usize).min(self.mesh_ranges.len());
            for (i, range) in self.mesh_ranges.iter().take(leaves).enumerate() {
                rpass.draw(range.clone(), i as u32..i as u32 + 1);
            }
        }
    }
}

fn empty_vertex_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: 256,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(vs_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Double-sided: the wireframe is visible through the back faces.
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
