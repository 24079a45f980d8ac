use halo_core::RgbShiftParams;

use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RgbShiftUniforms {
    resolution: [f32; 2],
    angle: f32,
    amount: f32,
}

/// Full-screen colour-fringe pass reading the offscreen scene colour.
pub(crate) struct PostResources {
    pub(crate) bgl: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) sampler: wgpu::Sampler,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("rgb_shift_shader"),
        source: wgpu::ShaderSource::Wgsl(halo_core::RGB_SHIFT_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("rgb_shift_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("rgb_shift_uniforms"),
        size: std::mem::size_of::<RgbShiftUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("rgb_shift_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("rgb_shift_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_rgb_shift"),
            targets: &[Some(wgpu::ColorTargetState {
                format: swap_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    // Offsets push samples past the border; clamp instead of wrapping.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("rgb_shift_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    PostResources {
        bgl,
        uniform_buffer,
        pipeline,
        sampler,
    }
}

impl PostResources {
    /// Bind group sampling `source`; rebuilt whenever the offscreen target is.
    pub(crate) fn bind_group(&self, device: &wgpu::Device, source: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rgb_shift_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, resolution: [f32; 2], params: RgbShiftParams) {
        let u = RgbShiftUniforms {
            resolution,
            angle: params.angle,
            amount: params.amount,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
) {
    let mut r = helpers::color_pass(encoder, label, target, clear, None);
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bind_group, &[]);
    r.draw(0..3, 0..1);
}
