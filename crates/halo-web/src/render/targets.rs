use super::helpers::{self, DEPTH_FORMAT};

/// Offscreen targets of the render pipeline.
///
/// - `color` is the scene colour the RGB-shift pass samples; it only exists
///   while post-processing is enabled.
/// - `depth_view` backs the scene pass whichever target it draws into.
pub(crate) struct RenderTargets {
    pub(crate) color: Option<(wgpu::Texture, wgpu::TextureView)>,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        Self {
            color: color_format.map(|f| create_color(device, width, height, f)),
            depth_view: create_depth(device, width, height),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = create_depth(device, width, height);
        if let Some((tex, _)) = &self.color {
            let format = tex.format();
            self.color = Some(create_color(device, width, height, format));
        }
    }

    pub(crate) fn color_view(&self) -> Option<&wgpu::TextureView> {
        self.color.as_ref().map(|(_, view)| view)
    }
}

fn create_color(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_texture(
        device,
        "offscreen_color",
        width,
        height,
        format,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}

// The view keeps its texture alive.
fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let (_, view) = helpers::create_texture(
        device,
        "scene_depth",
        width,
        height,
        DEPTH_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    );
    view
}
