use halo_core::{BallInstance, LeafInstance, OffscreenSize, PassContent, PassTarget, Stage, Viewport};
use web_sys as web;

mod helpers;
mod post;
mod scene_pass;
mod targets;
use scene_pass::{SceneResources, SceneUniforms};
use targets::RenderTargets;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    // Post-processing resources, absent when the effect is disabled
    post: Option<post::PostResources>,
    bg_offscreen: Option<wgpu::BindGroup>,
    targets: RenderTargets,
    size: OffscreenSize,
    clear_color: wgpu::Color,
    mesh_generation: Option<u64>,
    leaves: Vec<LeafInstance>,
    balls: Vec<BallInstance>,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        post_enabled: bool,
        clear_color: [f32; 4],
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // The offscreen colour shares the surface format so one scene pipeline serves both paths.
        let targets = RenderTargets::new(&device, width, height, post_enabled.then_some(format));
        let scene = SceneResources::new(&device, format);
        let post = post_enabled.then(|| post::create_post_resources(&device, format));
        let bg_offscreen = match (&post, targets.color_view()) {
            (Some(p), Some(view)) => Some(p.bind_group(&device, view)),
            _ => None,
        };
        log::info!(
            "[gpu] ready {}x{} format={:?} post={}",
            width,
            height,
            format,
            post_enabled
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            post,
            bg_offscreen,
            targets,
            size: OffscreenSize::new(Viewport::new(width, height)),
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: clear_color[3] as f64,
            },
            mesh_generation: None,
            leaves: Vec::new(),
            balls: Vec::new(),
        })
    }

    /// Match surface and offscreen targets to `viewport` before the next draw.
    pub fn resize_if_needed(&mut self, viewport: Viewport) {
        if !self.size.resize(viewport) {
            return;
        }
        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(&self.device, &self.config);

        self.targets
            .recreate(&self.device, viewport.width, viewport.height);
        if let (Some(p), Some(view)) = (&self.post, self.targets.color_view()) {
            self.bg_offscreen = Some(p.bind_group(&self.device, view));
        }
        log::debug!("[gpu] resized to {}x{}", viewport.width, viewport.height);
    }

    /// Reconfigure after the surface was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, stage: &Stage) -> Result<(), wgpu::SurfaceError> {
        let generation = stage.scene.generation();
        if self.mesh_generation != Some(generation) {
            self.scene.upload_mesh(&self.device, &stage.mesh_batch());
            self.mesh_generation = Some(generation);
        }
        stage.leaf_instances(&mut self.leaves);
        stage.ball_instances(&mut self.balls);
        let uniforms = SceneUniforms::new(&stage.camera, &stage.scene.lights);
        self.scene
            .write_frame(&self.device, &self.queue, &uniforms, &self.leaves, &self.balls);

        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        for pass in stage.frame_plan() {
            let target = match pass.target {
                PassTarget::Surface => &surface_view,
                PassTarget::Offscreen => match self.targets.color_view() {
                    Some(view) => view,
                    None => {
                        log::warn!("[gpu] {} skipped: no offscreen target", pass.label);
                        continue;
                    }
                },
            };
            match pass.content {
                PassContent::Scene => {
                    let mut rpass = helpers::color_pass(
                        &mut encoder,
                        pass.label,
                        target,
                        self.clear_color,
                        Some(&self.targets.depth_view),
                    );
                    self.scene.draw(&mut rpass);
                }
                PassContent::RgbShift => {
                    let (Some(p), Some(bg)) = (&self.post, &self.bg_offscreen) else {
                        log::warn!("[gpu] {} skipped: post-process not initialized", pass.label);
                        continue;
                    };
                    let size = self.size.current();
                    p.write_uniforms(
                        &self.queue,
                        [size.width as f32, size.height as f32],
                        stage.post,
                    );
                    post::blit(
                        &mut encoder,
                        pass.label,
                        target,
                        self.clear_color,
                        &p.pipeline,
                        bg,
                    );
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
