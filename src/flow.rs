//! Application event loop.
//!
//! Opens a window, prepares the cabin scene on the GPU once, and redraws it
//! whenever the window asks for a frame. Each frame follows the same steps:
//! 1. Update the camera for the current surface size
//! 2. Record the scene's draw commands into the [`FrameRecorder`]
//! 3. Upload the recorded uniforms
//! 4. Replay the draws in a single render pass and present

use std::{iter, sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::Camera,
    config::SceneConfig,
    context::Context,
    frame::FrameRecorder,
    logging::init_logging,
    pipelines::scene::ScenePipeline,
    resources::texture::GpuTextures,
    scene::CabinScene,
};

/// Everything that exists once the window has a GPU surface.
struct AppState {
    ctx: Context,
    scene: CabinScene<GpuTextures>,
    frame: FrameRecorder,
    pipeline: ScenePipeline,
    clear_colour: wgpu::Color,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let textures = GpuTextures::new(&ctx.device, &ctx.queue);
        let pipeline = ScenePipeline::new(&ctx, textures.layout());
        let mut frame = FrameRecorder::new(&ctx.device);
        let mut scene = CabinScene::new(config.asset_dir.clone(), textures);

        let started = Instant::now();
        scene.prepare(&mut frame);
        log::info!("Scene prepared in {:?}", started.elapsed());

        Ok(Self {
            ctx,
            scene,
            frame,
            pipeline,
            clear_colour: config.clear_colour,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.ctx.window.request_redraw();
        }
    }

    fn render(&mut self, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let (width, height) = (self.ctx.config.width, self.ctx.config.height);
        self.frame
            .uniforms_mut()
            .set_camera(camera.view_proj(width, height), camera.eye);
        self.frame.begin_frame();
        self.scene.render(&mut self.frame);
        self.pipeline.upload(&self.ctx, &self.frame);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            let textures = self.scene.textures().backend().bind_group();
            self.pipeline.draw(&mut render_pass, &self.frame, textures);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }
}

struct App {
    config: SceneConfig,
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self
            .async_runtime
            .block_on(AppState::new(window.clone(), &self.config))
        {
            Ok(state) => {
                self.state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("App initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render(&self.config.camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, shutting down");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Skipping frame: {e}"),
            },
            _ => {}
        }
    }
}

/// Open the window and render the cabin until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    init_logging(&config.logging);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let async_runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let mut app = App {
        config,
        async_runtime,
        state: None,
    };
    event_loop.run_app(&mut app)?;

    Ok(())
}
