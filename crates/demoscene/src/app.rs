//! Application state and event loop for the windowed player

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use demoscene_core::canvas::Canvas;
use demoscene_core::config::DemoConfig;

use crate::hud::Hud;
use crate::render::Renderer;
use crate::scene::{self, Demo, DemoKind};

/// Everything needed to build (and rebuild) demos at runtime.
pub struct AppOptions {
    pub kind: DemoKind,
    pub config: DemoConfig,
    pub seed: u64,
    pub image: Option<PathBuf>,
}

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Active demo
    canvas: Canvas,
    demo: Box<dyn Demo>,
    options: AppOptions,

    // UI state
    hud: Hud,
    paused: bool,
    should_step: bool,

    // Input state
    mouse_pos: Option<(f32, f32)>,
    left_pressed: bool,

    // Timing
    frame_count: u64,
    fps_update_time: Instant,
    fps: f32,
}

impl App {
    pub async fn new(options: AppOptions) -> Result<(Self, EventLoop<()>)> {
        let config = &options.config;

        let event_loop = EventLoop::new()?;

        let window_attrs = WindowAttributes::default()
            .with_title(format!("demoscene: {:?}", options.kind).to_lowercase())
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = Renderer::new(&window, config.canvas_width, config.canvas_height).await?;
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);
        let demo = scene::create_demo(
            options.kind,
            config,
            options.seed,
            options.image.as_deref(),
        )?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        let hud = Hud::new(config.show_hud);

        Ok((
            Self {
                window,
                renderer,
                egui_ctx,
                egui_state,
                egui_renderer,
                canvas,
                demo,
                options,
                hud,
                paused: false,
                should_step: false,
                mouse_pos: None,
                left_pressed: false,
                frame_count: 0,
                fps_update_time: Instant::now(),
                fps: 0.0,
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Rebuild the active demo under a new kind, keeping config and seed.
    fn switch_demo(&mut self, kind: DemoKind) {
        if kind == self.options.kind {
            return;
        }
        match scene::create_demo(
            kind,
            &self.options.config,
            self.options.seed,
            self.options.image.as_deref(),
        ) {
            Ok(demo) => {
                log::info!("switching to demo {:?}", kind);
                self.demo = demo;
                self.options.kind = kind;
                self.window
                    .set_title(&format!("demoscene: {:?}", kind).to_lowercase());
            }
            Err(e) => log::error!("failed to switch demo: {e:#}"),
        }
    }

    /// Map a window position to canvas coordinates through the inverse of
    /// the renderer's letterbox transform.
    fn window_to_canvas(&self, screen_x: f32, screen_y: f32) -> (i32, i32) {
        let size = self.renderer.size();
        let (scale_x, scale_y) = self.renderer.letterbox_scale();

        let ndc_x = (screen_x / size.width.max(1) as f32) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / size.height.max(1) as f32) * 2.0;

        let u = (ndc_x / scale_x + 1.0) / 2.0;
        let v = (1.0 - ndc_y / scale_y) / 2.0;

        (
            (u * self.canvas.width() as f32) as i32,
            (v * self.canvas.height() as f32) as i32,
        )
    }

    /// Advance the active demo
    fn update(&mut self) {
        let now = Instant::now();
        self.frame_count += 1;
        if now.duration_since(self.fps_update_time).as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32;
            self.frame_count = 0;
            self.fps_update_time = now;
        }

        if let Some((sx, sy)) = self.mouse_pos {
            let (cx, cy) = self.window_to_canvas(sx, sy);
            self.demo.pointer(cx, cy, self.left_pressed);
        }

        if self.should_step {
            self.demo.advance();
            self.should_step = false;
        } else if !self.paused {
            self.demo.update();
        }
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        self.demo.draw(&mut self.canvas);
        self.renderer.upload(&self.canvas);

        // Collect data for the egui closure to avoid borrow checker issues
        let demo_name = self.demo.name();
        let stats = self.demo.stats();
        let fps = self.fps;
        let paused = self.paused;

        let output = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        self.renderer.render_canvas(&mut encoder, &view)?;

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.hud.render(ctx, demo_name, fps, paused, &stats);
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hud_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.renderer
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.renderer.end_frame(output);

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is created up front; nothing to do on resume.
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("render error: {e:#}");
                }
                self.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = Some((position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_pos = None;
                self.left_pressed = false;
                self.demo.pointer(-1, -1, false);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.left_pressed = state == ElementState::Pressed;
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            event_loop.exit();
                        }
                        PhysicalKey::Code(KeyCode::Space) => {
                            self.paused = !self.paused;
                        }
                        PhysicalKey::Code(KeyCode::KeyS) => {
                            if self.paused {
                                self.should_step = true;
                            }
                        }
                        PhysicalKey::Code(KeyCode::KeyH) => {
                            self.hud.toggle();
                        }
                        PhysicalKey::Code(KeyCode::Digit1) => {
                            self.switch_demo(DemoKind::Hello);
                        }
                        PhysicalKey::Code(KeyCode::Digit2) => {
                            self.switch_demo(DemoKind::Perlin);
                        }
                        PhysicalKey::Code(KeyCode::Digit3) => {
                            self.switch_demo(DemoKind::Sand);
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}
