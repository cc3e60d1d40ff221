mod bindings;
mod host;

use anyhow::{Context, Result};
use bindings::KeyBindings;
use clap::Parser;
use host::{DesktopHost, Pointer};
use radiosity_camera::Camera;
use radiosity_common::AppConfig;
use radiosity_input::{FrameTimer, Input};
use radiosity_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Pixels of touchpad scroll treated as one wheel notch.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Parser)]
#[command(name = "radiosity-desktop", about = "Free-fly camera demo room")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct DesktopApp {
    config: AppConfig,
    input: Input,
    host: DesktopHost,
    pointer: Pointer,
    timer: FrameTimer,
    scene: Scene,
    renderer: DebugTextRenderer,
    window: Option<Arc<Window>>,
    aspect: f32,
    frames: u64,
}

impl DesktopApp {
    fn new(config: AppConfig) -> Result<Self> {
        let bindings = KeyBindings::from_config(&config.controls)?;
        Ok(Self {
            input: Input::new(Camera::from_config(&config.camera)),
            host: DesktopHost::new(bindings),
            pointer: Pointer::default(),
            timer: FrameTimer::new(config.timing.max_frame_delta),
            scene: Scene::demo_room(),
            renderer: DebugTextRenderer::new(),
            window: None,
            aspect: config.window.aspect(),
            frames: 0,
            config,
        })
    }

    fn render_view(&self) -> RenderView {
        RenderView::from_camera(
            self.input.camera(),
            self.aspect,
            &self.config.projection,
            self.input.wireframe(),
        )
    }

    fn draw(&mut self, window: &Window) {
        let view = self.render_view();
        self.frames += 1;

        window.set_title(&format!(
            "{} | pos ({:.1}, {:.1}, {:.1}) fov {:.0}{}",
            self.config.window.title,
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.fov_degrees,
            if view.wireframe { " | wireframe" } else { "" }
        ));

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!("frame {}\n{}", self.frames, self.renderer.render(&self.scene, &view));
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.aspect = size.width as f32 / size.height.max(1) as f32;
        host::apply_cursor_mode(&window, self.input.cursor_mode());
        self.host.attach(window.clone());
        self.window = Some(window);

        tracing::info!(
            "window opened at {}x{}, {} objects in scene",
            size.width,
            size.height,
            self.scene.len()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.aspect = new_size.width.max(1) as f32 / new_size.height.max(1) as f32;
            }
            WindowEvent::Focused(false) => {
                self.host.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.host
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer
                    .cursor_moved(&mut self.input, position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(x, y) => {
                    self.input.scroll_callback(x as f64, y as f64);
                }
                MouseScrollDelta::PixelDelta(p) => {
                    self.input
                        .scroll_callback(p.x / PIXELS_PER_LINE, p.y / PIXELS_PER_LINE);
                }
            },
            WindowEvent::RedrawRequested => {
                if let Some(window) = self.window.clone() {
                    self.draw(&window);
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.pointer.device_motion(&mut self.input, delta.0, delta.1);
        }
    }

    // Runs once the pending window events are drained, so cursor and scroll
    // callbacks for this frame have already reached the camera.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.timer.tick(Instant::now());
        self.input.process_input(&mut self.host, dt);

        if self.host.close_requested() || !self.input.is_alive() {
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let camera = self.input.camera();
        tracing::info!(
            "exiting after {} frames, camera at ({:.2}, {:.2}, {:.2})",
            self.frames,
            camera.position.x,
            camera.position.y,
            camera.position.z
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("radiosity-desktop starting");

    let config = AppConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    let mut app = DesktopApp::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    Ok(())
}
