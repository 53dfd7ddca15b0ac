//! Native window hosting the grid canvas: wgpu surface setup and the
//! winit event loop mapping pointer, wheel, touch and resize events onto
//! the renderer.

use std::sync::Arc;

use glam::Vec2;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::core::renderer::{GridRenderer, DEPTH_FORMAT};
use crate::error::GridError;

/// Window creation settings.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gridplane".to_string(),
            width: 1200,
            height: 800,
            resizable: true,
            vsync: true,
        }
    }
}

/// The native window, its wgpu surface and the grid renderer driving it.
/// Redraws happen only in response to events that change the view or the
/// surface.
pub struct GridWindow {
    pub window: Arc<winit::window::Window>,
    event_loop: Option<EventLoop<()>>,
    pub renderer: GridRenderer,
    pub surface: wgpu::Surface<'static>,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    cursor_position: Vec2,
    active_touch: Option<u64>,
}

impl GridWindow {
    pub async fn new(config: WindowConfig) -> Result<Self, GridError> {
        let event_loop = EventLoop::new()?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.title)
                .with_inner_size(LogicalSize::new(config.width, config.height))
                .with_resizable(config.resizable)
                .build(&event_loop)?,
        );

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GridError::AdapterUnavailable)?;
        log::info!(target: "gridplane", "adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Grid Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) =
            create_depth_texture(&device, surface_config.width, surface_config.height);

        let renderer = GridRenderer::new(device, queue, surface_config);

        Ok(Self {
            window,
            event_loop: Some(event_loop),
            renderer,
            surface,
            depth_texture,
            depth_view,
            cursor_position: Vec2::ZERO,
            active_touch: None,
        })
    }

    /// Run the event loop until the window closes. Consumes the event
    /// loop; a second call fails.
    pub fn run(&mut self) -> Result<(), GridError> {
        let event_loop = self.event_loop.take().ok_or(GridError::EventLoopConsumed)?;
        let window = self.window.clone();
        window.request_redraw();

        event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Wait);

            let Event::WindowEvent { window_id, event } = event else {
                return;
            };
            if window_id != window.id() {
                return;
            }

            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(size) => {
                    self.resize(size.width, size.height);
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => match self.redraw() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = (
                            self.renderer.surface_config.width,
                            self.renderer.surface_config.height,
                        );
                        self.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!(target: "gridplane", "surface out of memory");
                        target.exit();
                    }
                    Err(e) => log::warn!(target: "gridplane", "surface error: {e:?}"),
                },
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => match state {
                    ElementState::Pressed => self.renderer.pointer_down(self.cursor_position),
                    ElementState::Released => self.renderer.pointer_up(),
                },
                WindowEvent::CursorMoved { position, .. } => {
                    self.cursor_position = self.screen_from_window(position.x, position.y);
                    if self.renderer.pointer_move(self.cursor_position) {
                        window.request_redraw();
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    // Scrolling up zooms in, matching the sign convention
                    // of the input controller (positive delta zooms out).
                    let delta_y = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y,
                        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                    };
                    if self.renderer.wheel(delta_y) {
                        window.request_redraw();
                    }
                }
                WindowEvent::Touch(touch) => {
                    if self.handle_touch(touch) {
                        window.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }

    /// Map the first active touch onto the pointer protocol; additional
    /// fingers are ignored until it lifts.
    fn handle_touch(&mut self, touch: winit::event::Touch) -> bool {
        let position = self.screen_from_window(touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(touch.id);
                self.renderer.pointer_down(position);
                false
            }
            TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                self.renderer.pointer_move(position)
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                self.active_touch = None;
                self.renderer.pointer_up();
                false
            }
            _ => false,
        }
    }

    /// Window coordinates (origin top-left) to viewport-centered pixels
    /// (y still pointing down).
    fn screen_from_window(&self, x: f64, y: f64) -> Vec2 {
        let config = &self.renderer.surface_config;
        Vec2::new(
            x as f32 - config.width as f32 / 2.0,
            y as f32 - config.height as f32 / 2.0,
        )
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.renderer.resize(width, height);
        self.surface
            .configure(&self.renderer.device, &self.renderer.surface_config);
        let (texture, view) = create_depth_texture(&self.renderer.device, width, height);
        self.depth_texture = texture;
        self.depth_view = view;
    }

    fn redraw(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&view, &self.depth_view);
        frame.present();
        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
