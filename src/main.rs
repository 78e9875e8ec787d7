//! Flingball entry point
//!
//! Native window + frame loop: render the current state, then tick the
//! simulation, paced to the configured FPS.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use flingball::renderer::{RenderState, shapes};
use flingball::settings::Settings;
use flingball::sim::{InputEvent, PointerButton, SimState, TickInput, tick};

/// Sleeps out the remainder of each frame to cap the loop rate
struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    fn new(fps: u32) -> Self {
        let interval = Duration::from_secs_f64(1.0 / fps as f64);
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    /// Block until the next frame deadline
    fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
        }
        // Skip forward after a stall instead of bursting frames
        self.next = (self.next + self.interval).max(now);
    }
}

struct App {
    state: SimState,
    window: Option<Arc<Window>>,
    gfx: Option<RenderState>,
    pacer: FramePacer,
    /// Current pointer position in arena (logical) coordinates
    pointer: Vec2,
    /// Events collected since the previous tick, in arrival order
    pending: Vec<InputEvent>,
}

impl App {
    fn new(settings: &Settings) -> Self {
        Self {
            state: SimState::new(settings),
            window: None,
            gfx: None,
            pacer: FramePacer::new(settings.target_fps),
            pointer: Vec2::ZERO,
            pending: Vec::new(),
        }
    }

    fn initialize(&mut self, window: Arc<Window>) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("Failed to create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to find adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let gfx = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            (self.state.arena.width, self.state.arena.height),
        ));

        self.window = Some(window);
        self.gfx = Some(gfx);
    }

    /// One frame: pace, draw the state as of the previous tick, then tick
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.pacer.wait();

        // Walls first, then balls in declaration order
        let mut vertices = shapes::arena_walls(&self.state.arena);
        for ball in &self.state.balls {
            vertices.extend(shapes::circle(
                ball.pos,
                ball.radius,
                ball.color,
                shapes::CIRCLE_SEGMENTS,
            ));
        }

        if let Some(gfx) = self.gfx.as_mut() {
            match gfx.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = gfx.size;
                    gfx.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("Render error: {e:?}"),
            }
        }

        let input = TickInput {
            pointer: self.pointer,
            events: std::mem::take(&mut self.pending),
        };
        tick(&mut self.state, &input);

        if !self.state.running {
            log::info!("Quit after {} frames", self.state.time_ticks);
            event_loop.exit();
        }
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Flingball")
                .with_inner_size(LogicalSize::new(
                    self.state.arena.width as f64,
                    self.state.arena.height as f64,
                ))
                .with_resizable(false);
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("Failed to create window"),
            );
            self.initialize(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key
                    && event.state == ElementState::Pressed
                {
                    self.pending.push(InputEvent::Quit);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                let logical = position.to_logical::<f64>(scale);
                self.pointer = Vec2::new(logical.x as f32, logical.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(button);
                self.pending.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown {
                        button,
                        pos: self.pointer,
                    },
                    ElementState::Released => InputEvent::PointerUp { button },
                });
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Flingball starting...");

    let settings = Settings::load();
    log::info!(
        "Scene: {} balls in a {}x{} arena at {} fps",
        settings.balls.len(),
        settings.arena_width,
        settings.arena_height,
        settings.target_fps
    );

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&settings);
    event_loop.run_app(&mut app).expect("Event loop error");
}
