//! Bouncing sprites demo -- entry point and winit event loop.
//!
//! winit drives the loop via `ApplicationHandler`. Each `RedrawRequested` is
//! one iteration of the demo: step and draw every sprite, present, then update
//! the FPS readout. After a frame the loop sleeps a constant `frame_delay_ms`
//! (`ControlFlow::WaitUntil`) before requesting the next redraw.
//!
//! Quit (window close or Escape) is handled between frames. Startup failures
//! are logged and turned into exit status 1; whatever was already acquired is
//! released by dropping it.

mod backend;

use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use backend::WgpuBackend;
use bnc_core::{load_config_from_path, Demo, DemoConfig, FrameClock, InitError, InitResult};
use bnc_platform::PlatformConfig;

const DEFAULT_CONFIG_PATH: &str = "assets/bouncer.json";

struct App {
    config: DemoConfig,
    clock: FrameClock,
    frame_delay: Duration,
    next_frame: Instant,
    demo: Option<Demo<WgpuBackend>>,
    init_error: Option<InitError>,
}

impl App {
    fn new(config: DemoConfig) -> Self {
        Self {
            frame_delay: Duration::from_millis(config.frame_delay_ms),
            config,
            clock: FrameClock::new(),
            next_frame: Instant::now(),
            demo: None,
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> InitResult<Demo<WgpuBackend>> {
        let platform = PlatformConfig {
            title: self.config.window_title.clone(),
            width: self.config.window_width,
            height: self.config.window_height,
        };
        let window = bnc_platform::create_window(event_loop, &platform).map_err(InitError::Window)?;
        log::info!("Window created: {}x{}", platform.width, platform.height);

        let backend = WgpuBackend::new(window, &self.config)?;
        self.clock = FrameClock::new();
        Demo::new(backend, &self.config, self.clock.ticks_ms())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.demo.is_some() || self.init_error.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(demo) => {
                self.demo = Some(demo);
                self.next_frame = Instant::now();
            }
            Err(err) => {
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(demo) = &self.demo else {
            return;
        };
        if Instant::now() >= self.next_frame {
            demo.backend().window().request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(demo) = self.demo.as_mut() else {
            return;
        };

        let egui_consumed = demo.backend_mut().handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                demo.backend_mut()
                    .resize(physical_size.width, physical_size.height);
                log::info!(
                    "Resized to {}x{}",
                    physical_size.width,
                    physical_size.height
                );
            }

            WindowEvent::KeyboardInput { event, .. }
                if !egui_consumed && event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => {
                        log::info!("Escape pressed, exiting.");
                        event_loop.exit();
                    }
                    PhysicalKey::Code(KeyCode::F3) => demo.backend_mut().toggle_debug_overlay(),
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                self.clock.begin_frame();
                let clock = &self.clock;
                demo.frame(clock, || clock.now_ms());
                self.next_frame = Instant::now() + self.frame_delay;
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(demo) = self.demo.take() {
            log::info!(
                "Shutting down after {} frames ({} sprites)",
                self.clock.frame_count,
                demo.field().len()
            );
        }
    }
}

/// The first command-line argument names a config file. Without one the
/// default path is used when present, else built-in defaults.
fn load_config() -> InitResult<DemoConfig> {
    if let Some(path) = std::env::args().nth(1) {
        return load_config_from_path(Path::new(&path)).map_err(InitError::Config);
    }
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        return load_config_from_path(path).map_err(InitError::Config);
    }
    log::info!("No config at {}, using defaults", path.display());
    Ok(DemoConfig::default())
}

fn run() -> InitResult<()> {
    let config = load_config()?;

    let event_loop = EventLoop::new().map_err(|e| InitError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| InitError::EventLoop(e.to_string()))?;

    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Bouncing sprites demo starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
