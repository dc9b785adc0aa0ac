//! Window and event loop.
//!
//! [`App`] owns the session and drives it from winit: window events feed
//! [`Input`], and every redraw runs one session tick, composes the frame on
//! the CPU and presents it through [`GpuState`].

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::error::{AppError, GpuError};
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode};
use crate::raster::{compose_frame, Palette};
use crate::session::Session;
use crate::time::FrameClock;

pub const HELP_TEXT: &str = "Left click: + charge, Right click: - charge, T: test charge";
pub const LEGEND_TEXT: &str = "Red: +q, Blue: -q, Yellow: test charge";

pub struct App {
    session: Session,
    palette: Palette,
    input: Input,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    error: Option<AppError>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            palette: Palette::default(),
            input: Input::new(),
            clock: FrameClock::new(),
            window: None,
            gpu_state: None,
            error: None,
        }
    }

    /// Consume the app after the event loop returned, surfacing any error
    /// that stopped it.
    pub fn finish(self) -> Result<(), AppError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let viewport = self.session.config().viewport;
        let window_attrs = Window::default_attributes()
            .with_title(title(0.0))
            .with_inner_size(winit::dpi::LogicalSize::new(viewport.width, viewport.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);

        let gpu_state = pollster::block_on(GpuState::new(window.clone(), viewport))
            .map_err(AppError::from)?;
        info!(
            width = viewport.width,
            height = viewport.height,
            charges = self.session.charges().len(),
            "window ready"
        );

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!(%err, "stopping");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let viewport = self.session.config().viewport;
        let events = self.input.session_events(viewport);
        self.session.tick(events);
        self.input.end_frame();
        self.clock.tick();

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        let image = compose_frame(&self.session.frame(), &self.palette);
        gpu_state.upload_frame(&image);

        match gpu_state.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, AppError::Gpu(GpuError::OutOfMemory));
                return;
            }
            Err(e) => warn!(error = ?e, "render error"),
        }

        if let Some(window) = &self.window {
            if self.clock.frame() % 30 == 0 {
                window.set_title(&title(self.clock.fps()));
            }
            window.request_redraw();
        }
    }
}

fn title(fps: f32) -> String {
    format!("Electric Field | {HELP_TEXT} | {LEGEND_TEXT} | {fps:.0} FPS")
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { .. } if self.input.key_pressed(KeyCode::Escape) => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
