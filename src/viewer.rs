//! Standalone fly-through window backed by winit.
//!
//! ```no_run
//! # use wormhole::{Options, Viewer};
//! Viewer::builder()
//!     .with_options(Options::default())
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Space pauses and resumes the flight. Escape or closing the window exits.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::FlythroughEngine, error::WormholeError, options::Options,
    util::clock::FlightClock,
};

/// Fraction of the monitor the window covers on startup.
const INITIAL_MONITOR_FRACTION: f64 = 0.75;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default options and the title "Wormhole".
    fn new() -> Self {
        Self {
            options: None,
            title: "Wormhole".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that flies the camera through the wormhole until closed.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] before opening a window if
    /// the options do not validate, [`WormholeError::Viewer`] if the event
    /// loop fails, and the engine's error if startup failed.
    pub fn run(self) -> Result<(), WormholeError> {
        self.options.validate()?;

        let event_loop = EventLoop::new()
            .map_err(|e| WormholeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            clock: FlightClock::new(),
            options: self.options,
            title: self.title,
            exiting: false,
            startup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| WormholeError::Viewer(e.to_string()))?;

        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<FlythroughEngine>,
    clock: FlightClock,
    options: Options,
    title: String,
    /// Set once exit was requested; no further redraws are scheduled.
    exiting: bool,
    startup_error: Option<WormholeError>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    /// Stop with `error`, which [`Viewer::run`] then returns.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: WormholeError) {
        self.startup_error = Some(error);
        self.exit(event_loop);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => self.exit(event_loop),
            PhysicalKey::Code(KeyCode::Space) => {
                let paused = self.clock.toggle_pause();
                log::info!(
                    "flight {} at {:.0} ms",
                    if paused { "paused" } else { "resumed" },
                    self.clock.elapsed_ms()
                );
            }
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        engine.update(self.clock.elapsed_ms());
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                if let Some(w) = &self.window {
                    let (vp_w, vp_h) = viewport_size(w.inner_size());
                    engine.resize(vp_w, vp_h);
                }
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (f64::from(mon_size.width) / scale
                * INITIAL_MONITOR_FRACTION) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (f64::from(mon_size.height) / scale
                * INITIAL_MONITOR_FRACTION) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(
                    event_loop,
                    WormholeError::Viewer(format!(
                        "failed to create window: {e}"
                    )),
                );
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        match pollster::block_on(FlythroughEngine::new(
            window.clone(),
            size,
            self.options.clone(),
        )) {
            Ok(engine) => {
                self.engine = Some(engine);
                // The flight starts once the first frame can be drawn.
                self.clock = FlightClock::new();
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    let (vp_w, vp_h) = viewport_size(size);
                    engine.resize(vp_w, vp_h);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.exiting {
                    return;
                }
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }
}
