//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Hosts the frame driver inside the winit event loop and presents its
// raster through `pixels`.
//
// Architecture:
// ```text
//  Main Thread
//  ┌───────────────────────────────────────────────────────────┐
//  │  winit Event Loop                                         │
//  │   ├─ KeyboardInput / MouseInput                           │
//  │   │     ↓ InputProcessor (modifiers, repeat filter)       │
//  │   │   InputBuffer ──(request_redraw)                      │
//  │   │                                                       │
//  │   └─ RedrawRequested  (frame boundary)                    │
//  │         ├─ flush buffer ──> bounded channel ──┐           │
//  │         ├─ FrameDriver::tick(now) <───────────┘           │
//  │         ├─ narration channel → stdout + window title      │
//  │         └─ PixelSurface::present(canvas)                  │
//  └───────────────────────────────────────────────────────────┘
// ```
//
// Frame pacing follows FrameControl:
// - `Continue`: request the next redraw immediately (vsync paced)
// - `Idle`: wake on input, or after IDLE_FRAME_INTERVAL for the start
//   screen's animation
// - `Exit`: leave the event loop
//
// Window, surface and driver all live on the thread that called
// `Engine::run()`; winit requires the main thread on macOS.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod surface;

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::canvas::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::core::clock::MonotonicClock;
use crate::core::frame::{FrameControl, FrameDriver};
use crate::core::narration::Narration;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use surface::PixelSurface;

//=== Constants ===========================================================

/// Redraw interval while the start screen is up and nothing is pressed.
const IDLE_FRAME_INTERVAL: Duration = Duration::from_millis(100);

//=== PlatformConfig ======================================================

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlatformConfig {
    /// Base window title; the current narration headline is appended.
    pub title: String,

    /// Integer upscale factor applied to the logical raster.
    pub scale: u32,
}

//=== Platform ============================================================

/// Window owner, input aggregator and frame host.
///
/// # Lifecycle
///
/// 1. `Platform::new(..)`: no window yet
/// 2. `run()`: enters the event loop
/// 3. `resumed()`: window and surface are created lazily
/// 4. close request or fatal error: the loop exits and `run()` returns
pub(crate) struct Platform {
    config: PlatformConfig,
    window: Option<Arc<Window>>,
    surface: Option<PixelSurface>,
    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,
    driver: FrameDriver<Sender<Narration>>,
    narration: Receiver<Narration>,
    clock: MonotonicClock,
    fatal: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: PlatformConfig,
        event_sender: Sender<PlatformEvent>,
        driver: FrameDriver<Sender<Narration>>,
        narration: Receiver<Narration>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            window: None,
            surface: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            driver,
            narration,
            clock: MonotonicClock::new(),
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails, or if the window or pixel surface cannot be created.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms that require it.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the frame driver.
    ///
    /// A full or disconnected channel drops the batch with a warning.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform", "Flushing {} input events", count);

        match self.event_sender.try_send(PlatformEvent::Inputs(events)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform", "Input channel full, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform", "Input channel disconnected, dropping {} events", count);
            }
        }
    }

    /// Prints pending narration and mirrors the latest headline in the
    /// window title.
    fn drain_narration(&mut self) -> Option<String> {
        let mut caption = None;

        for narration in self.narration.try_iter() {
            for line in &narration.lines {
                println!("{}", line);
            }
            if let Some(flourish) = &narration.flourish {
                println!("{}", flourish);
            }
            println!();

            caption = Some(window_caption(&self.config.title, &narration));
        }

        if let (Some(window), Some(caption)) = (&self.window, &caption) {
            window.set_title(caption);
        }
        caption
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        error!(target: "platform", "{}", err);
        let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        let control = self.driver.tick(self.clock.now_ms());
        self.drain_narration();

        if control == FrameControl::Exit {
            event_loop.exit();
            return;
        }

        if let Some(surface) = &mut self.surface {
            if let Err(err) = surface.present(self.driver.canvas()) {
                self.fail(event_loop, err);
                return;
            }
        }

        match control {
            FrameControl::Continue => {
                event_loop.set_control_flow(ControlFlow::Wait);
                self.request_redraw();
            }
            FrameControl::Idle => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + IDLE_FRAME_INTERVAL,
                ));
            }
            FrameControl::Exit => {}
        }
    }
}

//=== Window Caption ======================================================

fn window_caption(title: &str, narration: &Narration) -> String {
    match narration.headline() {
        "" => title.to_owned(),
        headline => format!("{} - {}", title, headline),
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.request_redraw();
        }
    }

    /// Creates the window and surface on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let scale = self.config.scale;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(LOGICAL_WIDTH * scale, LOGICAL_HEIGHT * scale))
            .with_min_inner_size(LogicalSize::new(LOGICAL_WIDTH, LOGICAL_HEIGHT));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, PlatformError::WindowCreation(e.to_string()));
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        match PixelSurface::new(window.clone(), LOGICAL_WIDTH, LOGICAL_HEIGHT) {
            Ok(surface) => self.surface = Some(surface),
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform", "Modifiers changed: {:?}", modifiers);
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = self.input_processor.process_key_event(&event) {
                    self.buffer.push(input);
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let input = self.input_processor.process_mouse_button(button, state);
                self.buffer.push(input);
                self.request_redraw();
            }

            WindowEvent::Resized(size) => {
                if let Some(surface) = &mut self.surface {
                    if let Err(err) = surface.resize(size.width, size.height) {
                        self.fail(event_loop, err);
                        return;
                    }
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
