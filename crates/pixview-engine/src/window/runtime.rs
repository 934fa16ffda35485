use std::path::PathBuf;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::{self, Key};
use crate::render::QuadSurface;
use crate::viewer::Viewer;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Image to load once the window and GPU exist. A failed load leaves the
    /// viewer showing the empty backdrop.
    pub image_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "pixview".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            image_path: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the viewer until its window closes.
    pub fn run(config: ViewerConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = ViewerApp::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

// The surface borrows the window, so both live in one self-referencing entry.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    viewer: Viewer<QuadSurface<'this>>,
}

struct ViewerApp {
    config: ViewerConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl ViewerApp {
    fn new(config: ViewerConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            window,
            viewer_builder: |w| -> Result<_> {
                let gpu = pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")?;
                Viewer::new(QuadSurface::new(gpu))
                    .context("quad shader program construction failed")
            },
        }
        .try_build()?;

        if let Some(path) = self.config.image_path.clone() {
            entry.with_viewer_mut(|viewer| {
                if let Err(e) = viewer.load_image(&path) {
                    log::error!("{e}");
                }
            });
        }

        self.entry = Some(entry);
        Ok(())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create viewer window: {e:#}");
            self.request_exit();
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Fully event-driven: frames happen on input and resize, not a clock.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_viewer_mut(|viewer| viewer.resize(new_size.width, new_size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_viewer_mut(|viewer| viewer.resize(new_size.width, new_size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // Key repeat is intentional: held pan/rotate keys keep moving.
                if key_event.state != ElementState::Pressed {
                    return;
                }

                match Key::from_physical(key_event.physical_key) {
                    Key::Escape => {
                        self.entry = None;
                        self.request_exit();
                        event_loop.exit();
                    }
                    key => {
                        if let Some(action) = input::action_for(key) {
                            entry.with_viewer_mut(|viewer| viewer.apply(action));
                            entry.with_window(|w| w.request_redraw());
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let mut frame_failed = false;
                entry.with_viewer_mut(|viewer| {
                    if let Err(e) = viewer.render() {
                        log::error!("frame failed: {e:#}");
                        frame_failed = true;
                    }
                });

                if frame_failed {
                    self.entry = None;
                    self.request_exit();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
