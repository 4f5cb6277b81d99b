//! Winit-based application shell.
//!
//! [`App`] owns the window and forwards platform events to the [`Viewer`]:
//!
//! - resize → camera aspect and host viewport
//! - keys `1`-`5` (or whatever [`KeyBindings`](crate::viewer::KeyBindings) say) → clip activation
//! - arrow left/right → previous/next entry of the asset panel
//! - redraw → one viewer frame, then another redraw request
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rigview::{App, JsonModelLoader, ViewerSettings};
//!
//! fn main() -> rigview::errors::Result<()> {
//!     App::new(ViewerSettings::default(), Arc::new(JsonModelLoader::new())).run()
//! }
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::assets::ModelLoader;
use crate::config::ViewerSettings;
use crate::errors::{Result, ViewerError};
use crate::host::{HeadlessHost, SceneHost};
use crate::viewer::Viewer;

pub struct App {
    window: Option<Arc<Window>>,
    title: String,
    size: (u32, u32),

    viewer: Viewer,
    host: Box<dyn SceneHost>,
}

impl App {
    #[must_use]
    pub fn new(settings: ViewerSettings, loader: Arc<dyn ModelLoader>) -> Self {
        let title = settings.title.clone();
        let size = (settings.width, settings.height);
        Self {
            window: None,
            title,
            size,
            viewer: Viewer::new(settings, loader),
            host: Box::new(HeadlessHost::new(size.0, size.1)),
        }
    }

    /// Replaces the drawing backend (configuration stage).
    #[must_use]
    pub fn with_host(mut self, host: impl SceneHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new().map_err(|e| ViewerError::WindowError(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| ViewerError::WindowError(e.to_string()))
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key.as_ref() {
            Key::Character(c) => {
                self.viewer.handle_key(c);
            }
            Key::Named(NamedKey::ArrowRight) => {
                self.viewer.select_next_asset();
            }
            Key::Named(NamedKey::ArrowLeft) => {
                self.viewer.select_previous_asset();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();
        self.host.resize(size.width, size.height);
        self.viewer.resize(size.width, size.height);
        self.window = Some(window);

        self.viewer.start();
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
            WindowEvent::Resized(physical_size) => {
                self.host.resize(physical_size.width, physical_size.height);
                self.viewer.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                self.viewer.frame(self.host.as_mut());
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
