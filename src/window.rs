use crate::{config::GlVersion, gl_api::Context};
use glfw::{Action, Context as _, Glfw, Key, Window, WindowEvent};
use std::{os::raw::c_void, sync::mpsc::Receiver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to initialize GLFW: {0}")]
    Init(#[from] glfw::InitError),

    #[error("failed to create a {width}x{height} window with an OpenGL {version} context")]
    Create { width: u32, height: u32, version: GlVersion },
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub gl_version: GlVersion,
    pub vsync: bool,
}

impl WindowConfig {
    pub fn new<S: Into<String>>(title: S, width: u32, height: u32) -> Self {
        WindowConfig {
            width,
            height,
            title: title.into(),
            gl_version: GlVersion::default(),
            vsync: true,
        }
    }
}

fn log_glfw_error(err: glfw::Error, description: String, _: &()) {
    log::error!("GLFW error {:?}: {}", err, description);
}

/// A GLFW window with a current OpenGL context. Anything holding GL objects
/// has to be dropped before this.
pub struct AppWindow {
    pub glfw: Glfw,
    pub window: Window,
    events: Receiver<(f64, WindowEvent)>,
    ctx: Context,
}

impl AppWindow {
    pub fn open(config: &WindowConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(Some(glfw::Callback {
            f: log_glfw_error as fn(glfw::Error, String, &()),
            data: (),
        }))?;
        log::info!("Using GLFW version {}", glfw::get_version_string());

        let version = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(version.major, version.minor));
        if version.has_core_profile() {
            // core profile means no immediate mode, which is what we want to learn anyways
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
            // macOS refuses to create a core context without this
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::Create {
                width: config.width,
                height: config.height,
                version,
            })?;

        // GL calls go to whichever context is current on the calling thread
        window.make_current();
        window.set_all_polling(true);
        glfw.set_swap_interval(match config.vsync {
            true => glfw::SwapInterval::Sync(1),
            false => glfw::SwapInterval::None,
        });

        // function pointers can only be loaded once a context is current
        let ctx = Context::load(|symbol| window.get_proc_address(symbol) as *const c_void);
        log::info!("Using OpenGL version {}", ctx.info().version);
        log::info!("Renderer: {} ({})", ctx.info().renderer, ctx.info().vendor);
        log::debug!("GLSL version {}", ctx.info().shading_language);

        let (width, height) = window.get_framebuffer_size();
        ctx.set_viewport((width, height));

        Ok(AppWindow {
            glfw,
            window,
            events,
            ctx,
        })
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Polls GLFW and hands back everything that happened since the last call.
    /// Escape closes the window, and framebuffer resizes update the viewport.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();

        let mut events = Vec::new();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window.set_should_close(true)
                }
                WindowEvent::FramebufferSize(width, height) => self.ctx.set_viewport((width, height)),
                _ => {}
            }
            events.push(event);
        }

        events
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    /// Seconds since GLFW was initialized.
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }
}
