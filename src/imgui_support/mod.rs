pub mod platform;
pub mod renderer;

pub use self::{
    platform::ImguiPlatform,
    renderer::{ImguiRenderer, ImguiRendererError},
};

use crate::{gl_api::error::GlResult, window::AppWindow};
use glfw::WindowEvent;

/// An ImGui context wired up to an [`AppWindow`].
pub struct ImguiLayer {
    imgui: imgui::Context,
    platform: ImguiPlatform,
    renderer: ImguiRenderer,
}

impl ImguiLayer {
    pub fn new(window: &AppWindow) -> Result<Self, ImguiRendererError> {
        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        imgui.style_mut().use_dark_colors();

        let platform = ImguiPlatform::new(&mut imgui);
        let renderer = ImguiRenderer::new(window.context(), &mut imgui)?;

        Ok(ImguiLayer {
            imgui,
            platform,
            renderer,
        })
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.platform.handle_event(self.imgui.io_mut(), event);
    }

    /// Builds one frame of UI with `build` and draws it on top of whatever is
    /// in the framebuffer.
    pub fn frame<F>(&mut self, window: &AppWindow, build: F) -> GlResult<()>
    where
        F: FnOnce(&imgui::Ui),
    {
        self.platform
            .prepare_frame(self.imgui.io_mut(), &window.window, window.time());

        let ui = self.imgui.new_frame();
        build(ui);

        let draw_data = self.imgui.render();
        self.renderer.render(draw_data)
    }
}
