use crate::{harness::Test, renderer::Renderer};

/// Fills the screen with a color picked in the UI.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClearColor {
    pub color: [f32; 4],
}

impl Default for ClearColor {
    fn default() -> Self {
        ClearColor {
            color: [0.2, 0.3, 0.8, 1.0],
        }
    }
}

impl Test for ClearColor {
    fn on_render(&mut self, renderer: &Renderer) -> anyhow::Result<()> {
        renderer.set_clear_color(self.color);
        renderer.clear();
        Ok(())
    }

    fn on_imgui_render(&mut self, ui: &imgui::Ui) {
        ui.color_edit4("Clear Color", &mut self.color);
    }
}
