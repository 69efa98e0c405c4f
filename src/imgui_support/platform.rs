use glfw::{Action, Modifiers, WindowEvent};
use imgui::{Io, Key, MouseButton};

/// Feeds GLFW input into ImGui and keeps its display metrics current.
#[derive(Debug, Default)]
pub struct ImguiPlatform {
    last_frame: Option<f64>,
}

pub fn map_key(key: glfw::Key) -> Option<Key> {
    use glfw::Key as G;

    Some(match key {
        G::Tab => Key::Tab,
        G::Left => Key::LeftArrow,
        G::Right => Key::RightArrow,
        G::Up => Key::UpArrow,
        G::Down => Key::DownArrow,
        G::PageUp => Key::PageUp,
        G::PageDown => Key::PageDown,
        G::Home => Key::Home,
        G::End => Key::End,
        G::Insert => Key::Insert,
        G::Delete => Key::Delete,
        G::Backspace => Key::Backspace,
        G::Space => Key::Space,
        G::Enter => Key::Enter,
        G::KpEnter => Key::KeypadEnter,
        G::Escape => Key::Escape,
        G::LeftControl => Key::LeftCtrl,
        G::RightControl => Key::RightCtrl,
        G::LeftShift => Key::LeftShift,
        G::RightShift => Key::RightShift,
        G::LeftAlt => Key::LeftAlt,
        G::RightAlt => Key::RightAlt,
        G::LeftSuper => Key::LeftSuper,
        G::RightSuper => Key::RightSuper,
        // for the usual shortcuts
        G::A => Key::A,
        G::C => Key::C,
        G::V => Key::V,
        G::X => Key::X,
        G::Y => Key::Y,
        G::Z => Key::Z,
        _ => return None,
    })
}

pub fn map_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        glfw::MouseButton::Button4 => Some(MouseButton::Extra1),
        glfw::MouseButton::Button5 => Some(MouseButton::Extra2),
        _ => None,
    }
}

/// Ratio between framebuffer pixels and window coordinates. They differ on
/// high-DPI displays.
pub fn framebuffer_scale(window: (i32, i32), framebuffer: (i32, i32)) -> [f32; 2] {
    if window.0 <= 0 || window.1 <= 0 {
        return [1.0, 1.0];
    }
    [
        framebuffer.0 as f32 / window.0 as f32,
        framebuffer.1 as f32 / window.1 as f32,
    ]
}

fn update_modifiers(io: &mut Io, mods: Modifiers) {
    io.add_key_event(Key::ModCtrl, mods.contains(Modifiers::Control));
    io.add_key_event(Key::ModShift, mods.contains(Modifiers::Shift));
    io.add_key_event(Key::ModAlt, mods.contains(Modifiers::Alt));
    io.add_key_event(Key::ModSuper, mods.contains(Modifiers::Super));
}

impl ImguiPlatform {
    pub fn new(imgui: &mut imgui::Context) -> Self {
        imgui.set_platform_name(Some(format!("learn-opengl-glfw {}", env!("CARGO_PKG_VERSION"))));
        ImguiPlatform::default()
    }

    pub fn handle_event(&mut self, io: &mut Io, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y) => io.add_mouse_pos_event([x as f32, y as f32]),
            WindowEvent::MouseButton(button, action, _) => {
                if let Some(button) = map_mouse_button(button) {
                    io.add_mouse_button_event(button, action != Action::Release);
                }
            }
            WindowEvent::Scroll(x, y) => io.add_mouse_wheel_event([x as f32, y as f32]),
            WindowEvent::Char(ch) => io.add_input_character(ch),
            WindowEvent::Key(key, _, action, mods) => {
                update_modifiers(io, mods);
                if let Some(key) = map_key(key) {
                    io.add_key_event(key, action != Action::Release);
                }
            }
            _ => {}
        }
    }

    /// Sets the display size, framebuffer scale and frame time. `now` is in
    /// seconds.
    pub fn prepare_frame(&mut self, io: &mut Io, window: &glfw::Window, now: f64) {
        let size = window.get_size();
        io.display_size = [size.0 as f32, size.1 as f32];
        io.display_framebuffer_scale = framebuffer_scale(size, window.get_framebuffer_size());

        io.delta_time = match self.last_frame {
            // imgui asserts that time moves forward
            Some(last) => ((now - last) as f32).max(1e-5),
            None => 1.0 / 60.0,
        };
        self.last_frame = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_editing_keys_are_mapped() {
        assert_eq!(map_key(glfw::Key::Left), Some(Key::LeftArrow));
        assert_eq!(map_key(glfw::Key::Backspace), Some(Key::Backspace));
        assert_eq!(map_key(glfw::Key::Enter), Some(Key::Enter));
        assert_eq!(map_key(glfw::Key::F7), None);
    }

    #[test]
    fn primary_button_is_left() {
        assert_eq!(map_mouse_button(glfw::MouseButton::Button1), Some(MouseButton::Left));
        assert_eq!(map_mouse_button(glfw::MouseButton::Button2), Some(MouseButton::Right));
        assert_eq!(map_mouse_button(glfw::MouseButton::Button8), None);
    }

    #[test]
    fn framebuffer_scale_handles_hidpi_and_minimized() {
        assert_eq!(framebuffer_scale((960, 540), (1920, 1080)), [2.0, 2.0]);
        assert_eq!(framebuffer_scale((960, 540), (960, 540)), [1.0, 1.0]);
        assert_eq!(framebuffer_scale((0, 0), (0, 0)), [1.0, 1.0]);
    }
}
