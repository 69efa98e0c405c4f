#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum PolygonMode {
    Point = gl::POINT,
    Line = gl::LINE,
    Fill = gl::FILL,
}

pub fn polygon_mode(mode: PolygonMode) {
    // Invalid enums are not possible here; GL_FRONT_AND_BACK is valid, and `mode` is a valid enum
    gl_call!(assert PolygonMode(gl::FRONT_AND_BACK, mode as u32));
}

/// Blends by source alpha, so that transparent texels let what's behind them
/// show through.
pub fn enable_alpha_blending() {
    gl_call!(assert Enable(gl::BLEND));
    gl_call!(assert BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA));
}

pub fn disable_blending() {
    gl_call!(assert Disable(gl::BLEND));
}

pub fn clear_color(r: f32, g: f32, b: f32, a: f32) {
    gl_call!(assert ClearColor(r, g, b, a));
}

pub fn clear() {
    gl_call!(assert Clear(gl::COLOR_BUFFER_BIT));
}
