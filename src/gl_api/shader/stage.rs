use crate::gl_api::context::Context;
use std::fmt;

#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StageType {
    Vertex = gl::VERTEX_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StageType::Vertex => write!(f, "vertex"),
            StageType::Fragment => write!(f, "fragment"),
        }
    }
}

/// A single shader object. It only has to live until the program it is
/// attached to has been linked.
pub struct Stage {
    pub(crate) id: u32,
    pub(crate) ty: StageType,
}

impl Stage {
    pub fn new(_ctx: &Context, ty: StageType, src: &str) -> Self {
        let id = gl_call!(assert CreateShader(ty as u32));
        assert!(id > 0);
        // the length is passed explicitly, so the source doesn't need a nul terminator
        gl_call!(assert ShaderSource(id, 1, &(src.as_ptr() as *const _), &(src.len() as i32)));
        Stage { id, ty }
    }

    /// Compiles the stage, handing back the driver's info log on failure.
    pub fn compile(&self) -> Result<(), (StageType, String)> {
        let mut status = 0;

        gl_call!(assert CompileShader(self.id));
        gl_call!(assert GetShaderiv(self.id, gl::COMPILE_STATUS, &mut status));

        if status == gl::FALSE as i32 {
            return Err((self.ty, shader_info_log(self.id).unwrap_or_default()));
        }

        Ok(())
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        gl_call!(debug DeleteShader(self.id));
    }
}

fn shader_info_log(id: u32) -> Option<String> {
    let mut length = 0;
    gl_call!(assert GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut length));

    if length <= 0 {
        return None;
    }

    let mut buffer = vec![0u8; length as usize];
    let mut written = 0;
    gl_call!(assert GetShaderInfoLog(
        id,
        length,
        &mut written,
        buffer.as_mut_ptr() as *mut _
    ));
    Some(log_text(buffer, written))
}

/// Keeps only the `written` bytes the driver reported, which excludes the
/// nul terminator.
fn log_text(mut buffer: Vec<u8>, written: i32) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Reads a program's info log. Shared with linking, since both logs come
/// back the same way.
pub(crate) fn program_info_log(id: u32) -> Option<String> {
    let mut length = 0;
    gl_call!(assert GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut length));

    if length <= 0 {
        return None;
    }

    let mut buffer = vec![0u8; length as usize];
    let mut written = 0;
    gl_call!(assert GetProgramInfoLog(
        id,
        length,
        &mut written,
        buffer.as_mut_ptr() as *mut _
    ));
    Some(log_text(buffer, written))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_stop_at_the_written_count() {
        // drivers may report a larger buffer than the text they write
        let mut buffer = b"error: oops\0".to_vec();
        buffer.resize(32, 0);
        assert_eq!(log_text(buffer, 11), "error: oops");
    }

    #[test]
    fn nothing_written_gives_an_empty_log() {
        assert_eq!(log_text(vec![0; 8], 0), "");
        assert_eq!(log_text(vec![0; 8], -1), "");
    }

    #[test]
    fn stages_display_lowercase() {
        assert_eq!(StageType::Vertex.to_string(), "vertex");
        assert_eq!(StageType::Fragment.to_string(), "fragment");
    }
}
