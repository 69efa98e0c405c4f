use gl::types::GLenum;

pub type GlResult<T> = Result<T, GlError>;

/// An error flag pulled out of `glGetError`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct GlError {
    code: GLenum,
}

impl GlError {
    pub fn from_code(code: GLenum) -> Self {
        GlError { code }
    }

    /// Reads the next error flag. A code of `GL_NO_ERROR` means there was
    /// nothing left to read.
    pub fn get() -> Self {
        GlError {
            code: unsafe { gl::GetError() },
        }
    }

    /// Drains every pending error flag so that the next check only reports
    /// errors raised by the call that follows.
    pub fn clear() {
        // a lost context keeps reporting GL_CONTEXT_LOST, so bail out instead of
        // spinning forever.
        for _ in 0..64 {
            if unsafe { gl::GetError() } == gl::NO_ERROR {
                return;
            }
        }
    }

    pub fn result<T>(self, res: T) -> GlResult<T> {
        match self.code {
            gl::NO_ERROR => Ok(res),
            _ => Err(self),
        }
    }

    pub fn code(&self) -> GLenum {
        self.code
    }

    pub fn name(&self) -> &'static str {
        match self.code {
            gl::NO_ERROR => "GL_NO_ERROR",
            gl::INVALID_ENUM => "GL_INVALID_ENUM",
            gl::INVALID_VALUE => "GL_INVALID_VALUE",
            gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
            gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            _ => "unknown",
        }
    }
}

impl std::fmt::Debug for GlError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{:04X} {}", self.code, self.name())
    }
}

impl std::fmt::Display for GlError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for GlError {}

/// Wraps a raw `gl::*` call with error checking.
///
/// - `gl_call!(Name(args))` evaluates to a `GlResult` holding the call's return
///   value, and logs the failing call with its source location.
/// - `gl_call!(assert Name(args))` panics on failure. Only for calls that
///   cannot fail when handed handles that the wrappers own.
/// - `gl_call!(debug Name(args))` only checks in debug builds.
#[macro_export]
macro_rules! gl_call {
    ($name:ident($($args:expr),*)) => {{
        $crate::gl_api::error::GlError::clear();
        #[allow(unused_unsafe)]
        let ret = unsafe { $crate::gl::$name($($args),*) };
        let res = $crate::gl_api::error::GlError::get().result(ret);
        if let Err(err) = &res {
            $crate::log::error!(
                "gl{} failed with {} at {}:{}",
                stringify!($name), err, file!(), line!()
            );
        }
        res
    }};

    (assert $name:ident($($args:expr),*)) => {{
        $crate::gl_api::error::GlError::clear();
        #[allow(unused_unsafe)]
        let ret = unsafe { $crate::gl::$name($($args),*) };
        match $crate::gl_api::error::GlError::get().result(ret) {
            Err(err) => panic!("gl{} failed with error code {:?}", stringify!($name), err),
            Ok(res) => res,
        }
    }};

    (debug $name:ident($($args:expr),*)) => {{
        if cfg!(debug_assertions) {
            $crate::gl_api::error::GlError::clear();
        }
        #[allow(unused_unsafe)]
        let ret = unsafe { $crate::gl::$name($($args),*) };
        if cfg!(debug_assertions) {
            if let Err(err) = $crate::gl_api::error::GlError::get().result(()) {
                panic!("gl{} failed with error code {:?}", stringify!($name), err);
            }
        }
        ret
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        os::raw::c_void,
        sync::atomic::{AtomicU32, Ordering},
    };

    #[test]
    fn known_codes_have_symbolic_names() {
        assert_eq!(GlError::from_code(gl::INVALID_ENUM).name(), "GL_INVALID_ENUM");
        assert_eq!(GlError::from_code(gl::OUT_OF_MEMORY).name(), "GL_OUT_OF_MEMORY");
        assert_eq!(GlError::from_code(0xDEAD).name(), "unknown");
    }

    #[test]
    fn display_matches_debug() {
        let err = GlError::from_code(gl::INVALID_OPERATION);
        assert_eq!(err.to_string(), "0x0502 GL_INVALID_OPERATION");
        assert_eq!(format!("{:?}", err), "0x0502 GL_INVALID_OPERATION");
    }

    #[test]
    fn no_error_converts_to_ok() {
        assert_eq!(GlError::from_code(gl::NO_ERROR).result(7), Ok(7));
        assert!(GlError::from_code(gl::INVALID_VALUE).result(()).is_err());
    }

    static PENDING: AtomicU32 = AtomicU32::new(gl::NO_ERROR);

    extern "system" fn fake_get_error() -> GLenum {
        PENDING.swap(gl::NO_ERROR, Ordering::SeqCst)
    }

    extern "system" fn fake_flush() {}

    #[test]
    fn debug_calls_ignore_errors_raised_before_them() {
        gl::GetError::load_with(|_| fake_get_error as *const c_void);
        gl::Flush::load_with(|_| fake_flush as *const c_void);

        // left over from some earlier call; glFlush itself succeeds
        PENDING.store(gl::INVALID_ENUM, Ordering::SeqCst);
        gl_call!(debug Flush());
        assert_eq!(PENDING.load(Ordering::SeqCst), gl::NO_ERROR);
    }
}
