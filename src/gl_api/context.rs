use crate::gl_api::limits::Limits;
use gl::types::GLenum;
use std::{cell::Cell, ffi::CStr, os::raw::c_void, rc::Rc};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewportRect {
    pub x: i32,
    pub width: u32,
    pub y: i32,
    pub height: u32,
}

impl ViewportRect {
    pub fn with_size(width: u32, height: u32) -> Self {
        ViewportRect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn query() -> Self {
        let mut r = [0i32; 4];
        gl_call!(assert GetIntegerv(gl::VIEWPORT, r.as_mut_ptr()));
        ViewportRect {
            x: r[0],
            y: r[1],
            width: r[2] as u32,
            height: r[3] as u32,
        }
    }
}

impl From<(i32, i32)> for ViewportRect {
    fn from((width, height): (i32, i32)) -> Self {
        ViewportRect::with_size(width.max(0) as u32, height.max(0) as u32)
    }
}

/// Strings the driver reports about itself.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DriverInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub shading_language: String,
}

fn get_string(name: GLenum) -> String {
    let ptr = gl_call!(assert GetString(name));
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: glGetString hands back a static, nul-terminated string owned by the driver
    unsafe { CStr::from_ptr(ptr as *const _) }
        .to_string_lossy()
        .into_owned()
}

impl DriverInfo {
    fn query() -> Self {
        DriverInfo {
            version: get_string(gl::VERSION),
            vendor: get_string(gl::VENDOR),
            renderer: get_string(gl::RENDERER),
            shading_language: get_string(gl::SHADING_LANGUAGE_VERSION),
        }
    }
}

/// Proof that an OpenGL context is current on this thread. Every wrapper that
/// creates a GL object asks for one, and since this type is neither `Send`
/// nor `Sync`, those objects stay on the thread that owns the context.
#[derive(Clone, Debug)]
pub struct Context(Rc<ContextInner>);

#[derive(Debug)]
struct ContextInner {
    // Make sure this isn't Send or Sync
    _marker: std::marker::PhantomData<*mut ()>,

    info: DriverInfo,
    limits: Limits,
    viewport: Cell<ViewportRect>,
}

impl Context {
    /// Loads every GL entry point through `load_fn`. The context that
    /// `load_fn` resolves symbols for must already be current.
    pub fn load<F>(mut load_fn: F) -> Context
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(|symbol| load_fn(symbol));

        Context(Rc::new(ContextInner {
            _marker: std::marker::PhantomData,

            info: DriverInfo::query(),
            limits: Limits::load(),
            viewport: Cell::new(ViewportRect::query()),
        }))
    }

    pub fn info(&self) -> &DriverInfo {
        &self.0.info
    }

    pub fn limits(&self) -> &Limits {
        &self.0.limits
    }

    pub fn set_viewport<R>(&self, rect: R)
    where
        R: Into<ViewportRect>,
    {
        let rect = rect.into();
        self.0.viewport.set(rect);
        gl_call!(assert Viewport(rect.x, rect.y, rect.width as i32, rect.height as i32))
    }

    pub fn viewport(&self) -> ViewportRect {
        self.0.viewport.get()
    }
}
