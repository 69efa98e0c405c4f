//! A step-by-step OpenGL tutorial. The binaries under `src/bin` are the
//! individual steps; this library holds the pieces they share, most of all the
//! thin wrappers in [`gl_api`] that the later steps draw through.

pub use gl;
#[doc(hidden)]
pub use log;

#[macro_use]
pub mod gl_api;

pub mod animation;
pub mod config;
pub mod harness;
pub mod imgui_support;
pub mod renderer;
pub mod transform;
pub mod window;

pub use crate::{
    config::{GlVersion, RunOptions},
    renderer::Renderer,
    window::{AppWindow, WindowConfig},
};
