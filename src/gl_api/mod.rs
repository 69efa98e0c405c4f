#[macro_use]
pub mod error;
#[macro_use]
pub mod layout;

pub mod buffer;
pub mod context;
mod draw;
pub mod limits;
pub mod misc;
mod objects;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod vertex_array;

pub use self::{
    buffer::{Buffer, IndexBuffer, UsageType, VertexBuffer},
    context::Context,
    draw::{BufferIndex, PrimitiveType},
    error::{GlError, GlResult},
    layout::{Layout, Normalized, VertexBufferLayout},
    shader::{Shader, ShaderError},
    texture::{Texture, TextureError},
    uniform::{TextureUnit, Uniform},
    vertex_array::{VertexArray, VertexArrayError},
};
