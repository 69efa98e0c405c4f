use crate::gl_api::{
    context::Context, error::GlResult, misc, BufferIndex, IndexBuffer, PrimitiveType, Shader,
    VertexArray,
};
use std::ptr;

/// Issues the draw calls. Holds nothing but the context, so creating one per
/// scene is free.
#[derive(Clone, Debug)]
pub struct Renderer {
    ctx: Context,
}

impl Renderer {
    pub fn new(ctx: &Context) -> Self {
        Renderer { ctx: ctx.clone() }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        misc::clear_color(r, g, b, a);
    }

    pub fn clear(&self) {
        misc::clear();
    }

    /// Draws the triangles described by `ib`, reading vertices through `va`.
    pub fn draw<I: BufferIndex>(&self, va: &VertexArray, ib: &IndexBuffer<I>, shader: &Shader) -> GlResult<()> {
        shader.bind();
        va.bind();
        ib.bind();
        // the index buffer bound to the vertex array is where the indices come
        // from, so the "pointer" is an offset into it
        gl_call!(DrawElements(
            PrimitiveType::Triangles as u32,
            ib.count() as i32,
            ib.index_type(),
            ptr::null()
        ))
    }

    /// Draws `count` vertices in order, without an index buffer.
    pub fn draw_arrays(&self, va: &VertexArray, shader: &Shader, primitive: PrimitiveType, count: usize) -> GlResult<()> {
        shader.bind();
        va.bind();
        gl_call!(DrawArrays(primitive as u32, 0, count as i32))
    }
}
