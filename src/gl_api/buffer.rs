use crate::gl_api::{context::Context, draw::BufferIndex, objects::RawBuffer};
use gl::types::*;
use std::{marker::PhantomData, mem};

// Buffer targets described in section 6.1 of the GL spec. These are the only
// two the tutorial needs.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    Array = gl::ARRAY_BUFFER,
    Element = gl::ELEMENT_ARRAY_BUFFER,
}

// Values from section 6.2 of the GL spec
/// Usage type for buffers, provided as a performance hint. These values do not affect the behavior
/// of the buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum UsageType {
    /// The data store contents will be specified once by the application, and sourced at most a few times.
    StreamDraw = gl::STREAM_DRAW,
    /// The data store contents will be specified once by reading data from the GL, and queried at most a few times by the application.
    StreamRead = gl::STREAM_READ,
    /// The data store contents will be specified once by reading data from the GL, and sourced at most a few times
    StreamCopy = gl::STREAM_COPY,
    /// The data store contents will be specified once by the application, and sourced many times.
    StaticDraw = gl::STATIC_DRAW,
    /// The data store contents will be specified once by reading data from the GL, and queried many times by the application.
    StaticRead = gl::STATIC_READ,
    /// The data store contents will be specified once by reading data from the GL, and sourced many times.
    StaticCopy = gl::STATIC_COPY,
    /// The data store contents will be respecified repeatedly by the application, and sourced many times.
    DynamicDraw = gl::DYNAMIC_DRAW,
    /// The data store contents will be respecified repeatedly by reading data from the GL, and queried many times by the application.
    DynamicRead = gl::DYNAMIC_READ,
    /// The data store contents will be respecified repeatedly by reading data from the GL, and sourced many times.
    DynamicCopy = gl::DYNAMIC_COPY,
}

/// Byte size of a slice, in the type `glBufferData` wants.
pub fn byte_len<T>(data: &[T]) -> GLsizeiptr {
    (mem::size_of::<T>() * data.len()) as GLsizeiptr
}

/// A handle to GPU-allocated memory holding elements of type `T`. Any useful
/// operation must happen on the thread that owns the context, which is
/// enforced by the buffer holding on to that context.
#[derive(Debug, Eq, PartialEq)]
pub struct Buffer<T> {
    raw: RawBuffer,
    target: BufferTarget,
    len: usize,
    _phantom: PhantomData<*const T>,
}

impl<T: Copy> Buffer<T> {
    pub fn new(ctx: &Context, target: BufferTarget) -> Self {
        Buffer {
            raw: RawBuffer::new(ctx),
            target,
            len: 0,
            _phantom: PhantomData,
        }
    }

    pub fn bind(&self) {
        gl_call!(assert BindBuffer(self.target as u32, self.raw.id));
    }

    pub fn unbind(&self) {
        gl_call!(assert BindBuffer(self.target as u32, 0));
    }

    /// Binds the buffer and replaces its whole data store with a copy of
    /// `data`.
    pub fn upload(&mut self, data: &[T], usage_type: UsageType) {
        self.bind();
        self.len = data.len();
        // Could fail if OOM
        gl_call!(assert BufferData(
            self.target as u32,
            byte_len(data),
            data.as_ptr() as *const _,
            usage_type as GLenum
        ));
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn id(&self) -> GLuint {
        self.raw.id
    }

    pub fn context(&self) -> &Context {
        &self.raw.ctx
    }
}

/// A buffer bound to `GL_ARRAY_BUFFER`, holding per-vertex data.
#[derive(Debug)]
pub struct VertexBuffer<T> {
    buffer: Buffer<T>,
    usage: UsageType,
}

impl<T: Copy> VertexBuffer<T> {
    pub fn new(ctx: &Context, data: &[T], usage: UsageType) -> Self {
        let mut buffer = Buffer::new(ctx, BufferTarget::Array);
        buffer.upload(data, usage);
        VertexBuffer { buffer, usage }
    }

    /// Replaces the buffer's contents, keeping the usage hint it was created
    /// with.
    pub fn update(&mut self, data: &[T]) {
        self.buffer.upload(data, self.usage);
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// A buffer bound to `GL_ELEMENT_ARRAY_BUFFER`. Each index refers to a vertex
/// in whatever vertex buffers the vertex array currently describes, which is
/// what lets a quad share its corners between two triangles.
#[derive(Debug)]
pub struct IndexBuffer<I> {
    buffer: Buffer<I>,
}

impl<I: BufferIndex> IndexBuffer<I> {
    pub fn new(ctx: &Context, indices: &[I]) -> Self {
        Self::with_usage(ctx, indices, UsageType::StaticDraw)
    }

    pub fn with_usage(ctx: &Context, indices: &[I], usage: UsageType) -> Self {
        let mut buffer = Buffer::new(ctx, BufferTarget::Element);
        buffer.upload(indices, usage);
        IndexBuffer { buffer }
    }

    pub fn update(&mut self, indices: &[I], usage: UsageType) {
        self.buffer.upload(indices, usage);
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }

    /// Number of indices, which is what `glDrawElements` wants as its count.
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    pub fn index_type(&self) -> GLenum {
        I::INDEX_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_counts_bytes_not_elements() {
        let positions = [0.0f32; 8];
        assert_eq!(byte_len(&positions), 32);

        let indices = [0u16; 6];
        assert_eq!(byte_len(&indices), 12);

        let empty: [u32; 0] = [];
        assert_eq!(byte_len(&empty), 0);
    }
}
