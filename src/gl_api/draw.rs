use gl::types::*;

/// Integer types that can live in an index buffer.
pub trait BufferIndex: Copy + Sized + 'static {
    const INDEX_TYPE: GLenum;
}

impl BufferIndex for u8 {
    const INDEX_TYPE: GLenum = gl::UNSIGNED_BYTE;
}

impl BufferIndex for u16 {
    const INDEX_TYPE: GLenum = gl::UNSIGNED_SHORT;
}

impl BufferIndex for u32 {
    const INDEX_TYPE: GLenum = gl::UNSIGNED_INT;
}

#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
    Points = gl::POINTS,
    Lines = gl::LINES,
    LineStrip = gl::LINE_STRIP,
    LineLoop = gl::LINE_LOOP,
    Triangles = gl::TRIANGLES,
    TriangleStrip = gl::TRIANGLE_STRIP,
    TriangleFan = gl::TRIANGLE_FAN,
}
