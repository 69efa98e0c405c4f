use crate::gl_api::{
    buffer::VertexBuffer,
    context::Context,
    error::GlResult,
    layout::{Layout, VertexBufferElement, VertexBufferLayout},
    objects::RawVertexArray,
};
use gl::types::*;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum VertexArrayError {
    #[error("layout needs attribute {index}, but only {max} vertex attributes are available")]
    TooManyAttributes { index: u32, max: u32 },

    #[error(transparent)]
    Gl(#[from] crate::gl_api::error::GlError),
}

/// Ties vertex buffers to the attribute layout describing them. Once
/// configured, binding the vertex array restores all of that state at once.
#[derive(Debug)]
pub struct VertexArray {
    raw: RawVertexArray,
    index: u32,
}

impl VertexArray {
    pub fn new(ctx: &Context) -> Self {
        VertexArray {
            raw: RawVertexArray::new(ctx),
            index: 0,
        }
    }

    pub fn bind(&self) {
        // our ID should always be valid
        gl_call!(assert BindVertexArray(self.raw.id));
    }

    pub fn unbind(&self) {
        gl_call!(assert BindVertexArray(0));
    }

    /// The attribute index the next element will be assigned.
    pub fn next_index(&self) -> u32 {
        self.index
    }

    /// Describes `buffer` with `layout`. Elements take the attribute indices
    /// following any buffers added before this one.
    pub fn add_buffer<T: Copy>(
        &mut self,
        buffer: &VertexBuffer<T>,
        layout: &VertexBufferLayout,
    ) -> Result<(), VertexArrayError> {
        let max = self.raw.ctx.limits().max_vertex_attribs;
        let next = reserve_attributes(self.index, layout.elements().len(), max)?;

        self.bind();
        buffer.bind();

        for element in layout.elements() {
            attrib_pointer(self.index, element, layout.stride())?;
            self.index += 1;
        }
        debug_assert_eq!(self.index, next);

        Ok(())
    }

    /// [`VertexArray::add_buffer`] for vertex types that carry their own layout.
    pub fn add_vertex_buffer<V: Layout>(
        &mut self,
        buffer: &VertexBuffer<V>,
    ) -> Result<(), VertexArrayError> {
        self.add_buffer(buffer, &V::layout())
    }
}

/// Claims `count` attribute indices starting at `next`, returning the index
/// after the last one claimed.
fn reserve_attributes(next: u32, count: usize, max: u32) -> Result<u32, VertexArrayError> {
    let needed = next as usize + count;
    if needed > max as usize {
        return Err(VertexArrayError::TooManyAttributes {
            index: (needed - 1) as u32,
            max,
        });
    }
    Ok(needed as u32)
}

fn attrib_pointer(index: u32, element: &VertexBufferElement, stride: usize) -> GlResult<()> {
    let ty = element.ty.gl_enum();
    let size = element.count as GLint;
    let stride = stride as GLsizei;
    // with a buffer bound, the "pointer" is a byte offset into it
    let offset = element.offset as *const _;

    gl_call!(EnableVertexAttribArray(index))?;
    if element.integer {
        gl_call!(VertexAttribIPointer(index, size, ty, stride, offset))
    } else {
        let normalized = if element.normalized { gl::TRUE } else { gl::FALSE };
        gl_call!(VertexAttribPointer(index, size, ty, normalized, stride, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling_every_attribute_is_allowed() {
        assert_eq!(reserve_attributes(0, 16, 16).unwrap(), 16);
        assert_eq!(reserve_attributes(14, 2, 16).unwrap(), 16);
    }

    #[test]
    fn one_past_the_limit_is_rejected() {
        let err = reserve_attributes(14, 3, 16).unwrap_err();
        assert_eq!(err, VertexArrayError::TooManyAttributes { index: 16, max: 16 });
        assert!(reserve_attributes(16, 1, 16).is_err());
    }

    #[test]
    fn indices_continue_across_buffers() {
        let next = reserve_attributes(0, 2, 16).unwrap();
        assert_eq!(next, 2);
        let next = reserve_attributes(next, 3, 16).unwrap();
        assert_eq!(next, 5);
    }

    #[test]
    fn empty_layouts_reserve_nothing() {
        assert_eq!(reserve_attributes(0, 0, 16).unwrap(), 0);
        assert_eq!(reserve_attributes(0, 0, 0).unwrap(), 0);
        assert_eq!(reserve_attributes(16, 0, 16).unwrap(), 16);
    }

    #[test]
    fn limit_error_names_the_attribute() {
        let err = VertexArrayError::TooManyAttributes { index: 16, max: 16 };
        assert_eq!(
            err.to_string(),
            "layout needs attribute 16, but only 16 vertex attributes are available"
        );
    }
}
