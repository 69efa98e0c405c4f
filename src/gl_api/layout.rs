use cgmath::*;
use gl::types::GLenum;
use std::mem;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum Type {
    F32 = gl::FLOAT,
    F64 = gl::DOUBLE,
    I32 = gl::INT,
    U32 = gl::UNSIGNED_INT,
    I16 = gl::SHORT,
    U16 = gl::UNSIGNED_SHORT,
    I8 = gl::BYTE,
    U8 = gl::UNSIGNED_BYTE,
}

impl Type {
    pub fn size(&self) -> usize {
        match *self {
            Type::F64 => 8,
            Type::F32 | Type::U32 | Type::I32 => 4,
            Type::U16 | Type::I16 => 2,
            Type::U8 | Type::I8 => 1,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(*self, Type::F32 | Type::F64)
    }

    pub fn gl_enum(&self) -> GLenum {
        *self as GLenum
    }
}

/// Scalar types a vertex attribute can be built from.
pub trait Component: Copy + 'static {
    const TYPE: Type;
    /// Whether [`VertexBufferLayout::push`] maps this type into `[0, 1]` (or
    /// `[-1, 1]` for signed types) instead of converting it straight to float.
    const NORMALIZED: bool = false;
}

macro_rules! component {
    ($type:ty => $gl:ident) => {
        impl Component for $type {
            const TYPE: Type = Type::$gl;
        }
    };
    ($type:ty => $gl:ident, normalized) => {
        impl Component for $type {
            const TYPE: Type = Type::$gl;
            const NORMALIZED: bool = true;
        }
    };
}

component!(f32 => F32);
component!(i32 => I32);
component!(u32 => U32);
component!(i16 => I16);
component!(u16 => U16);
component!(i8 => I8);
// bytes are nearly always colors
component!(u8 => U8, normalized);

/// One attribute inside an interleaved vertex.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexBufferElement {
    pub ty: Type,
    /// Number of components, 1 through 4.
    pub count: usize,
    pub normalized: bool,
    /// Integer attributes are read with `glVertexAttribIPointer` and show up
    /// in the shader as `int`/`uint` instead of `float`.
    pub integer: bool,
    /// Byte offset of the attribute from the start of the vertex.
    pub offset: usize,
}

impl VertexBufferElement {
    pub fn size(&self) -> usize {
        self.count * self.ty.size()
    }
}

/// Describes how the bytes of a vertex buffer split into attributes. Elements
/// are assigned consecutive attribute indices in the order they were pushed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: usize,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout for vertices of a known size, whose attributes get placed at
    /// explicit offsets with [`VertexBufferLayout::push_element`].
    pub fn with_stride(stride: usize) -> Self {
        VertexBufferLayout {
            elements: Vec::new(),
            stride,
        }
    }

    /// Appends `count` tightly packed components of type `T` after the
    /// previous attribute.
    pub fn push<T: Component>(&mut self, count: usize) -> &mut Self {
        self.push_packed(T::TYPE, count, T::NORMALIZED, false)
    }

    /// Like [`VertexBufferLayout::push`], but the values reach the shader as
    /// integers.
    pub fn push_integer<T: Component>(&mut self, count: usize) -> &mut Self {
        assert!(T::TYPE.is_integer(), "{:?} is not an integer type", T::TYPE);
        self.push_packed(T::TYPE, count, false, true)
    }

    fn push_packed(&mut self, ty: Type, count: usize, normalized: bool, integer: bool) -> &mut Self {
        assert!((1..=4).contains(&count), "attributes have 1 to 4 components, not {}", count);
        let element = VertexBufferElement {
            ty,
            count,
            normalized,
            integer,
            offset: self.stride,
        };
        self.stride += element.size();
        self.elements.push(element);
        self
    }

    /// Places an element at its own offset. The stride only grows if the
    /// element sticks out past it.
    pub fn push_element(&mut self, element: VertexBufferElement) -> &mut Self {
        self.stride = self.stride.max(element.offset + element.size());
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Byte distance between the starts of two consecutive vertices.
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Types usable as a single field of a [`vertex!`] struct.
pub unsafe trait Attribute: Copy + 'static {
    fn element(offset: usize) -> VertexBufferElement;
}

/// Integer data of this type will be converted to a float in the shader and
/// normalized, so that unsigned types get mapped to `[0, 1]` and signed types
/// get mapped to `[-1, 1]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Normalized<T>(pub T);

macro_rules! attribute {
    ($type:ty, $ty:expr, $count:expr, $norm:expr, $int:expr) => {
        unsafe impl Attribute for $type {
            fn element(offset: usize) -> VertexBufferElement {
                VertexBufferElement {
                    ty: $ty,
                    count: $count,
                    normalized: $norm,
                    integer: $int,
                    offset,
                }
            }
        }
    };

    (group $type:ty, $ty:expr, $norm:expr, $int:expr) => {
        attribute!($type, $ty, 1, $norm, $int);

        attribute!([$type; 1], $ty, 1, $norm, $int);
        attribute!([$type; 2], $ty, 2, $norm, $int);
        attribute!([$type; 3], $ty, 3, $norm, $int);
        attribute!([$type; 4], $ty, 4, $norm, $int);

        attribute!(Vector1<$type>, $ty, 1, $norm, $int);
        attribute!(Vector2<$type>, $ty, 2, $norm, $int);
        attribute!(Vector3<$type>, $ty, 3, $norm, $int);
        attribute!(Vector4<$type>, $ty, 4, $norm, $int);

        attribute!(Point1<$type>, $ty, 1, $norm, $int);
        attribute!(Point2<$type>, $ty, 2, $norm, $int);
        attribute!(Point3<$type>, $ty, 3, $norm, $int);
    };

    (normalized $type:ty, $ty:expr) => {
        attribute!(Normalized<$type>, $ty, 1, true, false);
        attribute!(Normalized<[$type; 2]>, $ty, 2, true, false);
        attribute!(Normalized<[$type; 3]>, $ty, 3, true, false);
        attribute!(Normalized<[$type; 4]>, $ty, 4, true, false);
    };
}

attribute!(group f32, Type::F32, false, false);

attribute!(group i32, Type::I32, false, true);
attribute!(group i16, Type::I16, false, true);
attribute!(group i8, Type::I8, false, true);
attribute!(group u32, Type::U32, false, true);
attribute!(group u16, Type::U16, false, true);
attribute!(group u8, Type::U8, false, true);

attribute!(normalized i16, Type::I16);
attribute!(normalized i8, Type::I8);
attribute!(normalized u16, Type::U16);
attribute!(normalized u8, Type::U8);

/// A vertex type that knows its own layout.
///
/// # Safety
///
/// The layout must describe the real in-memory representation of `Self`.
/// Implementations generated by [`vertex!`] uphold this.
pub unsafe trait Layout: Copy + 'static {
    fn layout() -> VertexBufferLayout;
}

/// Declares a `#[repr(C)]` vertex struct along with a [`Layout`] describing
/// it. Attribute indices follow field order.
///
/// ```ignore
/// vertex! {
///     pub struct PosUv {
///         pub pos: [f32; 2],
///         pub uv: [f32; 2],
///     }
/// }
/// ```
#[macro_export]
macro_rules! vertex {
    ($(#[$meta:meta])* $vis:vis struct $name:ident {
        $($field_vis:vis $field:ident: $field_ty:ty),* $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq)]
        #[repr(C)]
        $vis struct $name {
            $($field_vis $field: $field_ty),*
        }

        unsafe impl $crate::gl_api::layout::Layout for $name {
            fn layout() -> $crate::gl_api::layout::VertexBufferLayout {
                let mut layout = $crate::gl_api::layout::VertexBufferLayout::with_stride(
                    ::std::mem::size_of::<$name>(),
                );
                $(
                    layout.push_element(
                        <$field_ty as $crate::gl_api::layout::Attribute>::element(
                            ::std::mem::offset_of!($name, $field),
                        ),
                    );
                )*
                layout
            }
        }
    };
}

/// Size in bytes of one vertex of type `V`.
pub fn vertex_size<V: Layout>() -> usize {
    mem::size_of::<V>()
}

#[cfg(test)]
mod tests {
    use super::*;

    vertex! {
        struct PosUv {
            pos: [f32; 2],
            uv: Vector2<f32>,
        }
    }

    vertex! {
        struct Colored {
            pos: Point3<f32>,
            color: Normalized<[u8; 4]>,
            id: u32,
        }
    }

    #[test]
    fn push_accumulates_stride_and_offsets() {
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);

        assert_eq!(layout.stride(), 16);
        let offsets: Vec<_> = layout.elements().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 8]);
        assert!(layout.elements().iter().all(|e| e.ty == Type::F32 && !e.normalized));
    }

    #[test]
    fn bytes_are_normalized_and_integers_are_not() {
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3).push::<u8>(4).push::<u32>(1);

        let elements = layout.elements();
        assert_eq!(layout.stride(), 12 + 4 + 4);
        assert!(elements[1].normalized);
        assert!(!elements[2].normalized);
        assert!(!elements[2].integer);
    }

    #[test]
    fn push_integer_marks_integer_attributes() {
        let mut layout = VertexBufferLayout::new();
        layout.push_integer::<i16>(2);

        assert_eq!(layout.stride(), 4);
        assert!(layout.elements()[0].integer);
        assert!(!layout.elements()[0].normalized);
    }

    #[test]
    #[should_panic]
    fn push_integer_rejects_floats() {
        VertexBufferLayout::new().push_integer::<f32>(1);
    }

    #[test]
    #[should_panic]
    fn too_many_components_panics() {
        VertexBufferLayout::new().push::<f32>(5);
    }

    #[test]
    fn vertex_macro_uses_field_offsets() {
        let layout = PosUv::layout();
        assert_eq!(layout.stride(), vertex_size::<PosUv>());
        assert_eq!(layout.stride(), 16);

        let elements = layout.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!((elements[0].offset, elements[0].count), (0, 2));
        assert_eq!((elements[1].offset, elements[1].count), (8, 2));
    }

    #[test]
    fn vertex_macro_handles_mixed_types() {
        let layout = Colored::layout();
        let elements = layout.elements();

        assert_eq!(layout.stride(), 20);
        assert_eq!(elements[0].ty, Type::F32);
        assert_eq!(elements[1].offset, 12);
        assert!(elements[1].normalized && !elements[1].integer);
        assert_eq!(elements[2].offset, 16);
        assert!(elements[2].integer);
    }

    #[test]
    fn push_element_keeps_larger_stride() {
        let mut layout = VertexBufferLayout::with_stride(20);
        layout.push_element(<[f32; 2]>::element(0));
        assert_eq!(layout.stride(), 20);

        layout.push_element(<[f32; 4]>::element(16));
        assert_eq!(layout.stride(), 32);
    }
}
