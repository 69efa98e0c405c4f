use cgmath::{Matrix, Matrix2, Matrix3, Matrix4, Point2, Point3, Vector2, Vector3, Vector4};

pub type UniformLocation = gl::types::GLint;

/// Values that can be uploaded to a uniform of the currently bound program.
pub trait Uniform {
    fn set_uniform(&self, location: UniformLocation);
}

impl<'a, U: Uniform + ?Sized> Uniform for &'a U {
    fn set_uniform(&self, location: UniformLocation) {
        (**self).set_uniform(location)
    }
}

/// A texture slot, as seen by a `sampler2D` uniform. Set this to the same
/// slot the texture was bound to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureUnit(pub u32);

macro_rules! uniform {
    // Macro cleanliness means that we can't use `self` in the macro invocation scope
    // without first introducing it into scope there (slightly unfortunate)
    ($self:ident, $type:ty => $func:ident($($expr:expr),*)) => (
        impl Uniform for $type {
            #[inline(always)]
            fn set_uniform(&$self, location: UniformLocation) {
                gl_call!(debug $func(location, $($expr),*));
            }
        }
    )
}

uniform!(self, TextureUnit => Uniform1i(self.0 as i32));

uniform!(self, f32 => Uniform1f(*self));
uniform!(self, [f32; 1] => Uniform1f(self[0]));
uniform!(self, [f32; 2] => Uniform2f(self[0], self[1]));
uniform!(self, [f32; 3] => Uniform3f(self[0], self[1], self[2]));
uniform!(self, [f32; 4] => Uniform4f(self[0], self[1], self[2], self[3]));
uniform!(self, (f32, f32) => Uniform2f(self.0, self.1));
uniform!(self, (f32, f32, f32) => Uniform3f(self.0, self.1, self.2));
uniform!(self, (f32, f32, f32, f32) => Uniform4f(self.0, self.1, self.2, self.3));
uniform!(self, Vector2<f32> => Uniform2f(self.x, self.y));
uniform!(self, Vector3<f32> => Uniform3f(self.x, self.y, self.z));
uniform!(self, Vector4<f32> => Uniform4f(self.x, self.y, self.z, self.w));
uniform!(self, Point2<f32> => Uniform2f(self.x, self.y));
uniform!(self, Point3<f32> => Uniform3f(self.x, self.y, self.z));

uniform!(self, i32 => Uniform1i(*self));
uniform!(self, [i32; 2] => Uniform2i(self[0], self[1]));
uniform!(self, [i32; 3] => Uniform3i(self[0], self[1], self[2]));
uniform!(self, [i32; 4] => Uniform4i(self[0], self[1], self[2], self[3]));
uniform!(self, Vector2<i32> => Uniform2i(self.x, self.y));
uniform!(self, Vector3<i32> => Uniform3i(self.x, self.y, self.z));
uniform!(self, Vector4<i32> => Uniform4i(self.x, self.y, self.z, self.w));

uniform!(self, u32 => Uniform1ui(*self));
uniform!(self, [u32; 2] => Uniform2ui(self[0], self[1]));
uniform!(self, [u32; 3] => Uniform3ui(self[0], self[1], self[2]));
uniform!(self, [u32; 4] => Uniform4ui(self[0], self[1], self[2], self[3]));

uniform!(self, bool => Uniform1i(*self as i32));

// cgmath matrices are column-major, same as GL, so no transpose
uniform!(self, Matrix4<f32> => UniformMatrix4fv(1, gl::FALSE, self.as_ptr()));
uniform!(self, Matrix3<f32> => UniformMatrix3fv(1, gl::FALSE, self.as_ptr()));
uniform!(self, Matrix2<f32> => UniformMatrix2fv(1, gl::FALSE, self.as_ptr()));

uniform!(self, [f32] => Uniform1fv(self.len() as i32, self.as_ptr()));
uniform!(self, [i32] => Uniform1iv(self.len() as i32, self.as_ptr()));
uniform!(self, [Vector2<f32>] => Uniform2fv(self.len() as i32, self.as_ptr() as *const f32));
uniform!(self, [Vector3<f32>] => Uniform3fv(self.len() as i32, self.as_ptr() as *const f32));
uniform!(self, [Vector4<f32>] => Uniform4fv(self.len() as i32, self.as_ptr() as *const f32));
uniform!(self, [Matrix4<f32>] => UniformMatrix4fv(self.len() as i32, gl::FALSE, self.as_ptr() as *const f32));
