use gl::types::GLenum;

/// Implementation-defined maximums that the wrappers check against before
/// handing values to the driver.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Limits {
    pub max_texture_size: u32,
    pub max_combined_texture_units: u32,
    pub max_vertex_attribs: u32,
}

fn get_integer(name: GLenum) -> u32 {
    let mut value = 0;
    gl_call!(assert GetIntegerv(name, &mut value));
    value.max(0) as u32
}

impl Limits {
    pub(crate) fn load() -> Self {
        Limits {
            max_texture_size: get_integer(gl::MAX_TEXTURE_SIZE),
            max_combined_texture_units: get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS),
            max_vertex_attribs: get_integer(gl::MAX_VERTEX_ATTRIBS),
        }
    }
}
