use crate::gl_api::{
    context::Context,
    shader::{
        parse::ShaderProgramSource,
        stage::{program_info_log, Stage, StageType},
        ShaderError,
    },
    uniform::{TextureUnit, Uniform, UniformLocation},
};
use cgmath::Matrix4;
use gl::types::*;
use std::{collections::HashMap, ffi::CString, fs, path::Path};

pub struct RawProgram {
    id: u32,
}

impl RawProgram {
    pub fn new(_ctx: &Context) -> Self {
        let id = gl_call!(assert CreateProgram());
        assert!(id > 0);
        RawProgram { id }
    }
}

impl Drop for RawProgram {
    fn drop(&mut self) {
        gl_call!(debug DeleteProgram(self.id));
    }
}

/// Remembers every uniform lookup, including the ones that came back as `-1`,
/// so each name only goes to the driver once.
#[derive(Clone, Debug, Default)]
pub struct UniformCache {
    locations: HashMap<String, UniformLocation>,
}

impl UniformCache {
    /// Returns the cached location for `name`, or asks `lookup` for it. A
    /// missing uniform gets a warning the first time it is looked up and is
    /// silently reused after that.
    pub fn get_or_lookup<F>(&mut self, name: &str, lookup: F) -> UniformLocation
    where
        F: FnOnce(&str) -> UniformLocation,
    {
        if let Some(&location) = self.locations.get(name) {
            return location;
        }

        let location = lookup(name);
        if location == -1 {
            log::warn!("uniform `{}` doesn't exist!", name);
        }
        self.locations.insert(name.into(), location);
        location
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// A linked vertex + fragment program.
pub struct Shader {
    raw: RawProgram,
    uniform_cache: UniformCache,
}

impl Shader {
    /// Reads a combined `#shader` file, then compiles and links it.
    pub fn from_file<P: AsRef<Path>>(ctx: &Context, path: P) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.into(),
            source,
        })?;

        log::debug!("compiling shader `{}`", path.display());
        Self::from_source(ctx, &source)
    }

    /// Same as [`Shader::from_file`], for a combined source already in memory.
    pub fn from_source(ctx: &Context, source: &str) -> Result<Self, ShaderError> {
        let source = ShaderProgramSource::parse(source)?;
        Self::from_stages(ctx, &source.vertex, &source.fragment)
    }

    pub fn from_stages(ctx: &Context, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let vertex = Stage::new(ctx, StageType::Vertex, vertex);
        let fragment = Stage::new(ctx, StageType::Fragment, fragment);

        vertex
            .compile()
            .and_then(|_| fragment.compile())
            .map_err(|(stage, log)| ShaderError::Compile { stage, log })?;

        let raw = RawProgram::new(ctx);
        gl_call!(assert AttachShader(raw.id, vertex.id));
        gl_call!(assert AttachShader(raw.id, fragment.id));

        gl_call!(assert LinkProgram(raw.id));
        if !program_status(raw.id, gl::LINK_STATUS) {
            return Err(ShaderError::Link(program_info_log(raw.id).unwrap_or_default()));
        }

        // Validation depends on the state the program will be drawn with, which
        // isn't set up yet. A failure here is worth knowing about but not fatal.
        gl_call!(assert ValidateProgram(raw.id));
        if !program_status(raw.id, gl::VALIDATE_STATUS) {
            log::warn!(
                "shader program failed validation: {}",
                program_info_log(raw.id).unwrap_or_default()
            );
        }

        gl_call!(assert DetachShader(raw.id, vertex.id));
        gl_call!(assert DetachShader(raw.id, fragment.id));
        // the stages get deleted here

        Ok(Shader {
            raw,
            uniform_cache: UniformCache::default(),
        })
    }

    pub fn bind(&self) {
        gl_call!(assert UseProgram(self.raw.id));
    }

    pub fn unbind(&self) {
        gl_call!(assert UseProgram(0));
    }

    pub fn id(&self) -> GLuint {
        self.raw.id
    }

    /// Binds the program and uploads `value` to the uniform called `name`.
    /// Setting a uniform that the program doesn't have does nothing.
    pub fn set_uniform<U: Uniform + ?Sized>(&mut self, name: &str, value: &U) {
        let location = self.uniform_location(name);
        if location == -1 {
            return;
        }
        self.bind();
        value.set_uniform(location);
    }

    pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
        self.set_uniform(name, &value);
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: f32) {
        self.set_uniform(name, &value);
    }

    pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.set_uniform(name, &[v0, v1, v2, v3]);
    }

    pub fn set_uniform_mat4f(&mut self, name: &str, matrix: &Matrix4<f32>) {
        self.set_uniform(name, matrix);
    }

    pub fn set_sampler(&mut self, name: &str, slot: u32) {
        self.set_uniform(name, &TextureUnit(slot));
    }

    pub fn uniform_location(&mut self, name: &str) -> UniformLocation {
        let id = self.raw.id;
        self.uniform_cache
            .get_or_lookup(name, |name| match CString::new(name) {
                Ok(c_string) => gl_call!(assert GetUniformLocation(id, c_string.as_ptr())),
                // no GLSL identifier has an interior nul
                Err(_) => -1,
            })
    }
}

fn program_status(id: GLuint, ty: GLenum) -> bool {
    let mut status = 1;
    gl_call!(assert GetProgramiv(id, ty, &mut status));
    status != gl::FALSE as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn lookups_happen_once_per_name() {
        let mut cache = UniformCache::default();
        let calls = Cell::new(0);
        let lookup = |name: &str| {
            calls.set(calls.get() + 1);
            match name {
                "u_Color" => 3,
                _ => -1,
            }
        };

        assert_eq!(cache.get_or_lookup("u_Color", lookup), 3);
        assert_eq!(cache.get_or_lookup("u_Color", lookup), 3);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn misses_are_cached_too() {
        let mut cache = UniformCache::default();
        let calls = Cell::new(0);
        let lookup = |_: &str| {
            calls.set(calls.get() + 1);
            -1
        };

        assert_eq!(cache.get_or_lookup("u_Missing", lookup), -1);
        assert_eq!(cache.get_or_lookup("u_Missing", lookup), -1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn names_are_cached_separately() {
        let mut cache = UniformCache::default();
        assert!(cache.is_empty());

        cache.get_or_lookup("u_MVP", |_| 0);
        cache.get_or_lookup("u_Texture", |_| 1);

        assert_eq!(cache.get_or_lookup("u_MVP", |_| panic!("cached")), 0);
        assert_eq!(cache.get_or_lookup("u_Texture", |_| panic!("cached")), 1);
        assert_eq!(cache.len(), 2);
    }
}
