use crate::gl_api::{context::Context, objects::RawTexture};
use gl::types::*;
use image::ImageError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type TextureResult<T> = Result<T, TextureError>;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not load image `{}`: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("texture is {width}x{height}, but the driver allows at most {max}x{max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("texture slot {slot} is out of range, the driver has {max}")]
    SlotOutOfRange { slot: u32, max: u32 },
}

#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Filter {
    Nearest = gl::NEAREST,
    Linear = gl::LINEAR,
}

#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WrapMode {
    ClampToEdge = gl::CLAMP_TO_EDGE,
    MirroredRepeat = gl::MIRRORED_REPEAT,
    Repeat = gl::REPEAT,
}

/// An RGBA8 2D texture.
#[derive(Debug)]
pub struct Texture {
    raw: RawTexture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Loads an image file. GL expects the first row of pixels to be the bottom
    /// one, so the image gets flipped on the way in.
    pub fn from_file<P: AsRef<Path>>(ctx: &Context, path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| TextureError::Image {
                path: path.into(),
                source,
            })?
            .flipv()
            .into_rgba8();

        let (width, height) = image.dimensions();
        log::debug!("loaded texture `{}` ({}x{})", path.display(), width, height);
        Self::from_rgba(ctx, width, height, &image)
    }

    /// Uploads tightly packed RGBA8 pixels, bottom row first.
    pub fn from_rgba(ctx: &Context, width: u32, height: u32, pixels: &[u8]) -> TextureResult<Self> {
        check_dimensions(width, height, ctx.limits().max_texture_size)?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::WrongSize {
                expected,
                actual: pixels.len(),
            });
        }

        let texture = Texture {
            raw: RawTexture::new(ctx),
            width,
            height,
        };

        gl_call!(assert BindTexture(gl::TEXTURE_2D, texture.raw.id));

        // there are no defaults for these, every texture needs all four
        texture.set_filter(Filter::Linear, Filter::Linear);
        texture.set_wrap(WrapMode::ClampToEdge);

        // rows of RGBA8 are always 4-byte aligned
        gl_call!(assert PixelStorei(gl::UNPACK_ALIGNMENT, 4));
        gl_call!(assert TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as GLint,
            width as GLsizei,
            height as GLsizei,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_ptr() as *const _
        ));

        gl_call!(assert BindTexture(gl::TEXTURE_2D, 0));
        Ok(texture)
    }

    /// Sets the minification and magnification filters. Leaves the texture
    /// bound to the active slot.
    pub fn set_filter(&self, min: Filter, mag: Filter) {
        gl_call!(assert BindTexture(gl::TEXTURE_2D, self.raw.id));
        gl_call!(assert TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, min as GLint));
        gl_call!(assert TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, mag as GLint));
    }

    /// Sets the wrap mode on both axes. Leaves the texture bound to the active
    /// slot.
    pub fn set_wrap(&self, mode: WrapMode) {
        gl_call!(assert BindTexture(gl::TEXTURE_2D, self.raw.id));
        gl_call!(assert TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, mode as GLint));
        gl_call!(assert TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, mode as GLint));
    }

    /// Makes `slot` the active texture unit and binds this texture to it.
    pub fn bind(&self, slot: u32) -> TextureResult<()> {
        let max = self.raw.ctx.limits().max_combined_texture_units;
        if slot >= max {
            return Err(TextureError::SlotOutOfRange { slot, max });
        }

        gl_call!(assert ActiveTexture(gl::TEXTURE0 + slot));
        gl_call!(assert BindTexture(gl::TEXTURE_2D, self.raw.id));
        Ok(())
    }

    pub fn unbind(&self) {
        gl_call!(assert BindTexture(gl::TEXTURE_2D, 0));
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn id(&self) -> GLuint {
        self.raw.id
    }
}

fn check_dimensions(width: u32, height: u32, max: u32) -> TextureResult<()> {
    if width > max || height > max {
        return Err(TextureError::TextureTooLarge { width, height, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_up_to_the_limit_are_accepted() {
        assert!(check_dimensions(1024, 1024, 1024).is_ok());
        assert!(check_dimensions(1, 1, 1024).is_ok());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = check_dimensions(2048, 16, 1024).unwrap_err();
        assert!(matches!(
            err,
            TextureError::TextureTooLarge {
                width: 2048,
                height: 16,
                max: 1024
            }
        ));
        assert!(check_dimensions(16, 1025, 1024).is_err());
    }

    #[test]
    fn errors_name_the_problem() {
        let err = TextureError::SlotOutOfRange { slot: 40, max: 32 };
        assert_eq!(err.to_string(), "texture slot 40 is out of range, the driver has 32");
    }
}
