//! 2D texture loading.
//!
//! Demo assets are a convenience, not a requirement: a texture that cannot be read or decoded
//! logs an error and degrades to an empty texture object, which samples black. A demo missing
//! its assets keeps running and shows dark geometry instead.

use gl::{self, types::*};
use image::{ColorType, DynamicImage, GenericImageView as _};
use std::{os::raw::c_void, path::Path};

/// GL pixel format for the color layouts the loader uploads as-is.
///
/// Everything else gets converted to RGBA first.
pub fn gl_format(color: ColorType) -> Option<GLenum> {
  match color {
    ColorType::L8 => Some(gl::RED),
    ColorType::Rgb8 => Some(gl::RGB),
    ColorType::Rgba8 => Some(gl::RGBA),
    _ => None,
  }
}

/// A 2D OpenGL texture. The GPU object is released on drop.
#[derive(Debug)]
pub struct Texture {
  handle: GLuint,
}

impl Drop for Texture {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteTextures(1, &self.handle);
    }
  }
}

impl Texture {
  /// Decode the image at `path` and upload it, with mipmaps.
  ///
  /// `vflip` flips the decoded image vertically before upload; OpenGL expects the first row
  /// at the bottom while most image formats store it at the top.
  pub fn load<P>(path: P, vflip: bool) -> Texture
  where
    P: AsRef<Path>,
  {
    let path = path.as_ref();
    let texture = Texture::empty();

    let img = match image::open(path) {
      Ok(img) => img,
      Err(e) => {
        log::error!("texture failed to load at path {}: {}", path.display(), e);
        return texture;
      }
    };

    let img = if vflip { img.flipv() } else { img };
    texture.upload(&img);

    log::debug!("loaded texture {}", path.display());
    texture
  }

  /// Generate a texture object with no storage.
  pub fn empty() -> Texture {
    let mut handle: GLuint = 0;

    unsafe {
      gl::GenTextures(1, &mut handle);
    }

    Texture { handle }
  }

  /// Bind onto the texture unit `unit`.
  pub fn bind(&self, unit: u32) {
    unsafe {
      gl::ActiveTexture(gl::TEXTURE0 + unit);
      gl::BindTexture(gl::TEXTURE_2D, self.handle);
    }
  }

  fn upload(&self, img: &DynamicImage) {
    let (width, height) = img.dimensions();
    let color = img.color();

    let format = gl_format(color).unwrap_or(gl::RGBA);
    let data = if format == gl::RED {
      img.to_luma8().into_raw()
    } else if format == gl::RGB {
      img.to_rgb8().into_raw()
    } else {
      img.to_rgba8().into_raw()
    };

    unsafe {
      gl::BindTexture(gl::TEXTURE_2D, self.handle);
      gl::TexImage2D(
        gl::TEXTURE_2D,
        0,
        format as GLint,
        width as GLsizei,
        height as GLsizei,
        0,
        format,
        gl::UNSIGNED_BYTE,
        data.as_ptr() as *const c_void,
      );
      gl::GenerateMipmap(gl::TEXTURE_2D);

      gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
      gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
      gl::TexParameteri(
        gl::TEXTURE_2D,
        gl::TEXTURE_MIN_FILTER,
        gl::LINEAR_MIPMAP_LINEAR as GLint,
      );
      gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn direct_upload_formats_map_one_to_one() {
    assert_eq!(gl_format(ColorType::L8), Some(gl::RED));
    assert_eq!(gl_format(ColorType::Rgb8), Some(gl::RGB));
    assert_eq!(gl_format(ColorType::Rgba8), Some(gl::RGBA));
  }

  #[test]
  fn exotic_layouts_go_through_conversion() {
    assert_eq!(gl_format(ColorType::La8), None);
    assert_eq!(gl_format(ColorType::Bgr8), None);
    assert_eq!(gl_format(ColorType::Rgb16), None);
  }
}
