//! Shader stages and programs.
//!
//! A [`Program`] is built from GLSL sources with [`Program::from_sources`] and deletes its GPU
//! object when dropped. Compilation and link failures surface as [`StageError`] /
//! [`ProgramError`] values carrying the driver info log, so a broken shader names the stage it
//! broke in instead of aborting the process.
//!
//! Uniforms are set through the typed `set_*` methods. The names the linked program actually
//! uses are collected once at link time; setting a name the linker discarded (or one that was
//! never declared) logs an `inactive uniform` warning once and skips the upload.

use cgmath::{Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4};
use gl::{self, types::*};
use std::{
  collections::{HashMap, HashSet},
  error,
  ffi::CString,
  fmt,
  ptr::{null, null_mut},
};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Geometry shader.
  GeometryShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::GeometryShader => f.write_str("geometry shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Create a compilation error out of a driver info log.
  pub fn compilation_failed<R>(ty: StageType, log: R) -> Self
  where
    R: Into<String>,
  {
    StageError::CompilationFailed(ty, log.into())
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Create a link error out of a driver info log.
  pub fn link_failed<R>(log: R) -> Self
  where
    R: Into<String>,
  {
    ProgramError::LinkFailed(log.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match *self {
      ProgramError::StageError(ref e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Warnings related to uniform issues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// Inactive uniform (not in use / no participation to the final output in shaders).
  Inactive(String),
}

impl UniformWarning {
  /// Create an inactive uniform warning.
  pub fn inactive<N>(name: N) -> Self
  where
    N: Into<String>,
  {
    UniformWarning::Inactive(name.into())
  }
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::Inactive(ref s) => write!(f, "inactive {} uniform", s),
    }
  }
}

/// A single compiled shader stage.
///
/// The GPU object is released on drop, whichever way the surrounding program construction
/// exits.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  /// Compile a single stage from GLSL source.
  pub fn new(ty: StageType, src: &str) -> Result<Self, StageError> {
    unsafe {
      let handle = gl::CreateShader(opengl_shader_type(ty));

      if handle == 0 {
        return Err(StageError::compilation_failed(
          ty,
          "unable to create shader stage",
        ));
      }

      let c_src = CString::new(src.as_bytes()).unwrap();
      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        Ok(Stage { handle, ty })
      } else {
        let mut log_len: GLint = 0;
        gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
        gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        gl::DeleteShader(handle);

        log.set_len(log_len as usize);

        Err(StageError::compilation_failed(
          ty,
          String::from_utf8(log).unwrap(),
        ))
      }
    }
  }

  /// Stage type this stage was compiled as.
  pub fn ty(&self) -> StageType {
    self.ty
  }
}

/// A linked shader program.
///
/// Existence of a value of this type means linking succeeded; the failure paths are all typed
/// errors out of [`Program::from_sources`]. The GPU object is released on drop.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
  uniforms: HashMap<String, GLint>,
  warned: HashSet<String>,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  /// Compile and link a program out of a vertex stage, a fragment stage and an optional
  /// geometry stage.
  pub fn from_sources(
    vertex_src: &str,
    fragment_src: &str,
    geometry_src: Option<&str>,
  ) -> Result<Self, ProgramError> {
    let vertex = Stage::new(StageType::VertexShader, vertex_src)?;
    let geometry = geometry_src
      .map(|src| Stage::new(StageType::GeometryShader, src))
      .transpose()?;
    let fragment = Stage::new(StageType::FragmentShader, fragment_src)?;

    unsafe {
      let handle = gl::CreateProgram();

      gl::AttachShader(handle, vertex.handle);

      if let Some(ref geometry) = geometry {
        gl::AttachShader(handle, geometry.handle);
      }

      gl::AttachShader(handle, fragment.handle);

      let mut program = Program {
        handle,
        uniforms: HashMap::new(),
        warned: HashSet::new(),
      };

      program.link()?;
      program.uniforms = active_uniforms(handle);

      Ok(program)
    }
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
        gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        log.set_len(log_len as usize);

        Err(ProgramError::link_failed(String::from_utf8(log).unwrap()))
      }
    }
  }

  /// Make this program the current one.
  ///
  /// Uniform uploads go to the currently bound program, so bind before setting.
  pub fn bind(&self) {
    unsafe {
      gl::UseProgram(self.handle);
    }
  }

  /// Raw GL handle.
  pub fn handle(&self) -> GLuint {
    self.handle
  }

  /// Location of `name`, if the linked program uses it.
  pub fn location(&self, name: &str) -> Option<GLint> {
    self.uniforms.get(name).copied()
  }

  fn active_location(&mut self, name: &str) -> Option<GLint> {
    match self.uniforms.get(name) {
      Some(location) => Some(*location),

      None => {
        if self.warned.insert(name.to_owned()) {
          log::warn!("{}", UniformWarning::inactive(name));
        }

        None
      }
    }
  }

  /// Set a boolean uniform.
  pub fn set_bool(&mut self, name: &str, value: bool) {
    if let Some(location) = self.active_location(name) {
      unsafe {
        gl::Uniform1i(location, value as GLint);
      }
    }
  }

  /// Set a signed integer uniform.
  pub fn set_i32(&mut self, name: &str, value: i32) {
    if let Some(location) = self.active_location(name) {
      unsafe {
        gl::Uniform1i(location, value);
      }
    }
  }

  /// Set a floating-point uniform.
  pub fn set_f32(&mut self, name: &str, value: f32) {
    if let Some(location) = self.active_location(name) {
      unsafe {
        gl::Uniform1f(location, value);
      }
    }
  }

  /// Set a 2D vector uniform.
  pub fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: [f32; 2] = value.into();

      unsafe {
        gl::Uniform2fv(location, 1, value.as_ptr());
      }
    }
  }

  /// Set a 3D vector uniform.
  pub fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: [f32; 3] = value.into();

      unsafe {
        gl::Uniform3fv(location, 1, value.as_ptr());
      }
    }
  }

  /// Set a 4D vector uniform.
  pub fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: [f32; 4] = value.into();

      unsafe {
        gl::Uniform4fv(location, 1, value.as_ptr());
      }
    }
  }

  /// Set a 2×2 matrix uniform.
  pub fn set_mat2(&mut self, name: &str, value: &Matrix2<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: &[[f32; 2]; 2] = value.as_ref();

      unsafe {
        gl::UniformMatrix2fv(location, 1, gl::FALSE, value.as_ptr() as _);
      }
    }
  }

  /// Set a 3×3 matrix uniform.
  pub fn set_mat3(&mut self, name: &str, value: &Matrix3<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: &[[f32; 3]; 3] = value.as_ref();

      unsafe {
        gl::UniformMatrix3fv(location, 1, gl::FALSE, value.as_ptr() as _);
      }
    }
  }

  /// Set a 4×4 matrix uniform.
  pub fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
    if let Some(location) = self.active_location(name) {
      let value: &[[f32; 4]; 4] = value.as_ref();

      unsafe {
        gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr() as _);
      }
    }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::GeometryShader => gl::GEOMETRY_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

/// Enumerate the active uniforms of a freshly linked program into a name → location map.
fn active_uniforms(handle: GLuint) -> HashMap<String, GLint> {
  let mut uniforms = HashMap::new();

  unsafe {
    let mut count: GLint = 0;
    gl::GetProgramiv(handle, gl::ACTIVE_UNIFORMS, &mut count);

    let mut max_len: GLint = 0;
    gl::GetProgramiv(handle, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_len);

    for index in 0..count as GLuint {
      let mut name_buf: Vec<u8> = Vec::with_capacity(max_len as usize);
      let mut name_len: GLsizei = 0;
      let mut size: GLint = 0;
      let mut glty: GLenum = 0;

      gl::GetActiveUniform(
        handle,
        index,
        max_len,
        &mut name_len,
        &mut size,
        &mut glty,
        name_buf.as_mut_ptr() as *mut GLchar,
      );

      name_buf.set_len(name_len as usize);

      let mut name = String::from_utf8(name_buf).unwrap();

      // drivers report array uniforms with a trailing [0]
      if let Some(stripped) = name.strip_suffix("[0]") {
        name = stripped.to_owned();
      }

      let c_name = CString::new(name.as_bytes()).unwrap();
      let location = gl::GetUniformLocation(handle, c_name.as_ptr() as *const GLchar);

      if location >= 0 {
        uniforms.insert(name, location);
      }
    }
  }

  uniforms
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stage_errors_name_the_stage() {
    let vs = StageError::compilation_failed(StageType::VertexShader, "0:1(1): syntax error");
    let gs = StageError::compilation_failed(StageType::GeometryShader, "0:1(1): syntax error");
    let fs = StageError::compilation_failed(StageType::FragmentShader, "0:1(1): syntax error");

    assert!(vs.to_string().starts_with("vertex shader compilation error:"));
    assert!(gs.to_string().starts_with("geometry shader compilation error:"));
    assert!(fs.to_string().starts_with("fragment shader compilation error:"));
  }

  #[test]
  fn link_errors_name_the_program() {
    let e = ProgramError::link_failed("error: no main");

    assert_eq!(
      e.to_string(),
      "shader program failed to link: error: no main"
    );
  }

  #[test]
  fn stage_errors_convert_and_chain() {
    use std::error::Error as _;

    let stage = StageError::compilation_failed(StageType::FragmentShader, "bad swizzle");
    let program = ProgramError::from(stage.clone());

    assert_eq!(program, ProgramError::StageError(stage));
    assert!(program.source().is_some());
    assert!(program.to_string().contains("fragment shader"));
  }

  #[test]
  fn inactive_uniform_warning_names_the_uniform() {
    let w = UniformWarning::inactive("mvp");
    assert_eq!(w.to_string(), "inactive mvp uniform");
  }
}
