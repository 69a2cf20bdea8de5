//! Broken GLSL must come back as a typed error naming the failing stage, never as a panic or a
//! half-built program.

use colored::Colorize as _;
use glint::shader::{Program, ProgramError, Stage, StageType};
use glint_glfw::{GlfwSurface, WindowOpt};

const GOOD_VS: &str = "#version 330 core

out vec3 v_color;

void main() {
  v_color = vec3(1.0, 0.0, 0.0);
  gl_Position = vec4(0.0, 0.0, 0.0, 1.0);
}";

const GOOD_FS: &str = "#version 330 core

in vec3 v_color;
out vec4 frag;

void main() {
  frag = vec4(v_color, 1.0);
}";

// guaranteed not to compile as any stage
const BAD_SRC: &str = "#version 330 core

void main() {
  this is not glsl;
}";

// statically used varying with a type that disagrees with GOOD_VS: compiles fine, fails to link
const MISMATCHED_FS: &str = "#version 330 core

in vec4 v_color;
out vec4 frag;

void main() {
  frag = v_color;
}";

pub fn fixture() {
  let _surface = GlfwSurface::new_gl33("bad stage", WindowOpt::default()).unwrap();

  // baseline: a well-formed stage compiles and reports what it was compiled as
  let stage = Stage::new(StageType::VertexShader, GOOD_VS).unwrap();
  assert_eq!(stage.ty(), StageType::VertexShader);

  let e = Program::from_sources(BAD_SRC, GOOD_FS, None).unwrap_err();
  assert!(matches!(e, ProgramError::StageError(_)));
  assert!(e.to_string().contains("vertex shader"), "got: {}", e);

  let e = Program::from_sources(GOOD_VS, BAD_SRC, None).unwrap_err();
  assert!(e.to_string().contains("fragment shader"), "got: {}", e);

  let e = Program::from_sources(GOOD_VS, GOOD_FS, Some(BAD_SRC)).unwrap_err();
  assert!(e.to_string().contains("geometry shader"), "got: {}", e);

  let e = Program::from_sources(GOOD_VS, MISMATCHED_FS, None).unwrap_err();
  assert!(matches!(e, ProgramError::LinkFailed(_)));
  assert!(
    e.to_string().starts_with("shader program failed to link:"),
    "got: {}",
    e
  );

  println!("{}", "ok".green());
}
