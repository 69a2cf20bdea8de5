//! Upload uniforms through the typed setters and read them back from the driver.
//!
//! Every value must come back bit-identical: the setters upload `f32`/`i32` data without any
//! conversion. The fixture also pokes a name the linker never saw, which must only warn and
//! skip the upload.

use cgmath::{Matrix4, Vector3, Vector4};
use colored::Colorize as _;
use gl::types::GLint;
use glint::shader::Program;
use glint_glfw::{GlfwSurface, WindowOpt};

const VS: &str = "#version 330 core

void main() {
  gl_Position = vec4(0.0, 0.0, 0.0, 1.0);
}";

// every uniform participates in the output so the linker keeps them all active
const FS: &str = "#version 330 core

out vec4 frag;

uniform int steps;
uniform float gain;
uniform vec4 tint;
uniform mat4 transform;

void main() {
  frag = transform * tint * gain * float(steps);
}";

pub fn fixture() {
  let _surface = GlfwSurface::new_gl33("uniform readback", WindowOpt::default()).unwrap();

  let mut program = Program::from_sources(VS, FS, None).unwrap();
  program.bind();

  let transform = Matrix4::from_translation(Vector3::new(1., 2., 3.));

  program.set_i32("steps", 7);
  program.set_f32("gain", 0.25);
  program.set_vec4("tint", Vector4::new(1., 2., 3., 4.));
  program.set_mat4("transform", &transform);

  // a name the linker never saw; warns once, skips the upload, must not crash
  program.set_f32("definitely_not_there", 1.);
  program.set_f32("definitely_not_there", 2.);
  assert_eq!(program.location("definitely_not_there"), None);

  unsafe {
    let mut steps: GLint = 0;
    gl::GetUniformiv(
      program.handle(),
      program.location("steps").unwrap(),
      &mut steps,
    );
    assert_eq!(steps, 7);

    let mut gain: f32 = 0.;
    gl::GetUniformfv(
      program.handle(),
      program.location("gain").unwrap(),
      &mut gain,
    );
    assert_eq!(gain, 0.25);

    let mut tint = [0.; 4];
    gl::GetUniformfv(
      program.handle(),
      program.location("tint").unwrap(),
      tint.as_mut_ptr(),
    );
    assert_eq!(tint, [1., 2., 3., 4.]);

    let mut queried = [[0.; 4]; 4];
    gl::GetUniformfv(
      program.handle(),
      program.location("transform").unwrap(),
      queried.as_mut_ptr() as *mut f32,
    );
    let uploaded: &[[f32; 4]; 4] = transform.as_ref();
    assert_eq!(&queried, uploaded);
  }

  println!("{}", "ok".green());
}
