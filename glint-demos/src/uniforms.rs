//! This demo renders a single triangle and animates its color by re-uploading a shader uniform
//! every frame. Uniforms are values stored on the GPU that stay constant for the whole duration
//! of a draw call; updating them between frames is the cheapest way to get movement on screen.

use cgmath::Vector4;
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use glint::shader::Program;
use glint_glfw::{Assets, Demo, GlfwSurface, InputAction, LoopFeedback};
use std::{mem, os::raw::c_void, ptr::null};

const VS: &'static str = include_str!("uniforms-vs.glsl");
const FS: &'static str = include_str!("uniforms-fs.glsl");

// Only one triangle.
#[rustfmt::skip]
const TRI_VERTICES: [f32; 9] = [
   0.5, -0.5, 0., // bottom right
  -0.5, -0.5, 0., // bottom left
   0.,   0.5, 0., // top
];

pub struct LocalDemo {
  program: Program,
  vao: GLuint,
  vbo: GLuint,
}

impl Drop for LocalDemo {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteVertexArrays(1, &self.vao);
      gl::DeleteBuffers(1, &self.vbo);
    }
  }
}

impl Demo for LocalDemo {
  fn bootstrap(_assets: &Assets, _surface: &mut GlfwSurface) -> Self {
    let program = Program::from_sources(VS, FS, None).expect("program creation");

    let mut vao = 0;
    let mut vbo = 0;

    unsafe {
      gl::GenVertexArrays(1, &mut vao);
      gl::GenBuffers(1, &mut vbo);
      gl::BindVertexArray(vao);

      gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
      gl::BufferData(
        gl::ARRAY_BUFFER,
        (TRI_VERTICES.len() * mem::size_of::<f32>()) as GLsizeiptr,
        TRI_VERTICES.as_ptr() as *const c_void,
        gl::STATIC_DRAW,
      );

      gl::VertexAttribPointer(
        0,
        3,
        gl::FLOAT,
        gl::FALSE,
        3 * mem::size_of::<f32>() as GLsizei,
        null(),
      );
      gl::EnableVertexAttribArray(0);
    }

    LocalDemo { program, vao, vbo }
  }

  fn render_frame(
    &mut self,
    t: f32,
    actions: impl Iterator<Item = InputAction>,
    _surface: &mut GlfwSurface,
  ) -> LoopFeedback {
    for action in actions {
      if let InputAction::Quit = action {
        return LoopFeedback::Exit;
      }
    }

    unsafe {
      gl::ClearColor(0.2, 0.3, 0.3, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    // activate the program before any uniform upload
    self.program.bind();

    let green = t.sin() / 2. + 0.5;
    self
      .program
      .set_vec4("ourColor", Vector4::new(0., green, 0., 1.));

    unsafe {
      gl::BindVertexArray(self.vao);
      gl::DrawArrays(gl::TRIANGLES, 0, 3);
    }

    LoopFeedback::Continue
  }
}
