//! This demo renders one red triangle through a full model-view-projection transform. The three
//! matrices are multiplied once at bootstrap — the camera never moves — and the product is
//! uploaded as a single `MVP` uniform every frame.

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use glint::shader::Program;
use glint_glfw::{Assets, Demo, GlfwSurface, InputAction, LoopFeedback};
use std::{mem, os::raw::c_void, ptr::null};

const VS: &'static str = include_str!("matrices-vs.glsl");
const FS: &'static str = include_str!("matrices-fs.glsl");

#[rustfmt::skip]
const TRI_VERTICES: [f32; 9] = [
  -1., -1., 0.,
   1., -1., 0.,
   0.,  1., 0.,
];

pub struct LocalDemo {
  program: Program,
  mvp: Matrix4<f32>,
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

    // projection: 45° vertical field of view, 4:3 ratio, display range 0.1 <-> 100 units
    let projection = perspective(Deg(45.), 4. / 3., 0.1, 100.);

    // the camera sits at (4, 3, 3) and looks at the origin, head up
    let view = Matrix4::look_at_rh(
      Point3::new(4., 3., 3.),
      Point3::new(0., 0., 0.),
      Vector3::unit_y(),
    );

    // the model matrix is the identity: the triangle stays at the origin
    let mvp = projection * view;

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

    LocalDemo {
      program,
      mvp,
      vao,
      vbo,
    }
  }

  fn render_frame(
    &mut self,
    _t: f32,
    actions: impl Iterator<Item = InputAction>,
    _surface: &mut GlfwSurface,
  ) -> LoopFeedback {
    for action in actions {
      if let InputAction::Quit = action {
        return LoopFeedback::Exit;
      }
    }

    unsafe {
      gl::ClearColor(0., 0., 0.4, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    self.program.bind();
    self.program.set_mat4("MVP", &self.mvp);

    unsafe {
      gl::BindVertexArray(self.vao);
      gl::DrawArrays(gl::TRIANGLES, 0, 3);
    }

    LoopFeedback::Continue
  }
}
