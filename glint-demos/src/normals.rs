//! This demo draws a cube twice: once as a solid object and once through a program holding a
//! geometry stage, which turns each triangle into three short lines following the vertex
//! normals. The yellow whiskers make shading bugs (flipped or unnormalized normals) obvious at
//! a glance.
//!
//! The camera rig steers here too, but the projection keeps the aspect ratio captured at
//! bootstrap; compare with the `cubes` demo, which follows resizes.

use cgmath::{Point3, SquareMatrix as _};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use glint::{camera::Camera, rig::CameraRig, shader::Program};
use glint_glfw::{
  drive_camera, Assets, CursorMode, Demo, GlfwSurface, InputAction, LoopFeedback, WindowDim,
  WindowOpt,
};
use std::{mem, os::raw::c_void, ptr::null};

use crate::shared;

const FLAT_VS: &'static str = include_str!("normals-flat-vs.glsl");
const FLAT_FS: &'static str = include_str!("normals-flat-fs.glsl");

const LINE_VS: &'static str = include_str!("normals-line-vs.glsl");
const LINE_FS: &'static str = include_str!("normals-line-fs.glsl");
const LINE_GS: &'static str = include_str!("normals-line-gs.glsl");

pub struct LocalDemo {
  flat_program: Program,
  line_program: Program,
  rig: CameraRig,
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
  fn window_opt() -> WindowOpt {
    WindowOpt::default()
      .set_dim(WindowDim::Windowed {
        width: 1280,
        height: 720,
      })
      .set_cursor_mode(CursorMode::Disabled)
  }

  fn bootstrap(_assets: &Assets, surface: &mut GlfwSurface) -> Self {
    let (width, height) = surface.window.get_framebuffer_size();
    let camera = Camera::at(Point3::new(0., 0., 4.));
    let rig = CameraRig::new(width as u32, height as u32, camera).expect("camera rig");

    let flat_program = Program::from_sources(FLAT_VS, FLAT_FS, None).expect("flat program");
    let line_program =
      Program::from_sources(LINE_VS, LINE_FS, Some(LINE_GS)).expect("normal line program");

    let mut vao = 0;
    let mut vbo = 0;

    unsafe {
      gl::Enable(gl::DEPTH_TEST);

      gl::GenVertexArrays(1, &mut vao);
      gl::GenBuffers(1, &mut vbo);
      gl::BindVertexArray(vao);

      gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
      gl::BufferData(
        gl::ARRAY_BUFFER,
        (shared::CUBE_POS_NORMAL.len() * mem::size_of::<f32>()) as GLsizeiptr,
        shared::CUBE_POS_NORMAL.as_ptr() as *const c_void,
        gl::STATIC_DRAW,
      );

      let stride = 6 * mem::size_of::<f32>() as GLsizei;

      // position attribute
      gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, null());
      gl::EnableVertexAttribArray(0);
      // normal attribute
      gl::VertexAttribPointer(
        1,
        3,
        gl::FLOAT,
        gl::FALSE,
        stride,
        (3 * mem::size_of::<f32>()) as *const c_void,
      );
      gl::EnableVertexAttribArray(1);
    }

    LocalDemo {
      flat_program,
      line_program,
      rig,
      vao,
      vbo,
    }
  }

  fn render_frame(
    &mut self,
    _t: f32,
    actions: impl Iterator<Item = InputAction>,
    surface: &mut GlfwSurface,
  ) -> LoopFeedback {
    let dt = self.rig.tick();

    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,
        InputAction::CursorMoved { x, y } => self.rig.on_cursor(x, y),
        InputAction::VScroll { amount } => self.rig.on_scroll(amount),
        InputAction::Resized { width, height } => self.rig.on_resize(width, height),
      }
    }

    drive_camera(&surface.window, &mut self.rig, dt);

    unsafe {
      gl::ClearColor(0.1, 0.1, 0.1, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }

    let projection = self.rig.perspective(0.1, 100.);
    let view = self.rig.view();
    let model = cgmath::Matrix4::identity();

    unsafe {
      gl::BindVertexArray(self.vao);
    }

    // draw the cube as usual
    self.flat_program.bind();
    self.flat_program.set_mat4("projection", &projection);
    self.flat_program.set_mat4("view", &view);
    self.flat_program.set_mat4("model", &model);

    unsafe {
      gl::DrawArrays(gl::TRIANGLES, 0, 36);
    }

    // then re-draw it with the normal-visualizing geometry stage
    self.line_program.bind();
    self.line_program.set_mat4("projection", &projection);
    self.line_program.set_mat4("view", &view);
    self.line_program.set_mat4("model", &model);

    unsafe {
      gl::DrawArrays(gl::TRIANGLES, 0, 36);
    }

    LoopFeedback::Continue
  }
}
