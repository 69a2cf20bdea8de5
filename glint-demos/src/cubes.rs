//! The classic free-fly camera scene: ten textured cubes scattered around the world, each
//! tilted a bit more than the previous one. Move with WASD, look around with the mouse, zoom
//! with the scroll wheel.
//!
//! This demo is the one exercising the whole camera rig: per-frame delta time, cursor deltas
//! with first-sample suppression, scroll zoom and a projection that follows window resizes.
//! Textures degrade to black when the `--textures` directory is missing, and the cubes stay
//! around.

use cgmath::{Deg, InnerSpace as _, Matrix4, Point3};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use glint::{
  camera::Camera,
  rig::{AspectMode, CameraRig},
  shader::Program,
  texture::Texture,
};
use glint_glfw::{
  drive_camera, Assets, CursorMode, Demo, GlfwSurface, InputAction, LoopFeedback, WindowOpt,
};
use std::{mem, os::raw::c_void, ptr::null};

use crate::shared;

const VS: &'static str = include_str!("cubes-vs.glsl");
const FS: &'static str = include_str!("cubes-fs.glsl");

pub struct LocalDemo {
  program: Program,
  rig: CameraRig,
  container: Texture,
  face: Texture,
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
    // the window captures the cursor so raw deltas keep flowing while looking around
    WindowOpt::default().set_cursor_mode(CursorMode::Disabled)
  }

  fn bootstrap(assets: &Assets, surface: &mut GlfwSurface) -> Self {
    let (width, height) = surface.window.get_framebuffer_size();
    let camera = Camera::at(Point3::new(0., 0., 3.));
    let mut rig = CameraRig::new(width as u32, height as u32, camera).expect("camera rig");
    rig.set_aspect_mode(AspectMode::FollowResize);

    let mut program = Program::from_sources(VS, FS, None).expect("program creation");

    let container = assets.texture("container.jpg", true);
    let face = assets.texture("awesomeface.png", true);

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
        (shared::CUBE_POS_TEX.len() * mem::size_of::<f32>()) as GLsizeiptr,
        shared::CUBE_POS_TEX.as_ptr() as *const c_void,
        gl::STATIC_DRAW,
      );

      let stride = 5 * mem::size_of::<f32>() as GLsizei;

      // position attribute
      gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, null());
      gl::EnableVertexAttribArray(0);
      // texture coord attribute
      gl::VertexAttribPointer(
        1,
        2,
        gl::FLOAT,
        gl::FALSE,
        stride,
        (3 * mem::size_of::<f32>()) as *const c_void,
      );
      gl::EnableVertexAttribArray(1);
    }

    // tell the program which texture unit each sampler reads; only has to be done once
    program.bind();
    program.set_i32("texture1", 0);
    program.set_i32("texture2", 1);

    LocalDemo {
      program,
      rig,
      container,
      face,
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
      gl::ClearColor(0.2, 0.3, 0.3, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }

    self.container.bind(0);
    self.face.bind(1);

    self.program.bind();

    // the zoom and the aspect ratio both move under the user's feet, so the projection is
    // rebuilt every frame
    let projection = self.rig.perspective(0.1, 100.);
    let view = self.rig.view();
    self.program.set_mat4("projection", &projection);
    self.program.set_mat4("view", &view);

    let axis = shared::CUBE_SPIN_AXIS.normalize();

    unsafe {
      gl::BindVertexArray(self.vao);
    }

    for (i, position) in shared::CUBE_POSITIONS.iter().enumerate() {
      let angle = 20. * i as f32;
      let model = Matrix4::from_translation(*position) * Matrix4::from_axis_angle(axis, Deg(angle));
      self.program.set_mat4("model", &model);

      unsafe {
        gl::DrawArrays(gl::TRIANGLES, 0, 36);
      }
    }

    LoopFeedback::Continue
  }
}
