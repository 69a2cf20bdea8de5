//! Per-window camera state.
//!
//! [`CameraRig`] bundles a [`Camera`] with everything a render loop needs to drive it: the
//! viewport size, a frame clock, cursor tracking and the projection aspect policy. The rig is
//! a plain value owned by the demo and fed from the event loop; window events reach it through
//! explicit calls, so nothing here is process-global.

use cgmath::{perspective, Deg, Matrix4};
use std::{error, fmt, time::Instant};

use crate::camera::Camera;

/// How the projection aspect ratio follows the window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AspectMode {
  /// Keep the aspect ratio captured at construction time.
  Fixed,
  /// Recompute the aspect ratio from resize events.
  FollowResize,
}

/// Errors that can happen while building a [`CameraRig`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CameraRigError {
  /// The initial viewport has a zero dimension.
  EmptyViewport(u32, u32),
}

impl fmt::Display for CameraRigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      CameraRigError::EmptyViewport(w, h) => {
        write!(f, "cannot build a camera rig over an empty {}x{} viewport", w, h)
      }
    }
  }
}

impl error::Error for CameraRigError {}

/// A [`Camera`] wired to a window: viewport, frame clock and cursor state.
#[derive(Debug)]
pub struct CameraRig {
  camera: Camera,
  width: u32,
  height: u32,
  aspect: f32,
  aspect_mode: AspectMode,
  last_cursor: Option<(f32, f32)>,
  last_tick: Option<Instant>,
}

impl CameraRig {
  /// Wrap `camera` for a `width` by `height` viewport.
  ///
  /// Both dimensions must be non-zero; the projection aspect ratio is derived from them.
  pub fn new(width: u32, height: u32, camera: Camera) -> Result<Self, CameraRigError> {
    if width == 0 || height == 0 {
      return Err(CameraRigError::EmptyViewport(width, height));
    }

    Ok(CameraRig {
      camera,
      width,
      height,
      aspect: width as f32 / height as f32,
      aspect_mode: AspectMode::Fixed,
      last_cursor: None,
      last_tick: None,
    })
  }

  /// Change how the aspect ratio follows resize events.
  pub fn set_aspect_mode(&mut self, mode: AspectMode) {
    self.aspect_mode = mode;
  }

  /// Seconds elapsed since the previous call; 0 on the first one.
  pub fn tick(&mut self) -> f32 {
    let now = Instant::now();
    let dt = match self.last_tick {
      Some(prev) => now.duration_since(prev).as_secs_f32(),
      None => 0.,
    };

    self.last_tick = Some(now);
    dt
  }

  /// Feed an absolute cursor position.
  ///
  /// The first sample only records the position, so a cursor entering the window does not
  /// jolt the view. Vertical deltas are reversed: screen y grows downward.
  pub fn on_cursor(&mut self, x: f32, y: f32) {
    let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));

    let dx = x - last_x;
    let dy = last_y - y;
    self.last_cursor = Some((x, y));

    self.camera.process_mouse_move(dx, dy, true);
  }

  /// Feed a vertical scroll amount.
  pub fn on_scroll(&mut self, dy: f32) {
    self.camera.process_scroll(dy);
  }

  /// Record a new framebuffer size. Zero-sized updates (minimized window) are ignored.
  pub fn on_resize(&mut self, width: u32, height: u32) {
    if width == 0 || height == 0 {
      return;
    }

    self.width = width;
    self.height = height;

    if let AspectMode::FollowResize = self.aspect_mode {
      self.aspect = width as f32 / height as f32;
      log::debug!("camera rig now projecting at {}x{}", width, height);
    }
  }

  /// Projection matrix for the camera zoom and the rig aspect ratio.
  pub fn perspective(&self, z_near: f32, z_far: f32) -> Matrix4<f32> {
    perspective(Deg(self.camera.zoom()), self.aspect, z_near, z_far)
  }

  /// View matrix of the wrapped camera.
  pub fn view(&self) -> Matrix4<f32> {
    self.camera.view_matrix()
  }

  /// Wrapped camera.
  pub fn camera(&self) -> &Camera {
    &self.camera
  }

  /// Wrapped camera, mutably.
  pub fn camera_mut(&mut self) -> &mut Camera {
    &mut self.camera
  }

  /// Current viewport size.
  pub fn viewport(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  /// Current projection aspect ratio.
  pub fn aspect(&self) -> f32 {
    self.aspect
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rig() -> CameraRig {
    CameraRig::new(800, 600, Camera::default()).unwrap()
  }

  #[test]
  fn empty_viewports_are_rejected() {
    assert_eq!(
      CameraRig::new(0, 600, Camera::default()).unwrap_err(),
      CameraRigError::EmptyViewport(0, 600)
    );
    assert_eq!(
      CameraRig::new(800, 0, Camera::default()).unwrap_err(),
      CameraRigError::EmptyViewport(800, 0)
    );
    assert!(CameraRig::new(1, 1, Camera::default()).is_ok());
  }

  #[test]
  fn empty_viewport_error_reads_well() {
    let e = CameraRig::new(0, 0, Camera::default()).unwrap_err();
    assert_eq!(e.to_string(), "cannot build a camera rig over an empty 0x0 viewport");
  }

  #[test]
  fn first_cursor_sample_does_not_turn_the_camera() {
    let mut rig = rig();
    let yaw = rig.camera().yaw();
    let pitch = rig.camera().pitch();

    rig.on_cursor(400., 300.);

    assert_eq!(rig.camera().yaw(), yaw);
    assert_eq!(rig.camera().pitch(), pitch);
  }

  #[test]
  fn later_cursor_samples_turn_the_camera() {
    let mut rig = rig();

    rig.on_cursor(400., 300.);
    rig.on_cursor(410., 290.);

    // 10 px right and 10 px up, scaled by the default sensitivity
    assert!((rig.camera().yaw() - (-89.)).abs() < 1e-4);
    assert!((rig.camera().pitch() - 1.).abs() < 1e-4);
  }

  #[test]
  fn fixed_aspect_ignores_resizes() {
    let mut rig = rig();
    let aspect = rig.aspect();

    rig.on_resize(1920, 1080);

    assert_eq!(rig.aspect(), aspect);
    assert_eq!(rig.viewport(), (1920, 1080));
  }

  #[test]
  fn follow_resize_tracks_the_framebuffer() {
    let mut rig = rig();
    rig.set_aspect_mode(AspectMode::FollowResize);

    rig.on_resize(1920, 1080);

    assert_eq!(rig.aspect(), 1920. / 1080.);
  }

  #[test]
  fn zero_sized_resizes_are_ignored() {
    let mut rig = rig();
    rig.set_aspect_mode(AspectMode::FollowResize);

    rig.on_resize(0, 0);

    assert_eq!(rig.viewport(), (800, 600));
    assert_eq!(rig.aspect(), 800. / 600.);
  }

  #[test]
  fn first_tick_reports_zero() {
    let mut rig = rig();

    assert_eq!(rig.tick(), 0.);
    // subsequent ticks measure real time and can only move forward
    assert!(rig.tick() >= 0.);
  }

  #[test]
  fn scrolling_through_the_rig_clamps_the_zoom() {
    let mut rig = rig();

    rig.on_scroll(1_000.);
    assert_eq!(rig.camera().zoom(), 1.);

    rig.on_scroll(-1_000.);
    assert_eq!(rig.camera().zoom(), 45.);
  }

  #[test]
  fn perspective_follows_the_camera_zoom() {
    let mut rig = rig();
    let wide = rig.perspective(0.1, 100.);

    rig.on_scroll(20.);
    let narrow = rig.perspective(0.1, 100.);

    let wide: &[[f32; 4]; 4] = wide.as_ref();
    let narrow: &[[f32; 4]; 4] = narrow.as_ref();

    // a smaller field of view means more magnification on the diagonal
    assert!(narrow[0][0] > wide[0][0]);
    assert!(narrow[1][1] > wide[1][1]);

    let expected = perspective(Deg(25.), 800. / 600., 0.1, 100.);
    let expected: &[[f32; 4]; 4] = expected.as_ref();

    for (a, b) in narrow.iter().flatten().zip(expected.iter().flatten()) {
      assert!((a - b).abs() < 1e-5);
    }
  }
}
