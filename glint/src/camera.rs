//! A free-fly camera.
//!
//! The camera owns a position and a yaw / pitch orientation, from which it derives an
//! orthonormal basis (`front`, `right`, `up`). Input reaches it as abstract movements
//! ([`CameraMove`]), mouse deltas and scroll amounts; the camera never talks to the windowing
//! system itself.

use cgmath::{Angle as _, Deg, InnerSpace as _, Matrix4, Point3, Vector3};

/// Default yaw, in degrees. Looking down negative z.
pub const YAW: f32 = -90.;

/// Default pitch, in degrees.
pub const PITCH: f32 = 0.;

/// Default travel speed, in world units per second.
pub const SPEED: f32 = 2.5;

/// Default mouse sensitivity.
pub const SENSITIVITY: f32 = 0.1;

/// Default zoom (vertical field of view), in degrees.
pub const ZOOM: f32 = 45.;

// pitch stops short of ±90°; at the poles front and world-up are colinear and the basis
// degenerates
const PITCH_LIMIT: f32 = 89.;

const ZOOM_MIN: f32 = 1.;
const ZOOM_MAX: f32 = 45.;

/// Movement direction, decoupled from any concrete input system.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CameraMove {
  /// Along the view direction.
  Forward,
  /// Against the view direction.
  Backward,
  /// Strafe left.
  Left,
  /// Strafe right.
  Right,
}

/// A fly-through camera based on yaw / pitch Euler angles.
#[derive(Clone, Debug)]
pub struct Camera {
  position: Point3<f32>,
  front: Vector3<f32>,
  up: Vector3<f32>,
  right: Vector3<f32>,
  world_up: Vector3<f32>,
  yaw: f32,
  pitch: f32,
  speed: f32,
  sensitivity: f32,
  zoom: f32,
}

impl Camera {
  /// Build a camera at `position`, oriented by `yaw` and `pitch` degrees, with `world_up` as
  /// the up reference.
  pub fn new(position: Point3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
    let mut camera = Camera {
      position,
      front: -Vector3::unit_z(),
      up: Vector3::unit_y(),
      right: Vector3::unit_x(),
      world_up,
      yaw,
      pitch,
      speed: SPEED,
      sensitivity: SENSITIVITY,
      zoom: ZOOM,
    };

    camera.update_vectors();
    camera
  }

  /// Build a camera at `position` with the default orientation.
  pub fn at(position: Point3<f32>) -> Self {
    Self::new(position, Vector3::unit_y(), YAW, PITCH)
  }

  /// Translate the camera along its basis.
  pub fn process_keyboard(&mut self, direction: CameraMove, dt: f32) {
    let velocity = self.speed * dt;

    match direction {
      CameraMove::Forward => self.position += self.front * velocity,
      CameraMove::Backward => self.position -= self.front * velocity,
      CameraMove::Left => self.position -= self.right * velocity,
      CameraMove::Right => self.position += self.right * velocity,
    }
  }

  /// Turn the camera by a mouse delta, `dx` to the right and `dy` upward.
  ///
  /// `constrain_pitch` keeps the pitch within ±89°; yaw is free to wrap.
  pub fn process_mouse_move(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
    self.yaw += dx * self.sensitivity;
    self.pitch += dy * self.sensitivity;

    if constrain_pitch {
      self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    self.update_vectors();
  }

  /// Apply a scroll amount to the zoom (vertical field of view, in degrees).
  pub fn process_scroll(&mut self, dy: f32) {
    self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
  }

  /// View matrix looking from the camera position along its front vector.
  pub fn view_matrix(&self) -> Matrix4<f32> {
    Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
  }

  /// Camera position.
  pub fn position(&self) -> Point3<f32> {
    self.position
  }

  /// Normalized view direction.
  pub fn front(&self) -> Vector3<f32> {
    self.front
  }

  /// Normalized right vector.
  pub fn right(&self) -> Vector3<f32> {
    self.right
  }

  /// Normalized up vector.
  pub fn up(&self) -> Vector3<f32> {
    self.up
  }

  /// Yaw, in degrees.
  pub fn yaw(&self) -> f32 {
    self.yaw
  }

  /// Pitch, in degrees.
  pub fn pitch(&self) -> f32 {
    self.pitch
  }

  /// Zoom (vertical field of view), in degrees.
  pub fn zoom(&self) -> f32 {
    self.zoom
  }

  fn update_vectors(&mut self) {
    let (yaw_sin, yaw_cos) = Deg(self.yaw).sin_cos();
    let (pitch_sin, pitch_cos) = Deg(self.pitch).sin_cos();

    let front = Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos);
    self.front = front.normalize();
    self.right = self.front.cross(self.world_up).normalize();
    self.up = self.right.cross(self.front).normalize();
  }
}

impl Default for Camera {
  fn default() -> Self {
    Self::at(Point3::new(0., 0., 0.))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cgmath::InnerSpace as _;

  const EPSILON: f32 = 1e-5;

  fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
  }

  fn assert_orthonormal(camera: &Camera) {
    assert!(close(camera.front().magnitude(), 1.));
    assert!(close(camera.right().magnitude(), 1.));
    assert!(close(camera.up().magnitude(), 1.));
    assert!(close(camera.front().dot(camera.right()), 0.));
    assert!(close(camera.front().dot(camera.up()), 0.));
    assert!(close(camera.right().dot(camera.up()), 0.));
  }

  #[test]
  fn default_basis_looks_down_negative_z() {
    let camera = Camera::default();

    assert!(close(camera.front().x, 0.));
    assert!(close(camera.front().y, 0.));
    assert!(close(camera.front().z, -1.));
    assert!(close(camera.right().x, 1.));
    assert!(close(camera.up().y, 1.));
    assert_orthonormal(&camera);
  }

  #[test]
  fn view_matrix_matches_look_at() {
    let camera = Camera::at(Point3::new(0., 0., 3.));
    let view = camera.view_matrix();
    let expected = Matrix4::look_at_rh(
      Point3::new(0., 0., 3.),
      Point3::new(0., 0., 2.),
      Vector3::unit_y(),
    );

    let view: &[[f32; 4]; 4] = view.as_ref();
    let expected: &[[f32; 4]; 4] = expected.as_ref();

    for (a, b) in view.iter().flatten().zip(expected.iter().flatten()) {
      assert!(close(*a, *b), "view matrix deviates: {} vs {}", a, b);
    }
  }

  #[test]
  fn forward_walk_covers_speed_times_dt() {
    let mut camera = Camera::at(Point3::new(0., 0., 3.));

    camera.process_keyboard(CameraMove::Forward, 1.);

    assert!(close(camera.position().x, 0.));
    assert!(close(camera.position().y, 0.));
    assert!(close(camera.position().z, 0.5));
  }

  #[test]
  fn strafing_does_not_change_height() {
    let mut camera = Camera::default();

    camera.process_keyboard(CameraMove::Left, 0.5);
    camera.process_keyboard(CameraMove::Backward, 0.25);

    assert!(close(camera.position().y, 0.));
    assert!(close(camera.position().x, -0.5 * SPEED));
    assert!(close(camera.position().z, 0.25 * SPEED));
  }

  #[test]
  fn pitch_is_clamped_under_the_poles() {
    let mut camera = Camera::default();

    camera.process_mouse_move(0., 100_000., true);
    assert!(close(camera.pitch(), 89.));
    assert_orthonormal(&camera);

    camera.process_mouse_move(0., -200_000., true);
    assert!(close(camera.pitch(), -89.));
    assert_orthonormal(&camera);
  }

  #[test]
  fn unconstrained_pitch_accumulates() {
    let mut camera = Camera::default();

    camera.process_mouse_move(0., 1_000., false);

    assert!(close(camera.pitch(), 1_000. * SENSITIVITY));
  }

  #[test]
  fn basis_stays_orthonormal_under_arbitrary_look_input() {
    let mut camera = Camera::default();
    let moves = [
      (154., -40.),
      (-7., 260.),
      (0.25, -0.5),
      (-1_000., 1_000.),
      (33., 0.),
      (0., -77.),
    ];

    for (dx, dy) in moves {
      camera.process_mouse_move(dx, dy, true);
      assert_orthonormal(&camera);
      assert!(camera.pitch() <= 89. && camera.pitch() >= -89.);
    }
  }

  #[test]
  fn zoom_is_clamped_to_its_range() {
    let mut camera = Camera::default();
    assert!(close(camera.zoom(), 45.));

    camera.process_scroll(10.);
    assert!(close(camera.zoom(), 35.));

    camera.process_scroll(1_000.);
    assert!(close(camera.zoom(), 1.));

    camera.process_scroll(-1_000.);
    assert!(close(camera.zoom(), 45.));
  }

  #[test]
  fn yaw_moves_the_front_vector() {
    let mut camera = Camera::default();

    // a quarter turn to the right
    camera.process_mouse_move(900., 0., true);

    assert!(close(camera.yaw(), 0.));
    assert!(close(camera.front().x, 1.));
    assert!(close(camera.front().z, 0.));
    assert_orthonormal(&camera);
  }
}
