//! Geometry shared between demos.
//!
//! Everything here is static vertex data: demos upload these tables once at bootstrap and keep
//! drawing them. The cube comes in two flavors depending on what the demo samples per vertex.

use cgmath::Vector3;

/// A unit cube as 36 interleaved vertices: position (3 floats) then texture coordinates
/// (2 floats).
#[rustfmt::skip]
pub const CUBE_POS_TEX: [f32; 180] = [
  // back face
  -0.5, -0.5, -0.5,  0., 0.,
   0.5, -0.5, -0.5,  1., 0.,
   0.5,  0.5, -0.5,  1., 1.,
   0.5,  0.5, -0.5,  1., 1.,
  -0.5,  0.5, -0.5,  0., 1.,
  -0.5, -0.5, -0.5,  0., 0.,
  // front face
  -0.5, -0.5,  0.5,  0., 0.,
   0.5, -0.5,  0.5,  1., 0.,
   0.5,  0.5,  0.5,  1., 1.,
   0.5,  0.5,  0.5,  1., 1.,
  -0.5,  0.5,  0.5,  0., 1.,
  -0.5, -0.5,  0.5,  0., 0.,
  // left face
  -0.5,  0.5,  0.5,  1., 0.,
  -0.5,  0.5, -0.5,  1., 1.,
  -0.5, -0.5, -0.5,  0., 1.,
  -0.5, -0.5, -0.5,  0., 1.,
  -0.5, -0.5,  0.5,  0., 0.,
  -0.5,  0.5,  0.5,  1., 0.,
  // right face
   0.5,  0.5,  0.5,  1., 0.,
   0.5,  0.5, -0.5,  1., 1.,
   0.5, -0.5, -0.5,  0., 1.,
   0.5, -0.5, -0.5,  0., 1.,
   0.5, -0.5,  0.5,  0., 0.,
   0.5,  0.5,  0.5,  1., 0.,
  // bottom face
  -0.5, -0.5, -0.5,  0., 1.,
   0.5, -0.5, -0.5,  1., 1.,
   0.5, -0.5,  0.5,  1., 0.,
   0.5, -0.5,  0.5,  1., 0.,
  -0.5, -0.5,  0.5,  0., 0.,
  -0.5, -0.5, -0.5,  0., 1.,
  // top face
  -0.5,  0.5, -0.5,  0., 1.,
   0.5,  0.5, -0.5,  1., 1.,
   0.5,  0.5,  0.5,  1., 0.,
   0.5,  0.5,  0.5,  1., 0.,
  -0.5,  0.5,  0.5,  0., 0.,
  -0.5,  0.5, -0.5,  0., 1.,
];

/// The same cube with per-vertex normals instead of texture coordinates: position (3 floats)
/// then normal (3 floats).
#[rustfmt::skip]
pub const CUBE_POS_NORMAL: [f32; 216] = [
  // back face
  -0.5, -0.5, -0.5,  0.,  0., -1.,
   0.5, -0.5, -0.5,  0.,  0., -1.,
   0.5,  0.5, -0.5,  0.,  0., -1.,
   0.5,  0.5, -0.5,  0.,  0., -1.,
  -0.5,  0.5, -0.5,  0.,  0., -1.,
  -0.5, -0.5, -0.5,  0.,  0., -1.,
  // front face
  -0.5, -0.5,  0.5,  0.,  0.,  1.,
   0.5, -0.5,  0.5,  0.,  0.,  1.,
   0.5,  0.5,  0.5,  0.,  0.,  1.,
   0.5,  0.5,  0.5,  0.,  0.,  1.,
  -0.5,  0.5,  0.5,  0.,  0.,  1.,
  -0.5, -0.5,  0.5,  0.,  0.,  1.,
  // left face
  -0.5,  0.5,  0.5, -1.,  0.,  0.,
  -0.5,  0.5, -0.5, -1.,  0.,  0.,
  -0.5, -0.5, -0.5, -1.,  0.,  0.,
  -0.5, -0.5, -0.5, -1.,  0.,  0.,
  -0.5, -0.5,  0.5, -1.,  0.,  0.,
  -0.5,  0.5,  0.5, -1.,  0.,  0.,
  // right face
   0.5,  0.5,  0.5,  1.,  0.,  0.,
   0.5,  0.5, -0.5,  1.,  0.,  0.,
   0.5, -0.5, -0.5,  1.,  0.,  0.,
   0.5, -0.5, -0.5,  1.,  0.,  0.,
   0.5, -0.5,  0.5,  1.,  0.,  0.,
   0.5,  0.5,  0.5,  1.,  0.,  0.,
  // bottom face
  -0.5, -0.5, -0.5,  0., -1.,  0.,
   0.5, -0.5, -0.5,  0., -1.,  0.,
   0.5, -0.5,  0.5,  0., -1.,  0.,
   0.5, -0.5,  0.5,  0., -1.,  0.,
  -0.5, -0.5,  0.5,  0., -1.,  0.,
  -0.5, -0.5, -0.5,  0., -1.,  0.,
  // top face
  -0.5,  0.5, -0.5,  0.,  1.,  0.,
   0.5,  0.5, -0.5,  0.,  1.,  0.,
   0.5,  0.5,  0.5,  0.,  1.,  0.,
   0.5,  0.5,  0.5,  0.,  1.,  0.,
  -0.5,  0.5,  0.5,  0.,  1.,  0.,
  -0.5,  0.5, -0.5,  0.,  1.,  0.,
];

/// World-space positions of the ten cubes the camera demo scatters around.
pub const CUBE_POSITIONS: [Vector3<f32>; 10] = [
  Vector3::new(0., 0., 0.),
  Vector3::new(2., 5., -15.),
  Vector3::new(-1.5, -2.2, -2.5),
  Vector3::new(-3.8, -2., -12.3),
  Vector3::new(2.4, -0.4, -3.5),
  Vector3::new(-1.7, 3., -7.5),
  Vector3::new(1.3, -2., -2.5),
  Vector3::new(1.5, 2., -2.5),
  Vector3::new(1.5, 0.2, -1.5),
  Vector3::new(-1.3, 1., -1.5),
];

/// Tilt axis for the scattered cubes; normalize before building a rotation out of it.
pub const CUBE_SPIN_AXIS: Vector3<f32> = Vector3::new(1., 0.3, 0.5);
