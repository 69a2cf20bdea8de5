//! A small demo kit for OpenGL 3.3.
//!
//! This crate gathers the infrastructure every little OpenGL demo ends up re-writing:
//!
//! - [`shader`]: shader stage / program compilation, linking and typed uniform uploads.
//! - [`camera`]: a free-fly Euler camera (yaw / pitch look, WASD translation, scroll zoom).
//! - [`rig`]: per-window camera state (viewport, frame clock, cursor tracking), owned by the
//!   demo and threaded explicitly through the render loop.
//! - [`texture`]: 2D texture decoding and upload.
//!
//! The crate is windowing-agnostic: it talks to OpenGL through the [gl] crate and assumes a
//! context is current on the calling thread, nothing more. Window and context creation live in
//! `glint-glfw`.
//!
//! [gl]: https://crates.io/crates/gl

pub mod camera;
pub mod rig;
pub mod shader;
pub mod texture;
