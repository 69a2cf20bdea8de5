//! GLFW harness for glint demos.
//!
//! [`GlfwSurface`] opens a window holding an OpenGL 3.3 core context and loads the GL function
//! pointers. Demos implement [`Demo`] and are driven by [`run_demo`]: once per frame, pending
//! window events are adapted into [`InputAction`]s and handed to the demo together with the
//! elapsed time; the demo answers with a [`LoopFeedback`].
//!
//! Smooth camera motion wants key state rather than key events, so the WASD glue
//! ([`drive_camera`]) polls the window every frame instead of going through the event queue.

#![deny(missing_docs)]

use gl::types::{GLenum, GLsizei};
use glfw::{Action, Context as _, InitError, Key, SwapInterval, Window, WindowEvent, WindowMode};
use glint::camera::CameraMove;
use glint::rig::CameraRig;
use glint::texture::Texture;
use std::{
  error,
  ffi::CStr,
  fmt, iter,
  os::raw::{c_char, c_void},
  path::PathBuf,
  sync::mpsc::Receiver,
  time::Instant,
};

/// Dimension metrics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode with the wished resolution.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode, adapting to the primary monitor resolution.
  Fullscreen,
  /// Fullscreen mode with a restricted viewport resolution.
  FullscreenRestricted {
    /// Width of the viewport.
    width: u32,
    /// Height of the viewport.
    height: u32,
  },
}

/// Cursor mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorMode {
  /// The cursor is always visible.
  Visible,
  /// The cursor exists yet is hidden while over the window.
  Invisible,
  /// The cursor is disabled and the window captures it; raw deltas keep flowing in.
  Disabled,
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to
/// start with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  cursor_mode: CursorMode,
  num_samples: Option<u32>,
  vsync: bool,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to a 960 by 540 window.
  /// - `cursor_mode` set to [`CursorMode::Visible`].
  /// - `num_samples` set to `None`.
  /// - `vsync` set to `true`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 960,
        height: 540,
      },
      cursor_mode: CursorMode::Visible,
      num_samples: None,
      vsync: true,
    }
  }
}

impl WindowOpt {
  /// Set the window dimensions.
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the window dimensions.
  pub fn dim(&self) -> WindowDim {
    self.dim
  }

  /// Hide, unhide or disable the cursor. Default to [`CursorMode::Visible`].
  pub fn set_cursor_mode(self, mode: CursorMode) -> Self {
    WindowOpt {
      cursor_mode: mode,
      ..self
    }
  }

  /// Get the cursor mode.
  pub fn cursor_mode(&self) -> CursorMode {
    self.cursor_mode
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }

  /// Enable or disable vertical synchronization (buffer swaps waiting for the monitor's
  /// vertical retrace). Default to `true`.
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Get whether vertical synchronization is enabled.
  pub fn vsync(&self) -> bool {
    self.vsync
  }
}

/// Error that can be risen while creating a surface.
#[derive(Debug)]
pub enum SurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// Window creation failed.
  WindowCreationFailed,
}

impl fmt::Display for SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      SurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      SurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
    }
  }
}

impl From<InitError> for SurfaceError {
  fn from(e: InitError) -> Self {
    SurfaceError::InitError(e)
  }
}

impl error::Error for SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match *self {
      SurfaceError::InitError(ref e) => Some(e),
      SurfaceError::WindowCreationFailed => None,
    }
  }
}

/// GLFW surface.
///
/// This type wraps the GLFW window along with its event queue. Both are exposed directly:
/// demos poll key state straight off the window and the run loop drains the queue.
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped GLFW window.
  pub window: Window,
}

impl GlfwSurface {
  /// Open a window holding an OpenGL 3.3 core context.
  ///
  /// On success the context is current on the calling thread, the GL function pointers are
  /// loaded and the renderer / version pair has been logged.
  pub fn new_gl33(title: &str, opt: WindowOpt) -> Result<Self, SurfaceError> {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::Samples(opt.num_samples()));

    let (mut window, events_rx) = match opt.dim() {
      WindowDim::Windowed { width, height } => glfw
        .create_window(width, height, title, WindowMode::Windowed)
        .ok_or(SurfaceError::WindowCreationFailed)?,

      WindowDim::Fullscreen => glfw
        .with_primary_monitor(|glfw, monitor| {
          let monitor = monitor?;
          let mode = monitor.get_video_mode()?;
          glfw.create_window(mode.width, mode.height, title, WindowMode::FullScreen(monitor))
        })
        .ok_or(SurfaceError::WindowCreationFailed)?,

      WindowDim::FullscreenRestricted { width, height } => glfw
        .with_primary_monitor(|glfw, monitor| {
          let monitor = monitor?;
          glfw.create_window(width, height, title, WindowMode::FullScreen(monitor))
        })
        .ok_or(SurfaceError::WindowCreationFailed)?,
    };

    window.make_current();

    window.set_key_polling(true);
    window.set_cursor_pos_polling(true);
    window.set_scroll_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);

    let cursor_mode = match opt.cursor_mode() {
      CursorMode::Visible => glfw::CursorMode::Normal,
      CursorMode::Invisible => glfw::CursorMode::Hidden,
      CursorMode::Disabled => glfw::CursorMode::Disabled,
    };
    window.set_cursor_mode(cursor_mode);

    let interval = if opt.vsync() {
      SwapInterval::Sync(1)
    } else {
      SwapInterval::None
    };
    glfw.set_swap_interval(interval);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    log::info!("renderer: {}", gl_string(gl::RENDERER));
    log::info!("OpenGL version: {}", gl_string(gl::VERSION));

    let surface = GlfwSurface { events_rx, window };

    Ok(surface)
  }
}

fn gl_string(name: GLenum) -> String {
  unsafe {
    let ptr = gl::GetString(name);

    if ptr.is_null() {
      "unknown".to_owned()
    } else {
      CStr::from_ptr(ptr as *const c_char)
        .to_string_lossy()
        .into_owned()
    }
  }
}

/// A type used to pass window inputs to demos.
#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the demo.
  Quit,

  /// Cursor moved, in window coordinates.
  CursorMoved {
    /// Horizontal position.
    x: f32,
    /// Vertical position, growing downward.
    y: f32,
  },

  /// Vertical scroll.
  VScroll {
    /// Scroll amount; positive away from the user.
    amount: f32,
  },

  /// Framebuffer size changed.
  Resized {
    /// New width.
    width: u32,
    /// New height.
    height: u32,
  },
}

/// Map a GLFW window event onto the action demos consume, if any.
pub fn adapt_event(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
      Some(InputAction::Quit)
    }

    WindowEvent::CursorPos(x, y) => Some(InputAction::CursorMoved {
      x: x as _,
      y: y as _,
    }),

    WindowEvent::Scroll(_, amount) => Some(InputAction::VScroll {
      amount: amount as f32,
    }),

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width as _,
      height: height as _,
    }),

    _ => None,
  }
}

/// Feedback a demo hands back at the end of a frame.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback {
  /// Keep rendering.
  Continue,
  /// Tear the demo down.
  Exit,
}

/// Demo interface.
///
/// Demos allocate their GL resources in [`Demo::bootstrap`] and step in
/// [`Demo::render_frame`]; GL objects are released by `Drop` impls when the demo is torn down.
pub trait Demo {
  /// Window options the demo wants opened; the default suits most.
  fn window_opt() -> WindowOpt {
    WindowOpt::default()
  }

  /// Bootstrap the demo.
  fn bootstrap(assets: &Assets, surface: &mut GlfwSurface) -> Self;

  /// Render a frame of the demo.
  fn render_frame(
    &mut self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    surface: &mut GlfwSurface,
  ) -> LoopFeedback;
}

/// Where demos find their image assets.
///
/// Built from the CLI; a missing root behaves like a missing file, so demos get an empty
/// texture and a logged error instead of a crash.
#[derive(Clone, Debug, Default)]
pub struct Assets {
  root: Option<PathBuf>,
}

impl Assets {
  /// Asset lookup rooted at `root`.
  pub fn new(root: Option<PathBuf>) -> Self {
    Assets { root }
  }

  /// Load the texture file `name` under the asset root.
  pub fn texture(&self, name: &str, vflip: bool) -> Texture {
    match self.root {
      Some(ref root) => Texture::load(root.join(name), vflip),

      None => {
        log::error!("no texture directory set; cannot load {}", name);
        Texture::empty()
      }
    }
  }
}

/// Open a surface and drive `D` until it exits or the window closes.
pub fn run_demo<D>(title: &str, assets: Assets) -> Result<(), SurfaceError>
where
  D: Demo,
{
  let mut surface = GlfwSurface::new_gl33(title, D::window_opt())?;
  let mut demo = D::bootstrap(&assets, &mut surface);
  let start_t = Instant::now();

  // render a dummy frame to pass a single action containing the initial framebuffer size; the
  // window manager may have decided on something else than the requested dimensions
  let (fb_w, fb_h) = surface.window.get_framebuffer_size();
  let initial = InputAction::Resized {
    width: fb_w as u32,
    height: fb_h as u32,
  };

  if let LoopFeedback::Exit = demo.render_frame(0., iter::once(initial), &mut surface) {
    return Ok(());
  }

  'app: loop {
    // handle events
    surface.window.glfw.poll_events();
    let actions: Vec<_> = glfw::flush_messages(&surface.events_rx)
      .flat_map(|(_, event)| adapt_event(event))
      .collect();

    for action in &actions {
      if let InputAction::Resized { width, height } = *action {
        unsafe {
          gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
        }
      }
    }

    let elapsed = start_t.elapsed();
    let t = elapsed.as_secs() as f64 + (elapsed.subsec_millis() as f64 * 1e-3);
    let feedback = demo.render_frame(t as _, actions.into_iter(), &mut surface);

    if let LoopFeedback::Continue = feedback {
      surface.window.swap_buffers();
    } else {
      break 'app;
    }
  }

  Ok(())
}

/// Advance `rig` from the currently held movement keys.
pub fn drive_camera(window: &Window, rig: &mut CameraRig, dt: f32) {
  let moves = [
    (Key::W, CameraMove::Forward),
    (Key::S, CameraMove::Backward),
    (Key::A, CameraMove::Left),
    (Key::D, CameraMove::Right),
  ];

  for (key, direction) in moves {
    if window.get_key(key) == Action::Press {
      rig.camera_mut().process_keyboard(direction, dt);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use glfw::Modifiers;

  #[test]
  fn close_and_escape_quit() {
    assert_eq!(adapt_event(WindowEvent::Close), Some(InputAction::Quit));
    assert_eq!(
      adapt_event(WindowEvent::Key(
        Key::Escape,
        0,
        Action::Release,
        Modifiers::empty()
      )),
      Some(InputAction::Quit)
    );
  }

  #[test]
  fn escape_quits_on_release_only() {
    let pressed = adapt_event(WindowEvent::Key(
      Key::Escape,
      0,
      Action::Press,
      Modifiers::empty(),
    ));

    assert_eq!(pressed, None);
  }

  #[test]
  fn cursor_scroll_and_resize_map_through() {
    assert_eq!(
      adapt_event(WindowEvent::CursorPos(12.5, 4.)),
      Some(InputAction::CursorMoved { x: 12.5, y: 4. })
    );
    assert_eq!(
      adapt_event(WindowEvent::Scroll(0., -2.)),
      Some(InputAction::VScroll { amount: -2. })
    );
    assert_eq!(
      adapt_event(WindowEvent::FramebufferSize(1024, 768)),
      Some(InputAction::Resized {
        width: 1024,
        height: 768
      })
    );
  }

  #[test]
  fn unrelated_events_are_dropped() {
    assert_eq!(adapt_event(WindowEvent::Focus(true)), None);
    assert_eq!(
      adapt_event(WindowEvent::Key(Key::P, 0, Action::Press, Modifiers::empty())),
      None
    );
  }

  #[test]
  fn window_options_default_sanely() {
    let opt = WindowOpt::default();

    assert_eq!(
      opt.dim(),
      WindowDim::Windowed {
        width: 960,
        height: 540
      }
    );
    assert_eq!(opt.cursor_mode(), CursorMode::Visible);
    assert_eq!(opt.num_samples(), None);
    assert!(opt.vsync());
  }

  #[test]
  fn window_options_build_fluently() {
    let opt = WindowOpt::default()
      .set_dim(WindowDim::Fullscreen)
      .set_cursor_mode(CursorMode::Disabled)
      .set_num_samples(4)
      .set_vsync(false);

    assert_eq!(opt.dim(), WindowDim::Fullscreen);
    assert_eq!(opt.cursor_mode(), CursorMode::Disabled);
    assert_eq!(opt.num_samples(), Some(4));
    assert!(!opt.vsync());
  }
}
