//! Demo picker.
//!
//! Each demo lives in its own module and implements [`Demo`]; this binary only selects one by
//! name and hands it to the harness.

mod shared;

use glint_glfw::{Assets, Demo};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// Directory where to pick textures from.
  textures: Option<PathBuf>,

  #[structopt(short, long)]
  /// List available demos.
  list_demos: bool,

  /// Demo to run.
  demo: Option<String>,
}

/// Macro to declaratively add demos.
macro_rules! demos {
  ($($name:literal, $module:ident),* $(,)?) => {
    // declare the modules for all demos
    $(
      mod $module;
    )*

    fn show_available_demos() {
      println!("available demos:");
      $( println!("  - {}", $name); )*
    }

    // create a function that will run a demo based on its name
    fn pick_and_run_demo(cli_opts: CLIOpts) {
      let demo_name = cli_opts.demo.as_ref().map(|n| n.as_str());
      match demo_name {
        $(
          Some($name) => {
            run_demo::<$module::LocalDemo>($name, cli_opts)
          }
        ),*

        _ => {
          log::error!("no demo found");
          show_available_demos();
        }
      }
    }
  }
}

// Run a demo.
fn run_demo<D>(name: &str, cli_opts: CLIOpts)
where
  D: Demo,
{
  let assets = Assets::new(cli_opts.textures);

  if let Err(e) = glint_glfw::run_demo::<D>(name, assets) {
    log::error!("cannot run {}: {}", name, e);
  }
}

demos! {
  "uniforms", uniforms,
  "matrices", matrices,
  "cubes", cubes,
  "normals", normals,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_demos {
    show_available_demos();
  } else {
    pick_and_run_demo(cli_opts);
  }
}
