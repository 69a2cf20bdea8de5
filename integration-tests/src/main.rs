//! Integration tests that need a live OpenGL context.
//!
//! These checks talk to a real driver, so they stay out of `cargo test` and run one at a time:
//!
//! ```text
//! cargo run -p glint-integ-tests -- <test-name>
//! cargo run -p glint-integ-tests -- --list
//! ```

use colored::Colorize as _;

macro_rules! tests {
  ($($name:literal, $module:ident),* $(,)?) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    fn list_tests() {
      println!("available tests:");

      for test_name in TEST_NAMES {
        println!("  -> {}", test_name.blue());
      }
    }

    // run a given test; false if the name matches nothing
    fn run_test(name: &str) -> bool {
      match name {
        $(
          $name => {
            $module::fixture();
            true
          }
        )*

        _ => false,
      }
    }
  }
}

tests! {
  "uniform-readback", uniform_readback,
  "bad-stage", bad_stage,
}

fn main() {
  match std::env::args().nth(1).as_deref() {
    Some("--list") => list_tests(),

    Some(name) => {
      println!("test name: {}", name.green());

      if !run_test(name) {
        println!("{} is not a valid test", name.red());
        list_tests();
      }
    }

    None => {
      println!("missing test name (or --list)");
      list_tests();
    }
  }
}

#[cfg(test)]
mod tests {
  #[test]
  fn every_fixture_is_listed() {
    assert_eq!(super::TEST_NAMES, ["uniform-readback", "bad-stage"]);
  }
}
