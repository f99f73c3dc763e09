//! Integration test suite for gendeps
//!
//! These tests drive the built `gendeps` binary against temporary project
//! trees. The dependency writer is replaced by a shell script run with `sh`,
//! so the suite needs neither Python nor npm.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: successful runs, argument layout, idempotence, config files
//! - **failures**: exit-status pass-through and everything that must not write

#![cfg(unix)]

use assert_cmd::Command;
use gendeps::test_utils::TestProject;

mod failures;
mod generate;

/// Writes every argument on its own line to args.txt and the working
/// directory to cwd.txt, then prints `stdout` verbatim.
pub fn recording_script(stdout: &str) -> String {
    format!(
        "pwd -P > cwd.txt\n\
         for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > args.txt\n\
         printf '{stdout}'\n"
    )
}

/// A `gendeps` command running inside `project` with `sh` as the interpreter.
pub fn gendeps_cmd(project: &TestProject) -> Command {
    gendeps_cmd_with_python(project, "sh")
}

/// A `gendeps` command running inside `project` with the given interpreter.
pub fn gendeps_cmd_with_python(project: &TestProject, python: &str) -> Command {
    let mut cmd = Command::cargo_bin("gendeps").unwrap();
    cmd.current_dir(project.path())
        .env_remove("GENDEPS_PYTHON")
        .env_remove("GENDEPS_NPM")
        .env_remove("RUST_LOG")
        .args(["--python", python]);
    cmd
}
