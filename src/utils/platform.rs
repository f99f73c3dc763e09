//! Platform helpers for locating external programs.
//!
//! gendeps shells out to a Python interpreter and to npm; both are found on
//! `PATH` the same way on every platform.

use crate::constants::{DEFAULT_INTERPRETERS, DEFAULT_NPM, FALLBACK_INTERPRETER};

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Checks if a command is available on `PATH`.
///
/// Also accepts a path to an executable file.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Returns the Python interpreter used to run the dependency writer.
///
/// An explicit choice always wins. Otherwise the first of `python3` and
/// `python` found on `PATH` is used, falling back to the bare name `python`
/// so a missing interpreter surfaces as a launch failure.
#[must_use]
pub fn resolve_interpreter(explicit: Option<&str>) -> String {
    if let Some(interpreter) = explicit {
        return interpreter.to_string();
    }

    DEFAULT_INTERPRETERS
        .iter()
        .find(|candidate| command_exists(candidate))
        .map_or_else(|| FALLBACK_INTERPRETER.to_string(), |found| (*found).to_string())
}

/// Returns the npm program name for this platform.
///
/// npm is a `.cmd` shim on Windows, which `Command` does not resolve by itself.
#[must_use]
pub fn default_npm_command() -> String {
    if is_windows() {
        format!("{DEFAULT_NPM}.cmd")
    } else {
        DEFAULT_NPM.to_string()
    }
}
