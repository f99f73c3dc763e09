//! Cross-platform utilities for gendeps
//!
//! - [`fs`] - Idempotent directory creation, atomic writes, timestamps
//! - [`platform`] - Locating the interpreter and npm on `PATH`

pub mod fs;
pub mod platform;
