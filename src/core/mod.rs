//! Core types for gendeps
//!
//! This module holds the error system shared by every stage of the
//! generation pipeline:
//! - [`GendepsError`] - Enumerated error types covering all failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//! - [`exit_code_for`] - Map any error to the process exit status

pub mod error;

pub use error::{
    ErrorContext, GENERIC_FAILURE_EXIT_CODE, GendepsError, exit_code_for, user_friendly_error,
};
