//! Error handling for gendeps
//!
//! This module provides the error types and user-friendly error reporting for the
//! dependency manifest generator. The error system follows two principles:
//! 1. **Strongly-typed errors** so the entry point can branch on failure modes
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`GendepsError`] - Enumerated error types for every failure in the pipeline
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Exit Codes
//!
//! Every error is terminal. [`GendepsError::exit_code`] maps an error to the
//! process exit status: a failing dependency writer passes its own status
//! through unchanged, every other failure exits with `1`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gendeps::core::{GendepsError, user_friendly_error};
//!
//! let error = GendepsError::ToolFailed {
//!     program: "python3".to_string(),
//!     code: 2,
//!     stderr: "depswriter.py: error".to_string(),
//! };
//! assert_eq!(error.exit_code(), 2);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Exit status used for every failure that is not a pass-through from the
/// dependency writer.
pub const GENERIC_FAILURE_EXIT_CODE: i32 = 1;

/// The main error type for gendeps operations
///
/// Each variant represents one failure mode of the generation pipeline and
/// carries the details needed to explain it to the user.
///
/// # Error Categories
///
/// ## Environment
/// - [`ToolchainUnavailable`] - `node_modules` could not be made ready
/// - [`ProjectRootNotFound`] - no `package.json` in any ancestor directory
///
/// ## File System
/// - [`DestinationNotDirectory`] - the output directory path is taken by a file
/// - [`FileSystemError`] - any other file system failure
///
/// ## External Tool
/// - [`ToolNotFound`] - the dependency writer script is missing
/// - [`ToolLaunchFailed`] - the interpreter could not be spawned
/// - [`ToolFailed`] - the tool exited with a non-zero status
/// - [`ToolTerminated`] - the tool was killed by a signal
/// - [`ToolTimedOut`] - the tool exceeded the configured timeout
///
/// ## Configuration
/// - [`ConfigError`] - invalid `gendeps.toml` or root table
///
/// [`ToolchainUnavailable`]: GendepsError::ToolchainUnavailable
/// [`ProjectRootNotFound`]: GendepsError::ProjectRootNotFound
/// [`DestinationNotDirectory`]: GendepsError::DestinationNotDirectory
/// [`FileSystemError`]: GendepsError::FileSystemError
/// [`ToolNotFound`]: GendepsError::ToolNotFound
/// [`ToolLaunchFailed`]: GendepsError::ToolLaunchFailed
/// [`ToolFailed`]: GendepsError::ToolFailed
/// [`ToolTerminated`]: GendepsError::ToolTerminated
/// [`ToolTimedOut`]: GendepsError::ToolTimedOut
/// [`ConfigError`]: GendepsError::ConfigError
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GendepsError {
    /// The third-party toolchain is not ready and could not be updated
    #[error("Dependency toolchain unavailable: {reason}")]
    ToolchainUnavailable {
        /// Why readiness failed
        reason: String,
    },

    /// No project base directory could be located
    #[error("No package.json found in {start} or any parent directory")]
    ProjectRootNotFound {
        /// Directory the search started from
        start: String,
    },

    /// The destination directory path exists but is not a directory
    #[error("Path exists but is not a directory: {path}")]
    DestinationNotDirectory {
        /// The offending path
        path: String,
    },

    /// General file system failure
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// Operation being performed
        operation: String,
        /// Path involved
        path: String,
    },

    /// The dependency writer script does not exist
    #[error("Dependency writer not found: {path}")]
    ToolNotFound {
        /// Expected location of the script
        path: String,
    },

    /// The subprocess could not be started
    #[error("Failed to launch {program}: {reason}")]
    ToolLaunchFailed {
        /// Program that failed to launch
        program: String,
        /// Launch error reported by the OS
        reason: String,
    },

    /// The subprocess ran and exited with a non-zero status
    #[error("{program} exited with status {code}")]
    ToolFailed {
        /// Program that was run
        program: String,
        /// Exit status, passed through to the caller
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The subprocess was terminated without an exit status
    #[error("{program} was terminated by a signal")]
    ToolTerminated {
        /// Program that was run
        program: String,
    },

    /// The subprocess exceeded the configured timeout
    #[error("{program} timed out after {secs} seconds")]
    ToolTimedOut {
        /// Program that was run
        program: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Any other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl GendepsError {
    /// Returns the process exit status for this error.
    ///
    /// [`GendepsError::ToolFailed`] yields the tool's own status so build
    /// pipelines can distinguish failure modes upstream. Everything else is
    /// [`GENERIC_FAILURE_EXIT_CODE`].
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                code,
                ..
            } => *code,
            _ => GENERIC_FAILURE_EXIT_CODE,
        }
    }
}

/// Maps any error to a process exit status.
///
/// Looks through the `anyhow` chain for a [`GendepsError`]; errors that never
/// passed through one exit with [`GENERIC_FAILURE_EXIT_CODE`].
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    find_gendeps_error(error).map_or(GENERIC_FAILURE_EXIT_CODE, GendepsError::exit_code)
}

/// Finds the outermost [`GendepsError`] attached to an error, whether as
/// context or as a cause.
fn find_gendeps_error(error: &anyhow::Error) -> Option<&GendepsError> {
    error
        .downcast_ref::<GendepsError>()
        .or_else(|| error.chain().find_map(|cause| cause.downcast_ref::<GendepsError>()))
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`GendepsError`] with an optional suggestion (displayed in green)
/// and optional details (displayed in yellow).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: GendepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: GendepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`GendepsError`] anywhere in the chain, then [`std::io::Error`]
/// and [`toml::de::Error`]. Anything else is reported with its full cause chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(gendeps_error) = find_gendeps_error(&error) {
        return create_error_context(gendeps_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(GendepsError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check ownership and permissions of the project directory")
                .with_details(
                    "gendeps needs write access to the dist/ directory of the project",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(GendepsError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(GendepsError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in gendeps.toml");
    }

    // Generic error - include the full chain for diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(GendepsError::Other {
        message,
    })
}

fn create_error_context(error: GendepsError) -> ErrorContext {
    match &error {
        GendepsError::ToolchainUnavailable { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'npm ci' in the project directory and check your network connection")
            .with_details("The Closure library is installed into node_modules by npm before dependencies can be generated"),

        GendepsError::ProjectRootNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run gendeps from inside the project or pass --base <DIR>"),

        GendepsError::DestinationNotDirectory { path } => {
            let suggestion = format!("Remove or rename the file at {path}");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        GendepsError::ToolNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Make sure google-closure-library is listed in package.json and run 'npm ci'")
            .with_details("depswriter.py ships with google-closure-library under closure/bin/build"),

        GendepsError::ToolLaunchFailed { program, .. } => {
            let suggestion =
                format!("Install {program} or point gendeps at an interpreter with --python");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        GendepsError::ToolFailed { stderr, .. } => {
            let details = stderr.trim().to_string();
            let ctx = ErrorContext::new(error)
                .with_suggestion("Fix the reported problem in the source roots and run gendeps again");
            if details.is_empty() {
                ctx
            } else {
                ctx.with_details(details)
            }
        }

        GendepsError::ToolTimedOut { .. } => ErrorContext::new(error)
            .with_suggestion("Increase --timeout or check whether the dependency writer is stuck"),

        GendepsError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check gendeps.toml; every [[roots]] entry needs a prefix and a path"),

        _ => ErrorContext::new(error),
    }
}
