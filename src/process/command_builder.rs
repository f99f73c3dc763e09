//! Type-safe command builder for running external tools
//!
//! This module provides a fluent API for building and executing the
//! subprocesses gendeps depends on (the Python dependency writer and npm),
//! with consistent logging, timeout handling, and exit-status mapping.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::GendepsError;

/// Builder for constructing and executing an external command.
///
/// # Examples
///
/// ```rust,no_run
/// use gendeps::process::ToolCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = ToolCommand::new("python3")
///     .arg("node_modules/google-closure-library/closure/bin/build/depswriter.py")
///     .arg("--root_with_prefix=lib ../../../../lib")
///     .current_dir("/path/to/project")
///     .execute()
///     .await?;
/// println!("{} bytes of dependencies", output.stdout.len());
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Timeout**: none, the command may run indefinitely
/// - **Output capture**: enabled
/// - **Working directory**: current process directory
/// - **Environment**: inherited from the parent process
pub struct ToolCommand {
    /// Program to run
    program: String,

    /// Arguments passed to the program, in order
    args: Vec<String>,

    /// Working directory for the child (defaults to current directory)
    current_dir: Option<PathBuf>,

    /// Whether to capture output (true) or inherit stdio (false)
    capture_output: bool,

    /// Maximum duration to wait for completion (None = no timeout)
    timeout_duration: Option<Duration>,

    /// Optional label included in log lines
    context: Option<String>,
}

impl ToolCommand {
    /// Creates a new builder for `program` with default settings.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            capture_output: true,
            timeout_duration: None,
            context: None,
        }
    }

    /// Sets the working directory of the child process.
    ///
    /// Relative program and argument paths resolve against this directory;
    /// the parent process's own working directory is left untouched.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments, preserving their order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Disables output capture, letting the child write to the terminal.
    ///
    /// Used for `npm ci`, whose progress output is meant for the user.
    pub const fn inherit_stdio(mut self) -> Self {
        self.capture_output = false;
        self
    }

    /// Set a timeout for the command (None for no timeout)
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Set a label included in debug log messages.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return its output.
    ///
    /// # Errors
    ///
    /// - [`GendepsError::ToolLaunchFailed`] if the program cannot be spawned
    /// - [`GendepsError::ToolFailed`] if it exits with a non-zero status
    /// - [`GendepsError::ToolTerminated`] if it exits without a status
    /// - [`GendepsError::ToolTimedOut`] if the timeout elapses; the child is killed
    pub async fn execute(self) -> Result<ToolCommandOutput> {
        let start = Instant::now();
        let command_line = self.command_line();
        let label = self.context.as_deref().unwrap_or(self.program.as_str());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).kill_on_drop(true);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
            tracing::debug!(
                target: "process",
                "({}) Executing command in {}: {}",
                label,
                dir.display(),
                command_line
            );
        } else {
            tracing::debug!(target: "process", "({}) Executing command: {}", label, command_line);
        }

        if self.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }
        cmd.stdin(Stdio::null());

        let output_future = cmd.output();

        let result = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result
            } else {
                tracing::warn!(
                    target: "process",
                    "Command timed out after {} seconds: {}",
                    duration.as_secs(),
                    command_line
                );
                return Err(GendepsError::ToolTimedOut {
                    program: self.program,
                    secs: duration.as_secs(),
                }
                .into());
            }
        } else {
            output_future.await
        };

        let output = result.map_err(|e| GendepsError::ToolLaunchFailed {
            program: self.program.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::debug!(
                target: "process",
                "({}) Command failed with exit code: {:?}",
                label,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "process", "({}) Error: {}", label, stderr.trim());
            }

            return Err(match output.status.code() {
                Some(code) => GendepsError::ToolFailed {
                    program: self.program,
                    code,
                    stderr,
                },
                None => GendepsError::ToolTerminated {
                    program: self.program,
                },
            }
            .into());
        }

        // A successful tool may still report problems worth seeing
        for line in String::from_utf8_lossy(&output.stderr).lines().filter(|l| !l.trim().is_empty()) {
            tracing::warn!(target: "process", "({}) {}", label, line.trim_end());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(target: "process::perf", "({}) took {:.2}s", label, elapsed.as_secs_f64());
        } else {
            tracing::debug!(target: "process::perf", "({}) took {}ms", label, elapsed.as_millis());
        }

        Ok(ToolCommandOutput {
            stdout: output.stdout,
        })
    }

    /// Execute the command, discarding its output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Output from a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommandOutput {
    /// Raw standard output bytes
    pub stdout: Vec<u8>,
}
