//! Subprocess execution for the dependency writer
//!
//! The generator never spawns processes directly. It describes the call as a
//! [`ToolInvocation`] and hands it to a [`ProcessRunner`], which returns the
//! captured standard output bytes or a typed error carrying the exit status.
//! [`SystemRunner`] is the real implementation; tests substitute fakes.

pub mod command_builder;

pub use command_builder::{ToolCommand, ToolCommandOutput};

use anyhow::Result;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// A fully resolved subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Interpreter or executable to launch
    pub program: String,
    /// Arguments in order, starting with the tool script
    pub args: Vec<String>,
    /// Working directory of the child; relative paths in `args` resolve here
    pub current_dir: PathBuf,
    /// Optional upper bound on the run time
    pub timeout: Option<Duration>,
}

impl ToolInvocation {
    /// Returns the full argument vector, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone()).chain(self.args.iter().cloned()).collect()
    }

    /// Converts the invocation into a ready-to-run [`ToolCommand`].
    #[must_use]
    pub fn to_command(&self) -> ToolCommand {
        ToolCommand::new(&self.program)
            .args(self.args.iter().cloned())
            .current_dir(&self.current_dir)
            .with_timeout(self.timeout)
            .with_context("depswriter")
    }
}

impl fmt::Display for ToolInvocation {
    /// Renders a copy-pasteable shell line; arguments containing spaces are quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cd {} && ", quote(&self.current_dir.display().to_string()))?;
        let rendered: Vec<String> = self.argv().iter().map(|a| quote(a)).collect();
        write!(f, "{})", rendered.join(" "))
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('\'') {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// Runs a [`ToolInvocation`] and returns its standard output.
pub trait ProcessRunner {
    /// Executes the invocation and returns the raw standard output bytes.
    ///
    /// A non-zero exit must surface as
    /// [`GendepsError::ToolFailed`](crate::core::GendepsError::ToolFailed)
    /// carrying the child's exit status.
    fn execute_get_output(
        &self,
        invocation: &ToolInvocation,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`ProcessRunner`] that spawns real processes through [`ToolCommand`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn execute_get_output(&self, invocation: &ToolInvocation) -> Result<Vec<u8>> {
        let output = invocation.to_command().execute().await?;
        Ok(output.stdout)
    }
}
