//! The dependency manifest generator.
//!
//! [`DepsGenerator::generate`] is a linear pipeline with a single gate and a
//! single commit point:
//!
//! 1. ask the [`Toolchain`] whether `node_modules` is ready (gate)
//! 2. make sure the output directory exists
//! 3. run the dependency writer in the project base directory
//! 4. write its standard output verbatim, atomically (commit)
//!
//! Nothing is written unless the dependency writer exits successfully, so a
//! failed run leaves the previous manifest untouched.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::core::GendepsError;
use crate::process::ProcessRunner;
use crate::toolchain::Toolchain;
use crate::utils::fs::{atomic_write, ensure_dir};

/// Generates the Closure dependency manifest for one project.
#[derive(Debug)]
pub struct DepsGenerator<T, R> {
    config: GeneratorConfig,
    toolchain: T,
    runner: R,
}

impl<T, R> DepsGenerator<T, R>
where
    T: Toolchain,
    R: ProcessRunner,
{
    /// Creates a generator from resolved settings and its collaborators.
    pub fn new(config: GeneratorConfig, toolchain: T, runner: R) -> Self {
        Self {
            config,
            toolchain,
            runner,
        }
    }

    /// Runs the pipeline and returns the path of the written manifest.
    ///
    /// # Errors
    ///
    /// - [`GendepsError::ToolchainUnavailable`] if the toolchain is not ready;
    ///   no process is launched and no file is touched
    /// - [`GendepsError::DestinationNotDirectory`] or
    ///   [`GendepsError::FileSystemError`] if the output directory cannot be created
    /// - [`GendepsError::ToolNotFound`] if the dependency writer is missing
    /// - any error from the [`ProcessRunner`], notably
    ///   [`GendepsError::ToolFailed`] with the tool's exit status; the
    ///   manifest is not written
    /// - write errors from the final atomic write
    pub async fn generate(&self) -> Result<PathBuf> {
        match self.toolchain.ensure_ready().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(GendepsError::ToolchainUnavailable {
                    reason: "node modules could not be installed or updated".to_string(),
                }
                .into());
            }
            Err(e) => {
                let reason = format!("{e:#}");
                return Err(e.context(GendepsError::ToolchainUnavailable {
                    reason,
                }));
            }
        }

        tracing::info!("Generating Closure dependencies...");

        ensure_dir(&self.config.output_dir())?;

        let deps_writer = self.config.deps_writer_path();
        if !deps_writer.is_file() {
            return Err(GendepsError::ToolNotFound {
                path: deps_writer.display().to_string(),
            }
            .into());
        }

        let invocation = self.config.invocation();
        let deps = self.runner.execute_get_output(&invocation).await?;

        atomic_write(&self.config.output, &deps)?;
        tracing::info!("Wrote {} bytes to {}", deps.len(), self.config.output.display());

        Ok(self.config.output.clone())
    }
}
