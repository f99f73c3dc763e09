//! Command-line interface for gendeps.
//!
//! gendeps has a single job and therefore no subcommands: running it from
//! anywhere inside a Closure project regenerates `dist/deps.js`.
//!
//! # Examples
//!
//! ```bash
//! # Regenerate dist/deps.js for the project containing the current directory
//! gendeps
//!
//! # Explicit project, no npm, verbose logging
//! gendeps --base ~/src/player --skip-update --verbose
//!
//! # Show the dependency writer call without running it
//! gendeps --dry-run
//! ```
//!
//! # Exit Status
//!
//! `0` on success. When the dependency writer fails, its exit status is
//! returned unchanged; every other failure exits with `1`.

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigOverrides, GeneratorConfig, ProjectConfig};
use crate::generator::DepsGenerator;
use crate::process::SystemRunner;
use crate::project::resolve_source_base;
use crate::toolchain::ToolchainCheck;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so logging can be set up before the command
/// runs and so tests can inspect the derived values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter, used when `RUST_LOG` is not set.
    ///
    /// - `"error"` with `--quiet`
    /// - `"debug"` with `--verbose`
    /// - `"info"` otherwise
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the flag-derived level. Logs go to stderr so
    /// `--dry-run` output on stdout stays clean. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Generate the Closure dependency manifest (dist/deps.js) for uncompiled mode.
#[derive(Parser, Debug)]
#[command(
    name = "gendeps",
    about = "Generate the Closure dependencies file required to run in uncompiled mode",
    version,
    long_about = "Runs Closure's depswriter.py over the project's source roots and writes its \
                  output to dist/deps.js. node_modules is brought up to date with 'npm ci' first."
)]
pub struct Cli {
    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Project base directory. Defaults to the nearest ancestor of the
    /// current directory containing package.json.
    #[arg(long, value_name = "DIR")]
    base: Option<PathBuf>,

    /// Project config file. Defaults to <base>/gendeps.toml when present.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Manifest to write. Relative paths resolve against the base directory.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Python interpreter used to run depswriter.py.
    #[arg(long, value_name = "PROGRAM", env = "GENDEPS_PYTHON")]
    python: Option<String>,

    /// npm program used to install node_modules.
    #[arg(long, value_name = "PROGRAM", env = "GENDEPS_NPM")]
    npm: Option<String>,

    /// Do not run 'npm ci'; only require node_modules to exist.
    #[arg(long)]
    skip_update: bool,

    /// Kill external tools that run longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the depswriter.py command instead of running it.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Builds the runtime configuration from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            interpreter: self.python.clone(),
            npm: self.npm.clone(),
            output: self.output.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Resolves the project and its settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be found or the
    /// configuration is invalid.
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let base = resolve_source_base(self.base.as_deref())?;
        let file = ProjectConfig::load_optional(&base, self.config.as_deref())?;
        GeneratorConfig::resolve(base, file, self.overrides())
    }

    /// Runs gendeps.
    ///
    /// # Errors
    ///
    /// Returns any error from configuration or generation; map it to an exit
    /// status with [`exit_code_for`](crate::core::exit_code_for).
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;

        if self.dry_run {
            println!("{}", config.invocation());
            return Ok(());
        }

        let toolchain =
            ToolchainCheck::for_project(&config.base, &config.npm, self.skip_update, config.timeout);
        let generator = DepsGenerator::new(config, toolchain, SystemRunner);
        generator.generate().await?;
        Ok(())
    }
}
