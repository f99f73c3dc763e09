//! Configuration for dependency generation
//!
//! gendeps works with no configuration at all: the source roots, tool
//! location, and output path default to the layout of a Closure project
//! whose library lives under `node_modules/google-closure-library`.
//!
//! A project may override the defaults with a `gendeps.toml` at its base:
//!
//! ```toml
//! interpreter = "python3"
//! npm = "npm"
//! output = "dist/deps.js"
//! timeout_secs = 120
//!
//! [[roots]]
//! prefix = "lib"
//! path = "../../../../lib"
//!
//! [[roots]]
//! prefix = "ui"
//! path = "../../../../ui"
//! ```
//!
//! Every key is optional. Command-line flags override file values.
//!
//! # Root Paths
//!
//! Root paths are relative to the directory of Closure's `base.js`
//! (`node_modules/google-closure-library/closure/goog/`), not to the project
//! base. The dependency writer resolves them itself.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_FILE, DEFAULT_ROOTS, DEPS_FILE, DEPS_WRITER_COMPONENTS, DIST_DIR, ROOT_WITH_PREFIX_FLAG,
};
use crate::core::GendepsError;
use crate::process::ToolInvocation;
use crate::utils::platform::{default_npm_command, resolve_interpreter};

/// One source root passed to the dependency writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootMapping {
    /// Logical name the root is exposed under
    pub prefix: String,
    /// Physical directory, relative to Closure's `base.js`
    pub path: String,
}

impl RootMapping {
    /// Creates a mapping from a logical prefix to a physical path.
    pub fn new(prefix: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
    }

    /// Renders the mapping as a single dependency writer argument.
    ///
    /// The prefix and path are separated by a space inside one argument; the
    /// dependency writer splits them.
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("{ROOT_WITH_PREFIX_FLAG}={} {}", self.prefix, self.path)
    }
}

/// Returns the built-in root table, in order.
#[must_use]
pub fn default_roots() -> Vec<RootMapping> {
    DEFAULT_ROOTS.iter().map(|(prefix, path)| RootMapping::new(*prefix, *path)).collect()
}

/// Renders a root table as dependency writer arguments, preserving order.
///
/// Later roots win over earlier ones on path collisions inside the tool, so
/// the order is significant.
#[must_use]
pub fn root_args(roots: &[RootMapping]) -> Vec<String> {
    roots.iter().map(RootMapping::to_arg).collect()
}

/// Returns the dependency writer location relative to the project base.
#[must_use]
pub fn deps_writer_relative_path() -> PathBuf {
    DEPS_WRITER_COMPONENTS.iter().collect()
}

/// Contents of `gendeps.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Interpreter used to run the dependency writer
    pub interpreter: Option<String>,
    /// npm program used by the toolchain check
    pub npm: Option<String>,
    /// Manifest path; relative paths resolve against the base directory
    pub output: Option<PathBuf>,
    /// Subprocess timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Replacement root table
    pub roots: Option<Vec<RootMapping>>,
}

impl ProjectConfig {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| GendepsError::ConfigError {
                message: format!("{}: {}", path.display(), e.to_string().trim()),
            })
            .map_err(Into::into)
    }

    /// Loads the explicit config file if given, else `<base>/gendeps.toml`
    /// if it exists, else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file that should be loaded cannot be parsed, or
    /// if an explicit file does not exist.
    pub fn load_optional(base: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let default_path = base.join(CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!("Loading project config from {}", default_path.display());
            Self::load_from(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values supplied on the command line; they take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Interpreter override
    pub interpreter: Option<String>,
    /// npm override
    pub npm: Option<String>,
    /// Output path override
    pub output: Option<PathBuf>,
    /// Timeout override in seconds
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Project base directory; working directory of the dependency writer
    pub base: PathBuf,
    /// Ordered root table
    pub roots: Vec<RootMapping>,
    /// Interpreter used to run the dependency writer
    pub interpreter: String,
    /// npm program used by the toolchain check
    pub npm: String,
    /// Absolute path of the manifest
    pub output: PathBuf,
    /// Optional subprocess timeout
    pub timeout: Option<Duration>,
}

impl GeneratorConfig {
    /// Defaults for a project rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let output = base.join(DIST_DIR).join(DEPS_FILE);
        Self {
            base,
            roots: default_roots(),
            interpreter: resolve_interpreter(None),
            npm: default_npm_command(),
            output,
            timeout: None,
        }
    }

    /// Combines defaults, the project file, and command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`GendepsError::ConfigError`] if the resulting root table is invalid.
    pub fn resolve(
        base: impl Into<PathBuf>,
        file: ProjectConfig,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let base = base.into();
        let mut config = Self::new(&base);

        if let Some(roots) = file.roots {
            config.roots = roots;
        }

        if let Some(interpreter) = overrides.interpreter.or(file.interpreter) {
            config.interpreter = interpreter;
        }

        if let Some(npm) = overrides.npm.or(file.npm) {
            config.npm = npm;
        }

        if let Some(output) = overrides.output.or(file.output) {
            config.output = if output.is_absolute() {
                output
            } else {
                base.join(output)
            };
        }

        if let Some(secs) = overrides.timeout_secs.or(file.timeout_secs) {
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the root table.
    ///
    /// # Errors
    ///
    /// Returns [`GendepsError::ConfigError`] if the table is empty or an entry
    /// has an empty prefix or path.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(GendepsError::ConfigError {
                message: "at least one source root is required".to_string(),
            }
            .into());
        }

        for (index, root) in self.roots.iter().enumerate() {
            if root.prefix.trim().is_empty() || root.path.trim().is_empty() {
                return Err(GendepsError::ConfigError {
                    message: format!("root #{} needs both a prefix and a path", index + 1),
                }
                .into());
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(GendepsError::ConfigError {
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Absolute location of the dependency writer script.
    #[must_use]
    pub fn deps_writer_path(&self) -> PathBuf {
        self.base.join(deps_writer_relative_path())
    }

    /// Directory the manifest is written into.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output.parent().map_or_else(|| self.base.clone(), Path::to_path_buf)
    }

    /// Builds the dependency writer invocation.
    ///
    /// The script path is relative and the child runs in the base directory,
    /// so the tool sees the same layout as when run from the project root.
    #[must_use]
    pub fn invocation(&self) -> ToolInvocation {
        let mut args = vec![deps_writer_relative_path().display().to_string()];
        args.extend(root_args(&self.roots));

        ToolInvocation {
            program: self.interpreter.clone(),
            args,
            current_dir: self.base.clone(),
            timeout: self.timeout,
        }
    }
}
