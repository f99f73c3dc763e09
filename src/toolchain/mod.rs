//! Toolchain readiness checks.
//!
//! The dependency writer ships inside `google-closure-library`, which npm
//! installs into `node_modules`. Before generating, the generator asks a
//! [`Toolchain`] whether that tree is ready. [`NodeModules`] brings it up to
//! date with `npm ci` when `package.json` or `package-lock.json` changed since
//! the last install; [`ExistingNodeModules`] only checks it is there.
//!
//! Readiness is a yes/no gate. Failures to update are logged and reported as
//! `false`; the generator turns that into an error.

use anyhow::Result;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{LAST_UPDATE_STAMP, NODE_MODULES_DIR, PACKAGE_JSON, PACKAGE_LOCK_JSON};
use crate::process::ToolCommand;
use crate::utils::fs::{get_modified_time, is_newer_than, touch};

/// Guarantees the third-party toolchain is installed.
pub trait Toolchain {
    /// Returns `true` when the toolchain is ready to use, `false` when it
    /// is unavailable and could not be made ready.
    fn ensure_ready(&self) -> impl Future<Output = Result<bool>> + Send;
}

/// Keeps `node_modules` in sync with `package.json` using `npm ci`.
#[derive(Debug, Clone)]
pub struct NodeModules {
    base: PathBuf,
    npm: String,
    timeout: Option<Duration>,
}

impl NodeModules {
    /// Creates a checker for the project at `base` using the given npm program.
    pub fn new(base: impl Into<PathBuf>, npm: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            npm: npm.into(),
            timeout: None,
        }
    }

    /// Bounds how long `npm ci` may run.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the `node_modules` directory.
    #[must_use]
    pub fn node_modules_dir(&self) -> PathBuf {
        self.base.join(NODE_MODULES_DIR)
    }

    /// Path of the stamp file touched after each successful install.
    #[must_use]
    pub fn stamp_path(&self) -> PathBuf {
        self.node_modules_dir().join(LAST_UPDATE_STAMP)
    }

    /// Returns `true` when `npm ci` must run.
    ///
    /// That is the case when `node_modules` or the stamp is missing, or when
    /// `package.json` or `package-lock.json` is strictly newer than the stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn needs_update(&self) -> Result<bool> {
        let stamp = self.stamp_path();
        if !self.node_modules_dir().is_dir() || !stamp.is_file() {
            return Ok(true);
        }

        let last_update = get_modified_time(&stamp)?;
        for manifest in [PACKAGE_JSON, PACKAGE_LOCK_JSON] {
            if is_newer_than(&self.base.join(manifest), last_update)? {
                tracing::debug!(target: "toolchain", "{} changed since last npm install", manifest);
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn install(&self) -> Result<()> {
        ToolCommand::new(&self.npm)
            .arg("ci")
            .current_dir(&self.base)
            .inherit_stdio()
            .with_timeout(self.timeout)
            .with_context("npm")
            .execute_success()
            .await?;

        touch(&self.stamp_path())
    }
}

impl Toolchain for NodeModules {
    async fn ensure_ready(&self) -> Result<bool> {
        if !self.base.join(PACKAGE_JSON).is_file() {
            tracing::warn!(
                target: "toolchain",
                "No {} in {}; cannot install node modules",
                PACKAGE_JSON,
                self.base.display()
            );
            return Ok(false);
        }

        if !self.needs_update()? {
            tracing::debug!(target: "toolchain", "node_modules is up to date");
            return Ok(true);
        }

        tracing::info!(target: "toolchain", "Updating node modules...");
        match self.install().await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(target: "toolchain", "Failed to update node modules: {:#}", e);
                Ok(false)
            }
        }
    }
}

/// Accepts whatever is already installed, without running npm.
#[derive(Debug, Clone)]
pub struct ExistingNodeModules {
    base: PathBuf,
}

impl ExistingNodeModules {
    /// Creates a checker for the project at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
        }
    }

    fn node_modules_dir(&self) -> PathBuf {
        self.base.join(NODE_MODULES_DIR)
    }
}

impl Toolchain for ExistingNodeModules {
    async fn ensure_ready(&self) -> Result<bool> {
        let dir = self.node_modules_dir();
        let ready = dir.is_dir();
        if !ready {
            tracing::warn!(target: "toolchain", "{} does not exist", dir.display());
        }
        Ok(ready)
    }
}

/// Either readiness strategy, chosen at runtime from the command line.
#[derive(Debug, Clone)]
pub enum ToolchainCheck {
    /// Run `npm ci` when needed
    Update(NodeModules),
    /// Only check that `node_modules` exists
    Existing(ExistingNodeModules),
}

impl ToolchainCheck {
    /// Picks the strategy for a project.
    pub fn for_project(
        base: &Path,
        npm: &str,
        skip_update: bool,
        timeout: Option<Duration>,
    ) -> Self {
        if skip_update {
            Self::Existing(ExistingNodeModules::new(base))
        } else {
            Self::Update(NodeModules::new(base, npm).with_timeout(timeout))
        }
    }
}

impl Toolchain for ToolchainCheck {
    async fn ensure_ready(&self) -> Result<bool> {
        match self {
            Self::Update(check) => check.ensure_ready().await,
            Self::Existing(check) => check.ensure_ready().await,
        }
    }
}
