//! Throwaway Closure project layouts for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::config::deps_writer_relative_path;
use crate::constants::{DEPS_FILE, DIST_DIR, LAST_UPDATE_STAMP, NODE_MODULES_DIR, PACKAGE_JSON};

/// A temporary project directory laid out like a Closure library checkout.
///
/// A fresh project has a `package.json` older than its
/// `node_modules/.last_update` stamp, so the toolchain check considers it up
/// to date and never runs npm. The dependency writer is whatever script the
/// test writes with [`write_deps_writer`](Self::write_deps_writer); run it
/// with `sh` as the interpreter.
pub struct TestProject {
    _temp: TempDir,
    base: PathBuf,
}

impl TestProject {
    /// Creates a project with an up-to-date `node_modules`.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let base = temp.path().canonicalize().context("Failed to canonicalize temp dir")?;

        let package_json = base.join(PACKAGE_JSON);
        fs::write(&package_json, "{\n  \"name\": \"test-player\"\n}\n")?;
        fs::OpenOptions::new()
            .write(true)
            .open(&package_json)?
            .set_modified(SystemTime::now() - Duration::from_secs(3600))?;

        let node_modules = base.join(NODE_MODULES_DIR);
        fs::create_dir_all(&node_modules)?;
        fs::write(node_modules.join(LAST_UPDATE_STAMP), "")?;

        for root in ["lib", "ui", "third_party", "demo"] {
            fs::create_dir_all(base.join(root))?;
        }

        Ok(Self {
            _temp: temp,
            base,
        })
    }

    /// Project base directory.
    pub fn path(&self) -> &Path {
        &self.base
    }

    /// Where the dependency writer is expected.
    pub fn deps_writer_path(&self) -> PathBuf {
        self.base.join(deps_writer_relative_path())
    }

    /// Writes the dependency writer script.
    pub fn write_deps_writer(&self, script: &str) -> Result<PathBuf> {
        let path = self.deps_writer_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, script)?;
        Ok(path)
    }

    /// Default manifest location.
    pub fn manifest_path(&self) -> PathBuf {
        self.base.join(DIST_DIR).join(DEPS_FILE)
    }

    /// Reads the manifest bytes.
    pub fn read_manifest(&self) -> Result<Vec<u8>> {
        let path = self.manifest_path();
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Writes a file relative to the base directory.
    pub fn create_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.base.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Marks `package.json` as changed since the last npm install.
    pub fn make_node_modules_stale(&self) -> Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .open(self.base.join(NODE_MODULES_DIR).join(LAST_UPDATE_STAMP))?
            .set_modified(SystemTime::now() - Duration::from_secs(7200))?;
        Ok(())
    }
}
