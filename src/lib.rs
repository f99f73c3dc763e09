//! gendeps - Closure dependency manifest generator
//!
//! Creates the Closure dependencies file (`dist/deps.js`) required to run a
//! JavaScript library in uncompiled mode. gendeps makes sure `node_modules`
//! is installed, runs Closure's `depswriter.py` over the project's source
//! roots, and writes its output atomically.
//!
//! # Architecture Overview
//!
//! - [`project`] - Locates the project base directory (`package.json`)
//! - [`toolchain`] - Keeps `node_modules` up to date with `npm ci`
//! - [`config`] - Root table, tool location, and `gendeps.toml` overrides
//! - [`process`] - Subprocess execution with exit-status pass-through
//! - [`generator`] - The pipeline tying the pieces together
//! - [`cli`] - Command-line parsing and logging setup
//! - [`core`] - Error types and user-friendly reporting
//! - [`utils`] - File system and platform helpers
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use gendeps::config::GeneratorConfig;
//! use gendeps::generator::DepsGenerator;
//! use gendeps::process::SystemRunner;
//! use gendeps::toolchain::NodeModules;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GeneratorConfig::new("/path/to/project");
//! let toolchain = NodeModules::new(&config.base, &config.npm);
//! let manifest = DepsGenerator::new(config, toolchain, SystemRunner).generate().await?;
//! println!("Wrote {}", manifest.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! gendeps                  # regenerate dist/deps.js
//! gendeps --skip-update    # do not run npm ci
//! gendeps --dry-run        # print the depswriter.py call
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod generator;
pub mod process;
pub mod project;
pub mod toolchain;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
