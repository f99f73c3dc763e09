//! Test utilities for gendeps
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//! - [`TestProject`] - a throwaway Closure project with a fake dependency writer
//!
//! # Example
//!
//! ```rust,no_run
//! use gendeps::test_utils::TestProject;
//!
//! let project = TestProject::new().unwrap();
//! project.write_deps_writer("printf 'goog.addDependency(...);\\n'\n").unwrap();
//! assert!(project.deps_writer_path().is_file());
//! ```

pub mod project;

pub use project::TestProject;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, else `RUST_LOG` if set, else leaves logging off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
