//! Global constants used throughout gendeps.
//!
//! File names, relative paths, and defaults for the Closure toolchain
//! layout live here so the rest of the code never spells them out.

/// File that marks the project base directory.
pub const PACKAGE_JSON: &str = "package.json";

/// npm lockfile; a change to it also triggers `npm ci`.
pub const PACKAGE_LOCK_JSON: &str = "package-lock.json";

/// Directory npm installs packages into, relative to the base directory.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Stamp file touched after a successful `npm ci`, relative to `node_modules`.
pub const LAST_UPDATE_STAMP: &str = ".last_update";

/// Project configuration file, relative to the base directory.
pub const CONFIG_FILE: &str = "gendeps.toml";

/// Output directory, relative to the base directory.
pub const DIST_DIR: &str = "dist";

/// Manifest file name inside [`DIST_DIR`].
pub const DEPS_FILE: &str = "deps.js";

/// Path components of `depswriter.py`, relative to the base directory.
pub const DEPS_WRITER_COMPONENTS: [&str; 6] =
    ["node_modules", "google-closure-library", "closure", "bin", "build", "depswriter.py"];

/// Interpreters tried in order when none is configured.
pub const DEFAULT_INTERPRETERS: [&str; 2] = ["python3", "python"];

/// Interpreter used when none of [`DEFAULT_INTERPRETERS`] is on `PATH`.
pub const FALLBACK_INTERPRETER: &str = "python";

/// Default npm program.
pub const DEFAULT_NPM: &str = "npm";

/// Flag the dependency writer uses for each source root.
pub const ROOT_WITH_PREFIX_FLAG: &str = "--root_with_prefix";

/// Default source roots, relative to Closure's `base.js` which lives at
/// `node_modules/google-closure-library/closure/goog/base.js`.
pub const DEFAULT_ROOTS: [(&str, &str); 5] = [
    ("lib", "../../../../lib"),
    ("ui", "../../../../ui"),
    ("third_party", "../../../../third_party"),
    ("dist", "../../../../dist"),
    ("demo", "../../../../demo"),
];
