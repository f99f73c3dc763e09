use super::*;
use crate::constants::PACKAGE_JSON;
use serial_test::serial;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn test_default_log_level_is_info() {
    let cli = Cli::parse_from(["gendeps"]);
    assert_eq!(cli.build_config().log_level.as_deref(), Some("info"));
}

#[test]
#[serial]
fn test_verbose_and_quiet_levels() {
    let verbose = Cli::parse_from(["gendeps", "--verbose"]);
    assert_eq!(verbose.build_config().log_level.as_deref(), Some("debug"));

    let quiet = Cli::parse_from(["gendeps", "-q"]);
    assert_eq!(quiet.build_config().log_level.as_deref(), Some("error"));
}

#[test]
#[serial]
fn test_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["gendeps", "-v", "-q"]).is_err());
}

#[test]
#[serial]
fn test_flags_become_overrides() {
    let cli = Cli::parse_from([
        "gendeps",
        "--python",
        "python3.12",
        "--npm",
        "pnpm",
        "--output",
        "out/deps.js",
        "--timeout",
        "30",
    ]);
    let overrides = cli.overrides();

    assert_eq!(overrides.interpreter.as_deref(), Some("python3.12"));
    assert_eq!(overrides.npm.as_deref(), Some("pnpm"));
    assert_eq!(overrides.output, Some(PathBuf::from("out/deps.js")));
    assert_eq!(overrides.timeout_secs, Some(30));
}

#[test]
#[serial]
fn test_tool_programs_from_environment() {
    let orig_python = std::env::var("GENDEPS_PYTHON").ok();
    let orig_npm = std::env::var("GENDEPS_NPM").ok();

    // SAFETY: serialized with every other test touching these variables
    unsafe {
        std::env::set_var("GENDEPS_PYTHON", "/opt/python/bin/python3");
        std::env::set_var("GENDEPS_NPM", "/opt/node/bin/npm");
    }

    let overrides = Cli::parse_from(["gendeps"]).overrides();
    assert_eq!(overrides.interpreter.as_deref(), Some("/opt/python/bin/python3"));
    assert_eq!(overrides.npm.as_deref(), Some("/opt/node/bin/npm"));

    // Flags still win
    let overrides = Cli::parse_from(["gendeps", "--python", "python3"]).overrides();
    assert_eq!(overrides.interpreter.as_deref(), Some("python3"));

    unsafe {
        match orig_python {
            Some(val) => std::env::set_var("GENDEPS_PYTHON", val),
            None => std::env::remove_var("GENDEPS_PYTHON"),
        }
        match orig_npm {
            Some(val) => std::env::set_var("GENDEPS_NPM", val),
            None => std::env::remove_var("GENDEPS_NPM"),
        }
    }
}

#[test]
#[serial]
fn test_resolve_config_with_explicit_base() {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join(PACKAGE_JSON), "{}").unwrap();
    let base = temp.path().display().to_string();

    let cli = Cli::parse_from(["gendeps", "--base", &base, "--python", "python3", "--timeout", "5"]);
    let config = cli.resolve_config().unwrap();

    let canonical = temp.path().canonicalize().unwrap();
    assert_eq!(config.base, canonical);
    assert_eq!(config.output, canonical.join("dist").join("deps.js"));
    assert_eq!(config.interpreter, "python3");
    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
}

#[tokio::test]
#[serial]
async fn test_dry_run_touches_nothing() {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join(PACKAGE_JSON), "{}").unwrap();
    let base = temp.path().display().to_string();

    let cli = Cli::parse_from(["gendeps", "--base", &base, "--dry-run"]);
    cli.execute().await.unwrap();

    assert!(!temp.path().join("dist").exists());
    assert!(!temp.path().join("node_modules").exists());
}
