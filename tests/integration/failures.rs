use predicates::prelude::*;
use std::fs;

use crate::{gendeps_cmd, gendeps_cmd_with_python, recording_script};
use gendeps::test_utils::TestProject;

/// Test that the tool's exit status is passed through and nothing is written
#[test]
fn test_tool_exit_code_passes_through() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer("printf 'partial output'\necho 'bad root' >&2\nexit 2\n").unwrap();

    gendeps_cmd(&project).assert().code(2).stderr(predicate::str::contains("bad root"));

    assert!(!project.manifest_path().exists());
}

/// Test that a failing run keeps the previous manifest
#[test]
fn test_tool_failure_keeps_previous_manifest() {
    let project = TestProject::new().unwrap();
    project.create_file("dist/deps.js", "previous").unwrap();
    project.write_deps_writer("exit 3\n").unwrap();

    gendeps_cmd(&project).assert().code(3);

    assert_eq!(project.read_manifest().unwrap(), b"previous");
    let leftovers: Vec<_> = fs::read_dir(project.path().join("dist"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}

/// Test that an unavailable toolchain exits 1 without launching the tool
#[test]
fn test_unavailable_toolchain_launches_nothing() {
    let project = TestProject::new().unwrap();
    project.make_node_modules_stale().unwrap();
    project.write_deps_writer(&recording_script("unused")).unwrap();

    gendeps_cmd(&project)
        .args(["--npm", "/nonexistent/npm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("toolchain unavailable"));

    assert!(!project.path().join("args.txt").exists());
    assert!(!project.path().join("dist").exists());
}

/// Test that a missing interpreter is reported as a launch failure
#[test]
fn test_missing_interpreter() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("unused")).unwrap();

    gendeps_cmd_with_python(&project, "gendeps-no-such-python")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch"));

    assert!(!project.manifest_path().exists());
}

/// Test that a missing depswriter.py is reported before launching anything
#[test]
fn test_missing_deps_writer() {
    let project = TestProject::new().unwrap();

    gendeps_cmd(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dependency writer not found"));

    assert!(!project.manifest_path().exists());
}

/// Test running outside any project
#[test]
fn test_no_project_found() {
    let project = TestProject::new().unwrap();
    let outside = tempfile::tempdir().unwrap();

    gendeps_cmd(&project)
        .current_dir(outside.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No package.json found"));
}

/// Test that a configured timeout kills a hung tool
#[test]
fn test_timeout_kills_hung_tool() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer("exec sleep 30\n").unwrap();

    gendeps_cmd(&project)
        .args(["--timeout", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timed out"));

    assert!(!project.manifest_path().exists());
}

/// Test that an invalid config file is rejected
#[test]
fn test_invalid_config_file() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("unused")).unwrap();
    project.create_file("gendeps.toml", "roots = []\n").unwrap();

    gendeps_cmd(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one source root"));

    assert!(!project.path().join("args.txt").exists());
}

/// Test that command-line usage errors exit 1, not a code a tool could return
#[test]
fn test_usage_error_exits_one() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("unused")).unwrap();

    gendeps_cmd(&project)
        .arg("--no-such-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"));

    gendeps_cmd(&project).args(["--verbose", "--quiet"]).assert().code(1);

    assert!(!project.path().join("args.txt").exists());
}

/// Test that --help and --version still succeed
#[test]
fn test_help_and_version_exit_zero() {
    let project = TestProject::new().unwrap();

    gendeps_cmd(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-update"));

    gendeps_cmd(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
