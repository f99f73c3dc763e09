use predicates::prelude::*;
use std::fs;

use crate::{gendeps_cmd, recording_script};
use gendeps::test_utils::TestProject;

/// Test the documented scenario: the tool prints one line and exits 0
#[test]
fn test_manifest_matches_tool_output() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("goog.addDependency(...);\\n")).unwrap();

    gendeps_cmd(&project).assert().success();

    assert_eq!(project.read_manifest().unwrap(), b"goog.addDependency(...);\n");
}

/// Test that the tool runs in the base directory with the five roots in order
#[test]
fn test_invocation_layout() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("")).unwrap();

    gendeps_cmd(&project).assert().success();

    let cwd = fs::read_to_string(project.path().join("cwd.txt")).unwrap();
    assert_eq!(cwd.trim_end(), project.path().display().to_string());

    let args = fs::read_to_string(project.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args,
        vec![
            "--root_with_prefix=lib ../../../../lib",
            "--root_with_prefix=ui ../../../../ui",
            "--root_with_prefix=third_party ../../../../third_party",
            "--root_with_prefix=dist ../../../../dist",
            "--root_with_prefix=demo ../../../../demo",
        ]
    );
}

/// Test that non-UTF-8 bytes and missing trailing newlines survive untouched
#[test]
fn test_binary_output_is_verbatim() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer("printf '\\377\\000abc'\n").unwrap();

    gendeps_cmd(&project).assert().success();

    assert_eq!(project.read_manifest().unwrap(), vec![0xff, 0x00, b'a', b'b', b'c']);
}

/// Test running from a subdirectory finds the base
#[test]
fn test_runs_from_subdirectory() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("ok")).unwrap();

    gendeps_cmd(&project).current_dir(project.path().join("lib")).assert().success();

    assert_eq!(project.read_manifest().unwrap(), b"ok");
}

/// Test that two runs over the same tree produce the same manifest
#[test]
fn test_repeated_runs_are_identical() {
    let project = TestProject::new().unwrap();
    project
        .write_deps_writer(&recording_script(r#"goog.addDependency("lib/player.js", ["shaka.Player"], []);\n"#))
        .unwrap();

    gendeps_cmd(&project).assert().success();
    let first = project.read_manifest().unwrap();

    gendeps_cmd(&project).assert().success();
    let second = project.read_manifest().unwrap();

    assert_eq!(first, second);
}

/// Test that a pre-existing dist/ directory and manifest are fine
#[test]
fn test_existing_dist_is_overwritten() {
    let project = TestProject::new().unwrap();
    project.create_file("dist/deps.js", "stale manifest that is longer than the new one").unwrap();
    project.write_deps_writer(&recording_script("new")).unwrap();

    gendeps_cmd(&project).assert().success();

    assert_eq!(project.read_manifest().unwrap(), b"new");
}

/// Test that gendeps.toml replaces the root table and output location
#[test]
fn test_project_config_file() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("cfg")).unwrap();
    project
        .create_file(
            "gendeps.toml",
            r#"
output = "build/deps.js"

[[roots]]
prefix = "src"
path = "../../../../src"
"#,
        )
        .unwrap();

    gendeps_cmd(&project).assert().success();

    let args = fs::read_to_string(project.path().join("args.txt")).unwrap();
    assert_eq!(args, "--root_with_prefix=src ../../../../src\n");
    assert_eq!(fs::read(project.path().join("build").join("deps.js")).unwrap(), b"cfg");
    assert!(!project.manifest_path().exists());
}

/// Test --skip-update does not need npm even when node_modules looks stale
#[test]
fn test_skip_update_ignores_stale_node_modules() {
    let project = TestProject::new().unwrap();
    project.make_node_modules_stale().unwrap();
    project.write_deps_writer(&recording_script("skipped")).unwrap();

    gendeps_cmd(&project)
        .args(["--skip-update", "--npm", "/nonexistent/npm"])
        .assert()
        .success();

    assert_eq!(project.read_manifest().unwrap(), b"skipped");
}

/// Test --dry-run prints the call and changes nothing
#[test]
fn test_dry_run_prints_invocation() {
    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("unused")).unwrap();

    gendeps_cmd(&project)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("depswriter.py"))
        .stdout(predicate::str::contains("'--root_with_prefix=lib ../../../../lib'"));

    assert!(!project.path().join("args.txt").exists());
    assert!(!project.path().join("dist").exists());
}

/// Test that tool warnings on a successful run reach the user
#[test]
fn test_tool_warnings_are_shown() {
    let project = TestProject::new().unwrap();
    project
        .write_deps_writer("echo 'Scanning paths: ../../../../lib' >&2\nprintf 'ok'\n")
        .unwrap();

    gendeps_cmd(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanning paths: ../../../../lib"));

    assert_eq!(project.read_manifest().unwrap(), b"ok");
}

/// Test that regenerating keeps the manifest readable by other users
#[test]
fn test_manifest_permissions_survive_regeneration() {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new().unwrap();
    project.write_deps_writer(&recording_script("fresh")).unwrap();

    gendeps_cmd(&project).assert().success();
    let mode = fs::metadata(project.manifest_path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);

    fs::set_permissions(project.manifest_path(), fs::Permissions::from_mode(0o664)).unwrap();
    gendeps_cmd(&project).assert().success();
    let mode = fs::metadata(project.manifest_path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o664);
}
