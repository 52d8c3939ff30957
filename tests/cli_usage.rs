//! Command-line surface tests against the built binaries.
//!
//! Both tools print usage and take no action when invoked with zero
//! arguments, and dbb-update-manifest falls back to the conventional
//! manifest path inside the source folder when --manifest is omitted.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

const BUILD_RESULT: &str = include_str!("fixtures/build_result.json");

#[test]
fn test_prepare_folder_zero_args_prints_usage() {
    let out = Command::new(env!("CARGO_BIN_EXE_dbb-prepare-folder"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"), "got: {stdout}");
    assert!(stdout.contains("--build-result"));
    assert!(stdout.contains("--working-folder"));
}

#[test]
fn test_update_manifest_zero_args_prints_usage() {
    let out = Command::new(env!("CARGO_BIN_EXE_dbb-update-manifest"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"), "got: {stdout}");
    assert!(stdout.contains("--build-result"));
    assert!(stdout.contains("--source-folder"));
}

#[test]
fn test_update_manifest_defaults_manifest_path_to_source_folder() {
    let dir = TempDir::new().unwrap();
    let build_result = dir.path().join("build_result.json");
    fs::write(&build_result, BUILD_RESULT).unwrap();

    // No --manifest and no manifest file in the source folder: the run must
    // fail on the conventional path, proving where the default points.
    let out = Command::new(env!("CARGO_BIN_EXE_dbb-update-manifest"))
        .arg("--build-result")
        .arg(&build_result)
        .arg("--source-folder")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    let expected = dir.path().join("deployment-manifest.yml");
    assert!(
        stderr.contains(&expected.display().to_string()),
        "got: {stderr}"
    );
}
