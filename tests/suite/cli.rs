//! End-to-end runs of the `diamond` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn diamond(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_diamond"))
        .args(args)
        .env("HOME", home)
        .env("RUST_LOG", "warn")
        .output()
        .expect("diamond binary runs")
}

fn sample_manifest() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("manifests")
        .join("data_upgrade.toml")
}

#[test]
fn selector_prints_known_values() {
    let home = TempDir::new().unwrap();
    let out = diamond(
        home.path(),
        &["selector", "transferOwnership(address)", "supportsInterface(bytes4 interfaceId)"],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("0xf2fde38b  transferOwnership(address)"));
    assert!(stdout.contains("0x01ffc9a7  supportsInterface(bytes4)"));
}

#[test]
fn selector_rejects_malformed_signatures() {
    let home = TempDir::new().unwrap();
    let out = diamond(home.path(), &["selector", "not a signature"]);
    assert!(!out.status.success());
}

#[test]
fn sample_manifest_passes_as_json() {
    let home = TempDir::new().unwrap();
    let manifest = sample_manifest();
    let out = diamond(
        home.path(),
        &["run", manifest.to_str().unwrap(), "--format", "json"],
    );
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(out.status.success(), "{stdout}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["passed"], true);
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 8);
    assert_eq!(
        steps[4]["output"][0],
        format!("0x{}", "11".repeat(32))
    );
    assert_eq!(steps[5]["error"], "SelectorNotFound");
    assert_eq!(
        steps[6]["output"][0],
        "0x0000000000000000000000000000000000000000"
    );
    assert_eq!(steps[7]["output"][0], true);
    assert_eq!(report["facets"].as_array().unwrap().len(), 3);
}

#[test]
fn failed_expectation_sets_exit_status() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("scenario.toml");
    fs::write(
        &path,
        r#"
[diamond]
owner = "alice"
facets = ["loupe"]

[[steps]]
kind = "call"
signature = "owner()"
"#,
    )
    .unwrap();
    let out = diamond(home.path(), &["run", path.to_str().unwrap()]);
    assert!(!out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("FAIL"));
    assert!(stdout.contains("reverted FunctionNotFound"));
}

#[test]
fn config_selects_output_format() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".diamond");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let manifest = sample_manifest();
    let out = diamond(home.path(), &["run", manifest.to_str().unwrap()]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["passed"], true);

    let out = diamond(
        home.path(),
        &["run", manifest.to_str().unwrap(), "--format", "text"],
    );
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.ends_with("result: passed\n"));
}

#[test]
fn missing_manifest_is_an_error() {
    let home = TempDir::new().unwrap();
    let out = diamond(home.path(), &["run", "/nonexistent/manifest.toml"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Failed to read manifest"));
}
