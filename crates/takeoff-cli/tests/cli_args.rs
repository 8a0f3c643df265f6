use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("takeoff").unwrap()
}

#[test]
fn help_flag_prints_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--out-dir"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn missing_input_file_is_usage_error() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("input PDF"));
}

#[test]
fn unreadable_input_fails_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");

    cmd()
        .arg(dir.path().join("missing.pdf"))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!out_dir.join("report_missing.json").exists());
}

#[test]
fn missing_rasterizer_fails_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("E-set.pdf");
    std::fs::write(&input, b"%PDF-1.4\n%%EOF\n").unwrap();
    let out_dir = dir.path().join("out");

    cmd()
        .env("PATH", "")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pdftoppm not found"));

    assert!(!out_dir.join("report_E-set.json").exists());
}

#[test]
fn config_show_prints_defaults() {
    cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"header_markers\""))
        .stdout(predicate::str::contains("TYPE MARR"))
        .stdout(predicate::str::contains("\"intensity_threshold\": 150"));
}

#[test]
fn config_validate_accepts_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("takeoff.json");
    std::fs::write(&path, r#"{ "detector": { "min_area": 250 } }"#).unwrap();

    cmd()
        .args(["config", "validate"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("min area 250"));
}

#[test]
fn config_validate_rejects_bad_aspect_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{ "detector": { "aspect_low": 3.0, "aspect_high": 1.0 } }"#,
    )
    .unwrap();

    cmd()
        .args(["config", "validate"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("aspect_low"));
}
