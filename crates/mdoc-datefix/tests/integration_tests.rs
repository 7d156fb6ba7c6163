mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{create_input_dir, datetime_lines, file_names, sample_mdoc, MdocBuilder};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("--help");

    cmd.assert().success().stdout(predicate::str::contains("DateTime field"));
}

#[test]
fn test_fix_relocates_and_rewrites() {
    let temp = TempDir::new().unwrap();
    let original = sample_mdoc();
    let dir = create_input_dir(
        &temp,
        "tilts",
        &[("TS_01.mdoc", original.as_str()), ("TS_02.mdoc", original.as_str()), ("README.txt", "notes")],
    );

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("fix").arg("tilts");
    cmd.assert().success().stdout(predicate::str::contains("2 rewritten"));

    let backup = temp.path().join("tilts_original");
    assert_eq!(file_names(&backup), vec!["README.txt", "TS_01.mdoc", "TS_02.mdoc"]);
    assert_eq!(fs::read_to_string(backup.join("TS_01.mdoc")).unwrap(), original);

    assert_eq!(file_names(&dir), vec!["TS_01.mdoc", "TS_02.mdoc"]);
    let fixed = fs::read_to_string(dir.join("TS_01.mdoc")).unwrap();
    assert_eq!(fixed.lines().count(), original.lines().count());
    let dates = datetime_lines(&fixed);
    assert_eq!(dates.len(), 3);
    assert_eq!(dates[0], "DateTime = 05-Jan-23  14:30:05");
    assert_eq!(dates[2], "DateTime = 05-Jan-23  14:32:15");
}

#[test]
fn test_fix_fails_fast_when_backup_exists() {
    let temp = TempDir::new().unwrap();
    let original = sample_mdoc();
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", original.as_str())]);
    fs::create_dir(temp.path().join("tilts_original")).unwrap();

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("fix").arg(&dir);
    cmd.assert().failure().stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(dir.join("TS_01.mdoc")).unwrap(), original);
}

#[test]
fn test_fix_with_output_dir() {
    let temp = TempDir::new().unwrap();
    let original = sample_mdoc();
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", original.as_str())]);
    let out = temp.path().join("fixed");

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("fix").arg(&dir).arg("--output").arg(&out).arg("--jobs").arg("1");
    cmd.assert().success();

    assert_eq!(fs::read_to_string(dir.join("TS_01.mdoc")).unwrap(), original);
    assert!(fs::read_to_string(out.join("TS_01.mdoc")).unwrap().contains("05-Jan-23  14:31:10"));
}

#[test]
fn test_fix_reports_pass_through_and_succeeds() {
    let temp = TempDir::new().unwrap();
    let no_header = MdocBuilder::new().no_header().build();
    create_input_dir(&temp, "tilts", &[("TS_09.mdoc", no_header.as_str())]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("fix").arg("tilts");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 passed through"))
        .stderr(predicate::str::contains("No header date found"));

    assert_eq!(fs::read_to_string(temp.path().join("tilts/TS_09.mdoc")).unwrap(), no_header);
}

#[test]
fn test_fix_dry_run_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let original = sample_mdoc();
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", original.as_str())]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("fix").arg(&dir).arg("--dry-run");
    cmd.assert().success().stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("tilts_original").exists());
    assert_eq!(fs::read_to_string(dir.join("TS_01.mdoc")).unwrap(), original);
}

#[test]
fn test_file_to_stdout() {
    let temp = TempDir::new().unwrap();
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", sample_mdoc().as_str())]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("file").arg(dir.join("TS_01.mdoc"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DateTime = 05-Jan-23  14:31:10"))
        .stdout(predicate::str::contains("04-Jan-22").not());
}

#[test]
fn test_inspect_json() {
    let temp = TempDir::new().unwrap();
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", sample_mdoc().as_str())]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("inspect").arg(&dir).arg("--format").arg("json");
    let output = cmd.assert().success().get_output().stdout.clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let report = &json[0]["report"];
    assert_eq!(report["canonical_date"], "05-Jan-23");
    assert_eq!(report["datetime_lines"], 3);
    assert_eq!(report["previous_dates"], serde_json::json!(["04-Jan-22", "31-Dec-99"]));
}

#[test]
fn test_custom_marker_from_config_file() {
    let temp = TempDir::new().unwrap();
    let content = "h 05-Jan-23\nStamp = 01-Jan-22 10:00\nDateTime = 01-Jan-22 10:00\n";
    let dir = create_input_dir(&temp, "tilts", &[("a.mdoc", content)]);
    fs::write(temp.path().join(".mdocfix.toml"), "marker = \"Stamp\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("file").arg(dir.join("a.mdoc"));
    cmd.assert().success().stdout(predicate::eq(
        "h 05-Jan-23\nStamp = 05-Jan-23 10:00\nDateTime = 01-Jan-22 10:00\n",
    ));
}

#[test]
fn test_list_writes_tomo_names() {
    let temp = TempDir::new().unwrap();
    let dir = create_input_dir(&temp, "tilts", &[("TS_02.mdoc", ""), ("TS_01.mdoc", ""), ("x.mrc", "")]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.arg("list").arg(&dir);
    cmd.assert().success().stdout(predicate::eq("TS_01\nTS_02\n"));
}

#[test]
fn test_fix_json_summary() {
    let temp = TempDir::new().unwrap();
    let no_header = MdocBuilder::new().no_header().build();
    create_input_dir(
        &temp,
        "tilts",
        &[("TS_01.mdoc", sample_mdoc().as_str()), ("TS_02.mdoc", no_header.as_str())],
    );

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("fix").arg("tilts").arg("--format").arg("json");
    let output = cmd.assert().success().get_output().stdout.clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["dry_run"], false);
    assert_eq!(json["files"][0]["name"], "TS_01.mdoc");
    assert_eq!(json["files"][0]["status"]["Rewritten"]["canonical_date"], "05-Jan-23");
    assert_eq!(json["files"][1]["status"]["PassedThrough"]["datetime_lines"], 0);
}

#[test]
fn test_fix_keeps_time_only_datetime_value() {
    let temp = TempDir::new().unwrap();
    let content = "h 05-Jan-23\nDateTime = 14:30:05\nDateTime = 01-Jan-22  14:31:10\n";
    let dir = create_input_dir(&temp, "tilts", &[("TS_01.mdoc", content)]);

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("fix").arg("tilts");
    cmd.assert().success().stderr(predicate::str::contains("DateTime line 2"));

    assert_eq!(
        fs::read_to_string(dir.join("TS_01.mdoc")).unwrap(),
        "h 05-Jan-23\nDateTime = 14:30:05\nDateTime = 05-Jan-23  14:31:10\n"
    );
}

#[cfg(unix)]
#[test]
fn test_fix_rewrites_symlinked_mdoc() {
    let temp = TempDir::new().unwrap();
    let store = create_input_dir(&temp, "store", &[("TS_01.mdoc", sample_mdoc().as_str())]);
    let dir = create_input_dir(&temp, "tilts", &[]);
    std::os::unix::fs::symlink(store.join("TS_01.mdoc"), dir.join("TS_01.mdoc")).unwrap();

    let mut cmd = cargo_bin_cmd!("mdocfix");
    cmd.current_dir(temp.path()).arg("fix").arg("tilts");
    cmd.assert().success().stdout(predicate::str::contains("1 rewritten"));

    let fixed = fs::read_to_string(dir.join("TS_01.mdoc")).unwrap();
    assert!(datetime_lines(&fixed).iter().all(|l| l.starts_with("DateTime = 05-Jan-23")));
    assert_eq!(fs::read_to_string(store.join("TS_01.mdoc")).unwrap(), sample_mdoc());
}
